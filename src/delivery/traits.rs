//! Trait abstraction for the delivery client to enable mocking in tests

use async_trait::async_trait;

use super::client::{DeliveryError, EmailPayload};

/// One-shot email delivery seam
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    /// Hand the payload to the hosted delivery service once.
    ///
    /// An `Ok` response is opaque; failures carry the service's status
    /// code and response text when one was received.
    async fn send(&self, payload: &EmailPayload) -> Result<(), DeliveryError>;
}
