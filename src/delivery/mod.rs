//! Email-delivery module for the hosted send API

mod client;
mod traits;

pub use client::{DeliveryError, EmailJsClient, EmailPayload};
pub use traits::DeliveryClient;

#[cfg(test)]
pub use traits::MockDeliveryClient;
