//! HTTP client for the hosted email-delivery API
//!
//! Submissions go through an EmailJS-compatible REST endpoint: one POST
//! carrying the service/template identifiers, the public key, and the
//! flat template parameters.

use crate::config::DeliveryConfig;
use crate::state::EncodedAttachment;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use super::traits::DeliveryClient;

/// Hosted send endpoint
pub const DELIVERY_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Failure modes of a single delivery attempt
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The service answered with a non-success status
    #[error("delivery rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The request never produced a response
    #[error("delivery request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl DeliveryError {
    /// The HTTP status attached to the failure, when the service answered
    pub fn status(&self) -> Option<u16> {
        match self {
            DeliveryError::Rejected { status, .. } => Some(*status),
            DeliveryError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// Flat template parameters plus any inline-encoded attachments
#[derive(Debug, Clone, Default)]
pub struct EmailPayload {
    pub template_params: BTreeMap<String, String>,
    pub attachments: Vec<EncodedAttachment>,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    attachments: &'a [EncodedAttachment],
}

/// Client for the hosted email-delivery service
pub struct EmailJsClient {
    http: reqwest::Client,
    config: DeliveryConfig,
}

impl EmailJsClient {
    pub fn new(config: DeliveryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl DeliveryClient for EmailJsClient {
    async fn send(&self, payload: &EmailPayload) -> Result<(), DeliveryError> {
        let body = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: &payload.template_params,
            attachments: &payload.attachments,
        };

        let response = self.http.post(DELIVERY_ENDPOINT).json(&body).send().await?;
        let status = response.status();
        if status.is_success() {
            tracing::info!("demo request delivered");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rejected_error_exposes_status() {
        let err = DeliveryError::Rejected {
            status: 422,
            body: "template mismatch".to_string(),
        };
        assert_eq!(err.status(), Some(422));
        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("template mismatch"));
    }

    #[test]
    fn test_send_request_serialization() {
        let mut params = BTreeMap::new();
        params.insert("from_name".to_string(), "Jane Doe".to_string());

        let body = SendRequest {
            service_id: "service_abc",
            template_id: "template_xyz",
            user_id: "pk_123",
            template_params: &params,
            attachments: &[],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["service_id"], "service_abc");
        assert_eq!(json["template_id"], "template_xyz");
        assert_eq!(json["user_id"], "pk_123");
        assert_eq!(json["template_params"]["from_name"], "Jane Doe");
        // Empty attachment lists stay off the wire
        assert!(json.get("attachments").is_none());
    }

    #[test]
    fn test_send_request_includes_attachments_when_present() {
        let params = BTreeMap::new();
        let attachments = vec![crate::state::EncodedAttachment {
            name: "brief.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            content: "aGVsbG8=".to_string(),
        }];

        let body = SendRequest {
            service_id: "s",
            template_id: "t",
            user_id: "u",
            template_params: &params,
            attachments: &attachments,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["attachments"][0]["name"], "brief.pdf");
        assert_eq!(json["attachments"][0]["content_type"], "application/pdf");
    }
}
