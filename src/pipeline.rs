//! Submission pipeline: payload assembly, the single delivery attempt,
//! and mapping delivery failures to user-facing messages

use crate::delivery::{DeliveryClient, DeliveryError, EmailPayload};
use crate::state::{format_size, AttachmentEncoder, AttachmentRecord, DemoForm};
use std::sync::Arc;

/// Rendered in `files_info` when nothing is attached
pub const NO_FILES_PLACEHOLDER: &str = "No files attached.";

/// Rendered in `project_description`/`message` when the field is empty
pub const NO_DESCRIPTION_PLACEHOLDER: &str = "No project description provided.";

/// Fixed recipient name expected by the email template
pub const RECIPIENT_NAME: &str = "Sales Team";

/// Notice shown after a successful submission
pub const SUCCESS_NOTICE: &str =
    "Demo request submitted successfully! We will contact you soon.";

/// Result of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted,
    /// Carries the single user-facing failure message
    Rejected(String),
}

/// Build the flat template parameters for one submission.
///
/// Attachment metadata goes into `files_info` regardless of whether the
/// file content made it into the payload; inclusion failures are not
/// distinguished from full success.
pub fn build_payload(form: &DemoForm, attachments: &[AttachmentRecord]) -> EmailPayload {
    let mut payload = EmailPayload::default();
    let params = &mut payload.template_params;

    let description = if form.project_info.is_empty() {
        NO_DESCRIPTION_PLACEHOLDER.to_string()
    } else {
        form.project_info.clone()
    };
    let files_info = if attachments.is_empty() {
        NO_FILES_PLACEHOLDER.to_string()
    } else {
        attachments
            .iter()
            .map(|a| format!("{} ({})", a.name, format_size(a.size)))
            .collect::<Vec<_>>()
            .join(", ")
    };

    params.insert(
        "from_name".to_string(),
        format!("{} {}", form.first_name, form.last_name),
    );
    params.insert("from_email".to_string(), form.business_email.clone());
    params.insert("phone".to_string(), form.phone_number.clone());
    params.insert("company".to_string(), form.enterprise.clone());
    params.insert("country".to_string(), form.country.clone());
    params.insert("job_title".to_string(), form.job_title.clone());
    params.insert("project_description".to_string(), description.clone());
    params.insert("files_info".to_string(), files_info);
    params.insert(
        "opt_product_updates".to_string(),
        yes_no(form.opt_in_product_updates),
    );
    params.insert(
        "opt_sales_outreach".to_string(),
        yes_no(form.opt_in_sales_outreach),
    );
    params.insert("opt_events".to_string(), yes_no(form.opt_in_events));
    params.insert("to_name".to_string(), RECIPIENT_NAME.to_string());
    params.insert("reply_to".to_string(), form.business_email.clone());
    params.insert("message".to_string(), description);

    payload
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

/// Map a delivery failure to exactly one user-facing message
pub fn failure_message(err: &DeliveryError) -> String {
    let detail = match err.status() {
        Some(400) => "Invalid template or service ID. Please check the delivery configuration.",
        Some(401) => "Authentication failed. Please check the delivery public key.",
        Some(422) => "Template variables do not match. Please check the template configuration.",
        _ => "Please try again or contact our sales team directly.",
    };
    format!("Failed to submit demo request. {detail}")
}

/// Runs one submission: encode attachments, send once, classify the result.
///
/// Attachment preparation is a pluggable strategy so the inline-encoding
/// path can be swapped without touching the field mapping.
pub struct SubmissionPipeline {
    client: Arc<dyn DeliveryClient>,
    encoder: Arc<dyn AttachmentEncoder>,
}

impl SubmissionPipeline {
    pub fn new(client: Arc<dyn DeliveryClient>, encoder: Arc<dyn AttachmentEncoder>) -> Self {
        Self { client, encoder }
    }

    /// Single attempt, no retry. Files are read sequentially before the
    /// one outbound call.
    pub async fn submit(
        &self,
        form: &DemoForm,
        attachments: &[AttachmentRecord],
    ) -> SubmissionOutcome {
        let mut payload = build_payload(form, attachments);
        payload.attachments = self.encoder.prepare(attachments).await;

        match self.client.send(&payload).await {
            Ok(()) => SubmissionOutcome::Accepted,
            Err(e) => {
                tracing::error!("delivery failed: {e}");
                SubmissionOutcome::Rejected(failure_message(&e))
            }
        }
    }
}
