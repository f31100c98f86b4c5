//! Demo request form record and its persistence controller

use crate::storage::{FormStore, FORM_DATA_KEY};
use serde::{Deserialize, Serialize};

/// All user-entered values for one demo request.
///
/// Serialized field names match the snapshot format kept in the local
/// store, so a blob written by an older session restores cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DemoForm {
    pub first_name: String,
    pub last_name: String,
    pub business_email: String,
    pub phone_number: String,
    pub job_title: String,
    pub enterprise: String,
    pub country: String,
    pub project_info: String,
    pub opt_in_product_updates: bool,
    pub opt_in_sales_outreach: bool,
    pub opt_in_events: bool,
}

/// Identifies a single form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    LastName,
    BusinessEmail,
    PhoneNumber,
    JobTitle,
    Enterprise,
    Country,
    ProjectInfo,
    OptInProductUpdates,
    OptInSalesOutreach,
    OptInEvents,
}

impl FormField {
    /// Identifying fields, hidden while attachments are present
    pub const IDENTIFYING: &'static [FormField] = &[
        FormField::FirstName,
        FormField::LastName,
        FormField::BusinessEmail,
        FormField::PhoneNumber,
        FormField::JobTitle,
        FormField::Enterprise,
        FormField::Country,
    ];

    /// The three consent checkboxes
    pub const CONSENTS: &'static [FormField] = &[
        FormField::OptInProductUpdates,
        FormField::OptInSalesOutreach,
        FormField::OptInEvents,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::FirstName => "First Name *",
            FormField::LastName => "Last Name *",
            FormField::BusinessEmail => "Business Email Address *",
            FormField::PhoneNumber => "Phone Number *",
            FormField::JobTitle => "Job Title *",
            FormField::Enterprise => "Enterprise/Institution *",
            FormField::Country => "Country *",
            FormField::ProjectInfo => "Tell us about your project",
            FormField::OptInProductUpdates => "Opt-in to receive product updates",
            FormField::OptInSalesOutreach => "Opt-in to personalized sales outreach",
            FormField::OptInEvents => "Opt-in to receive invites to future events",
        }
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(
            self,
            FormField::OptInProductUpdates
                | FormField::OptInSalesOutreach
                | FormField::OptInEvents
        )
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, FormField::ProjectInfo)
    }
}

impl DemoForm {
    /// Borrow the text value of a field; `None` for checkbox fields
    pub fn text(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::FirstName => Some(&self.first_name),
            FormField::LastName => Some(&self.last_name),
            FormField::BusinessEmail => Some(&self.business_email),
            FormField::PhoneNumber => Some(&self.phone_number),
            FormField::JobTitle => Some(&self.job_title),
            FormField::Enterprise => Some(&self.enterprise),
            FormField::Country => Some(&self.country),
            FormField::ProjectInfo => Some(&self.project_info),
            _ => None,
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::FirstName => Some(&mut self.first_name),
            FormField::LastName => Some(&mut self.last_name),
            FormField::BusinessEmail => Some(&mut self.business_email),
            FormField::PhoneNumber => Some(&mut self.phone_number),
            FormField::JobTitle => Some(&mut self.job_title),
            FormField::Enterprise => Some(&mut self.enterprise),
            FormField::Country => Some(&mut self.country),
            FormField::ProjectInfo => Some(&mut self.project_info),
            _ => None,
        }
    }

    /// Read the checked state of a consent field; `None` for text fields
    pub fn flag(&self, field: FormField) -> Option<bool> {
        match field {
            FormField::OptInProductUpdates => Some(self.opt_in_product_updates),
            FormField::OptInSalesOutreach => Some(self.opt_in_sales_outreach),
            FormField::OptInEvents => Some(self.opt_in_events),
            _ => None,
        }
    }

    fn flag_mut(&mut self, field: FormField) -> Option<&mut bool> {
        match field {
            FormField::OptInProductUpdates => Some(&mut self.opt_in_product_updates),
            FormField::OptInSalesOutreach => Some(&mut self.opt_in_sales_outreach),
            FormField::OptInEvents => Some(&mut self.opt_in_events),
            _ => None,
        }
    }

    /// Replace exactly one text field with `value`, verbatim
    pub fn set_text(&mut self, field: FormField, value: String) -> bool {
        match self.text_mut(field) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Flip one consent checkbox
    pub fn toggle(&mut self, field: FormField) -> bool {
        match self.flag_mut(field) {
            Some(slot) => {
                *slot = !*slot;
                true
            }
            None => false,
        }
    }

    /// All identifying text fields are filled in (project info is optional)
    pub fn identifying_fields_complete(&self) -> bool {
        FormField::IDENTIFYING
            .iter()
            .all(|f| self.text(*f).is_some_and(|v| !v.is_empty()))
    }
}

/// Owns the form record and mirrors every change into the local store.
///
/// Persistence is best-effort: a failed write is logged and never shown
/// to the user, and the next edit simply writes the whole record again.
pub struct FormController {
    store: Box<dyn FormStore>,
    form: DemoForm,
}

impl FormController {
    /// Restore the persisted snapshot if one exists, else start blank.
    /// A blob that fails to parse is treated the same as no blob.
    pub fn initialize(store: Box<dyn FormStore>) -> Self {
        let form = match store.get(FORM_DATA_KEY) {
            Ok(Some(blob)) => match serde_json::from_str(&blob) {
                Ok(form) => form,
                Err(e) => {
                    tracing::warn!("discarding unreadable form snapshot: {e}");
                    DemoForm::default()
                }
            },
            Ok(None) => DemoForm::default(),
            Err(e) => {
                tracing::warn!("failed to read form snapshot: {e}");
                DemoForm::default()
            }
        };
        Self { store, form }
    }

    pub fn form(&self) -> &DemoForm {
        &self.form
    }

    /// Append a character to a text field and persist the new snapshot
    pub fn input_char(&mut self, field: FormField, c: char) {
        if let Some(slot) = self.form.text_mut(field) {
            slot.push(c);
            self.persist();
        }
    }

    /// Remove the last character of a text field and persist
    pub fn backspace(&mut self, field: FormField) {
        if let Some(slot) = self.form.text_mut(field) {
            if slot.pop().is_some() {
                self.persist();
            }
        }
    }

    /// Replace a whole text field value and persist
    pub fn set_text(&mut self, field: FormField, value: String) {
        if self.form.set_text(field, value) {
            self.persist();
        }
    }

    /// Flip a consent checkbox and persist
    pub fn toggle(&mut self, field: FormField) {
        if self.form.toggle(field) {
            self.persist();
        }
    }

    /// Restore the blank record and delete the persisted snapshot.
    /// Invoked only after a successful submission.
    pub fn reset(&mut self) {
        self.form = DemoForm::default();
        if let Err(e) = self.store.delete(FORM_DATA_KEY) {
            tracing::warn!("failed to delete form snapshot: {e}");
        }
    }

    fn persist(&self) {
        let blob = match serde_json::to_string(&self.form) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!("failed to serialize form snapshot: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(FORM_DATA_KEY, &blob) {
            tracing::warn!("failed to persist form snapshot: {e}");
        }
    }
}
