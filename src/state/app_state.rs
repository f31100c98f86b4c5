//! Application state definitions

use super::form::FormField;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// The demo request form
    #[default]
    Form,
    /// Modal prompt for typing an attachment path
    AttachPrompt,
}

/// One focusable element of the form view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(FormField),
    /// The attachment chip row (present only while files are attached)
    Attachments,
    Submit,
}

/// Focusable elements top to bottom.
///
/// While at least one file is attached the identifying fields are
/// hidden, so focus jumps from the chip row straight to the project
/// description. The hidden values stay in the record and are still
/// submitted.
pub fn focus_order(has_attachments: bool) -> Vec<FocusTarget> {
    let mut order = Vec::new();
    if has_attachments {
        order.push(FocusTarget::Attachments);
    } else {
        for field in FormField::IDENTIFYING {
            order.push(FocusTarget::Field(*field));
        }
    }
    order.push(FocusTarget::Field(FormField::ProjectInfo));
    for field in FormField::CONSENTS {
        order.push(FocusTarget::Field(*field));
    }
    order.push(FocusTarget::Submit);
    order
}

/// Mutable UI state outside the form record itself
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    /// Index into the current focus order
    pub focus_index: usize,
    /// Selected chip while the attachment row is focused
    pub selected_attachment: usize,
    /// Path being typed in the attach prompt
    pub attach_input: String,
    /// Advisory in-flight flag; the view refuses to resubmit while set
    pub is_submitting: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
}

impl AppState {
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_focus_order_without_attachments() {
        let order = focus_order(false);
        // 8 text fields + 3 checkboxes + submit
        assert_eq!(order.len(), 12);
        assert_eq!(order[0], FocusTarget::Field(FormField::FirstName));
        assert_eq!(order[7], FocusTarget::Field(FormField::ProjectInfo));
        assert_eq!(order[11], FocusTarget::Submit);
    }

    #[test]
    fn test_focus_order_hides_identifying_fields_with_attachments() {
        let order = focus_order(true);
        assert_eq!(order.len(), 6);
        assert_eq!(order[0], FocusTarget::Attachments);
        assert_eq!(order[1], FocusTarget::Field(FormField::ProjectInfo));
        assert!(!order.contains(&FocusTarget::Field(FormField::FirstName)));
        assert!(!order.contains(&FocusTarget::Field(FormField::BusinessEmail)));
        assert_eq!(order[5], FocusTarget::Submit);
    }

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Form);
        assert_eq!(state.focus_index, 0);
        assert!(!state.is_submitting);
        assert!(state.status_message.is_none());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_messages() {
        let mut state = AppState::default();
        state.push_error("bad");
        state.set_status("good");
        assert_eq!(state.error_message.as_deref(), Some("bad"));
        assert_eq!(state.status_message.as_deref(), Some("good"));
        state.clear_messages();
        assert!(state.error_message.is_none());
        assert!(state.status_message.is_none());
    }
}
