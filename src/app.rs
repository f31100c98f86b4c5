//! Application state and core logic

use crate::config::DeliveryConfig;
use crate::delivery::{DeliveryClient, EmailJsClient};
use crate::pipeline::{SubmissionOutcome, SubmissionPipeline, SUCCESS_NOTICE};
use crate::state::{
    focus_order, AppState, AttachmentEncoder, AttachmentList, FocusTarget, FormController,
    FormField, InlineEncoder, View,
};
use crate::storage::{FileStore, FormStore};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;

/// Main application struct
pub struct App {
    /// Current UI state
    pub state: AppState,
    /// Form record plus its persistence
    pub controller: FormController,
    /// Files selected for this session
    pub attachments: AttachmentList,
    /// Submission pipeline (delivery client + attachment strategy)
    pipeline: SubmissionPipeline,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance with the real store and delivery client
    pub fn new() -> Result<Self> {
        let config = DeliveryConfig::load()?;
        let store = FileStore::new()?;
        Ok(Self::with_parts(
            Box::new(store),
            Arc::new(EmailJsClient::new(config)),
            Arc::new(InlineEncoder),
        ))
    }

    /// Assemble an App from injected parts
    pub fn with_parts(
        store: Box<dyn FormStore>,
        client: Arc<dyn DeliveryClient>,
        encoder: Arc<dyn AttachmentEncoder>,
    ) -> Self {
        Self {
            state: AppState::default(),
            controller: FormController::initialize(store),
            attachments: AttachmentList::default(),
            pipeline: SubmissionPipeline::new(client, encoder),
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// The focusable elements for the current attachment state
    pub fn focus_order(&self) -> Vec<FocusTarget> {
        focus_order(!self.attachments.is_empty())
    }

    /// The currently focused element
    pub fn focused(&self) -> FocusTarget {
        let order = self.focus_order();
        order[self.state.focus_index.min(order.len() - 1)]
    }

    fn next_focus(&mut self) {
        let len = self.focus_order().len();
        self.state.focus_index = (self.state.focus_index + 1) % len;
    }

    fn prev_focus(&mut self) {
        let len = self.focus_order().len();
        if self.state.focus_index == 0 {
            self.state.focus_index = len - 1;
        } else {
            self.state.focus_index -= 1;
        }
    }

    /// Keep focus and chip selection valid after the attachment list changed
    fn clamp_focus(&mut self) {
        let len = self.focus_order().len();
        self.state.focus_index = self.state.focus_index.min(len - 1);
        self.state.selected_attachment = self
            .state
            .selected_attachment
            .min(self.attachments.len().saturating_sub(1));
    }

    /// Handle a key event for the current view
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.state.current_view {
            View::Form => self.handle_form_key(key).await,
            View::AttachPrompt => self.handle_attach_prompt_key(key),
        }
        Ok(())
    }

    async fn handle_form_key(&mut self, key: KeyEvent) {
        // Attach prompt is reachable from anywhere in the form
        if key.code == KeyCode::Char('o') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.state.attach_input.clear();
            self.state.current_view = View::AttachPrompt;
            return;
        }

        match key.code {
            KeyCode::Tab => self.next_focus(),
            KeyCode::BackTab => self.prev_focus(),
            KeyCode::Esc => self.state.clear_messages(),
            _ => match self.focused() {
                FocusTarget::Field(field) if field.is_checkbox() => {
                    if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                        self.controller.toggle(field);
                    }
                }
                FocusTarget::Field(field) => self.handle_text_field_key(field, key),
                FocusTarget::Attachments => self.handle_attachment_row_key(key),
                FocusTarget::Submit => {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                        self.submit().await;
                    }
                }
            },
        }
    }

    fn handle_text_field_key(&mut self, field: FormField, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.controller.input_char(field, c),
            KeyCode::Backspace => self.controller.backspace(field),
            KeyCode::Enter => {
                if field.is_multiline() {
                    self.controller.input_char(field, '\n');
                } else {
                    self.next_focus();
                }
            }
            _ => {}
        }
    }

    fn handle_attachment_row_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => {
                self.state.selected_attachment = self.state.selected_attachment.saturating_sub(1);
            }
            KeyCode::Right => {
                self.state.selected_attachment = (self.state.selected_attachment + 1)
                    .min(self.attachments.len().saturating_sub(1));
            }
            KeyCode::Backspace | KeyCode::Delete | KeyCode::Char('x') => {
                let id = self
                    .attachments
                    .records()
                    .get(self.state.selected_attachment)
                    .map(|r| r.id);
                if let Some(id) = id {
                    self.attachments.remove(id);
                    self.clamp_focus();
                }
            }
            KeyCode::Enter => {
                self.state.attach_input.clear();
                self.state.current_view = View::AttachPrompt;
            }
            _ => {}
        }
    }

    fn handle_attach_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state.current_view = View::Form;
            }
            KeyCode::Enter => {
                let path = PathBuf::from(self.state.attach_input.trim());
                let added = self.attachments.add_files(&[path]);
                if added == 0 {
                    self.state
                        .push_error("File not added: check the path and allowed extensions");
                } else {
                    self.state.error_message = None;
                }
                self.state.current_view = View::Form;
                self.clamp_focus();
            }
            KeyCode::Char(c) => self.state.attach_input.push(c),
            KeyCode::Backspace => {
                self.state.attach_input.pop();
            }
            _ => {}
        }
    }

    /// Run one submission attempt.
    ///
    /// The in-flight flag is advisory: the view stops calling submit while
    /// it is set, and it is cleared again no matter how delivery ends.
    pub async fn submit(&mut self) {
        if self.state.is_submitting {
            return;
        }
        if self.attachments.is_empty() && !self.controller.form().identifying_fields_complete() {
            self.state
                .push_error("Please fill in all required fields before submitting");
            return;
        }

        self.state.clear_messages();
        self.state.is_submitting = true;
        let outcome = self
            .pipeline
            .submit(self.controller.form(), self.attachments.records())
            .await;
        self.state.is_submitting = false;

        match outcome {
            SubmissionOutcome::Accepted => {
                self.controller.reset();
                self.attachments.clear();
                self.state.focus_index = 0;
                self.state.selected_attachment = 0;
                self.state.set_status(SUCCESS_NOTICE);
            }
            SubmissionOutcome::Rejected(message) => {
                // Form and attachments stay intact for another attempt
                self.state.push_error(message);
            }
        }
    }
}
