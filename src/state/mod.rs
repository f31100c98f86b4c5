//! Application state module

mod app_state;
mod attachments;
mod form;

pub use app_state::*;
pub use attachments::*;
pub use form::*;
