//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod form;
mod response;
mod widget;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::Page;

pub use form::update_form;
pub use response::update_response;
pub use widget::update_widget;

/// Result of handling one message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Handled {
    /// Side effect for the runtime
    pub cmd: Option<Cmd>,
    /// The originating DOM event's default action must be suppressed
    pub prevent_default: bool,
}

impl Handled {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn prevented(cmd: Option<Cmd>) -> Self {
        Self {
            cmd,
            prevent_default: true,
        }
    }
}

/// Main update function - dispatches to sub-handlers
pub fn update(page: &mut Page, msg: Msg) -> Handled {
    match msg {
        Msg::Widget { element, msg } => widget::update_widget(page, element, msg),
        Msg::Form { form, msg } => form::update_form(page, form, msg),
        Msg::Response { ticket, response } => response::update_response(page, ticket, response),
        Msg::ClosePanel => {
            page.panel = None;
            Handled::ignored()
        }
    }
}
