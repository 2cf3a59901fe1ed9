//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::ajax::HttpResponse;
use crate::dom::NodeId;
use crate::editable::WidgetMsg;
use crate::model::Ticket;
use crate::transport::TransportError;

/// Events on an intercepted form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMsg {
    /// Submit event (button, Enter, script)
    Submit,
    /// Native reset: controls back to defaults, annotations removed
    Reset,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Event or command for the inline widget bound to `element`
    Widget { element: NodeId, msg: WidgetMsg },
    /// Event on the form controller bound to `form`
    Form { form: NodeId, msg: FormMsg },
    /// Transport result for a pending request
    Response {
        ticket: Ticket,
        response: Result<HttpResponse, TransportError>,
    },
    /// Dismiss the summary panel
    ClosePanel,
}

impl Msg {
    pub fn widget(element: NodeId, msg: WidgetMsg) -> Self {
        Msg::Widget { element, msg }
    }

    pub fn submit(form: NodeId) -> Self {
        Msg::Form {
            form,
            msg: FormMsg::Submit,
        }
    }
}
