//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::ajax::HttpRequest;
use crate::model::Ticket;

/// Side effects produced by `update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Send a request; its result comes back as `Msg::Response` with the same ticket
    Send { ticket: Ticket, request: HttpRequest },
    /// Full page load
    Navigate(String),
}
