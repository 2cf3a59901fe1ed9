//! featform - inline-editable fields and JSON form submission
//!
//! This crate turns static elements into inline editors and intercepts form
//! submission, sending fields as nested JSON and mapping the server's
//! validation errors back onto the offending controls. State changes follow
//! the Elm Architecture: [`Msg`] in, [`update`](update::update) on a [`Page`],
//! [`Cmd`] out.

pub mod ajax;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod dom;
pub mod editable;
pub mod field;
pub mod form;
pub mod inplace;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod tracing;
pub mod transport;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::PageConfig;
pub use messages::Msg;
pub use model::Page;
pub use runtime::Runtime;
