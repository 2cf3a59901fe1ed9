//! Inline editing: turns a static element into an editable field.
//!
//! An [`EditableWidget`] owns one element. A click swaps the element's text
//! for a small edit form built by the widget's [`FieldKind`]; submitting it
//! shows the new value right away and hands the change to `on_submit`, which
//! may return a request to send. The response comes back as
//! [`WidgetMsg::Confirm`] or [`WidgetMsg::Revert`] carrying the
//! [`RevertHandle`] issued by the commit.
//!
//! # Example
//!
//! ```
//! use featform::dom::Document;
//! use featform::editable::{EditableWidget, Transition, WidgetMsg, WidgetOptions};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! let el = doc.append_element(root, "span");
//! doc.append_text(el, "hello");
//!
//! let (mut widget, _) = EditableWidget::attach(&mut doc, el, WidgetOptions::default());
//! widget.update(&mut doc, WidgetMsg::Click { target: el });
//! let control = widget.control().unwrap();
//! doc.set_value(control, "hello!");
//!
//! let t = widget.update(&mut doc, WidgetMsg::Submit);
//! assert!(matches!(t, Some(Transition::Committed { .. })));
//! assert_eq!(doc.text_content(el), "hello!");
//! ```
//!
//! [`FieldKind`]: crate::field::FieldKind

mod messages;
mod options;
mod state;

pub use messages::{Key, WidgetMsg};
pub use options::{ChangeCallback, SubmitCallback, SubmitTrigger, ValueChange, WidgetOptions};
pub use state::{
    EditableWidget, Phase, RevertHandle, Transition, CANCEL_LINK_CLASS, SUBMIT_CANCEL_CLASS,
};
