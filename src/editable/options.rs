//! Widget configuration and callback types.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::ajax::HttpRequest;
use crate::dom::Document;
use crate::field::{FieldKind, SelectOption};

use super::state::RevertHandle;

/// Values handed to every callback
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueChange {
    pub current: String,
    pub previous: String,
}

/// `on_edit` / `on_reset`
pub type ChangeCallback = Rc<dyn Fn(&ValueChange)>;

/// `on_submit`: called only when the value changed.
///
/// A returned request is sent by the page; its response confirms or reverts
/// the widget through `handle`.
pub type SubmitCallback = Rc<dyn Fn(&Document, &ValueChange, &RevertHandle) -> Option<HttpRequest>>;

/// Control event that commits when no submit button is configured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmitTrigger {
    #[default]
    #[serde(rename = "blur")]
    Blur,
    #[serde(rename = "change")]
    Change,
    #[serde(rename = "dblclick")]
    DoubleClick,
    #[serde(rename = "click")]
    Click,
}

/// Options for one [`EditableWidget`](super::EditableWidget)
#[derive(Clone, Default)]
pub struct WidgetOptions {
    pub on_edit: Option<ChangeCallback>,
    pub on_submit: Option<SubmitCallback>,
    pub on_reset: Option<ChangeCallback>,
    /// Class of the injected edit form
    pub edit_class: Option<String>,
    pub submit_label: Option<String>,
    pub cancel_label: Option<String>,
    pub cancel_link_label: Option<String>,
    /// Enter edit mode as soon as the widget is attached
    pub start_editing: bool,
    pub kind: FieldKind,
    pub submit_by: SubmitTrigger,
    pub select_options: Vec<SelectOption>,
}

impl WidgetOptions {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_on_edit(mut self, f: impl Fn(&ValueChange) + 'static) -> Self {
        self.on_edit = Some(Rc::new(f));
        self
    }

    pub fn with_on_reset(mut self, f: impl Fn(&ValueChange) + 'static) -> Self {
        self.on_reset = Some(Rc::new(f));
        self
    }

    pub fn with_on_submit(
        mut self,
        f: impl Fn(&Document, &ValueChange, &RevertHandle) -> Option<HttpRequest> + 'static,
    ) -> Self {
        self.on_submit = Some(Rc::new(f));
        self
    }

    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = Some(label.into());
        self
    }

    pub fn with_cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = Some(label.into());
        self
    }

    pub fn with_cancel_link_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_link_label = Some(label.into());
        self
    }

    pub fn with_edit_class(mut self, class: impl Into<String>) -> Self {
        self.edit_class = Some(class.into());
        self
    }

    pub fn with_submit_by(mut self, trigger: SubmitTrigger) -> Self {
        self.submit_by = trigger;
        self
    }

    pub fn with_select_options(mut self, options: Vec<SelectOption>) -> Self {
        self.select_options = options;
        self
    }

    pub fn starting_in_edit(mut self) -> Self {
        self.start_editing = true;
        self
    }
}

impl fmt::Debug for WidgetOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetOptions")
            .field("on_edit", &self.on_edit.is_some())
            .field("on_submit", &self.on_submit.is_some())
            .field("on_reset", &self.on_reset.is_some())
            .field("edit_class", &self.edit_class)
            .field("submit_label", &self.submit_label)
            .field("cancel_label", &self.cancel_label)
            .field("cancel_link_label", &self.cancel_link_label)
            .field("start_editing", &self.start_editing)
            .field("kind", &self.kind)
            .field("submit_by", &self.submit_by)
            .field("select_options", &self.select_options)
            .finish()
    }
}
