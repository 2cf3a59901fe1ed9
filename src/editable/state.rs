//! The inline edit state machine.

use crate::ajax::HttpRequest;
use crate::dom::{Document, NodeId};
use crate::field::FieldKind;

use super::messages::{Key, WidgetMsg};
use super::options::{SubmitTrigger, ValueChange, WidgetOptions};

/// Class of the container holding the submit/cancel controls
pub const SUBMIT_CANCEL_CLASS: &str = "submit-cancel-container";

/// Class of the cancel link
pub const CANCEL_LINK_CLASS: &str = "hide-form";

/// Token for one commit: reverts (or confirms) the value it was issued for.
///
/// A handle goes stale once the widget is cancelled, reset with Escape or
/// destroyed after the handle was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevertHandle {
    pub element: NodeId,
    pub epoch: u64,
    /// Value to restore on revert
    pub previous: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Showing the value; `armed` means a click starts editing
    Idle { armed: bool },
    /// Edit form injected and focused
    Editing,
    /// State cleared; every event is ignored
    Destroyed,
}

/// What an event did to the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    BeganEdit {
        change: ValueChange,
    },
    /// Value changed and was displayed; `request` is what `on_submit` asked to send
    Committed {
        change: ValueChange,
        handle: RevertHandle,
        request: Option<HttpRequest>,
    },
    /// Committed with the value it started with; `on_submit` was not called
    Unchanged {
        value: String,
    },
    Cancelled {
        change: ValueChange,
    },
    Reverted {
        value: String,
    },
    Confirmed {
        value: String,
    },
    /// A revert or confirm arrived for an invalidated handle and was ignored
    Stale {
        handle_epoch: u64,
        epoch: u64,
    },
    Enabled,
    Disabled,
    Destroyed,
}

/// One element's inline editor
#[derive(Debug)]
pub struct EditableWidget {
    element: NodeId,
    options: WidgetOptions,
    phase: Phase,
    current: String,
    previous: String,
    epoch: u64,
    /// Real value of a password field; the element only ever shows the mask
    secret: Option<String>,
    edit_form: Option<NodeId>,
    control: Option<NodeId>,
}

impl EditableWidget {
    /// Bind to `element`. With `start_editing` the edit form opens immediately.
    pub fn attach(
        doc: &mut Document,
        element: NodeId,
        options: WidgetOptions,
    ) -> (Self, Option<Transition>) {
        let current = doc.text_content(element);
        let mut widget = Self {
            element,
            phase: Phase::Idle { armed: true },
            previous: current.clone(),
            current,
            epoch: 0,
            secret: None,
            edit_form: None,
            control: None,
            options,
        };
        tracing::debug!(
            "Attached {} widget to {:?}",
            widget.options.kind.tag(),
            element
        );
        let began = if widget.options.start_editing {
            Some(widget.begin_edit(doc))
        } else {
            None
        };
        (widget, began)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_editing(&self) -> bool {
        self.phase == Phase::Editing
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn previous(&self) -> &str {
        &self.previous
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    /// Seed the password cache (e.g. with a value known to the host page)
    pub fn set_secret(&mut self, secret: impl Into<String>) {
        self.secret = Some(secret.into());
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    pub fn kind(&self) -> FieldKind {
        self.options.kind
    }

    /// The injected edit form while editing
    pub fn edit_form(&self) -> Option<NodeId> {
        self.edit_form
    }

    /// The primary control while editing
    pub fn control(&self) -> Option<NodeId> {
        self.control
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Apply one event. `None` means the event was not for this widget.
    pub fn update(&mut self, doc: &mut Document, msg: WidgetMsg) -> Option<Transition> {
        if self.phase == Phase::Destroyed {
            tracing::debug!("Ignoring {:?} on destroyed widget {:?}", msg, self.element);
            return None;
        }

        match msg {
            WidgetMsg::Click { target } => match self.phase {
                Phase::Idle { armed: true }
                    if doc.is_inclusive_descendant(target, self.element) =>
                {
                    Some(self.begin_edit(doc))
                }
                Phase::Editing if Some(target) == self.control => {
                    self.on_trigger(doc, SubmitTrigger::Click)
                }
                _ => None,
            },
            WidgetMsg::DoubleClick => self.on_trigger(doc, SubmitTrigger::DoubleClick),
            WidgetMsg::Blur => self.on_trigger(doc, SubmitTrigger::Blur),
            WidgetMsg::Change => self.on_trigger(doc, SubmitTrigger::Change),
            WidgetMsg::KeyDown { key } => match (self.phase, key) {
                (Phase::Editing, Key::Escape) => Some(self.cancel(doc)),
                (Phase::Editing, Key::Enter) if self.submits_on_enter() => Some(self.commit(doc)),
                _ => None,
            },
            WidgetMsg::Submit if self.is_editing() => Some(self.commit(doc)),
            WidgetMsg::Reset if self.is_editing() => Some(self.cancel(doc)),
            WidgetMsg::Submit | WidgetMsg::Reset => None,
            WidgetMsg::Enable => match self.phase {
                Phase::Idle { .. } => {
                    self.phase = Phase::Idle { armed: true };
                    Some(Transition::Enabled)
                }
                _ => None,
            },
            WidgetMsg::Disable => match self.phase {
                Phase::Idle { .. } => {
                    self.phase = Phase::Idle { armed: false };
                    Some(Transition::Disabled)
                }
                _ => None,
            },
            WidgetMsg::Destroy => Some(self.destroy(doc)),
            WidgetMsg::Revert(handle) => Some(self.revert(doc, handle)),
            WidgetMsg::Confirm { handle, value } => Some(self.confirm(doc, handle, value)),
        }
    }

    /// Implicit commit from a control event, only when no submit button exists
    fn on_trigger(&mut self, doc: &mut Document, trigger: SubmitTrigger) -> Option<Transition> {
        if self.is_editing()
            && self.options.submit_label.is_none()
            && self.options.submit_by == trigger
        {
            Some(self.commit(doc))
        } else {
            None
        }
    }

    fn submits_on_enter(&self) -> bool {
        !matches!(
            self.options.kind,
            FieldKind::Textarea { .. } | FieldKind::Select
        )
    }

    fn change(&self) -> ValueChange {
        ValueChange {
            current: self.current.clone(),
            previous: self.previous.clone(),
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn begin_edit(&mut self, doc: &mut Document) -> Transition {
        let kind = self.options.kind;
        let displayed = doc.text_content(self.element);
        self.current = kind.seed(
            displayed,
            self.secret.as_deref(),
            &self.options.select_options,
        );

        doc.clear_children(self.element);
        let form = doc.append_element(self.element, "form");
        if let Some(class) = &self.options.edit_class {
            doc.add_class(form, class);
        }

        let buttons = doc.append_element(form, "div");
        doc.add_class(buttons, SUBMIT_CANCEL_CLASS);
        if let Some(label) = &self.options.submit_label {
            let submit = doc.append_element(buttons, "button");
            doc.set_attr(submit, "type", "submit");
            doc.append_text(submit, label);
        }
        if let Some(label) = &self.options.cancel_label {
            let reset = doc.append_element(buttons, "input");
            doc.set_attr(reset, "type", "reset");
            doc.set_attr(reset, "value", label);
        }
        if let Some(label) = &self.options.cancel_link_label {
            let link = doc.append_element(buttons, "a");
            doc.add_class(link, CANCEL_LINK_CLASS);
            doc.set_attr(link, "href", "#");
            doc.append_text(link, label);
        }

        let control = kind.render(doc, form, &self.current, &self.options.select_options);
        doc.focus(control);

        self.previous = self.current.clone();
        self.edit_form = Some(form);
        self.control = Some(control);
        self.phase = Phase::Editing;

        let change = self.change();
        tracing::debug!("Editing {:?}: {:?}", self.element, change.current);
        if let Some(on_edit) = &self.options.on_edit {
            on_edit(&change);
        }
        Transition::BeganEdit { change }
    }

    fn commit(&mut self, doc: &mut Document) -> Transition {
        let kind = self.options.kind;
        let value = match (self.edit_form, self.control) {
            (Some(form), Some(control)) => kind.extract(doc, form, control),
            _ => self.current.clone(),
        };
        if kind.is_masked() {
            self.secret = Some(value.clone());
        }
        self.current = value;
        self.show(doc);

        let change = self.change();
        if change.current == change.previous {
            tracing::debug!("Unchanged commit on {:?}", self.element);
            return Transition::Unchanged {
                value: change.current,
            };
        }

        let handle = RevertHandle {
            element: self.element,
            epoch: self.epoch,
            previous: change.previous.clone(),
        };
        let request = self
            .options
            .on_submit
            .as_ref()
            .and_then(|on_submit| on_submit(doc, &change, &handle));
        self.previous = self.current.clone();

        tracing::info!(
            "Committed {:?}: {:?} -> {:?}",
            self.element,
            change.previous,
            change.current
        );
        Transition::Committed {
            change,
            handle,
            request,
        }
    }

    fn cancel(&mut self, doc: &mut Document) -> Transition {
        self.show(doc);
        self.epoch += 1;

        let change = self.change();
        tracing::debug!("Cancelled edit on {:?}", self.element);
        if let Some(on_reset) = &self.options.on_reset {
            on_reset(&change);
        }
        Transition::Cancelled { change }
    }

    fn revert(&mut self, doc: &mut Document, handle: RevertHandle) -> Transition {
        if handle.epoch != self.epoch {
            return self.stale(&handle);
        }
        self.previous = handle.previous.clone();
        self.current = handle.previous;
        if self.options.kind.is_masked() {
            self.secret = Some(self.current.clone());
        }
        // An open editor keeps the user's input; Cancel or Escape shows the reverted value
        if !self.is_editing() {
            self.show(doc);
        }
        tracing::info!("Reverted {:?} to {:?}", self.element, self.current);
        Transition::Reverted {
            value: self.current.clone(),
        }
    }

    fn confirm(&mut self, doc: &mut Document, handle: RevertHandle, value: String) -> Transition {
        if handle.epoch != self.epoch {
            return self.stale(&handle);
        }
        // The server's reply never replaces a committed password
        if self.options.kind.is_masked() {
            return Transition::Confirmed {
                value: self.current.clone(),
            };
        }
        self.previous = value.clone();
        self.current = value;
        if !self.is_editing() {
            self.show(doc);
        }
        Transition::Confirmed {
            value: self.current.clone(),
        }
    }

    fn stale(&self, handle: &RevertHandle) -> Transition {
        tracing::warn!(
            "Ignoring stale result for {:?} (handle epoch {}, widget epoch {})",
            self.element,
            handle.epoch,
            self.epoch
        );
        Transition::Stale {
            handle_epoch: handle.epoch,
            epoch: self.epoch,
        }
    }

    fn destroy(&mut self, doc: &mut Document) -> Transition {
        if self.is_editing() {
            self.show(doc);
        }
        self.epoch += 1;
        self.current.clear();
        self.previous.clear();
        self.secret = None;
        self.phase = Phase::Destroyed;
        tracing::debug!("Destroyed widget on {:?}", self.element);
        Transition::Destroyed
    }

    /// Tear down the edit form and display `current`, re-arming the click
    fn show(&mut self, doc: &mut Document) {
        let text = self
            .options
            .kind
            .display(&self.current, &self.options.select_options);
        doc.set_text(self.element, &text);
        self.edit_form = None;
        self.control = None;
        self.phase = Phase::Idle { armed: true };
    }
}
