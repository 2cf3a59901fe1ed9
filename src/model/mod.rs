//! Page model - the complete state of one page
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod panel;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

pub use panel::{PanelEntry, PanelValue, SummaryPanel, FAILURE_TITLE, SUCCESS_TITLE};

use crate::config::{ConfigError, PageConfig};
use crate::dom::{Document, NodeId};
use crate::editable::{EditableWidget, RevertHandle, Transition, WidgetOptions};
use crate::form::{FormController, FormOverrides};

/// Identifies one in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What issued a pending request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// An inline commit; the handle confirms or reverts it
    Widget(RevertHandle),
    /// A form submission
    Form(NodeId),
}

/// Counts from [`Page::bootstrap`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bootstrapped {
    pub widgets: usize,
    pub forms: usize,
}

/// The complete page model
#[derive(Debug, Default)]
pub struct Page {
    pub document: Document,
    /// Inline widgets keyed by their element
    pub widgets: HashMap<NodeId, EditableWidget>,
    /// Form controllers keyed by their form element
    pub forms: HashMap<NodeId, FormController>,
    /// Requests sent and not yet answered
    pub pending: BTreeMap<Ticket, Origin>,
    /// Active summary panel (modal)
    pub panel: Option<SummaryPanel>,
    /// Set when the page navigated away
    pub location: Option<String>,
    next_ticket: u64,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// Bind an inline widget to `element`, replacing any existing one
    pub fn attach_widget(&mut self, element: NodeId, options: WidgetOptions) -> Option<Transition> {
        let (widget, began) = EditableWidget::attach(&mut self.document, element, options);
        self.widgets.insert(element, widget);
        began
    }

    /// Intercept submission of `form`
    pub fn attach_form(&mut self, form: NodeId, overrides: FormOverrides) {
        let controller = FormController::attach(&mut self.document, form, overrides);
        self.forms.insert(form, controller);
    }

    /// Wire up every configured inline element and form in the document
    pub fn bootstrap(&mut self, config: &PageConfig) -> Result<Bootstrapped, ConfigError> {
        let options = config.inplace.widget_options()?;
        let root = self.document.root();

        let elements = self
            .document
            .find_by_class(root, &config.inplace.selector_class);
        for &element in &elements {
            self.attach_widget(element, options.clone());
        }

        let forms: Vec<NodeId> = self
            .document
            .find_by_class(root, &config.forms.selector_class)
            .into_iter()
            .filter(|&n| self.document.tag(n) == Some("form"))
            .collect();
        for &form in &forms {
            self.attach_form(form, config.forms.overrides());
        }

        tracing::info!(
            "Bootstrapped {} inline widgets and {} forms",
            elements.len(),
            forms.len()
        );
        Ok(Bootstrapped {
            widgets: elements.len(),
            forms: forms.len(),
        })
    }

    pub fn widget(&self, element: NodeId) -> Option<&EditableWidget> {
        self.widgets.get(&element)
    }

    pub fn form(&self, form: NodeId) -> Option<&FormController> {
        self.forms.get(&form)
    }

    /// Register a request and hand out its ticket
    pub fn issue(&mut self, origin: Origin) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.pending.insert(ticket, origin);
        ticket
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
