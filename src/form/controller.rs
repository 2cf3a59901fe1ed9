//! Submit interception for a single form.

use serde_json::Value;

use crate::ajax::{self, Envelope, HttpRequest, Method};
use crate::dom::form::{form_fields, reset_form, submit_input};
use crate::dom::{Document, NodeId};
use crate::model::SummaryPanel;

use super::errors::{self, Mapped};
use super::serializer::{self, Serialized};

/// Class of the busy indicator inserted next to the submit button
pub const SPINNER_CLASS: &str = "spinner";

pub const SPINNER_SRC: &str = "/static/images/spinner.gif";

/// Values that take precedence over the form's own `method`/`action`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormOverrides {
    pub method: Option<Method>,
    pub url: Option<String>,
}

/// What a submit turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// GET: full page load of the action URL with the query appended
    Navigate(String),
    /// Anything else: an asynchronous JSON request
    Send(HttpRequest),
}

/// Owns one form's submission lifecycle
#[derive(Debug, Clone)]
pub struct FormController {
    form: NodeId,
    method: Method,
    url: String,
    spinner: NodeId,
    /// Subjects of the last failure that named no control in the form
    unmatched: Vec<String>,
}

impl FormController {
    /// Bind to `form`, reading method and URL from its attributes unless overridden
    pub fn attach(doc: &mut Document, form: NodeId, overrides: FormOverrides) -> Self {
        let method = overrides.method.unwrap_or_else(|| {
            doc.attr(form, "method")
                .and_then(|m| m.parse().ok())
                .unwrap_or_default()
        });
        let url = overrides
            .url
            .unwrap_or_else(|| doc.attr(form, "action").unwrap_or_default().to_string());

        let spinner = doc.create_element("img");
        doc.add_class(spinner, SPINNER_CLASS);
        doc.set_attr(spinner, "src", SPINNER_SRC);
        doc.set_attr(spinner, "hidden", "hidden");
        match submit_input(doc, form) {
            Some(submit) => {
                doc.insert_after(submit, spinner);
            }
            None => doc.append_child(form, spinner),
        }

        tracing::debug!("Bound form {:?}: {} {}", form, method, url);
        Self {
            form,
            method,
            url,
            spinner,
            unmatched: Vec::new(),
        }
    }

    pub fn form(&self) -> NodeId {
        self.form
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn spinner(&self) -> NodeId {
        self.spinner
    }

    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }

    /// Whether the busy indicator is showing
    pub fn is_busy(&self, doc: &Document) -> bool {
        doc.attr(self.spinner, "hidden").is_none()
    }

    /// Handle the form's submit event
    pub fn submit(&mut self, doc: &mut Document) -> Submission {
        let fields = form_fields(doc, self.form);
        match serializer::serialize(&fields, &self.method) {
            Serialized::Query(query) => {
                let target = serializer::with_action(&self.url, &query);
                tracing::info!("Navigating to {}", target);
                Submission::Navigate(target)
            }
            Serialized::Params(params) => {
                errors::clear(doc, self.form);
                self.unmatched.clear();
                self.set_busy(doc, true);
                tracing::info!("Submitting {} {}", self.method, self.url);
                Submission::Send(ajax::request(
                    self.method.clone(),
                    &self.url,
                    params.to_json(),
                ))
            }
        }
    }

    /// The request succeeded: reset the form and summarize the payload
    pub fn succeed(&mut self, doc: &mut Document, payload: &Value) -> SummaryPanel {
        self.set_busy(doc, false);
        reset_form(doc, self.form);
        errors::clear(doc, self.form);
        self.unmatched.clear();
        SummaryPanel::success(payload)
    }

    /// The request failed with a readable envelope
    pub fn fail(&mut self, doc: &mut Document, envelope: &Envelope) -> Mapped {
        self.set_busy(doc, false);
        let mapped = errors::map(doc, self.form, envelope);
        self.unmatched = match &mapped {
            Mapped::Fields { unmatched, .. } => unmatched.clone(),
            Mapped::Panel(_) => Vec::new(),
        };
        mapped
    }

    fn set_busy(&self, doc: &mut Document, busy: bool) {
        if busy {
            doc.remove_attr(self.spinner, "hidden");
        } else {
            doc.set_attr(self.spinner, "hidden", "hidden");
        }
    }
}
