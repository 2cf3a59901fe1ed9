//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::VecDeque;

use featform::ajax::{HttpRequest, HttpResponse};
use featform::dom::{Document, NodeId};
use featform::transport::{Transport, TransportError};
use featform::Page;

/// Transport that answers from a script and records every request
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    pub responses: VecDeque<Result<HttpResponse, TransportError>>,
    pub requests: Vec<HttpRequest>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, status: u16, body: &str) -> Self {
        self.responses.push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(mut self, error: TransportError) -> Self {
        self.responses.push_back(Err(error));
        self
    }
}

impl Transport for ScriptedTransport {
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.push(request.clone());
        self.responses
            .pop_front()
            .unwrap_or(Err(TransportError::Exhausted))
    }
}

/// `<span class="inplace" rel="{rel}">{text}</span>` under the body
pub fn inline_field(doc: &mut Document, text: &str, rel: &str) -> NodeId {
    let root = doc.root();
    let span = doc.append_element(root, "span");
    doc.add_class(span, "inplace");
    doc.set_attr(span, "rel", rel);
    doc.append_text(span, text);
    span
}

/// Controls of the signup form used across tests
pub struct SignupForm {
    pub form: NodeId,
    pub name: NodeId,
    pub email: NodeId,
    pub city: NodeId,
    pub submit: NodeId,
}

/// `form.action_form` posting `user.name`, `user.email` and `user.address.city`
pub fn signup_form(doc: &mut Document, method: &str, action: &str) -> SignupForm {
    let root = doc.root();
    let form = doc.append_element(root, "form");
    doc.add_class(form, "action_form");
    doc.set_attr(form, "method", method);
    doc.set_attr(form, "action", action);

    let name = text_input(doc, form, "user.name");
    let email = text_input(doc, form, "user.email");
    let city = text_input(doc, form, "user.address.city");
    let submit = doc.append_element(form, "input");
    doc.set_attr(submit, "type", "submit");
    doc.set_attr(submit, "value", "Save");

    SignupForm {
        form,
        name,
        email,
        city,
        submit,
    }
}

pub fn text_input(doc: &mut Document, form: NodeId, name: &str) -> NodeId {
    let input = doc.append_element(form, "input");
    doc.set_attr(input, "type", "text");
    doc.set_attr(input, "name", name);
    input
}

/// Page with an empty document
pub fn empty_page() -> Page {
    Page::new(Document::new())
}
