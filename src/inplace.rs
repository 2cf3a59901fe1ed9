//! Stock submit handler for `.inplace` elements.
//!
//! The element's `rel` attribute names the resource; a changed value is
//! written with `PUT {"value": current}`. The page turns the response into a
//! confirm (string payload), a redirect, or a revert.

use std::rc::Rc;

use serde_json::json;

use crate::ajax::{self, Method};
use crate::dom::Document;
use crate::editable::{RevertHandle, SubmitCallback, ValueChange};

/// Attribute holding the resource URL of an inline field
pub const RESOURCE_ATTR: &str = "rel";

/// `on_submit` that PUTs the new value to the element's `rel` URL
pub fn remote_put() -> SubmitCallback {
    Rc::new(|doc: &Document, change: &ValueChange, handle: &RevertHandle| {
        if change.current == change.previous {
            return None;
        }
        let Some(url) = doc.attr(handle.element, RESOURCE_ATTR) else {
            tracing::warn!(
                "Inline field {:?} has no {} attribute, not saving",
                handle.element,
                RESOURCE_ATTR
            );
            return None;
        };
        Some(ajax::request(
            Method::Put,
            url,
            json!({ "value": change.current }),
        ))
    })
}
