//! Form-level document queries: successful controls, reset, lookup by name.

use super::{Document, NodeId};

/// Whether `id` is a form control (`input`, `select` or `textarea`)
pub fn is_control(doc: &Document, id: NodeId) -> bool {
    matches!(doc.tag(id), Some("input" | "select" | "textarea"))
}

/// All controls beneath `root` in document order
pub fn controls(doc: &Document, root: NodeId) -> Vec<NodeId> {
    doc.descendants(root)
        .into_iter()
        .filter(|&n| is_control(doc, n))
        .collect()
}

/// The first control named exactly `name`
pub fn find_control(doc: &Document, form: NodeId, name: &str) -> Option<NodeId> {
    controls(doc, form)
        .into_iter()
        .find(|&n| doc.attr(n, "name") == Some(name))
}

/// The form's first `<input type="submit">`
pub fn submit_input(doc: &Document, form: NodeId) -> Option<NodeId> {
    doc.find_by_tag(form, "input")
        .into_iter()
        .find(|&n| doc.input_type(n).as_deref() == Some("submit"))
}

/// Ordered `(name, value)` pairs of the form's successful controls.
///
/// Unnamed and disabled controls are skipped, as are buttons and file
/// inputs; checkboxes and radios contribute only when checked.
pub fn form_fields(doc: &Document, form: NodeId) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    for control in controls(doc, form) {
        let Some(name) = doc.attr(control, "name") else {
            continue;
        };
        if name.is_empty() || doc.attr(control, "disabled").is_some() {
            continue;
        }
        if let Some(kind) = doc.input_type(control) {
            match kind.as_str() {
                "submit" | "reset" | "button" | "image" | "file" => continue,
                "checkbox" | "radio" if !doc.is_checked(control) => continue,
                "checkbox" | "radio" if doc.attr(control, "value").is_none() => {
                    fields.push((name.to_string(), "on".to_string()));
                    continue;
                }
                _ => {}
            }
        }
        if doc.tag(control) == Some("select") && doc.find_by_tag(control, "option").is_empty() {
            continue;
        }
        let value = doc.value(control).unwrap_or_default();
        fields.push((name.to_string(), value));
    }
    fields
}

/// Restore every control beneath `form` to its default state
pub fn reset_form(doc: &mut Document, form: NodeId) {
    for node in doc.descendants(form) {
        if is_control(doc, node) || doc.tag(node) == Some("option") {
            doc.reset_control(node);
        }
    }
}
