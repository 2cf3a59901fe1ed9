//! Maps failure envelopes onto the form that produced them.
//!
//! Validation errors (`invalid_parameters`, `missing_parameters`) mark the
//! named controls and add an explanation right after each one. Anything else
//! becomes a summary panel.

use crate::ajax::Envelope;
use crate::dom::form::find_control;
use crate::dom::{Document, NodeId};
use crate::model::SummaryPanel;

/// Class added to a control the server rejected
pub const INVALID_CLASS: &str = "invalid";

/// Class of the explanation node inserted after a rejected control
pub const EXPLANATION_CLASS: &str = "explanation";

/// One rejected control and the text explaining why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub subject: String,
    pub control: NodeId,
    pub reason: String,
}

/// What mapping an envelope did to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapped {
    /// Per-field annotations; `unmatched` lists subjects with no control of that name
    Fields {
        annotated: Vec<Annotation>,
        unmatched: Vec<String>,
    },
    /// Generic failure shown as a panel
    Panel(SummaryPanel),
}

/// Apply `envelope` to `form`, clearing any earlier annotations first
pub fn map(doc: &mut Document, form: NodeId, envelope: &Envelope) -> Mapped {
    clear(doc, form);

    if !envelope.code.is_field_error() {
        tracing::debug!("Generic failure ({}) shown as panel", envelope.code);
        return Mapped::Panel(SummaryPanel::failure(&envelope.raw));
    }

    let mut annotated = Vec::new();
    let mut unmatched = Vec::new();
    for subject in &envelope.subjects {
        let Some(control) = find_control(doc, form, subject) else {
            tracing::warn!("No control named {:?} for {}", subject, envelope.code);
            unmatched.push(subject.clone());
            continue;
        };
        let reason = envelope.reason_for(subject).to_string();
        doc.add_class(control, INVALID_CLASS);
        let explanation = doc.create_element("span");
        doc.add_class(explanation, EXPLANATION_CLASS);
        doc.append_text(explanation, &reason);
        doc.insert_after(control, explanation);
        annotated.push(Annotation {
            subject: subject.clone(),
            control,
            reason,
        });
    }

    Mapped::Fields {
        annotated,
        unmatched,
    }
}

/// Remove invalid markings and explanations left by an earlier attempt
pub fn clear(doc: &mut Document, form: NodeId) {
    for node in doc.find_by_class(form, INVALID_CLASS) {
        doc.remove_class(node, INVALID_CLASS);
    }
    for node in doc.find_by_class(form, EXPLANATION_CLASS) {
        doc.remove(node);
    }
}

/// Read the current annotations back out of the document as `(name, explanation)`
pub fn annotations(doc: &Document, form: NodeId) -> Vec<(String, String)> {
    doc.find_by_class(form, INVALID_CLASS)
        .into_iter()
        .map(|control| {
            let name = doc.attr(control, "name").unwrap_or_default().to_string();
            let reason = doc
                .next_sibling(control)
                .filter(|&n| doc.has_class(n, EXPLANATION_CLASS))
                .map(|n| doc.text_content(n))
                .unwrap_or_default();
            (name, reason)
        })
        .collect()
}
