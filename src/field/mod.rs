//! Field strategies: how each value type is rendered as an editable control
//! and how its live value is read back.
//!
//! Field kinds form a closed set. Type tags are parsed once, when options are
//! built, so an unknown tag is a configuration error rather than a failure on
//! first click.

mod checkbox_list;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dom::Document;
use crate::dom::NodeId;

pub use checkbox_list::{CHECKBOX_PANE_CLASS, LABEL_SEPARATOR};

/// Text shown in place of a password, whatever its length
pub const PASSWORD_MASK: &str = "*****";

/// Default `<textarea>` size
pub const DEFAULT_ROWS: u32 = 6;
pub const DEFAULT_COLS: u32 = 10;

/// One entry of the ordered choice list used by select variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Submitted value
    pub value: String,
    /// Displayed label
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// An option whose value and label are the same string
    pub fn plain(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            value: label.clone(),
            label,
        }
    }
}

/// The value type an inline widget edits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text input
    #[default]
    Text,
    /// Masked display; the real value lives in the widget's secret cache
    Password,
    /// Multi-row text control
    Textarea { rows: u32, cols: u32 },
    /// One choice out of the select options
    Select,
    /// Several labels picked from a checkbox list, displayed joined by ", "
    SelectCheckbox,
}

/// A type tag that names no field kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldType(pub String);

impl fmt::Display for UnknownFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown field type: {}", self.0)
    }
}

impl std::error::Error for UnknownFieldType {}

impl FromStr for FieldKind {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(FieldKind::Text),
            "password" => Ok(FieldKind::Password),
            "textarea" => Ok(FieldKind::Textarea {
                rows: DEFAULT_ROWS,
                cols: DEFAULT_COLS,
            }),
            "select" => Ok(FieldKind::Select),
            "selectCheckbox" => Ok(FieldKind::SelectCheckbox),
            other => Err(UnknownFieldType(other.to_string())),
        }
    }
}

impl FieldKind {
    /// Build a kind from its tag, sizing textareas with `rows`/`cols`
    pub fn from_tag(tag: &str, rows: u32, cols: u32) -> Result<Self, UnknownFieldType> {
        match tag.parse()? {
            FieldKind::Textarea { .. } => Ok(FieldKind::Textarea { rows, cols }),
            kind => Ok(kind),
        }
    }

    /// The configuration tag for this kind
    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Password => "password",
            FieldKind::Textarea { .. } => "textarea",
            FieldKind::Select => "select",
            FieldKind::SelectCheckbox => "selectCheckbox",
        }
    }

    /// Whether the committed value is kept out of the display
    pub fn is_masked(&self) -> bool {
        matches!(self, FieldKind::Password)
    }

    /// Text shown in the element while idle. A select shows the label of the
    /// option holding `value`.
    pub fn display(&self, value: &str, choices: &[SelectOption]) -> String {
        match self {
            FieldKind::Password => PASSWORD_MASK.to_string(),
            FieldKind::Select => choices
                .iter()
                .find(|choice| choice.value == value)
                .map_or(value, |choice| choice.label.as_str())
                .to_string(),
            _ => value.to_string(),
        }
    }

    /// The value an edit starts from: the displayed text, the secret for
    /// passwords, or the value of the option whose label is displayed.
    pub fn seed(
        &self,
        displayed: String,
        secret: Option<&str>,
        choices: &[SelectOption],
    ) -> String {
        match self {
            FieldKind::Password => secret.unwrap_or_default().to_string(),
            FieldKind::Select => choices
                .iter()
                .find(|choice| choice.label == displayed)
                .map_or(displayed, |choice| choice.value.clone()),
            _ => displayed,
        }
    }

    /// Insert the editable control at the front of `form`, seeded with `current`.
    /// A select pre-selects the option whose value is `current`.
    ///
    /// Returns the control that should receive focus.
    pub fn render(
        &self,
        doc: &mut Document,
        form: NodeId,
        current: &str,
        choices: &[SelectOption],
    ) -> NodeId {
        match self {
            FieldKind::Text => prepend_input(doc, form, "text", current),
            FieldKind::Password => prepend_input(doc, form, "password", current),
            FieldKind::Textarea { rows, cols } => {
                let area = doc.create_element("textarea");
                doc.set_attr(area, "rows", &rows.to_string());
                doc.set_attr(area, "cols", &cols.to_string());
                doc.set_value(area, current);
                doc.prepend_child(form, area);
                area
            }
            FieldKind::Select => {
                let select = doc.create_element("select");
                for choice in choices {
                    let option = doc.append_element(select, "option");
                    doc.set_attr(option, "value", &choice.value);
                    doc.append_text(option, &choice.label);
                    doc.set_checked(option, choice.value == current);
                }
                doc.prepend_child(form, select);
                select
            }
            FieldKind::SelectCheckbox => {
                let field = prepend_input(doc, form, "text", "");
                let selected = checkbox_list::split_labels(current);
                checkbox_list::open(doc, field, choices, &selected);
                field
            }
        }
    }

    /// Read the live value of a control rendered by [`FieldKind::render`]
    pub fn extract(&self, doc: &Document, form: NodeId, control: NodeId) -> String {
        match self {
            FieldKind::SelectCheckbox => {
                checkbox_list::join_labels(&checkbox_list::selected_labels(doc, form))
            }
            _ => doc.value(control).unwrap_or_default(),
        }
    }
}

fn prepend_input(doc: &mut Document, form: NodeId, kind: &str, value: &str) -> NodeId {
    let input = doc.create_element("input");
    doc.set_attr(input, "type", kind);
    doc.set_value(input, value);
    doc.prepend_child(form, input);
    input
}
