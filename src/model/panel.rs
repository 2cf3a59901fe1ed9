//! Summary panel shown in a modal after a form submission

use serde_json::Value;

pub const SUCCESS_TITLE: &str = "Action successful";
pub const FAILURE_TITLE: &str = "Action failed";

/// Key under which a non-object payload is listed
pub const RESULT_KEY: &str = "Result:";

/// Entry key rendered as a link instead of text
const LINK_KEY: &str = "href";

/// How one value is presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelValue {
    Text(String),
    /// A "Follow" link to the given target
    Link(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelEntry {
    pub key: String,
    pub value: PanelValue,
}

/// A titled key/value list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPanel {
    pub title: String,
    pub entries: Vec<PanelEntry>,
}

impl SummaryPanel {
    /// Panel for a successful submission's payload
    pub fn success(payload: &Value) -> Self {
        Self::listing(SUCCESS_TITLE, payload)
    }

    /// Panel for a failure envelope that does not map onto fields
    pub fn failure(envelope: &Value) -> Self {
        Self::listing(FAILURE_TITLE, envelope)
    }

    fn listing(title: &str, payload: &Value) -> Self {
        let entries = match payload {
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| PanelEntry {
                    key: key.clone(),
                    value: entry_value(key, value),
                })
                .collect(),
            other => vec![PanelEntry {
                key: RESULT_KEY.to_string(),
                value: PanelValue::Text(value_text(other)),
            }],
        };
        Self {
            title: title.to_string(),
            entries,
        }
    }

    /// Look up an entry's value by key
    pub fn get(&self, key: &str) -> Option<&PanelValue> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.value)
    }

    /// HTML fragment for the modal
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<h3>{}</h3><div class=\"response\"><ul>",
            html_escape::encode_text(&self.title)
        );
        for entry in &self.entries {
            html.push_str("<li><span class=\"key\">");
            html.push_str(&html_escape::encode_text(&entry.key));
            html.push_str("</span><span class=\"value\">");
            match &entry.value {
                PanelValue::Text(text) => html.push_str(&html_escape::encode_text(text)),
                PanelValue::Link(href) => {
                    html.push_str("<a href=\"");
                    html.push_str(&html_escape::encode_double_quoted_attribute(href));
                    html.push_str("\">Follow</a>");
                }
            }
            html.push_str("</span></li>");
        }
        html.push_str("</ul></div>");
        html
    }

    /// Plain-text rendering for terminals
    pub fn to_text(&self) -> String {
        let mut out = self.title.clone();
        for entry in &self.entries {
            let value = match &entry.value {
                PanelValue::Text(text) => text.clone(),
                PanelValue::Link(href) => format!("Follow <{}>", href),
            };
            out.push_str(&format!("\n  {} {}", entry.key, value));
        }
        out
    }
}

fn entry_value(key: &str, value: &Value) -> PanelValue {
    if key == LINK_KEY {
        PanelValue::Link(value_text(value))
    } else {
        PanelValue::Text(value_text(value))
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
