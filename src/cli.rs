//! Command-line argument parsing for `featform`
//!
//! Supports:
//! - Serializing `name=value` pairs the way an intercepted form would
//! - Submitting them to a live endpoint and printing the result
//! - Validating a page configuration file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use featform::ajax::Method;
use featform::dom::{Document, NodeId};
use featform::form::errors::annotations;
use featform::model::Page;

/// Inline editing and JSON form submission toolkit
#[derive(Parser, Debug)]
#[command(name = "featform", version, about = "JSON form submission toolkit")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the request body (or GET URL) a form with these fields produces
    Serialize {
        /// Form method; GET produces a URL instead of a JSON body
        #[arg(short, long, default_value = "POST")]
        method: String,

        /// Form action URL
        #[arg(short, long, default_value = "")]
        action: String,

        /// Field as name=value (repeatable, dotted names nest)
        #[arg(short, long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },

    /// Submit fields to an endpoint and show the panel or field errors
    Submit {
        /// Endpoint URL
        url: String,

        #[arg(short, long, default_value = "POST")]
        method: String,

        #[arg(short, long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },

    /// Validate a page configuration file (defaults to the user config)
    CheckConfig {
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
}

/// Parse `name=value`; the value may itself contain `=`
pub fn parse_field(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, _)) if name.is_empty() => Err(format!("Missing field name in '{}'", s)),
        Some((name, value)) => Ok((name.to_string(), value.to_string())),
        None => Err(format!("Expected NAME=VALUE, got '{}'", s)),
    }
}

pub fn parse_method(s: &str) -> Method {
    s.parse().unwrap_or_default()
}

/// Build `<form method action>` with one text input per field and a submit input
pub fn build_form(
    doc: &mut Document,
    method: &Method,
    action: &str,
    fields: &[(String, String)],
) -> NodeId {
    let root = doc.root();
    let form = doc.append_element(root, "form");
    doc.set_attr(form, "method", method.as_str());
    doc.set_attr(form, "action", action);
    for (name, value) in fields {
        let input = doc.append_element(form, "input");
        doc.set_attr(input, "name", name);
        doc.set_attr(input, "value", value);
    }
    let submit = doc.append_element(form, "input");
    doc.set_attr(submit, "type", "submit");
    form
}

/// Lines describing how a submitted form ended up, or `None` when the
/// response left nothing to show
pub fn submit_report(page: &Page, form: NodeId) -> Option<Vec<String>> {
    if let Some(location) = &page.location {
        return Some(vec![format!("Navigate: {}", location)]);
    }
    if let Some(panel) = &page.panel {
        return Some(vec![panel.to_text()]);
    }

    let mut lines: Vec<String> = annotations(&page.document, form)
        .into_iter()
        .map(|(name, reason)| format!("{}: {}", name, reason))
        .collect();
    if let Some(controller) = page.form(form) {
        lines.extend(
            controller
                .unmatched()
                .iter()
                .map(|subject| format!("{}: rejected, but no such field was sent", subject)),
        );
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines)
    }
}
