//! Server error mapping tests
//!
//! Failure envelopes returned for intercepted forms: field annotations,
//! generic failure panels, and clean-up on the next attempt.

mod common;

use common::{empty_page, signup_form, ScriptedTransport, SignupForm};

use featform::form::errors::annotations;
use featform::form::{FormOverrides, EXPLANATION_CLASS, INVALID_CLASS};
use featform::model::PanelValue;
use featform::{Msg, Runtime};

fn submitting(transport: ScriptedTransport) -> (Runtime<ScriptedTransport>, SignupForm) {
    let mut page = empty_page();
    let f = signup_form(&mut page.document, "post", "/users");
    page.document.set_value(f.name, "ann");
    page.attach_form(f.form, FormOverrides::default());
    (Runtime::new(page, transport), f)
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

#[test]
fn test_invalid_parameters_mark_fields() {
    let transport = ScriptedTransport::new().respond(
        422,
        r#"{"errorCode": "invalid_parameters",
            "subjects": ["user.email"],
            "reasons": {"user.email": "bad format"}}"#,
    );
    let (mut rt, f) = submitting(transport);
    rt.dispatch(Msg::submit(f.form));
    rt.run_until_idle();

    let doc = &rt.page.document;
    assert!(doc.has_class(f.email, INVALID_CLASS));
    let explanation = doc.next_sibling(f.email).unwrap();
    assert!(doc.has_class(explanation, EXPLANATION_CLASS));
    assert_eq!(doc.text_content(explanation), "bad format");
    assert!(rt.page.panel.is_none());
    assert!(!rt.page.form(f.form).unwrap().is_busy(doc));
}

#[test]
fn test_invalid_parameter_without_reason() {
    let transport = ScriptedTransport::new().respond(
        422,
        r#"{"errorCode": "invalid_parameters", "subjects": ["user.name"], "reasons": {}}"#,
    );
    let (mut rt, f) = submitting(transport);
    rt.dispatch(Msg::submit(f.form));
    rt.run_until_idle();
    assert_eq!(
        annotations(&rt.page.document, f.form),
        pairs(&[("user.name", "Unknown")])
    );
}

#[test]
fn test_missing_parameters_explained() {
    let transport = ScriptedTransport::new().respond(
        400,
        r#"{"errorCode": "missing_parameters", "subjects": ["user.email", "user.address.city"]}"#,
    );
    let (mut rt, f) = submitting(transport);
    rt.dispatch(Msg::submit(f.form));
    rt.run_until_idle();
    assert_eq!(
        annotations(&rt.page.document, f.form),
        pairs(&[
            ("user.email", "Is required and missing."),
            ("user.address.city", "Is required and missing."),
        ])
    );
}

#[test]
fn test_legacy_error_key() {
    let transport = ScriptedTransport::new().respond(
        400,
        r#"{"error": "missing_parameters", "subjects": ["user.email"]}"#,
    );
    let (mut rt, f) = submitting(transport);
    rt.dispatch(Msg::submit(f.form));
    rt.run_until_idle();
    assert!(rt.page.document.has_class(f.email, INVALID_CLASS));
}

#[test]
fn test_resubmit_clears_previous_annotations() {
    let transport = ScriptedTransport::new()
        .respond(
            400,
            r#"{"errorCode": "missing_parameters", "subjects": ["user.email"]}"#,
        )
        .respond(200, r#"{"id": 1}"#);
    let (mut rt, f) = submitting(transport);

    rt.dispatch(Msg::submit(f.form));
    rt.run_until_idle();
    assert_eq!(annotations(&rt.page.document, f.form).len(), 1);

    rt.page.document.set_value(f.name, "ann");
    rt.dispatch(Msg::submit(f.form));
    // Cleared as soon as the new attempt starts
    assert!(annotations(&rt.page.document, f.form).is_empty());
    assert!(rt
        .page
        .document
        .find_by_class(f.form, EXPLANATION_CLASS)
        .is_empty());
    rt.run_until_idle();
    assert!(rt.page.panel.is_some());
}

#[test]
fn test_other_error_codes_open_failure_panel() {
    let transport = ScriptedTransport::new().respond(
        409,
        r#"{"errorCode": "conflict", "message": "already exists"}"#,
    );
    let (mut rt, f) = submitting(transport);
    rt.dispatch(Msg::submit(f.form));
    rt.run_until_idle();

    let panel = rt.page.panel.as_ref().unwrap();
    assert_eq!(panel.title, "Action failed");
    assert_eq!(
        panel.get("message"),
        Some(&PanelValue::Text("already exists".into()))
    );
    assert!(annotations(&rt.page.document, f.form).is_empty());
}

#[test]
fn test_subject_without_control_is_skipped() {
    let transport = ScriptedTransport::new().respond(
        400,
        r#"{"errorCode": "missing_parameters", "subjects": ["user.phone", "user.email"]}"#,
    );
    let (mut rt, f) = submitting(transport);
    rt.dispatch(Msg::submit(f.form));
    rt.run_until_idle();
    assert_eq!(
        annotations(&rt.page.document, f.form),
        pairs(&[("user.email", "Is required and missing.")])
    );
}
