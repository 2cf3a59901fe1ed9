//! Inline edit tests
//!
//! Drives bootstrapped `.inplace` widgets through the runtime: editing,
//! saving over the transport, confirm/revert and overlapping saves.

mod common;

use common::{empty_page, inline_field, ScriptedTransport};

use serde_json::json;

use featform::ajax::Method;
use featform::dom::NodeId;
use featform::editable::{Key, Phase, WidgetMsg, CANCEL_LINK_CLASS};
use featform::model::{PanelValue, FAILURE_TITLE};
use featform::transport::TransportError;
use featform::{Msg, PageConfig, Runtime};

fn runtime_with(text: &str, transport: ScriptedTransport) -> (Runtime<ScriptedTransport>, NodeId) {
    let mut page = empty_page();
    let el = inline_field(&mut page.document, text, "/agents/1/name");
    page.bootstrap(&PageConfig::default()).unwrap();
    (Runtime::new(page, transport), el)
}

fn edit_to(rt: &mut Runtime<ScriptedTransport>, el: NodeId, value: &str) {
    assert!(rt.dispatch(Msg::widget(el, WidgetMsg::Click { target: el })));
    let control = rt.page.widget(el).unwrap().control().unwrap();
    rt.page.document.set_value(control, value);
    assert!(rt.dispatch(Msg::widget(el, WidgetMsg::Submit)));
}

fn text(rt: &Runtime<ScriptedTransport>, el: NodeId) -> String {
    rt.page.document.text_content(el)
}

// ========================================================================
// Edit form
// ========================================================================

#[test]
fn test_bootstrap_uses_stock_edit_form() {
    let (mut rt, el) = runtime_with("dns", ScriptedTransport::new());
    rt.dispatch(Msg::widget(el, WidgetMsg::Click { target: el }));

    let widget = rt.page.widget(el).unwrap();
    assert_eq!(widget.phase(), Phase::Editing);
    let form = widget.edit_form().unwrap();
    let doc = &rt.page.document;
    assert!(doc.has_class(form, "editor_field"));
    let button = doc.find_by_tag(form, "button")[0];
    assert_eq!(doc.text_content(button), "OK");
    let link = doc.find_by_class(form, CANCEL_LINK_CLASS)[0];
    assert_eq!(doc.text_content(link), "Cancel");
}

#[test]
fn test_blur_does_not_commit_when_submit_button_exists() {
    let (mut rt, el) = runtime_with("dns", ScriptedTransport::new());
    rt.dispatch(Msg::widget(el, WidgetMsg::Click { target: el }));
    assert!(!rt.dispatch(Msg::widget(el, WidgetMsg::Blur)));
    assert!(rt.page.widget(el).unwrap().is_editing());
}

// ========================================================================
// Saving
// ========================================================================

#[test]
fn test_save_puts_value_and_confirms() {
    let transport = ScriptedTransport::new().respond(200, r#""dns-renamed""#);
    let (mut rt, el) = runtime_with("dns", transport);

    edit_to(&mut rt, el, "dns2");
    assert_eq!(text(&rt, el), "dns2");
    assert_eq!(rt.page.pending_count(), 1);

    assert_eq!(rt.run_until_idle(), 1);
    let sent = &rt.transport().requests[0];
    assert_eq!(sent.method, Method::Put);
    assert_eq!(sent.url, "/agents/1/name");
    assert_eq!(sent.json_body(), Some(json!({"value": "dns2"})));

    assert_eq!(text(&rt, el), "dns-renamed");
    assert_eq!(rt.page.pending_count(), 0);
}

#[test]
fn test_non_string_success_keeps_optimistic_value() {
    let transport = ScriptedTransport::new().respond(200, r#"{"id": 1}"#);
    let (mut rt, el) = runtime_with("dns", transport);
    edit_to(&mut rt, el, "dns2");
    rt.run_until_idle();
    assert_eq!(text(&rt, el), "dns2");
}

#[test]
fn test_unchanged_value_sends_nothing() {
    let (mut rt, el) = runtime_with("dns", ScriptedTransport::new());
    edit_to(&mut rt, el, "dns");
    assert_eq!(rt.queued(), 0);
    assert_eq!(rt.page.pending_count(), 0);
    assert_eq!(text(&rt, el), "dns");
}

#[test]
fn test_failure_reverts() {
    let transport = ScriptedTransport::new().respond(
        422,
        r#"{"errorCode": "invalid_parameters", "subjects": ["value"]}"#,
    );
    let (mut rt, el) = runtime_with("dns", transport);
    edit_to(&mut rt, el, "bad name");
    rt.run_until_idle();
    assert_eq!(text(&rt, el), "dns");
    assert_eq!(rt.page.widget(el).unwrap().current(), "dns");
}

#[test]
fn test_unreadable_failure_is_dropped() {
    let transport = ScriptedTransport::new().respond(500, "<html>oops</html>");
    let (mut rt, el) = runtime_with("dns", transport);
    edit_to(&mut rt, el, "dns2");
    rt.run_until_idle();
    // Neither confirmed nor reverted
    assert_eq!(text(&rt, el), "dns2");
    assert_eq!(rt.page.pending_count(), 0);
}

#[test]
fn test_transport_error_is_dropped() {
    let transport = ScriptedTransport::new().fail(TransportError::Connect("refused".into()));
    let (mut rt, el) = runtime_with("dns", transport);
    edit_to(&mut rt, el, "dns2");
    rt.run_until_idle();
    assert_eq!(text(&rt, el), "dns2");
}

#[test]
fn test_redirect_navigates() {
    let transport = ScriptedTransport::new().respond(200, r#"{"_redirect": "/agents"}"#);
    let (mut rt, el) = runtime_with("dns", transport);
    edit_to(&mut rt, el, "dns2");
    rt.run_until_idle();
    assert_eq!(rt.page.location.as_deref(), Some("/agents"));
}

// ========================================================================
// Overlap and cancellation
// ========================================================================

#[test]
fn test_overlapping_saves_both_apply() {
    let transport = ScriptedTransport::new()
        .respond(200, r#""v2""#)
        .respond(200, r#""v3""#);
    let (mut rt, el) = runtime_with("v1", transport);

    edit_to(&mut rt, el, "v2");
    edit_to(&mut rt, el, "v3");
    assert_eq!(rt.queued(), 2);
    assert_eq!(rt.page.pending_count(), 2);

    assert!(rt.step());
    assert_eq!(text(&rt, el), "v2");
    assert!(rt.step());
    assert_eq!(text(&rt, el), "v3");
    assert_eq!(rt.transport().requests.len(), 2);
}

#[test]
fn test_escape_restores_text_and_makes_pending_revert_stale() {
    let transport = ScriptedTransport::new().respond(
        400,
        r#"{"errorCode": "missing_parameters", "subjects": ["value"]}"#,
    );
    let (mut rt, el) = runtime_with("v1", transport);
    edit_to(&mut rt, el, "v2");

    rt.dispatch(Msg::widget(el, WidgetMsg::Click { target: el }));
    let control = rt.page.widget(el).unwrap().control().unwrap();
    rt.page.document.set_value(control, "typing");
    assert!(rt.dispatch(Msg::widget(
        el,
        WidgetMsg::KeyDown { key: Key::Escape }
    )));
    assert_eq!(text(&rt, el), "v2");

    rt.run_until_idle();
    assert_eq!(text(&rt, el), "v2");
    // The rejection can no longer revert, so it is reported instead
    let panel = rt.page.panel.as_ref().unwrap();
    assert_eq!(panel.title, FAILURE_TITLE);
    assert_eq!(
        panel.get("errorCode"),
        Some(&PanelValue::Text("missing_parameters".into()))
    );
}

#[test]
fn test_failure_while_editing_reverts_on_escape() {
    let transport = ScriptedTransport::new().respond(
        422,
        r#"{"errorCode": "invalid_parameters", "subjects": ["value"]}"#,
    );
    let (mut rt, el) = runtime_with("v1", transport);
    edit_to(&mut rt, el, "v2");

    rt.dispatch(Msg::widget(el, WidgetMsg::Click { target: el }));
    rt.run_until_idle();
    assert!(rt.page.widget(el).unwrap().is_editing());
    assert!(rt.page.panel.is_none());

    rt.dispatch(Msg::widget(el, WidgetMsg::KeyDown { key: Key::Escape }));
    assert_eq!(text(&rt, el), "v1");
}

#[test]
fn test_cancel_link_discards_typed_text() {
    let (mut rt, el) = runtime_with("dns", ScriptedTransport::new());
    rt.dispatch(Msg::widget(el, WidgetMsg::Click { target: el }));
    let control = rt.page.widget(el).unwrap().control().unwrap();
    rt.page.document.set_value(control, "half typed");

    assert!(rt.dispatch(Msg::widget(el, WidgetMsg::Reset)));
    assert_eq!(text(&rt, el), "dns");
    assert!(rt.page.document.find_by_tag(el, "form").is_empty());
    assert_eq!(rt.queued(), 0);
}

#[test]
fn test_disabled_widget_resumes_with_committed_value() {
    let (mut rt, el) = runtime_with("v1", ScriptedTransport::new().respond(200, "{}"));
    edit_to(&mut rt, el, "v2");
    rt.run_until_idle();

    rt.dispatch(Msg::widget(el, WidgetMsg::Disable));
    assert!(!rt.dispatch(Msg::widget(el, WidgetMsg::Click { target: el })));
    assert_eq!(rt.page.widget(el).unwrap().previous(), "v2");

    rt.dispatch(Msg::widget(el, WidgetMsg::Enable));
    assert!(rt.dispatch(Msg::widget(el, WidgetMsg::Click { target: el })));
    let control = rt.page.widget(el).unwrap().control().unwrap();
    assert_eq!(rt.page.document.value(control).as_deref(), Some("v2"));
}

#[test]
fn test_destroyed_widget_ignores_late_response() {
    let transport = ScriptedTransport::new().respond(200, r#""v9""#);
    let (mut rt, el) = runtime_with("v1", transport);
    edit_to(&mut rt, el, "v2");
    rt.dispatch(Msg::widget(el, WidgetMsg::Destroy));
    assert!(rt.page.widget(el).is_none());

    rt.run_until_idle();
    assert_eq!(text(&rt, el), "v2");
    assert!(!rt.dispatch(Msg::widget(el, WidgetMsg::Click { target: el })));
}

// ========================================================================
// Anchors and password fields
// ========================================================================

#[test]
fn test_click_on_link_inside_display_edits_instead_of_following() {
    let mut page = empty_page();
    let el = inline_field(&mut page.document, "", "/x");
    let link = page.document.append_element(el, "a");
    page.document.set_attr(link, "href", "/elsewhere");
    page.document.append_text(link, "see");
    page.bootstrap(&PageConfig::default()).unwrap();
    let mut rt = Runtime::new(page, ScriptedTransport::new());

    assert!(rt.dispatch(Msg::widget(el, WidgetMsg::Click { target: link })));
    assert!(rt.page.widget(el).unwrap().is_editing());
    assert_eq!(rt.page.location, None);
}

#[test]
fn test_password_field_stays_masked() {
    let mut page = empty_page();
    let el = inline_field(&mut page.document, "*****", "/users/1/password");
    let config = PageConfig::parse("inplace:\n  type: password\n").unwrap();
    page.bootstrap(&config).unwrap();
    let transport = ScriptedTransport::new().respond(200, r#""ok""#);
    let mut rt = Runtime::new(page, transport);

    edit_to(&mut rt, el, "correct horse");
    assert_eq!(text(&rt, el), "*****");
    assert_eq!(
        rt.transport().requests.len(),
        0,
        "requests are only executed by step"
    );
    rt.run_until_idle();
    assert_eq!(
        rt.transport().requests[0].json_body(),
        Some(json!({"value": "correct horse"}))
    );
    assert_eq!(text(&rt, el), "*****");
    // The server's "ok" does not replace the committed password
    assert_eq!(rt.page.widget(el).unwrap().secret(), Some("correct horse"));
}
