//! Response handlers: route a classified response back to whoever sent it

use serde_json::Value;

use crate::ajax::{self, HttpResponse, Outcome};
use crate::commands::Cmd;
use crate::dom::NodeId;
use crate::editable::{Transition, WidgetMsg};
use crate::form::Mapped;
use crate::model::{Origin, Page, SummaryPanel, Ticket};
use crate::transport::TransportError;

use super::Handled;

pub fn update_response(
    page: &mut Page,
    ticket: Ticket,
    response: Result<HttpResponse, TransportError>,
) -> Handled {
    let Some(origin) = page.pending.remove(&ticket) else {
        tracing::warn!("Response for unknown ticket {}", ticket);
        return Handled::ignored();
    };

    match ajax::receive_result(&response) {
        // Already logged; neither success nor failure handling runs
        Outcome::Dropped(_) => Handled::ignored(),
        Outcome::Redirect(target) => {
            tracing::info!("Redirecting to {}", target);
            Handled {
                cmd: Some(Cmd::Navigate(target)),
                prevent_default: false,
            }
        }
        Outcome::Success(payload) => {
            match origin {
                Origin::Widget(handle) => {
                    // Only a string payload replaces the displayed value
                    if let Value::String(value) = payload {
                        let element = handle.element;
                        deliver(page, element, WidgetMsg::Confirm { handle, value });
                    }
                }
                Origin::Form(form) => {
                    if let Some(controller) = page.forms.get_mut(&form) {
                        let panel = controller.succeed(&mut page.document, &payload);
                        page.panel = Some(panel);
                    }
                }
            }
            Handled::ignored()
        }
        Outcome::Failure(envelope) => {
            match origin {
                Origin::Widget(handle) => {
                    tracing::info!("Inline save failed ({}), reverting", envelope.code);
                    let element = handle.element;
                    // A rejection nothing can revert any more is still shown
                    match deliver(page, element, WidgetMsg::Revert(handle)) {
                        Some(Transition::Reverted { .. }) => {}
                        _ => page.panel = Some(SummaryPanel::failure(&envelope.raw)),
                    }
                }
                Origin::Form(form) => {
                    if let Some(controller) = page.forms.get_mut(&form) {
                        if let Mapped::Panel(panel) = controller.fail(&mut page.document, &envelope)
                        {
                            page.panel = Some(panel);
                        }
                    }
                }
            }
            Handled::ignored()
        }
    }
}

fn deliver(page: &mut Page, element: NodeId, msg: WidgetMsg) -> Option<Transition> {
    match page.widgets.get_mut(&element) {
        Some(widget) => widget.update(&mut page.document, msg),
        None => {
            tracing::warn!("Widget {:?} is gone, dropping {:?}", element, msg);
            None
        }
    }
}
