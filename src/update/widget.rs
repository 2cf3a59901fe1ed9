//! Inline widget message handlers

use crate::commands::Cmd;
use crate::dom::NodeId;
use crate::editable::{Transition, WidgetMsg};
use crate::model::{Origin, Page};

use super::Handled;

/// Route a message to the widget bound to `element`
pub fn update_widget(page: &mut Page, element: NodeId, msg: WidgetMsg) -> Handled {
    let dom_event = matches!(
        msg,
        WidgetMsg::Click { .. } | WidgetMsg::Submit | WidgetMsg::Reset | WidgetMsg::KeyDown { .. }
    );

    let Some(widget) = page.widgets.get_mut(&element) else {
        tracing::debug!("No widget on {:?}, ignoring {:?}", element, msg);
        return Handled::ignored();
    };
    let Some(transition) = widget.update(&mut page.document, msg) else {
        return Handled::ignored();
    };

    let cmd = match transition {
        Transition::Committed {
            handle,
            request: Some(request),
            ..
        } => {
            let ticket = page.issue(Origin::Widget(handle));
            tracing::debug!("Widget {:?} sent {} as {}", element, request.url, ticket);
            Some(Cmd::Send { ticket, request })
        }
        Transition::Destroyed => {
            page.widgets.remove(&element);
            None
        }
        _ => None,
    };

    Handled {
        cmd,
        prevent_default: dom_event,
    }
}
