//! Form message handlers

use crate::commands::Cmd;
use crate::dom::form::reset_form;
use crate::dom::NodeId;
use crate::form::{errors, Submission};
use crate::messages::FormMsg;
use crate::model::{Origin, Page};

use super::Handled;

pub fn update_form(page: &mut Page, form: NodeId, msg: FormMsg) -> Handled {
    let Some(controller) = page.forms.get_mut(&form) else {
        tracing::debug!("Form {:?} is not intercepted", form);
        return Handled::ignored();
    };

    match msg {
        FormMsg::Submit => match controller.submit(&mut page.document) {
            Submission::Navigate(url) => Handled::prevented(Some(Cmd::Navigate(url))),
            Submission::Send(request) => {
                let ticket = page.issue(Origin::Form(form));
                Handled::prevented(Some(Cmd::Send { ticket, request }))
            }
        },
        FormMsg::Reset => {
            reset_form(&mut page.document, form);
            errors::clear(&mut page.document, form);
            Handled::prevented(None)
        }
    }
}
