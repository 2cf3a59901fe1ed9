//! Checkbox-list multi-select control.
//!
//! The list opens as a pane of labelled checkboxes right after the text
//! input; the selection is whatever is checked in that pane.

use crate::dom::{Document, NodeId};

use super::SelectOption;

/// Separator between labels in the displayed value
pub const LABEL_SEPARATOR: &str = ", ";

/// Class of the `<ul>` holding the checkboxes
pub const CHECKBOX_PANE_CLASS: &str = "checkbox-dropdown";

/// Split a displayed value back into labels. An empty display selects nothing.
pub fn split_labels(displayed: &str) -> Vec<String> {
    if displayed.is_empty() {
        return Vec::new();
    }
    displayed
        .split(LABEL_SEPARATOR)
        .map(str::to_string)
        .collect()
}

pub fn join_labels(labels: &[String]) -> String {
    labels.join(LABEL_SEPARATOR)
}

/// Open the pane after `field`, checking every label in `selected`
pub fn open(doc: &mut Document, field: NodeId, choices: &[SelectOption], selected: &[String]) {
    let pane = doc.create_element("ul");
    doc.add_class(pane, CHECKBOX_PANE_CLASS);
    doc.add_class(pane, "nosort");
    for choice in choices {
        let item = doc.append_element(pane, "li");
        let label = doc.append_element(item, "label");
        let checkbox = doc.append_element(label, "input");
        doc.set_attr(checkbox, "type", "checkbox");
        doc.set_attr(checkbox, "value", &choice.label);
        doc.set_checked(checkbox, selected.iter().any(|s| *s == choice.label));
        doc.append_text(label, &choice.label);
    }
    doc.insert_after(field, pane);
}

/// Labels currently checked in the pane beneath `form`, in list order
pub fn selected_labels(doc: &Document, form: NodeId) -> Vec<String> {
    doc.find_by_class(form, CHECKBOX_PANE_CLASS)
        .into_iter()
        .flat_map(|pane| doc.find_by_tag(pane, "input"))
        .filter(|&cb| doc.input_type(cb).as_deref() == Some("checkbox") && doc.is_checked(cb))
        .filter_map(|cb| doc.attr(cb, "value").map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    #[test]
    fn test_split_and_join() {
        assert!(split_labels("").is_empty());
        assert_eq!(split_labels("a, b"), vec!["a", "b"]);
        assert_eq!(join_labels(&["a".into(), "b".into()]), "a, b");
    }

    #[test]
    fn test_round_trip_through_pane() {
        let mut doc = Document::new();
        let root = doc.root();
        let form = doc.append_element(root, "form");
        let choices: Vec<_> = ["red", "green", "blue"]
            .into_iter()
            .map(SelectOption::plain)
            .collect();

        let kind = FieldKind::SelectCheckbox;
        let field = kind.render(&mut doc, form, "red, blue", &choices);
        assert_eq!(kind.extract(&doc, form, field), "red, blue");

        let boxes = doc.find_by_tag(form, "input");
        // boxes[0] is the text field; the rest follow list order
        doc.set_checked(boxes[2], true);
        assert_eq!(kind.extract(&doc, form, field), "red, green, blue");
    }

    #[test]
    fn test_labels_containing_separator_do_not_round_trip() {
        let choices = vec![SelectOption::plain("a, b")];
        let mut doc = Document::new();
        let root = doc.root();
        let form = doc.append_element(root, "form");
        let field = FieldKind::SelectCheckbox.render(&mut doc, form, "a, b", &choices);
        assert_eq!(FieldKind::SelectCheckbox.extract(&doc, form, field), "");
    }
}
