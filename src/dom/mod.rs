//! In-memory element tree for the page being driven.
//!
//! This is the boundary to the host document. Widgets and form controllers
//! only ever touch the page through these primitives, so a browser host can
//! mirror every mutation onto the real DOM while tests and the CLI work
//! against the tree directly.
//!
//! # Architecture
//!
//! - [`Document`]: arena of nodes addressed by [`NodeId`]
//! - [`Element`]: tag, attributes, classes, and live control state
//! - [`form`]: successful-control extraction, reset, and lookup by name
//!
//! Detached nodes stay valid until removed. Removed nodes go on a free list
//! and their ids are handed out again, so the arena is bounded by the largest
//! live tree rather than by the number of edits.

pub mod form;

use std::collections::BTreeMap;

/// Identifies a node inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// An element node
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Lower-case tag name
    pub tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    /// Live value, overriding the `value` attribute until the form is reset
    value: Option<String>,
    /// Live checkedness (checkbox/radio) or selectedness (option)
    checked: Option<bool>,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Retained element tree with focus tracking
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    /// Removed slots, reused by the next created node
    free: Vec<NodeId>,
    focused: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only an empty `<body>` root
    pub fn new() -> Self {
        let root = Node {
            kind: NodeKind::Element(Element {
                tag: "body".to_string(),
                ..Element::default()
            }),
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            free: Vec::new(),
            focused: None,
        }
    }

    /// The `<body>` root
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of live nodes, attached or detached
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Whether the document holds only its root
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        }))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    /// Create an element and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(tag);
        self.append_child(parent, id);
        id
    }

    /// Create a text node and append it to `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.create_text(text);
        self.append_child(parent, id);
        id
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let node = Node {
            kind,
            parent: None,
            children: Vec::new(),
        };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    // =========================================================================
    // Tree structure
    // =========================================================================

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Children in document order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Insert `child` as the first child of `parent`, detaching it first
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(0, child);
    }

    /// Insert `node` immediately after `reference` in its parent.
    ///
    /// Returns false when `reference` is detached.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> bool {
        let Some(parent) = self.parent(reference) else {
            return false;
        };
        self.detach(node);
        let siblings = &mut self.nodes[parent.0].children;
        let pos = siblings
            .iter()
            .position(|&c| c == reference)
            .map_or(siblings.len(), |p| p + 1);
        siblings.insert(pos, node);
        self.nodes[node.0].parent = Some(parent);
        true
    }

    /// Remove a node from its parent. The node and its subtree stay valid.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
        if let Some(focused) = self.focused {
            if focused == id || self.is_inclusive_descendant(focused, id) {
                self.focused = None;
            }
        }
    }

    /// Detach `id` and free it with its whole subtree. Ids of removed nodes
    /// must not be used afterwards.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root() {
            return;
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            let slot = &mut self.nodes[node.0];
            stack.append(&mut slot.children);
            slot.parent = None;
            slot.kind = NodeKind::Text(String::new());
            self.free.push(node);
        }
    }

    /// Remove every child of `id`
    pub fn clear_children(&mut self, id: NodeId) {
        for child in self.children(id).to_vec() {
            self.remove(child);
        }
    }

    /// The sibling following `id`, if any
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    /// Whether `id` is `ancestor` or lies beneath it
    pub fn is_inclusive_descendant(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            if node == ancestor {
                return true;
            }
            cursor = self.parent(node);
        }
        false
    }

    /// Descendants of `id` in pre-order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Descendant elements with the given tag
    pub fn find_by_tag(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&n| self.tag(n) == Some(tag))
            .collect()
    }

    /// Descendant elements carrying the given class
    pub fn find_by_class(&self, id: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    // =========================================================================
    // Element data
    // =========================================================================

    fn element(&self, id: NodeId) -> Option<&Element> {
        match self.nodes.get(id.0).map(|n| &n.kind) {
            Some(NodeKind::Element(el)) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(NodeKind::Element(el)) => Some(el),
            _ => None,
        }
    }

    /// Tag name of an element (None for text nodes)
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)
            .and_then(|el| el.attrs.get(name))
            .map(String::as_str)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(el) = self.element_mut(id) {
            el.attrs.remove(name);
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if class.is_empty() || self.has_class(id, class) {
            return;
        }
        if let Some(el) = self.element_mut(id) {
            el.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.classes.retain(|c| c != class);
        }
    }

    pub fn classes(&self, id: NodeId) -> &[String] {
        self.element(id).map(|el| el.classes.as_slice()).unwrap_or(&[])
    }

    /// The `type` attribute of an `<input>`, lower-cased, defaulting to "text"
    pub fn input_type(&self, id: NodeId) -> Option<String> {
        if self.tag(id)? != "input" {
            return None;
        }
        Some(
            self.attr(id, "type")
                .unwrap_or("text")
                .to_ascii_lowercase(),
        )
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(NodeKind::Text(text)) = self.nodes.get(id.0).map(|n| &n.kind) {
            return text.clone();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|n| match &self.nodes[n.0].kind {
                NodeKind::Text(text) => Some(text.as_str()),
                NodeKind::Element(_) => None,
            })
            .collect()
    }

    /// Replace all children of `id` with a single text node
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            if let NodeKind::Text(existing) = &mut node.kind {
                *existing = text.to_string();
                return;
            }
        }
        self.clear_children(id);
        if !text.is_empty() {
            self.append_text(id, text);
        }
    }

    // =========================================================================
    // Control state
    // =========================================================================

    /// Current value of a form control.
    ///
    /// `<select>` reports its selected option's value; `<textarea>` falls back
    /// to its text; other elements fall back to the `value` attribute.
    pub fn value(&self, id: NodeId) -> Option<String> {
        let el = self.element(id)?;
        match el.tag.as_str() {
            "select" => {
                let options = self.find_by_tag(id, "option");
                let chosen = options
                    .iter()
                    .copied()
                    .find(|&o| self.is_checked(o))
                    .or_else(|| options.first().copied())?;
                Some(self.option_value(chosen))
            }
            "textarea" => Some(
                el.value
                    .clone()
                    .unwrap_or_else(|| self.text_content(id)),
            ),
            "option" => Some(self.option_value(id)),
            _ => Some(
                el.value
                    .clone()
                    .or_else(|| el.attrs.get("value").cloned())
                    .unwrap_or_default(),
            ),
        }
    }

    /// Set the live value of a control. For `<select>`, selects the matching option.
    pub fn set_value(&mut self, id: NodeId, value: &str) {
        if self.tag(id) == Some("select") {
            for option in self.find_by_tag(id, "option") {
                let matches = self.option_value(option) == value;
                self.set_checked(option, matches);
            }
            return;
        }
        if let Some(el) = self.element_mut(id) {
            el.value = Some(value.to_string());
        }
    }

    fn option_value(&self, option: NodeId) -> String {
        self.attr(option, "value")
            .map(str::to_string)
            .unwrap_or_else(|| self.text_content(option))
    }

    /// Live checkedness of a checkbox/radio, or selectedness of an option
    pub fn is_checked(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|el| {
            el.checked.unwrap_or_else(|| {
                let attr = if el.tag == "option" { "selected" } else { "checked" };
                el.attrs.contains_key(attr)
            })
        })
    }

    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        if let Some(el) = self.element_mut(id) {
            el.checked = Some(checked);
        }
    }

    /// Drop live state so the control reports its defaults again
    pub fn reset_control(&mut self, id: NodeId) {
        if let Some(el) = self.element_mut(id) {
            el.value = None;
            el.checked = None;
        }
    }

    // =========================================================================
    // Focus
    // =========================================================================

    pub fn focus(&mut self, id: NodeId) {
        self.focused = Some(id);
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Render a subtree as HTML (attributes sorted, classes in insertion order)
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => out.push_str(&html_escape::encode_text(text)),
            NodeKind::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                if !el.classes.is_empty() {
                    out.push_str(" class=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(
                        &el.classes.join(" "),
                    ));
                    out.push('"');
                }
                for (name, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(value));
                    out.push('"');
                }
                out.push('>');
                if matches!(el.tag.as_str(), "input" | "img" | "br") {
                    return;
                }
                for &child in &self.nodes[id.0].children {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_text_content() {
        let mut doc = Document::new();
        let p = doc.append_element(doc.root(), "p");
        doc.append_text(p, "hello ");
        let b = doc.append_element(p, "b");
        doc.append_text(b, "world");
        assert_eq!(doc.text_content(p), "hello world");
    }

    #[test]
    fn test_set_text_replaces_children() {
        let mut doc = Document::new();
        let p = doc.append_element(doc.root(), "p");
        doc.append_element(p, "span");
        doc.set_text(p, "plain");
        assert_eq!(doc.children(p).len(), 1);
        assert_eq!(doc.text_content(p), "plain");
    }

    #[test]
    fn test_insert_after_places_sibling() {
        let mut doc = Document::new();
        let form = doc.append_element(doc.root(), "form");
        let a = doc.append_element(form, "input");
        let c = doc.append_element(form, "input");
        let b = doc.create_element("span");
        assert!(doc.insert_after(a, b));
        assert_eq!(doc.children(form), &[a, b, c]);
        assert_eq!(doc.next_sibling(a), Some(b));
    }

    #[test]
    fn test_insert_after_detached_reference() {
        let mut doc = Document::new();
        let lonely = doc.create_element("input");
        let span = doc.create_element("span");
        assert!(!doc.insert_after(lonely, span));
    }

    #[test]
    fn test_classes() {
        let mut doc = Document::new();
        let input = doc.append_element(doc.root(), "input");
        doc.add_class(input, "invalid");
        doc.add_class(input, "invalid");
        assert_eq!(doc.classes(input).len(), 1);
        doc.remove_class(input, "invalid");
        assert!(!doc.has_class(input, "invalid"));
    }

    #[test]
    fn test_select_value_follows_selected_option() {
        let mut doc = Document::new();
        let select = doc.append_element(doc.root(), "select");
        for (value, label) in [("1", "one"), ("2", "two")] {
            let opt = doc.append_element(select, "option");
            doc.set_attr(opt, "value", value);
            doc.append_text(opt, label);
        }
        assert_eq!(doc.value(select).as_deref(), Some("1"));
        doc.set_value(select, "2");
        assert_eq!(doc.value(select).as_deref(), Some("2"));
    }

    #[test]
    fn test_reset_control_restores_default() {
        let mut doc = Document::new();
        let input = doc.append_element(doc.root(), "input");
        doc.set_attr(input, "value", "default");
        doc.set_value(input, "typed");
        assert_eq!(doc.value(input).as_deref(), Some("typed"));
        doc.reset_control(input);
        assert_eq!(doc.value(input).as_deref(), Some("default"));
    }

    #[test]
    fn test_detach_clears_focus_inside_subtree() {
        let mut doc = Document::new();
        let form = doc.append_element(doc.root(), "form");
        let input = doc.append_element(form, "input");
        doc.focus(input);
        doc.detach(form);
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn test_removed_nodes_are_reused() {
        let mut doc = Document::new();
        let el = doc.append_element(doc.root(), "span");
        doc.append_text(el, "shown");
        let baseline = doc.len();

        for _ in 0..10 {
            let form = doc.append_element(el, "form");
            let input = doc.append_element(form, "input");
            doc.focus(input);
            doc.set_text(el, "shown");
            assert_eq!(doc.focused(), None);
        }
        assert_eq!(doc.len(), baseline);
        assert!(doc.nodes.len() <= baseline + 2);
        assert_eq!(doc.text_content(el), "shown");
    }

    #[test]
    fn test_to_html_escapes() {
        let mut doc = Document::new();
        let span = doc.append_element(doc.root(), "span");
        doc.add_class(span, "explanation");
        doc.append_text(span, "a < b");
        assert_eq!(
            doc.to_html(span),
            "<span class=\"explanation\">a &lt; b</span>"
        );
    }
}
