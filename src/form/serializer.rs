//! Turns a form's `(name, value)` pairs into a request payload.
//!
//! GET submissions become a query string for a full page load; every other
//! method nests dotted names (`a.b.c`) into a JSON object.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::ajax::Method;

/// A leaf value or a nested level of [`NestedParams`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Param {
    Leaf(String),
    Nested(NestedParams),
}

impl Param {
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Param::Leaf(value) => Some(value),
            Param::Nested(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Param::Leaf(value) => Value::String(value.clone()),
            Param::Nested(nested) => nested.to_json(),
        }
    }
}

/// Recursive key → value mapping built from dotted field names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NestedParams(BTreeMap<String, Param>);

impl NestedParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` at the dotted path `name`, creating levels as needed.
    ///
    /// Later writes to the same path win. A leaf standing where a level is
    /// needed is replaced by that level.
    pub fn insert(&mut self, name: &str, value: &str) {
        let mut segments = name.split('.').peekable();
        let mut map = &mut self.0;
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                map.insert(segment.to_string(), Param::Leaf(value.to_string()));
                return;
            }
            let slot = map
                .entry(segment.to_string())
                .or_insert_with(|| Param::Nested(NestedParams::default()));
            if let Param::Leaf(_) = slot {
                *slot = Param::Nested(NestedParams::default());
            }
            map = match slot {
                Param::Nested(nested) => &mut nested.0,
                Param::Leaf(_) => return,
            };
        }
    }

    pub fn get(&self, key: &str) -> Option<&Param> {
        self.0.get(key)
    }

    /// Leaf value at a dotted path
    pub fn get_path(&self, path: &str) -> Option<&str> {
        let mut segments = path.split('.').peekable();
        let mut map = self;
        while let Some(segment) = segments.next() {
            let param = map.0.get(segment)?;
            if segments.peek().is_none() {
                return param.as_leaf();
            }
            match param {
                Param::Nested(nested) => map = nested,
                Param::Leaf(_) => return None,
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(key, param)| (key.clone(), param.to_json()))
                .collect(),
        )
    }
}

/// Result of serializing a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Serialized {
    /// GET: query string (without the leading `?`)
    Query(String),
    /// Any other method: JSON request body
    Params(NestedParams),
}

/// Serialize fields for `method`. Empty values never make it into the output.
pub fn serialize(fields: &[(String, String)], method: &Method) -> Serialized {
    if method.is_get() {
        Serialized::Query(query_string(fields))
    } else {
        Serialized::Params(nest(fields))
    }
}

/// `name=value` pairs of non-empty fields joined by `&`
pub fn query_string(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&")
}

/// Nest non-empty fields by their dotted names
pub fn nest(fields: &[(String, String)]) -> NestedParams {
    let mut params = NestedParams::new();
    for (name, value) in fields {
        if !value.is_empty() {
            params.insert(name, value);
        }
    }
    params
}

/// Navigation target for a GET submission: the action URL with the query appended
pub fn with_action(action: &str, query: &str) -> String {
    if query.is_empty() {
        action.to_string()
    } else if action.contains('?') {
        format!("{}&{}", action, query)
    } else {
        format!("{}?{}", action, query)
    }
}
