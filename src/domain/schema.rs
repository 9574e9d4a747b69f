//! Schema document parsing and collection navigation.
//!
//! The schema arrives as a generic JSON value tree. A node is treated as a
//! field group when every member carries a `type` key; otherwise its members
//! are nested collections. Declaration order is preserved throughout, which
//! is why the crate enables `serde_json`'s `preserve_order` feature.

use serde_json::Value;
use thiserror::Error;

use crate::domain::{FieldKind, FieldSpec, SelectOption};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("schema root must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("collection '{path}' mixes field declarations and nested collections")]
    MixedCollection { path: String },

    #[error("entry '{path}' is missing required key '{key}'")]
    MissingKey { path: String, key: &'static str },

    #[error("entry '{path}': {reason}")]
    InvalidEntry { path: String, reason: String },
}

/// One node of the schema tree: either a group of field declarations or a
/// group of named sub-collections.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionNode {
    /// Named sub-collections, in declaration order.
    Collections(Vec<(String, CollectionNode)>),
    /// Field declarations keyed by field key, in declaration order.
    Fields(Vec<(String, FieldSpec)>),
}

impl CollectionNode {
    /// Narrow to the sub-collection under `key`.
    ///
    /// Navigation never fails: an absent key (or a node that holds fields
    /// rather than collections) yields the current node unchanged.
    pub fn navigate(&self, key: &str) -> &CollectionNode {
        if let CollectionNode::Collections(entries) = self {
            if let Some((_, child)) = entries.iter().find(|(name, _)| name == key) {
                return child;
            }
        }
        self
    }

    /// The field declarations of this node, empty when the node holds
    /// sub-collections instead.
    pub fn fields(&self) -> &[(String, FieldSpec)] {
        match self {
            CollectionNode::Fields(fields) => fields,
            CollectionNode::Collections(_) => &[],
        }
    }

    /// Names of the sub-collections directly under this node.
    pub fn collection_keys(&self) -> Vec<&str> {
        match self {
            CollectionNode::Collections(entries) => {
                entries.iter().map(|(name, _)| name.as_str()).collect()
            }
            CollectionNode::Fields(_) => Vec::new(),
        }
    }
}

/// Immutable holder of a parsed schema tree.
///
/// Built once from a JSON document; render calls borrow nodes from it and
/// never mutate it, so a store can be shared freely across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaStore {
    root: CollectionNode,
}

impl SchemaStore {
    /// Build a store from an already-parsed JSON document.
    pub fn from_value(document: &Value) -> Result<Self, SchemaError> {
        let map = document.as_object().ok_or(SchemaError::NotAnObject {
            found: json_type_name(document),
        })?;
        Ok(Self {
            root: parse_node("", map)?,
        })
    }

    /// Parse a raw JSON string and build a store from it.
    pub fn from_json(raw: &str) -> Result<Self, SchemaError> {
        let document: Value = serde_json::from_str(raw)?;
        Self::from_value(&document)
    }

    pub fn root(&self) -> &CollectionNode {
        &self.root
    }

    /// Narrow the root by one path segment. See [`CollectionNode::navigate`].
    pub fn navigate(&self, key: &str) -> &CollectionNode {
        self.root.navigate(key)
    }
}

fn parse_node(
    path: &str,
    map: &serde_json::Map<String, Value>,
) -> Result<CollectionNode, SchemaError> {
    let mut fields = Vec::new();
    let mut nested = Vec::new();

    for (key, value) in map {
        let child_path = join_path(path, key);
        let object = value
            .as_object()
            .ok_or_else(|| SchemaError::InvalidEntry {
                path: child_path.clone(),
                reason: format!("expected an object, found {}", json_type_name(value)),
            })?;

        if object.contains_key("type") {
            fields.push((key.clone(), parse_field(&child_path, object)?));
        } else {
            nested.push((key.clone(), parse_node(&child_path, object)?));
        }
    }

    match (fields.is_empty(), nested.is_empty()) {
        (false, false) => Err(SchemaError::MixedCollection {
            path: display_path(path),
        }),
        (true, false) => Ok(CollectionNode::Collections(nested)),
        // An empty node is an empty field group; rendering it yields the
        // soft "nothing to render" outcome.
        _ => Ok(CollectionNode::Fields(fields)),
    }
}

fn parse_field(
    path: &str,
    object: &serde_json::Map<String, Value>,
) -> Result<FieldSpec, SchemaError> {
    let raw_kind = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| SchemaError::InvalidEntry {
            path: path.to_string(),
            reason: "'type' must be a string".to_string(),
        })?;

    let label = object
        .get("label")
        .and_then(Value::as_str)
        .ok_or_else(|| SchemaError::MissingKey {
            path: path.to_string(),
            key: "label",
        })?
        .to_string();

    let default = match object.get("default") {
        None | Some(Value::Null) => None,
        Some(value) => Some(scalar_to_string(value).ok_or_else(|| SchemaError::InvalidEntry {
            path: path.to_string(),
            reason: format!(
                "'default' must be a scalar, found {}",
                json_type_name(value)
            ),
        })?),
    };

    let options = match object.get("values") {
        None => Vec::new(),
        Some(Value::Object(values)) => {
            let mut options = Vec::with_capacity(values.len());
            for (value, label) in values {
                let label = scalar_to_string(label).ok_or_else(|| SchemaError::InvalidEntry {
                    path: path.to_string(),
                    reason: format!("option '{value}' label must be a scalar"),
                })?;
                options.push(SelectOption::new(value.clone(), label));
            }
            options
        }
        Some(other) => {
            return Err(SchemaError::InvalidEntry {
                path: path.to_string(),
                reason: format!("'values' must be an object, found {}", json_type_name(other)),
            })
        }
    };

    let visibility_key = match object.get("can") {
        None | Some(Value::Null) => None,
        Some(Value::String(token)) => Some(token.clone()),
        Some(other) => {
            return Err(SchemaError::InvalidEntry {
                path: path.to_string(),
                reason: format!("'can' must be a string, found {}", json_type_name(other)),
            })
        }
    };

    Ok(FieldSpec {
        kind: FieldKind::parse(raw_kind),
        label,
        default,
        options,
        visibility_key,
    })
}

/// String form of a scalar. Booleans become `"true"` / `"false"`, matching
/// the string-typed convention of the saved-value store.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}
