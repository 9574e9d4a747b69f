//! Core types for the field schema and selection model.
//!
//! A schema document declares *collections* of *fields*; every field maps to
//! one `select` control. Rendering resolves which option of that control is
//! pre-selected: a saved value wins over the schema default, and with neither
//! present nothing is selected.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub mod resolver;
pub mod schema;

/// The kind of control a field declares.
///
/// Kinds outside the built-in set are carried through as [`FieldKind::Other`]
/// and render an empty control shell rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Boolean,
    Sort,
    Select,
    Other(String),
}

impl FieldKind {
    /// Parse the schema's `type` string into a kind.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "boolean" => FieldKind::Boolean,
            "sort" => FieldKind::Sort,
            "select" => FieldKind::Select,
            other => FieldKind::Other(other.to_string()),
        }
    }

    /// The schema-level name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Boolean => "boolean",
            FieldKind::Sort => "sort",
            FieldKind::Select => "select",
            FieldKind::Other(name) => name,
        }
    }
}

/// One `(value, label)` pair in a control's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// The `value` attribute submitted by the control.
    pub value: String,
    /// The human-readable option text.
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One field declaration from the schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Control kind, drives option set and selection comparison.
    pub kind: FieldKind,
    /// Display label, required by the schema.
    pub label: String,
    /// Schema default. Scalar defaults are normalized to their string form
    /// at parse time; selection comparison is always on strings.
    pub default: Option<String>,
    /// Schema-declared options, in declaration order. Only meaningful for
    /// select fields; boolean and sort carry fixed built-in option sets.
    pub options: Vec<SelectOption>,
    /// Capability token consulted by the visibility policy. Fields without
    /// a token are always shown.
    pub visibility_key: Option<String>,
}

/// The option list and computed selection for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedField {
    /// Options to emit, in order.
    pub options: Vec<SelectOption>,
    /// Value of the selected option, if any option is selected at all.
    pub selected: Option<String>,
}

impl ResolvedField {
    /// Whether the option carrying `value` is the selected one.
    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.as_deref() == Some(value)
    }
}

/// Saved values that override schema defaults, keyed by field key.
///
/// Values are string-typed end to end, booleans included: the upstream
/// store does not preserve native booleans, so `"true"` / `"false"` are
/// compared as opaque strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrentValues(HashMap<String, String>);

impl CurrentValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the saved value for a field key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Record a saved value. Intended for hosts assembling values from a
    /// storage row before handing the map to a render call.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(String, String)> for CurrentValues {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Decides whether a field guarded by a capability token may be rendered.
///
/// The renderer only consults the policy for fields that carry a token;
/// everything else is unconditionally visible.
pub trait VisibilityPolicy: Send + Sync {
    fn can_show(&self, token: &str) -> bool;
}

/// Policy that shows every field, for schemas with no authorization concept.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl VisibilityPolicy for AllowAll {
    fn can_show(&self, _token: &str) -> bool {
        true
    }
}

/// Policy backed by an explicit set of granted capability tokens.
#[derive(Debug, Clone, Default)]
pub struct GrantSet(HashSet<String>);

impl GrantSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a capability token.
    pub fn grant(&mut self, token: impl Into<String>) {
        self.0.insert(token.into());
    }
}

impl FromIterator<String> for GrantSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl VisibilityPolicy for GrantSet {
    fn can_show(&self, token: &str) -> bool {
        self.0.contains(token)
    }
}
