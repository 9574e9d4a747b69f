//! Field resolution: deciding which option of a control is pre-selected.
//!
//! Resolution layers two signals: the saved value supplied by the caller
//! wins over the schema default, and with neither present nothing is
//! selected. Comparison is always on opaque strings; see
//! [`CurrentValues`](crate::domain::CurrentValues) for the string-typed
//! boolean convention.

use std::collections::HashMap;
use thiserror::Error;

use crate::domain::{CurrentValues, FieldKind, FieldSpec, ResolvedField, SelectOption};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("select field '{field}' declares no options")]
    NoOptions { field: String },
}

/// Per-kind resolution behavior.
///
/// Registering a handler for a new kind extends the engine without touching
/// collection traversal or rendering.
pub trait FieldTypeHandler: Send + Sync {
    /// Compute the option list and selection for one field. `current` is the
    /// saved value for the field's key, when the caller supplied one.
    fn resolve(
        &self,
        key: &str,
        spec: &FieldSpec,
        current: Option<&str>,
    ) -> Result<ResolvedField, ResolveError>;
}

/// Boolean fields: fixed Ja/Nee options keyed by `"true"` / `"false"`.
struct BooleanHandler;

impl FieldTypeHandler for BooleanHandler {
    fn resolve(
        &self,
        _key: &str,
        spec: &FieldSpec,
        current: Option<&str>,
    ) -> Result<ResolvedField, ResolveError> {
        let options = vec![
            SelectOption::new("true", "Ja"),
            SelectOption::new("false", "Nee"),
        ];
        // The saved value is checked on its own before the default comes
        // into play. Only the exact string "true" selects the true branch.
        let selected = if let Some(value) = current {
            Some(boolean_branch(value))
        } else {
            spec.default.as_deref().map(boolean_branch)
        };
        Ok(ResolvedField { options, selected })
    }
}

fn boolean_branch(value: &str) -> String {
    let branch = if value == "true" { "true" } else { "false" };
    branch.to_string()
}

/// Sort fields: fixed Oplopend/Aflopend options keyed by `"asc"` / `"desc"`.
struct SortHandler;

impl FieldTypeHandler for SortHandler {
    fn resolve(
        &self,
        _key: &str,
        spec: &FieldSpec,
        current: Option<&str>,
    ) -> Result<ResolvedField, ResolveError> {
        let options = vec![
            SelectOption::new("asc", "Oplopend"),
            SelectOption::new("desc", "Aflopend"),
        ];
        // Unlike boolean, the presence of *either* signal triggers branch
        // evaluation; the saved value wins when both exist. A malformed
        // value falls through to "desc".
        let selected = current.or(spec.default.as_deref()).map(|value| {
            let branch = if value == "asc" { "asc" } else { "desc" };
            branch.to_string()
        });
        Ok(ResolvedField { options, selected })
    }
}

/// Select fields: schema-declared options, exact string match.
struct SelectHandler;

impl FieldTypeHandler for SelectHandler {
    fn resolve(
        &self,
        key: &str,
        spec: &FieldSpec,
        current: Option<&str>,
    ) -> Result<ResolvedField, ResolveError> {
        if spec.options.is_empty() {
            return Err(ResolveError::NoOptions {
                field: key.to_string(),
            });
        }
        // Same any-signal rule as sort. A value matching none of the
        // declared options leaves the control unselected.
        let selected = current
            .or(spec.default.as_deref())
            .and_then(|value| spec.options.iter().find(|option| option.value == value))
            .map(|option| option.value.clone());
        Ok(ResolvedField {
            options: spec.options.clone(),
            selected,
        })
    }
}

/// Registry of type handlers plus the shared precedence lookup.
pub struct FieldResolver {
    handlers: HashMap<String, Box<dyn FieldTypeHandler>>,
}

impl FieldResolver {
    /// A resolver with the built-in boolean, sort and select handlers.
    pub fn new() -> Self {
        let mut resolver = Self {
            handlers: HashMap::new(),
        };
        resolver.register(FieldKind::Boolean, Box::new(BooleanHandler));
        resolver.register(FieldKind::Sort, Box::new(SortHandler));
        resolver.register(FieldKind::Select, Box::new(SelectHandler));
        resolver
    }

    /// Register (or replace) the handler for a field kind.
    pub fn register(&mut self, kind: FieldKind, handler: Box<dyn FieldTypeHandler>) {
        self.handlers.insert(kind.as_str().to_string(), handler);
    }

    /// Resolve one field against the optional saved-value map.
    ///
    /// A kind with no registered handler resolves to an empty option list
    /// with nothing selected; the control shell still renders.
    pub fn resolve(
        &self,
        key: &str,
        spec: &FieldSpec,
        values: Option<&CurrentValues>,
    ) -> Result<ResolvedField, ResolveError> {
        let current = values.and_then(|values| values.get(key));
        match self.handlers.get(spec.kind.as_str()) {
            Some(handler) => handler.resolve(key, spec, current),
            None => Ok(ResolvedField::default()),
        }
    }
}

impl Default for FieldResolver {
    fn default() -> Self {
        Self::new()
    }
}
