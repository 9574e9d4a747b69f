//! # Veld - schema-driven form field builder
//!
//! Veld renders labeled `select` controls from a declarative JSON field
//! schema. The schema is a nested tree of named collections; each collection
//! groups fields, and each field declares a kind (`boolean`, `sort`,
//! `select`, extensible), a label, an optional default and, for select
//! fields, an ordered option list.
//!
//! The selected option of every control is resolved through a layered
//! precedence chain: a caller-supplied saved value wins over the schema
//! default, and with neither present nothing is selected. Saved values are
//! compared as opaque strings (`"true"` / `"false"` included), matching the
//! string-typed storage they come from.
//!
//! ## Quick start
//!
//! ```rust
//! use veld::{AllowAll, FormRenderer, SchemaStore};
//!
//! let store = SchemaStore::from_json(
//!     r#"{"general": {"sortOrder": {"type": "sort", "label": "Sortering", "default": "asc"}}}"#,
//! )?;
//!
//! let renderer = FormRenderer::new();
//! let form = renderer
//!     .render(store.navigate("general"), None, &AllowAll)?
//!     .expect("collection declares fields");
//! assert!(form.to_html().contains(r#"<option value="asc" selected="selected">"#));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: schema tree, field specs, resolution precedence
//! - **Adapters**: markup element tree and the form renderer
//! - **Cli**: the host binary's argument surface

pub mod adapters;
pub mod cli;
pub mod domain;

pub use adapters::markup::Element;
pub use adapters::renderer::{FieldGroup, FormRenderer, RenderError, RenderedForm};
pub use domain::resolver::{FieldResolver, FieldTypeHandler, ResolveError};
pub use domain::schema::{CollectionNode, SchemaError, SchemaStore};
pub use domain::{
    AllowAll, CurrentValues, FieldKind, FieldSpec, GrantSet, ResolvedField, SelectOption,
    VisibilityPolicy,
};

/// Parse a schema document, narrow to a collection and render it as HTML in
/// one call.
///
/// `path` is a dot-separated collection path applied one `navigate` segment
/// at a time; an empty path renders the root. Returns `Ok(None)` when the
/// addressed node declares no fields.
pub fn render_collection(
    document: &serde_json::Value,
    path: &str,
    values: Option<&CurrentValues>,
    policy: &dyn VisibilityPolicy,
) -> anyhow::Result<Option<String>> {
    let store = SchemaStore::from_value(document)?;
    let mut node = store.root();
    for segment in path.split('.').filter(|segment| !segment.is_empty()) {
        node = node.navigate(segment);
    }

    let renderer = FormRenderer::new();
    let form = renderer.render(node, values, policy)?;
    Ok(form.map(|form| form.to_html()))
}
