//! Collection rendering: one markup group per visible field.

use thiserror::Error;
use tracing::debug;

use crate::adapters::markup::Element;
use crate::domain::resolver::{FieldResolver, ResolveError};
use crate::domain::schema::CollectionNode;
use crate::domain::{CurrentValues, FieldSpec, ResolvedField, VisibilityPolicy};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// The markup built for one field, addressable by field key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGroup {
    key: String,
    container: Element,
}

impl FieldGroup {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The `div.field` container owning the label and the control.
    pub fn container(&self) -> &Element {
        &self.container
    }

    /// The `label` element of this group.
    pub fn label(&self) -> Option<&Element> {
        self.container.children().first()
    }

    /// The `select` element of this group.
    pub fn control(&self) -> Option<&Element> {
        self.container.children().get(1)
    }
}

/// A rendered collection: the field groups in declaration order, plus
/// key-based access to the exact elements each field owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedForm {
    groups: Vec<FieldGroup>,
}

impl RenderedForm {
    pub fn groups(&self) -> &[FieldGroup] {
        &self.groups
    }

    pub fn group(&self, key: &str) -> Option<&FieldGroup> {
        self.groups.iter().find(|group| group.key == key)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Serialize the whole fragment, one container per line.
    pub fn to_html(&self) -> String {
        self.groups
            .iter()
            .map(|group| group.container.to_html())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renders a collection node into a [`RenderedForm`].
///
/// The renderer is stateless between calls: inputs are borrowed immutably
/// and the returned form is owned by the caller.
pub struct FormRenderer {
    resolver: FieldResolver,
}

impl FormRenderer {
    pub fn new() -> Self {
        Self {
            resolver: FieldResolver::new(),
        }
    }

    /// Use a caller-assembled resolver, e.g. one with extra type handlers.
    pub fn with_resolver(resolver: FieldResolver) -> Self {
        Self { resolver }
    }

    /// Render every visible field of `node` in declaration order.
    ///
    /// Returns `Ok(None)` when the node declares no fields at all (an empty
    /// group, or a node holding only sub-collections); callers must check
    /// for that outcome rather than expect markup. A fatal resolution error
    /// aborts the whole render; no partial fragment is returned.
    pub fn render(
        &self,
        node: &CollectionNode,
        values: Option<&CurrentValues>,
        policy: &dyn VisibilityPolicy,
    ) -> Result<Option<RenderedForm>, RenderError> {
        let fields = node.fields();
        if fields.is_empty() {
            return Ok(None);
        }

        let mut groups = Vec::with_capacity(fields.len());
        for (key, spec) in fields {
            if !is_visible(spec, policy) {
                debug!("field '{}' hidden by visibility policy", key);
                continue;
            }
            let resolved = self.resolver.resolve(key, spec, values)?;
            groups.push(FieldGroup {
                key: key.clone(),
                container: build_group(key, spec, &resolved),
            });
        }
        debug!("rendered {} of {} fields", groups.len(), fields.len());
        Ok(Some(RenderedForm { groups }))
    }
}

impl Default for FormRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_visible(spec: &FieldSpec, policy: &dyn VisibilityPolicy) -> bool {
    match spec.visibility_key.as_deref() {
        Some(token) => policy.can_show(token),
        None => true,
    }
}

fn build_group(key: &str, spec: &FieldSpec, resolved: &ResolvedField) -> Element {
    let mut container = Element::new("div");
    container.set_attr("class", "field");

    let mut label = Element::with_text("label", &spec.label);
    label.set_attr("for", key);
    container.append_child(label);

    let mut select = Element::new("select");
    select.set_attr("name", key);
    for option in &resolved.options {
        let mut element = Element::with_text("option", &option.label);
        element.set_attr("value", &option.value);
        if resolved.is_selected(&option.value) {
            element.set_attr("selected", "selected");
        }
        select.append_child(element);
    }
    container.append_child(select);

    container
}
