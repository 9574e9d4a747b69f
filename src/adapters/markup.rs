//! Minimal HTML element tree.
//!
//! The renderer's contract ends at a structured tree; this module supplies
//! the small construct/attribute/append/serialize capability it needs and
//! nothing more. Text and attribute values are escaped on serialization.

use std::fmt::Write as _;

/// One element of the output tree: tag, optional text, attributes and
/// children. Attributes serialize in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    text: Option<String>,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(tag);
        element.text = Some(text.into());
        element
    }

    /// Set an attribute, replacing any existing value under the same name.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Serialize this element and its subtree. Text precedes children,
    /// matching construction order.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape_text(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_element() {
        assert_eq!(Element::new("select").to_html(), "<select></select>");
    }

    #[test]
    fn test_attributes_serialize_in_insertion_order() {
        let mut el = Element::new("select");
        el.set_attr("name", "sortOrder");
        el.set_attr("class", "dropdown");
        assert_eq!(
            el.to_html(),
            r#"<select name="sortOrder" class="dropdown"></select>"#
        );
    }

    #[test]
    fn test_set_attr_replaces_existing() {
        let mut el = Element::new("option");
        el.set_attr("value", "a");
        el.set_attr("value", "b");
        assert_eq!(el.attr("value"), Some("b"));
        assert_eq!(el.to_html(), r#"<option value="b"></option>"#);
    }

    #[test]
    fn test_text_precedes_children() {
        let mut el = Element::with_text("label", "Sortering");
        el.append_child(Element::new("span"));
        assert_eq!(el.to_html(), "<label>Sortering<span></span></label>");
    }

    #[test]
    fn test_text_is_escaped() {
        let el = Element::with_text("option", "Fish & <chips>");
        assert_eq!(el.to_html(), "<option>Fish &amp; &lt;chips&gt;</option>");
    }

    #[test]
    fn test_attribute_value_is_escaped() {
        let mut el = Element::new("option");
        el.set_attr("value", r#"say "hi" & <go>"#);
        assert_eq!(
            el.to_html(),
            r#"<option value="say &quot;hi&quot; &amp; &lt;go&gt;"></option>"#
        );
    }

    #[test]
    fn test_nested_tree() {
        let mut select = Element::new("select");
        select.set_attr("name", "color");
        let mut option = Element::with_text("option", "Rood");
        option.set_attr("value", "r");
        select.append_child(option);
        assert_eq!(
            select.to_html(),
            r#"<select name="color"><option value="r">Rood</option></select>"#
        );
    }
}
