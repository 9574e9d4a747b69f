//! End-to-end rendering scenarios over the public API.

use serde_json::json;
use veld::{AllowAll, CurrentValues, FormRenderer, GrantSet, SchemaStore};

fn values(pairs: &[(&str, &str)]) -> CurrentValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_default_asc_is_selected_without_saved_values() {
    let document = json!({
        "general": {
            "sortOrder": { "type": "sort", "label": "Sort", "default": "asc" }
        }
    });
    let html = veld::render_collection(&document, "general", None, &AllowAll)
        .unwrap()
        .unwrap();
    assert!(html.contains(r#"<option value="asc" selected="selected">Oplopend</option>"#));
    assert!(!html.contains(r#"value="desc" selected"#));
}

#[test]
fn test_saved_desc_overrides_default_asc() {
    let document = json!({
        "general": {
            "sortOrder": { "type": "sort", "label": "Sort", "default": "asc" }
        }
    });
    let saved = values(&[("sortOrder", "desc")]);
    let html = veld::render_collection(&document, "general", Some(&saved), &AllowAll)
        .unwrap()
        .unwrap();
    assert!(html.contains(r#"<option value="desc" selected="selected">Aflopend</option>"#));
}

#[test]
fn test_select_without_default_or_saved_value_marks_no_option() {
    let document = json!({
        "general": {
            "color": {
                "type": "select",
                "label": "Color",
                "values": { "r": "Red", "g": "Green" }
            }
        }
    });
    let html = veld::render_collection(&document, "general", None, &AllowAll)
        .unwrap()
        .unwrap();
    assert!(html.contains(r#"<option value="r">Red</option>"#));
    assert!(html.contains(r#"<option value="g">Green</option>"#));
    assert!(!html.contains("selected"));
}

#[test]
fn test_saved_true_beats_default_false() {
    let document = json!({
        "general": {
            "newsletter": { "type": "boolean", "label": "Newsletter", "default": "false" }
        }
    });
    let saved = values(&[("newsletter", "true")]);
    let html = veld::render_collection(&document, "general", Some(&saved), &AllowAll)
        .unwrap()
        .unwrap();
    assert!(html.contains(r#"<option value="true" selected="selected">Ja</option>"#));
    assert!(html.contains(r#"<option value="false">Nee</option>"#));
}

#[test]
fn test_full_document_renders_whole_collection() {
    let document = json!({
        "log": {
            "newsletter": { "type": "boolean", "label": "Nieuwsbrief", "default": true },
            "sortOrder": { "type": "sort", "label": "Sortering", "default": "asc" },
            "visibility": {
                "type": "select",
                "label": "Zichtbaarheid",
                "default": "private",
                "values": { "public": "Openbaar", "private": "Privé" }
            }
        }
    });
    let html = veld::render_collection(&document, "log", None, &AllowAll)
        .unwrap()
        .unwrap();

    // Three groups, declaration order, one per line.
    let lines: Vec<_> = html.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains(r#"name="newsletter""#));
    assert!(lines[1].contains(r#"name="sortOrder""#));
    assert!(lines[2].contains(r#"name="visibility""#));
    assert!(lines[2].contains(r#"<option value="private" selected="selected">Privé</option>"#));
}

#[test]
fn test_visibility_policy_filters_fields_end_to_end() {
    let document = json!({
        "log": {
            "plain": { "type": "boolean", "label": "Gewoon" },
            "guarded": { "type": "boolean", "label": "Beschermd", "can": "prefs.admin" }
        }
    });

    let none: GrantSet = GrantSet::new();
    let html = veld::render_collection(&document, "log", None, &none)
        .unwrap()
        .unwrap();
    assert!(html.contains("plain"));
    assert!(!html.contains("guarded"));

    let admin: GrantSet = ["prefs.admin".to_string()].into_iter().collect();
    let html = veld::render_collection(&document, "log", None, &admin)
        .unwrap()
        .unwrap();
    assert!(html.contains("guarded"));
}

#[test]
fn test_nested_collection_path() {
    let document = json!({
        "account": {
            "privacy": {
                "tracking": { "type": "boolean", "label": "Tracking", "default": "false" }
            }
        }
    });
    let html = veld::render_collection(&document, "account.privacy", None, &AllowAll)
        .unwrap()
        .unwrap();
    assert!(html.contains(r#"<label for="tracking">Tracking</label>"#));
}

#[test]
fn test_empty_select_fails_the_render() {
    let document = json!({
        "log": {
            "broken": { "type": "select", "label": "Kapot", "values": {} }
        }
    });
    let result = veld::render_collection(&document, "log", None, &AllowAll);
    assert!(result.is_err());
}

#[test]
fn test_renderer_holds_no_state_between_calls() {
    let store = SchemaStore::from_value(&json!({
        "log": {
            "newsletter": { "type": "boolean", "label": "Nieuwsbrief" }
        }
    }))
    .unwrap();
    let renderer = FormRenderer::new();
    let saved = values(&[("newsletter", "true")]);

    let with_saved = renderer
        .render(store.navigate("log"), Some(&saved), &AllowAll)
        .unwrap()
        .unwrap();
    let without = renderer
        .render(store.navigate("log"), None, &AllowAll)
        .unwrap()
        .unwrap();

    assert!(with_saved.to_html().contains("selected"));
    assert!(!without.to_html().contains("selected"));
}
