//! Style definition extraction
//!
//! docx-rs keeps the style name behind a private field, so it is read through
//! its serde representation.

use super::super::models::{Style, StyleKind};

pub(crate) fn extract_styles(styles: &docx_rs::Styles) -> Vec<Style> {
    styles.styles.iter().map(extract_style).collect()
}

fn extract_style(style: &docx_rs::Style) -> Style {
    let name = serde_json::to_value(&style.name)
        .ok()
        .and_then(|value| match value {
            serde_json::Value::String(name) => Some(name),
            serde_json::Value::Object(fields) => fields
                .get("name")
                .and_then(|n| n.as_str())
                .map(str::to_string),
            _ => None,
        })
        .filter(|name| !name.is_empty());

    let kind = StyleKind::from_type_name(&style.style_type.to_string());

    Style {
        style_id: style.style_id.clone(),
        name,
        kind,
    }
}
