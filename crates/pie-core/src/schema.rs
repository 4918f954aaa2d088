// File: crates/pie-core/src/schema.rs
// Summary: Declarative form schemas (data schema + UI schema pairs) for the editing actions.
// Notes:
// - Pure functions of the dataset's column names; the column list becomes the
//   `enum` of the x/y column pickers.
// - Shapes follow JSON Schema for data and a JSON Forms style layout for UI.

use serde::Serialize;
use serde_json::{json, Map, Value};

/// A data schema and the UI layout rendering it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub data_schema: Value,
    pub ui_schema: Value,
}

/// Builder forms: general + theme, plus a separate options form.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderSchema {
    pub data_schema: Value,
    pub ui_schema: Value,
    pub advanced: FormSchema,
}

/// Schema of `VisualizationOptions`.
pub fn visualization_options_schema(columns: &[String]) -> Value {
    json!({
        "type": "object",
        "title": "Visualization Options",
        "properties": {
            "xColumn": { "type": "string", "title": "X column", "enum": columns, "required": true },
            "yColumn": { "type": "string", "title": "Y column", "enum": columns, "required": true },
            "serieName": { "type": "string" },
            "numberFormat": { "type": "string" },
            "legend": {
                "type": "object",
                "title": "Show Chart Legend",
                "properties": {
                    "show": { "type": "boolean" },
                    "fontColor": { "type": "string", "format": "color" },
                    "scroll": { "type": "boolean" },
                    "position": { "type": "string", "enum": ["top", "bottom", "left", "right"] }
                }
            },
            "showDataLabels": { "type": "boolean" },
            "padding": {
                "type": "object",
                "title": "Padding (px)",
                "properties": {
                    "top": { "type": "number" },
                    "bottom": { "type": "number" },
                    "left": { "type": "number" },
                    "right": { "type": "number" }
                }
            },
            "valuesOptions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "required": true },
                        "color": { "type": "string", "format": "color" }
                    }
                }
            }
        }
    })
}

/// Theme fields shared by both configurators.
pub fn theme_properties() -> Map<String, Value> {
    let props = json!({
        "darkShadow": { "type": "boolean" },
        "customFontColor": { "type": "boolean" },
        "fontColor": { "type": "string", "format": "color" },
        "customBackgroundColor": { "type": "boolean" },
        "backgroundColor": { "type": "string", "format": "color" },
        "height": { "type": "string" }
    });
    match props {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn control(scope: &str) -> Value {
    json!({ "type": "Control", "scope": format!("#/properties/{scope}") })
}

/// Control enabled only while `flag` is true.
fn gated_control(scope: &str, flag: &str) -> Value {
    json!({
        "type": "Control",
        "scope": format!("#/properties/{scope}"),
        "rule": {
            "effect": "ENABLE",
            "condition": { "scope": format!("#/properties/{flag}"), "schema": { "const": true } }
        }
    })
}

fn options_control() -> Value {
    json!({
        "type": "Control",
        "scope": "#/properties/options",
        "options": { "detail": { "type": "VerticalLayout" } }
    })
}

/// The "Theme" category of the UI schema.
pub fn theme_ui_schema() -> Value {
    json!({
        "type": "Category",
        "label": "Theme",
        "elements": [{
            "type": "VerticalLayout",
            "elements": [
                { "type": "HorizontalLayout", "elements": [control("customFontColor"), gated_control("fontColor", "customFontColor")] },
                { "type": "HorizontalLayout", "elements": [control("customBackgroundColor"), gated_control("backgroundColor", "customBackgroundColor")] },
                { "type": "HorizontalLayout", "elements": [control("darkShadow"), control("height")] }
            ]
        }]
    })
}

fn with_theme(mut properties: Map<String, Value>) -> Value {
    properties.extend(theme_properties());
    Value::Object(properties)
}

pub fn builder_schema(columns: &[String]) -> BuilderSchema {
    let mut general = Map::new();
    general.insert("title".into(), json!({ "type": "string" }));
    general.insert("description".into(), json!({ "type": "string" }));

    BuilderSchema {
        data_schema: json!({
            "type": "object",
            "required": ["title"],
            "properties": with_theme(general)
        }),
        ui_schema: json!({
            "type": "Categorization",
            "elements": [
                {
                    "type": "Category",
                    "label": "General",
                    "elements": [{ "type": "VerticalLayout", "elements": [control("title"), control("description")] }]
                },
                theme_ui_schema()
            ]
        }),
        advanced: FormSchema {
            data_schema: json!({
                "type": "object",
                "properties": { "options": visualization_options_schema(columns) }
            }),
            ui_schema: json!({
                "type": "VerticalLayout",
                "elements": [{ "type": "HorizontalLayout", "elements": [options_control()] }]
            }),
        },
    }
}

pub fn embedder_schema(columns: &[String]) -> FormSchema {
    let mut general = Map::new();
    general.insert("title".into(), json!({ "type": "string", "required": true }));
    general.insert("description".into(), json!({ "type": "string" }));
    general.insert("options".into(), visualization_options_schema(columns));

    FormSchema {
        data_schema: json!({ "type": "object", "properties": with_theme(general) }),
        ui_schema: json!({
            "type": "Categorization",
            "elements": [
                {
                    "type": "Category",
                    "label": "General",
                    "elements": [{
                        "type": "VerticalLayout",
                        "elements": [
                            control("title"),
                            control("description"),
                            { "type": "HorizontalLayout", "elements": [options_control()] }
                        ]
                    }]
                },
                theme_ui_schema()
            ]
        }),
    }
}
