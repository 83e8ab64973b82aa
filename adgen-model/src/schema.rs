//! JSON schemas sent as `response_format` so models answer in the layout
//! wire format. Written for strict mode: every object closes
//! `additionalProperties` and lists all of its properties as required.

use crate::chat::ResponseSchema;
use serde_json::{Value, json};

const HEX_COLOR_PATTERN: &str = "^#([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$";

fn color(description: &str) -> Value {
    json!({"type": "string", "pattern": HEX_COLOR_PATTERN, "description": description})
}

fn integer(description: &str) -> Value {
    json!({"type": "integer", "description": description})
}

fn number(description: &str) -> Value {
    json!({"type": "number", "description": description})
}

fn closed_object(properties: Value) -> Value {
    let required: Vec<Value> = properties
        .as_object()
        .map(|props| props.keys().map(|key| Value::String(key.clone())).collect())
        .unwrap_or_default();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

fn text_layer() -> Value {
    closed_object(json!({
        "type": {"type": "string", "enum": ["text"]},
        "text": {"type": "string", "description": "Text content of the box"},
        "x": integer("X coordinate of the box"),
        "y": integer("Y coordinate of the box"),
        "width": integer("Width of the box"),
        "height": integer("Height of the box"),
        "fontSize": integer("Font size in pixels"),
        "color": color("Text color as a hex code"),
        "align": {"type": "string", "enum": ["left", "center", "right"]}
    }))
}

fn icon_layer() -> Value {
    closed_object(json!({
        "type": {"type": "string", "enum": ["icon"]},
        "text": {"type": "string", "description": "FontAwesome icon code such as 'fa-sun'"},
        "x": integer("X coordinate of the icon bounding box"),
        "y": integer("Y coordinate of the icon bounding box"),
        "fontSize": integer("Icon size; the bounding box is a square of this edge"),
        "color": color("Icon color as a hex code")
    }))
}

fn rect_layer() -> Value {
    closed_object(json!({
        "type": {"type": "string", "enum": ["rect"]},
        "x": integer("X coordinate of the box"),
        "y": integer("Y coordinate of the box"),
        "width": integer("Width of the box"),
        "height": integer("Height of the box"),
        "fill": color("Fill color as a hex code"),
        "stroke": color("Stroke color as a hex code"),
        "strokeWidth": number("Stroke width"),
        "rotation": number("Rotation in degrees"),
        "borderRadius": number("Corner radius")
    }))
}

/// Array of text, icon and rect layers in paint order.
pub fn layers() -> Value {
    json!({
        "type": "array",
        "description": "Layers placed on top of the background, bottom-most first",
        "items": {"anyOf": [text_layer(), icon_layer(), rect_layer()]}
    })
}

/// `{feedbackIsPositive, adFeedback}`
pub fn verdict() -> ResponseSchema {
    ResponseSchema::new(
        "ad_feedback",
        closed_object(json!({
            "feedbackIsPositive": {
                "type": "boolean",
                "description": "Whether the ad is great (true) or needs improvement (false)"
            },
            "adFeedback": {
                "type": "string",
                "description": "Critique covering layout, colors, typography, messaging and call to action"
            }
        })),
    )
}

/// `{layers}`
pub fn revised_layers() -> ResponseSchema {
    ResponseSchema::new("improved_layers", closed_object(json!({"layers": layers()})))
}

/// `{fixes, layers}`
pub fn critique() -> ResponseSchema {
    ResponseSchema::new(
        "reflection",
        closed_object(json!({
            "fixes": {
                "type": "string",
                "description": "Problems in the current ad and the layer changes that address them"
            },
            "layers": layers()
        })),
    )
}

/// `{backgroundDescription, fullAdDescription, layers}`
pub fn ad_concept() -> ResponseSchema {
    ResponseSchema::new(
        "ad_concept",
        closed_object(json!({
            "backgroundDescription": {
                "type": "string",
                "description": "Detailed description of the background image, without any text"
            },
            "fullAdDescription": {
                "type": "string",
                "description": "Description of the complete ad, background and layers together"
            },
            "layers": layers()
        })),
    )
}
