//! Ad layout model: the canvas plus an ordered list of positioned layers.
//!
//! The wire form matches the rendering API (`camelCase` fields, layers tagged
//! by `type`). Colors are validated on construction and on deserialization,
//! so a [`Layout`] that exists always satisfies the hex-color invariant.

use crate::error::{AdGenError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Fixed canvas edge in pixels.
pub const CANVAS_SIZE: u32 = 1024;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$")
        .expect("hex color pattern compiles")
});

/// A `#RGB`, `#RRGGBB` or `#RRGGBBAA` color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if HEX_COLOR.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(AdGenError::InvalidLayout(format!(
                "'{value}' is not a hex color (#RGB, #RRGGBB or #RRGGBBAA)"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HexColor {
    type Error = AdGenError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Horizontal text alignment inside a text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TextLayer {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub font_size: u32,
    pub color: HexColor,
    pub align: TextAlign,
}

/// An icon glyph; its bounding box is a square of `font_size` pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IconLayer {
    /// Icon identifier such as `fa-sun`. Sent as `text` on the wire.
    #[serde(rename = "text")]
    pub icon: String,
    pub x: i32,
    pub y: i32,
    pub font_size: u32,
    pub color: HexColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RectLayer {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub fill: HexColor,
    pub stroke: HexColor,
    pub stroke_width: f64,
    /// Degrees.
    pub rotation: f64,
    pub border_radius: f64,
}

/// One visual primitive painted on top of the background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Layer {
    Text(TextLayer),
    Icon(IconLayer),
    Rect(RectLayer),
}

impl Layer {
    /// Wire discriminant of this layer.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Icon(_) => "icon",
            Self::Rect(_) => "rect",
        }
    }

    /// Bounding box as `(x, y, width, height)`.
    pub fn bounds(&self) -> (i32, i32, u32, u32) {
        match self {
            Self::Text(t) => (t.x, t.y, t.width, t.height),
            Self::Icon(i) => (i.x, i.y, i.font_size, i.font_size),
            Self::Rect(r) => (r.x, r.y, r.width, r.height),
        }
    }
}

impl From<TextLayer> for Layer {
    fn from(layer: TextLayer) -> Self {
        Self::Text(layer)
    }
}

impl From<IconLayer> for Layer {
    fn from(layer: IconLayer) -> Self {
        Self::Icon(layer)
    }
}

impl From<RectLayer> for Layer {
    fn from(layer: RectLayer) -> Self {
        Self::Rect(layer)
    }
}

/// Canvas plus layers in paint order (later entries draw over earlier ones).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub layers: Vec<Layer>,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Layout {
    /// Create a layout on the standard 1024x1024 canvas.
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { width: CANVAS_SIZE, height: CANVAS_SIZE, layers }
    }

    /// Same canvas, different layers.
    #[must_use]
    pub fn with_layers(&self, layers: Vec<Layer>) -> Self {
        Self { width: self.width, height: self.height, layers }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers serialized as the JSON array the rendering API and the
    /// prompts expect.
    pub fn layers_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.layers)?)
    }

    /// Parse a layout from its wire JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn hex_color() -> impl Strategy<Value = HexColor> {
        prop_oneof![
            "#[0-9a-fA-F]{3}",
            "#[0-9a-fA-F]{6}",
            "#[0-9a-fA-F]{8}",
        ]
        .prop_map(|s| HexColor::parse(s).unwrap())
    }

    fn layer() -> impl Strategy<Value = Layer> {
        let align = prop_oneof![Just(TextAlign::Left), Just(TextAlign::Center), Just(TextAlign::Right)];
        prop_oneof![
            (".{0,40}", -50i32..1100, -50i32..1100, 0u32..1024, 0u32..1024, 1u32..200, hex_color(), align)
                .prop_map(|(text, x, y, width, height, font_size, color, align)| {
                    Layer::Text(TextLayer { text, x, y, width, height, font_size, color, align })
                }),
            ("fa-[a-z-]{1,20}", -50i32..1100, -50i32..1100, 1u32..300, hex_color()).prop_map(
                |(icon, x, y, font_size, color)| Layer::Icon(IconLayer { icon, x, y, font_size, color })
            ),
            (
                (-50i32..1100, -50i32..1100, 0u32..1024, 0u32..1024),
                hex_color(),
                hex_color(),
                (0u16..50, -360i16..360, 0u16..100),
            )
                .prop_map(|((x, y, width, height), fill, stroke, (sw, rot, br))| {
                    Layer::Rect(RectLayer {
                        x,
                        y,
                        width,
                        height,
                        fill,
                        stroke,
                        stroke_width: f64::from(sw) / 4.0,
                        rotation: f64::from(rot) / 2.0,
                        border_radius: f64::from(br),
                    })
                }),
        ]
    }

    proptest! {
        #[test]
        fn prop_layout_survives_wire_roundtrip(layers in proptest::collection::vec(layer(), 0..8)) {
            let layout = Layout::new(layers);
            let json = serde_json::to_string(&layout).unwrap();
            prop_assert_eq!(Layout::from_json(&json).unwrap(), layout);
        }

        #[test]
        fn prop_non_hex_strings_rejected(s in "[^#].{0,10}") {
            prop_assert!(HexColor::parse(s).is_err());
        }
    }
}
