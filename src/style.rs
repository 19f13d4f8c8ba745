//! Style parameters consumed by the compositor
//!
//! All magnitudes are UI units (preview pixels), not output pixels. They are
//! scaled against the requested download size by [`crate::canvas::geometry`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound of the margin and border radius sliders
pub const MAX_MARGIN: f32 = 50.0;
/// Upper bound of the border radius slider
pub const MAX_BORDER_RADIUS: f32 = 50.0;
/// Upper bound of the border width slider
pub const MAX_BORDER_WIDTH: f32 = 20.0;

/// An sRGB color with straight (non-premultiplied) alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    /// Opaque black
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Create a color with explicit alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional)
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 | 8 => digits.to_string(),
            _ => return Err(Error::InvalidColor(value.to_string())),
        };

        let bytes = hex::decode(&expanded).map_err(|_| Error::InvalidColor(value.to_string()))?;
        match bytes.as_slice() {
            [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
            [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
            _ => Err(Error::InvalidColor(value.to_string())),
        }
    }

    /// Lowercase hex representation, alpha omitted when opaque
    pub fn to_hex(&self) -> String {
        if self.a == 0xff {
            format!("#{}", hex::encode([self.r, self.g, self.b]))
        } else {
            format!("#{}", hex::encode([self.r, self.g, self.b, self.a]))
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl From<Color> for tiny_skia::Color {
    fn from(color: Color) -> Self {
        tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Corner treatment shared by the background fill and the border stroke
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// Sharp, axis-aligned corners
    #[default]
    Square,
    /// Quadratic-curve rounded corners
    Rounded,
}

impl BorderStyle {
    /// Parse a border style identifier (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "square" => Some(Self::Square),
            "rounded" | "round" => Some(Self::Rounded),
            _ => None,
        }
    }
}

/// Styling applied around the QR artwork at export time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleParameters {
    /// Fill color of the background layer
    pub background_color: Color,
    /// Border stroke color (also the QR dot color)
    pub stroke_color: Color,
    /// Space between border and QR artwork, 0..=50
    pub margin: f32,
    /// Corner radius for rounded style, 0..=50
    pub border_radius: f32,
    /// Border stroke thickness, 0..=20
    pub border_width: f32,
    /// Square or rounded corners
    pub border_style: BorderStyle,
}

impl Default for StyleParameters {
    fn default() -> Self {
        Self {
            background_color: Color::WHITE,
            stroke_color: Color::BLACK,
            margin: 10.0,
            border_radius: 0.0,
            border_width: 0.0,
            border_style: BorderStyle::Square,
        }
    }
}

impl StyleParameters {
    /// Clamp every magnitude to its slider range.
    ///
    /// NaN collapses to zero.
    pub fn clamped(&self) -> Self {
        Self {
            margin: clamp_unit(self.margin, MAX_MARGIN),
            border_radius: clamp_unit(self.border_radius, MAX_BORDER_RADIUS),
            border_width: clamp_unit(self.border_width, MAX_BORDER_WIDTH),
            ..self.clone()
        }
    }

    /// Whether a border stroke will be painted
    pub fn has_border(&self) -> bool {
        self.border_width > 0.0
    }
}

fn clamp_unit(value: f32, max: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, max) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_hex() {
        assert_eq!(Color::parse("#ff8800").unwrap(), Color::rgb(0xff, 0x88, 0x00));
        assert_eq!(Color::parse("f80").unwrap(), Color::rgb(0xff, 0x88, 0x00));
        assert_eq!(
            Color::parse("#11223344").unwrap(),
            Color::rgba(0x11, 0x22, 0x33, 0x44)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(Color::parse("#12345"), Err(Error::InvalidColor(_))));
        assert!(matches!(Color::parse("#gggggg"), Err(Error::InvalidColor(_))));
        assert!(matches!(Color::parse(""), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn test_hex_output_omits_opaque_alpha() {
        assert_eq!(Color::rgb(0, 0x80, 0xff).to_hex(), "#0080ff");
        assert_eq!(Color::rgba(0, 0, 0, 0x7f).to_hex(), "#0000007f");
    }

    #[test]
    fn test_style_serde_uses_hex_strings() {
        let style = StyleParameters {
            border_style: BorderStyle::Rounded,
            ..StyleParameters::default()
        };
        let json = serde_json::to_value(&style).unwrap();
        assert_eq!(json["background_color"], "#ffffff");
        assert_eq!(json["border_style"], "rounded");

        let back: StyleParameters = serde_json::from_value(json).unwrap();
        assert_eq!(back, style);
    }

    #[test]
    fn test_clamped_applies_slider_ranges() {
        let style = StyleParameters {
            margin: 75.0,
            border_radius: -3.0,
            border_width: f32::NAN,
            ..StyleParameters::default()
        };
        let clamped = style.clamped();
        assert_eq!(clamped.margin, 50.0);
        assert_eq!(clamped.border_radius, 0.0);
        assert_eq!(clamped.border_width, 0.0);
    }

    #[test]
    fn test_has_border_only_for_positive_width() {
        for (width, expected) in [(4.0, true), (0.0, false), (-1.0, false), (f32::NAN, false)] {
            let style = StyleParameters {
                border_width: width,
                ..StyleParameters::default()
            };
            assert_eq!(style.has_border(), expected, "width {width}");
        }
    }

    #[test]
    fn test_border_style_parse() {
        assert_eq!(BorderStyle::parse("Rounded"), Some(BorderStyle::Rounded));
        assert_eq!(BorderStyle::parse("square"), Some(BorderStyle::Square));
        assert_eq!(BorderStyle::parse("hex"), None);
    }
}
