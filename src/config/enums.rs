//! Configuration enum types.

use crate::draw::{CYAN, Color};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the surface keeps its content when the page is resized.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResizePolicy {
    /// Discard the raster and repaint from the stroke history (lossless)
    #[default]
    Replay,
    /// Copy the old pixels into the new buffer (clips when shrinking)
    Raster,
}

/// Color specification - a named color, a hex literal, or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// pencil_color = "cyan"
///
/// # Hex literal
/// pencil_color = "#00FFFF"
///
/// # Custom RGB color (0-255 per component)
/// pencil_color = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, yellow, orange, pink, cyan, white, black) or `#RRGGBB`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown names and malformed hex strings fall back to cyan with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::parse_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using cyan", name);
                CYAN
            }),
            ColorSpec::Rgb([r, g, b]) => Color {
                r: *r as f64 / 255.0,
                g: *g as f64 / 255.0,
                b: *b as f64 / 255.0,
                a: 1.0,
            },
        }
    }

    /// Returns true if the spec resolves without falling back.
    pub fn is_valid(&self) -> bool {
        match self {
            ColorSpec::Name(name) => crate::util::parse_color(name).is_some(),
            ColorSpec::Rgb(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::ORANGE;

    #[test]
    fn color_spec_resolves_names_hex_and_rgb() {
        assert_eq!(ColorSpec::Name("#00ffff".into()).to_color(), CYAN);
        assert_eq!(ColorSpec::Name("orange".into()).to_color(), ORANGE);
        assert_eq!(ColorSpec::Rgb([0, 255, 255]).to_color(), CYAN);
        assert_eq!(ColorSpec::Name("mauve-ish".into()).to_color(), CYAN);
        assert!(!ColorSpec::Name("mauve-ish".into()).is_valid());
    }
}
