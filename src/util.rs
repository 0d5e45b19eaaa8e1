//! Utility functions for colors and geometry.
//!
//! This module provides:
//! - Name and hex-string color parsing (constants live in draw::color)
//! - Logical-unit rectangle math used for hit testing and damage tracking
//! - Point-to-segment distance for stroke hit testing

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "cyan", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "cyan" => Some(CYAN),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

/// Parses a CSS-style hex color (`#RGB`, `#RRGGBB` or `#RRGGBBAA`).
///
/// The leading `#` is optional. Returns `None` for anything else.
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f64 / 255.0);

    match hex.len() {
        3 => {
            let mut parts = hex.chars().map(|c| {
                let doubled = format!("{c}{c}");
                channel(&doubled)
            });
            Some(Color {
                r: parts.next()??,
                g: parts.next()??,
                b: parts.next()??,
                a: 1.0,
            })
        }
        6 | 8 => Some(Color {
            r: channel(&hex[0..2])?,
            g: channel(&hex[2..4])?,
            b: channel(&hex[4..6])?,
            a: if hex.len() == 8 {
                channel(&hex[6..8])?
            } else {
                1.0
            },
        }),
        _ => None,
    }
}

/// Resolves a color string that is either a known name or a hex literal.
pub fn parse_color(value: &str) -> Option<Color> {
    name_to_color(value).or_else(|| parse_hex_color(value))
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Axis-aligned rectangle in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Option<Self> {
        if width > 0.0 && height > 0.0 {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        } else {
            None
        }
    }

    /// Builds a rectangle from min/max bounds.
    pub fn from_min_max(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Option<Self> {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Builds the rectangle spanned by two arbitrary corners.
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Option<Self> {
        Self::from_min_max(a.0.min(b.0), a.1.min(b.1), a.0.max(b.0), a.1.max(b.1))
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Returns true if the two rectangles overlap (touching edges count).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.max_x()
            && other.x <= self.max_x()
            && self.y <= other.max_y()
            && other.y <= self.max_y()
    }
}

/// Distance from point `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f64::EPSILON {
        return ((p.0 - a.0).powi(2) + (p.1 - a.1).powi(2)).sqrt();
    }
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0);
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

/// Converts a logical dimension to backing-store pixels: `ceil(logical * scale)`.
pub fn device_pixels(logical: f64, scale: f64) -> i32 {
    let value = (logical * scale).ceil();
    if value.is_finite() && value > 0.0 {
        value.min(i32::MAX as f64) as i32
    } else {
        0
    }
}
