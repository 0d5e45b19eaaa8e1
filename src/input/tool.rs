//! Drawing tool selection and per-tool capabilities.

use crate::config::BrushConfig;
use crate::draw::{Brush, BrushKind, Color};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Palette tool.
///
/// Exactly one tool is active at a time. Only `Pencil` and `Erase` produce
/// strokes; `Text`, `Frame` and `Line` enable drawing mode without a brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pick and delete existing strokes
    Select,
    /// Freehand ink
    #[serde(alias = "draw")]
    Pencil,
    /// Freehand eraser
    #[serde(alias = "eraser")]
    Erase,
    Text,
    Frame,
    Line,
}

impl Tool {
    /// Every tool in palette order.
    pub const ALL: [Tool; 6] = [
        Tool::Select,
        Tool::Pencil,
        Tool::Erase,
        Tool::Text,
        Tool::Frame,
        Tool::Line,
    ];

    /// Palette shortcut digit ('1' for Select through '6' for Line).
    pub fn shortcut(self) -> char {
        match self {
            Tool::Select => '1',
            Tool::Pencil => '2',
            Tool::Erase => '3',
            Tool::Text => '4',
            Tool::Frame => '5',
            Tool::Line => '6',
        }
    }

    /// Maps a palette shortcut digit back to its tool.
    pub fn from_shortcut(key: char) -> Option<Tool> {
        Tool::ALL.into_iter().find(|tool| tool.shortcut() == key)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Pencil => "pencil",
            Tool::Erase => "erase",
            Tool::Text => "text",
            Tool::Frame => "frame",
            Tool::Line => "line",
        }
    }

    /// Looks up this tool's capability record.
    pub fn capabilities(self, brushes: &BrushConfig) -> Capabilities {
        let pencil_color = brushes.pencil_color.to_color();
        match self {
            Tool::Select => Capabilities {
                drawing_mode_enabled: false,
                brush_kind: BrushKind::None,
                brush_width: 0.0,
                brush_color: pencil_color,
                selection_enabled: true,
            },
            Tool::Pencil => Capabilities {
                drawing_mode_enabled: true,
                brush_kind: BrushKind::Stroke,
                brush_width: brushes.pencil_width,
                brush_color: pencil_color,
                selection_enabled: false,
            },
            Tool::Erase => Capabilities {
                drawing_mode_enabled: true,
                brush_kind: BrushKind::Eraser,
                brush_width: brushes.eraser_width,
                brush_color: pencil_color,
                selection_enabled: false,
            },
            Tool::Text | Tool::Frame | Tool::Line => Capabilities {
                drawing_mode_enabled: true,
                brush_kind: BrushKind::None,
                brush_width: 0.0,
                brush_color: pencil_color,
                selection_enabled: false,
            },
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    /// Parses a tool name (case-insensitive). `draw` is accepted as `pencil`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "select" => Ok(Tool::Select),
            "pencil" | "draw" => Ok(Tool::Pencil),
            "erase" | "eraser" => Ok(Tool::Erase),
            "text" => Ok(Tool::Text),
            "frame" => Ok(Tool::Frame),
            "line" => Ok(Tool::Line),
            other => Err(format!("Unknown tool '{other}'")),
        }
    }
}

/// What a tool turns on at the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capabilities {
    /// Pointer gestures are treated as drawing gestures
    pub drawing_mode_enabled: bool,
    pub brush_kind: BrushKind,
    pub brush_width: f64,
    pub brush_color: Color,
    /// Pointer gestures pick strokes
    pub selection_enabled: bool,
}

impl Capabilities {
    /// The brush to install, if this record carries one.
    pub fn brush(&self) -> Option<Brush> {
        (self.brush_kind != BrushKind::None).then_some(Brush {
            kind: self.brush_kind,
            width: self.brush_width,
            color: self.brush_color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::CYAN;

    #[test]
    fn shortcuts_round_trip_in_palette_order() {
        let digits: String = Tool::ALL.iter().map(|t| t.shortcut()).collect();
        assert_eq!(digits, "123456");
        assert_eq!(Tool::from_shortcut('3'), Some(Tool::Erase));
        assert_eq!(Tool::from_shortcut('7'), None);
    }

    #[test]
    fn parse_accepts_legacy_draw_name() {
        assert_eq!("Draw".parse::<Tool>(), Ok(Tool::Pencil));
        assert_eq!(" frame ".parse::<Tool>(), Ok(Tool::Frame));
        assert!("lasso".parse::<Tool>().is_err());
        for tool in Tool::ALL {
            assert_eq!(tool.to_string().parse::<Tool>(), Ok(tool));
        }
    }

    #[test]
    fn capability_table_matches_palette() {
        let brushes = BrushConfig::default();

        let pencil = Tool::Pencil.capabilities(&brushes);
        assert!(pencil.drawing_mode_enabled);
        assert_eq!(pencil.brush().unwrap().width, 15.0);
        assert_eq!(pencil.brush().unwrap().color, CYAN);

        let erase = Tool::Erase.capabilities(&brushes);
        assert_eq!(erase.brush().unwrap().kind, BrushKind::Eraser);
        assert_eq!(erase.brush_width, 30.0);

        let select = Tool::Select.capabilities(&brushes);
        assert!(select.selection_enabled);
        assert!(!select.drawing_mode_enabled);
        assert!(select.brush().is_none());

        for tool in [Tool::Text, Tool::Frame, Tool::Line] {
            let caps = tool.capabilities(&brushes);
            assert!(caps.drawing_mode_enabled);
            assert!(!caps.selection_enabled);
            assert!(caps.brush().is_none());
        }
    }
}
