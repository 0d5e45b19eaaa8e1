//! Resolution-independent annotation surface with linear undo/redo.
//!
//! The crate exposes the drawing core of an in-page annotation overlay: a
//! DPR-aware pixel [`Surface`](draw::Surface), a [`HistoryStore`](history::HistoryStore)
//! over committed strokes, the [`Canvas`](canvas::Canvas) composing them, the tool
//! palette in [`input`], and the mountable [`Overlay`](overlay::Overlay). The page
//! itself stays behind the [`Host`](host::Host) trait.

pub mod canvas;
pub mod config;
pub mod draw;
pub mod history;
pub mod host;
pub mod input;
pub mod overlay;
pub mod script;
pub mod util;

pub use config::Config;
