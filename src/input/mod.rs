//! Tool palette and input routing.
//!
//! This module defines the palette tools with their capability records, the
//! controller that applies them to a canvas, and the semantic input events the
//! overlay accepts from whatever listens to the page.

pub mod controller;
pub mod events;
pub mod tool;

// Re-export commonly used types at module level
pub use controller::ToolController;
pub use events::InputEvent;
pub use tool::{Capabilities, Tool};
