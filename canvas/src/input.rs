//! Input model: tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InputState` is the active gesture tracked between pointer-down and
//! pointer-up. Each variant carries what the engine needs to compute the
//! preview while moving and the committed element on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use plan_geom::Point;
use serde::{Deserialize, Serialize};

use crate::doc::{EditElement, ElementId};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Select and drag existing annotations (default).
    #[default]
    Select,
    /// Drag the view.
    Pan,
    Wall,
    Door,
    Window,
    Dimension,
    Text,
    /// Delete the annotation under the pointer on click.
    Erase,
}

impl Tool {
    /// Whether this tool creates a new annotation from a press-drag-release gesture.
    #[must_use]
    pub fn is_drawing(self) -> bool {
        matches!(self, Self::Wall | Self::Door | Self::Window | Self::Dimension | Self::Text)
    }

    /// CSS cursor shown while the tool is active.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Select => "default",
            Self::Pan => "grab",
            Self::Erase => "cell",
            Self::Wall | Self::Door | Self::Window | Self::Dimension | Self::Text => "crosshair",
        }
    }

    /// Parse a tool from its lower-case name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "select" => Self::Select,
            "pan" => Self::Pan,
            "wall" => Self::Wall,
            "door" => Self::Door,
            "window" => Self::Window,
            "dimension" => Self::Dimension,
            "text" => Self::Text,
            "erase" => Self::Erase,
            _ => return None,
        })
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Meta / Command key.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button; pans under every tool.
    Middle,
    Secondary,
}

/// A keyboard key name as reported by the browser (e.g. `"Delete"`, `"Escape"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down, zooms out).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub tool: Tool,
    pub selected_id: Option<ElementId>,
}

/// Gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    #[default]
    Idle,
    /// Dragging the view.
    Panning {
        /// Screen position at pointer-down.
        start_screen: Point,
        /// Camera pan at pointer-down.
        start_pan: Point,
    },
    /// Moving an existing annotation.
    Dragging {
        id: ElementId,
        /// Drawing-space pointer position at pointer-down.
        start: Point,
        /// The element before the drag; the live shape is derived from it.
        original: EditElement,
    },
    /// Sizing a new annotation. Both points are snapped drawing coordinates.
    Drawing { tool: Tool, start: Point, current: Point },
}
