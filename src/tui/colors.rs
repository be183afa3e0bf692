//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Border and status bar of the focused pane
pub const ACCENT: Color = Color::Rgb(0, 95, 135);
/// Today's date in the grid
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Has-tasks marker
pub const TASK_DOT: Color = Color::Rgb(0, 175, 95);
/// Completed checklist items
pub const MUTED: Color = Color::DarkGray;
