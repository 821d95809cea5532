//! Color theme constants for the chat UI
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

use crate::view::{AlertLevel, BackendStatus};

// ============================================================================
// Minimal Dark Color Theme
// ============================================================================

/// Primary border color - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Border of the focused pane
pub const COLOR_BORDER_FOCUSED: Color = Color::Gray;

/// Accent color - white for highlights and important elements
pub const COLOR_ACCENT: Color = Color::White;

/// Header text color
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Sender label and body of the user's own messages
pub const COLOR_USER: Color = Color::Rgb(0, 122, 204); // blue #007ACC

/// Agent sender label
pub const COLOR_AGENT: Color = Color::Rgb(4, 181, 117); // green #04B575

/// Link text
pub const COLOR_LINK: Color = Color::Cyan;

/// Selected row background in the conversation list
pub const COLOR_SELECTION_BG: Color = Color::Rgb(40, 40, 55);

// ============================================================================
// Alert Colors
// ============================================================================

pub const COLOR_INFO: Color = Color::Cyan;
pub const COLOR_SUCCESS: Color = Color::LightGreen;
pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_DANGER: Color = Color::Red;

pub fn alert_color(level: AlertLevel) -> Color {
    match level {
        AlertLevel::Info => COLOR_INFO,
        AlertLevel::Success => COLOR_SUCCESS,
        AlertLevel::Warning => COLOR_WARNING,
        AlertLevel::Danger => COLOR_DANGER,
    }
}

/// Badge color for the model backend status.
pub fn status_color(status: &BackendStatus) -> Color {
    match status {
        BackendStatus::Unchecked => COLOR_DIM,
        BackendStatus::Running { .. } => COLOR_SUCCESS,
        BackendStatus::NotRunning => COLOR_DANGER,
        BackendStatus::Unknown => COLOR_WARNING,
    }
}
