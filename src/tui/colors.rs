//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Status;

/// Menu title and spinner
pub const TITLE: Color = Color::Cyan;
/// Menu entries and the text being typed
pub const OPTION: Color = Color::Yellow;
/// The exit entry
pub const EXIT: Color = Color::Red;
/// Prompt text
pub const PROMPT: Color = Color::White;
/// Result messages
pub const SUCCESS: Color = Color::Green;
pub const FAILURE: Color = Color::Red;
/// "No tasks found."
pub const NOTICE: Color = Color::Yellow;

/// Color of a task line in listings.
pub fn status_color(status: Status) -> Color {
    match status {
        Status::Completed => Color::Green,
        Status::InProgress => Color::Yellow,
        Status::NotCompleted => Color::Red,
    }
}
