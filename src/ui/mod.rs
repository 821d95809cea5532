//! UI rendering for the chat client
//!
//! Layout, top to bottom:
//! - Status line with the model backend badge
//! - Conversation list on the left, messages on the right
//! - Composer and keybind hints under the messages
//!
//! Alerts float over the top-right corner.

mod composer;
mod conversation_list;
mod helpers;
mod messages;
mod status;
mod theme;

pub use helpers::{estimate_wrapped_line_count, truncate_string, SPINNER_FRAMES};
pub use messages::{build_message_lines, row_lines};
pub use status::status_badge;
pub use theme::{alert_color, status_color};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Focus};
use crate::traits::HttpClient;

use composer::{composer_height, keybind_hints, render_composer};
use conversation_list::render_conversation_list;
use messages::render_messages_area;
use status::{render_alerts, render_status_line};

/// Width of the conversation pane, clamped for narrow terminals
fn list_width(total: u16) -> u16 {
    (total / 4).clamp(20, 36).min(total / 2)
}

/// Render the whole screen.
///
/// Takes the app mutably so the message pane can record its scroll limits.
pub fn render<H: HttpClient + 'static>(frame: &mut Frame, app: &mut App<H>) {
    let size = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status line
            Constraint::Min(3),    // Body
        ])
        .split(size);
    render_status_line(frame, rows[0], &app.state);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(list_width(size.width)), Constraint::Min(10)])
        .split(rows[1]);
    render_conversation_list(
        frame,
        columns[0],
        &app.state,
        app.focus == Focus::Conversations,
    );

    let chat = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),                                    // Messages
            Constraint::Length(composer_height(&app.state.composer)), // Composer
            Constraint::Length(1),                                 // Keybinds
        ])
        .split(columns[1]);
    render_messages_area(frame, chat[0], &mut app.state.messages, app.tick_count);
    render_composer(
        frame,
        chat[1],
        &app.state.composer,
        app.focus == Focus::Composer,
    );
    frame.render_widget(Paragraph::new(keybind_hints()), chat[2]);

    render_alerts(
        frame,
        Rect {
            y: rows[1].y,
            height: rows[1].height,
            ..size
        },
        &app.state,
    );
}
