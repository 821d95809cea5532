//! Status line and alert overlay

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::view::{BackendStatus, ChatState};

use super::theme::{alert_color, status_color, COLOR_ACCENT, COLOR_DIM, COLOR_HEADER};

/// Alerts stacked at once in the overlay
pub const MAX_VISIBLE_ALERTS: usize = 3;

/// Widest an alert box gets
const ALERT_WIDTH: u16 = 48;

/// Badge text, with a vision note when the backend reports one.
pub fn status_badge(status: &BackendStatus) -> String {
    match status {
        BackendStatus::Running {
            has_vision_model: Some(true),
        } => format!("{} · vision", status.label()),
        other => other.label().to_string(),
    }
}

/// One-line header: app name and project on the left, backend badge on the right.
pub fn render_status_line(frame: &mut Frame, area: Rect, state: &ChatState) {
    let left = Line::from(vec![
        Span::styled(
            " nodechat",
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  project {}", state.project_id()),
            Style::default().fg(COLOR_DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(left), area);

    let badge = Line::from(vec![
        Span::styled("● ", Style::default().fg(status_color(&state.backend_status))),
        Span::styled(
            format!("{} ", status_badge(&state.backend_status)),
            Style::default().fg(COLOR_ACCENT),
        ),
    ])
    .alignment(Alignment::Right);
    frame.render_widget(Paragraph::new(badge), area);
}

/// Newest alerts stacked in the top-right corner of `area`.
pub fn render_alerts(frame: &mut Frame, area: Rect, state: &ChatState) {
    let width = ALERT_WIDTH.min(area.width);
    if width < 4 {
        return;
    }
    let text_width = width.saturating_sub(2).max(1) as usize;

    let mut y = area.y;
    let alerts = state.alerts.alerts();
    for alert in alerts.iter().rev().take(MAX_VISIBLE_ALERTS) {
        let text_lines: u16 = alert
            .message
            .lines()
            .map(|line| line.chars().count().max(1).div_ceil(text_width) as u16)
            .sum::<u16>()
            .max(1);
        let height = text_lines + 2;
        if y + height > area.bottom() {
            break;
        }

        let rect = Rect {
            x: area.right().saturating_sub(width),
            y,
            width,
            height,
        };
        let color = alert_color(alert.level);
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", alert.level.label()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color));
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(alert.message.clone())
                .style(Style::default().fg(COLOR_ACCENT))
                .wrap(Wrap { trim: false })
                .block(block),
            rect,
        );
        y += height;
    }
}
