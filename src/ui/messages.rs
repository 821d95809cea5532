//! Message pane rendering
//!
//! User rows are right-aligned, agent rows left-aligned under their sender
//! label. Links are underlined. The pane stays pinned to the newest row
//! unless the user scrolled up.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::view::{MessageView, RenderRow, RowKind, Segment, DEFAULT_AGENT_NAME};

use super::helpers::{estimate_wrapped_line_count, format_time, spinner_frame};
use super::theme::{COLOR_ACCENT, COLOR_AGENT, COLOR_BORDER, COLOR_DIM, COLOR_LINK, COLOR_USER};

/// Styled spans for one line of message text.
fn segment_spans(segments: &[Segment], base: Style) -> Vec<Span<'static>> {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => Span::styled(text.clone(), base),
            Segment::Link(url) => Span::styled(
                url.clone(),
                base.fg(COLOR_LINK).add_modifier(Modifier::UNDERLINED),
            ),
        })
        .collect()
}

fn body_lines(row: &RenderRow, base: Style, alignment: Alignment) -> Vec<Line<'static>> {
    row.body
        .lines
        .iter()
        .map(|segments| Line::from(segment_spans(segments, base)).alignment(alignment))
        .collect()
}

/// Lines for a single row, without the separating blank line.
pub fn row_lines(row: &RenderRow, tick_count: u64) -> Vec<Line<'static>> {
    match row.kind {
        RowKind::UserMessage | RowKind::AgentMessage => {
            let is_user = row.kind == RowKind::UserMessage;
            let (alignment, color) = if is_user {
                (Alignment::Right, COLOR_USER)
            } else {
                (Alignment::Left, COLOR_AGENT)
            };

            let mut header = vec![Span::styled(
                row.sender.clone().unwrap_or_default(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )];
            if let Some(timestamp) = &row.timestamp {
                header.push(Span::styled(
                    format!("  {}", format_time(timestamp)),
                    Style::default().fg(COLOR_DIM),
                ));
            }

            let mut lines = vec![Line::from(header).alignment(alignment)];
            if let Some(image) = &row.image {
                lines.push(
                    Line::from(Span::styled(
                        format!("[image: {}]", image),
                        Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
                    ))
                    .alignment(alignment),
                );
            }
            lines.extend(body_lines(row, Style::default().fg(COLOR_ACCENT), alignment));
            lines
        }
        RowKind::TypingIndicator => vec![Line::from(vec![
            Span::styled(
                format!("{} ", spinner_frame(tick_count)),
                Style::default().fg(COLOR_AGENT),
            ),
            Span::styled(
                format!("{} is typing...", DEFAULT_AGENT_NAME),
                Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
            ),
        ])],
        RowKind::Loading => body_lines(
            row,
            Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
            Alignment::Left,
        ),
        RowKind::Placeholder => body_lines(row, Style::default().fg(COLOR_DIM), Alignment::Center),
    }
}

/// Lines for the whole view, rows separated by a blank line.
pub fn build_message_lines(view: &MessageView, tick_count: u64) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, row) in view.rows().iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.extend(row_lines(row, tick_count));
    }
    lines
}

/// Render the message pane and update the scroll limits.
pub fn render_messages_area(frame: &mut Frame, area: Rect, view: &mut MessageView, tick_count: u64) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);

    let lines = build_message_lines(view, tick_count);
    let total = estimate_wrapped_line_count(&lines, inner.width as usize);
    let visible = inner.height as usize;
    let max_scroll = total.saturating_sub(visible).min(u16::MAX as usize) as u16;
    view.scroll.update_limits(max_scroll);
    let top = max_scroll.saturating_sub(view.scroll.offset);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((top, 0));
    frame.render_widget(paragraph, area);
}
