//! Composer rendering: pending image chip, input box and keybind hints.

use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::view::Composer;

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_BORDER_FOCUSED, COLOR_DIM, COLOR_INFO};

/// Height the composer needs: the input box plus one line for the image
/// chip when an image is pending.
pub fn composer_height(composer: &Composer) -> u16 {
    if composer.image().is_some() {
        4
    } else {
        3
    }
}

/// Index of the first visible char so the cursor stays inside `width`.
fn visible_start(cursor: usize, width: usize) -> usize {
    if width == 0 {
        return cursor;
    }
    cursor.saturating_sub(width.saturating_sub(1))
}

pub fn render_composer(frame: &mut Frame, area: Rect, composer: &Composer, focused: bool) {
    let mut box_area = area;
    if let Some(preview) = composer.image_preview() {
        let chip = Line::from(vec![
            Span::styled(" image: ", Style::default().fg(COLOR_INFO)),
            Span::styled(preview, Style::default().fg(COLOR_ACCENT)),
            Span::styled("  /clear-image to remove", Style::default().fg(COLOR_DIM)),
        ]);
        frame.render_widget(
            Paragraph::new(chip),
            Rect {
                height: 1,
                ..area
            },
        );
        box_area = Rect {
            y: area.y + 1,
            height: area.height.saturating_sub(1),
            ..area
        };
    }

    let enabled = composer.is_submit_enabled();
    let title = if enabled { " Message " } else { " Message (waiting for reply) " };
    let border = if focused { COLOR_BORDER_FOCUSED } else { COLOR_BORDER };
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(COLOR_DIM)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));
    let inner = block.inner(box_area);

    let width = inner.width as usize;
    let start = visible_start(composer.cursor(), width);
    let shown: String = composer.text().chars().skip(start).take(width).collect();
    let text_style = if enabled {
        Style::default().fg(COLOR_ACCENT)
    } else {
        Style::default().fg(COLOR_DIM)
    };
    let line = if composer.is_empty() && focused {
        Line::from(Span::styled(
            "Type a message or /help",
            Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(Span::styled(shown, text_style))
    };
    frame.render_widget(Paragraph::new(line).block(block), box_area);

    if focused && inner.width > 0 && inner.height > 0 {
        let x = inner.x + (composer.cursor() - start) as u16;
        frame.set_cursor_position(Position::new(x.min(inner.right().saturating_sub(1)), inner.y));
    }
}

/// Keybind hints under the composer.
pub fn keybind_hints() -> Line<'static> {
    let key = Style::default().fg(COLOR_ACCENT);
    let dim = Style::default().fg(COLOR_DIM);
    Line::from(vec![
        Span::styled(" Enter", key),
        Span::styled(" send  ", dim),
        Span::styled("Tab", key),
        Span::styled(" switch pane  ", dim),
        Span::styled("Ctrl+N", key),
        Span::styled(" new  ", dim),
        Span::styled("Esc", key),
        Span::styled(" dismiss  ", dim),
        Span::styled("/help", key),
        Span::styled(" commands  ", dim),
        Span::styled("Ctrl+C", key),
        Span::styled(" quit", dim),
    ])
}
