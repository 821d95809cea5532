//! Conversation selector pane

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::view::{ChatState, EMPTY_LIST_TEXT};

use super::helpers::truncate_string;
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_BORDER_FOCUSED, COLOR_DIM, COLOR_SELECTION_BG};

/// Render the conversation list. The active conversation is marked; the
/// keyboard cursor is highlighted while the pane has focus.
pub fn render_conversation_list(frame: &mut Frame, area: Rect, state: &ChatState, focused: bool) {
    let border = if focused { COLOR_BORDER_FOCUSED } else { COLOR_BORDER };
    let block = Block::default()
        .title(Span::styled(" Conversations ", Style::default().fg(COLOR_ACCENT)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));

    if state.conversations.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            EMPTY_LIST_TEXT,
            Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let title_width = area.width.saturating_sub(5) as usize;
    let items: Vec<ListItem> = state
        .conversations
        .entries(state.active_conversation_id())
        .into_iter()
        .map(|entry| {
            let (marker, title_style) = if entry.selected {
                ("▌", Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD))
            } else {
                (" ", Style::default().fg(COLOR_ACCENT))
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(COLOR_ACCENT)),
                    Span::styled(truncate_string(&entry.title, title_width), title_style),
                ]),
                Line::from(vec![
                    Span::raw(" "),
                    Span::styled(entry.date_label, Style::default().fg(COLOR_DIM)),
                ]),
            ])
        })
        .collect();

    let highlight = if focused {
        Style::default().bg(COLOR_SELECTION_BG)
    } else {
        Style::default()
    };
    let list = List::new(items).block(block).highlight_style(highlight);

    let mut list_state = ListState::default();
    list_state.select(Some(state.conversations.cursor()));
    frame.render_stateful_widget(list, area, &mut list_state);
}
