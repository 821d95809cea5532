//! Message and key handling for the App.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::ChatError;
use crate::flow::MessageFlow;
use crate::session::ChatSession;
use crate::store::{ConversationStore, StartupStep};
use crate::traits::HttpClient;

use super::{App, AppMessage, Focus, PAGE_SCROLL_LINES};

impl<H: HttpClient + 'static> App<H> {
    /// Handle an incoming async message.
    /// All message handlers mark the app as dirty since they update visible state.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::StartupListed { request, result } => {
                match ConversationStore::<H>::apply_startup_list(&mut self.state, request, result) {
                    StartupStep::Create => self.new_conversation(),
                    StartupStep::Load(id) => self.select_conversation(&id),
                    StartupStep::Idle => {
                        tracing::warn!("Startup listing failed, waiting for user action");
                    }
                }
            }
            AppMessage::ConversationsListed { request, result } => {
                ConversationStore::<H>::apply_list(&mut self.state, request, result);
            }
            AppMessage::RecentFound(result) => {
                if let Some(id) = ConversationStore::<H>::finish_recent(&mut self.state, result) {
                    let listed = self.state.conversations.contains(&id);
                    self.select_conversation(&id);
                    if !listed {
                        self.refresh_conversations();
                    }
                }
            }
            AppMessage::ConversationCreated(result) => {
                if ConversationStore::<H>::finish_create(&mut self.state, result).is_some() {
                    self.refresh_conversations();
                }
            }
            AppMessage::MessagesLoaded {
                conversation_id,
                result,
            } => {
                MessageFlow::<H>::finish_load(&mut self.state, &conversation_id, result);
            }
            AppMessage::SendFinished {
                conversation_id,
                result,
            } => {
                let outcome = MessageFlow::<H>::finish_send(&mut self.state, &conversation_id, result);
                if outcome.refresh_list {
                    self.refresh_conversations();
                }
            }
            AppMessage::ProjectCreated(result) => {
                ChatSession::<H>::finish_create_project(&mut self.state, result);
            }
            AppMessage::StatusChecked(result) => {
                ChatSession::<H>::apply_status(&mut self.state, result);
            }
            AppMessage::ImageLoaded(result) => match result {
                Ok(image) => {
                    tracing::debug!("Attached {}", image.preview_label());
                    self.state.composer.attach_image(image);
                }
                Err(err) => {
                    tracing::warn!("Image attach failed: {}", err);
                    let message = err.user_message();
                    self.state.alert_error(&ChatError::from(err), message);
                }
            },
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global keybinds
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.quit();
                return;
            }
            KeyCode::Char('n') if ctrl => {
                self.new_conversation();
                return;
            }
            KeyCode::Char('r') if ctrl => {
                self.refresh_conversations();
                return;
            }
            KeyCode::Esc => {
                self.state.alerts.dismiss_latest();
                return;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggle();
                return;
            }
            KeyCode::PageUp => {
                self.state.messages.scroll.scroll_up(PAGE_SCROLL_LINES);
                return;
            }
            KeyCode::PageDown => {
                self.state.messages.scroll.scroll_down(PAGE_SCROLL_LINES);
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Conversations => self.handle_list_key(key),
            Focus::Composer => self.handle_composer_key(key),
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.conversations.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.conversations.move_down(),
            KeyCode::Enter => {
                if let Some(id) = self.state.conversations.cursor_id().map(str::to_string) {
                    self.select_conversation(&id);
                    self.focus = Focus::Composer;
                }
            }
            _ => {}
        }
    }

    fn handle_composer_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => return self.submit(),
            KeyCode::Up => {
                self.state.messages.scroll.scroll_up(1);
                return;
            }
            KeyCode::Down => {
                self.state.messages.scroll.scroll_down(1);
                return;
            }
            _ => {}
        }

        let composer = &mut self.state.composer;
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                composer.insert_char(c)
            }
            KeyCode::Backspace => composer.backspace(),
            KeyCode::Delete => composer.delete_char(),
            KeyCode::Left => composer.move_left(),
            KeyCode::Right => composer.move_right(),
            KeyCode::Home => composer.move_home(),
            KeyCode::End => composer.move_end(),
            _ => {}
        }
    }

    /// Bracketed paste into the composer. The composer is single-line.
    pub fn handle_paste(&mut self, text: &str) {
        self.mark_dirty();
        if self.focus != Focus::Composer {
            return;
        }
        let flattened = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
        self.state.composer.insert_str(&flattened);
    }
}
