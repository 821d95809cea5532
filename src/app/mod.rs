//! Application state and logic for the TUI.
//!
//! [`App`] owns the [`ChatState`] and drives it from key events and from
//! [`AppMessage`] completions. Network calls run on spawned tokio tasks
//! that report back over an unbounded channel, so every state mutation
//! happens on the UI loop.

mod commands;
mod handlers;
mod messages;

pub use commands::SlashCommand;
pub use messages::AppMessage;

use std::future::Future;
use std::path::PathBuf;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::adapters::ReqwestHttpClient;
use crate::flow::MessageFlow;
use crate::models::ImageAttachment;
use crate::session::ChatSession;
use crate::store::ConversationStore;
use crate::traits::HttpClient;
use crate::view::{AlertLevel, ChatState};

/// Which pane receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Composer,
    Conversations,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Composer => Focus::Conversations,
            Focus::Conversations => Focus::Composer,
        }
    }
}

/// Lines moved per PageUp/PageDown.
pub const PAGE_SCROLL_LINES: u16 = 5;

pub struct App<H: HttpClient + 'static = ReqwestHttpClient> {
    pub state: ChatState,
    pub session: ChatSession<H>,
    pub focus: Focus,
    pub should_quit: bool,
    /// Set when state changed since the last draw
    pub needs_redraw: bool,
    /// Frame counter for the typing spinner
    pub tick_count: u64,
    message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Taken by the run loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
}

impl<H: HttpClient + 'static> App<H> {
    pub fn new(session: ChatSession<H>, project_id: Option<i64>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            state: ChatState::new(project_id),
            session,
            focus: Focus::default(),
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            message_tx,
            message_rx: Some(message_rx),
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Advance animations and expire alerts.
    pub fn tick(&mut self, now: Instant) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.state.tick(now) {
            self.mark_dirty();
        }
        if self.state.messages.indicator().is_shown() && self.tick_count % 8 == 0 {
            self.mark_dirty();
        }
    }

    /// Run `fut` on a tokio task and deliver its message to the UI loop.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = AppMessage> + Send + 'static,
    {
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let message = fut.await;
            if tx.send(message).is_err() {
                tracing::debug!("UI loop gone, dropping completion");
            }
        });
    }

    /// Kick off the startup listing and the backend status probe.
    pub fn start(&mut self) {
        let request = ConversationStore::<H>::begin_list(&self.state);
        let api = self.session.api().clone();
        self.spawn(async move {
            AppMessage::StartupListed {
                request,
                result: api.list_conversations().await,
            }
        });
        self.check_status();
    }

    pub fn refresh_conversations(&mut self) {
        let request = ConversationStore::<H>::begin_list(&self.state);
        let api = self.session.api().clone();
        self.spawn(async move {
            AppMessage::ConversationsListed {
                request,
                result: api.list_conversations().await,
            }
        });
    }

    pub fn new_conversation(&mut self) {
        let request = ConversationStore::<H>::begin_create(&self.state);
        let api = self.session.api().clone();
        self.spawn(async move {
            AppMessage::ConversationCreated(api.create_conversation(&request).await)
        });
    }

    /// Make a conversation active and load it.
    pub fn select_conversation(&mut self, conversation_id: &str) {
        ConversationStore::<H>::select(&mut self.state, conversation_id);
        self.load_messages(conversation_id);
    }

    fn load_messages(&mut self, conversation_id: &str) {
        MessageFlow::<H>::begin_load(&mut self.state, conversation_id);
        let api = self.session.api().clone();
        let conversation_id = conversation_id.to_string();
        self.spawn(async move {
            let result = api.fetch_messages(&conversation_id).await;
            AppMessage::MessagesLoaded {
                conversation_id,
                result,
            }
        });
    }

    /// Enter in the composer: run a slash command or send the message.
    pub fn submit(&mut self) {
        if let Some(parsed) = SlashCommand::parse(self.state.composer.text()) {
            self.state.composer.clear_text();
            match parsed {
                Ok(command) => self.run_command(command),
                Err(message) => {
                    self.state.alert(AlertLevel::Warning, message);
                }
            }
            return;
        }

        let pending = match MessageFlow::<H>::begin_submit(&mut self.state) {
            Ok(pending) => pending,
            Err(_) => return,
        };
        let flow = self.session.flow.clone();
        self.spawn(async move {
            let result = flow.deliver(&pending).await;
            AppMessage::SendFinished {
                conversation_id: pending.conversation_id,
                result,
            }
        });
    }

    pub fn run_command(&mut self, command: SlashCommand) {
        tracing::debug!("Running command {:?}", command);
        match command {
            SlashCommand::New => self.new_conversation(),
            SlashCommand::Project { name, description } => {
                self.create_project(&name, &description)
            }
            SlashCommand::Image(path) => self.attach_image(path),
            SlashCommand::ClearImage => {
                self.state.composer.clear_image();
            }
            SlashCommand::Status => self.check_status(),
            SlashCommand::Refresh => self.refresh_conversations(),
            SlashCommand::Recent => self.open_recent(),
            SlashCommand::Help => {
                let text = SlashCommand::help_entries()
                    .iter()
                    .map(|(usage, description)| format!("{}  {}", usage, description))
                    .collect::<Vec<_>>()
                    .join("\n");
                self.state.alert(AlertLevel::Info, text);
            }
            SlashCommand::Quit => self.quit(),
        }
    }

    /// Look up the most recently updated conversation and open it.
    pub fn open_recent(&mut self) {
        let api = self.session.api().clone();
        self.spawn(async move { AppMessage::RecentFound(api.recent_conversation().await) });
    }

    pub fn create_project(&mut self, name: &str, description: &str) {
        let request = match ChatSession::<H>::begin_create_project(&mut self.state, name, description)
        {
            Ok(request) => request,
            Err(_) => return,
        };
        let api = self.session.api().clone();
        self.spawn(async move { AppMessage::ProjectCreated(api.create_project(&request).await) });
    }

    pub fn check_status(&mut self) {
        let api = self.session.api().clone();
        self.spawn(async move { AppMessage::StatusChecked(api.ollama_status().await) });
    }

    pub fn attach_image(&mut self, path: PathBuf) {
        self.spawn(async move { AppMessage::ImageLoaded(ImageAttachment::load(path).await) });
    }
}
