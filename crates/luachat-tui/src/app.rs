//! Application state and main event loop.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{error, info};

use luachat_core::{Action, ChatSession, Command, MessageId};

use crate::event::{BackendCommand, UiEvent};
use crate::state::{self, Focus, UiState};
use crate::ui;

/// Main application: the chat session, view state and channel handles.
pub struct App {
    /// Conversation state; changed only through `ChatSession::update`.
    session: ChatSession,

    /// Focus, cursors and scrolling.
    state: UiState,

    /// Receiver for events from the backend.
    ui_rx: mpsc::Receiver<UiEvent>,

    /// Sender for commands to the backend.
    cmd_tx: mpsc::Sender<BackendCommand>,
}

impl App {
    pub fn new(ui_rx: mpsc::Receiver<UiEvent>, cmd_tx: mpsc::Sender<BackendCommand>) -> Self {
        Self {
            session: ChatSession::new(),
            state: UiState::default(),
            ui_rx,
            cmd_tx,
        }
    }

    /// Run the main event loop until the user quits.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> std::io::Result<()> {
        self.start();

        loop {
            terminal.draw(|frame| ui::render(frame, &self.session, &self.state))?;

            // Poll terminal events (non-blocking with short timeout)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            // Process backend events (non-blocking)
            while let Ok(event) = self.ui_rx.try_recv() {
                self.apply_event(event);
            }

            self.state.tick();

            if self.state.should_quit {
                break;
            }
        }

        let _ = self.cmd_tx.blocking_send(BackendCommand::Quit);

        Ok(())
    }

    /// Initial view: a fresh conversation plus the stored chat list.
    fn start(&mut self) {
        info!("Starting chat session");
        self.dispatch(Action::StartNewChat);
        self.dispatch(Action::LoadChatList);
    }

    /// Feed an action to the session and forward whatever it asks for.
    fn dispatch(&mut self, action: Action) {
        let before = transcript_marker(&self.session);

        if let Some(command) = self.session.update(action) {
            self.send_command(command);
        }

        if transcript_marker(&self.session) != before {
            self.state.scroll_back = 0;
        }
        self.state.clamp_cursor(self.session.chats().len());
        if !self.session.sidebar_visible() {
            self.state.focus = Focus::Input;
        }
        self.state.input_cursor = self
            .state
            .input_cursor
            .min(self.session.pending_input().chars().count());
    }

    fn send_command(&self, command: Command) {
        if let Err(e) = self.cmd_tx.blocking_send(BackendCommand::Run(command)) {
            error!(error = %e, "Backend is gone, command dropped");
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Completed(action) => {
                self.state.last_error = failure(&action).map(str::to_string);
                self.dispatch(action);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.state.confirm_delete.is_some() {
            self.handle_confirm_key(key.code);
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.state.should_quit = true,
                KeyCode::Char('n') => {
                    self.dispatch(Action::StartNewChat);
                    self.state.focus = Focus::Input;
                }
                KeyCode::Char('b') => self.dispatch(Action::ToggleSidebar),
                KeyCode::Char('r') => self.dispatch(Action::LoadChatList),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::PageUp => self.state.scroll_up(),
            KeyCode::PageDown => self.state.scroll_down(),
            KeyCode::Tab => self.toggle_focus(),
            _ => match self.state.focus {
                Focus::Input => self.handle_input_key(key),
                Focus::Sidebar => self.handle_sidebar_key(key.code),
            },
        }
    }

    fn toggle_focus(&mut self) {
        let focus = self.state.focus;
        self.state.focus = match focus {
            Focus::Input => {
                if !self.session.sidebar_visible() {
                    self.dispatch(Action::SetSidebarVisible(true));
                }
                if let Some(selected) = self.session.selected_chat_id() {
                    if let Some(pos) = self.session.chats().iter().position(|c| &c.id == selected) {
                        self.state.sidebar_cursor = pos;
                    }
                }
                Focus::Sidebar
            }
            Focus::Sidebar => Focus::Input,
        };
    }

    fn handle_confirm_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if let Some(chat_id) = self.state.confirm_delete.take() {
                    info!(chat_id = %chat_id, "Deleting chat");
                    self.dispatch(Action::DeleteChat(chat_id));
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.state.confirm_delete = None;
            }
            _ => {}
        }
    }

    fn handle_sidebar_key(&mut self, code: KeyCode) {
        let cursor_chat = self
            .session
            .chats()
            .get(self.state.sidebar_cursor)
            .map(|c| c.id.clone());

        match code {
            KeyCode::Up | KeyCode::Char('k') => self.state.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.select_next(self.session.chats().len())
            }
            KeyCode::Enter => {
                if let Some(chat_id) = cursor_chat {
                    self.dispatch(Action::OpenChat(chat_id));
                    self.state.focus = Focus::Input;
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                self.state.confirm_delete = cursor_chat;
            }
            KeyCode::Esc => self.state.focus = Focus::Input,
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        if self.session.is_waiting_for_reply() {
            return;
        }

        let mut text = self.session.pending_input().to_string();
        let mut cursor = self.state.input_cursor;

        match key.code {
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                cursor = state::insert_char(&mut text, cursor, '\n');
            }
            KeyCode::Enter => {
                self.dispatch(Action::SubmitInput);
                if self.session.pending_input().is_empty() {
                    self.state.input_cursor = 0;
                }
                return;
            }
            KeyCode::Char(c) => cursor = state::insert_char(&mut text, cursor, c),
            KeyCode::Backspace => cursor = state::backspace(&mut text, cursor),
            KeyCode::Delete => state::delete_at(&mut text, cursor),
            KeyCode::Left => cursor = cursor.saturating_sub(1),
            KeyCode::Right => cursor = (cursor + 1).min(text.chars().count()),
            KeyCode::Home => cursor = 0,
            KeyCode::End => cursor = text.chars().count(),
            _ => return,
        }

        self.state.input_cursor = cursor;
        if text != self.session.pending_input() {
            self.dispatch(Action::SetInput(text));
        }
    }
}

/// Changes whenever the transcript gains, loses or swaps messages.
fn transcript_marker(session: &ChatSession) -> (usize, Option<MessageId>) {
    let messages = session.messages();
    (messages.len(), messages.last().map(|m| m.id.clone()))
}

/// Failure description carried by a completion action, if any.
fn failure(action: &Action) -> Option<&str> {
    match action {
        Action::ChatListLoaded(Err(e))
        | Action::MessagesLoaded { result: Err(e), .. }
        | Action::ChatDeleted { result: Err(e), .. }
        | Action::MessageSent(Err(e)) => Some(e.as_str()),
        _ => None,
    }
}
