//! Main render function for the TUI.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;

use luachat_core::ChatSession;
use luachat_tui_components::{
    BubbleRole, ChatBubble, ChatListItem, ChatListWidget, ChatWidget, ConfirmDialog, Footer,
    Header, InputBox, StatusIndicator, Theme,
};

use crate::state::{Focus, UiState};

const TITLE: &str = "Lua & Perception AI Assistant";
const PLACEHOLDER: &str = "Ask about Lua 5.4 or Perception API...";
const BADGES: [&str; 2] = ["Lua 5.4 Expert", "Perception API Specialist"];
const HELP: &str = " Enter: send  Tab: history  ^N: new  ^B: sidebar  ^R: reload  ^C: quit";
const SIDEBAR_WIDTH: u16 = 32;

/// Render the entire UI.
pub fn render(frame: &mut Frame, session: &ChatSession, state: &UiState) {
    let theme = Theme::default();

    let [header_area, body_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header_area, session, state, &theme);

    let chat_area = if session.sidebar_visible() {
        let [sidebar_area, chat_area] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)])
                .areas(body_area);
        render_sidebar(frame, sidebar_area, session, state, &theme);
        chat_area
    } else {
        body_area
    };

    let bubbles = chat_bubbles(session);
    let thinking = session
        .is_waiting_for_reply()
        .then_some(state.spinner_frame);
    ChatWidget::new(&bubbles)
        .thinking(thinking)
        .scroll_back(state.scroll_back)
        .theme(theme.clone())
        .render(frame, chat_area);

    InputBox::new(session.pending_input())
        .cursor(state.input_cursor)
        .placeholder(PLACEHOLDER)
        .focused(state.focus == Focus::Input && state.confirm_delete.is_none())
        .disabled(session.is_waiting_for_reply())
        .theme(theme.clone())
        .render(frame, input_area);

    Footer::new(HELP)
        .badges(&BADGES)
        .theme(theme.clone())
        .render(frame, footer_area);

    if let Some(chat_id) = &state.confirm_delete {
        let title = session
            .chats()
            .iter()
            .find(|c| &c.id == chat_id)
            .map(|c| c.title.as_str())
            .unwrap_or("");
        ConfirmDialog::new("Delete chat", "Delete this conversation?")
            .detail(title)
            .theme(theme)
            .render(frame);
    }
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    session: &ChatSession,
    state: &UiState,
    theme: &Theme,
) {
    let status = if session.is_waiting_for_reply() {
        StatusIndicator::warning("Thinking...")
    } else if state.last_error.is_some() {
        StatusIndicator::error("Request failed")
    } else {
        StatusIndicator::success("Ready")
    };

    Header::new(TITLE)
        .status(status)
        .subtitle(session.selected_chat().map(|c| c.title.as_str()))
        .theme(theme.clone())
        .render(frame, area);
}

fn render_sidebar(
    frame: &mut Frame,
    area: Rect,
    session: &ChatSession,
    state: &UiState,
    theme: &Theme,
) {
    let items: Vec<ChatListItem> = session
        .chats()
        .iter()
        .map(|chat| ChatListItem {
            title: chat.title.clone(),
            preview: chat.last_message_preview.clone(),
            timestamp: chat.timestamp,
        })
        .collect();
    let active = session
        .selected_chat_id()
        .and_then(|id| session.chats().iter().position(|c| &c.id == id));

    ChatListWidget::new(&items)
        .cursor(state.sidebar_cursor)
        .active(active)
        .focused(state.focus == Focus::Sidebar)
        .theme(theme.clone())
        .render(frame, area);
}

fn chat_bubbles(session: &ChatSession) -> Vec<ChatBubble> {
    session
        .messages()
        .iter()
        .map(|message| ChatBubble {
            role: if message.is_user() {
                BubbleRole::User
            } else {
                BubbleRole::Assistant
            },
            content: message.content.clone(),
            timestamp: message.timestamp,
            pending: message.provisional,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use luachat_core::{Action, ChatId, ChatSummary};

    use super::*;

    fn screen(session: &ChatSession, state: &UiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| render(frame, session, state)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_new_chat_screen() {
        let mut session = ChatSession::new();
        session.start_new_chat();
        let text = screen(&session, &UiState::default());

        assert!(text.contains(TITLE));
        assert!(text.contains("[Ready]"));
        assert!(text.contains("Lua 5.4 Expert"));
        assert!(text.contains("Perception API Specialist"));
        assert!(!text.contains("Chat History"));
    }

    #[test]
    fn test_waiting_screen_shows_thinking() {
        let mut session = ChatSession::new();
        session.start_new_chat();
        let _ = session.send_message("What is a metatable?");
        let text = screen(&session, &UiState::default());

        assert!(text.contains("Thinking..."));
        assert!(text.contains("What is a metatable?"));
        assert!(text.contains("Waiting for reply"));
    }

    #[test]
    fn test_sidebar_and_delete_dialog() {
        let mut session = ChatSession::new();
        session.start_new_chat();
        session.update(Action::ChatListLoaded(Ok(vec![ChatSummary {
            id: ChatId::new("1"),
            title: "Metatables".to_string(),
            last_message_preview: "A metatable is...".to_string(),
            timestamp: chrono::Utc::now(),
        }])));
        session.update(Action::SetSidebarVisible(true));

        let state = UiState {
            focus: Focus::Sidebar,
            confirm_delete: Some(ChatId::new("1")),
            ..Default::default()
        };
        let text = screen(&session, &state);

        assert!(text.contains("Chat History"));
        assert!(text.contains("Delete this conversation?"));
        assert!(text.contains("Metatables"));
    }
}
