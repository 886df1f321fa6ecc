//! Chat session controller.
//!
//! `ChatSession` owns every piece of client-side state for the conversation
//! list and the viewed conversation. It never performs I/O: operations that
//! need the server return a [`Command`], and the outcome of that command comes
//! back through [`ChatSession::update`] as an [`Action`].
//!
//! A single exchange moves `Idle -> Sending -> {Resolved, Failed} -> Idle`.
//! While sending, further sends are rejected.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::chat::{ChatSummary, Message};
use crate::ids::{ChatId, MessageId};

/// Greeting shown at the top of every new conversation.
pub const WELCOME_TEXT: &str = "Hello! I'm your Lua & Perception API assistant. I can help you \
with Lua 5.4 programming and the Perception API, especially for creating watermarks and visual \
elements. How can I assist you today?";

/// Assistant notice appended when a send fails.
pub const ERROR_REPLY_TEXT: &str = "Sorry, I encountered an error. Please try again.";

/// Server-confirmed result of a send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    /// Conversation the exchange was stored in (newly created if none was given).
    pub chat_id: ChatId,
    /// Canonical record of the text the user sent.
    pub user_message: Message,
    /// The assistant's reply.
    pub assistant_message: Message,
}

/// Work the session needs done by the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch all chat summaries.
    FetchChatList,
    /// Fetch the full history of one chat.
    FetchMessages(ChatId),
    /// Send user text; `chat_id: None` asks the server to create a chat.
    SendMessage {
        message: String,
        chat_id: Option<ChatId>,
    },
    /// Delete a chat on the server.
    DeleteChat(ChatId),
}

/// Inputs to the session: user intents and command completions.
///
/// Failures carry a description only; every transport, status and decoding
/// problem is handled the same way.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    StartNewChat,
    LoadChatList,
    OpenChat(ChatId),
    DeleteChat(ChatId),
    SendMessage(String),
    /// Send whatever is in the input buffer.
    SubmitInput,
    SetInput(String),
    ToggleSidebar,
    SetSidebarVisible(bool),

    ChatListLoaded(Result<Vec<ChatSummary>, String>),
    MessagesLoaded {
        chat_id: ChatId,
        result: Result<Vec<Message>, String>,
    },
    ChatDeleted {
        chat_id: ChatId,
        result: Result<(), String>,
    },
    MessageSent(Result<SendReceipt, String>),
}

/// Bookkeeping for the one send allowed in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct InFlightSend {
    provisional_id: MessageId,
    /// Conversation generation the send was issued in.
    generation: u64,
}

/// Client-side state of the chat interface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatSession {
    messages: Vec<Message>,
    chats: Vec<ChatSummary>,
    selected_chat_id: Option<ChatId>,
    pending_input: String,
    is_waiting_for_reply: bool,
    sidebar_visible: bool,

    in_flight: Option<InFlightSend>,
    /// Chat whose history was most recently requested.
    opening: Option<ChatId>,
    /// Bumped whenever `messages` is swapped for another conversation.
    generation: u64,
}

impl ChatSession {
    /// Create an empty session: no messages, no chats, nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Single entry point for every state transition.
    pub fn update(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::StartNewChat => {
                self.start_new_chat();
                None
            }
            Action::LoadChatList => Some(self.load_chat_list()),
            Action::OpenChat(chat_id) => Some(self.open_chat(chat_id)),
            Action::DeleteChat(chat_id) => Some(self.delete_chat(chat_id)),
            Action::SendMessage(text) => self.send_message(&text),
            Action::SubmitInput => self.submit_input(),
            Action::SetInput(text) => {
                self.set_input(text);
                None
            }
            Action::ToggleSidebar => {
                self.toggle_sidebar();
                None
            }
            Action::SetSidebarVisible(visible) => {
                self.sidebar_visible = visible;
                None
            }
            Action::ChatListLoaded(result) => {
                self.apply_chat_list(result);
                None
            }
            Action::MessagesLoaded { chat_id, result } => {
                self.apply_messages(chat_id, result);
                None
            }
            Action::ChatDeleted { chat_id, result } => {
                self.apply_deleted(chat_id, result);
                None
            }
            Action::MessageSent(result) => self.apply_send_result(result),
        }
    }

    /// Reset the view to an unsaved conversation holding only the greeting.
    pub fn start_new_chat(&mut self) {
        self.messages = vec![Message::local_assistant(WELCOME_TEXT)];
        self.selected_chat_id = None;
        self.sidebar_visible = false;
        self.opening = None;
        self.generation += 1;
    }

    pub fn load_chat_list(&mut self) -> Command {
        Command::FetchChatList
    }

    pub fn open_chat(&mut self, chat_id: ChatId) -> Command {
        self.opening = Some(chat_id.clone());
        Command::FetchMessages(chat_id)
    }

    /// Removal happens only once the server acknowledges the delete.
    pub fn delete_chat(&mut self, chat_id: ChatId) -> Command {
        Command::DeleteChat(chat_id)
    }

    /// Optimistically append `text` and return the request to send it.
    ///
    /// Returns `None` without touching state when `text` is blank or a reply
    /// is still pending.
    pub fn send_message(&mut self, text: &str) -> Option<Command> {
        if text.trim().is_empty() {
            return None;
        }
        if self.is_waiting_for_reply {
            debug!("Send ignored while a reply is pending");
            return None;
        }

        let message = Message::provisional_user(text);
        self.in_flight = Some(InFlightSend {
            provisional_id: message.id.clone(),
            generation: self.generation,
        });
        self.messages.push(message);
        self.pending_input.clear();
        self.is_waiting_for_reply = true;

        Some(Command::SendMessage {
            message: text.to_string(),
            chat_id: self.selected_chat_id.clone(),
        })
    }

    pub fn submit_input(&mut self) -> Option<Command> {
        let text = self.pending_input.clone();
        self.send_message(&text)
    }

    pub fn set_input(&mut self, text: String) {
        self.pending_input = text;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_visible = !self.sidebar_visible;
    }

    fn apply_chat_list(&mut self, result: Result<Vec<ChatSummary>, String>) {
        match result {
            Ok(chats) => {
                debug!(count = chats.len(), "Chat list replaced");
                self.chats = chats;
            }
            Err(error) => warn!(error = %error, "Failed to load chat history"),
        }
    }

    fn apply_messages(&mut self, chat_id: ChatId, result: Result<Vec<Message>, String>) {
        if self.opening.as_ref() != Some(&chat_id) {
            debug!(chat_id = %chat_id, "Discarding history for a chat no longer being opened");
            return;
        }
        self.opening = None;

        match result {
            Ok(messages) => {
                debug!(chat_id = %chat_id, count = messages.len(), "Opened chat");
                self.messages = messages;
                self.selected_chat_id = Some(chat_id);
                self.generation += 1;
            }
            Err(error) => warn!(chat_id = %chat_id, error = %error, "Failed to load chat messages"),
        }
    }

    fn apply_deleted(&mut self, chat_id: ChatId, result: Result<(), String>) {
        if let Err(error) = result {
            warn!(chat_id = %chat_id, error = %error, "Failed to delete chat");
            return;
        }

        info!(chat_id = %chat_id, "Deleted chat");
        self.chats.retain(|chat| chat.id != chat_id);
        if self.opening.as_ref() == Some(&chat_id) {
            self.opening = None;
        }
        if self.selected_chat_id.as_ref() == Some(&chat_id) {
            self.start_new_chat();
        }
    }

    /// Reconcile the optimistic message with the server's answer.
    ///
    /// A completion for a conversation that has since been replaced leaves
    /// the view alone.
    fn apply_send_result(&mut self, result: Result<SendReceipt, String>) -> Option<Command> {
        let Some(in_flight) = self.in_flight.take() else {
            warn!("Send completion arrived with no send in flight");
            return None;
        };
        self.is_waiting_for_reply = false;
        let same_conversation = in_flight.generation == self.generation;

        match result {
            Ok(receipt) => {
                info!(chat_id = %receipt.chat_id, "Message sent");
                if same_conversation {
                    let confirmed = Message {
                        provisional: false,
                        ..receipt.user_message
                    };
                    match self
                        .messages
                        .iter_mut()
                        .find(|m| m.id == in_flight.provisional_id)
                    {
                        Some(slot) => *slot = confirmed,
                        None => self.messages.push(confirmed),
                    }
                    self.messages.push(receipt.assistant_message);
                    self.selected_chat_id = Some(receipt.chat_id);
                } else {
                    debug!("Conversation changed while sending, view left untouched");
                }
                Some(Command::FetchChatList)
            }
            Err(error) => {
                warn!(error = %error, "Error sending message");
                if same_conversation {
                    self.messages.push(Message::local_assistant(ERROR_REPLY_TEXT));
                }
                None
            }
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn chats(&self) -> &[ChatSummary] {
        &self.chats
    }

    pub fn selected_chat_id(&self) -> Option<&ChatId> {
        self.selected_chat_id.as_ref()
    }

    /// Summary of the selected chat, if it is in the list.
    pub fn selected_chat(&self) -> Option<&ChatSummary> {
        let id = self.selected_chat_id.as_ref()?;
        self.chats.iter().find(|c| &c.id == id)
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn is_waiting_for_reply(&self) -> bool {
        self.is_waiting_for_reply
    }

    pub fn sidebar_visible(&self) -> bool {
        self.sidebar_visible
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::chat::Role;

    fn summary(id: &str) -> ChatSummary {
        ChatSummary {
            id: ChatId::new(id),
            title: format!("Chat {}", id),
            last_message_preview: "...".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    fn server_message(id: &str, role: Role, content: &str) -> Message {
        Message::new(
            id,
            role,
            content,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 5).unwrap(),
        )
    }

    fn receipt(chat_id: &str, user: &str, reply: &str) -> SendReceipt {
        SendReceipt {
            chat_id: ChatId::new(chat_id),
            user_message: server_message("42", Role::User, user),
            assistant_message: server_message("43", Role::Assistant, reply),
        }
    }

    fn session_with_chats(ids: &[&str]) -> ChatSession {
        let mut session = ChatSession::new();
        session.start_new_chat();
        session.update(Action::ChatListLoaded(Ok(ids.iter().map(|id| summary(id)).collect())));
        session
    }

    #[test]
    fn test_new_chat_shows_welcome() {
        let mut session = ChatSession::new();
        session.toggle_sidebar();
        session.start_new_chat();

        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::Assistant);
        assert_eq!(session.messages()[0].content, WELCOME_TEXT);
        assert!(session.selected_chat_id().is_none());
        assert!(!session.sidebar_visible());

        session.start_new_chat();
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn test_metatable_exchange() {
        let mut session = ChatSession::new();
        session.start_new_chat();

        let command = session.send_message("What is a metatable?");
        assert_eq!(
            command,
            Some(Command::SendMessage {
                message: "What is a metatable?".to_string(),
                chat_id: None,
            })
        );
        assert_eq!(session.messages().len(), 2);
        assert!(session.messages()[1].provisional);
        assert_eq!(session.messages()[1].content, "What is a metatable?");
        assert!(session.is_waiting_for_reply());

        let follow_up = session.update(Action::MessageSent(Ok(receipt(
            "c1",
            "What is a metatable?",
            "A metatable is...",
        ))));

        assert_eq!(follow_up, Some(Command::FetchChatList));
        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content, WELCOME_TEXT);
        assert_eq!(messages[1].id, MessageId::new("42"));
        assert_eq!(messages[1].role, Role::User);
        assert!(!messages[1].provisional);
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[2].content, "A metatable is...");
        assert_eq!(session.selected_chat_id(), Some(&ChatId::new("c1")));
        assert!(!session.is_waiting_for_reply());
    }

    #[test]
    fn test_failed_refresh_after_send_keeps_conversation() {
        let mut session = session_with_chats(&["c0"]);
        session.send_message("What is a metatable?");

        let refresh = session.update(Action::MessageSent(Ok(receipt(
            "c1",
            "What is a metatable?",
            "A metatable is...",
        ))));
        assert_eq!(refresh, Some(Command::FetchChatList));
        let reconciled = session.messages().to_vec();

        session.update(Action::ChatListLoaded(Err("HTTP 500".to_string())));

        assert_eq!(session.messages(), reconciled.as_slice());
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.selected_chat_id(), Some(&ChatId::new("c1")));
        assert_eq!(session.chats().len(), 1);
        assert!(!session.is_waiting_for_reply());
    }

    #[test]
    fn test_send_reuses_selected_chat() {
        let mut session = session_with_chats(&["c1"]);
        session.open_chat(ChatId::new("c1"));
        session.update(Action::MessagesLoaded {
            chat_id: ChatId::new("c1"),
            result: Ok(vec![]),
        });

        let command = session.send_message("again");
        assert_eq!(
            command,
            Some(Command::SendMessage {
                message: "again".to_string(),
                chat_id: Some(ChatId::new("c1")),
            })
        );
    }

    #[test]
    fn test_blank_send_is_noop() {
        let mut session = ChatSession::new();
        session.start_new_chat();
        session.set_input("   \n\t".to_string());

        assert_eq!(session.send_message(""), None);
        assert_eq!(session.submit_input(), None);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.pending_input(), "   \n\t");
        assert!(!session.is_waiting_for_reply());
    }

    #[test]
    fn test_second_send_rejected_while_waiting() {
        let mut session = ChatSession::new();
        session.start_new_chat();

        assert!(session.send_message("first").is_some());
        session.set_input("second".to_string());
        assert_eq!(session.submit_input(), None);

        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.pending_input(), "second");
    }

    #[test]
    fn test_failed_send_keeps_user_message() {
        let mut session = ChatSession::new();
        session.start_new_chat();
        session.set_input("hello".to_string());
        session.submit_input();
        assert_eq!(session.pending_input(), "");

        let follow_up = session.update(Action::MessageSent(Err("HTTP 500".to_string())));

        assert_eq!(follow_up, None);
        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].content, "hello");
        assert!(messages[1].provisional);
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[2].content, ERROR_REPLY_TEXT);
        assert!(!session.is_waiting_for_reply());
        assert!(session.selected_chat_id().is_none());
    }

    #[test]
    fn test_send_result_after_switching_chats_leaves_view_alone() {
        let mut session = session_with_chats(&["c1", "c2"]);
        session.send_message("question");

        session.open_chat(ChatId::new("c2"));
        let history = vec![server_message("9", Role::User, "older")];
        session.update(Action::MessagesLoaded {
            chat_id: ChatId::new("c2"),
            result: Ok(history.clone()),
        });

        let follow_up =
            session.update(Action::MessageSent(Ok(receipt("c1", "question", "answer"))));

        assert_eq!(follow_up, Some(Command::FetchChatList));
        assert_eq!(session.messages(), history.as_slice());
        assert_eq!(session.selected_chat_id(), Some(&ChatId::new("c2")));
        assert!(!session.is_waiting_for_reply());
    }

    #[test]
    fn test_open_chat_replaces_messages() {
        let mut session = session_with_chats(&["c1"]);
        let command = session.open_chat(ChatId::new("c1"));
        assert_eq!(command, Command::FetchMessages(ChatId::new("c1")));

        let history = vec![
            server_message("1", Role::User, "hi"),
            server_message("2", Role::Assistant, "hello"),
        ];
        session.update(Action::MessagesLoaded {
            chat_id: ChatId::new("c1"),
            result: Ok(history.clone()),
        });

        assert_eq!(session.messages(), history.as_slice());
        assert_eq!(session.selected_chat_id(), Some(&ChatId::new("c1")));
        assert_eq!(session.selected_chat().map(|c| c.title.as_str()), Some("Chat c1"));
    }

    #[test]
    fn test_open_chat_failure_leaves_state() {
        let mut session = session_with_chats(&["c1"]);
        let before = session.messages().to_vec();

        session.open_chat(ChatId::new("c1"));
        session.update(Action::MessagesLoaded {
            chat_id: ChatId::new("c1"),
            result: Err("connection refused".to_string()),
        });

        assert_eq!(session.messages(), before.as_slice());
        assert!(session.selected_chat_id().is_none());
    }

    #[test]
    fn test_stale_open_is_discarded() {
        let mut session = session_with_chats(&["c1", "c2"]);
        session.open_chat(ChatId::new("c1"));
        session.open_chat(ChatId::new("c2"));

        session.update(Action::MessagesLoaded {
            chat_id: ChatId::new("c1"),
            result: Ok(vec![server_message("1", Role::User, "from c1")]),
        });
        assert!(session.selected_chat_id().is_none());

        session.update(Action::MessagesLoaded {
            chat_id: ChatId::new("c2"),
            result: Ok(vec![server_message("2", Role::User, "from c2")]),
        });
        assert_eq!(session.selected_chat_id(), Some(&ChatId::new("c2")));
        assert_eq!(session.messages()[0].content, "from c2");
    }

    #[test]
    fn test_delete_removes_only_that_chat() {
        let mut session = session_with_chats(&["c1", "c2", "c3"]);

        let command = session.update(Action::DeleteChat(ChatId::new("c2")));
        assert_eq!(command, Some(Command::DeleteChat(ChatId::new("c2"))));
        assert_eq!(session.chats().len(), 3);

        session.update(Action::ChatDeleted {
            chat_id: ChatId::new("c2"),
            result: Ok(()),
        });

        let ids: Vec<&str> = session.chats().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c3"]);
    }

    #[test]
    fn test_delete_selected_chat_starts_new_chat() {
        let mut session = session_with_chats(&["c1", "c2"]);
        session.open_chat(ChatId::new("c1"));
        session.update(Action::MessagesLoaded {
            chat_id: ChatId::new("c1"),
            result: Ok(vec![server_message("1", Role::User, "hi")]),
        });
        session.toggle_sidebar();

        session.update(Action::ChatDeleted {
            chat_id: ChatId::new("c1"),
            result: Ok(()),
        });

        assert!(session.selected_chat_id().is_none());
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, WELCOME_TEXT);
        assert!(!session.sidebar_visible());
    }

    #[test]
    fn test_history_arriving_after_delete_is_discarded() {
        let mut session = session_with_chats(&["c1", "c2"]);
        session.open_chat(ChatId::new("c1"));

        session.update(Action::ChatDeleted {
            chat_id: ChatId::new("c1"),
            result: Ok(()),
        });
        session.update(Action::MessagesLoaded {
            chat_id: ChatId::new("c1"),
            result: Ok(vec![server_message("1", Role::User, "gone")]),
        });

        assert!(session.selected_chat_id().is_none());
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, WELCOME_TEXT);
    }

    #[test]
    fn test_delete_failure_keeps_summary() {
        let mut session = session_with_chats(&["c1"]);
        session.update(Action::ChatDeleted {
            chat_id: ChatId::new("c1"),
            result: Err("HTTP 404 Not Found".to_string()),
        });
        assert_eq!(session.chats().len(), 1);
    }

    #[test]
    fn test_chat_list_failure_keeps_prior_list() {
        let mut session = session_with_chats(&["c1", "c2"]);
        assert_eq!(session.update(Action::LoadChatList), Some(Command::FetchChatList));

        session.update(Action::ChatListLoaded(Err("timeout".to_string())));
        assert_eq!(session.chats().len(), 2);

        session.update(Action::ChatListLoaded(Ok(vec![summary("c9")])));
        assert_eq!(session.chats().len(), 1);
        assert_eq!(session.chats()[0].id, ChatId::new("c9"));
    }

    #[test]
    fn test_session_state_serializes() {
        let mut session = ChatSession::new();
        session.start_new_chat();
        session.send_message("hi");

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["is_waiting_for_reply"], true);
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["provisional"], true);
    }
}
