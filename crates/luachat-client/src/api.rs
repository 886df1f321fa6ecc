//! Abstraction over the remote chat service.

use async_trait::async_trait;

use luachat_core::{ChatId, ChatSummary, Message, SendReceipt};

use crate::error::ClientError;

/// The four operations the chat interface needs from the server.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// List all stored conversations.
    async fn list_chats(&self) -> Result<Vec<ChatSummary>, ClientError>;

    /// Fetch the full history of one conversation.
    async fn chat_messages(&self, chat_id: &ChatId) -> Result<Vec<Message>, ClientError>;

    /// Send user text. `chat_id: None` starts a new conversation.
    async fn send_message(
        &self,
        message: &str,
        chat_id: Option<&ChatId>,
    ) -> Result<SendReceipt, ClientError>;

    /// Delete a conversation.
    async fn delete_chat(&self, chat_id: &ChatId) -> Result<(), ClientError>;
}
