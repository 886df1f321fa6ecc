//! Runs session commands against a [`ChatApi`].

use tracing::{debug, warn};

use luachat_core::{Action, Command};

use crate::api::ChatApi;
use crate::error::ClientError;

/// Perform one command and return the action that completes it.
///
/// Transport, status and decoding errors all collapse into the failure
/// string carried by the action.
pub async fn execute<A: ChatApi + ?Sized>(api: &A, command: Command) -> Action {
    match command {
        Command::FetchChatList => {
            debug!("Fetching chat list");
            Action::ChatListLoaded(api.list_chats().await.map_err(describe))
        }
        Command::FetchMessages(chat_id) => {
            debug!(chat_id = %chat_id, "Fetching chat messages");
            let result = api.chat_messages(&chat_id).await.map_err(describe);
            Action::MessagesLoaded { chat_id, result }
        }
        Command::SendMessage { message, chat_id } => {
            debug!(chat_id = ?chat_id, len = message.len(), "Sending message");
            Action::MessageSent(
                api.send_message(&message, chat_id.as_ref())
                    .await
                    .map_err(describe),
            )
        }
        Command::DeleteChat(chat_id) => {
            debug!(chat_id = %chat_id, "Deleting chat");
            let result = api.delete_chat(&chat_id).await.map_err(describe);
            Action::ChatDeleted { chat_id, result }
        }
    }
}

fn describe(err: ClientError) -> String {
    warn!(error = %err, "API request failed");
    err.to_string()
}
