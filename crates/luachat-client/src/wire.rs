//! JSON shapes exchanged with the chat API and their domain conversions.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use luachat_core::{ChatId, ChatSummary, CoreError, Message, Role, SendReceipt};

/// Body of `POST /chat`.
#[derive(Debug, Serialize)]
pub struct SendRequest<'a> {
    pub message: &'a str,
    /// `null` asks the server to start a new chat.
    pub chat_id: Option<&'a str>,
}

/// Entry of `GET /chats`.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub last_message: Option<String>,
    /// Missing, null or unreadable values leave the entry undated.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<ChatResponse> for ChatSummary {
    fn from(chat: ChatResponse) -> Self {
        ChatSummary {
            id: ChatId::new(chat.id),
            title: chat.title.unwrap_or_default(),
            last_message_preview: chat.last_message.unwrap_or_default(),
            // Undated entries show the epoch rather than failing the list.
            timestamp: chat.timestamp.unwrap_or_default(),
        }
    }
}

/// Entry of `GET /chat/{id}/messages`.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// `user` or `bot`.
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    #[serde(deserialize_with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl TryFrom<MessageResponse> for Message {
    type Error = CoreError;

    fn try_from(msg: MessageResponse) -> Result<Self, Self::Error> {
        let role: Role = msg.kind.parse()?;
        Ok(Message::new(msg.id, role, msg.content, msg.timestamp))
    }
}

/// A stored message as echoed back by `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct MessageRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub content: String,
    #[serde(deserialize_with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl MessageRecord {
    fn into_message(self, role: Role) -> Message {
        Message::new(self.id, role, self.content, self.timestamp)
    }
}

/// Response of `POST /chat`. Both records are required.
#[derive(Debug, Deserialize)]
pub struct SendResponse {
    #[serde(deserialize_with = "id_string")]
    pub chat_id: String,
    pub user_message: MessageRecord,
    pub bot_response: MessageRecord,
}

impl From<SendResponse> for SendReceipt {
    fn from(resp: SendResponse) -> Self {
        SendReceipt {
            chat_id: ChatId::new(resp.chat_id),
            user_message: resp.user_message.into_message(Role::User),
            assistant_message: resp.bot_response.into_message(Role::Assistant),
        }
    }
}

/// Ids arrive as JSON numbers or strings.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// ISO-8601 with or without an offset; naive values are taken as UTC.
fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
