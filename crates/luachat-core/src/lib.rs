//! luachat Core Domain Types
//!
//! This crate contains the chat domain and the session controller with no
//! dependencies on:
//! - Network/HTTP
//! - Terminal rendering
//! - Runtime specifics
//!
//! The controller (`ChatSession`) is a plain state machine. It emits
//! [`Command`]s for the outside world to perform and consumes their outcomes
//! as [`Action`]s.

pub mod chat;
pub mod error;
pub mod ids;
pub mod session;

// Re-export commonly used types
pub use chat::{ChatSummary, Message, Role};
pub use error::CoreError;
pub use ids::{ChatId, MessageId};
pub use session::{
    Action, ChatSession, Command, SendReceipt, ERROR_REPLY_TEXT, WELCOME_TEXT,
};
