//! Reusable TUI widgets.

pub mod chat;
pub mod chat_list;
pub mod dialogs;
pub mod footer;
pub mod header;
pub mod input;
