//! Terminal widgets for the luachat client.
//!
//! # Architecture
//!
//! The crate is organized into:
//! - `widgets` - ratatui widgets (header, footer, chat transcript, chat list, input, dialogs)
//! - `theme` - Colors, styles, and visual constants
//! - `utils` - Text wrapping, truncation, time formatting
//!
//! # Usage
//!
//! Components are data-agnostic. Callers map their domain types into the
//! small view structs defined here (`ChatBubble`, `ChatListItem`).

pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;
pub use utils::{format_date, format_time, truncate, wrap_words};
pub use widgets::chat::{BubbleRole, ChatBubble, ChatWidget};
pub use widgets::chat_list::{ChatListItem, ChatListWidget};
pub use widgets::dialogs::{centered_rect, ConfirmDialog};
pub use widgets::footer::Footer;
pub use widgets::header::{Header, StatusIndicator};
pub use widgets::input::InputBox;
