//! View state that lives beside the chat session.

use luachat_core::ChatId;

/// Lines moved per PageUp/PageDown.
pub const PAGE_LINES: usize = 10;

/// Which pane receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Sidebar,
}

/// Terminal-only state: focus, cursors and scrolling.
#[derive(Debug, Default)]
pub struct UiState {
    /// Pane receiving keys.
    pub focus: Focus,

    /// Highlighted row in the chat list.
    pub sidebar_cursor: usize,

    /// Cursor position in the input, in characters.
    pub input_cursor: usize,

    /// Transcript lines scrolled up from the newest message.
    pub scroll_back: usize,

    /// Frame counter for the waiting spinner.
    pub spinner_frame: usize,

    /// Chat awaiting delete confirmation.
    pub confirm_delete: Option<ChatId>,

    /// Description of the most recent failed request.
    pub last_error: Option<String>,

    pub should_quit: bool,
}

impl UiState {
    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.sidebar_cursor = (self.sidebar_cursor + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.sidebar_cursor = self.sidebar_cursor.saturating_sub(1);
    }

    /// Keep the sidebar cursor inside a list of `len` rows.
    pub fn clamp_cursor(&mut self, len: usize) {
        self.sidebar_cursor = self.sidebar_cursor.min(len.saturating_sub(1));
    }

    pub fn scroll_up(&mut self) {
        self.scroll_back = self.scroll_back.saturating_add(PAGE_LINES);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_back = self.scroll_back.saturating_sub(PAGE_LINES);
    }

    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }
}

/// Byte offset of the `cursor`-th character, or the end of `text`.
fn byte_index(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

/// Insert `ch` at `cursor`; returns the new cursor.
pub fn insert_char(text: &mut String, cursor: usize, ch: char) -> usize {
    text.insert(byte_index(text, cursor), ch);
    cursor + 1
}

/// Remove the character before `cursor`; returns the new cursor.
pub fn backspace(text: &mut String, cursor: usize) -> usize {
    if cursor == 0 {
        return 0;
    }
    delete_at(text, cursor - 1);
    cursor - 1
}

/// Remove the character at `cursor`, if any.
pub fn delete_at(text: &mut String, cursor: usize) {
    if let Some((idx, ch)) = text.char_indices().nth(cursor) {
        text.replace_range(idx..idx + ch.len_utf8(), "");
    }
}
