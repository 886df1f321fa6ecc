//! Message entry box.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::theme::Theme;

/// Text input with an inline cursor and placeholder.
#[derive(Debug, Clone)]
pub struct InputBox<'a> {
    text: &'a str,
    /// Cursor position in characters.
    cursor: usize,
    placeholder: &'a str,
    focused: bool,
    disabled: bool,
    theme: Theme,
}

impl<'a> InputBox<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            cursor: text.chars().count(),
            placeholder: "",
            focused: false,
            disabled: false,
            theme: Theme::default(),
        }
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// A disabled box ignores input and shows no cursor.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Text as shown, with the cursor drawn when editable and focused.
    fn display_text(&self) -> String {
        if self.text.is_empty() && (self.disabled || !self.focused) {
            return self.placeholder.to_string();
        }
        if self.focused && !self.disabled {
            let chars: Vec<char> = self.text.chars().collect();
            let cursor_pos = self.cursor.min(chars.len());
            let before: String = chars[..cursor_pos].iter().collect();
            let after: String = chars[cursor_pos..].iter().collect();
            format!("{}│{}", before, after)
        } else {
            self.text.to_string()
        }
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused && !self.disabled {
            self.theme.focused_border()
        } else {
            self.theme.unfocused_border()
        };

        let (title, text_style) = if self.disabled {
            (" Waiting for reply... ", self.theme.muted_style())
        } else if self.text.is_empty() && !self.focused {
            (" Message ", self.theme.muted_style())
        } else {
            (
                " Message (Enter to send, Alt+Enter for newline) ",
                Style::default().fg(Color::White),
            )
        };

        let input = Paragraph::new(self.display_text())
            .style(text_style)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(title),
            );

        frame.render_widget(input, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_is_unicode_safe() {
        let input = InputBox::new("añb").cursor(2).focused(true);
        assert_eq!(input.display_text(), "añ│b");
    }

    #[test]
    fn test_placeholder_when_empty_and_unfocused() {
        let input = InputBox::new("").placeholder("Ask about Lua 5.4...");
        assert_eq!(input.display_text(), "Ask about Lua 5.4...");

        let focused = InputBox::new("").placeholder("Ask").focused(true);
        assert_eq!(focused.display_text(), "│");
    }

    #[test]
    fn test_disabled_hides_cursor() {
        let input = InputBox::new("draft").focused(true).disabled(true);
        assert_eq!(input.display_text(), "draft");
    }
}
