//! Colors and styles shared by every widget.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the chat client.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Focused borders and titles.
    pub accent: Color,
    /// "Ready" status and the "No" answer in dialogs.
    pub success: Color,
    /// Pending reply, spinner, confirmation borders.
    pub warning: Color,
    /// Failed requests and destructive answers.
    pub error: Color,
    /// Timestamps, previews, placeholders, idle borders.
    pub muted: Color,
    pub user: Color,
    pub assistant: Color,
    /// Background of the cursor row in lists.
    pub selection: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            muted: Color::DarkGray,
            user: Color::LightBlue,
            assistant: Color::LightGreen,
            selection: Color::Rgb(40, 44, 52),
        }
    }
}

impl Theme {
    pub fn focused_border(&self) -> Style {
        Style::new().fg(self.accent)
    }

    pub fn unfocused_border(&self) -> Style {
        Style::new().fg(self.muted)
    }

    pub fn warning_style(&self) -> Style {
        Style::new().fg(self.warning)
    }

    pub fn muted_style(&self) -> Style {
        Style::new().fg(self.muted)
    }

    pub fn bold_style(&self) -> Style {
        Style::new().add_modifier(Modifier::BOLD)
    }

    /// Accent color in bold; app title and the active chat.
    pub fn title_style(&self) -> Style {
        self.bold_style().fg(self.accent)
    }

    pub fn user_style(&self) -> Style {
        Style::new().fg(self.user)
    }

    pub fn assistant_style(&self) -> Style {
        Style::new().fg(self.assistant)
    }

    pub fn selected_style(&self) -> Style {
        Style::new().bg(self.selection)
    }
}
