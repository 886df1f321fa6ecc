//! Application header: title, connection status and current conversation.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::theme::Theme;
use crate::utils::truncate;

/// Short coloured status label, e.g. `[Ready]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusIndicator {
    pub label: String,
    pub color: Color,
}

impl StatusIndicator {
    pub fn new(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }

    pub fn success(label: impl Into<String>) -> Self {
        Self::new(label, Theme::default().success)
    }

    pub fn warning(label: impl Into<String>) -> Self {
        Self::new(label, Theme::default().warning)
    }

    pub fn error(label: impl Into<String>) -> Self {
        Self::new(label, Theme::default().error)
    }
}

#[derive(Debug, Clone)]
pub struct Header<'a> {
    title: &'a str,
    status: Option<StatusIndicator>,
    /// Title of the open conversation, if any.
    subtitle: Option<&'a str>,
    theme: Theme,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            status: None,
            subtitle: None,
            theme: Theme::default(),
        }
    }

    pub fn status(mut self, status: StatusIndicator) -> Self {
        self.status = Some(status);
        self
    }

    pub fn subtitle(mut self, subtitle: Option<&'a str>) -> Self {
        self.subtitle = subtitle;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn title_spans(&self) -> Vec<Span<'static>> {
        let mut spans = vec![Span::styled(
            format!(" {} ", self.title),
            self.theme.title_style(),
        )];
        if let Some(status) = &self.status {
            spans.push(Span::styled(
                format!("[{}]", status.label),
                Style::default().fg(status.color),
            ));
            spans.push(Span::raw(" "));
        }
        spans
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(40)])
            .split(area);

        let left = Paragraph::new(Line::from(self.title_spans()))
            .block(Block::default().borders(Borders::ALL).border_style(self.theme.unfocused_border()));
        frame.render_widget(left, chunks[0]);

        let width = chunks[1].width.saturating_sub(4) as usize;
        let label = match self.subtitle {
            Some(title) => Span::styled(format!(" {}", truncate(title, width)), self.theme.bold_style()),
            None => Span::styled(" New conversation", self.theme.muted_style()),
        };
        let right = Paragraph::new(Line::from(label))
            .block(Block::default().borders(Borders::ALL).border_style(self.theme.unfocused_border()));
        frame.render_widget(right, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_includes_status_label() {
        let header = Header::new("Lua & Perception AI Assistant")
            .status(StatusIndicator::warning("Thinking..."));
        let spans = header.title_spans();

        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].content, "[Thinking...]");
        assert_eq!(spans[1].style.fg, Some(Color::Yellow));
    }
}
