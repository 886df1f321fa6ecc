//! Modal confirmation dialog.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::theme::Theme;

/// Create a centered rectangle within the given area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

const DIALOG_WIDTH: u16 = 50;

/// Yes/no prompt drawn over the rest of the screen.
#[derive(Debug, Clone)]
pub struct ConfirmDialog<'a> {
    title: &'a str,
    message: &'a str,
    /// Shown under the message, e.g. the conversation title.
    detail: Option<&'a str>,
    theme: Theme,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(title: &'a str, message: &'a str) -> Self {
        Self {
            title,
            message,
            detail: None,
            theme: Theme::default(),
        }
    }

    pub fn detail(mut self, detail: &'a str) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn render(self, frame: &mut Frame) {
        let height = if self.detail.is_some() { 9 } else { 7 };
        let area = centered_rect(DIALOG_WIDTH, height, frame.area());

        frame.render_widget(Clear, area);

        let mut lines = vec![Line::from(""), Line::from(self.message)];
        if let Some(detail) = self.detail {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(detail, self.theme.bold_style())));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                "[Y]",
                Style::default()
                    .fg(self.theme.error)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("es  "),
            Span::styled(
                "[N]",
                Style::default()
                    .fg(self.theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("o"),
        ]));

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .borders(Borders::ALL)
                    .border_style(self.theme.warning_style()),
            )
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
    }
}
