//! Footer with key help on the left and badges on the right.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::theme::Theme;

#[derive(Debug, Clone)]
pub struct Footer<'a> {
    help: &'a str,
    badges: &'a [&'a str],
    theme: Theme,
}

impl<'a> Footer<'a> {
    pub fn new(help: &'a str) -> Self {
        Self {
            help,
            badges: &[],
            theme: Theme::default(),
        }
    }

    pub fn badges(mut self, badges: &'a [&'a str]) -> Self {
        self.badges = badges;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn badge_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for badge in self.badges {
            spans.push(Span::styled(format!("[{}]", badge), self.theme.assistant_style()));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let badge_width: u16 = self
            .badges
            .iter()
            .map(|b| b.chars().count() as u16 + 3)
            .sum();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(badge_width)])
            .split(area);

        let help = Paragraph::new(self.help).style(self.theme.muted_style());
        frame.render_widget(help, chunks[0]);

        let badges = Paragraph::new(self.badge_line()).alignment(Alignment::Right);
        frame.render_widget(badges, chunks[1]);
    }
}
