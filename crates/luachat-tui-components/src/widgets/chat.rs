//! Chat transcript widget.

use chrono::{DateTime, Utc};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::theme::Theme;
use crate::utils::{format_time, wrap_words};

/// Spinner frames for the "Thinking..." bubble.
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Who a bubble belongs to. User bubbles hug the right edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleRole {
    User,
    Assistant,
}

/// A single message as the transcript shows it.
#[derive(Debug, Clone)]
pub struct ChatBubble {
    pub role: BubbleRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Not yet confirmed by the server.
    pub pending: bool,
}

/// Scrollable transcript of chat bubbles.
#[derive(Debug, Clone)]
pub struct ChatWidget<'a> {
    bubbles: &'a [ChatBubble],
    /// Spinner frame when a reply is pending.
    thinking: Option<usize>,
    /// Lines scrolled up from the bottom (0 = follow newest).
    scroll_back: usize,
    theme: Theme,
}

impl<'a> ChatWidget<'a> {
    /// Create a new chat widget.
    pub fn new(bubbles: &'a [ChatBubble]) -> Self {
        Self {
            bubbles,
            thinking: None,
            scroll_back: 0,
            theme: Theme::default(),
        }
    }

    /// Show the "Thinking..." bubble using the given spinner frame.
    pub fn thinking(mut self, frame: Option<usize>) -> Self {
        self.thinking = frame;
        self
    }

    /// Scroll up from the newest line.
    pub fn scroll_back(mut self, lines: usize) -> Self {
        self.scroll_back = lines;
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Build every transcript line for the given inner width.
    fn lines(&self, text_width: usize) -> Vec<Line<'static>> {
        // Bubbles take at most 80% of the pane.
        let bubble_width = (text_width * 4 / 5).max(10);
        let mut all_lines: Vec<Line<'static>> = Vec::new();

        for bubble in self.bubbles {
            let (label, style, alignment) = match bubble.role {
                BubbleRole::User => ("You", self.theme.user_style(), Alignment::Right),
                BubbleRole::Assistant => {
                    ("Assistant", self.theme.assistant_style(), Alignment::Left)
                }
            };

            let mut header = vec![
                Span::styled(label, style.add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!(" {}", format_time(bubble.timestamp)),
                    self.theme.muted_style(),
                ),
            ];
            if bubble.pending {
                header.push(Span::styled(" (sending)", self.theme.muted_style()));
            }
            all_lines.push(Line::from(header).alignment(alignment));

            for wrapped in wrap_words(&bubble.content, bubble_width, " ") {
                all_lines.push(Line::from(Span::styled(wrapped, style)).alignment(alignment));
            }

            all_lines.push(Line::from(""));
        }

        if let Some(frame) = self.thinking {
            all_lines.push(Line::from(vec![
                Span::styled(
                    "Assistant ",
                    self.theme.assistant_style().add_modifier(Modifier::BOLD),
                ),
                Span::styled(SPINNER[frame % SPINNER.len()], self.theme.warning_style()),
            ]));
            all_lines.push(Line::from(Span::styled(
                " Thinking...",
                self.theme.muted_style(),
            )));
        }

        all_lines
    }

    /// Render the widget.
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let visible_height = area.height.saturating_sub(2) as usize;
        let text_width = area.width.saturating_sub(2) as usize;

        let all_lines = self.lines(text_width);
        let total_lines = all_lines.len();

        let max_scroll = total_lines.saturating_sub(visible_height);
        let scroll_offset = max_scroll.saturating_sub(self.scroll_back);

        let lines: Vec<Line> = all_lines
            .into_iter()
            .skip(scroll_offset)
            .take(visible_height)
            .collect();

        // Accent border while the view is detached from the newest line.
        let (title, border_style) = if scroll_offset < max_scroll {
            (
                format!(" Chat [{} more below] ", max_scroll - scroll_offset),
                self.theme.focused_border(),
            )
        } else {
            (" Chat ".to_string(), self.theme.unfocused_border())
        };

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );

        frame.render_widget(paragraph, area);
    }
}
