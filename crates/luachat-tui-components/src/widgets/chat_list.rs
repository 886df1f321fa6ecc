//! Sidebar listing stored conversations.

use chrono::{DateTime, Utc};
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::theme::Theme;
use crate::utils::{format_date, truncate};

/// One conversation entry.
#[derive(Debug, Clone)]
pub struct ChatListItem {
    pub title: String,
    pub preview: String,
    pub timestamp: DateTime<Utc>,
}

/// Chat history sidebar.
#[derive(Debug, Clone)]
pub struct ChatListWidget<'a> {
    items: &'a [ChatListItem],
    /// Row under the keyboard cursor.
    cursor: usize,
    /// Row of the conversation currently shown.
    active: Option<usize>,
    focused: bool,
    theme: Theme,
}

impl<'a> ChatListWidget<'a> {
    pub fn new(items: &'a [ChatListItem]) -> Self {
        Self {
            items,
            cursor: 0,
            active: None,
            focused: false,
            theme: Theme::default(),
        }
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn active(mut self, active: Option<usize>) -> Self {
        self.active = active;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            self.theme.focused_border()
        } else {
            self.theme.unfocused_border()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Chat History ");

        if self.items.is_empty() {
            let empty = Paragraph::new("No conversations yet.")
                .style(self.theme.muted_style())
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let text_width = area.width.saturating_sub(4) as usize;

        let rows: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let marker = if self.active == Some(i) { "● " } else { "  " };
                let title_style = if self.active == Some(i) {
                    self.theme.title_style()
                } else {
                    self.theme.bold_style()
                };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(marker, self.theme.title_style()),
                        Span::styled(truncate(&item.title, text_width.saturating_sub(2)), title_style),
                    ]),
                    Line::from(Span::styled(
                        format!("  {}", truncate(&item.preview, text_width.saturating_sub(2))),
                        self.theme.muted_style(),
                    )),
                    Line::from(Span::styled(
                        format!("  {}", format_date(item.timestamp)),
                        self.theme.muted_style().add_modifier(Modifier::DIM),
                    )),
                ])
            })
            .collect();

        let list = List::new(rows)
            .block(block)
            .highlight_style(self.theme.selected_style());

        let mut state = ListState::default();
        if self.focused {
            state.select(Some(self.cursor.min(self.items.len() - 1)));
        }

        frame.render_stateful_widget(list, area, &mut state);
    }
}
