//! Text helpers for the chat widgets.

use chrono::{DateTime, Local, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Word-wrap `text` to `width` display columns, prefixing each line with
/// `indent`.
///
/// Explicit newlines are kept, blank lines included, and so is the leading
/// whitespace of every source line (code samples keep their indentation).
/// Words wider than the available space are split mid-word.
pub fn wrap_words(text: &str, width: usize, indent: &str) -> Vec<String> {
    let room = width.saturating_sub(indent.width());
    if room == 0 {
        return vec![format!("{}{}", indent, text)];
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let body = paragraph.trim_start_matches(' ');
        let lead = &paragraph[..paragraph.len() - body.len()];

        let mut line = String::from(lead);
        let mut line_width = lead.width();
        let mut has_word = false;

        for word in body.split(' ') {
            let word_width = word.width();
            let gap = usize::from(has_word);

            if line_width + gap + word_width <= room {
                if has_word {
                    line.push(' ');
                }
                line.push_str(word);
                line_width += gap + word_width;
                has_word = true;
                continue;
            }

            if has_word {
                lines.push(format!("{}{}", indent, line));
                line.clear();
                line_width = 0;
            }

            for ch in word.chars() {
                let w = char_width(ch);
                if line_width + w > room && line_width > 0 {
                    lines.push(format!("{}{}", indent, line));
                    line.clear();
                    line_width = 0;
                }
                line.push(ch);
                line_width += w;
            }
            has_word = true;
        }

        lines.push(format!("{}{}", indent, line));
    }

    lines
}

/// Shorten `text` to at most `max_width` columns, ending in "..." when cut.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width < 3 {
        return text.chars().take(max_width).collect();
    }

    let budget = max_width - 3;
    let mut used = 0;
    let kept: String = text
        .chars()
        .take_while(|&ch| {
            used += char_width(ch);
            used <= budget
        })
        .collect();
    format!("{}...", kept)
}

/// Message time in local time, e.g. `14:05`.
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

/// Short local date for list entries, e.g. `Mar 1`.
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%b %-d").to_string()
}
