//! Input pane: the console textarea
//!
//! Shows the snippet being edited with line numbers and light syntax
//! highlighting, and places the terminal cursor at the insertion point.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Title of the textarea pane
pub const INPUT_TITLE: &str = " Console Textarea ";

const GUTTER_WIDTH: u16 = 5;

const KEYWORDS: &[&str] = &[
    "let", "const", "var", "if", "else", "while", "return", "typeof",
];
const LITERALS: &[&str] = &["true", "false", "null", "undefined", "NaN", "Infinity"];

/// Highlight one line of script text
fn highlight_line(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        let (len, style) = if rest.starts_with("//") {
            (rest.len(), Style::default().fg(DEFAULT_THEME.comment))
        } else if c == '"' || c == '\'' {
            (string_len(rest, c), Style::default().fg(DEFAULT_THEME.string))
        } else if c.is_ascii_digit() {
            let len = rest
                .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '.'))
                .unwrap_or(rest.len());
            (len, Style::default().fg(DEFAULT_THEME.number))
        } else if c.is_alphabetic() || c == '_' || c == '$' {
            let len = rest
                .find(|ch: char| !(ch.is_alphanumeric() || ch == '_' || ch == '$'))
                .unwrap_or(rest.len());
            let word = &rest[..len];
            let is_call = rest[len..].starts_with('(');
            (len, word_style(word, is_call))
        } else {
            let style = match c {
                '{' | '}' | '(' | ')' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            (c.len_utf8(), style)
        };

        spans.push(Span::styled(&rest[..len], style));
        rest = &rest[len..];
    }

    Line::from(spans)
}

/// Byte length of a string literal starting at `rest`, unterminated runs to end of line
fn string_len(rest: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, ch) in rest.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return i + ch.len_utf8();
        }
    }
    rest.len()
}

fn word_style(word: &str, is_call: bool) -> Style {
    if KEYWORDS.contains(&word) {
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD)
    } else if LITERALS.contains(&word) {
        Style::default().fg(DEFAULT_THEME.number)
    } else if is_call {
        Style::default().fg(DEFAULT_THEME.function)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    }
}

/// Render the input pane. `cursor` is the (row, column) of the insertion point.
pub fn render_input_pane(
    frame: &mut Frame,
    area: Rect,
    source: &str,
    cursor: (usize, usize),
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(INPUT_TITLE)
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let (cursor_row, cursor_col) = cursor;

    // Keep the cursor row on screen
    if cursor_row < *scroll_offset {
        *scroll_offset = cursor_row;
    } else if cursor_row >= *scroll_offset + visible_height {
        *scroll_offset = cursor_row + 1 - visible_height;
    }

    if source.is_empty() {
        let placeholder = Paragraph::new(Line::from(vec![
            Span::styled(format!("{:>4} ", 1), Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                "type a snippet, then press Ctrl+R",
                Style::default()
                    .fg(DEFAULT_THEME.comment)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]))
        .block(block);
        frame.render_widget(placeholder, area);
    } else {
        // `lines()` drops a trailing empty line, which the cursor may sit on
        let lines: Vec<&str> = source.split('\n').collect();
        let visible: Vec<Line> = lines
            .iter()
            .enumerate()
            .skip(*scroll_offset)
            .take(visible_height)
            .map(|(idx, line)| {
                let num_style = if idx == cursor_row && is_focused {
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(DEFAULT_THEME.comment)
                };
                let mut spans = vec![Span::styled(format!("{:>4} ", idx + 1), num_style)];
                spans.extend(highlight_line(line).spans);
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(visible).block(block), area);
    }

    if is_focused {
        let x = area.x + 1 + GUTTER_WIDTH + cursor_col as u16;
        let y = area.y + 1 + (cursor_row - *scroll_offset) as u16;
        if x < area.right().saturating_sub(1) && y < area.bottom().saturating_sub(1) {
            frame.set_cursor_position((x, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_highlight_splits_tokens() {
        let line = highlight_line(r#"return "a b";"#);
        assert_eq!(texts(&line), vec!["return", " ", "\"a b\"", ";"]);
        assert_eq!(line.spans[0].style.fg, Some(DEFAULT_THEME.keyword));
        assert_eq!(line.spans[2].style.fg, Some(DEFAULT_THEME.string));
    }

    #[test]
    fn test_highlight_comment_runs_to_end() {
        let line = highlight_line("x // note 'q'");
        assert_eq!(texts(&line).last().map(String::as_str), Some("// note 'q'"));
    }

    #[test]
    fn test_string_len_handles_escapes_and_unterminated() {
        assert_eq!(string_len(r#"'it\'s' + 1"#, '\''), 7);
        assert_eq!(string_len("\"open", '"'), 5);
    }

    #[test]
    fn test_call_is_highlighted() {
        let line = highlight_line("console.log(1)");
        assert_eq!(line.spans[2].content, "log");
        assert_eq!(line.spans[2].style.fg, Some(DEFAULT_THEME.function));
    }
}
