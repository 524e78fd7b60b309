//! Log pane: one entry per evaluated snippet

use crate::console::{Console, Evaluator};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Padding},
    Frame,
};

/// View of one run for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry<'a> {
    pub index: usize,
    pub source: &'a str,
    pub result: &'a str,
    pub failed: bool,
}

impl LogEntry<'_> {
    /// First non-blank line of the snippet, used as the entry header
    pub fn headline(&self) -> &str {
        self.source
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("")
    }

    /// Rows this entry takes up in the pane
    pub fn height(&self) -> usize {
        1 + self.result.split('\n').count()
    }
}

/// Pair each history entry with its evaluation
pub fn log_entries<E: Evaluator>(console: &Console<E>) -> Vec<LogEntry<'_>> {
    console
        .code_history()
        .iter()
        .zip(console.script_evaluation())
        .enumerate()
        .map(|(index, (source, result))| LogEntry {
            index,
            source,
            result,
            failed: console.is_failed(index),
        })
        .collect()
}

/// Smallest first-item offset that still shows the last entry at the bottom
fn follow_offset(entries: &[LogEntry], visible_height: usize) -> usize {
    let mut used = 0;
    for (i, entry) in entries.iter().enumerate().rev() {
        used += entry.height();
        if used > visible_height {
            return (i + 1).min(entries.len() - 1);
        }
    }
    0
}

fn entry_item(entry: &LogEntry) -> ListItem<'static> {
    let more = if entry.source.trim().lines().count() > 1 {
        " …"
    } else {
        ""
    };
    let header = Line::from(vec![
        Span::styled(
            format!("[{}] ", entry.index + 1),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            "> ",
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{}{}", entry.headline(), more),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
    ]);

    let result_style = if entry.failed {
        Style::default().fg(DEFAULT_THEME.error)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };

    let mut lines = vec![header];
    lines.extend(
        entry
            .result
            .split('\n')
            .map(|line| Line::styled(format!("  {}", line), result_style)),
    );

    ListItem::new(Text::from(lines))
}

/// Render the log pane.
///
/// `scroll_offset` is the index of the first visible entry. It is clamped so
/// the last entry stays reachable; `usize::MAX` follows the newest entry.
pub fn render_log_pane(
    frame: &mut Frame,
    area: Rect,
    entries: &[LogEntry],
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
        .title(format!(" Log ({}) ", entries.len()))
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 0, 0, 0));

    if entries.is_empty() {
        *scroll_offset = 0;
        frame.render_widget(block, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = (*scroll_offset).min(follow_offset(entries, visible_height));

    let items: Vec<ListItem> = entries.iter().map(entry_item).collect();
    let mut state = ListState::default().with_offset(*scroll_offset);
    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(index: usize, result: &'static str) -> LogEntry<'static> {
        LogEntry {
            index,
            source: "x",
            result,
            failed: false,
        }
    }

    #[test]
    fn test_headline_skips_blank_lines() {
        let e = LogEntry {
            index: 0,
            source: "\n  let a = 1;\nreturn a;",
            result: "1",
            failed: false,
        };
        assert_eq!(e.headline(), "let a = 1;");
        assert_eq!(e.height(), 2);
    }

    #[test]
    fn test_follow_offset() {
        let entries = [entry(0, "a"), entry(1, "b\nc"), entry(2, "d")];
        // heights 2, 3, 2
        assert_eq!(follow_offset(&entries, 10), 0);
        assert_eq!(follow_offset(&entries, 5), 1);
        assert_eq!(follow_offset(&entries, 2), 2);
        assert_eq!(follow_offset(&entries, 1), 2);
    }
}
