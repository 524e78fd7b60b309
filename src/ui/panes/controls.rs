//! Control buttons between the input and the log

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};

/// Clickable console controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlButton {
    Run,
    Clear,
    Previous,
    Next,
}

impl ControlButton {
    pub const ALL: [ControlButton; 4] = [
        ControlButton::Run,
        ControlButton::Clear,
        ControlButton::Previous,
        ControlButton::Next,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ControlButton::Run => " [>_] Run ",
            ControlButton::Clear => " Clear ",
            ControlButton::Previous => " < Previous ",
            ControlButton::Next => " Next > ",
        }
    }
}

/// Which buttons currently have something to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub can_run: bool,
    pub can_clear: bool,
    pub has_history: bool,
}

impl ControlState {
    fn is_enabled(&self, button: ControlButton) -> bool {
        match button {
            ControlButton::Run => self.can_run,
            ControlButton::Clear => self.can_clear,
            ControlButton::Previous | ControlButton::Next => self.has_history,
        }
    }
}

/// Screen rectangle of each button inside `area`, left to right with a
/// one-column gap. Buttons that do not fit are omitted.
pub fn button_areas(area: Rect) -> Vec<(ControlButton, Rect)> {
    let mut x = area.x + 1;
    let mut areas = Vec::with_capacity(ControlButton::ALL.len());

    for button in ControlButton::ALL {
        let width = button.label().len() as u16;
        if x + width > area.right() {
            break;
        }
        areas.push((button, Rect::new(x, area.y, width, 1)));
        x += width + 1;
    }

    areas
}

/// Button under a mouse position, if any
pub fn hit_test(area: Rect, column: u16, row: u16) -> Option<ControlButton> {
    if row != area.y {
        return None;
    }
    button_areas(area)
        .into_iter()
        .find(|(_, rect)| column >= rect.x && column < rect.right())
        .map(|(button, _)| button)
}

pub fn render_controls(frame: &mut Frame, area: Rect, state: ControlState) {
    for (button, rect) in button_areas(area) {
        let style = if !state.is_enabled(button) {
            Style::default()
                .bg(DEFAULT_THEME.button_bg)
                .fg(DEFAULT_THEME.comment)
        } else if button == ControlButton::Run {
            Style::default()
                .bg(DEFAULT_THEME.button_run_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(DEFAULT_THEME.button_bg)
                .fg(DEFAULT_THEME.fg)
        };

        frame.render_widget(Paragraph::new(button.label()).style(style), rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_are_laid_out_left_to_right() {
        let areas = button_areas(Rect::new(0, 5, 80, 1));
        assert_eq!(areas.len(), 4);
        assert_eq!(areas[0].1, Rect::new(1, 5, 10, 1));
        assert_eq!(areas[1].1.x, 12);
        assert!(areas.windows(2).all(|w| w[0].1.right() < w[1].1.x));
    }

    #[test]
    fn test_hit_test() {
        let area = Rect::new(0, 5, 80, 1);
        assert_eq!(hit_test(area, 1, 5), Some(ControlButton::Run));
        assert_eq!(hit_test(area, 10, 5), Some(ControlButton::Run));
        assert_eq!(hit_test(area, 11, 5), None);
        assert_eq!(hit_test(area, 12, 5), Some(ControlButton::Clear));
        assert_eq!(hit_test(area, 1, 4), None);
    }

    #[test]
    fn test_narrow_area_drops_buttons() {
        let areas = button_areas(Rect::new(0, 0, 20, 1));
        assert_eq!(areas.len(), 2);
    }
}
