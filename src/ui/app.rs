//! Main TUI application state and logic

use crate::console::Console;
use crate::ui::editor::Editor;
use crate::ui::panes::{self, ControlButton, ControlState, StatusRenderData};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Input,
    Log,
}

impl FocusedPane {
    /// Move focus to the other pane
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Input => FocusedPane::Log,
            FocusedPane::Log => FocusedPane::Input,
        }
    }
}

/// Pane rectangles from the last frame, used for mouse hit testing
#[derive(Debug, Clone, Copy, Default)]
struct PaneAreas {
    input: Rect,
    controls: Rect,
    log: Rect,
}

/// The main application state
pub struct App {
    /// Console state: input buffer, history, evaluations
    pub console: Console,

    /// Insertion point in the input buffer
    pub editor: Editor,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub input_scroll: usize,
    pub log_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    areas: PaneAreas,
}

impl App {
    /// Create a new app around `console`, with the cursor after any preloaded text
    pub fn new(console: Console) -> Self {
        let editor = Editor::at_end(console.source_code());
        App {
            console,
            editor,
            focused_pane: FocusedPane::Input,
            input_scroll: 0,
            log_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            areas: PaneAreas::default(),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        tracing::info!("console UI started");

        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_event(key);
                    }
                    Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                    Event::Paste(text) => self.paste(&text),
                    _ => {}
                }
            }
        }

        tracing::info!(entries = self.console.len(), "console UI stopped");
        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Input | controls | log | status bar
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(size);

        self.areas = PaneAreas {
            input: chunks[0],
            controls: chunks[1],
            log: chunks[2],
        };

        let source = self.console.source_code();
        panes::render_input_pane(
            frame,
            chunks[0],
            source,
            self.editor.position(source),
            self.focused_pane == FocusedPane::Input,
            &mut self.input_scroll,
        );

        panes::render_controls(frame, chunks[1], self.control_state());

        let entries = panes::log_entries(&self.console);
        panes::render_log_pane(
            frame,
            chunks[2],
            &entries,
            self.focused_pane == FocusedPane::Log,
            &mut self.log_scroll,
        );

        let last_failed = self
            .console
            .len()
            .checked_sub(1)
            .is_some_and(|last| self.console.is_failed(last));
        panes::render_status_bar(
            frame,
            chunks[3],
            StatusRenderData {
                message: &self.status_message,
                entries: self.console.len(),
                cursor: self.console.cursor().position(),
                last_failed,
            },
        );
    }

    fn control_state(&self) -> ControlState {
        ControlState {
            can_run: !self.console.source_code().trim().is_empty(),
            can_clear: !self.console.source_code().is_empty(),
            has_history: !self.console.is_empty(),
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Char('r') | KeyCode::Char('R') if ctrl => self.run_console(),
            KeyCode::F(5) => self.run_console(),
            KeyCode::Char('l') | KeyCode::Char('L') if ctrl => self.clear_console(),
            KeyCode::Char('p') | KeyCode::Char('P') if ctrl => self.recall_previous(),
            KeyCode::Char('n') | KeyCode::Char('N') if ctrl => self.recall_next(),
            KeyCode::Up if alt => self.recall_previous(),
            KeyCode::Down if alt => self.recall_next(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.next();
            }
            _ => match self.focused_pane {
                FocusedPane::Input => self.edit_input(key),
                FocusedPane::Log => self.scroll_log(key.code),
            },
        }
    }

    /// Handle mouse events: button clicks, pane focus, log scrolling
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(button) = panes::hit_test(self.areas.controls, mouse.column, mouse.row)
                {
                    self.press(button);
                } else if self.areas.input.contains(position) {
                    self.focused_pane = FocusedPane::Input;
                } else if self.areas.log.contains(position) {
                    self.focused_pane = FocusedPane::Log;
                }
            }
            MouseEventKind::ScrollUp if self.areas.log.contains(position) => {
                self.log_scroll = self.log_scroll.saturating_sub(1);
            }
            MouseEventKind::ScrollDown if self.areas.log.contains(position) => {
                self.log_scroll = self.log_scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    /// Trigger a control as if its button had been clicked
    pub fn press(&mut self, button: ControlButton) {
        match button {
            ControlButton::Run => self.run_console(),
            ControlButton::Clear => self.clear_console(),
            ControlButton::Previous => self.recall_previous(),
            ControlButton::Next => self.recall_next(),
        }
    }

    /// Insert text at the cursor, as typed
    pub fn paste(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        self.editor
            .insert_str(self.console.source_code_mut(), &normalized);
    }

    fn edit_input(&mut self, key: KeyEvent) {
        let text = self.console.source_code_mut();
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.editor.insert(text, c);
            }
            KeyCode::Enter => self.editor.insert(text, '\n'),
            KeyCode::Backspace => self.editor.backspace(text),
            KeyCode::Delete => self.editor.delete(text),
            KeyCode::Left => self.editor.left(text),
            KeyCode::Right => self.editor.right(text),
            KeyCode::Up => self.editor.up(text),
            KeyCode::Down => self.editor.down(text),
            KeyCode::Home => self.editor.home(text),
            KeyCode::End => self.editor.end(text),
            _ => {}
        }
    }

    fn scroll_log(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.log_scroll = self.log_scroll.saturating_sub(1),
            KeyCode::Down => self.log_scroll = self.log_scroll.saturating_add(1),
            KeyCode::PageUp => self.log_scroll = self.log_scroll.saturating_sub(5),
            KeyCode::PageDown => self.log_scroll = self.log_scroll.saturating_add(5),
            KeyCode::Home => self.log_scroll = 0,
            KeyCode::End => self.log_scroll = usize::MAX,
            _ => {}
        }
    }

    fn run_console(&mut self) {
        let before = self.console.len();
        self.console.run();

        if self.console.len() == before {
            self.status_message = "Nothing to run".to_string();
            return;
        }

        let index = self.console.len() - 1;
        self.status_message = if self.console.is_failed(index) {
            format!("Entry #{} failed", index + 1)
        } else {
            format!("Evaluated entry #{}", index + 1)
        };
        // Follow the newest entry
        self.log_scroll = usize::MAX;
    }

    fn clear_console(&mut self) {
        self.console.clear();
        self.editor = Editor::new();
        self.input_scroll = 0;
        self.status_message = "Input cleared".to_string();
    }

    fn recall_previous(&mut self) {
        match self.console.previous() {
            Some(index) => self.after_recall(index),
            None => self.status_message = "No history yet".to_string(),
        }
    }

    fn recall_next(&mut self) {
        match self.console.next() {
            Some(index) => self.after_recall(index),
            None if self.console.is_empty() => {
                self.status_message = "No history yet".to_string();
            }
            None => self.status_message = "Use previous first".to_string(),
        }
    }

    fn after_recall(&mut self, index: usize) {
        self.editor.move_to_end(self.console.source_code());
        self.status_message = format!("Recalled entry #{} of {}", index + 1, self.console.len());
    }
}
