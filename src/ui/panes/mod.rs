//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`input`]: the console textarea with line numbers and highlighting
//! - [`controls`]: Run / Clear / Previous / Next buttons and mouse hit testing
//! - [`log`]: one entry per evaluated snippet
//! - [`status`]: status bar with keybindings and history position
//!
//! Each pane module exports a primary `render_*` function. Panes are
//! stateless apart from scroll offsets, which the caller owns.

pub mod controls;
pub mod input;
pub mod log;
pub mod status;

pub use controls::{hit_test, render_controls, ControlButton, ControlState};
pub use input::render_input_pane;
pub use log::{log_entries, render_log_pane, LogEntry};
pub use status::{render_status_bar, StatusRenderData};
