//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]**: application state, event loop, pane focus, key and mouse bindings
//! - **[`editor`]**: cursor movement and edits inside the input buffer
//! - **[`panes`]**: render functions for each visible pane (input, controls,
//!   log, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a [`Console`] and
//! call [`App::run`] to start the event loop.
//!
//! [`Console`]: crate::console::Console
//! [`App::run`]: app::App::run

pub mod app;
pub mod editor;
pub mod panes;
pub mod theme;

pub use app::App;
