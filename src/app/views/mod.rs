//! # View Layer
//!
//! Turns the screen state into terminal output, either full-screen through a
//! [`crate::app::io::RenderStream`] or as plain lines for pipes.

pub mod format;
pub mod plain;
pub mod terminal_renderer;

pub use format::{format_row, header_text};
pub use plain::print_screen;
pub use terminal_renderer::{TerminalRenderer, ViewRenderer, PROGRESS_TEXT};
