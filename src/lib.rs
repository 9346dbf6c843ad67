//! # fxline - Terminal Exchange-Rate Viewer
//!
//! Fetches the latest exchange-rate table for a base currency and shows it
//! in a scrollable full-screen list, or prints it when output is piped.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  lifecycle  ┌──────────────┐   spawn   ┌──────────────┐
//! │  Controller  │────────────▶│ AsyncLoader  │──────────▶│ fetch, parse │
//! │              │◀────────────│              │◀──────────│  (tokio task)│
//! │ - Event loop │  delivery   └──────────────┘  channel  └──────────────┘
//! │ - Key map    │
//! └──────┬───────┘
//!        │ updates              ┌──────────────┐
//!        ▼                      │     View     │
//! ┌──────────────┐  ViewEvents  │              │
//! │ ScreenState  │─────────────▶│ - Terminal   │
//! │              │              │ - Plain text │
//! └──────────────┘              └──────────────┘
//! ```

pub mod app;
pub mod cmd_args;
pub mod config;
pub mod logging;

// Re-export main types for easy access
pub use app::*;
