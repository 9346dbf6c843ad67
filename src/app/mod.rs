//! # Rate Screen
//!
//! The one screen of the application, split the MVVM way:
//!
//! - **Models**: rate records, rate tables and load states
//! - **Services**: connectivity check, HTTP fetcher, JSON parser
//! - **Loader**: the background load cycle and its state machine
//! - **View model**: `ScreenState`, which decides what is visible
//! - **Views**: terminal renderer and plain printer
//! - **Controllers**: lifecycle and event loop

pub mod commands;
pub mod controllers;
pub mod events;
pub mod io;
pub mod loader;
pub mod models;
pub mod services;
pub mod view_models;
pub mod views;

// Re-export core types
pub use controllers::{run_plain, AppController};
pub use events::ViewEvent;
pub use loader::{AsyncLoader, Delivery, LoadError, LoaderError, LoaderState};
pub use models::{LoadState, RateList, RateRecord, SortOrder};
pub use view_models::ScreenState;
