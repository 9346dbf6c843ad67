//! # View Models
//!
//! State the renderer draws from. There is a single screen, so a single
//! view model.

pub mod screen_state;

pub use screen_state::{ScreenState, NO_CONNECTIVITY_MESSAGE, NO_RESULTS_MESSAGE};
