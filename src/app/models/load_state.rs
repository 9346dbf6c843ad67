//! # Load State
//!
//! What the screen currently knows about the rate table.

use super::rate_record::RateList;

/// Screen-level load state, owned by [`crate::app::view_models::ScreenState`]
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    /// No load cycle has started since creation or the last reset
    #[default]
    Idle,
    /// A load cycle is in flight
    Loading,
    /// The last cycle delivered a table (possibly empty)
    Success(RateList),
    /// The last cycle failed; the reason is kept for logging only
    Error(String),
    /// The connectivity check failed, no fetch was attempted
    NoConnectivity,
}

impl LoadState {
    /// Rows to show for this state
    pub fn rates(&self) -> Option<&RateList> {
        match self {
            LoadState::Success(rates) => Some(rates),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Success(_) => "success",
            LoadState::Error(_) => "error",
            LoadState::NoConnectivity => "no-connectivity",
        }
    }
}
