//! # Models Module
//!
//! Plain data types shared by the services, the loader and the screen.

pub mod load_state;
pub mod rate_record;

pub use load_state::LoadState;
pub use rate_record::{RateList, RateRecord, SortOrder};
