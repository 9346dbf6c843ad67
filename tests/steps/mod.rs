//! Step definitions for Cucumber tests
//!
//! - `lifecycle` - network, endpoint and screen create/destroy steps
//! - `display` - assertions on the screen state and rendered output

pub mod display;
pub mod lifecycle;
