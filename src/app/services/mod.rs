//! # Services Layer
//!
//! The three leaf operations of a load cycle: reachability, fetch and parse.
//! Each sits behind a small interface so the loader and the controller can be
//! driven by stubs in tests.

pub mod connectivity;
pub mod fetcher;
pub mod mock;
pub mod parser;

pub use connectivity::{ConnectivityCheck, HostConnectivity, RouteCheck, StaticConnectivity};
pub use fetcher::{FetchError, HttpRateFetcher, RateFetcher};
pub use mock::{MockConnectivity, MockFetcher};
pub use parser::{parse, parse_with, ParseError};
