//! Common test infrastructure for the lifecycle suite

pub mod world;

#[allow(unused_imports)]
pub use world::LifecycleWorld;
