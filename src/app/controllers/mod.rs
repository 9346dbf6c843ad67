//! # Controllers
//!
//! Drive one screen lifecycle, interactively or as a one-shot print.

pub mod app_controller;
pub mod plain;

pub use app_controller::AppController;
pub use plain::run_plain;
