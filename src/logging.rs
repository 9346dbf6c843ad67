//! Tracing setup.
//!
//! The filter comes from `FXLINE_LOG` (standard `EnvFilter` directives).
//! Logs go to the `--log-file` when one is given, otherwise to stderr. The
//! full-screen view owns the terminal, so without a log file it only logs
//! when `FXLINE_LOG` asks for it.

use crate::config::LOG_FILTER_ENV_VAR;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

/// Filter used when `FXLINE_LOG` is unset
pub fn default_filter(log_file: Option<&Path>, interactive: bool) -> &'static str {
    match (log_file, interactive) {
        (Some(_), _) => "info",
        (None, true) => "off",
        (None, false) => "warn",
    }
}

/// Keep HTTP and TLS internals at `warn` under a user-supplied filter
fn quiet_dependencies(filter: EnvFilter) -> Result<EnvFilter> {
    Ok(filter
        .add_directive("reqwest=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("hyper_util=warn".parse()?)
        .add_directive("rustls=warn".parse()?))
}

pub fn init_tracing(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = match EnvFilter::try_from_env(LOG_FILTER_ENV_VAR) {
        Ok(filter) => quiet_dependencies(filter)?,
        Err(_) => EnvFilter::new(default_filter(log_file, interactive)),
    };

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Unable to open log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_timer(ChronoLocal::rfc_3339())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    tracing::debug!("Tracing initialized");
    Ok(())
}
