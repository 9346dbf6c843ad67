//! Configuration constants and utilities for fxline
//!
//! Defaults live here as constants. Each of them can be overridden through an
//! environment variable, and command line arguments override both.

use crate::app::models::SortOrder;
use crate::cmd_args::CommandLineArgs;
use anyhow::{Context, Result};
use regex::Regex;
use reqwest::Url;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

/// Default rate endpoint; the `base` query parameter is appended on request
pub const DEFAULT_ENDPOINT: &str = "https://api.fixer.io/latest";

/// Default base currency
pub const DEFAULT_BASE_CURRENCY: &str = "GBP";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Public resolvers the connectivity check looks for a route to (IPv4, then IPv6)
pub const CONNECTIVITY_ROUTE_TARGETS: [SocketAddr; 2] = [
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(1, 1, 1, 1), 53)),
    SocketAddr::V6(SocketAddrV6::new(
        Ipv6Addr::new(0x2606, 0x4700, 0x4700, 0, 0, 0, 0, 0x1111),
        53,
        0,
        0,
    )),
];

/// Environment variable name for overriding the endpoint
pub const ENDPOINT_ENV_VAR: &str = "FXLINE_ENDPOINT";

/// Environment variable name for overriding the base currency
pub const BASE_CURRENCY_ENV_VAR: &str = "FXLINE_BASE";

/// Environment variable holding the tracing filter directive
pub const LOG_FILTER_ENV_VAR: &str = "FXLINE_LOG";

/// Get the endpoint, checking environment variable first, then falling back to default
pub fn get_endpoint() -> String {
    env_or(ENDPOINT_ENV_VAR, DEFAULT_ENDPOINT)
}

/// Get the base currency, checking environment variable first, then falling back to default
pub fn get_base_currency() -> String {
    env_or(BASE_CURRENCY_ENV_VAR, DEFAULT_BASE_CURRENCY)
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var_os(name)
        .and_then(|val| val.into_string().ok())
        .filter(|val| !val.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Whether `code` looks like an ISO 4217 currency code
pub fn is_currency_code(code: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Z]{3}$").expect("currency code pattern is valid"))
        .is_match(code)
}

/// Build the request URL for `base` on top of `endpoint`.
///
/// Any query string already present on the endpoint is replaced so that the
/// request carries exactly one `base` parameter.
pub fn rates_url(endpoint: &str, base: &str) -> Result<Url> {
    let mut url =
        Url::parse(endpoint).with_context(|| format!("Invalid endpoint URL '{endpoint}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("Unsupported endpoint scheme '{}'", url.scheme());
    }
    url.set_query(None);
    url.query_pairs_mut().append_pair("base", base);
    Ok(url)
}

/// Fully resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    url: Url,
    base: String,
    timeout: Duration,
    sort: SortOrder,
    plain: bool,
    connectivity_check: bool,
    log_file: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings from command line arguments and the environment
    pub fn resolve(args: &CommandLineArgs) -> Result<Self> {
        let endpoint = args.endpoint().cloned().unwrap_or_else(get_endpoint);
        let base = args
            .base()
            .cloned()
            .unwrap_or_else(get_base_currency)
            .to_uppercase();

        if !is_currency_code(&base) {
            anyhow::bail!("Invalid base currency '{base}', expected a three-letter code");
        }
        if args.timeout_secs() == 0 {
            anyhow::bail!("Timeout must be at least one second");
        }

        let url = rates_url(&endpoint, &base)?;
        tracing::debug!("Resolved rates URL: {}", url);

        Ok(Self {
            url,
            base,
            timeout: Duration::from_secs(args.timeout_secs()),
            sort: args.sort(),
            plain: args.plain(),
            connectivity_check: !args.no_connectivity_check(),
            log_file: args.log_file().cloned(),
        })
    }

    /// Settings pointing at `url` with every other value at its default
    pub fn for_url(url: Url) -> Self {
        Self {
            url,
            base: DEFAULT_BASE_CURRENCY.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            sort: SortOrder::default(),
            plain: false,
            connectivity_check: true,
            log_file: None,
        }
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn plain(&self) -> bool {
        self.plain
    }

    pub fn connectivity_check(&self) -> bool {
        self.connectivity_check
    }

    pub fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }
}
