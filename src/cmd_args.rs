use std::ffi::OsString;
use std::path::PathBuf;

pub use clap::Parser;

use crate::app::models::SortOrder;
use crate::config::DEFAULT_TIMEOUT_SECS;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Rate endpoint URL. Falls back to FXLINE_ENDPOINT, then the built-in default.
    #[clap(short = 'e', long, help = "rate endpoint URL")]
    endpoint: Option<String>,

    /// Base currency code. Falls back to FXLINE_BASE, then GBP.
    #[clap(short = 'b', long, help = "base currency code")]
    base: Option<String>,

    #[clap(short = 't', long, default_value_t = DEFAULT_TIMEOUT_SECS, help = "request timeout in seconds")]
    timeout: u64,

    #[clap(short = 's', long, value_enum, default_value_t = SortOrder::Response, help = "row order")]
    sort: SortOrder,

    /// Print the table once instead of opening the full-screen view.
    /// Implied when stdout is not a terminal.
    #[clap(long, help = "print rates as plain text")]
    plain: bool,

    #[clap(long, help = "skip the network reachability check")]
    no_connectivity_check: bool,

    #[clap(long, help = "write logs to this file")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    endpoint: Option<String>,
    base: Option<String>,
    timeout_secs: u64,
    sort: SortOrder,
    plain: bool,
    no_connectivity_check: bool,
    log_file: Option<PathBuf>,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            endpoint: args.endpoint,
            base: args.base,
            timeout_secs: args.timeout,
            sort: args.sort,
            plain: args.plain,
            no_connectivity_check: args.no_connectivity_check,
            log_file: args.log_file,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn endpoint(&self) -> Option<&String> {
        self.endpoint.as_ref()
    }

    pub fn base(&self) -> Option<&String> {
        self.base.as_ref()
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn plain(&self) -> bool {
        self.plain
    }

    pub fn no_connectivity_check(&self) -> bool {
        self.no_connectivity_check
    }

    pub fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_args_endpoint_and_base() {
        let args = CommandLineArgs::parse_from([
            "program",
            "--endpoint",
            "http://localhost/latest",
            "--base",
            "EUR",
        ]);
        assert_eq!(args.endpoint().unwrap(), "http://localhost/latest");
        assert_eq!(args.base().unwrap(), "EUR");
    }

    #[test]
    fn test_parse_args_short_flags() {
        let args = CommandLineArgs::parse_from(["program", "-b", "USD", "-t", "3", "-s", "rate"]);
        assert_eq!(args.base().unwrap(), "USD");
        assert_eq!(args.timeout_secs(), 3);
        assert_eq!(args.sort(), SortOrder::Rate);
    }

    #[test]
    fn test_default_values() {
        let args = CommandLineArgs::parse_from(["program"]);
        assert!(args.endpoint().is_none());
        assert!(args.base().is_none());
        assert_eq!(args.timeout_secs(), DEFAULT_TIMEOUT_SECS);
        assert_eq!(args.sort(), SortOrder::Response);
        assert!(!args.plain());
        assert!(!args.no_connectivity_check());
        assert!(args.log_file().is_none());
    }

    #[test]
    fn test_parse_switches() {
        let args = CommandLineArgs::parse_from([
            "program",
            "--plain",
            "--no-connectivity-check",
            "--log-file",
            "/tmp/fxline.log",
        ]);
        assert!(args.plain());
        assert!(args.no_connectivity_check());
        assert_eq!(args.log_file().unwrap(), &PathBuf::from("/tmp/fxline.log"));
    }
}
