//! # fxline Main Entry Point
//!
//! Full-screen rate list on a terminal, plain text otherwise.

use anyhow::Result;
use fxline::cmd_args::CommandLineArgs;
use fxline::config::Settings;
use fxline::logging::init_tracing;
use fxline::services::{HostConnectivity, HttpRateFetcher};
use fxline::{run_plain, AppController};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CommandLineArgs::parse();
    let settings = Settings::resolve(&args)?;

    let interactive = !settings.plain() && atty::is(atty::Stream::Stdout);
    init_tracing(settings.log_file().map(|path| path.as_path()), interactive)?;
    tracing::info!(
        "Starting fxline for {} ({} mode)",
        settings.url(),
        if interactive { "interactive" } else { "plain" }
    );

    let fetcher = HttpRateFetcher::new(settings.timeout())?;
    let connectivity = HostConnectivity::from_settings(&settings);

    if interactive {
        let mut app = AppController::new(&settings, fetcher, connectivity)?;
        app.run().await?;
    } else {
        let mut stdout = std::io::stdout().lock();
        run_plain(&settings, fetcher, connectivity, &mut stdout).await?;
    }

    Ok(())
}
