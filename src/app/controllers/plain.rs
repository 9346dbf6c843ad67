//! # Plain Runner
//!
//! One screen lifecycle without the full-screen view: check connectivity,
//! load once, print the settled state.

use crate::app::loader::AsyncLoader;
use crate::app::services::{ConnectivityCheck, RateFetcher};
use crate::app::view_models::ScreenState;
use crate::app::views::print_screen;
use crate::config::Settings;
use anyhow::Result;
use std::io::Write;

/// Run one lifecycle and print the outcome to `writer`
///
/// Returns the settled screen state so callers can inspect what was shown.
pub async fn run_plain<F, C, W>(
    settings: &Settings,
    fetcher: F,
    connectivity: C,
    writer: &mut W,
) -> Result<ScreenState>
where
    F: RateFetcher,
    C: ConnectivityCheck,
    W: Write,
{
    let mut screen = ScreenState::new(1);

    if connectivity.is_connected().await {
        let mut loader = AsyncLoader::new(fetcher, settings.url().as_str(), settings.sort());
        loader.start()?;
        screen.on_load_started();
        if let Some(delivery) = loader.next_delivery().await {
            screen.on_load_finished(delivery);
        }
    } else {
        screen.on_no_connectivity();
    }

    print_screen(writer, &screen, settings.base())?;
    Ok(screen)
}
