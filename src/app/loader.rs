//! # Async Loader
//!
//! Runs fetch then parse on a background tokio task and hands the result back
//! to the interaction loop through a channel.
//!
//! ```text
//!          start()            result received
//!   Idle ──────────▶ Loading ─────────────────▶ Delivered | Failed
//!    ▲                  │                              │
//!    └──────────────────┴──────── reset() ─────────────┘
//! ```
//!
//! Every cycle is tagged with a generation. `reset()` aborts the task and
//! bumps the generation, so a result that was already in flight is dropped
//! instead of reaching a screen that has been torn down.

use crate::app::models::{RateList, SortOrder};
use crate::app::services::{parse_with, FetchError, ParseError, RateFetcher};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Loader lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoaderState {
    #[default]
    Idle,
    Loading,
    Delivered,
    Failed,
}

impl fmt::Display for LoaderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoaderState::Idle => "idle",
            LoaderState::Loading => "loading",
            LoaderState::Delivered => "delivered",
            LoaderState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Failure of one load cycle
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Misuse of the loader
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LoaderError {
    #[error("cannot start a load cycle while the loader is {0}")]
    NotIdle(LoaderState),
}

/// What one load cycle hands to the screen
///
/// Failures are folded into an empty table; the reason travels along for
/// logging but is never shown as its own message.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    rates: RateList,
    failure: Option<String>,
}

impl Delivery {
    pub fn loaded(rates: RateList) -> Self {
        Self {
            rates,
            failure: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            rates: RateList::default(),
            failure: Some(reason.into()),
        }
    }

    pub fn rates(&self) -> &RateList {
        &self.rates
    }

    pub fn into_rates(self) -> RateList {
        self.rates
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

#[derive(Debug)]
struct LoaderMessage {
    generation: u64,
    result: Result<RateList, LoadError>,
}

/// One-shot background loader for the rate table
pub struct AsyncLoader<F: RateFetcher> {
    fetcher: Arc<F>,
    url: String,
    sort: SortOrder,
    state: LoaderState,
    generation: u64,
    task: Option<JoinHandle<()>>,
    result_sender: mpsc::Sender<LoaderMessage>,
    result_receiver: mpsc::Receiver<LoaderMessage>,
}

impl<F: RateFetcher> AsyncLoader<F> {
    pub fn new(fetcher: F, url: impl Into<String>, sort: SortOrder) -> Self {
        let (result_sender, result_receiver) = mpsc::channel(4);
        Self {
            fetcher: Arc::new(fetcher),
            url: url.into(),
            sort,
            state: LoaderState::Idle,
            generation: 0,
            task: None,
            result_sender,
            result_receiver,
        }
    }

    pub fn state(&self) -> LoaderState {
        self.state
    }

    /// Begin a load cycle. Only valid from `Idle`; any other state is
    /// rejected and leaves the current cycle untouched.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> Result<(), LoaderError> {
        if self.state != LoaderState::Idle {
            tracing::warn!("Rejected start() while loader is {}", self.state);
            return Err(LoaderError::NotIdle(self.state));
        }

        self.state = LoaderState::Loading;
        let generation = self.generation;
        let fetcher = Arc::clone(&self.fetcher);
        let url = self.url.clone();
        let sort = self.sort;
        let result_sender = self.result_sender.clone();

        tracing::info!("Load cycle {} started for {}", generation, url);
        self.task = Some(tokio::spawn(async move {
            let result = load_once(fetcher.as_ref(), &url, sort).await;
            // Ignore send errors (receiver might have been dropped)
            let _ = result_sender.send(LoaderMessage { generation, result }).await;
        }));

        Ok(())
    }

    /// Take the current cycle's delivery if it has arrived (non-blocking)
    pub fn poll(&mut self) -> Option<Delivery> {
        while let Ok(message) = self.result_receiver.try_recv() {
            if let Some(delivery) = self.accept(message) {
                return Some(delivery);
            }
        }
        None
    }

    /// Wait for the current cycle's delivery
    ///
    /// Returns `None` straight away when no cycle is loading.
    pub async fn next_delivery(&mut self) -> Option<Delivery> {
        while self.state == LoaderState::Loading {
            let message = self.result_receiver.recv().await?;
            if let Some(delivery) = self.accept(message) {
                return Some(delivery);
            }
        }
        None
    }

    /// Abandon any cycle and return to `Idle` without delivering
    pub fn reset(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation = self.generation.wrapping_add(1);
        while self.result_receiver.try_recv().is_ok() {}

        tracing::debug!(
            "Loader reset from {} (generation now {})",
            self.state,
            self.generation
        );
        self.state = LoaderState::Idle;
    }

    fn accept(&mut self, message: LoaderMessage) -> Option<Delivery> {
        if message.generation != self.generation || self.state != LoaderState::Loading {
            tracing::debug!(
                "Dropping stale result from generation {}",
                message.generation
            );
            return None;
        }

        self.task = None;
        match message.result {
            Ok(rates) => {
                tracing::info!("Load cycle {} delivered {} rates", self.generation, rates.len());
                self.state = LoaderState::Delivered;
                Some(Delivery::loaded(rates))
            }
            Err(e) => {
                tracing::warn!("Load cycle {} failed: {}", self.generation, e);
                self.state = LoaderState::Failed;
                Some(Delivery::failed(e.to_string()))
            }
        }
    }
}

impl<F: RateFetcher> Drop for AsyncLoader<F> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn load_once<F: RateFetcher>(
    fetcher: &F,
    url: &str,
    sort: SortOrder,
) -> Result<RateList, LoadError> {
    let body = fetcher.fetch(url).await?;
    Ok(parse_with(&body, sort)?)
}
