//! # Service Doubles for Testing
//!
//! A [`RateFetcher`] and a [`ConnectivityCheck`] that answer from memory,
//! count their calls and can be held back until a test releases them.

use super::connectivity::ConnectivityCheck;
use super::fetcher::{FetchError, RateFetcher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Pre-programmed fetcher
///
/// Clones share their call counter and gate, so a test can keep one handle
/// while the loader owns another.
#[derive(Debug, Clone)]
pub struct MockFetcher {
    response: Result<String, FetchError>,
    calls: Arc<AtomicUsize>,
    urls: Arc<Mutex<Vec<String>>>,
    gate: Option<Arc<Notify>>,
}

impl MockFetcher {
    /// Fetcher that returns `body` with a 2xx status
    pub fn body(body: impl Into<String>) -> Self {
        Self::with_response(Ok(body.into()))
    }

    /// Fetcher that fails with `error`
    pub fn failing(error: FetchError) -> Self {
        Self::with_response(Err(error))
    }

    fn with_response(response: Result<String, FetchError>) -> Self {
        Self {
            response,
            calls: Arc::new(AtomicUsize::new(0)),
            urls: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    /// Hold every fetch until [`MockFetcher::release`] is called
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    /// Let one held fetch complete
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Number of fetches started
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// URLs requested so far, in order
    pub fn requested_urls(&self) -> Vec<String> {
        self.urls.lock().map(|urls| urls.clone()).unwrap_or_default()
    }
}

impl RateFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut urls) = self.urls.lock() {
            urls.push(url.to_string());
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.response.clone()
    }
}

/// Connectivity answer that can be held back like [`MockFetcher`]
#[derive(Debug, Clone)]
pub struct MockConnectivity {
    connected: bool,
    calls: Arc<AtomicUsize>,
    gate: Option<Arc<Notify>>,
}

impl MockConnectivity {
    pub fn new(connected: bool) -> Self {
        Self {
            connected,
            calls: Arc::new(AtomicUsize::new(0)),
            gate: None,
        }
    }

    /// Hold every check until [`MockConnectivity::release`] is called
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Number of checks started
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ConnectivityCheck for MockConnectivity {
    async fn is_connected(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.connected
    }
}
