//! # Application Controller
//!
//! Owns the screen lifecycle. Creation hands the connectivity check to its
//! own task and starts the loader once the answer arrives; destruction
//! cancels both so nothing stale reaches the screen; reload is destruction
//! followed by creation. In between, the event loop moves check answers and
//! loader deliveries into the screen state and key presses into screen
//! commands, so input and drawing never wait on the network.

use crate::app::commands::{resolve_key, ScreenCommand};
use crate::app::io::{EventStream, RenderStream, TerminalEventStream, TerminalRenderStream};
use crate::app::loader::{AsyncLoader, LoaderState};
use crate::app::services::{ConnectivityCheck, RateFetcher};
use crate::app::view_models::ScreenState;
use crate::app::views::{TerminalRenderer, ViewRenderer};
use crate::config::Settings;
use anyhow::Result;
use crossterm::event::{Event, KeyEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;

/// How long one turn of the event loop waits for input
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Connectivity check running on its own task
struct PendingCheck {
    answer: oneshot::Receiver<bool>,
    task: JoinHandle<()>,
}

pub struct AppController<ES, RS, F, C>
where
    ES: EventStream,
    RS: RenderStream,
    F: RateFetcher,
    C: ConnectivityCheck,
{
    screen: ScreenState,
    loader: AsyncLoader<F>,
    connectivity: Arc<C>,
    pending_check: Option<PendingCheck>,
    view_renderer: TerminalRenderer<RS>,
    event_stream: ES,
    should_quit: bool,
}

impl<F: RateFetcher, C: ConnectivityCheck>
    AppController<TerminalEventStream, TerminalRenderStream, F, C>
{
    /// Controller bound to the real terminal
    pub fn new(settings: &Settings, fetcher: F, connectivity: C) -> Result<Self> {
        Self::with_io_streams(
            settings,
            TerminalEventStream::new(),
            TerminalRenderStream::new(),
            fetcher,
            connectivity,
        )
    }
}

impl<ES, RS, F, C> AppController<ES, RS, F, C>
where
    ES: EventStream,
    RS: RenderStream,
    F: RateFetcher,
    C: ConnectivityCheck,
{
    /// Create a controller with injected I/O streams and services
    pub fn with_io_streams(
        settings: &Settings,
        event_stream: ES,
        render_stream: RS,
        fetcher: F,
        connectivity: C,
    ) -> Result<Self> {
        let view_renderer = TerminalRenderer::with_render_stream(render_stream, settings.base())?;
        let screen = ScreenState::new(view_renderer.viewport_height());
        let loader = AsyncLoader::new(fetcher, settings.url().as_str(), settings.sort());

        Ok(Self {
            screen,
            loader,
            connectivity: Arc::new(connectivity),
            pending_check: None,
            view_renderer,
            event_stream,
            should_quit: false,
        })
    }

    pub fn screen(&self) -> &ScreenState {
        &self.screen
    }

    pub fn loader_state(&self) -> LoaderState {
        self.loader.state()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn connectivity_pending(&self) -> bool {
        self.pending_check.is_some()
    }

    /// Screen creation: start the connectivity check without waiting for it.
    /// The load cycle starts when [`Self::pump`] or
    /// [`Self::await_connectivity`] picks up a positive answer.
    pub fn on_create(&mut self) {
        tracing::info!("Screen created");
        self.cancel_check();

        let connectivity = Arc::clone(&self.connectivity);
        let (sender, answer) = oneshot::channel();
        let task = tokio::spawn(async move {
            // The receiver is gone if the screen was destroyed meanwhile
            let _ = sender.send(connectivity.is_connected().await);
        });
        self.pending_check = Some(PendingCheck { answer, task });
    }

    /// Screen destruction: cancel the check and the loader before the
    /// screen lets go of its dataset
    pub fn on_destroy(&mut self) {
        tracing::info!("Screen destroyed");
        self.cancel_check();
        self.loader.reset();
        self.screen.on_loader_reset();
    }

    pub fn recreate(&mut self) {
        self.on_destroy();
        self.on_create();
    }

    fn cancel_check(&mut self) {
        if let Some(check) = self.pending_check.take() {
            check.task.abort();
        }
    }

    fn on_connectivity(&mut self, connected: bool) {
        if !connected {
            self.screen.on_no_connectivity();
            return;
        }

        match self.loader.start() {
            Ok(()) => self.screen.on_load_started(),
            Err(e) => tracing::error!("Load cycle not started: {}", e),
        }
    }

    /// Apply the answer of a finished check, if there is one
    fn poll_connectivity(&mut self) -> bool {
        let Some(check) = self.pending_check.as_mut() else {
            return false;
        };

        let connected = match check.answer.try_recv() {
            Ok(connected) => connected,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => {
                tracing::warn!("Connectivity check ended without an answer");
                false
            }
        };
        self.pending_check = None;
        self.on_connectivity(connected);
        true
    }

    /// Move a finished check and a pending delivery into the screen without
    /// waiting. Returns whether the screen changed.
    pub fn pump(&mut self) -> bool {
        let checked = self.poll_connectivity();
        let delivered = match self.loader.poll() {
            Some(delivery) => self.screen.on_load_finished(delivery),
            None => false,
        };
        checked || delivered
    }

    /// Wait for a running connectivity check and apply its answer.
    /// Returns whether there was one.
    pub async fn await_connectivity(&mut self) -> bool {
        let Some(check) = self.pending_check.take() else {
            return false;
        };

        let connected = check.answer.await.unwrap_or_else(|_| {
            tracing::warn!("Connectivity check ended without an answer");
            false
        });
        self.on_connectivity(connected);
        true
    }

    /// Wait for the current load cycle to deliver, settling a running
    /// connectivity check first. Returns whether a delivery changed the
    /// screen.
    pub async fn await_delivery(&mut self) -> bool {
        self.await_connectivity().await;
        match self.loader.next_delivery().await {
            Some(delivery) => self.screen.on_load_finished(delivery),
            None => false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let Some(command) = resolve_key(&key) else {
            tracing::trace!("Unbound key: {:?}", key);
            return;
        };

        tracing::debug!("Key {:?} -> {:?}", key.code, command);
        match command {
            ScreenCommand::Quit => self.should_quit = true,
            ScreenCommand::ScrollDown => self.screen.scroll_down(1),
            ScreenCommand::ScrollUp => self.screen.scroll_up(1),
            ScreenCommand::PageDown => self.screen.page_down(),
            ScreenCommand::PageUp => self.screen.page_up(),
            ScreenCommand::Top => self.screen.scroll_to_top(),
            ScreenCommand::Bottom => self.screen.scroll_to_bottom(),
            ScreenCommand::Reload => self.recreate(),
        }
    }

    /// Draw whatever the screen state reported as out of date
    pub fn render(&mut self) -> Result<()> {
        for event in self.screen.collect_pending_view_events() {
            self.view_renderer.handle_view_event(&event, &self.screen)?;
        }
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.view_renderer.update_size(width, height);
        self.screen
            .set_viewport_height(self.view_renderer.viewport_height());
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        // Initialize view renderer (handles all terminal setup)
        self.view_renderer.initialize()?;

        let result = self.event_loop().await;

        // Tear down even when the loop failed so the terminal is restored
        self.on_destroy();
        self.view_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        self.view_renderer.render_full(&self.screen)?;
        self.on_create();
        self.render()?;

        while !self.should_quit {
            // Let the check and fetch tasks run on a single-threaded runtime
            tokio::task::yield_now().await;
            self.pump();

            if self.event_stream.poll(INPUT_POLL_INTERVAL)? {
                match self.event_stream.read()? {
                    Event::Key(key_event) => self.handle_key(key_event),
                    Event::Resize(width, height) => self.resize(width, height),
                    _ => {
                        // Ignore other events
                    }
                }
            }

            self.render()?;
        }

        Ok(())
    }
}
