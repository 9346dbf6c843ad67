use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use cucumber::World;
use reqwest::Url;

// Import real application components
use fxline::config::Settings;
use fxline::io::{MockEventStream, MockRenderStream};
use fxline::services::{FetchError, MockFetcher, StaticConnectivity};
use fxline::AppController;

pub type TestController =
    AppController<MockEventStream, MockRenderStream, MockFetcher, StaticConnectivity>;

/// Screen under test plus the doubles standing in for the host platform
#[derive(World)]
#[world(init = Self::new)]
pub struct LifecycleWorld {
    /// Whether the connectivity check reports a network
    pub online: bool,

    /// Fetcher handed to the controller on creation
    pub fetcher: MockFetcher,

    /// Real controller, created by the "screen is created" step
    pub controller: Option<TestController>,

    /// Handle onto everything the renderer wrote
    pub output: MockRenderStream,
}

impl std::fmt::Debug for LifecycleWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleWorld")
            .field("online", &self.online)
            .field("fetch_calls", &self.fetcher.calls())
            .field("created", &self.controller.is_some())
            .finish()
    }
}

impl LifecycleWorld {
    pub fn new() -> Self {
        Self {
            online: true,
            fetcher: MockFetcher::failing(FetchError::Network("no response configured".into())),
            controller: None,
            output: MockRenderStream::with_size((60, 12)),
        }
    }

    fn settings() -> Settings {
        Settings::for_url(
            Url::parse("http://rates.test/latest?base=GBP").expect("static test URL is valid"),
        )
    }

    /// Build the controller, run its creation hook and settle the
    /// connectivity check
    pub async fn create_screen(&mut self) -> Result<()> {
        let mut controller = AppController::with_io_streams(
            &Self::settings(),
            MockEventStream::empty(),
            self.output.clone(),
            self.fetcher.clone(),
            StaticConnectivity(self.online),
        )?;
        controller.on_create();
        controller.await_connectivity().await;
        controller.render()?;
        self.controller = Some(controller);
        Ok(())
    }

    pub fn controller(&mut self) -> &mut TestController {
        self.controller
            .as_mut()
            .expect("screen has not been created in this scenario")
    }

    pub fn press_key(&mut self, ch: char) -> Result<()> {
        let controller = self.controller();
        controller.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
        controller.render()
    }

    pub fn terminal_contains(&self, text: &str) -> bool {
        self.output.contains_text(text)
    }
}
