//! Step definitions for what the screen shows

use crate::common::world::LifecycleWorld;
use cucumber::then;
use fxline::{LoadState, LoaderState};

#[then("no fetch is attempted")]
async fn then_no_fetch(world: &mut LifecycleWorld) {
    assert_eq!(world.fetcher.calls(), 0, "fetcher should not have been called");
}

#[then(expr = "{int} fetches were made")]
async fn then_fetch_count(world: &mut LifecycleWorld, count: usize) {
    assert_eq!(world.fetcher.calls(), count);
}

#[then(expr = "the screen shows {string}")]
async fn then_screen_shows_message(world: &mut LifecycleWorld, message: String) {
    let shown = world.controller().screen().empty_message();
    assert_eq!(shown, Some(message.as_str()));
    assert!(
        world.terminal_contains(&message),
        "rendered output should contain '{message}'"
    );
}

#[then("the progress indicator is visible")]
async fn then_progress_visible(world: &mut LifecycleWorld) {
    assert!(world.controller().screen().progress_visible());
}

#[then(expr = "the list shows {int} rows")]
async fn then_list_rows(world: &mut LifecycleWorld, count: usize) {
    let screen = world.controller().screen();
    assert!(screen.list_visible());
    assert!(!screen.progress_visible());
    assert_eq!(screen.rows().len(), count);
}

#[then(expr = "the row for {string} has rate {float}")]
async fn then_row_rate(world: &mut LifecycleWorld, code: String, rate: f64) {
    let screen = world.controller().screen();
    let record = screen
        .rows()
        .iter()
        .find(|record| record.currency_code() == code)
        .unwrap_or_else(|| panic!("no row for {code}"));
    assert!((record.rate() - rate).abs() < f64::EPSILON);
}

#[then(expr = "the rendered screen contains {string}")]
async fn then_rendered_contains(world: &mut LifecycleWorld, text: String) {
    assert!(
        world.terminal_contains(&text),
        "rendered output should contain '{text}'"
    );
}

#[then("the screen has no rows")]
async fn then_no_rows(world: &mut LifecycleWorld) {
    assert!(world.controller().screen().rows().is_empty());
}

#[then("the screen is idle")]
async fn then_screen_idle(world: &mut LifecycleWorld) {
    let controller = world.controller();
    assert_eq!(controller.screen().load_state(), &LoadState::Idle);
    assert_eq!(controller.loader_state(), LoaderState::Idle);
}
