//! Step definitions for the platform side of the screen lifecycle:
//! network state, the rate endpoint and create/destroy hooks.

use crate::common::world::LifecycleWorld;
use cucumber::{given, when};
use fxline::services::{FetchError, MockFetcher};
use std::time::Duration;
use tracing::info;

// === NETWORK AND ENDPOINT ===

#[given("the network is reachable")]
async fn given_network_reachable(world: &mut LifecycleWorld) {
    world.online = true;
}

#[given("the network is unreachable")]
async fn given_network_unreachable(world: &mut LifecycleWorld) {
    world.online = false;
}

#[given(expr = "the rate endpoint returns {string}")]
async fn given_endpoint_returns(world: &mut LifecycleWorld, body: String) {
    world.fetcher = MockFetcher::body(body);
}

#[given(expr = "the rate endpoint returns {string} after being released")]
async fn given_endpoint_returns_gated(world: &mut LifecycleWorld, body: String) {
    world.fetcher = MockFetcher::body(body).gated();
}

#[given("the rate endpoint fails with a network error")]
async fn given_endpoint_fails(world: &mut LifecycleWorld) {
    world.fetcher = MockFetcher::failing(FetchError::Network("connection refused".into()));
}

#[given(expr = "the rate endpoint responds with HTTP {int}")]
async fn given_endpoint_status(world: &mut LifecycleWorld, status: u16) {
    world.fetcher = MockFetcher::failing(FetchError::Status(status));
}

// === LIFECYCLE HOOKS ===

#[when("the screen is created")]
async fn when_screen_created(world: &mut LifecycleWorld) {
    info!("Creating screen (online: {})", world.online);
    world.create_screen().await.expect("Failed to create screen");
}

#[when("the screen is destroyed")]
async fn when_screen_destroyed(world: &mut LifecycleWorld) {
    world.controller().on_destroy();
}

#[when("the load cycle completes")]
async fn when_load_completes(world: &mut LifecycleWorld) {
    let controller = world.controller();
    controller.await_delivery().await;
    controller.render().expect("Failed to render");
}

#[when("the pending fetch is released")]
async fn when_fetch_released(world: &mut LifecycleWorld) {
    world.fetcher.release();
    // Give the aborted task every chance to deliver late
    tokio::time::sleep(Duration::from_millis(50)).await;
    let controller = world.controller();
    controller.pump();
    controller.render().expect("Failed to render");
}

#[when(expr = "the user presses {string}")]
async fn when_user_presses(world: &mut LifecycleWorld, key: String) {
    for ch in key.chars() {
        world.press_key(ch).expect("Failed to handle key");
    }
}
