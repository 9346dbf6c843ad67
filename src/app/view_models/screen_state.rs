//! # Screen State
//!
//! Owns the visible rate table and decides which of the three visuals is on
//! screen: the progress indicator, the empty-state message or the list.
//! Only the loader's deliveries and the initial connectivity check move it
//! between load states; the renderer reads it by reference.

use crate::app::events::ViewEvent;
use crate::app::loader::Delivery;
use crate::app::models::{LoadState, RateList, RateRecord};

/// Shown instead of the list when the connectivity check fails
pub const NO_CONNECTIVITY_MESSAGE: &str = "No internet connection.";

/// Shown when a load cycle ends without rows, whatever the reason
pub const NO_RESULTS_MESSAGE: &str = "No exchange rates found.";

#[derive(Debug, Clone)]
pub struct ScreenState {
    load_state: LoadState,
    scroll_offset: usize,
    viewport_height: usize,
    pending_view_events: Vec<ViewEvent>,
}

impl ScreenState {
    pub fn new(viewport_height: usize) -> Self {
        Self {
            load_state: LoadState::Idle,
            scroll_offset: 0,
            viewport_height: viewport_height.max(1),
            pending_view_events: Vec::new(),
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// The connectivity check failed; no fetch will run this lifecycle
    pub fn on_no_connectivity(&mut self) {
        tracing::info!("Screen entering no-connectivity state");
        self.load_state = LoadState::NoConnectivity;
        self.scroll_offset = 0;
        self.emit_view_event([ViewEvent::FullRedrawRequired]);
    }

    pub fn on_load_started(&mut self) {
        self.load_state = LoadState::Loading;
        self.scroll_offset = 0;
        self.emit_view_event([ViewEvent::FullRedrawRequired]);
    }

    /// Replace the dataset with a loader delivery
    ///
    /// Returns `false` and leaves the screen untouched when no load is in
    /// flight.
    pub fn on_load_finished(&mut self, delivery: Delivery) -> bool {
        if self.load_state != LoadState::Loading {
            tracing::warn!(
                "Ignoring delivery while screen is {}",
                self.load_state.name()
            );
            return false;
        }

        let failure = delivery.failure().map(str::to_string);
        self.load_state = match failure {
            Some(reason) => LoadState::Error(reason),
            None => LoadState::Success(delivery.into_rates()),
        };
        self.scroll_offset = 0;

        tracing::debug!(
            "Screen now {} with {} rows",
            self.load_state.name(),
            self.rows().len()
        );
        self.emit_view_event([ViewEvent::FullRedrawRequired]);
        true
    }

    /// The loader was reset: drop the dataset and go back to the initial view
    pub fn on_loader_reset(&mut self) {
        self.load_state = LoadState::Idle;
        self.scroll_offset = 0;
        self.emit_view_event([ViewEvent::FullRedrawRequired]);
    }

    pub fn progress_visible(&self) -> bool {
        matches!(self.load_state, LoadState::Idle | LoadState::Loading)
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        match &self.load_state {
            LoadState::NoConnectivity => Some(NO_CONNECTIVITY_MESSAGE),
            LoadState::Error(_) => Some(NO_RESULTS_MESSAGE),
            LoadState::Success(rates) if rates.is_empty() => Some(NO_RESULTS_MESSAGE),
            _ => None,
        }
    }

    pub fn list_visible(&self) -> bool {
        matches!(&self.load_state, LoadState::Success(rates) if !rates.is_empty())
    }

    pub fn rates(&self) -> Option<&RateList> {
        self.load_state.rates()
    }

    pub fn rows(&self) -> &[RateRecord] {
        self.rates().map(RateList::records).unwrap_or(&[])
    }

    /// Rows inside the viewport, starting at the scroll offset
    pub fn visible_rows(&self) -> &[RateRecord] {
        let rows = self.rows();
        let start = self.scroll_offset.min(rows.len());
        let end = (start + self.viewport_height).min(rows.len());
        &rows[start..end]
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height.max(1);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
        self.emit_view_event([ViewEvent::FullRedrawRequired]);
    }

    fn max_scroll_offset(&self) -> usize {
        self.rows().len().saturating_sub(self.viewport_height)
    }

    fn scroll_to(&mut self, offset: usize) {
        let offset = offset.min(self.max_scroll_offset());
        if offset != self.scroll_offset {
            tracing::trace!("Scroll {} -> {}", self.scroll_offset, offset);
            self.scroll_offset = offset;
            self.emit_view_event([
                ViewEvent::ListRedrawRequired,
                ViewEvent::StatusBarUpdateRequired,
            ]);
        }
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_to(self.scroll_offset.saturating_add(lines));
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_to(self.scroll_offset.saturating_sub(lines));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport_height);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport_height);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_to(0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_to(usize::MAX);
    }

    fn emit_view_event(&mut self, events: impl IntoIterator<Item = ViewEvent>) {
        self.pending_view_events.extend(events);
    }

    /// Drain the view events raised since the last call
    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        ViewEvent::coalesce(std::mem::take(&mut self.pending_view_events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates(count: usize) -> RateList {
        let codes = [
            "AUD", "BGN", "BRL", "CAD", "CHF", "CNY", "CZK", "DKK", "EUR", "HKD", "HUF", "IDR",
        ];
        RateList::new(
            codes
                .iter()
                .take(count)
                .enumerate()
                .map(|(i, code)| RateRecord::new(*code, 1.0 + i as f64))
                .collect(),
        )
    }

    fn loaded(count: usize, viewport: usize) -> ScreenState {
        let mut screen = ScreenState::new(viewport);
        screen.on_load_started();
        screen.on_load_finished(Delivery::loaded(rates(count)));
        screen.collect_pending_view_events();
        screen
    }

    #[test]
    fn initial_screen_should_show_progress_only() {
        let screen = ScreenState::new(10);
        assert!(screen.progress_visible());
        assert!(!screen.list_visible());
        assert!(screen.empty_message().is_none());
    }

    #[test]
    fn no_connectivity_should_show_fixed_message() {
        let mut screen = ScreenState::new(10);
        screen.on_no_connectivity();

        assert!(!screen.progress_visible());
        assert!(!screen.list_visible());
        assert_eq!(screen.empty_message(), Some(NO_CONNECTIVITY_MESSAGE));
    }

    #[test]
    fn successful_delivery_should_populate_list() {
        let screen = loaded(2, 10);

        assert!(!screen.progress_visible());
        assert!(screen.list_visible());
        assert!(screen.empty_message().is_none());
        assert_eq!(screen.rows().len(), 2);
    }

    #[test]
    fn empty_delivery_should_show_no_results() {
        let screen = loaded(0, 10);

        assert!(!screen.progress_visible());
        assert!(!screen.list_visible());
        assert_eq!(screen.empty_message(), Some(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn failed_delivery_should_show_no_results_not_diagnostic() {
        let mut screen = ScreenState::new(10);
        screen.on_load_started();
        screen.on_load_finished(Delivery::failed("network error: timed out"));

        assert_eq!(screen.empty_message(), Some(NO_RESULTS_MESSAGE));
        assert!(screen.rows().is_empty());
        assert!(matches!(screen.load_state(), LoadState::Error(_)));
    }

    #[test]
    fn delivery_without_loading_should_be_ignored() {
        let mut screen = ScreenState::new(10);
        screen.on_loader_reset();

        assert!(!screen.on_load_finished(Delivery::loaded(rates(2))));
        assert_eq!(screen.load_state(), &LoadState::Idle);
        assert!(screen.rows().is_empty());
    }

    #[test]
    fn loader_reset_should_clear_dataset() {
        let mut screen = loaded(3, 10);
        screen.on_loader_reset();

        assert!(screen.rows().is_empty());
        assert!(screen.progress_visible());
        assert_eq!(screen.scroll_offset(), 0);
    }

    #[test]
    fn scrolling_should_clamp_to_dataset() {
        let mut screen = loaded(12, 5);

        screen.scroll_down(3);
        assert_eq!(screen.scroll_offset(), 3);
        assert_eq!(screen.visible_rows()[0].currency_code(), "CAD");

        screen.scroll_to_bottom();
        assert_eq!(screen.scroll_offset(), 7);
        assert_eq!(screen.visible_rows().len(), 5);

        screen.page_down();
        assert_eq!(screen.scroll_offset(), 7);

        screen.page_up();
        assert_eq!(screen.scroll_offset(), 2);

        screen.scroll_up(10);
        assert_eq!(screen.scroll_offset(), 0);
    }

    #[test]
    fn short_list_should_not_scroll() {
        let mut screen = loaded(3, 10);
        screen.scroll_down(1);
        assert_eq!(screen.scroll_offset(), 0);
        assert!(screen.collect_pending_view_events().is_empty());
    }

    #[test]
    fn scrolling_should_request_list_redraw() {
        let mut screen = loaded(12, 5);
        screen.scroll_down(1);
        assert_eq!(
            screen.collect_pending_view_events(),
            vec![
                ViewEvent::ListRedrawRequired,
                ViewEvent::StatusBarUpdateRequired
            ]
        );
    }

    #[test]
    fn shrinking_viewport_should_keep_offset_valid() {
        let mut screen = loaded(12, 5);
        screen.scroll_to_bottom();
        screen.set_viewport_height(10);
        assert_eq!(screen.scroll_offset(), 2);
    }

    #[test]
    fn state_changes_should_request_full_redraw() {
        let mut screen = ScreenState::new(5);
        screen.on_load_started();
        assert_eq!(
            screen.collect_pending_view_events(),
            vec![ViewEvent::FullRedrawRequired]
        );
        assert!(screen.collect_pending_view_events().is_empty());
    }
}
