//! # View Events
//!
//! Emitted by the screen state when part of the display is out of date.
//! The controller collects them after each change and asks the renderer to
//! redraw only what is needed.

/// Events emitted when view updates are needed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Full screen redraw required (load state change, terminal resize)
    FullRedrawRequired,

    /// Only the list rows moved (scrolling)
    ListRedrawRequired,

    /// Status bar needs updating
    StatusBarUpdateRequired,
}

impl ViewEvent {
    /// Collapse a batch of events into the cheapest equivalent set
    pub fn coalesce(events: Vec<ViewEvent>) -> Vec<ViewEvent> {
        if events.contains(&ViewEvent::FullRedrawRequired) {
            return vec![ViewEvent::FullRedrawRequired];
        }
        let mut result = Vec::with_capacity(2);
        for event in events {
            if !result.contains(&event) {
                result.push(event);
            }
        }
        result
    }
}
