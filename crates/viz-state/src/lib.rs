//! # viz-state
//!
//! Reactive state management for the chart dashboard.
//! Uses Leptos signals so a chart redraws only when its own inputs change.

pub mod chart;

pub use chart::*;

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use viz_core::RenderMode;

/// Entries kept in the activity log
pub const MAX_EVENTS: usize = 50;

// ============================================================================
// ACTIVITY LOG
// ============================================================================

/// Something that happened to a chart, shown in the status panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartEventKind {
    Mounted,
    Rendered(RenderMode),
    Clicked { group_id: String, index: usize },
    Failed(String),
}

impl ChartEventKind {
    pub fn describe(&self) -> String {
        match self {
            Self::Mounted => "mounted".to_string(),
            Self::Rendered(mode) => format!("rendered ({})", mode.label()),
            Self::Clicked { group_id, index } => format!("clicked {}[{}]", group_id, index),
            Self::Failed(reason) => format!("failed: {}", reason),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEvent {
    pub chart: String,
    pub kind: ChartEventKind,
    pub at: DateTime<Utc>,
}

impl ChartEvent {
    pub fn new(chart: impl Into<String>, kind: ChartEventKind) -> Self {
        Self {
            chart: chart.into(),
            kind,
            at: Utc::now(),
        }
    }

    pub fn time_str(&self) -> String {
        self.at.format("%H:%M:%S").to_string()
    }
}

/// Prepend an event, dropping the oldest beyond [`MAX_EVENTS`]
pub fn push_event(events: &mut Vec<ChartEvent>, event: ChartEvent) {
    events.insert(0, event);
    events.truncate(MAX_EVENTS);
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Global application state with reactive signals
#[derive(Debug, Clone, Copy)]
pub struct AppState {
    /// Set once the current page's delayed chart is mounted
    pub ready: RwSignal<bool>,
    /// Current error message
    pub error: RwSignal<Option<String>>,
    /// Recent chart activity, newest first
    pub events: RwSignal<Vec<ChartEvent>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            ready: RwSignal::new(false),
            error: RwSignal::new(None),
            events: RwSignal::new(Vec::new()),
        }
    }

    pub fn set_ready(&self) {
        self.ready.set(true);
    }

    /// A page with its own delayed chart was entered
    pub fn set_loading(&self) {
        self.ready.set(false);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    /// Record chart activity. Failures also become the current error.
    pub fn record(&self, chart: impl Into<String>, kind: ChartEventKind) {
        let event = ChartEvent::new(chart, kind);
        if let ChartEventKind::Failed(reason) = &event.kind {
            self.error.set(Some(format!("{}: {}", event.chart, reason)));
        }
        self.events.update(|events| push_event(events, event));
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    pub fn latest_event(&self) -> Option<ChartEvent> {
        self.events.with(|events| events.first().cloned())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CONTEXT HELPERS
// ============================================================================

/// Provide app state context to component tree
pub fn provide_app_state() -> AppState {
    let state = AppState::new();
    provide_context(state);
    state
}

/// Use app state from context
pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_is_capped() {
        let mut events = Vec::new();
        for i in 0..MAX_EVENTS + 5 {
            push_event(
                &mut events,
                ChartEvent::new("line", ChartEventKind::Clicked { group_id: "ISD".into(), index: i }),
            );
        }
        assert_eq!(events.len(), MAX_EVENTS);
        assert_eq!(
            events[0].kind,
            ChartEventKind::Clicked { group_id: "ISD".into(), index: MAX_EVENTS + 4 }
        );
    }

    #[test]
    fn test_event_descriptions() {
        assert_eq!(ChartEventKind::Rendered(RenderMode::Resize).describe(), "rendered (resize)");
        assert_eq!(
            ChartEventKind::Clicked { group_id: "Cycle".into(), index: 3 }.describe(),
            "clicked Cycle[3]"
        );
        assert!(ChartEventKind::Failed("boom".into()).is_failure());
    }

    #[test]
    fn test_failure_sets_error() {
        let state = AppState::new();
        state.record("line", ChartEventKind::Failed("container not found".into()));
        assert_eq!(
            state.error.get_untracked().as_deref(),
            Some("line: container not found")
        );
        assert_eq!(state.events.with_untracked(Vec::len), 1);
    }

    #[test]
    fn test_ready_resets_per_page() {
        let state = AppState::new();
        assert!(!state.ready.get_untracked());
        state.set_ready();
        assert!(state.ready.get_untracked());

        state.set_loading();
        assert!(!state.ready.get_untracked());
        state.record("drill-down", ChartEventKind::Mounted);
        assert!(!state.ready.get_untracked());
    }
}
