//! Reactive state of one mounted line chart

use leptos::prelude::*;
use viz_core::{ContainerSize, LineSeries, RenderMode, RenderPhase};

/// Signals driving a `LineChart`. Copy, so it can be captured by event
/// handlers without cloning.
#[derive(Debug, Clone, Copy)]
pub struct LineChartState {
    /// Last series handed to the chart
    pub series: RwSignal<Vec<LineSeries>>,
    /// Measured container size
    pub size: RwSignal<ContainerSize>,
    /// Mode of the most recent draw request
    pub mode: RwSignal<RenderMode>,
    pub phase: RwSignal<RenderPhase>,
    /// Bumped on every draw request so identical layouts still redraw
    pub revision: RwSignal<u64>,
}

impl LineChartState {
    pub fn new(series: Vec<LineSeries>, size: ContainerSize) -> Self {
        Self {
            series: RwSignal::new(series),
            size: RwSignal::new(size),
            mode: RwSignal::new(RenderMode::Initial),
            phase: RwSignal::new(RenderPhase::Unrendered),
            revision: RwSignal::new(0),
        }
    }

    // ========================================================================
    // Draw Requests
    // ========================================================================

    /// Request a full redraw. Returns the mode actually used, which is always
    /// `Initial` for a chart that has never been drawn.
    pub fn request(&self, requested: RenderMode) -> RenderMode {
        let phase = self.phase.get_untracked();
        let mode = phase.effective_mode(requested);
        if mode != requested {
            tracing::debug!(
                requested = requested.label(),
                used = mode.label(),
                phase = phase.label(),
                "chart not rendered yet, drawing from scratch"
            );
        }

        self.mode.set(mode);
        self.revision.update(|r| *r += 1);
        self.phase.set(phase.finish_render());
        mode
    }

    /// The mounted view has just drawn itself from the initial signals.
    /// Record that without requesting another draw.
    pub fn mark_drawn(&self) -> RenderMode {
        self.phase.update(|p| *p = p.finish_render());
        self.mode.get_untracked()
    }

    /// Container changed size: store it and redraw without entrance
    /// animations.
    pub fn resize(&self, size: ContainerSize) -> RenderMode {
        self.phase.update(|p| *p = p.begin_resize());
        self.size.set(size);
        self.request(RenderMode::Resize)
    }

    /// Swap the data in place and replay the line animation
    pub fn replace_series(&self, series: Vec<LineSeries>) -> RenderMode {
        self.series.set(series);
        self.request(RenderMode::Incremental)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viz_core::{GroupId, LinePoint};

    fn series(values: &[f64]) -> Vec<LineSeries> {
        vec![
            LineSeries::new(GroupId::new("ISD").unwrap(), "ISD").with_points(
                values
                    .iter()
                    .map(|v| LinePoint::new(format!("P{}", v), *v))
                    .collect(),
            ),
        ]
    }

    #[test]
    fn test_first_request_is_initial() {
        let state = LineChartState::new(series(&[1.0]), ContainerSize::new(800.0, 400.0));
        assert_eq!(state.request(RenderMode::Incremental), RenderMode::Initial);
        assert_eq!(state.phase.get_untracked(), RenderPhase::Rendered);
        assert_eq!(state.revision.get_untracked(), 1);
    }

    #[test]
    fn test_resize_before_first_draw() {
        let state = LineChartState::new(series(&[1.0]), ContainerSize::default());
        let mode = state.resize(ContainerSize::new(640.0, 480.0));
        assert_eq!(mode, RenderMode::Initial);
        assert_eq!(state.size.get_untracked(), ContainerSize::new(640.0, 480.0));
    }

    #[test]
    fn test_resize_and_update_after_draw() {
        let state = LineChartState::new(series(&[1.0]), ContainerSize::new(800.0, 400.0));
        state.request(RenderMode::Initial);

        assert_eq!(state.resize(ContainerSize::new(600.0, 400.0)), RenderMode::Resize);
        assert_eq!(state.mode.get_untracked(), RenderMode::Resize);
        assert_eq!(state.phase.get_untracked(), RenderPhase::Rendered);

        assert_eq!(state.replace_series(series(&[1.0, 2.0])), RenderMode::Incremental);
        assert_eq!(state.revision.get_untracked(), 3);
        assert_eq!(state.series.with_untracked(|s| s[0].len()), 2);
    }

    #[test]
    fn test_mark_drawn_keeps_revision() {
        let state = LineChartState::new(series(&[1.0]), ContainerSize::new(800.0, 400.0));
        assert_eq!(state.mark_drawn(), RenderMode::Initial);
        assert_eq!(state.revision.get_untracked(), 0);
        assert_eq!(state.phase.get_untracked(), RenderPhase::Rendered);

        assert_eq!(state.resize(ContainerSize::new(600.0, 400.0)), RenderMode::Resize);
        assert_eq!(state.revision.get_untracked(), 1);
    }
}
