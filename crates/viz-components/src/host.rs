//! Imperative host for the line chart
//!
//! A [`LineChartHandle`] owns one container element found by CSS selector,
//! the reactive [`LineChartState`] driving the chart inside it, and the
//! mounted view. Dropping the handle unmounts the chart.

use std::any::Any;

use leptos::prelude::*;
use viz_charts::{LineChart, LineChartConfig, PointClick, sanitize_id};
use viz_core::{ChartError, ContainerSize, LineSeries, RenderMode, Result, validate_series};
use viz_state::LineChartState;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{HtmlElement, Window};

/// Used when the container has not been laid out yet
pub const FALLBACK_WIDTH: f64 = 960.0;
pub const FALLBACK_HEIGHT: f64 = 500.0;

/// Size to draw at for a measured `clientWidth` / `clientHeight`
pub fn measured_size(width: i32, height: i32) -> ContainerSize {
    let width = if width > 0 { width as f64 } else { FALLBACK_WIDTH };
    let height = if height > 0 { height as f64 } else { FALLBACK_HEIGHT };
    ContainerSize::new(width, height)
}

/// Chart id derived from the container selector unless the caller set one
pub fn chart_id_for(selector: &str, config: &LineChartConfig) -> String {
    if config.chart_id == LineChartConfig::default().chart_id {
        sanitize_id(selector)
    } else {
        config.chart_id.clone()
    }
}

fn window() -> Result<Window> {
    web_sys::window().ok_or(ChartError::NoWindow)
}

fn find_container(selector: &str) -> Result<HtmlElement> {
    let document = window()?.document().ok_or(ChartError::NoWindow)?;
    let element = document
        .query_selector(selector)
        .map_err(|_| ChartError::InvalidSelector(selector.to_string()))?
        .ok_or_else(|| ChartError::ContainerNotFound(selector.to_string()))?;
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| ChartError::ContainerNotHtml(selector.to_string()))
}

fn measure(container: &HtmlElement) -> ContainerSize {
    measured_size(container.client_width(), container.client_height())
}

// ============================================================================
// LINE CHART HANDLE
// ============================================================================

/// A line chart mounted into a caller-owned container
pub struct LineChartHandle {
    selector: String,
    container: HtmlElement,
    state: LineChartState,
    click_hook: RwSignal<Option<Callback<PointClick>>>,
    _mounted: Box<dyn Any>,
}

impl LineChartHandle {
    /// Find the container, validate the input and draw the chart for the
    /// first time. The view draws once on mount; no second request follows.
    pub fn mount(selector: &str, series: Vec<LineSeries>, config: LineChartConfig) -> Result<Self> {
        config.validate()?;
        validate_series(&series)?;

        let container = find_container(selector)?;
        let size = measure(&container);
        let chart_id = chart_id_for(selector, &config);
        let config = config.chart_id(chart_id);

        let state = LineChartState::new(series, size);
        let click_hook: RwSignal<Option<Callback<PointClick>>> = RwSignal::new(None);
        let dispatch = Callback::new(move |click: PointClick| {
            if let Some(hook) = click_hook.get_untracked() {
                hook.run(click);
            }
        });

        let mounted = leptos::mount::mount_to(container.clone(), move || {
            view! {
                <LineChart
                    series=state.series
                    size=state.size
                    mode=state.mode
                    revision=state.revision
                    config=config
                    on_point_click=dispatch
                />
            }
        });

        let handle = Self {
            selector: selector.to_string(),
            container,
            state,
            click_hook,
            _mounted: Box::new(mounted),
        };
        handle.state.mark_drawn();

        tracing::info!(
            selector,
            width = size.width,
            height = size.height,
            "line chart mounted"
        );
        Ok(handle)
    }

    /// Full redraw; a chart never drawn before always draws as `Initial`
    pub fn render(&self, mode: RenderMode) -> RenderMode {
        self.state.request(mode)
    }

    /// Re-measure the container and redraw without entrance animations
    pub fn resize(&self) -> Result<RenderMode> {
        if !self.container.is_connected() {
            tracing::warn!(selector = %self.selector, "resize on a detached container");
            return Err(ChartError::ContainerDetached(self.selector.clone()));
        }
        let size = measure(&self.container);
        tracing::debug!(selector = %self.selector, width = size.width, height = size.height, "resize");
        Ok(self.state.resize(size))
    }

    /// Swap in new data and replay the line animation
    pub fn set_series(&self, series: Vec<LineSeries>) -> Result<RenderMode> {
        validate_series(&series)?;
        Ok(self.state.replace_series(series))
    }

    /// Install the dot click hook, replacing any previous one
    pub fn on_point_click(&self, hook: impl Fn(PointClick) + Send + Sync + 'static) {
        self.click_hook.set(Some(Callback::new(hook)));
    }
}

// ============================================================================
// RESIZE LISTENER
// ============================================================================

/// Window `resize` subscription, removed again on drop
pub struct ResizeListener {
    window: Window,
    closure: Closure<dyn FnMut()>,
}

impl ResizeListener {
    pub fn new(on_resize: impl FnMut() + 'static) -> Result<Self> {
        let window = window()?;
        let closure = Closure::<dyn FnMut()>::wrap(Box::new(on_resize));
        window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(|_| ChartError::NoWindow)?;
        tracing::debug!("window resize listener attached");
        Ok(Self { window, closure })
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        let removed = self
            .window
            .remove_event_listener_with_callback("resize", self.closure.as_ref().unchecked_ref());
        if removed.is_err() {
            tracing::warn!("failed to detach window resize listener");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measured_size_falls_back_when_unlaid() {
        assert_eq!(measured_size(800, 420), ContainerSize::new(800.0, 420.0));
        assert_eq!(measured_size(0, 0), ContainerSize::new(FALLBACK_WIDTH, FALLBACK_HEIGHT));
        assert_eq!(measured_size(640, -1), ContainerSize::new(640.0, FALLBACK_HEIGHT));
    }

    #[test]
    fn test_chart_id_follows_selector() {
        let config = LineChartConfig::default();
        assert_eq!(chart_id_for("#svgLineContainer", &config), "svgLineContainer");

        let named = LineChartConfig::default().chart_id("drill");
        assert_eq!(chart_id_for("#svgLineContainer", &named), "drill");
    }
}
