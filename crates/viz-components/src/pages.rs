//! Demo pages: the chart dashboard and the two drill-down examples

use chrono::Utc;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use viz_charts::{
    BarChart, BarChartConfig, PieChart, PieChartConfig, RadarChart, RadarChartConfig,
};
use viz_core::{LineSeries, RenderMode, Result};
use viz_data::{
    drill_down_series, empty_series, inventory_bar_groups, pie_slices, radar_sets,
    shuffled_station_series, station_series, updated_series,
};
use viz_state::{AppState, ChartEventKind, use_app_state};
use wasm_bindgen_futures::spawn_local;

use crate::{
    EventLog, LineChartHandle, ResizeListener, StatusBar,
    demo::{
        BROKEN_LABELS_CONTAINER, DRILL_DOWN_CONTAINER, MOUNT_DELAY_MS, STATION_CONTAINER,
        drill_down_config, drill_down_start, station_line_config,
    },
};

type HandleSlot = StoredValue<Option<LineChartHandle>, LocalStorage>;

// ============================================================================
// HOSTED CHART PLUMBING
// ============================================================================

/// Run `f` under `owner` so the reactive nodes it creates are disposed with
/// that owner
fn within<T>(owner: Option<&Owner>, f: impl FnOnce() -> T) -> T {
    match owner {
        Some(owner) => owner.with(f),
        None => f(),
    }
}

/// Mount a line chart after the demo delay and park the handle in `slot`.
/// `on_mounted` runs once the handle is in place. The chart belongs to the
/// page that called this, and the page shows as loading until it mounts.
fn mount_later(
    chart: &'static str,
    slot: HandleSlot,
    app: AppState,
    mount: impl FnOnce() -> Result<LineChartHandle> + 'static,
    on_mounted: impl FnOnce(&LineChartHandle) + 'static,
) {
    let owner = Owner::current();
    app.set_loading();

    spawn_local(async move {
        TimeoutFuture::new(MOUNT_DELAY_MS).await;
        if slot.is_disposed() {
            tracing::debug!(chart, "page left before the chart was mounted");
            return;
        }

        match within(owner.as_ref(), mount) {
            Ok(handle) => {
                within(owner.as_ref(), || on_mounted(&handle));
                slot.set_value(Some(handle));
                app.record(chart, ChartEventKind::Mounted);
                app.set_ready();
            }
            Err(err) => {
                tracing::error!(chart, error = %err, "failed to mount line chart");
                app.record(chart, ChartEventKind::Failed(err.to_string()));
            }
        }
    });
}

/// Run a draw request against a mounted chart and log the outcome
fn drive(
    chart: &'static str,
    slot: HandleSlot,
    app: AppState,
    action: impl FnOnce(&LineChartHandle) -> Result<RenderMode>,
) {
    let outcome = slot
        .try_with_value(|handle| handle.as_ref().map(action))
        .flatten();
    match outcome {
        Some(Ok(mode)) => app.record(chart, ChartEventKind::Rendered(mode)),
        Some(Err(err)) => {
            tracing::warn!(chart, error = %err, "line chart request rejected");
            app.record(chart, ChartEventKind::Failed(err.to_string()));
        }
        None => tracing::debug!(chart, "line chart not mounted yet"),
    }
}

/// Log clicked points into the activity log
fn log_clicks(chart: &'static str, app: AppState, handle: &LineChartHandle) {
    handle.on_point_click(move |click| {
        tracing::info!(
            chart,
            group = %click.group_id,
            index = click.index,
            label = %click.point.label_bottom,
            value = click.point.value,
            "point clicked"
        );
        app.record(
            chart,
            ChartEventKind::Clicked {
                group_id: click.group_id.to_string(),
                index: click.index,
            },
        );
    });
}

/// Redraw the chart in `slot` whenever the window is resized. The listener
/// lives as long as the current page.
fn follow_window_size(chart: &'static str, slot: HandleSlot, app: AppState) {
    match ResizeListener::new(move || drive(chart, slot, app, LineChartHandle::resize)) {
        Ok(listener) => {
            StoredValue::new_local(listener);
        }
        Err(err) => {
            tracing::warn!(chart, error = %err, "resize listener unavailable");
            app.record(chart, ChartEventKind::Failed(err.to_string()));
        }
    }
}

fn load_or_log(
    chart: &'static str,
    app: AppState,
    load: fn() -> Result<Vec<LineSeries>>,
) -> Option<Vec<LineSeries>> {
    match load() {
        Ok(series) => Some(series),
        Err(err) => {
            tracing::error!(chart, error = %err, "demo data rejected");
            app.record(chart, ChartEventKind::Failed(err.to_string()));
            None
        }
    }
}

// ============================================================================
// DASHBOARD
// ============================================================================

#[component]
pub fn Dashboard() -> impl IntoView {
    const CHART: &str = "stations";

    let app = use_app_state();
    let slot: HandleSlot = StoredValue::new_local(None);

    let radar = RwSignal::new(radar_sets());
    let highlight = RwSignal::new(None::<usize>);
    let pie = RwSignal::new(pie_slices());
    let bars = RwSignal::new(inventory_bar_groups());

    mount_later(
        CHART,
        slot,
        app,
        move || {
            let config = station_line_config(Utc::now().date_naive())?;
            LineChartHandle::mount(STATION_CONTAINER, station_series()?, config)
        },
        |_| {},
    );
    follow_window_size(CHART, slot, app);

    let swap = move |load: fn() -> Result<Vec<LineSeries>>| {
        if let Some(series) = load_or_log(CHART, app, load) {
            drive(CHART, slot, app, move |handle| handle.set_series(series));
        }
    };

    let row_button = move |label: &'static str, row: Option<usize>| {
        view! {
            <button
                class=move || if highlight.get() == row { "btn active" } else { "btn" }
                on:click=move |_| highlight.set(row)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="dashboard">
            <main class="dash-main">
                <section class="dash-row">
                    <div class="panel radar-container">
                        <div class="panel-header">
                            <span class="panel-title">"Radar"</span>
                            <div class="panel-actions">
                                {row_button("All", None)}
                                {row_button("Row 1", Some(0))}
                                {row_button("Row 2", Some(1))}
                                <button class="btn" on:click=move |_| radar.set(radar_sets())>
                                    "Shuffle"
                                </button>
                            </div>
                        </div>
                        <div class="panel-content">
                            <RadarChart
                                sets=radar
                                highlight=highlight
                                config=RadarChartConfig::default().gradient()
                            />
                        </div>
                    </div>

                    <div class="panel pie-container">
                        <div class="panel-header">
                            <span class="panel-title">"Pie"</span>
                            <div class="panel-actions">
                                <button class="btn" on:click=move |_| pie.set(pie_slices())>
                                    "Shuffle"
                                </button>
                            </div>
                        </div>
                        <div class="panel-content">
                            <PieChart slices=pie />
                        </div>
                    </div>

                    <div class="panel donut-container">
                        <div class="panel-header">
                            <span class="panel-title">"Donut"</span>
                        </div>
                        <div class="panel-content">
                            <PieChart slices=pie config=PieChartConfig::donut().emphasize(0) />
                        </div>
                    </div>
                </section>

                <section class="dash-row">
                    <div class="panel line-container">
                        <div class="panel-header">
                            <span class="panel-title">"Deliveries by Station"</span>
                            <div class="panel-actions">
                                <button class="btn" on:click=move |_| swap(updated_series)>
                                    "Update"
                                </button>
                                <button class="btn" on:click=move |_| swap(shuffled_station_series)>
                                    "Shuffle"
                                </button>
                                <button class="btn" on:click=move |_| swap(empty_series)>
                                    "Empty"
                                </button>
                                <button
                                    class="btn"
                                    on:click=move |_| {
                                        drive(CHART, slot, app, |handle| Ok(handle.render(RenderMode::Initial)))
                                    }
                                >
                                    "Replay"
                                </button>
                            </div>
                        </div>
                        <div class="panel-content">
                            <Show when=move || !app.is_ready()>
                                <div class="loading">"Loading chart…"</div>
                            </Show>
                            <div id={STATION_CONTAINER.trim_start_matches('#')} class="line-host"></div>
                        </div>
                    </div>
                </section>

                <section class="dash-row">
                    <div class="panel bar-container">
                        <div class="panel-header">
                            <span class="panel-title">"Inventory Movements"</span>
                        </div>
                        <div class="panel-content">
                            <BarChart data=bars config=BarChartConfig::compact() />
                        </div>
                    </div>

                    <div class="panel events-container">
                        <div class="panel-header">
                            <span class="panel-title">"Activity"</span>
                        </div>
                        <div class="panel-content">
                            <EventLog />
                        </div>
                    </div>
                </section>
            </main>

            <footer class="dash-footer">
                <StatusBar />
            </footer>
        </div>
    }
}

// ============================================================================
// DRILL-DOWN EXAMPLES
// ============================================================================

/// Drill-down line chart logging clicked points
#[component]
pub fn ExamplePage1() -> impl IntoView {
    const CHART: &str = "drill-down";

    let app = use_app_state();
    let slot: HandleSlot = StoredValue::new_local(None);

    mount_later(
        CHART,
        slot,
        app,
        || {
            let series = drill_down_series(drill_down_start())?;
            LineChartHandle::mount(DRILL_DOWN_CONTAINER, series, drill_down_config(false)?)
        },
        move |handle| log_clicks(CHART, app, handle),
    );

    view! {
        <DrillDownPanel
            title="Drill-down by Period"
            container_id={DRILL_DOWN_CONTAINER.trim_start_matches('#')}
        />
    }
}

/// Two-line period labels, redrawn on window resize
#[component]
pub fn ExamplePage2() -> impl IntoView {
    const CHART: &str = "broken-labels";

    let app = use_app_state();
    let slot: HandleSlot = StoredValue::new_local(None);

    mount_later(
        CHART,
        slot,
        app,
        || {
            let series = drill_down_series(drill_down_start())?;
            LineChartHandle::mount(BROKEN_LABELS_CONTAINER, series, drill_down_config(true)?)
        },
        move |handle| log_clicks(CHART, app, handle),
    );
    follow_window_size(CHART, slot, app);

    view! {
        <DrillDownPanel
            title="Drill-down, Two-line Labels"
            container_id={BROKEN_LABELS_CONTAINER.trim_start_matches('#')}
        />
    }
}

#[component]
fn DrillDownPanel(title: &'static str, container_id: &'static str) -> impl IntoView {
    view! {
        <div class="dashboard">
            <main class="dash-main">
                <section class="dash-row">
                    <div class="panel line-container">
                        <div class="panel-header">
                            <span class="panel-title">{title}</span>
                        </div>
                        <div class="panel-content">
                            <div id=container_id class="line-host"></div>
                        </div>
                    </div>

                    <div class="panel events-container">
                        <div class="panel-header">
                            <span class="panel-title">"Clicked Points"</span>
                        </div>
                        <div class="panel-content">
                            <EventLog />
                        </div>
                    </div>
                </section>
            </main>

            <footer class="dash-footer">
                <StatusBar />
            </footer>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viz_core::ContainerSize;
    use viz_state::LineChartState;

    #[test]
    fn test_late_chart_state_belongs_to_page() {
        let page = Owner::new();
        let state = within(Some(&page), || {
            LineChartState::new(Vec::new(), ContainerSize::default())
        });
        assert!(!state.revision.is_disposed());

        page.cleanup();
        assert!(state.revision.is_disposed());
        assert!(state.series.is_disposed());
    }
}
