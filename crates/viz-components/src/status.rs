//! Status bar and chart activity log

use leptos::prelude::*;
use viz_state::use_app_state;

#[component]
pub fn StatusBar() -> impl IntoView {
    let state = use_app_state();
    let ready = state.ready;
    let error = state.error;

    view! {
        <div class="status-bar">
            <div class="sb-charts">
                <span class="sb-label">"Charts:"</span>
                <span class=move || if ready.get() { "sb-value ready" } else { "sb-value loading" }>
                    {move || if ready.get() { "ready" } else { "loading" }}
                </span>
            </div>

            {move || {
                state.latest_event().map(|event| {
                    view! {
                        <div class="sb-latest">
                            <span class="sb-time">{event.time_str()}</span>
                            <span class="sb-event">
                                {format!("{} {}", event.chart, event.kind.describe())}
                            </span>
                        </div>
                    }
                })
            }}

            {move || {
                error.get().map(|e| {
                    view! {
                        <div class="sb-error">
                            <span class="error-icon">"⚠"</span>
                            <span class="error-msg">{e}</span>
                            <button class="error-dismiss" on:click=move |_| state.clear_error()>
                                "×"
                            </button>
                        </div>
                    }
                })
            }}

            <div class="sb-version">
                <span>"v0.1.0"</span>
            </div>
        </div>
    }
}

/// Recent chart activity, newest first
#[component]
pub fn EventLog() -> impl IntoView {
    let events = use_app_state().events;

    view! {
        <div class="event-log">
            <Show
                when=move || events.with(|e| !e.is_empty())
                fallback=|| view! { <div class="empty-state">"No chart activity yet"</div> }
            >
                <ul class="event-list">
                    {move || {
                        events
                            .get()
                            .into_iter()
                            .map(|event| {
                                let class = if event.kind.is_failure() {
                                    "event-row failed"
                                } else {
                                    "event-row"
                                };
                                view! {
                                    <li class=class>
                                        <span class="event-time">{event.time_str()}</span>
                                        <span class="event-chart">{event.chart.clone()}</span>
                                        <span class="event-kind">{event.kind.describe()}</span>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
}
