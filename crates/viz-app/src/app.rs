//! Application shell: document title, navigation and routes

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{A, Route, Router, Routes},
    path,
};
use viz_components::{Dashboard, ExamplePage1, ExamplePage2};
use viz_state::provide_app_state;

/// Navigation entries, in display order
const NAV: [(&str, &str); 3] = [
    ("/", "Dashboard"),
    ("/example-page1", "Example Page 1"),
    ("/example-page2", "Example Page 2"),
];

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_app_state();

    view! {
        <Title text="D3 Chart Dash" />
        <Router>
            <nav class="dash-header">
                <span class="dash-brand">"D3 Chart Dash"</span>
                {NAV
                    .iter()
                    .map(|(href, label)| {
                        view! {
                            <A href=*href attr:class="nav-link">
                                {*label}
                            </A>
                        }
                    })
                    .collect_view()}
            </nav>
            <Routes fallback=|| view! { <div class="empty-state">"Page not found"</div> }>
                <Route path=path!("/") view=Dashboard />
                <Route path=path!("/example-page1") view=ExamplePage1 />
                <Route path=path!("/example-page2") view=ExamplePage2 />
            </Routes>
        </Router>
    }
}
