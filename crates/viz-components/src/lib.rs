//! # viz-components
//!
//! Leptos UI for the chart dashboard: the imperative line chart host, the
//! demo pages and the status panels.

pub mod demo;
pub mod host;
pub mod pages;
pub mod status;

pub use host::*;
pub use pages::*;
pub use status::*;
