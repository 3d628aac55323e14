//! # viz-data
//!
//! Demo datasets for the chart dashboard. Fixed datasets mirror the
//! delivery/inventory figures shown on the demo pages; random generators
//! take an explicit [`rand::Rng`] so tests can seed them, with thread-rng
//! wrappers for the UI.

pub mod line;
pub mod samples;

pub use line::*;
pub use samples::*;
