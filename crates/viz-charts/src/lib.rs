//! # viz-charts
//!
//! SVG charts in the manner of D3, rendered with Leptos. Each chart has a
//! pure layout step that turns data and options into plain geometry (tested
//! without a browser) and a component that draws that geometry.
//!
//! - `chartkit`: scales, path data, curves, polar helpers
//! - `line_layout` / `line`: the multi-series line chart
//! - `pie`, `bar`, `radar`: the remaining dashboard charts

pub mod bar;
pub mod chartkit;
pub mod line;
pub mod line_layout;
pub mod pie;
pub mod radar;

pub use bar::*;
pub use chartkit::*;
pub use line::*;
pub use line_layout::*;
pub use pie::*;
pub use radar::*;

pub use viz_core::colors;

use serde::{Deserialize, Serialize};

/// Space between the SVG edge and the plot area, in px
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(all: f64) -> Self {
        Self::new(all, all, all, all)
    }

    /// Line chart default
    pub const fn standard() -> Self {
        Self::new(20.0, 20.0, 30.0, 50.0)
    }

    /// Headroom above the plot for bar legend cards
    pub const fn legend_top() -> Self {
        Self::new(80.0, 20.0, 30.0, 40.0)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::standard()
    }
}

/// Fixed-size SVG canvas and the plot area left inside its margins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, margin: ChartMargin::default() }
    }

    pub fn with_margin(self, margin: ChartMargin) -> Self {
        Self { margin, ..self }
    }

    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// Moves the origin to the plot area's top-left corner
    pub fn inner_transform(&self) -> String {
        translate(self.margin.left, self.margin.top)
    }

    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

/// Make a string safe for use inside an SVG element id
pub fn sanitize_id(raw: &str) -> String {
    let id: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '-' })
        .collect();
    let id = id.trim_matches('-');
    if id.is_empty() { "chart".to_string() } else { id.to_string() }
}
