//! # viz-core
//!
//! Core domain types for the D3-style chart dashboard.
//! Holds the chart data model, input validation, the render lifecycle FSM
//! and the value formatting strategies shared by every chart.

pub mod bar;
pub mod error;
pub mod pie;
pub mod radar;
pub mod series;

pub use bar::*;
pub use error::*;
pub use pie::*;
pub use radar::*;
pub use series::*;

use serde::{Deserialize, Serialize};

// ============================================================================
// STRATEGY PATTERN: Formatters
// ============================================================================

/// Strategy trait for turning a numeric value into label text
pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// Shortest plain rendering: integers without decimals, otherwise up to
/// two decimals with trailing zeros removed (`10.20` -> `10.2`).
#[derive(Debug, Clone, Default)]
pub struct PlainFormatter;

impl ValueFormatter for PlainFormatter {
    fn format(&self, value: f64) -> String {
        if value.fract() == 0.0 {
            return format!("{:.0}", value);
        }
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Percentage axis formatter (`40` -> `40%`)
#[derive(Debug, Clone, Default)]
pub struct PercentFormatter;

impl ValueFormatter for PercentFormatter {
    fn format(&self, value: f64) -> String {
        format!("{}%", PlainFormatter.format(value))
    }
}

/// Thousands separated integers (`75354` -> `75,354`)
#[derive(Debug, Clone)]
pub struct GroupedNumberFormatter {
    pub separator: char,
}

impl Default for GroupedNumberFormatter {
    fn default() -> Self {
        Self { separator: ',' }
    }
}

impl ValueFormatter for GroupedNumberFormatter {
    fn format(&self, value: f64) -> String {
        let rounded = value.round();
        let sign = if rounded < 0.0 { "-" } else { "" };
        let digits = format!("{:.0}", rounded.abs());

        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(self.separator);
            }
            out.push(c);
        }
        format!("{}{}", sign, out)
    }
}

// ============================================================================
// CONTAINER GEOMETRY
// ============================================================================

/// Measured client size of a chart's container element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp the height to an optional maximum
    pub fn capped(self, max_height: Option<f64>) -> Self {
        match max_height {
            Some(max) if max > 0.0 => Self::new(self.width, self.height.min(max)),
            _ => self,
        }
    }
}

// ============================================================================
// RENDER LIFECYCLE
// ============================================================================

/// What kind of redraw is requested. Every mode is a full redraw; the mode
/// only decides which entrance animations play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// First draw: every entrance animation plays
    #[default]
    Initial,
    /// Container changed size: no entrance animations
    Resize,
    /// Data swapped in place: only the line draw animation plays
    Incremental,
}

impl RenderMode {
    pub fn animates_lines(&self) -> bool {
        matches!(self, Self::Initial | Self::Incremental)
    }

    pub fn animates_areas(&self) -> bool {
        matches!(self, Self::Initial)
    }

    pub fn animates_dots(&self) -> bool {
        matches!(self, Self::Initial)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Resize => "resize",
            Self::Incremental => "incremental",
        }
    }
}

/// Chart lifecycle FSM: `Unrendered -> Rendered -> (Resizing -> Rendered)*`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPhase {
    #[default]
    Unrendered,
    Rendered,
    Resizing,
}

impl RenderPhase {
    /// Mode actually used for a request. Nothing exists to be resized or
    /// updated before the first draw, so that is always `Initial`.
    pub fn effective_mode(&self, requested: RenderMode) -> RenderMode {
        match self {
            Self::Unrendered => RenderMode::Initial,
            _ => requested,
        }
    }

    /// Enter `Resizing`. Only a rendered chart can be resized.
    pub fn begin_resize(self) -> Self {
        match self {
            Self::Rendered | Self::Resizing => Self::Resizing,
            Self::Unrendered => Self::Unrendered,
        }
    }

    /// A draw finished
    pub fn finish_render(self) -> Self {
        Self::Rendered
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unrendered => "Unrendered",
            Self::Rendered => "Rendered",
            Self::Resizing => "Resizing",
        }
    }
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const CRIMSON: &str = "#B02A4C";
    pub const CRIMSON_MIST: &str = "#F9EEF1CC";
    pub const NAVY: &str = "#0F0E38";
    pub const NAVY_MIST: &str = "#D0DDF7";
    pub const GOAL: &str = "#628AB3";
    pub const AXIS: &str = "#DDDDDD";
    pub const HATCH: &str = "#D8D8D8";
    pub const TEXT: &str = "#000000";
    pub const TEXT_MUTED: &str = "#8B8B8B";
    pub const TEXT_SOFT: &str = "#A6A6A6";
    pub const LEGEND_TEXT: &str = "#737270";
    pub const LEGEND_BG: &str = "#F2F2F0";
    pub const LEGEND_BORDER: &str = "#ADADAC";
    pub const WHITE: &str = "#FFFFFF";

    /// Default pie palette, cycled by slice index
    pub const PIE_PALETTE: [&str; 3] = ["#e7a988", "#c9562b", "#8b3215"];

    pub mod radar {
        pub const TEXT: &str = "#222222";
        pub const GRID: &str = "#D3D3D3";
        pub const GRID_ACCENT: &str = "#F9F9F9";
        pub const LINE: &str = "#06A9BA";
        pub const BG: &str = "#F6F6F6";
    }

    /// `#rrggbb` plus alpha as an `rgba()` string; unparsable input is
    /// returned unchanged.
    pub fn with_alpha(hex: &str, alpha: f64) -> String {
        let digits = hex.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match (digits.len() >= 6, channel(0), channel(2), channel(4)) {
            (true, Some(r), Some(g), Some(b)) => {
                format!("rgba({}, {}, {}, {:.3})", r, g, b, alpha.clamp(0.0, 1.0))
            }
            _ => hex.to_string(),
        }
    }

    /// Linear blend between two RGB colours, `t` in `[0, 1]`
    pub fn blend(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> String {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            mix(from.0, to.0),
            mix(from.1, to.1),
            mix(from.2, to.2)
        )
    }
}
