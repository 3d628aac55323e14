//! Pie and donut charts
//!
//! Unsorted pie layout starting at 12 o'clock and running clockwise, like
//! `d3.pie().sort(null)`.

use crate::chartkit::{arc_centroid, arc_path, translate};
use leptos::prelude::*;
use std::f64::consts::TAU;
use viz_core::{PieKind, PieSlice, PlainFormatter, ValueFormatter, colors, pie_total};

/// Pie chart configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PieChartConfig {
    pub width: f64,
    pub height: f64,
    /// Outer radius is `radius - 80`; the remaining ring holds value labels
    pub radius: f64,
    pub inner_radius: f64,
    pub kind: PieKind,
    pub palette: Vec<String>,
    /// Slice drawn slightly enlarged
    pub emphasis: Option<usize>,
    pub emphasis_scale: f64,
    /// Horizontal and vertical distance of value labels from the centre
    pub label_radius: (f64, f64),
}

impl Default for PieChartConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 640.0,
            radius: 320.0,
            inner_radius: 0.0,
            kind: PieKind::Pie,
            palette: colors::PIE_PALETTE.iter().map(|c| c.to_string()).collect(),
            emphasis: None,
            emphasis_scale: 1.06,
            label_radius: (280.0, 270.0),
        }
    }
}

impl PieChartConfig {
    /// Donut variant with a 170px hole
    pub fn donut() -> Self {
        Self {
            kind: PieKind::Donut,
            inner_radius: 170.0,
            ..Self::default()
        }
    }

    pub fn emphasize(mut self, index: usize) -> Self {
        self.emphasis = Some(index);
        self
    }

    pub fn outer_radius(&self) -> f64 {
        (self.radius - 80.0).max(0.0)
    }

    /// Inner radius actually used: a plain pie has no hole
    pub fn effective_inner_radius(&self) -> f64 {
        match self.kind {
            PieKind::Pie => 0.0,
            PieKind::Donut => self.inner_radius.clamp(0.0, self.outer_radius()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieArc {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub path: String,
    pub color: String,
    pub label: String,
    pub label_pos: (f64, f64),
    pub emphasized: bool,
}

/// Slice angles in input order. Negative and non-finite values count as 0.
pub fn pie_angles(slices: &[PieSlice]) -> Vec<(f64, f64)> {
    let total = pie_total(slices);
    let mut start = 0.0;
    slices
        .iter()
        .map(|slice| {
            let value = if slice.value.is_finite() && slice.value > 0.0 { slice.value } else { 0.0 };
            let span = if total > 0.0 { value / total * TAU } else { 0.0 };
            let angles = (start, start + span);
            start += span;
            angles
        })
        .collect()
}

/// Compute the arcs of a pie/donut centred on the origin
pub fn pie_layout(slices: &[PieSlice], config: &PieChartConfig) -> Vec<PieArc> {
    let inner = config.effective_inner_radius();
    let outer = config.outer_radius();
    let palette_len = config.palette.len().max(1);

    pie_angles(slices)
        .into_iter()
        .zip(slices)
        .enumerate()
        .filter(|(_, ((start, end), _))| end > start)
        .map(|(i, ((start, end), slice))| {
            let (cx, cy) = arc_centroid(inner, outer, start, end);
            let h = cx.hypot(cy);
            let label_pos = if h > 0.0 {
                (cx / h * config.label_radius.0, cy / h * config.label_radius.1)
            } else {
                (0.0, 0.0)
            };

            PieArc {
                index: i,
                start_angle: start,
                end_angle: end,
                path: arc_path(inner, outer, start, end),
                color: slice.color.clone().unwrap_or_else(|| {
                    config
                        .palette
                        .get(i % palette_len)
                        .cloned()
                        .unwrap_or_else(|| colors::PIE_PALETTE[0].to_string())
                }),
                label: PlainFormatter.format(slice.value),
                label_pos,
                emphasized: config.emphasis == Some(i),
            }
        })
        .collect()
}

/// Pie / donut chart component
#[component]
pub fn PieChart(
    #[prop(into)] slices: Signal<Vec<PieSlice>>,
    #[prop(optional)] config: Option<PieChartConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let width = config.width;
    let height = config.height;
    let emphasis_scale = config.emphasis_scale;
    let class = config.kind.css_class();

    let arcs = move || pie_layout(&slices.get(), &config);

    view! {
        <svg
            class=class
            viewBox=format!("0 0 {} {}", width, height)
            preserveAspectRatio="xMidYMid meet"
            style="width: 100%; height: 100%;"
        >
            <g transform=format!("{} scale(0.94)", translate(width / 2.0, height / 2.0))>
                {move || {
                    arcs()
                        .into_iter()
                        .map(|arc| {
                            let transform = arc
                                .emphasized
                                .then(|| format!("scale({})", emphasis_scale));
                            view! {
                                <g class="arc" transform=transform>
                                    <path d=arc.path fill=arc.color.clone() />
                                    <text
                                        transform=translate(arc.label_pos.0, arc.label_pos.1)
                                        text-anchor="middle"
                                        dy="0.32em"
                                        fill=colors::TEXT
                                        font-size="14"
                                    >
                                        {arc.label}
                                    </text>
                                </g>
                            }
                        })
                        .collect_view()
                }}
            </g>
        </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn slices(values: &[f64]) -> Vec<PieSlice> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| PieSlice::new(format!("s{}", i), *v))
            .collect()
    }

    #[test]
    fn test_angles_keep_input_order() {
        let angles = pie_angles(&slices(&[1.0, 3.0]));
        assert_eq!(angles[0], (0.0, TAU / 4.0));
        assert_eq!(angles[1].0, TAU / 4.0);
        assert!((angles[1].1 - TAU).abs() < 1e-12);
    }

    #[test]
    fn test_zero_total_has_no_arcs() {
        assert!(pie_layout(&slices(&[0.0, 0.0]), &PieChartConfig::default()).is_empty());
        assert!(pie_layout(&[], &PieChartConfig::default()).is_empty());
    }

    #[test]
    fn test_palette_cycles_and_slice_color_wins() {
        let mut data = slices(&[1.0, 1.0, 1.0, 1.0]);
        data[1] = data[1].clone().with_color("#123456");
        let arcs = pie_layout(&data, &PieChartConfig::default());

        assert_eq!(arcs[0].color, colors::PIE_PALETTE[0]);
        assert_eq!(arcs[1].color, "#123456");
        assert_eq!(arcs[3].color, colors::PIE_PALETTE[0]);
    }

    #[test]
    fn test_donut_uses_inner_radius() {
        let config = PieChartConfig::donut();
        assert_eq!(config.effective_inner_radius(), 170.0);
        assert_eq!(PieChartConfig::default().effective_inner_radius(), 0.0);
        assert_eq!(config.outer_radius(), 240.0);
    }

    #[test]
    fn test_label_follows_centroid_direction() {
        // A single half-slice on the right: centroid points to 3 o'clock
        let arcs = pie_layout(&slices(&[1.0, 1.0]), &PieChartConfig::default());
        let (x, y) = arcs[0].label_pos;
        assert!((x - 280.0).abs() < 1e-9);
        assert!(y.abs() < 1e-9);
        assert!((arcs[1].start_angle - PI).abs() < 1e-12);
    }

    #[test]
    fn test_emphasis_marks_one_slice() {
        let config = PieChartConfig::default().emphasize(1);
        let arcs = pie_layout(&slices(&[1.0, 2.0, 3.0]), &config);
        let marked: Vec<usize> = arcs.iter().filter(|a| a.emphasized).map(|a| a.index).collect();
        assert_eq!(marked, vec![1]);
    }
}
