//! Radar chart with per-row highlighting
//!
//! Spokes come from the set with the largest value; every set is drawn as a
//! closed cardinal curve with dots. Highlighting a row hides all other rows
//! and the empty-message block.

use crate::{
    ChartMargin,
    chartkit::{
        BandScale, CardinalClosedPath, LinearScale, PathGenerator, Scale, polar_from_x_axis,
        side_anchor, translate,
    },
    colors,
};
use leptos::prelude::*;
use std::f64::consts::{FRAC_PI_2, TAU};
use viz_core::{PlainFormatter, RadarSet, ValueFormatter, dominant_set};

const LABEL_RADIUS_SCALE: f64 = 1.1;
const CENTER_DROP: f64 = 55.0;
const GRADIENT_FROM: (u8, u8, u8) = (21, 173, 188);
const GRADIENT_TO: (u8, u8, u8) = (65, 255, 82);

/// How plotted rows are coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadarColoring {
    /// Every row uses the palette line colour
    #[default]
    Single,
    /// Rows are spread along a teal-to-green ramp
    Gradient,
}

/// Radar chart configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RadarChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
    pub dot_radius: f64,
    /// Inner white disc radius, in data units
    pub baseline_value: f64,
    /// Extra rotation on top of the 12 o'clock start
    pub angle_offset: f64,
    pub coloring: RadarColoring,
    pub empty_message: String,
}

impl Default for RadarChartConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 640.0,
            margin: ChartMargin::uniform(60.0),
            dot_radius: 4.0,
            baseline_value: 2.5,
            angle_offset: 0.0,
            coloring: RadarColoring::Single,
            empty_message: "Not available".to_string(),
        }
    }
}

impl RadarChartConfig {
    pub fn gradient(mut self) -> Self {
        self.coloring = RadarColoring::Gradient;
        self
    }

    /// Radius available for the plot itself
    pub fn bounded_radius(&self) -> f64 {
        let radius = (self.width.min(self.height) / 2.0).floor();
        let m = self.margin;
        (radius - (m.top + m.bottom).max(m.left + m.right) / 2.0).max(0.0)
    }

    /// Centre of the plot inside the SVG
    pub fn center(&self) -> (f64, f64) {
        let bounded_width = self.width - self.margin.left - self.margin.right;
        let bounded_height = self.height - self.margin.top * 2.0;
        (
            self.margin.left + bounded_width / 2.0,
            bounded_height / 2.0 + CENTER_DROP,
        )
    }

    /// Line colour of row `index` out of `count`
    pub fn row_color(&self, index: usize, count: usize) -> String {
        match self.coloring {
            RadarColoring::Single => colors::radar::LINE.to_string(),
            RadarColoring::Gradient => {
                let t = if count > 1 { index as f64 / (count - 1) as f64 } else { 0.0 };
                colors::blend(GRADIENT_FROM, GRADIENT_TO, t)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarSpoke {
    pub label: String,
    pub end: (f64, f64),
    pub label_pos: (f64, f64),
    pub anchor: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarTick {
    pub value: f64,
    pub radius: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarDot {
    pub x: f64,
    pub y: f64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarPlot {
    pub row: usize,
    pub path: String,
    pub color: String,
    pub dots: Vec<RadarDot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarLayout {
    pub bounded_radius: f64,
    pub baseline_radius: f64,
    pub max_value: f64,
    pub spokes: Vec<RadarSpoke>,
    pub ticks: Vec<RadarTick>,
    pub plots: Vec<RadarPlot>,
}

impl RadarLayout {
    /// `None` when there is no set with any axis to draw
    pub fn compute(sets: &[RadarSet], config: &RadarChartConfig) -> Option<Self> {
        let (dominant, max_value) = dominant_set(sets)?;
        let axes: Vec<&str> = sets[dominant].axes.iter().map(|a| a.axis.as_str()).collect();
        if axes.is_empty() {
            return None;
        }

        let bounded = config.bounded_radius();
        let start = -FRAC_PI_2 + config.angle_offset;
        let angles = BandScale::new(axes.len()).range(start, start + TAU);
        let radius = LinearScale::new().domain(0.0, max_value).range(0.0, bounded);
        let angle_of = |axis: &str| axes.iter().position(|a| *a == axis).map(|i| angles.scale(i));

        let spokes = axes
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let angle = angles.scale(i);
                let label_pos = polar_from_x_axis(bounded * LABEL_RADIUS_SCALE, angle);
                RadarSpoke {
                    label: label.to_string(),
                    end: polar_from_x_axis(bounded, angle),
                    label_pos,
                    anchor: side_anchor(label_pos.0, 5.0),
                }
            })
            .collect();

        let ticks = radius
            .nice_ticks(5)
            .into_iter()
            .filter(|t| *t > 0.0)
            .map(|t| RadarTick {
                value: t,
                radius: radius.scale(t),
                label: (t < max_value).then(|| PlainFormatter.format(t)),
            })
            .collect();

        let curve = CardinalClosedPath::default();
        let plots = sets
            .iter()
            .enumerate()
            .map(|(row, set)| {
                let (points, dots): (Vec<(f64, f64)>, Vec<RadarDot>) = set
                    .axes
                    .iter()
                    .filter_map(|a| {
                        let angle = angle_of(&a.axis)?;
                        let value = a.value_or_zero();
                        let (x, y) = polar_from_x_axis(radius.scale(value), angle);
                        let title = format!("{}: {}", a.axis, PlainFormatter.format(value));
                        Some(((x, y), RadarDot { x, y, title }))
                    })
                    .unzip();

                RadarPlot {
                    row,
                    path: curve.generate(&points),
                    color: config.row_color(row, sets.len()),
                    dots,
                }
            })
            .collect();

        Some(Self {
            bounded_radius: bounded,
            baseline_radius: radius.scale(config.baseline_value),
            max_value,
            spokes,
            ticks,
            plots,
        })
    }
}

/// Radar chart component. `highlight` shows a single row; `None` shows all
/// rows together with the empty-message block.
#[component]
pub fn RadarChart(
    #[prop(into)] sets: Signal<Vec<RadarSet>>,
    #[prop(into, default = Signal::stored(None))] highlight: Signal<Option<usize>>,
    #[prop(optional)] config: Option<RadarChartConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let (cx, cy) = config.center();
    let width = config.width;
    let height = config.height;
    let dot_radius = config.dot_radius;
    let message = config.empty_message.clone();

    let layout = Memo::new(move |_| RadarLayout::compute(&sets.get(), &config));

    let row_visibility = move |row: usize| match highlight.get() {
        Some(selected) if selected != row => "hidden",
        _ => "visible",
    };

    view! {
        <svg
            class="radar-chart"
            viewBox=format!("0 0 {} {}", width, height)
            preserveAspectRatio="xMidYMid meet"
            style="width: 100%; height: 100%;"
        >
            <rect width=width height=height fill=colors::radar::BG />
            <g transform=translate(cx, cy)>
                {move || {
                    layout.get().map(|layout| {
                        let ticks = layout
                            .ticks
                            .iter()
                            .map(|tick| {
                                view! {
                                    <g>
                                        <circle
                                            class="tick-circle"
                                            r=tick.radius
                                            fill="none"
                                            stroke=colors::radar::GRID
                                            stroke-dasharray="2 2"
                                        />
                                        {tick.label.clone().map(|label| view! {
                                            <text
                                                x="3"
                                                y={-tick.radius - 4.0}
                                                class="tick-label"
                                                fill=colors::with_alpha(colors::radar::TEXT, 0.5)
                                                font-size="1rem"
                                            >
                                                {label}
                                            </text>
                                        })}
                                    </g>
                                }
                            })
                            .collect_view();

                        let spokes = layout
                            .spokes
                            .iter()
                            .map(|spoke| {
                                view! {
                                    <line
                                        x2=spoke.end.0
                                        y2=spoke.end.1
                                        stroke=colors::radar::GRID
                                        stroke-dasharray="2 2"
                                    />
                                    <text
                                        x=spoke.label_pos.0
                                        y=spoke.label_pos.1
                                        text-anchor=spoke.anchor
                                        dominant-baseline="middle"
                                        fill=colors::radar::TEXT
                                        font-size="1rem"
                                    >
                                        {spoke.label.clone()}
                                    </text>
                                }
                            })
                            .collect_view();

                        let plots = layout
                            .plots
                            .into_iter()
                            .map(|plot| {
                                let row = plot.row;
                                let dots = plot
                                    .dots
                                    .into_iter()
                                    .map(|dot| {
                                        view! {
                                            <circle cx=dot.x cy=dot.y r=dot_radius>
                                                <title>{dot.title}</title>
                                            </circle>
                                        }
                                    })
                                    .collect_view();
                                view! {
                                    <g
                                        class="plot"
                                        data-row-ind=row
                                        visibility=move || row_visibility(row)
                                    >
                                        <path
                                            d=plot.path
                                            fill=colors::with_alpha(&plot.color, 0.15)
                                            stroke=plot.color.clone()
                                        />
                                        <g fill=plot.color>{dots}</g>
                                    </g>
                                }
                            })
                            .collect_view();

                        view! {
                            <g class="peripherals">
                                <circle r=layout.bounded_radius fill=colors::WHITE />
                                <circle
                                    r=layout.bounded_radius
                                    fill=colors::with_alpha(colors::radar::GRID_ACCENT, 0.075)
                                />
                                <circle r=layout.baseline_radius fill=colors::WHITE />
                                {ticks}
                                {spokes}
                            </g>
                            <g class="plots">{plots}</g>
                        }
                    })
                }}
            </g>
            <text
                class="radar-empty-msg"
                x={width / 2.0}
                y={height - 24.0}
                text-anchor="middle"
                fill=colors::radar::TEXT
                font-size="1rem"
                opacity=move || if highlight.get().is_some() { "0" } else { "1" }
            >
                {message}
            </text>
        </svg>
    }
}
