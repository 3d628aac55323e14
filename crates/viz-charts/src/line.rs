//! Animated multi-series line chart
//!
//! Renders a [`LineLayout`] as SVG: gradient areas, lines, dots with value
//! labels, percentage axes, dashed hatching, an optional goal line and a
//! legend row. Entrance animations are SMIL `<animate>` elements chosen by
//! the [`RenderMode`] of the draw.

use crate::{
    chartkit::translate,
    colors,
    line_layout::{
        DOT_RADIUS, DotGeometry, LineChartConfig, LineLayout, SeriesGeometry, TICK_PADDING,
    },
};
use leptos::prelude::*;
use viz_core::{ContainerSize, GroupId, LinePoint, LineSeries, RenderMode};

const LINE_DRAW: &str = "2.5s";
const AREA_DELAY: &str = "1s";
const AREA_FADE: &str = "1s";
const DOT_FADE: &str = "0.4s";

/// Payload of a dot click
#[derive(Debug, Clone, PartialEq)]
pub struct PointClick {
    pub group_id: GroupId,
    pub index: usize,
    pub point: LinePoint,
}

impl PointClick {
    fn from_dot(group_id: &GroupId, dot: &DotGeometry) -> Self {
        Self {
            group_id: group_id.clone(),
            index: dot.index,
            point: dot.point.clone(),
        }
    }
}

/// Multi-series line chart.
///
/// Every change of `series`, `size` or `revision` redraws the whole SVG; the
/// `mode` read at that moment decides which entrance animations play.
#[component]
pub fn LineChart(
    #[prop(into)] series: Signal<Vec<LineSeries>>,
    #[prop(into)] size: Signal<ContainerSize>,
    #[prop(into, default = Signal::stored(RenderMode::Initial))] mode: Signal<RenderMode>,
    #[prop(into, default = Signal::stored(0))] revision: Signal<u64>,
    #[prop(optional)] config: Option<LineChartConfig>,
    #[prop(optional)] on_point_click: Option<Callback<PointClick>>,
) -> impl IntoView {
    let config = config.unwrap_or_default();

    let layout = Memo::new(move |_| LineLayout::compute(&series.get(), &config, size.get()));

    view! {
        <div class="line-chart" style="width: 100%; height: 100%;">
            {move || {
                revision.track();
                let mode = mode.get();
                match layout.get() {
                    Ok(layout) => render_svg(layout, mode, on_point_click).into_any(),
                    Err(err) => {
                        tracing::warn!(error = %err, "line chart input rejected");
                        view! { <div class="chart-error">{err.to_string()}</div> }.into_any()
                    }
                }
            }}
        </div>
    }
}

/// A fresh `<svg>` per draw restarts the SMIL timeline, so every draw replays
/// its entrance animations from zero.
fn render_svg(
    layout: LineLayout,
    mode: RenderMode,
    on_point_click: Option<Callback<PointClick>>,
) -> impl IntoView {
    let filter_url = format!("url(#{})", layout.filter_id());
    let plot_height = layout.plot_height;

    let body = if let Some(message) = layout.empty_message.clone() {
        view! {
            <text
                x={layout.plot_width / 2.0}
                y={plot_height / 2.0}
                text-anchor="middle"
                fill=colors::TEXT_MUTED
                font-size="16"
            >
                {message}
            </text>
        }
        .into_any()
    } else {
        let series = layout
            .series
            .iter()
            .map(|s| series_view(s, mode, &filter_url, on_point_click))
            .collect_view();
        view! {
            <>
                {hatching_view(&layout)}
                {series}
                {target_view(&layout)}
            </>
        }
        .into_any()
    };

    view! {
        <svg
            class="line-chart-svg"
            viewBox=layout.viewbox()
            preserveAspectRatio="xMidYMid meet"
            style="width: 100%; height: 100%;"
        >
            {defs_view(&layout)}
            <g transform=layout.origin_transform()>
                {axes_view(&layout)}
                {body}
                {legend_view(&layout)}
            </g>
        </svg>
    }
}

// ============================================================================
// DEFS
// ============================================================================

fn defs_view(layout: &LineLayout) -> impl IntoView + use<> {
    let gradients = layout
        .series
        .iter()
        .map(|s| {
            view! {
                <linearGradient id=s.gradient_id.clone() x1="0" y1="1" x2="0" y2="0">
                    <stop offset="0%" stop-color=colors::WHITE />
                    <stop offset="100%" stop-color=s.colors.area.clone() />
                </linearGradient>
            }
        })
        .collect_view();

    view! {
        <defs>
            {gradients}
            <filter id=layout.filter_id() x="-50%" y="-50%" width="200%" height="200%">
                <feDropShadow dx="0" dy="1" stdDeviation="2" flood-opacity="0.35" />
            </filter>
        </defs>
    }
}

// ============================================================================
// AXES
// ============================================================================

fn axes_view(layout: &LineLayout) -> impl IntoView + use<> {
    let plot_width = layout.plot_width;
    let plot_height = layout.plot_height;
    let rotation = layout.rotation;

    let y_ticks = layout
        .y_ticks
        .iter()
        .map(|tick| {
            view! {
                <text
                    x={-TICK_PADDING}
                    y=tick.y
                    dy="0.32em"
                    text-anchor="end"
                    fill=colors::TEXT
                    font-size="12"
                >
                    {tick.label.clone()}
                </text>
            }
        })
        .collect_view();

    let x_ticks = layout
        .x_ticks
        .iter()
        .map(|tick| {
            let lines = tick
                .lines
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    view! {
                        <tspan x="0" dy={if i == 0 { "0" } else { "1.2em" }}>{line.clone()}</tspan>
                    }
                })
                .collect_view();

            view! {
                <g class="x-tick">
                    <text
                        transform=rotation.transform(tick.x, plot_height + TICK_PADDING)
                        text-anchor=rotation.anchor
                        fill=colors::TEXT
                        font-size="12"
                    >
                        {lines}
                    </text>
                    {tick.top_label.clone().map(|label| {
                        view! {
                            <text
                                x=tick.x
                                y="-6"
                                text-anchor="middle"
                                fill=colors::TEXT_MUTED
                                font-size="11"
                            >
                                {label}
                            </text>
                        }
                    })}
                </g>
            }
        })
        .collect_view();

    let y_title = layout.y_title.clone().map(|title| {
        view! {
            <text
                transform="rotate(-90)"
                x={-plot_height / 2.0}
                y={14.0 - layout.origin.0}
                text-anchor="middle"
                fill=colors::TEXT_MUTED
                font-size="13"
            >
                {title}
            </text>
        }
    });

    view! {
        <g class="axes">
            <line x1="0" y1="0" x2="0" y2=plot_height stroke=colors::AXIS stroke-width="2" />
            <line
                x1="0"
                y1=plot_height
                x2=plot_width
                y2=plot_height
                stroke=colors::AXIS
                stroke-width="2"
            />
            {y_ticks}
            {x_ticks}
            {y_title}
        </g>
    }
}

fn hatching_view(layout: &LineLayout) -> impl IntoView + use<> {
    let plot_height = layout.plot_height;

    let lines = layout
        .hatching
        .then(|| {
            layout
                .x_ticks
                .iter()
                .map(|tick| {
                    view! {
                        <line
                            x1=tick.x
                            y1="0"
                            x2=tick.x
                            y2=plot_height
                            stroke=colors::HATCH
                            stroke-dasharray="5,5"
                        />
                    }
                })
                .collect_view()
        });

    let divider = layout.comparison_divider.map(|x| {
        view! {
            <line
                x1=x
                y1="0"
                x2=x
                y2=plot_height
                stroke=colors::TEXT_SOFT
                stroke-width="1.5"
                stroke-dasharray="2,4"
            />
        }
    });

    view! { <g class="hatching">{lines} {divider}</g> }
}

// ============================================================================
// SERIES
// ============================================================================

fn series_view(
    series: &SeriesGeometry,
    mode: RenderMode,
    filter_url: &str,
    on_point_click: Option<Callback<PointClick>>,
) -> impl IntoView + use<> {
    let area_fill = format!("url(#{})", series.gradient_id);
    let animate_area = mode.animates_areas();
    let animate_line = mode.animates_lines();

    let dots = series
        .dots
        .iter()
        .map(|dot| {
            dot_view(
                dot,
                &series.colors.dot,
                mode,
                filter_url,
                PointClick::from_dot(&series.group_id, dot),
                on_point_click,
            )
        })
        .collect_view();

    view! {
        <g class="series" data-group=series.group_id.to_string()>
            <path
                class="area"
                d=series.area_path.clone()
                fill=area_fill
                opacity={if animate_area { "0" } else { "1" }}
            >
                {animate_area.then(|| view! {
                    <animate
                        attributeName="opacity"
                        from="0"
                        to="1"
                        begin=AREA_DELAY
                        dur=AREA_FADE
                        fill="freeze"
                    />
                })}
            </path>
            <path
                class="line"
                d=series.line_path.clone()
                fill="none"
                stroke=series.colors.line.clone()
                stroke-width="2"
                pathLength="1"
                stroke-dasharray="1"
                stroke-dashoffset={if animate_line { "1" } else { "0" }}
            >
                {animate_line.then(|| view! {
                    <animate
                        attributeName="stroke-dashoffset"
                        from="1"
                        to="0"
                        dur=LINE_DRAW
                        fill="freeze"
                    />
                })}
            </path>
            {dots}
        </g>
    }
}

fn dot_view(
    dot: &DotGeometry,
    color: &str,
    mode: RenderMode,
    filter_url: &str,
    click: PointClick,
    on_point_click: Option<Callback<PointClick>>,
) -> impl IntoView + use<> {
    let animate = mode.animates_dots();
    let begin = format!("{:.0}ms", dot.delay_ms);
    let fade_in = move || {
        animate.then(|| {
            view! {
                <animate
                    attributeName="opacity"
                    from="0"
                    to="1"
                    begin=begin.clone()
                    dur=DOT_FADE
                    fill="freeze"
                />
            }
        })
    };
    let initial_opacity = if animate { "0" } else { "1" };
    let cursor = if on_point_click.is_some() { "cursor: pointer;" } else { "" };

    view! {
        <g class="dot" class:comparison=dot.point.is_comparison>
            <circle
                cx=dot.x
                cy=dot.y
                r=DOT_RADIUS
                fill=colors::WHITE
                stroke=color.to_string()
                stroke-width="3"
                filter=filter_url.to_string()
                opacity=initial_opacity
                style=cursor
                on:click=move |_| {
                    if let Some(callback) = on_point_click {
                        callback.run(click.clone());
                    }
                }
            >
                {fade_in()}
            </circle>
            <text
                x=dot.x
                y=dot.label_y
                text-anchor="middle"
                fill=color.to_string()
                font-size="12"
                font-weight="600"
                opacity=initial_opacity
            >
                {dot.label.clone()}
                {fade_in()}
            </text>
        </g>
    }
}

// ============================================================================
// GOAL LINE AND LEGEND
// ============================================================================

fn target_view(layout: &LineLayout) -> impl IntoView + use<> {
    let plot_width = layout.plot_width;
    layout.target.clone().map(|target| {
        view! {
            <g class="target">
                <line
                    x1="0"
                    y1=target.y
                    x2=plot_width
                    y2=target.y
                    stroke=target.color.clone()
                    stroke-width="2"
                    stroke-dasharray="6,4"
                />
                <text
                    x=plot_width
                    y={target.y - 6.0}
                    text-anchor="end"
                    fill=target.color
                    font-size="12"
                >
                    {target.label}
                </text>
            </g>
        }
    })
}

fn legend_view(layout: &LineLayout) -> impl IntoView + use<> {
    let items = layout
        .legend
        .items
        .iter()
        .map(|item| {
            view! {
                <g transform=translate(item.x, 0.0)>
                    <circle cx=DOT_RADIUS cy="0" r=DOT_RADIUS fill=item.color.clone() />
                    <text
                        x={DOT_RADIUS * 2.0 + 8.0}
                        y="0"
                        dy="0.32em"
                        fill=colors::LEGEND_TEXT
                        font-size="13"
                    >
                        {item.label.clone()}
                    </text>
                </g>
            }
        })
        .collect_view();

    view! {
        <g class="legend" transform=translate(layout.legend.x, layout.legend.y)>
            {items}
        </g>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_layout::{LabelPlacement, LineLayout};

    #[test]
    fn test_point_click_carries_dot_data() {
        let series = vec![
            LineSeries::new(GroupId::new("ISD").unwrap(), "ISD").with_points(vec![
                LinePoint::new("CMI", 2.0),
                LinePoint::new("CHS", 50.0).comparison(),
            ]),
        ];
        let layout = LineLayout::compute(
            &series,
            &LineChartConfig::default(),
            ContainerSize::new(800.0, 400.0),
        )
        .unwrap();

        let geometry = &layout.series[0];
        let click = PointClick::from_dot(&geometry.group_id, &geometry.dots[1]);
        assert_eq!(click.group_id.as_str(), "ISD");
        assert_eq!(click.index, 1);
        assert!(click.point.is_comparison);
        assert_eq!(geometry.dots[1].placement, LabelPlacement::Above);
    }
}
