//! Grouped bar chart with per-group legend cards
//!
//! Outer band scale over group keys, inner band scale over the value labels
//! of the first group, `[0, max]` value axis. Each group carries a small
//! rounded card above its bars listing the grouped values.

use crate::{
    ChartDimensions, ChartMargin,
    chartkit::{BandScale, LinearScale, Scale, translate},
    colors,
};
use leptos::prelude::*;
use viz_core::{BarGroup, GroupedNumberFormatter, ValueFormatter, bar_max};

/// Bar chart configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
    pub bar_width: f64,
    pub bar_radius: f64,
    pub group_padding: f64,
    pub bar_padding: f64,
    pub bar_padding_outer: f64,
    pub show_legend_cards: bool,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            margin: ChartMargin::legend_top(),
            bar_width: 15.0,
            bar_radius: 8.0,
            group_padding: 0.1,
            bar_padding: 0.2,
            bar_padding_outer: 1.8,
            show_legend_cards: true,
        }
    }
}

impl BarChartConfig {
    /// Short dashboard strip
    pub fn compact() -> Self {
        Self {
            height: 250.0,
            ..Self::default()
        }
    }
}

const AXIS_TICK_PADDING: f64 = 17.0;
const CARD_WIDTH: f64 = 90.0;
const CARD_ROW_HEIGHT: f64 = 21.0;
const CARD_OFFSET: (f64, f64) = (10.0, -70.0);
const CARD_FIRST_ROW: f64 = -52.0;
const CARD_ROW_STEP: f64 = 15.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendCardRow {
    pub cy: f64,
    pub color: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGroupGeometry {
    pub key: String,
    pub x: f64,
    pub center: f64,
    pub bars: Vec<BarRect>,
    pub card_height: f64,
    pub card_rows: Vec<LegendCardRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub dims: ChartDimensions,
    pub groups: Vec<BarGroupGeometry>,
    pub y_ticks: Vec<(f64, String)>,
}

impl BarLayout {
    pub fn compute(data: &[BarGroup], config: &BarChartConfig) -> Self {
        let dims = ChartDimensions::new(config.width, config.height).with_margin(config.margin);
        let width = dims.inner_width();
        let height = dims.inner_height();

        let x0 = BandScale::new(data.len())
            .range(0.0, width)
            .padding(config.group_padding, 0.0);

        let labels: Vec<&str> = data
            .first()
            .map(|g| g.values.iter().map(|v| v.label.as_str()).collect())
            .unwrap_or_default();
        let x1 = BandScale::new(labels.len())
            .range(0.0, x0.bandwidth())
            .padding(config.bar_padding, config.bar_padding_outer);

        let max = bar_max(data);
        let y = LinearScale::new()
            .domain(0.0, if max > 0.0 { max } else { 1.0 })
            .range(height, 0.0);

        let formatter = GroupedNumberFormatter::default();
        let y_ticks = y
            .nice_ticks(5)
            .into_iter()
            .map(|tick| (y.scale(tick), formatter.format(tick)))
            .collect();

        let groups = data
            .iter()
            .enumerate()
            .map(|(gi, group)| {
                let bars = group
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| {
                        let slot = labels.iter().position(|l| *l == v.label).unwrap_or(i);
                        let top = y.scale(v.value.max(0.0));
                        BarRect {
                            x: x1.scale(slot),
                            y: top,
                            width: config.bar_width,
                            height: (height - top).max(0.0),
                            color: v.color.clone(),
                            label: v.label.clone(),
                        }
                    })
                    .collect();

                let card_rows = group
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| LegendCardRow {
                        cy: CARD_FIRST_ROW + i as f64 * CARD_ROW_STEP,
                        color: v.color.clone(),
                        text: formatter.format(v.legend_value()),
                    })
                    .collect();

                BarGroupGeometry {
                    key: group.key.clone(),
                    x: x0.scale(gi),
                    center: x0.bandwidth() / 2.0,
                    bars,
                    card_height: group.values.len() as f64 * CARD_ROW_HEIGHT,
                    card_rows,
                }
            })
            .collect();

        Self { dims, groups, y_ticks }
    }
}

/// Grouped bar chart component
#[component]
pub fn BarChart(
    #[prop(into)] data: Signal<Vec<BarGroup>>,
    #[prop(optional)] config: Option<BarChartConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let dims = ChartDimensions::new(config.width, config.height).with_margin(config.margin);
    let show_cards = config.show_legend_cards;
    let radius = config.bar_radius;

    let layout = move || BarLayout::compute(&data.get(), &config);

    view! {
        <svg
            class="bar-chart"
            viewBox=dims.viewbox()
            preserveAspectRatio="xMidYMid meet"
            style="width: 100%; height: 100%;"
        >
            <g class="chart-wrapper" transform=dims.inner_transform()>
                {move || {
                    let layout = layout();
                    let height = layout.dims.inner_height();

                    let y_axis = layout
                        .y_ticks
                        .iter()
                        .map(|(y, label)| {
                            view! {
                                <text
                                    x="-6"
                                    y={*y}
                                    dy="0.32em"
                                    text-anchor="end"
                                    fill=colors::TEXT_SOFT
                                    font-size="12"
                                >
                                    {label.clone()}
                                </text>
                            }
                        })
                        .collect_view();

                    let groups = layout
                        .groups
                        .into_iter()
                        .map(|group| {
                            let bars = group
                                .bars
                                .into_iter()
                                .map(|bar| {
                                    view! {
                                        <rect
                                            x=bar.x
                                            y=bar.y
                                            width=bar.width
                                            height=bar.height
                                            rx=radius
                                            style=format!("fill: {};", bar.color)
                                        >
                                            <title>{bar.label}</title>
                                        </rect>
                                    }
                                })
                                .collect_view();

                            let card = show_cards.then(|| {
                                let rows = group
                                    .card_rows
                                    .into_iter()
                                    .map(|row| {
                                        view! {
                                            <circle cx="30" cy=row.cy r="5" fill=row.color />
                                            <text
                                                x="40"
                                                y={row.cy + 5.0}
                                                fill=colors::LEGEND_TEXT
                                                font-size="15"
                                                font-weight="500"
                                            >
                                                {row.text}
                                            </text>
                                        }
                                    })
                                    .collect_view();
                                view! {
                                    <g class="legend-group">
                                        <rect
                                            width=CARD_WIDTH
                                            height=group.card_height
                                            fill=colors::LEGEND_BG
                                            stroke=colors::LEGEND_BORDER
                                            stroke-width="0.2"
                                            rx="13"
                                            transform=translate(CARD_OFFSET.0, CARD_OFFSET.1)
                                        />
                                        {rows}
                                    </g>
                                }
                            });

                            view! {
                                <g class="bar-slice" transform=translate(group.x, 0.0)>
                                    {bars}
                                    <text
                                        x=group.center
                                        y={height + AXIS_TICK_PADDING}
                                        dy="0.71em"
                                        text-anchor="middle"
                                        fill=colors::TEXT_SOFT
                                        font-size="12"
                                    >
                                        {group.key}
                                    </text>
                                    {card}
                                </g>
                            }
                        })
                        .collect_view();

                    view! {
                        <g class="y-axis">{y_axis}</g>
                        <g class="x-axis">{groups}</g>
                    }
                }}
            </g>
        </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viz_core::BarValue;

    fn groups() -> Vec<BarGroup> {
        ["Jan", "Feb"]
            .iter()
            .zip([(75354.0, 78456.0), (85354.0, 81456.0)])
            .map(|(key, (a, b))| {
                BarGroup::new(
                    *key,
                    vec![
                        BarValue::new("Stock Transfer", a, "#a32b00"),
                        BarValue::new("Cycle Count", b, "#e94e14"),
                    ],
                )
            })
            .collect()
    }

    #[test]
    fn test_tallest_bar_reaches_top() {
        let layout = BarLayout::compute(&groups(), &BarChartConfig::default());
        let tallest = &layout.groups[1].bars[0];
        assert_eq!(tallest.y, 0.0);
        assert_eq!(tallest.height, layout.dims.inner_height());
    }

    #[test]
    fn test_groups_are_ordered_left_to_right() {
        let layout = BarLayout::compute(&groups(), &BarChartConfig::default());
        assert!(layout.groups[0].x < layout.groups[1].x);
        assert!(layout.groups[0].bars[0].x < layout.groups[0].bars[1].x);
        assert_eq!(layout.groups[0].bars[0].width, 15.0);
    }

    #[test]
    fn test_legend_card_rows() {
        let mut data = groups();
        data[0].values[1] = data[0].values[1].clone().with_legend("1234");
        let layout = BarLayout::compute(&data, &BarChartConfig::default());

        let card = &layout.groups[0];
        assert_eq!(card.card_height, 42.0);
        assert_eq!(card.card_rows[0].text, "75,354");
        assert_eq!(card.card_rows[1].text, "1,234");
        assert_eq!(card.card_rows[1].cy, -37.0);
    }

    #[test]
    fn test_empty_data_is_harmless() {
        let layout = BarLayout::compute(&[], &BarChartConfig::compact());
        assert!(layout.groups.is_empty());
        assert!(!layout.y_ticks.is_empty());
    }
}
