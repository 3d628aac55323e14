//! Multi-series line chart layout
//!
//! Turns series + configuration + container size into plain geometry:
//! scales, axis ticks, area/line paths in draw order, dot label placement,
//! goal line and legend. Nothing here touches the DOM, so a resize is just
//! another call to [`LineLayout::compute`] with the new size.

use crate::{
    ChartMargin,
    chartkit::{LinearScale, Scale, area_path, line_path},
    sanitize_id,
};
use serde::{Deserialize, Serialize};
use viz_core::{
    ChartError, ContainerSize, GroupId, LegendEntry, LinePoint, LineSeries, PercentFormatter,
    PlainFormatter, Result, SeriesColors, TargetLine, ValueFormatter, colors, validate_series,
};

/// Value gap under which two labels at the same index are considered colliding
pub const DEFAULT_COLLISION_THRESHOLD: f64 = 8.0;
/// Bottom labels rotate once a series has more points than this
pub const DEFAULT_ROTATION_THRESHOLD: usize = 10;
/// Label baseline above the dot centre
pub const LABEL_OFFSET_ABOVE: f64 = 10.0;
/// Label baseline below the dot centre
pub const LABEL_OFFSET_BELOW: f64 = 22.0;
/// Horizontal inset keeping the first and last dots off the axes
pub const X_INSET: f64 = 60.0;
/// Room left of the plot for y tick labels and the axis title
pub const Y_AXIS_GUTTER: f64 = 60.0;
/// Gap between a bottom tick and its label
pub const TICK_PADDING: f64 = 25.0;
pub const LEGEND_SPACING: f64 = 140.0;
pub const DOT_RADIUS: f64 = 6.0;
/// Total time over which dots fade in, staggered by index
pub const DOT_STAGGER_MS: f64 = 2500.0;
pub const FIXED_Y_TICKS: [f64; 6] = [0.0, 20.0, 40.0, 60.0, 80.0, 100.0];

const BOTTOM_BAND: f64 = 60.0;
const BOTTOM_BAND_ROTATED: f64 = 95.0;
const LINE_HEIGHT: f64 = 16.0;
const LEGEND_CHAR_WIDTH: f64 = 7.5;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Line chart options. Deserializing merges a partial document over the
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineChartConfig {
    /// Prefix for gradient/filter ids, unique per chart on a page
    pub chart_id: String,
    pub margin: ChartMargin,
    pub legend: Vec<LegendEntry>,
    pub target: Option<TargetLine>,
    pub max_height: Option<f64>,
    pub auto_scale: bool,
    /// Series drawn first (underneath) and favoured on label ties
    pub highest_group: Option<GroupId>,
    pub collision_threshold: f64,
    pub rotate_labels_after: usize,
    /// Split bottom labels such as `01/01/2024 - 02/28/2024` over two lines
    pub break_labels: bool,
    pub y_axis_title: Option<String>,
    pub show_hatching: bool,
    pub empty_message: String,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            chart_id: "line".to_string(),
            margin: ChartMargin::standard(),
            legend: vec![
                LegendEntry::new("ISD", colors::NAVY),
                LegendEntry::new("Cycle", colors::CRIMSON),
            ],
            target: None,
            max_height: None,
            auto_scale: false,
            highest_group: None,
            collision_threshold: DEFAULT_COLLISION_THRESHOLD,
            rotate_labels_after: DEFAULT_ROTATION_THRESHOLD,
            break_labels: false,
            y_axis_title: Some("% of Current ISD Delivered".to_string()),
            show_hatching: true,
            empty_message: "No records found".to_string(),
        }
    }
}

impl LineChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON options document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.collision_threshold.is_finite() || self.collision_threshold < 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "collision_threshold must be a non-negative number, got {}",
                self.collision_threshold
            )));
        }
        if let Some(max) = self.max_height {
            if !max.is_finite() || max <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "max_height must be positive, got {}",
                    max
                )));
            }
        }
        if let Some(target) = &self.target {
            if !target.value.is_finite() {
                return Err(ChartError::InvalidConfig("target value must be finite".into()));
            }
        }
        Ok(())
    }

    pub fn chart_id(mut self, id: impl AsRef<str>) -> Self {
        self.chart_id = sanitize_id(id.as_ref());
        self
    }

    pub fn margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    pub fn legend(mut self, legend: Vec<LegendEntry>) -> Self {
        self.legend = legend;
        self
    }

    pub fn target(mut self, target: TargetLine) -> Self {
        self.target = Some(target);
        self
    }

    pub fn max_height(mut self, max: f64) -> Self {
        self.max_height = Some(max);
        self
    }

    pub fn auto_scale(mut self, enabled: bool) -> Self {
        self.auto_scale = enabled;
        self
    }

    pub fn highest_group(mut self, id: GroupId) -> Self {
        self.highest_group = Some(id);
        self
    }

    pub fn collision_threshold(mut self, threshold: f64) -> Self {
        self.collision_threshold = threshold;
        self
    }

    pub fn rotate_labels_after(mut self, points: usize) -> Self {
        self.rotate_labels_after = points;
        self
    }

    pub fn break_labels(mut self, enabled: bool) -> Self {
        self.break_labels = enabled;
        self
    }

    pub fn y_axis_title(mut self, title: Option<String>) -> Self {
        self.y_axis_title = title;
        self
    }
}

// ============================================================================
// SCALES
// ============================================================================

/// x/y scales shared by every series of one chart
#[derive(Debug, Clone, PartialEq)]
pub struct LineScales {
    pub x: LinearScale,
    pub y: LinearScale,
    pub y_ticks: Vec<f64>,
}

/// Index scale over `[0, len - 1]` and a percentage scale over `[0, 100]`
/// (or `[0, nice(max)]` with auto-scale). A single point sits in the middle
/// of the x range.
pub fn line_scales(len: usize, width: f64, height: f64, auto_max: Option<f64>) -> LineScales {
    let last_index = len.saturating_sub(1) as f64;
    let (x_start, x_end) = if width > X_INSET * 2.0 {
        (X_INSET, width - X_INSET)
    } else {
        (0.0, width)
    };
    let x = LinearScale::new().domain(0.0, last_index).range(x_start, x_end);

    match auto_max.filter(|max| *max > 0.0 && max.is_finite()) {
        Some(max) => {
            let y = LinearScale::new().domain(0.0, max).nice(5).range(height, 0.0);
            let y_ticks = y.nice_ticks(5);
            LineScales { x, y, y_ticks }
        }
        None => LineScales {
            x,
            y: LinearScale::new().domain(0.0, 100.0).range(height, 0.0),
            y_ticks: FIXED_Y_TICKS.to_vec(),
        },
    }
}

// ============================================================================
// AREA DRAW ORDER
// ============================================================================

/// Order in which series are drawn. Gradient areas overlap, so the series
/// reaching highest goes first (underneath). A configured `highest` group is
/// always first; ties keep input order.
pub fn draw_order(series: &[LineSeries], highest: Option<&GroupId>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..series.len()).collect();
    order.sort_by(|&a, &b| {
        let max_a = series[a].max_value().unwrap_or(f64::NEG_INFINITY);
        let max_b = series[b].max_value().unwrap_or(f64::NEG_INFINITY);
        max_b.total_cmp(&max_a)
    });

    if let Some(id) = highest {
        if let Some(pos) = order.iter().position(|&i| &series[i].group_id == id) {
            let first = order.remove(pos);
            order.insert(0, first);
        }
    }

    order
}

// ============================================================================
// LABEL COLLISIONS
// ============================================================================

/// How series A's value relates to series B's at one index, when the two are
/// close enough for their labels to overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Proximity {
    Lower,
    Higher,
    Equal,
}

/// Where a dot's value label sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelPlacement {
    #[default]
    Above,
    Below,
}

impl LabelPlacement {
    /// Vertical offset from the dot centre to the label baseline
    pub fn offset(&self) -> f64 {
        match self {
            Self::Above => -LABEL_OFFSET_ABOVE,
            Self::Below => LABEL_OFFSET_BELOW,
        }
    }
}

/// Which series keeps its label above the dot when two values are equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBias {
    #[default]
    First,
    Second,
}

/// Classify every index of two equal-length value sequences. `None` means
/// the values are at least `threshold` apart and the labels cannot collide.
pub fn classify_proximity(a: &[f64], b: &[f64], threshold: f64) -> Result<Vec<Option<Proximity>>> {
    if a.len() != b.len() {
        return Err(ChartError::SeriesLengthMismatch {
            group_id: "second".to_string(),
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok(a.iter()
        .zip(b)
        .map(|(&va, &vb)| {
            let diff = va - vb;
            if diff.abs() >= threshold {
                None
            } else if diff < 0.0 {
                Some(Proximity::Lower)
            } else if diff > 0.0 {
                Some(Proximity::Higher)
            } else {
                Some(Proximity::Equal)
            }
        })
        .collect())
}

/// Label placements for both series: the lower value's label moves below
/// its dot, the higher one's stays above.
pub fn label_placements(
    a: &[f64],
    b: &[f64],
    threshold: f64,
    bias: TieBias,
) -> Result<(Vec<LabelPlacement>, Vec<LabelPlacement>)> {
    use LabelPlacement::{Above, Below};

    let classes = classify_proximity(a, b, threshold)?;
    Ok(classes
        .into_iter()
        .map(|class| match (class, bias) {
            (None, _) => (Above, Above),
            (Some(Proximity::Lower), _) => (Below, Above),
            (Some(Proximity::Higher), _) => (Above, Below),
            (Some(Proximity::Equal), TieBias::First) => (Above, Below),
            (Some(Proximity::Equal), TieBias::Second) => (Below, Above),
        })
        .unzip())
}

// ============================================================================
// X LABEL ROTATION
// ============================================================================

/// Transform applied to every bottom label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelRotation {
    pub angle: f64,
    pub anchor: &'static str,
    pub dx: f64,
}

impl LabelRotation {
    pub fn is_rotated(&self) -> bool {
        self.angle != 0.0
    }

    pub fn transform(&self, x: f64, y: f64) -> String {
        format!("translate({:.2}, {:.2}) rotate({})", x + self.dx, y, self.angle)
    }
}

/// Readability heuristic: more than `threshold` labels are rotated -45°
pub fn label_rotation(len: usize, threshold: usize) -> LabelRotation {
    if len > threshold {
        LabelRotation {
            angle: -45.0,
            anchor: "end",
            dx: 6.0,
        }
    } else {
        LabelRotation {
            angle: 0.0,
            anchor: "middle",
            dx: 0.0,
        }
    }
}

/// `01/01/2024 - 02/28/2024` -> `["01/01/2024 -", "02/28/2024"]`
pub fn split_label(label: &str, break_lines: bool) -> Vec<String> {
    if !break_lines {
        return vec![label.to_string()];
    }
    let parts: Vec<&str> = label.split(" - ").collect();
    let last = parts.len() - 1;
    parts
        .iter()
        .enumerate()
        .map(|(i, part)| if i < last { format!("{} -", part) } else { part.to_string() })
        .collect()
}

// ============================================================================
// LAYOUT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct XTick {
    pub index: usize,
    pub x: f64,
    pub lines: Vec<String>,
    pub top_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YTick {
    pub value: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DotGeometry {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub label_y: f64,
    pub placement: LabelPlacement,
    pub delay_ms: f64,
    pub point: LinePoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesGeometry {
    pub group_id: GroupId,
    pub group_label: String,
    pub colors: SeriesColors,
    pub gradient_id: String,
    pub line_path: String,
    pub area_path: String,
    pub dots: Vec<DotGeometry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetGeometry {
    pub y: f64,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub x: f64,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendGeometry {
    pub x: f64,
    pub y: f64,
    pub items: Vec<LegendItem>,
}

/// Everything needed to draw one line chart
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    pub chart_id: String,
    pub size: ContainerSize,
    /// Top-left corner of the plot area inside the SVG
    pub origin: (f64, f64),
    pub plot_width: f64,
    pub plot_height: f64,
    pub x_ticks: Vec<XTick>,
    pub rotation: LabelRotation,
    pub y_ticks: Vec<YTick>,
    pub y_title: Option<String>,
    /// Series in draw order (first is underneath)
    pub series: Vec<SeriesGeometry>,
    pub target: Option<TargetGeometry>,
    /// x of the divider in front of the first comparison point
    pub comparison_divider: Option<f64>,
    pub legend: LegendGeometry,
    pub hatching: bool,
    /// Set when there is nothing to plot
    pub empty_message: Option<String>,
}

impl LineLayout {
    /// Validate the input and compute the full chart geometry for a
    /// container of the given size.
    pub fn compute(
        series: &[LineSeries],
        config: &LineChartConfig,
        container: ContainerSize,
    ) -> Result<Self> {
        config.validate()?;
        validate_series(series)?;

        let size = container.capped(config.max_height);
        let len = series.first().map_or(0, LineSeries::len);
        let rotation = label_rotation(len, config.rotate_labels_after);

        let margin = config.margin;
        let bottom_band = if rotation.is_rotated() { BOTTOM_BAND_ROTATED } else { BOTTOM_BAND };
        let extra_lines = if config.break_labels { LINE_HEIGHT } else { 0.0 };
        let origin = (margin.left + Y_AXIS_GUTTER, margin.top);
        let plot_width = (size.width - origin.0 - margin.right).max(0.0);
        let plot_height =
            (size.height - margin.top - margin.bottom - bottom_band - extra_lines).max(0.0);

        let legend_y = plot_height + bottom_band + extra_lines - 10.0;
        let legend = legend_geometry(&config.legend, plot_width, legend_y);

        let mut layout = Self {
            chart_id: sanitize_id(&config.chart_id),
            size,
            origin,
            plot_width,
            plot_height,
            x_ticks: Vec::new(),
            rotation,
            y_ticks: Vec::new(),
            y_title: config.y_axis_title.clone(),
            series: Vec::new(),
            target: None,
            comparison_divider: None,
            legend,
            hatching: config.show_hatching,
            empty_message: None,
        };

        if len == 0 {
            tracing::debug!(chart = %layout.chart_id, "no points to plot, using placeholder");
            layout.empty_message = Some(config.empty_message.clone());
            return Ok(layout);
        }

        let auto_max = config.auto_scale.then(|| {
            let data_max = series
                .iter()
                .filter_map(LineSeries::max_value)
                .fold(0.0_f64, f64::max);
            config.target.as_ref().map_or(data_max, |t| data_max.max(t.value))
        });
        let scales = line_scales(len, plot_width, plot_height, auto_max);

        layout.y_ticks = y_ticks(&scales);
        layout.x_ticks = x_ticks(&series[0].points, &scales.x, config.break_labels);
        layout.comparison_divider = comparison_divider(&series[0].points, &scales.x);
        layout.target = config.target.as_ref().map(|t| TargetGeometry {
            y: scales.y.scale(t.value),
            label: PercentFormatter.format(t.value),
            color: t.color.clone(),
        });

        let placements = series_placements(series, config)?;
        layout.series = draw_order(series, config.highest_group.as_ref())
            .into_iter()
            .map(|i| series_geometry(&series[i], &placements[i], &scales, &layout))
            .collect();

        tracing::debug!(
            chart = %layout.chart_id,
            points = len,
            series = layout.series.len(),
            width = size.width,
            height = size.height,
            "line layout computed"
        );

        Ok(layout)
    }

    pub fn is_empty(&self) -> bool {
        self.empty_message.is_some()
    }

    pub fn filter_id(&self) -> String {
        format!("drop-shadow-{}", self.chart_id)
    }

    pub fn origin_transform(&self) -> String {
        format!("translate({}, {})", self.origin.0, self.origin.1)
    }

    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.size.width, self.size.height)
    }
}

/// Per-series placements, indexed like the input. Only a pair of series can
/// be disambiguated; any other count keeps every label above its dot.
fn series_placements(
    series: &[LineSeries],
    config: &LineChartConfig,
) -> Result<Vec<Vec<LabelPlacement>>> {
    if let [a, b] = series {
        let bias = match &config.highest_group {
            Some(id) if *id == b.group_id => TieBias::Second,
            _ => TieBias::First,
        };
        let (pa, pb) = label_placements(&a.values(), &b.values(), config.collision_threshold, bias)?;
        return Ok(vec![pa, pb]);
    }

    Ok(series
        .iter()
        .map(|s| vec![LabelPlacement::Above; s.len()])
        .collect())
}

fn series_geometry(
    series: &LineSeries,
    placements: &[LabelPlacement],
    scales: &LineScales,
    layout: &LineLayout,
) -> SeriesGeometry {
    let points: Vec<(f64, f64)> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (scales.x.scale(i as f64), scales.y.scale(p.value)))
        .collect();

    let stagger = DOT_STAGGER_MS / series.len().max(1) as f64;
    let dots = series
        .points
        .iter()
        .zip(&points)
        .zip(placements)
        .enumerate()
        .map(|(i, ((point, &(x, y)), &placement))| DotGeometry {
            index: i,
            x,
            y,
            label: PlainFormatter.format(point.value),
            label_y: y + placement.offset(),
            placement,
            delay_ms: i as f64 * stagger,
            point: point.clone(),
        })
        .collect();

    SeriesGeometry {
        group_id: series.group_id.clone(),
        group_label: series.group_label.clone(),
        colors: series.colors.clone(),
        gradient_id: format!("area-gradient-{}-{}", layout.chart_id, series.group_id),
        line_path: line_path(&points),
        area_path: area_path(&points, layout.plot_height),
        dots,
    }
}

fn y_ticks(scales: &LineScales) -> Vec<YTick> {
    scales
        .y_ticks
        .iter()
        .map(|&value| YTick {
            value,
            y: scales.y.scale(value),
            label: PercentFormatter.format(value),
        })
        .collect()
}

fn x_ticks(points: &[LinePoint], x: &LinearScale, break_labels: bool) -> Vec<XTick> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| XTick {
            index: i,
            x: x.scale(i as f64),
            lines: split_label(&p.label_bottom, break_labels),
            top_label: p.label_top.clone(),
        })
        .collect()
}

fn comparison_divider(points: &[LinePoint], x: &LinearScale) -> Option<f64> {
    let first = points.iter().position(|p| p.is_comparison)?;
    if first == 0 {
        return None;
    }
    Some((x.scale((first - 1) as f64) + x.scale(first as f64)) / 2.0)
}

/// Legend row centred under the plot. Text width is estimated since the
/// layout never measures rendered text.
fn legend_geometry(entries: &[LegendEntry], plot_width: f64, y: f64) -> LegendGeometry {
    let items: Vec<LegendItem> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| LegendItem {
            x: i as f64 * LEGEND_SPACING,
            label: e.label.clone(),
            color: e.color.clone(),
        })
        .collect();

    let width = entries.last().map_or(0.0, |last| {
        (entries.len() - 1) as f64 * LEGEND_SPACING
            + DOT_RADIUS * 2.0
            + 10.0
            + last.label.chars().count() as f64 * LEGEND_CHAR_WIDTH
    });

    LegendGeometry {
        x: plot_width / 2.0 - width / 2.0,
        y,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viz_core::LinePoint;

    const LABELS: [&str; 12] = [
        "CMI", "CHS", "ABQ", "LAS", "GGG", "SAN", "TUL", "Comp1", "Comp2", "P10", "P11", "P12",
    ];

    fn series(id: &str, values: &[f64]) -> LineSeries {
        LineSeries::new(GroupId::new(id).unwrap(), id).with_points(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| LinePoint::new(LABELS[i], *v).top("NRCC#1"))
                .collect(),
        )
    }

    fn example_pair() -> Vec<LineSeries> {
        vec![
            series("ISD", &[2.0, 50.0, 58.0, 77.0, 32.0, 99.0, 65.0]),
            series("Cycle", &[76.0, 79.0, 96.0, 97.0, 76.0, 96.0, 64.0]),
        ]
    }

    fn size() -> ContainerSize {
        ContainerSize::new(960.0, 540.0)
    }

    #[test]
    fn test_single_point_scale_is_finite() {
        let scales = line_scales(1, 600.0, 300.0, None);
        let x = scales.x.scale(0.0);
        assert!(x.is_finite());
        assert_eq!(x, 300.0);
        assert!(scales.y.scale(50.0).is_finite());
    }

    #[test]
    fn test_fixed_percentage_scale() {
        let scales = line_scales(7, 600.0, 300.0, None);
        assert_eq!(scales.y.scale(0.0), 300.0);
        assert_eq!(scales.y.scale(100.0), 0.0);
        assert_eq!(scales.x.scale(0.0), X_INSET);
        assert_eq!(scales.x.scale(6.0), 600.0 - X_INSET);
        assert_eq!(scales.y_ticks, FIXED_Y_TICKS.to_vec());
    }

    #[test]
    fn test_auto_scale_uses_nice_domain() {
        let scales = line_scales(3, 600.0, 300.0, Some(43.0));
        assert_eq!(scales.y.domain_bounds(), (0.0, 50.0));
        assert_eq!(scales.y_ticks, vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0]);
    }

    #[test]
    fn test_draw_order_puts_highest_max_first() {
        let data = vec![series("A", &[10.0, 80.0]), series("B", &[95.0, 20.0])];
        assert_eq!(draw_order(&data, None), vec![1, 0]);
    }

    #[test]
    fn test_draw_order_honours_highest_hint() {
        let data = vec![series("A", &[10.0, 80.0]), series("B", &[95.0, 20.0])];
        let hint = GroupId::new("A").unwrap();
        assert_eq!(draw_order(&data, Some(&hint)), vec![0, 1]);

        let unknown = GroupId::new("Z").unwrap();
        assert_eq!(draw_order(&data, Some(&unknown)), vec![1, 0]);
    }

    #[test]
    fn test_draw_order_is_stable_on_ties() {
        let data = vec![series("A", &[50.0]), series("B", &[50.0]), series("C", &[60.0])];
        assert_eq!(draw_order(&data, None), vec![2, 0, 1]);
    }

    #[test]
    fn test_classify_example_pair() {
        let data = example_pair();
        let classes =
            classify_proximity(&data[0].values(), &data[1].values(), DEFAULT_COLLISION_THRESHOLD)
                .unwrap();

        assert_eq!(classes[6], Some(Proximity::Higher));
        // 99 vs 96 is also within the threshold
        assert_eq!(classes[5], Some(Proximity::Higher));
        assert_eq!(classes[0], None);
        assert_eq!(classes[3], None);
    }

    #[test]
    fn test_example_pair_labels_move_apart() {
        let data = example_pair();
        let (a, b) = label_placements(
            &data[0].values(),
            &data[1].values(),
            DEFAULT_COLLISION_THRESHOLD,
            TieBias::First,
        )
        .unwrap();

        assert_eq!(a[6], LabelPlacement::Above);
        assert_eq!(b[6], LabelPlacement::Below);
        assert_eq!((a[0], b[0]), (LabelPlacement::Above, LabelPlacement::Above));
    }

    #[test]
    fn test_lower_and_equal_classification() {
        let (a, b) = label_placements(&[10.0, 40.0], &[15.0, 40.0], 8.0, TieBias::First).unwrap();
        assert_eq!((a[0], b[0]), (LabelPlacement::Below, LabelPlacement::Above));
        assert_eq!((a[1], b[1]), (LabelPlacement::Above, LabelPlacement::Below));

        let (a, b) = label_placements(&[40.0], &[40.0], 8.0, TieBias::Second).unwrap();
        assert_eq!((a[0], b[0]), (LabelPlacement::Below, LabelPlacement::Above));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let classes = classify_proximity(&[10.0], &[18.0], 8.0).unwrap();
        assert_eq!(classes, vec![None]);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let data = example_pair();
        let run = || {
            label_placements(&data[0].values(), &data[1].values(), 8.0, TieBias::First).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_classify_rejects_length_mismatch() {
        let result = classify_proximity(&[1.0, 2.0], &[1.0], 8.0);
        assert!(matches!(result, Err(ChartError::SeriesLengthMismatch { .. })));
    }

    #[test]
    fn test_rotation_policy() {
        assert!(!label_rotation(10, DEFAULT_ROTATION_THRESHOLD).is_rotated());
        let rotated = label_rotation(11, DEFAULT_ROTATION_THRESHOLD);
        assert_eq!(rotated.angle, -45.0);
        assert_eq!(rotated.anchor, "end");
    }

    #[test]
    fn test_split_label() {
        assert_eq!(
            split_label("01/01/2024 - 02/28/2024", true),
            vec!["01/01/2024 -".to_string(), "02/28/2024".to_string()]
        );
        assert_eq!(split_label("CMI", true), vec!["CMI".to_string()]);
        assert_eq!(split_label("a - b", false), vec!["a - b".to_string()]);
    }

    #[test]
    fn test_layout_applies_collision_offsets() {
        let layout = LineLayout::compute(&example_pair(), &LineChartConfig::default(), size()).unwrap();

        let isd = layout.series.iter().find(|s| s.group_id.as_str() == "ISD").unwrap();
        let cycle = layout.series.iter().find(|s| s.group_id.as_str() == "Cycle").unwrap();

        let a = &isd.dots[6];
        let b = &cycle.dots[6];
        assert_eq!(a.placement, LabelPlacement::Above);
        assert_eq!(a.label_y, a.y - LABEL_OFFSET_ABOVE);
        assert_eq!(b.placement, LabelPlacement::Below);
        assert_eq!(b.label_y, b.y + LABEL_OFFSET_BELOW);
        assert_eq!(a.label, "65");
    }

    #[test]
    fn test_layout_draws_higher_series_first() {
        let data = vec![series("Low", &[10.0, 80.0]), series("High", &[95.0, 20.0])];
        let layout = LineLayout::compute(&data, &LineChartConfig::default(), size()).unwrap();
        assert_eq!(layout.series[0].group_id.as_str(), "High");
        assert_eq!(layout.series[0].gradient_id, "area-gradient-line-High");
    }

    #[test]
    fn test_layout_is_idempotent_for_same_size() {
        let config = LineChartConfig::default().target(TargetLine::new(98.0, colors::GOAL));
        let first = LineLayout::compute(&example_pair(), &config, size()).unwrap();
        let second = LineLayout::compute(&example_pair(), &config, size()).unwrap();
        assert_eq!(first, second);

        let resized = LineLayout::compute(&example_pair(), &config, ContainerSize::new(700.0, 540.0))
            .unwrap();
        assert_ne!(first, resized);
    }

    #[test]
    fn test_layout_empty_series_shows_placeholder() {
        let data = vec![series("ISD", &[]), series("Cycle", &[])];
        let layout = LineLayout::compute(&data, &LineChartConfig::default(), size()).unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.empty_message.as_deref(), Some("No records found"));
        assert!(layout.series.is_empty());

        let layout = LineLayout::compute(&[], &LineChartConfig::default(), size()).unwrap();
        assert!(layout.is_empty());
    }

    #[test]
    fn test_layout_highest_group_wins_ties() {
        let data = vec![series("ISD", &[40.0]), series("Cycle", &[40.0])];
        let config = LineChartConfig::default().highest_group(GroupId::new("Cycle").unwrap());
        let layout = LineLayout::compute(&data, &config, size()).unwrap();

        let placement = |id: &str| {
            layout.series.iter().find(|s| s.group_id.as_str() == id).unwrap().dots[0].placement
        };
        assert_eq!(placement("Cycle"), LabelPlacement::Above);
        assert_eq!(placement("ISD"), LabelPlacement::Below);

        let layout = LineLayout::compute(&data, &LineChartConfig::default(), size()).unwrap();
        let isd = layout.series.iter().find(|s| s.group_id.as_str() == "ISD").unwrap();
        assert_eq!(isd.dots[0].placement, LabelPlacement::Above);
    }

    #[test]
    fn test_layout_only_pairs_reposition_labels() {
        let single = vec![series("ISD", &[40.0, 41.0])];
        let triple = vec![series("A", &[40.0]), series("B", &[41.0]), series("C", &[42.0])];

        for data in [single, triple] {
            let layout = LineLayout::compute(&data, &LineChartConfig::default(), size()).unwrap();
            for dot in layout.series.iter().flat_map(|s| &s.dots) {
                assert_eq!(dot.placement, LabelPlacement::Above);
                assert_eq!(dot.label_y, dot.y - LABEL_OFFSET_ABOVE);
            }
        }
    }

    #[test]
    fn test_auto_scale_makes_room_for_target() {
        let data = vec![series("ISD", &[10.0, 40.0]), series("Cycle", &[20.0, 30.0])];
        let plain = LineChartConfig::default().auto_scale(true);
        let layout = LineLayout::compute(&data, &plain, size()).unwrap();
        assert!(layout.y_ticks.last().unwrap().value < 98.0);

        let with_target = plain.target(TargetLine::new(98.0, colors::GOAL));
        let layout = LineLayout::compute(&data, &with_target, size()).unwrap();
        assert!(layout.y_ticks.last().unwrap().value >= 98.0);
        let target = layout.target.as_ref().unwrap();
        assert!(target.y >= 0.0 && target.y < layout.plot_height);
    }

    #[test]
    fn test_layout_single_point() {
        let data = vec![series("ISD", &[42.0])];
        let layout = LineLayout::compute(&data, &LineChartConfig::default(), size()).unwrap();
        let dot = &layout.series[0].dots[0];
        assert!(dot.x.is_finite() && dot.y.is_finite());
        assert_eq!(dot.x, layout.plot_width / 2.0);
    }

    #[test]
    fn test_layout_rejects_mismatched_series() {
        let data = vec![series("ISD", &[1.0, 2.0]), series("Cycle", &[1.0])];
        let result = LineLayout::compute(&data, &LineChartConfig::default(), size());
        assert!(matches!(result, Err(ChartError::SeriesLengthMismatch { .. })));
    }

    #[test]
    fn test_layout_rotates_long_axes() {
        let values: Vec<f64> = (0..12).map(|i| i as f64 * 8.0).collect();
        let layout =
            LineLayout::compute(&[series("ISD", &values)], &LineChartConfig::default(), size())
                .unwrap();
        assert!(layout.rotation.is_rotated());
        assert_eq!(layout.x_ticks.len(), 12);
    }

    #[test]
    fn test_layout_respects_max_height() {
        let config = LineChartConfig::default().max_height(400.0);
        let layout =
            LineLayout::compute(&example_pair(), &config, ContainerSize::new(960.0, 900.0)).unwrap();
        assert_eq!(layout.size.height, 400.0);
    }

    #[test]
    fn test_layout_target_and_comparison_divider() {
        let mut data = vec![
            series("ISD", &[2.0, 50.0, 58.0, 100.0]),
            series("Cycle", &[76.0, 79.0, 96.0, 100.0]),
        ];
        for s in &mut data {
            s.points[3].is_comparison = true;
        }
        let config = LineChartConfig::default().target(TargetLine::new(50.0, colors::GOAL));
        let layout = LineLayout::compute(&data, &config, size()).unwrap();

        let target = layout.target.as_ref().unwrap();
        assert_eq!(target.y, layout.plot_height / 2.0);
        assert_eq!(target.label, "50%");

        let divider = layout.comparison_divider.unwrap();
        assert!(divider > layout.x_ticks[2].x && divider < layout.x_ticks[3].x);
    }

    #[test]
    fn test_dot_animation_is_staggered() {
        let layout = LineLayout::compute(&example_pair(), &LineChartConfig::default(), size()).unwrap();
        let dots = &layout.series[0].dots;
        assert_eq!(dots[0].delay_ms, 0.0);
        assert!(dots[6].delay_ms < DOT_STAGGER_MS);
        assert!(dots[1].delay_ms > 0.0);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = LineChartConfig::from_json(
            r##"{
                "margin": {"top": 40, "right": 20, "bottom": 30, "left": 50},
                "max_height": 750,
                "target": {"value": 98, "color": "#628AB3"},
                "highest_group": "Cycle"
            }"##,
        )
        .unwrap();

        assert_eq!(config.margin.top, 40.0);
        assert_eq!(config.max_height, Some(750.0));
        assert_eq!(config.collision_threshold, DEFAULT_COLLISION_THRESHOLD);
        assert_eq!(config.highest_group.unwrap().as_str(), "Cycle");
        assert_eq!(config.legend.len(), 2);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(LineChartConfig::from_json(r#"{"collision_threshold": -1}"#).is_err());
        assert!(LineChartConfig::from_json(r#"{"highest_group": "not valid"}"#).is_err());
        assert!(LineChartConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_legend_is_centred() {
        let legend = legend_geometry(
            &[LegendEntry::new("ISD", "#000"), LegendEntry::new("Goal", "#111")],
            800.0,
            0.0,
        );
        assert_eq!(legend.items[1].x, LEGEND_SPACING);
        assert!(legend.x > 0.0 && legend.x < 400.0);
    }
}
