//! Chart options used by the demo pages

use chrono::NaiveDate;
use viz_charts::{ChartMargin, LineChartConfig};
use viz_core::{GroupId, LegendEntry, Result, TargetLine, colors};
use viz_data::CYCLE_ID;

/// Delay before the hosted line charts are mounted
pub const MOUNT_DELAY_MS: u32 = 1000;

pub const STATION_CONTAINER: &str = "#svgLineContainer";
pub const DRILL_DOWN_CONTAINER: &str = "#svgDrillDownLineContainer";
pub const BROKEN_LABELS_CONTAINER: &str = "#svgBrokenLabelsContainer";

const GOAL_VALUE: f64 = 98.0;

/// Partial options document, merged over the line chart defaults
const DRILL_DOWN_OPTIONS: &str = r##"{
    "margin": { "top": 40, "right": 20, "bottom": 30, "left": 50 },
    "max_height": 600,
    "highest_group": "Cycle",
    "legend": [
        { "label": "ISD", "color": "#0F0E38" },
        { "label": "8 week avg.", "color": "#B02A4C" }
    ],
    "y_axis_title": "On time %"
}"##;

/// `ISD (MM/DD/YYYY)` legend label stamped with the reporting date
pub fn isd_legend_label(stamp: NaiveDate) -> String {
    format!("ISD ({})", stamp.format("%m/%d/%Y"))
}

/// Station chart on the dashboard: goal line, three-entry legend
pub fn station_line_config(stamp: NaiveDate) -> Result<LineChartConfig> {
    Ok(LineChartConfig::new()
        .margin(ChartMargin::new(40.0, 20.0, 30.0, 50.0))
        .max_height(750.0)
        .target(TargetLine::new(GOAL_VALUE, colors::GOAL))
        .legend(vec![
            LegendEntry::new(isd_legend_label(stamp), colors::NAVY),
            LegendEntry::new("8 week avg.", colors::CRIMSON),
            LegendEntry::new("Goal", colors::GOAL),
        ])
        .highest_group(GroupId::new(CYCLE_ID)?))
}

/// Drill-down charts on the example pages
pub fn drill_down_config(break_labels: bool) -> Result<LineChartConfig> {
    Ok(LineChartConfig::from_json(DRILL_DOWN_OPTIONS)?.break_labels(break_labels))
}

/// First period shown by the drill-down charts
pub fn drill_down_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_config() {
        let stamp = NaiveDate::from_ymd_opt(2024, 6, 24).unwrap();
        let config = station_line_config(stamp).unwrap();
        assert_eq!(config.legend[0].label, "ISD (06/24/2024)");
        assert_eq!(config.target.as_ref().map(|t| t.value), Some(98.0));
        assert_eq!(config.highest_group.as_ref().map(GroupId::as_str), Some("Cycle"));
        assert_eq!(config.margin.top, 40.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_drill_down_options_merge_over_defaults() {
        let config = drill_down_config(true).unwrap();
        let defaults = LineChartConfig::default();
        assert!(config.break_labels);
        assert_eq!(config.max_height, Some(600.0));
        assert_eq!(config.legend.len(), 2);
        assert_eq!(config.y_axis_title.as_deref(), Some("On time %"));
        assert_eq!(config.collision_threshold, defaults.collision_threshold);
        assert_eq!(config.empty_message, defaults.empty_message);
        assert!(!drill_down_config(false).unwrap().break_labels);
    }
}
