//! Line chart series types and input validation

use crate::{ChartError, Result, colors};
use serde::{Deserialize, Serialize};

// ============================================================================
// GROUP ID
// ============================================================================

/// Series identifier. Used to build SVG element ids, so it is restricted to
/// `[a-zA-Z0-9_]+`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if Self::is_valid(&id) {
            Ok(Self(id))
        } else {
            Err(ChartError::InvalidGroupId(id))
        }
    }

    pub fn is_valid(id: &str) -> bool {
        !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GroupId {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<GroupId> for String {
    fn from(id: GroupId) -> Self {
        id.0
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// POINTS AND SERIES
// ============================================================================

/// One x-position sample of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub label_bottom: String,
    #[serde(default)]
    pub label_top: Option<String>,
    pub value: f64,
    #[serde(default)]
    pub is_comparison: bool,
}

impl LinePoint {
    pub fn new(label_bottom: impl Into<String>, value: f64) -> Self {
        Self {
            label_bottom: label_bottom.into(),
            label_top: None,
            value,
            is_comparison: false,
        }
    }

    pub fn top(mut self, label: impl Into<String>) -> Self {
        self.label_top = Some(label.into());
        self
    }

    pub fn comparison(mut self) -> Self {
        self.is_comparison = true;
        self
    }
}

/// Stroke, fill and dot colours of one series. The area fill is rendered as
/// a vertical gradient from white to `area`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesColors {
    pub line: String,
    pub area: String,
    pub dot: String,
}

impl SeriesColors {
    pub fn new(line: impl Into<String>, area: impl Into<String>, dot: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            area: area.into(),
            dot: dot.into(),
        }
    }
}

impl Default for SeriesColors {
    fn default() -> Self {
        Self::new(colors::CRIMSON, colors::CRIMSON_MIST, colors::CRIMSON)
    }
}

/// A named, coloured sequence of points sharing the chart's x-domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub group_id: GroupId,
    pub group_label: String,
    #[serde(default)]
    pub colors: SeriesColors,
    pub points: Vec<LinePoint>,
}

impl LineSeries {
    pub fn new(group_id: GroupId, group_label: impl Into<String>) -> Self {
        Self {
            group_id,
            group_label: group_label.into(),
            colors: SeriesColors::default(),
            points: Vec::new(),
        }
    }

    pub fn with_colors(mut self, colors: SeriesColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_points(mut self, points: Vec<LinePoint>) -> Self {
        self.points = points;
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Highest value in the series, `None` when empty
    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Legend row rendered below the x-axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }
}

/// Constant-value reference line drawn over the series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetLine {
    pub value: f64,
    pub color: String,
}

impl TargetLine {
    pub fn new(value: f64, color: impl Into<String>) -> Self {
        Self {
            value,
            color: color.into(),
        }
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Check the multi-series constraints: unique ids, finite non-negative
/// values, equal lengths and shared bottom labels.
///
/// An all-empty input is valid; it renders as the "no records" placeholder.
pub fn validate_series(series: &[LineSeries]) -> Result<()> {
    let Some(first) = series.first() else {
        return Ok(());
    };

    for (i, s) in series.iter().enumerate() {
        if series[..i].iter().any(|prev| prev.group_id == s.group_id) {
            return Err(ChartError::DuplicateGroupId(s.group_id.to_string()));
        }

        for (index, point) in s.points.iter().enumerate() {
            if !point.value.is_finite() || point.value < 0.0 {
                return Err(ChartError::InvalidValue {
                    group_id: s.group_id.to_string(),
                    index,
                    value: point.value,
                });
            }
        }

        if s.len() != first.len() {
            return Err(ChartError::SeriesLengthMismatch {
                group_id: s.group_id.to_string(),
                expected: first.len(),
                actual: s.len(),
            });
        }

        let mismatch = s
            .points
            .iter()
            .zip(&first.points)
            .position(|(a, b)| a.label_bottom != b.label_bottom);

        if let Some(index) = mismatch {
            return Err(ChartError::LabelMismatch {
                group_id: s.group_id.to_string(),
                index,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(id: &str, values: &[f64]) -> LineSeries {
        let labels = ["CMI", "CHS", "ABQ", "LAS", "GGG", "SAN", "TUL", "X1", "X2"];
        LineSeries::new(GroupId::new(id).unwrap(), id).with_points(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| LinePoint::new(labels[i % labels.len()], *v))
                .collect(),
        )
    }

    #[test]
    fn test_group_id_pattern() {
        assert!(GroupId::new("Cycle_8").is_ok());
        assert_eq!(
            GroupId::new("8 week"),
            Err(ChartError::InvalidGroupId("8 week".into()))
        );
        assert!(GroupId::new("").is_err());
    }

    #[test]
    fn test_group_id_rejected_when_deserializing() {
        let parsed: std::result::Result<GroupId, _> = serde_json::from_str("\"a-b\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_validate_accepts_matching_series() {
        let data = vec![series("ISD", &[2.0, 50.0]), series("Cycle", &[76.0, 79.0])];
        assert_eq!(validate_series(&data), Ok(()));
    }

    #[test]
    fn test_validate_accepts_empty_series() {
        let data = vec![series("ISD", &[]), series("Cycle", &[])];
        assert_eq!(validate_series(&data), Ok(()));
        assert_eq!(validate_series(&[]), Ok(()));
    }

    #[test]
    fn test_validate_rejects_length_mismatch() {
        let data = vec![series("ISD", &[2.0, 50.0, 58.0]), series("Cycle", &[76.0])];
        assert_eq!(
            validate_series(&data),
            Err(ChartError::SeriesLengthMismatch {
                group_id: "Cycle".into(),
                expected: 3,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_validate_rejects_label_mismatch() {
        let mut other = series("Cycle", &[76.0, 79.0]);
        other.points[1].label_bottom = "ZZZ".into();
        let data = vec![series("ISD", &[2.0, 50.0]), other];
        assert_eq!(
            validate_series(&data),
            Err(ChartError::LabelMismatch {
                group_id: "Cycle".into(),
                index: 1,
            })
        );
    }

    #[test]
    fn test_validate_rejects_nan_and_negative() {
        let data = vec![series("ISD", &[2.0, f64::NAN])];
        assert!(matches!(
            validate_series(&data),
            Err(ChartError::InvalidValue { index: 1, .. })
        ));

        let data = vec![series("ISD", &[-1.0])];
        assert!(matches!(
            validate_series(&data),
            Err(ChartError::InvalidValue { index: 0, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let data = vec![series("ISD", &[1.0]), series("ISD", &[2.0])];
        assert_eq!(
            validate_series(&data),
            Err(ChartError::DuplicateGroupId("ISD".into()))
        );
    }

    #[test]
    fn test_max_value() {
        assert_eq!(series("ISD", &[2.0, 99.0, 65.0]).max_value(), Some(99.0));
        assert_eq!(series("ISD", &[]).max_value(), None);
    }

    #[test]
    fn test_point_deserializes_with_defaults() {
        let point: LinePoint =
            serde_json::from_str(r#"{"label_bottom":"CMI","value":2}"#).unwrap();
        assert_eq!(point.label_top, None);
        assert!(!point.is_comparison);
    }
}
