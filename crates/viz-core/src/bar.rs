//! Grouped bar chart data

use serde::{Deserialize, Serialize};

/// One bar inside a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarValue {
    pub label: String,
    pub value: f64,
    /// Text shown in the group's legend card
    #[serde(default)]
    pub legend: Option<String>,
    pub color: String,
}

impl BarValue {
    pub fn new(label: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            legend: None,
            color: color.into(),
        }
    }

    pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    /// Legend text, falling back to the raw value
    pub fn legend_value(&self) -> f64 {
        self.legend
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .unwrap_or(self.value)
    }
}

/// Bars sharing one x-axis key (e.g. a month)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGroup {
    pub key: String,
    pub values: Vec<BarValue>,
}

impl BarGroup {
    pub fn new(key: impl Into<String>, values: Vec<BarValue>) -> Self {
        Self {
            key: key.into(),
            values,
        }
    }

    pub fn max_value(&self) -> Option<f64> {
        self.values.iter().map(|v| v.value).reduce(f64::max)
    }
}

/// Highest bar across all groups, 0 when there is none
pub fn bar_max(groups: &[BarGroup]) -> f64 {
    groups
        .iter()
        .filter_map(BarGroup::max_value)
        .fold(0.0_f64, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_max() {
        let groups = vec![
            BarGroup::new("Jan", vec![BarValue::new("A", 75354.0, "#a32b00")]),
            BarGroup::new(
                "Feb",
                vec![
                    BarValue::new("A", 85354.0, "#a32b00"),
                    BarValue::new("B", 81456.0, "#e94e14"),
                ],
            ),
            BarGroup::new("Mar", vec![]),
        ];
        assert_eq!(bar_max(&groups), 85354.0);
        assert_eq!(bar_max(&[]), 0.0);
    }

    #[test]
    fn test_legend_value_prefers_legend_text() {
        let v = BarValue::new("A", 1.0, "#000").with_legend("75354");
        assert_eq!(v.legend_value(), 75354.0);
        let v = BarValue::new("A", 12.0, "#000").with_legend("n/a");
        assert_eq!(v.legend_value(), 12.0);
    }
}
