//! Pie and donut chart data

use serde::{Deserialize, Serialize};

/// Pie chart flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieKind {
    #[default]
    Pie,
    Donut,
}

impl PieKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Pie => "pie-chart",
            Self::Donut => "donut-chart",
        }
    }
}

/// Single pie slice. `color` overrides the chart palette for this slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    #[serde(default)]
    pub color: Option<String>,
}

impl PieSlice {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Sum of all positive, finite slice values
pub fn pie_total(slices: &[PieSlice]) -> f64 {
    slices
        .iter()
        .map(|s| s.value)
        .filter(|v| v.is_finite() && *v > 0.0)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pie_total_skips_invalid_values() {
        let slices = vec![
            PieSlice::new("Completed", 300.0),
            PieSlice::new("In progress", -5.0),
            PieSlice::new("To be received", f64::NAN),
            PieSlice::new("Other", 200.0),
        ];
        assert_eq!(pie_total(&slices), 500.0);
    }

    #[test]
    fn test_kind_from_json() {
        let kind: PieKind = serde_json::from_str("\"donut\"").unwrap();
        assert_eq!(kind, PieKind::Donut);
    }
}
