//! Radar chart data

use serde::{Deserialize, Serialize};

/// Minimum radius domain so small datasets keep a readable grid
pub const RADAR_MIN_MAX_VALUE: f64 = 5.0;

/// Value on one radar axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarAxisValue {
    pub axis: String,
    pub value: f64,
}

impl RadarAxisValue {
    pub fn new(axis: impl Into<String>, value: f64) -> Self {
        Self {
            axis: axis.into(),
            value,
        }
    }

    /// NaN reads as zero
    pub fn value_or_zero(&self) -> f64 {
        if self.value.is_nan() { 0.0 } else { self.value }
    }
}

/// One plotted row of the radar chart
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RadarSet {
    pub axes: Vec<RadarAxisValue>,
}

impl RadarSet {
    pub fn new(axes: Vec<RadarAxisValue>) -> Self {
        Self { axes }
    }

    /// Set maximum, never below [`RADAR_MIN_MAX_VALUE`]
    pub fn max_value(&self) -> f64 {
        self.axes
            .iter()
            .map(RadarAxisValue::value_or_zero)
            .fold(RADAR_MIN_MAX_VALUE, f64::max)
    }
}

/// Index of the set with the largest maximum; its axis names define the
/// chart's spokes.
pub fn dominant_set(sets: &[RadarSet]) -> Option<(usize, f64)> {
    sets.iter()
        .enumerate()
        .map(|(i, s)| (i, s.max_value()))
        .fold(None, |best, (i, max)| match best {
            Some((_, best_max)) if best_max >= max => best,
            _ => Some((i, max)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_value_has_floor() {
        let set = RadarSet::new(vec![RadarAxisValue::new("Axis 1", 2.0)]);
        assert_eq!(set.max_value(), RADAR_MIN_MAX_VALUE);
    }

    #[test]
    fn test_nan_reads_as_zero() {
        let set = RadarSet::new(vec![
            RadarAxisValue::new("Axis 1", f64::NAN),
            RadarAxisValue::new("Axis 2", 42.0),
        ]);
        assert_eq!(set.axes[0].value_or_zero(), 0.0);
        assert_eq!(set.max_value(), 42.0);
    }

    #[test]
    fn test_dominant_set_keeps_first_on_tie() {
        let a = RadarSet::new(vec![RadarAxisValue::new("x", 80.0)]);
        let b = RadarSet::new(vec![RadarAxisValue::new("x", 90.0)]);
        let c = RadarSet::new(vec![RadarAxisValue::new("x", 90.0)]);
        assert_eq!(dominant_set(&[a, b, c]), Some((1, 90.0)));
        assert_eq!(dominant_set(&[]), None);
    }
}
