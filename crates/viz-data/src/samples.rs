//! Pie, bar and radar demo data

use rand::Rng;
use viz_core::{BarGroup, BarValue, PieSlice, RadarAxisValue, RadarSet};

pub const PIE_LABELS: [&str; 3] = ["Completed", "To be received", "In progress"];
pub const RADAR_AXES: usize = 6;
pub const RADAR_SETS: usize = 2;

const MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
const STOCK_TRANSFER: [f64; 6] = [75354.0, 85354.0, 55354.0, 65354.0, 75354.0, 85354.0];
const ADJUSTMENTS: [f64; 6] = [78456.0, 81456.0, 68456.0, 68456.0, 78456.0, 81456.0];

// ============================================================================
// PIE
// ============================================================================

/// Three receiving-status slices with whole values in `[0, 1000)`
pub fn random_pie_slices<R: Rng>(rng: &mut R) -> Vec<PieSlice> {
    PIE_LABELS
        .iter()
        .map(|label| PieSlice::new(*label, rng.gen_range(0..1000) as f64))
        .collect()
}

pub fn pie_slices() -> Vec<PieSlice> {
    random_pie_slices(&mut rand::thread_rng())
}

// ============================================================================
// BAR
// ============================================================================

/// Monthly inventory movements: stock transfers, adjustments, cycle counts
pub fn inventory_bar_groups() -> Vec<BarGroup> {
    MONTHS
        .iter()
        .zip(STOCK_TRANSFER.iter().zip(ADJUSTMENTS))
        .map(|(month, (&transfer, adjustment))| {
            let entry = |label: &str, value: f64, color: &str| {
                BarValue::new(label, value, color).with_legend(format!("{}", value))
            };
            BarGroup::new(
                *month,
                vec![
                    entry("Stock Transfer", transfer, "#a32b00"),
                    entry("Inv Adjustment", adjustment, "#e7a988"),
                    entry("Cycle Count", adjustment, "#e94e14"),
                ],
            )
        })
        .collect()
}

// ============================================================================
// RADAR
// ============================================================================

/// Two sets over six axes with values in `[0, 100)`
pub fn random_radar_sets<R: Rng>(rng: &mut R) -> Vec<RadarSet> {
    (0..RADAR_SETS)
        .map(|_| {
            RadarSet::new(
                (1..=RADAR_AXES)
                    .map(|i| RadarAxisValue::new(format!("Axis {}", i), rng.r#gen::<f64>() * 100.0))
                    .collect(),
            )
        })
        .collect()
}

pub fn radar_sets() -> Vec<RadarSet> {
    random_radar_sets(&mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use viz_core::{GroupedNumberFormatter, ValueFormatter, bar_max, dominant_set};

    #[test]
    fn test_pie_slices_in_range() {
        let slices = random_pie_slices(&mut StdRng::seed_from_u64(1));
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[1].label, "To be received");
        assert!(slices.iter().all(|s| (0.0..1000.0).contains(&s.value) && s.value.fract() == 0.0));
    }

    #[test]
    fn test_bar_groups() {
        let groups = inventory_bar_groups();
        assert_eq!(groups.len(), 6);
        assert_eq!(groups[0].key, "Jan");
        assert_eq!(groups[0].values.len(), 3);
        assert_eq!(bar_max(&groups), 85354.0);
        assert_eq!(
            GroupedNumberFormatter::default().format(groups[0].values[0].legend_value()),
            "75,354"
        );
    }

    #[test]
    fn test_radar_sets_shape() {
        let sets = random_radar_sets(&mut StdRng::seed_from_u64(3));
        assert_eq!(sets.len(), RADAR_SETS);
        assert!(sets.iter().all(|s| s.axes.len() == RADAR_AXES));
        assert_eq!(sets[0].axes[5].axis, "Axis 6");
        assert!(dominant_set(&sets).is_some());
    }
}
