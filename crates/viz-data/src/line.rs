//! Line chart datasets: station deliveries, an in-place update, the empty
//! case and the drill-down periods.

use chrono::{Months, NaiveDate};
use rand::Rng;
use viz_core::{GroupId, LinePoint, LineSeries, Result, SeriesColors, colors};

pub const STATIONS: [&str; 7] = ["CMI", "CHS", "ABQ", "LAS", "GGG", "SAN", "TUL"];
pub const COMPARISONS: [&str; 2] = ["Comp1", "Comp2"];

const PRIMARY_REGION: &str = "NRCC#1";
const COMPARISON_REGION: &str = "NRCC#2";

const ISD_VALUES: [f64; 9] = [2.0, 50.0, 58.0, 77.0, 32.0, 99.0, 65.0, 100.0, 98.0];
const CYCLE_VALUES: [f64; 9] = [76.0, 79.0, 96.0, 97.0, 76.0, 96.0, 64.0, 100.0, 98.0];
const UPDATED_ISD: [f64; 7] = [10.20, 50.78, 62.0, 84.0, 32.0, 67.0, 64.61];
const UPDATED_CYCLE: [f64; 7] = [43.0, 55.0, 69.0, 77.0, 52.0, 64.80, 99.0];
const DRILL_DOWN_ISD: [f64; 6] = [2.0, 50.0, 58.0, 77.0, 32.0, 99.0];
const DRILL_DOWN_CYCLE: [f64; 6] = [76.0, 79.0, 96.0, 97.0, 76.0, 96.0];

pub const ISD_ID: &str = "ISD";
pub const CYCLE_ID: &str = "Cycle";

pub fn isd_colors() -> SeriesColors {
    SeriesColors::new(colors::NAVY, colors::NAVY_MIST, colors::NAVY)
}

pub fn cycle_colors() -> SeriesColors {
    SeriesColors::new(colors::CRIMSON, colors::CRIMSON_MIST, colors::CRIMSON)
}

fn isd(points: Vec<LinePoint>) -> Result<LineSeries> {
    Ok(LineSeries::new(GroupId::new(ISD_ID)?, "ISD")
        .with_colors(isd_colors())
        .with_points(points))
}

fn cycle(points: Vec<LinePoint>) -> Result<LineSeries> {
    Ok(LineSeries::new(GroupId::new(CYCLE_ID)?, "8 Week Avg")
        .with_colors(cycle_colors())
        .with_points(points))
}

/// Seven stations followed by two comparison points
fn station_points(values: &[f64]) -> Vec<LinePoint> {
    STATIONS
        .iter()
        .chain(COMPARISONS.iter())
        .zip(values)
        .enumerate()
        .map(|(i, (label, value))| {
            if i < STATIONS.len() {
                LinePoint::new(*label, *value).top(PRIMARY_REGION)
            } else {
                LinePoint::new(*label, *value).top(COMPARISON_REGION).comparison()
            }
        })
        .collect()
}

/// Station deliveries: the 8-week average and the current ISD
pub fn station_series() -> Result<Vec<LineSeries>> {
    Ok(vec![
        cycle(station_points(&CYCLE_VALUES))?,
        isd(station_points(&ISD_VALUES))?,
    ])
}

/// Replacement data for an in-place update (stations only)
pub fn updated_series() -> Result<Vec<LineSeries>> {
    Ok(vec![
        isd(station_points(&UPDATED_ISD))?
            .with_colors(SeriesColors::new(colors::NAVY, "#E6F0FFCC", colors::NAVY)),
        cycle(station_points(&UPDATED_CYCLE))?,
    ])
}

/// Both groups present but without points
pub fn empty_series() -> Result<Vec<LineSeries>> {
    Ok(vec![cycle(Vec::new())?, isd(Vec::new())?])
}

/// Random station values in `[0, 100)`, truncated to two decimals
pub fn random_station_series<R: Rng>(rng: &mut R) -> Result<Vec<LineSeries>> {
    let mut values = || -> Vec<f64> {
        (0..STATIONS.len())
            .map(|_| (rng.gen_range(0.0..100.0_f64) * 100.0).floor() / 100.0)
            .collect()
    };
    let isd_values = values();
    let cycle_values = values();
    Ok(vec![
        cycle(station_points(&cycle_values))?,
        isd(station_points(&isd_values))?,
    ])
}

/// Same as [`random_station_series`] using the thread-local generator
pub fn shuffled_station_series() -> Result<Vec<LineSeries>> {
    random_station_series(&mut rand::thread_rng())
}

// ============================================================================
// DRILL-DOWN PERIODS
// ============================================================================

/// `MM/DD/YYYY - MM/DD/YYYY` for a window of `months` starting at `start`
pub fn period_label(start: NaiveDate, months: u32) -> String {
    let end = start
        .checked_add_months(Months::new(months))
        .and_then(|next| next.pred_opt())
        .unwrap_or(start);
    format!("{} - {}", start.format("%m/%d/%Y"), end.format("%m/%d/%Y"))
}

/// Consecutive two-month windows starting at `start`
pub fn drill_down_periods(start: NaiveDate, count: usize) -> Vec<String> {
    let mut labels = Vec::with_capacity(count);
    let mut cursor = Some(start);
    for _ in 0..count {
        let Some(from) = cursor else {
            tracing::warn!(start = %start, "period window ran past the calendar range");
            break;
        };
        labels.push(period_label(from, 2));
        cursor = from.checked_add_months(Months::new(2));
    }
    labels
}

/// Six two-month periods per group, labelled for line-break rendering
pub fn drill_down_series(start: NaiveDate) -> Result<Vec<LineSeries>> {
    let periods = drill_down_periods(start, DRILL_DOWN_ISD.len());
    let points = |values: &[f64]| -> Vec<LinePoint> {
        periods
            .iter()
            .zip(values)
            .map(|(label, value)| LinePoint::new(label.clone(), *value).top(PRIMARY_REGION))
            .collect()
    };

    Ok(vec![
        cycle(points(&DRILL_DOWN_CYCLE))?,
        isd(points(&DRILL_DOWN_ISD))?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use viz_core::validate_series;

    fn jan_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_station_series_are_consistent() {
        let series = station_series().unwrap();
        assert_eq!(validate_series(&series), Ok(()));
        assert_eq!(series[0].group_id.as_str(), CYCLE_ID);
        assert_eq!(series[1].len(), 9);
        assert!(series[1].points[7].is_comparison);
        assert_eq!(series[1].points[7].label_top.as_deref(), Some("NRCC#2"));
        assert_eq!(series[1].points[6].value, 65.0);
    }

    #[test]
    fn test_updated_series_have_seven_points() {
        let series = updated_series().unwrap();
        assert_eq!(validate_series(&series), Ok(()));
        assert!(series.iter().all(|s| s.len() == 7));
        assert!(series.iter().all(|s| s.points.iter().all(|p| !p.is_comparison)));
    }

    #[test]
    fn test_empty_series() {
        let series = empty_series().unwrap();
        assert_eq!(series.len(), 2);
        assert!(series.iter().all(LineSeries::is_empty));
    }

    #[test]
    fn test_period_labels() {
        assert_eq!(period_label(jan_first(), 2), "01/01/2024 - 02/29/2024");
        let periods = drill_down_periods(jan_first(), 3);
        assert_eq!(periods[2], "05/01/2024 - 06/30/2024");
    }

    #[test]
    fn test_drill_down_series() {
        let series = drill_down_series(jan_first()).unwrap();
        assert_eq!(validate_series(&series), Ok(()));
        assert_eq!(series[0].len(), 6);
        assert!(series[0].points[0].label_bottom.contains(" - "));
    }

    #[test]
    fn test_random_series_are_seeded() {
        let a = random_station_series(&mut StdRng::seed_from_u64(7)).unwrap();
        let b = random_station_series(&mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(validate_series(&a), Ok(()));
        assert!(a[0].values().iter().all(|v| (0.0..100.0).contains(v)));
    }
}
