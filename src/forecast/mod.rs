pub mod aggregate;
pub mod per_game;
pub mod seasonal;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::config::{DEFAULT_WEEKDAY_MULT, DEFAULT_WEEKEND_MULT};

pub(crate) fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of the most recent `min(window, len)` values, requiring at least
/// `min_obs` observations to emit anything. Callers pass date-sorted values.
pub(crate) fn trailing_mean(values: &[f64], window: usize, min_obs: usize) -> Option<f64> {
    if values.len() < min_obs.max(1) {
        return None;
    }
    let tail = &values[values.len().saturating_sub(window)..];
    mean(tail)
}

/// Weekend/weekday adjustment factors derived from one metric's history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multipliers {
    pub weekend: f64,
    pub weekday: f64,
}

impl Multipliers {
    /// Ratio of each conditional mean to the unconditional average. A zero
    /// average (or an empty conditional subset) takes the default constants.
    pub fn from_series(series: &[(NaiveDate, f64)], avg: f64) -> Self {
        let weekend_vals: Vec<f64> = series
            .iter()
            .filter(|(d, _)| is_weekend(*d))
            .map(|(_, v)| *v)
            .collect();
        let weekday_vals: Vec<f64> = series
            .iter()
            .filter(|(d, _)| !is_weekend(*d))
            .map(|(_, v)| *v)
            .collect();

        if avg == 0.0 {
            return Self {
                weekend: DEFAULT_WEEKEND_MULT,
                weekday: DEFAULT_WEEKDAY_MULT,
            };
        }
        Self {
            weekend: mean(&weekend_vals).map_or(DEFAULT_WEEKEND_MULT, |m| m / avg),
            weekday: mean(&weekday_vals).map_or(DEFAULT_WEEKDAY_MULT, |m| m / avg),
        }
    }

    pub fn for_date(&self, date: NaiveDate) -> f64 {
        if is_weekend(date) {
            self.weekend
        } else {
            self.weekday
        }
    }

    pub fn for_weekend_flag(&self, weekend: bool) -> f64 {
        if weekend {
            self.weekend
        } else {
            self.weekday
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        // 2025-06-02 is a Monday.
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[test]
    fn weekend_detection() {
        assert!(!is_weekend(d(2))); // Mon
        assert!(!is_weekend(d(6))); // Fri
        assert!(is_weekend(d(7))); // Sat
        assert!(is_weekend(d(8))); // Sun
    }

    #[test]
    fn trailing_mean_uses_tail_only() {
        let values = vec![0.0, 0.0, 10.0, 20.0];
        assert_eq!(trailing_mean(&values, 2, 1), Some(15.0));
    }

    #[test]
    fn trailing_mean_short_series_uses_everything() {
        let values = vec![10.0, 20.0];
        assert_eq!(trailing_mean(&values, 28, 1), Some(15.0));
    }

    #[test]
    fn trailing_mean_respects_min_obs() {
        let values = vec![10.0, 20.0, 30.0];
        assert_eq!(trailing_mean(&values, 28, 7), None);
        assert_eq!(trailing_mean(&[], 28, 1), None);
    }

    #[test]
    fn multipliers_are_ratios_of_conditional_means() {
        // Mon..Fri at 100, Sat+Sun at 200 -> avg = 900/7.
        let series: Vec<(NaiveDate, f64)> = (2..=8)
            .map(|day| (d(day), if day >= 7 { 200.0 } else { 100.0 }))
            .collect();
        let avg = 900.0 / 7.0;
        let m = Multipliers::from_series(&series, avg);
        assert!((m.weekend - 200.0 / avg).abs() < 1e-12);
        assert!((m.weekday - 100.0 / avg).abs() < 1e-12);
    }

    #[test]
    fn zero_average_takes_default_multipliers() {
        let series = vec![(d(2), 0.0), (d(7), 0.0)];
        let m = Multipliers::from_series(&series, 0.0);
        assert_eq!(m.weekend, DEFAULT_WEEKEND_MULT);
        assert_eq!(m.weekday, DEFAULT_WEEKDAY_MULT);
    }

    #[test]
    fn empty_conditional_subset_takes_default() {
        // Weekdays only: weekend multiplier has no data behind it.
        let series = vec![(d(2), 100.0), (d(3), 100.0)];
        let m = Multipliers::from_series(&series, 100.0);
        assert_eq!(m.weekend, DEFAULT_WEEKEND_MULT);
        assert!((m.weekday - 1.0).abs() < 1e-12);
    }
}
