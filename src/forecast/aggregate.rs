use chrono::{Days, NaiveDate};
use tracing::info;

use crate::config::{AGG_HORIZON_DAYS, MIN_SEASONAL_POINTS, TRAILING_WINDOW};
use crate::error::Result;
use crate::forecast::seasonal::SeasonalModel;
use crate::forecast::{trailing_mean, Multipliers};
use crate::types::{DailyHistoryPoint, ForecastRow, Metric, AGGREGATE_GAME_ID};

/// Model label for the moving-average fallback.
pub const RULE_BASED_MA28: &str = "RuleBased-MA28";

/// Venue-wide daily forecast, 56 days starting the day after the latest
/// history date.
///
/// Attendance takes the seasonal branch iff the capability is available and
/// the non-null attendance sub-series has at least [`MIN_SEASONAL_POINTS`]
/// observations; otherwise the MA28 fallback. Revenue always takes the MA28
/// computation. Eligibility is the only fallback trigger: a seasonal fit or
/// predict failure after the guard passes aborts the run.
pub fn forecast_aggregate(
    history: &[DailyHistoryPoint],
    seasonal: &dyn SeasonalModel,
) -> Result<Vec<ForecastRow>> {
    let mut out = Vec::new();

    // Both metrics anchor on the max date of the full merged frame, even if
    // one series ends earlier.
    let Some(anchor) = history.iter().map(|p| p.game_date).max() else {
        return Ok(out);
    };

    let att: Vec<(NaiveDate, f64)> = history
        .iter()
        .filter_map(|p| p.attendance.map(|v| (p.game_date, v)))
        .collect();
    if !att.is_empty() {
        if seasonal.available() && att.len() >= MIN_SEASONAL_POINTS {
            info!(
                observations = att.len(),
                model = seasonal.label(),
                "aggregate attendance: seasonal branch"
            );
            let fitted = seasonal.fit(&att)?;
            for (date, value) in fitted.predict(AGG_HORIZON_DAYS)? {
                out.push(ForecastRow {
                    game_id: AGGREGATE_GAME_ID,
                    forecast_date: date,
                    metric: Metric::Attendance,
                    forecast_value: value,
                    model: seasonal.label().to_string(),
                });
            }
        } else {
            info!(
                observations = att.len(),
                "aggregate attendance: rule-based fallback"
            );
            emit_rule_based(&mut out, &att, anchor, Metric::Attendance);
        }
    }

    let rev: Vec<(NaiveDate, f64)> = history
        .iter()
        .filter_map(|p| p.revenue.map(|v| (p.game_date, v)))
        .collect();
    if !rev.is_empty() {
        emit_rule_based(&mut out, &rev, anchor, Metric::Revenue);
    }

    Ok(out)
}

/// MA28 fallback: trailing-28 mean as the flat baseline, adjusted per day by
/// the weekend/weekday multiplier.
fn emit_rule_based(
    out: &mut Vec<ForecastRow>,
    series: &[(NaiveDate, f64)],
    anchor: NaiveDate,
    metric: Metric,
) {
    let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
    let avg = trailing_mean(&values, TRAILING_WINDOW, 1).unwrap_or(0.0);
    let mults = Multipliers::from_series(series, avg);

    for offset in 1..=AGG_HORIZON_DAYS {
        let date = anchor + Days::new(offset as u64);
        out.push(ForecastRow {
            game_id: AGGREGATE_GAME_ID,
            forecast_date: date,
            metric,
            forecast_value: avg * mults.for_date(date),
            model: RULE_BASED_MA28.to_string(),
        });
    }
}
