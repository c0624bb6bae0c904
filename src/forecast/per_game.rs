use chrono::NaiveDate;

use crate::config::{
    DEFAULT_BASE_ATTENDANCE, DEFAULT_BASE_REVENUE, MIN_BASE_OBSERVATIONS,
    PROMO_UPLIFT_ATTENDANCE, PROMO_UPLIFT_REVENUE, TRAILING_WINDOW,
};
use crate::forecast::{is_weekend, mean, trailing_mean, Multipliers};
use crate::types::{DailyHistoryPoint, ForecastRow, Game, Metric};

/// Model label for per-game point estimates.
pub const RULE_BASED: &str = "RuleBased";

/// One Attendance and one Revenue point estimate per future game, at the
/// game's own date, keyed to the game's id.
///
/// History rows with a null in either metric are dropped entirely (a
/// stricter cleaning than the aggregate forecaster's per-metric drop) and
/// multipliers are recomputed from that stricter subset.
pub fn forecast_per_game(future_games: &[Game], history: &[DailyHistoryPoint]) -> Vec<ForecastRow> {
    let clean: Vec<(NaiveDate, f64, f64)> = history
        .iter()
        .filter_map(|p| match (p.attendance, p.revenue) {
            (Some(att), Some(rev)) => Some((p.game_date, att, rev)),
            _ => None,
        })
        .collect();
    if clean.is_empty() || future_games.is_empty() {
        return Vec::new();
    }

    let att_series: Vec<(NaiveDate, f64)> = clean.iter().map(|&(d, a, _)| (d, a)).collect();
    let rev_series: Vec<(NaiveDate, f64)> = clean.iter().map(|&(d, _, r)| (d, r)).collect();
    let att_values: Vec<f64> = att_series.iter().map(|&(_, v)| v).collect();
    let rev_values: Vec<f64> = rev_series.iter().map(|&(_, v)| v).collect();

    let att_avg = mean(&att_values).unwrap_or(0.0);
    let rev_avg = mean(&rev_values).unwrap_or(0.0);
    let att_mults = Multipliers::from_series(&att_series, att_avg);
    let rev_mults = Multipliers::from_series(&rev_series, rev_avg);

    // Trailing 28-window mean (min 7 observations) as the baseline, falling
    // back to the overall mean, then to the hardcoded defaults.
    let base_att = trailing_mean(&att_values, TRAILING_WINDOW, MIN_BASE_OBSERVATIONS)
        .unwrap_or(if att_avg != 0.0 { att_avg } else { DEFAULT_BASE_ATTENDANCE });
    let base_rev = trailing_mean(&rev_values, TRAILING_WINDOW, MIN_BASE_OBSERVATIONS)
        .unwrap_or(if rev_avg != 0.0 { rev_avg } else { DEFAULT_BASE_REVENUE });

    let mut out = Vec::new();
    for game in future_games {
        let Some(date) = game.game_date else {
            continue;
        };
        let (att_mult, rev_mult) = game_multipliers(&att_mults, &rev_mults, game);

        out.push(ForecastRow {
            game_id: game.game_id,
            forecast_date: date,
            metric: Metric::Attendance,
            forecast_value: base_att * att_mult,
            model: RULE_BASED.to_string(),
        });
        out.push(ForecastRow {
            game_id: game.game_id,
            forecast_date: date,
            metric: Metric::Revenue,
            forecast_value: base_rev * rev_mult,
            model: RULE_BASED.to_string(),
        });
    }
    out
}

/// Weekend/weekday multiplier per the game's flag, with the promo uplift
/// composed multiplicatively on top when the game is flagged.
fn game_multipliers(att: &Multipliers, rev: &Multipliers, game: &Game) -> (f64, f64) {
    let mut att_mult = att.for_weekend_flag(game.is_weekend);
    let mut rev_mult = rev.for_weekend_flag(game.is_weekend);
    if game.promo_flag {
        att_mult *= PROMO_UPLIFT_ATTENDANCE;
        rev_mult *= PROMO_UPLIFT_REVENUE;
    }
    (att_mult, rev_mult)
}
