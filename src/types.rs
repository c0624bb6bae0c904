use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel game id for venue-wide (non-game-specific) forecast rows.
pub const AGGREGATE_GAME_ID: i64 = 0;

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

/// One scheduled game. Maintained entirely outside this job.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Game {
    pub game_id: i64,
    pub game_date: Option<NaiveDate>,
    pub is_weekend: bool,
    pub promo_flag: bool,
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// One calendar date with recorded activity in either series. Produced by
/// outer-joining the per-date attendance and revenue aggregates, so either
/// metric may be absent for a given date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyHistoryPoint {
    pub game_date: NaiveDate,
    pub attendance: Option<f64>,
    pub revenue: Option<f64>,
}

// ---------------------------------------------------------------------------
// Forecast output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    Attendance,
    Revenue,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Attendance => "Attendance",
            Metric::Revenue => "Revenue",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One forecast row. Natural key is (game_id, forecast_date, metric);
/// values may be fractional, there is no rounding contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRow {
    pub game_id: i64,
    pub forecast_date: NaiveDate,
    pub metric: Metric,
    pub forecast_value: f64,
    pub model: String,
}
