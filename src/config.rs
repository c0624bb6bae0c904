use crate::error::Result;

/// Forecast horizon for the aggregate daily series: 8 weeks.
pub const AGG_HORIZON_DAYS: u32 = 56;

/// Trailing-window length (observations, not calendar days) for the
/// moving-average baseline.
pub const TRAILING_WINDOW: usize = 28;

/// Minimum non-null observations before the seasonal branch is eligible.
/// Below this the aggregate attendance forecast always takes the
/// rule-based fallback, even with the capability present.
pub const MIN_SEASONAL_POINTS: usize = 10;

/// Minimum observations the per-game trailing-mean base requires before it
/// emits a value. Shorter histories fall back to the plain overall mean.
pub const MIN_BASE_OBSERVATIONS: usize = 7;

/// Weekly seasonal period fed to the MSTL decomposition.
pub const WEEKLY_PERIOD: usize = 7;

/// Default multipliers when the historical average is zero (or a conditional
/// subset is empty): an assumed ~10% weekend lift. Heuristic constants with
/// no derivation behind them; tunable, not a law of the domain.
pub const DEFAULT_WEEKEND_MULT: f64 = 1.05;
pub const DEFAULT_WEEKDAY_MULT: f64 = 0.95;

/// Promotion uplifts, composed multiplicatively on top of the
/// weekend/weekday multiplier.
pub const PROMO_UPLIFT_ATTENDANCE: f64 = 1.10;
pub const PROMO_UPLIFT_REVENUE: f64 = 1.08;

/// Last-resort per-game base values when no history-derived base exists.
pub const DEFAULT_BASE_ATTENDANCE: f64 = 10_000.0;
pub const DEFAULT_BASE_REVENUE: f64 = 300_000.0;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub db_path: String,
    /// Seasonal capability switch (SEASONAL_ENABLED). Off selects the
    /// rule-based fallback for aggregate attendance regardless of data size.
    pub seasonal_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "ticketing.db".to_string()),
            seasonal_enabled: std::env::var("SEASONAL_ENABLED")
                .map(|v| !matches!(v.trim(), "0" | "false" | "off"))
                .unwrap_or(true),
        })
    }
}
