use augurs::ets::AutoETS;
use augurs::mstl::MSTLModel;
use augurs::prelude::*;
use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::config::WEEKLY_PERIOD;
use crate::error::{AppError, Result};

/// Pluggable seasonal-forecasting capability. Availability is a plain boolean
/// the aggregate forecaster branches on before fitting; an unavailable
/// implementation never raises from the availability check itself.
pub trait SeasonalModel {
    fn available(&self) -> bool;

    /// Model-family tag written into the forecast row's `model` column.
    fn label(&self) -> &'static str;

    fn fit(&self, history: &[(NaiveDate, f64)]) -> Result<Box<dyn FittedSeasonal>>;
}

pub trait FittedSeasonal {
    /// Point estimates for the `horizon_days` dates immediately following the
    /// training history's last date.
    fn predict(&self, horizon_days: u32) -> Result<Vec<(NaiveDate, f64)>>;
}

// ---------------------------------------------------------------------------
// MSTL + AutoETS implementation
// ---------------------------------------------------------------------------

/// Weekly-seasonal additive model: MSTL decomposition with period 7 and an
/// AutoETS trend. Series shorter than two full weekly cycles degrade to the
/// plain AutoETS trend model (the decomposition needs period < n/2).
pub struct MstlSeasonal;

impl SeasonalModel for MstlSeasonal {
    fn available(&self) -> bool {
        true
    }

    fn label(&self) -> &'static str {
        "MSTL"
    }

    fn fit(&self, history: &[(NaiveDate, f64)]) -> Result<Box<dyn FittedSeasonal>> {
        if history.is_empty() {
            return Err(AppError::ModelFit(
                "cannot fit seasonal model on empty history".to_string(),
            ));
        }
        let (values, last_date) = regularize(history);
        debug!(
            observations = history.len(),
            grid_days = values.len(),
            "seasonal fit grid prepared"
        );
        Ok(Box::new(FittedMstl { values, last_date }))
    }
}

struct FittedMstl {
    /// Daily-regular series with interior gaps linearly interpolated.
    values: Vec<f64>,
    last_date: NaiveDate,
}

impl FittedSeasonal for FittedMstl {
    fn predict(&self, horizon_days: u32) -> Result<Vec<(NaiveDate, f64)>> {
        if horizon_days == 0 {
            return Ok(Vec::new());
        }
        let point = mstl_point_forecast(&self.values, horizon_days as usize)?;
        Ok(point
            .into_iter()
            .enumerate()
            .map(|(i, v)| (self.last_date + Days::new(i as u64 + 1), v))
            .collect())
    }
}

fn mstl_point_forecast(values: &[f64], horizon: usize) -> Result<Vec<f64>> {
    // STL needs the period well inside the series length.
    if WEEKLY_PERIOD * 2 < values.len() {
        let trend = AutoETS::new(1, "ZZN")
            .map_err(|e| AppError::ModelFit(format!("ETS init: {e}")))?
            .into_trend_model();
        let fitted = MSTLModel::new(vec![WEEKLY_PERIOD], trend)
            .fit(values)
            .map_err(|e| AppError::ModelFit(format!("MSTL fit: {e}")))?;
        let forecast = fitted
            .predict(horizon, 0.95)
            .map_err(|e| AppError::ModelFit(format!("MSTL predict: {e}")))?;
        Ok(forecast.point)
    } else {
        let fitted = AutoETS::new(1, "ZZN")
            .map_err(|e| AppError::ModelFit(format!("ETS init: {e}")))?
            .fit(values)
            .map_err(|e| AppError::ModelFit(format!("ETS fit: {e}")))?;
        let forecast = fitted
            .predict(horizon, 0.95)
            .map_err(|e| AppError::ModelFit(format!("ETS predict: {e}")))?;
        Ok(forecast.point)
    }
}

/// Expand an irregular (date, value) series into a daily grid from the first
/// to the last observed date, linearly interpolating interior gaps. Input is
/// date-ascending (repository order). Returns the grid and its last date.
fn regularize(history: &[(NaiveDate, f64)]) -> (Vec<f64>, NaiveDate) {
    let last_date = history[history.len() - 1].0;
    let mut values = Vec::new();
    for pair in history.windows(2) {
        let (d0, v0) = pair[0];
        let (d1, v1) = pair[1];
        let span = (d1 - d0).num_days();
        for step in 0..span {
            values.push(v0 + (v1 - v0) * step as f64 / span as f64);
        }
    }
    values.push(history[history.len() - 1].1);
    (values, last_date)
}

// ---------------------------------------------------------------------------
// Disabled capability
// ---------------------------------------------------------------------------

/// Capability switch for SEASONAL_ENABLED=0: reports unavailable so the
/// aggregate forecaster takes the rule-based fallback. `fit` is unreachable
/// behind the eligibility guard.
pub struct SeasonalDisabled;

impl SeasonalModel for SeasonalDisabled {
    fn available(&self) -> bool {
        false
    }

    fn label(&self) -> &'static str {
        "Disabled"
    }

    fn fit(&self, _history: &[(NaiveDate, f64)]) -> Result<Box<dyn FittedSeasonal>> {
        Err(AppError::ModelFit(
            "seasonal capability is disabled".to_string(),
        ))
    }
}
