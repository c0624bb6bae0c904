pub mod config;
pub mod db;
pub mod error;
pub mod forecast;
pub mod types;

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::forecast::seasonal::{MstlSeasonal, SeasonalDisabled, SeasonalModel};
use crate::types::Game;

/// Full batch run against the configured database: connect, migrate, then
/// read, invalidate, compute and insert inside one transaction.
pub async fn run(cfg: Config) -> Result<u64> {
    let pool = sqlx::SqlitePool::connect(&format!("sqlite:{}?mode=rwc", cfg.db_path)).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database ready at {}", cfg.db_path);

    let seasonal: Box<dyn SeasonalModel> = if cfg.seasonal_enabled {
        Box::new(MstlSeasonal)
    } else {
        Box::new(SeasonalDisabled)
    };
    // UTC to stay aligned with the storage engine's date('now').
    let today = Utc::now().date_naive();
    execute_run(&pool, seasonal.as_ref(), today).await
}

/// One forecast run on an existing pool. All four data-store operations
/// (game fetch, history fetch, invalidation, insert) execute on a single
/// transaction that commits exactly once at the end; any error on any path
/// rolls the whole run back.
pub async fn execute_run(
    pool: &sqlx::SqlitePool,
    seasonal: &dyn SeasonalModel,
    today: NaiveDate,
) -> Result<u64> {
    let mut tx = pool.begin().await?;

    let games = db::repository::fetch_games(&mut tx).await?;
    let history = db::repository::fetch_daily_history(&mut tx).await?;
    info!(
        games = games.len(),
        history_dates = history.len(),
        "history loaded"
    );

    // Clear future rows first so re-runs never duplicate.
    db::writer::invalidate_future(&mut tx).await?;

    let mut rows = forecast::aggregate::forecast_aggregate(&history, seasonal)?;
    let aggregate_count = rows.len();

    let future_games: Vec<Game> = games
        .into_iter()
        .filter(|g| g.game_date.is_some_and(|d| d >= today))
        .collect();
    rows.extend(forecast::per_game::forecast_per_game(&future_games, &history));

    let written = db::writer::persist(&mut tx, &rows).await?;
    tx.commit().await?;

    info!(
        aggregate_rows = aggregate_count,
        per_game_rows = rows.len() - aggregate_count,
        "forecast run committed"
    );
    Ok(written)
}
