use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::Result;
use crate::types::ForecastRow;

/// Deletes every forecast row dated today or later. The storage engine's own
/// clock (`date('now')`) is authoritative, not the caller's, so a skewed job
/// host cannot leave stale future rows behind.
///
/// Runs on the caller's transaction: invalidation and the subsequent insert
/// share one atomic boundary, so a failed run never ends with future
/// forecasts deleted but not replaced.
pub async fn invalidate_future(conn: &mut SqliteConnection) -> Result<u64> {
    let result = sqlx::query("DELETE FROM forecasts WHERE forecast_date >= date('now')")
        .execute(&mut *conn)
        .await?;
    let deleted = result.rows_affected();
    debug!(deleted, "invalidated future forecast rows");
    Ok(deleted)
}

/// Inserts each row verbatim on the caller's transaction, one statement per
/// row. The caller commits after all rows are written.
pub async fn persist(conn: &mut SqliteConnection, rows: &[ForecastRow]) -> Result<u64> {
    for row in rows {
        sqlx::query(
            r#"
            INSERT INTO forecasts (game_id, forecast_date, metric, forecast_value, model)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(row.game_id)
        .bind(row.forecast_date)
        .bind(row.metric.as_str())
        .bind(row.forecast_value)
        .bind(&row.model)
        .execute(&mut *conn)
        .await?;
    }
    Ok(rows.len() as u64)
}
