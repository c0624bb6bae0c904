use std::collections::BTreeMap;

use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::error::Result;
use crate::types::{DailyHistoryPoint, Game};

/// All scheduled games, date ascending. Games with no date sort first and are
/// filtered by the caller.
pub async fn fetch_games(conn: &mut SqliteConnection) -> Result<Vec<Game>> {
    let games = sqlx::query_as::<_, Game>(
        r#"
        SELECT game_id, game_date, is_weekend, promo_flag
        FROM games
        ORDER BY game_date
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(games)
}

#[derive(Debug, sqlx::FromRow)]
struct SeriesRow {
    game_date: NaiveDate,
    value: Option<f64>,
}

/// Daily history: full outer join on date of the per-date attendance and
/// revenue aggregates, date ascending. A date present in only one series
/// carries a null for the other metric; dates with no recorded value in
/// either series (future games, games with no facts) are absent, so they
/// never shift the forecast anchor.
pub async fn fetch_daily_history(conn: &mut SqliteConnection) -> Result<Vec<DailyHistoryPoint>> {
    let attendance = sqlx::query_as::<_, SeriesRow>(
        r#"
        SELECT g.game_date AS game_date, CAST(SUM(fa.scanned_count) AS REAL) AS value
        FROM games g
        LEFT JOIN attendance_facts fa ON fa.game_id = g.game_id
        WHERE g.game_date IS NOT NULL
        GROUP BY g.game_date
        ORDER BY g.game_date
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    let revenue = sqlx::query_as::<_, SeriesRow>(
        r#"
        SELECT g.game_date AS game_date, CAST(SUM(ts.revenue) AS REAL) AS value
        FROM games g
        LEFT JOIN ticket_sales_facts ts ON ts.game_id = g.game_id
        WHERE g.game_date IS NOT NULL
        GROUP BY g.game_date
        ORDER BY g.game_date
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    let mut merged: BTreeMap<NaiveDate, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for row in attendance {
        merged.entry(row.game_date).or_default().0 = row.value;
    }
    for row in revenue {
        merged.entry(row.game_date).or_default().1 = row.value;
    }

    Ok(merged
        .into_iter()
        .filter(|(_, (attendance, revenue))| attendance.is_some() || revenue.is_some())
        .map(|(game_date, (attendance, revenue))| DailyHistoryPoint {
            game_date,
            attendance,
            revenue,
        })
        .collect())
}
