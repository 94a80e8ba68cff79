//! Whole-catalog counts and year span.

use rusqlite::Connection;

use longbox_core::errors::EngineResult;
use longbox_core::models::CatalogStats;

use crate::to_store_err;

pub fn catalog_stats(conn: &Connection) -> EngineResult<CatalogStats> {
    let count = |table: &str| -> EngineResult<usize> {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get::<_, i64>(0)
        })
        .map(|n| n as usize)
        .map_err(|e| to_store_err(e.to_string()))
    };

    let (year_min, year_max) = conn
        .query_row(
            "SELECT MIN(year), MAX(year) FROM comics WHERE year IS NOT NULL",
            [],
            |row| Ok((row.get::<_, Option<i32>>(0)?, row.get::<_, Option<i32>>(1)?)),
        )
        .map_err(|e| to_store_err(e.to_string()))?;

    Ok(CatalogStats {
        total_comics: count("comics")?,
        total_series: count("series")?,
        total_publishers: count("publishers")?,
        total_creators: count("creators")?,
        total_characters: count("characters")?,
        total_teams: count("teams")?,
        total_events: count("events")?,
        year_min,
        year_max,
    })
}
