//! Predicate execution and per-comic relation fetches.

use rusqlite::{params, Connection, Row};

use longbox_core::errors::EngineResult;
use longbox_core::models::{ComicSummary, CreatorCredit, JoinTable, SqlPredicate};

use super::{placeholders, Bind};
use crate::to_store_err;

/// Base SELECT for comic summaries: series and publisher names resolved
/// through LEFT JOINs so comics without either still appear.
const COMIC_SELECT: &str = "SELECT DISTINCT c.id, c.title, s.name, p.name, c.year, c.file_path
     FROM comics c
     LEFT JOIN series s ON c.series_id = s.id
     LEFT JOIN publishers p ON c.publisher_id = p.id";

fn parse_comic_row(row: &Row<'_>) -> rusqlite::Result<ComicSummary> {
    Ok(ComicSummary {
        id: row.get(0)?,
        title: row.get(1)?,
        series: row.get(2)?,
        publisher: row.get(3)?,
        year: row.get(4)?,
        file_path: row.get(5)?,
    })
}

/// Distinct comics satisfying the predicate.
pub fn comics_where(
    conn: &Connection,
    predicate: &SqlPredicate,
) -> EngineResult<Vec<ComicSummary>> {
    // The base query already carries the series/publisher joins; only
    // appearance-table joins from the plan are appended.
    let extra_joins: Vec<&str> = predicate
        .joins
        .iter()
        .filter(|j| !matches!(**j, JoinTable::Series | JoinTable::Publisher))
        .map(|j| j.sql())
        .collect();

    let sql = format!(
        "{COMIC_SELECT} {} WHERE {} ORDER BY c.year, c.title",
        extra_joins.join(" "),
        predicate.where_sql
    );

    let mut stmt = conn.prepare(&sql).map_err(|e| to_store_err(e.to_string()))?;
    let rows = stmt
        .query_map(
            rusqlite::params_from_iter(predicate.binds.iter().map(Bind)),
            parse_comic_row,
        )
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_store_err(e.to_string()))?);
    }
    Ok(results)
}

/// Summaries for an explicit id set.
pub fn comics_by_ids(conn: &Connection, ids: &[i64]) -> EngineResult<Vec<ComicSummary>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "{COMIC_SELECT} WHERE c.id IN ({}) ORDER BY c.year, c.title",
        placeholders(ids.len())
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_store_err(e.to_string()))?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(ids.iter()), parse_comic_row)
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_store_err(e.to_string()))?);
    }
    Ok(results)
}

/// Creator credits for one comic, ordered by role then name.
pub fn creators_for(conn: &Connection, comic_id: i64) -> EngineResult<Vec<CreatorCredit>> {
    let mut stmt = conn
        .prepare(
            "SELECT cr.name, cc.role
             FROM comic_creators cc
             JOIN creators cr ON cc.creator_id = cr.id
             WHERE cc.comic_id = ?1
             ORDER BY cc.role, cr.name",
        )
        .map_err(|e| to_store_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![comic_id], |row| {
            Ok(CreatorCredit {
                name: row.get(0)?,
                role: row.get(1)?,
            })
        })
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_store_err(e.to_string()))?);
    }
    Ok(results)
}

/// Character names appearing in one comic, alphabetical.
pub fn characters_for(conn: &Connection, comic_id: i64) -> EngineResult<Vec<String>> {
    names_for(
        conn,
        "SELECT ch.name
         FROM comic_characters cch
         JOIN characters ch ON cch.character_id = ch.id
         WHERE cch.comic_id = ?1
         ORDER BY ch.name",
        comic_id,
    )
}

/// Team names appearing in one comic, alphabetical.
pub fn teams_for(conn: &Connection, comic_id: i64) -> EngineResult<Vec<String>> {
    names_for(
        conn,
        "SELECT t.name
         FROM comic_teams ct
         JOIN teams t ON ct.team_id = t.id
         WHERE ct.comic_id = ?1
         ORDER BY t.name",
        comic_id,
    )
}

fn names_for(conn: &Connection, sql: &str, comic_id: i64) -> EngineResult<Vec<String>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_store_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![comic_id], |row| row.get::<_, String>(0))
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_store_err(e.to_string()))?);
    }
    Ok(results)
}
