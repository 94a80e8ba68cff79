//! Name pools and entity→comic walks for the fuzzy fallback path.

use rusqlite::Connection;

use longbox_core::errors::EngineResult;
use longbox_core::models::{NameKind, NamedRow};

use super::placeholders;
use crate::to_store_err;

/// All (id, name) rows of one entity kind.
pub fn name_pool(conn: &Connection, kind: NameKind) -> EngineResult<Vec<NamedRow>> {
    let sql = match kind {
        NameKind::ComicTitle => "SELECT id, title FROM comics",
        NameKind::Series => "SELECT id, name FROM series",
        NameKind::Publisher => "SELECT id, name FROM publishers",
        NameKind::Creator => "SELECT id, name FROM creators",
        NameKind::Character => "SELECT id, name FROM characters",
        NameKind::Team => "SELECT id, name FROM teams",
        NameKind::Event => "SELECT id, name FROM events",
    };
    let mut stmt = conn.prepare(sql).map_err(|e| to_store_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(NamedRow {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_store_err(e.to_string()))?);
    }
    Ok(results)
}

/// Comic ids linked to any of the given entities.
pub fn comic_ids_for(
    conn: &Connection,
    kind: NameKind,
    entity_ids: &[i64],
) -> EngineResult<Vec<i64>> {
    if entity_ids.is_empty() {
        return Ok(Vec::new());
    }
    let ph = placeholders(entity_ids.len());
    let sql = match kind {
        NameKind::ComicTitle => format!("SELECT id FROM comics WHERE id IN ({ph})"),
        NameKind::Series => {
            format!("SELECT DISTINCT id FROM comics WHERE series_id IN ({ph})")
        }
        NameKind::Publisher => {
            format!("SELECT DISTINCT id FROM comics WHERE publisher_id IN ({ph})")
        }
        NameKind::Creator => {
            format!("SELECT DISTINCT comic_id FROM comic_creators WHERE creator_id IN ({ph})")
        }
        NameKind::Character => {
            format!("SELECT DISTINCT comic_id FROM comic_characters WHERE character_id IN ({ph})")
        }
        NameKind::Team => {
            format!("SELECT DISTINCT comic_id FROM comic_teams WHERE team_id IN ({ph})")
        }
        NameKind::Event => {
            format!("SELECT DISTINCT comic_id FROM comic_events WHERE event_id IN ({ph})")
        }
    };
    collect_ids(conn, &sql, entity_ids)
}

/// Comic ids for characters, optionally excluding team-roster rows.
pub fn comic_ids_for_characters(
    conn: &Connection,
    character_ids: &[i64],
    include_teams: bool,
) -> EngineResult<Vec<i64>> {
    if character_ids.is_empty() {
        return Ok(Vec::new());
    }
    let ph = placeholders(character_ids.len());
    let filter = if include_teams {
        ""
    } else {
        " AND via_team = 0"
    };
    let sql = format!(
        "SELECT DISTINCT comic_id FROM comic_characters WHERE character_id IN ({ph}){filter}"
    );
    collect_ids(conn, &sql, character_ids)
}

/// Comic ids for creators, optionally restricted to one role.
pub fn comic_ids_for_creators(
    conn: &Connection,
    creator_ids: &[i64],
    role: Option<&str>,
) -> EngineResult<Vec<i64>> {
    if creator_ids.is_empty() {
        return Ok(Vec::new());
    }
    let ph = placeholders(creator_ids.len());
    match role {
        None => {
            let sql = format!(
                "SELECT DISTINCT comic_id FROM comic_creators WHERE creator_id IN ({ph})"
            );
            collect_ids(conn, &sql, creator_ids)
        }
        Some(role) => {
            let role_ph = creator_ids.len() + 1;
            let sql = format!(
                "SELECT DISTINCT comic_id FROM comic_creators
                 WHERE creator_id IN ({ph}) AND UPPER(role) = UPPER(?{role_ph})"
            );
            let mut stmt = conn.prepare(&sql).map_err(|e| to_store_err(e.to_string()))?;
            let mut params: Vec<Box<dyn rusqlite::ToSql>> = creator_ids
                .iter()
                .map(|id| Box::new(*id) as Box<dyn rusqlite::ToSql>)
                .collect();
            params.push(Box::new(role.to_string()));
            let param_refs: Vec<&dyn rusqlite::ToSql> =
                params.iter().map(|p| p.as_ref()).collect();

            let rows = stmt
                .query_map(param_refs.as_slice(), |row| row.get::<_, i64>(0))
                .map_err(|e| to_store_err(e.to_string()))?;

            let mut results = Vec::new();
            for row in rows {
                results.push(row.map_err(|e| to_store_err(e.to_string()))?);
            }
            Ok(results)
        }
    }
}

fn collect_ids(conn: &Connection, sql: &str, ids: &[i64]) -> EngineResult<Vec<i64>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_store_err(e.to_string()))?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(ids.iter()), |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_store_err(e.to_string()))?);
    }
    Ok(results)
}
