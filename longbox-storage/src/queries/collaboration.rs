//! Raw co-credit rows for the collaboration aggregator.

use rusqlite::Connection;

use longbox_core::errors::EngineResult;
use longbox_core::models::CollabRow;

use super::placeholders;
use crate::to_store_err;

/// Every distinct (comic, collaborator, role) credit on comics the given
/// creators appear on. The primary creators' own credits are included;
/// self-pair exclusion is the aggregator's rule, not the store's.
pub fn collaboration_rows(conn: &Connection, creator_ids: &[i64]) -> EngineResult<Vec<CollabRow>> {
    if creator_ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT DISTINCT a1.comic_id, a2.creator_id, cr.name, a2.role
         FROM comic_creators a1
         JOIN comic_creators a2 ON a1.comic_id = a2.comic_id
         JOIN creators cr ON a2.creator_id = cr.id
         WHERE a1.creator_id IN ({})",
        placeholders(creator_ids.len())
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_store_err(e.to_string()))?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(creator_ids.iter()), |row| {
            Ok(CollabRow {
                comic_id: row.get(0)?,
                collaborator_id: row.get(1)?,
                collaborator_name: row.get(2)?,
                role: row.get(3)?,
            })
        })
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_store_err(e.to_string()))?);
    }
    Ok(results)
}
