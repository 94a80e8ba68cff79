//! Catalog ingest API. The engine never writes; this surface exists for
//! importers and tests building a catalog to search.

use rusqlite::{params, Connection};

use longbox_core::errors::EngineResult;

use crate::store::CatalogStore;
use crate::to_store_err;

/// A comic row to insert.
#[derive(Debug, Clone, Default)]
pub struct NewComic<'a> {
    pub title: &'a str,
    pub series_id: Option<i64>,
    pub publisher_id: Option<i64>,
    pub year: Option<i32>,
    pub file_path: &'a str,
}

impl CatalogStore {
    /// Insert a publisher, returning the existing id if the name is known.
    pub fn add_publisher(&self, name: &str) -> EngineResult<i64> {
        self.with_conn(|conn| upsert_named(conn, "publishers", name))
    }

    pub fn add_series(&self, name: &str, publisher_id: Option<i64>) -> EngineResult<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO series (name, publisher_id) VALUES (?1, ?2)",
                params![name, publisher_id],
            )
            .map_err(|e| to_store_err(e.to_string()))?;
            conn.query_row(
                "SELECT id FROM series WHERE name = ?1 AND publisher_id IS ?2",
                params![name, publisher_id],
                |row| row.get(0),
            )
            .map_err(|e| to_store_err(e.to_string()))
        })
    }

    pub fn add_comic(&self, comic: &NewComic<'_>) -> EngineResult<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO comics (title, series_id, publisher_id, year, file_path)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    comic.title,
                    comic.series_id,
                    comic.publisher_id,
                    comic.year,
                    comic.file_path
                ],
            )
            .map_err(|e| to_store_err(e.to_string()))?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn add_creator(&self, name: &str) -> EngineResult<i64> {
        self.with_conn(|conn| upsert_named(conn, "creators", name))
    }

    pub fn add_character(&self, name: &str) -> EngineResult<i64> {
        self.with_conn(|conn| upsert_named(conn, "characters", name))
    }

    pub fn add_team(&self, name: &str) -> EngineResult<i64> {
        self.with_conn(|conn| upsert_named(conn, "teams", name))
    }

    pub fn add_event(&self, name: &str) -> EngineResult<i64> {
        self.with_conn(|conn| upsert_named(conn, "events", name))
    }

    /// Credit a creator on a comic under one role. Duplicate
    /// (comic, creator, role) triples are ignored.
    pub fn credit_creator(&self, comic_id: i64, creator_id: i64, role: &str) -> EngineResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO comic_creators (comic_id, creator_id, role)
                 VALUES (?1, ?2, ?3)",
                params![comic_id, creator_id, role],
            )
            .map_err(|e| to_store_err(e.to_string()))?;
            Ok(())
        })
    }

    pub fn link_character(
        &self,
        comic_id: i64,
        character_id: i64,
        via_team: bool,
    ) -> EngineResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO comic_characters (comic_id, character_id, via_team)
                 VALUES (?1, ?2, ?3)",
                params![comic_id, character_id, via_team as i32],
            )
            .map_err(|e| to_store_err(e.to_string()))?;
            Ok(())
        })
    }

    pub fn link_team(&self, comic_id: i64, team_id: i64) -> EngineResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO comic_teams (comic_id, team_id) VALUES (?1, ?2)",
                params![comic_id, team_id],
            )
            .map_err(|e| to_store_err(e.to_string()))?;
            Ok(())
        })
    }

    pub fn link_event(&self, comic_id: i64, event_id: i64) -> EngineResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO comic_events (comic_id, event_id) VALUES (?1, ?2)",
                params![comic_id, event_id],
            )
            .map_err(|e| to_store_err(e.to_string()))?;
            Ok(())
        })
    }
}

fn upsert_named(conn: &Connection, table: &str, name: &str) -> EngineResult<i64> {
    conn.execute(
        &format!("INSERT OR IGNORE INTO {table} (name) VALUES (?1)"),
        params![name],
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    conn.query_row(
        &format!("SELECT id FROM {table} WHERE name = ?1"),
        params![name],
        |row| row.get(0),
    )
    .map_err(|e| to_store_err(e.to_string()))
}
