//! CatalogStore — owns the connection, runs migrations on open,
//! implements the ICatalogStore read surface.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::debug;

use longbox_core::deadline::Deadline;
use longbox_core::errors::{EngineError, EngineResult, StoreError};
use longbox_core::models::{
    CatalogStats, CollabRow, ComicSummary, CreatorCredit, NameKind, NamedRow, SqlPredicate,
};
use longbox_core::traits::ICatalogStore;

use crate::migrations;
use crate::queries;

/// SQLite-backed catalog store. A single connection behind a mutex: the
/// engine only reads, and concurrency across calls comes from callers
/// holding independent stores, not from pooling inside this one.
pub struct CatalogStore {
    conn: Mutex<Connection>,
}

impl CatalogStore {
    /// Open a catalog backed by a file on disk.
    pub fn open(path: &Path) -> EngineResult<Self> {
        let conn = Connection::open(path).map_err(|e| {
            EngineError::Store(StoreError::Unavailable {
                reason: format!("cannot open {}: {e}", path.display()),
            })
        })?;
        Self::initialize(conn)
    }

    /// Open an in-memory catalog (tests and fixtures).
    pub fn open_in_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            EngineError::Store(StoreError::Unavailable {
                reason: format!("cannot open in-memory store: {e}"),
            })
        })?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> EngineResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON")
            .map_err(|e| crate::to_store_err(e.to_string()))?;
        migrations::run_migrations(&conn)?;
        debug!("catalog store initialized");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run a closure against the connection.
    pub(crate) fn with_conn<F, T>(&self, f: F) -> EngineResult<T>
    where
        F: FnOnce(&Connection) -> EngineResult<T>,
    {
        let guard = self.conn.lock().map_err(|_| {
            EngineError::Store(StoreError::Unavailable {
                reason: "connection mutex poisoned".to_string(),
            })
        })?;
        f(&guard)
    }
}

impl ICatalogStore for CatalogStore {
    fn comics_where(
        &self,
        predicate: &SqlPredicate,
        deadline: Deadline,
    ) -> EngineResult<Vec<ComicSummary>> {
        deadline.check()?;
        self.with_conn(|conn| queries::comic_rows::comics_where(conn, predicate))
    }

    fn comics_by_ids(&self, ids: &[i64], deadline: Deadline) -> EngineResult<Vec<ComicSummary>> {
        deadline.check()?;
        self.with_conn(|conn| queries::comic_rows::comics_by_ids(conn, ids))
    }

    fn creators_for(&self, comic_id: i64) -> EngineResult<Vec<CreatorCredit>> {
        self.with_conn(|conn| queries::comic_rows::creators_for(conn, comic_id))
    }

    fn characters_for(&self, comic_id: i64) -> EngineResult<Vec<String>> {
        self.with_conn(|conn| queries::comic_rows::characters_for(conn, comic_id))
    }

    fn teams_for(&self, comic_id: i64) -> EngineResult<Vec<String>> {
        self.with_conn(|conn| queries::comic_rows::teams_for(conn, comic_id))
    }

    fn name_pool(&self, kind: NameKind, deadline: Deadline) -> EngineResult<Vec<NamedRow>> {
        deadline.check()?;
        self.with_conn(|conn| queries::name_pools::name_pool(conn, kind))
    }

    fn comic_ids_for(
        &self,
        kind: NameKind,
        entity_ids: &[i64],
        deadline: Deadline,
    ) -> EngineResult<Vec<i64>> {
        deadline.check()?;
        self.with_conn(|conn| queries::name_pools::comic_ids_for(conn, kind, entity_ids))
    }

    fn comic_ids_for_characters(
        &self,
        character_ids: &[i64],
        include_teams: bool,
        deadline: Deadline,
    ) -> EngineResult<Vec<i64>> {
        deadline.check()?;
        self.with_conn(|conn| {
            queries::name_pools::comic_ids_for_characters(conn, character_ids, include_teams)
        })
    }

    fn comic_ids_for_creators(
        &self,
        creator_ids: &[i64],
        role: Option<&str>,
        deadline: Deadline,
    ) -> EngineResult<Vec<i64>> {
        deadline.check()?;
        self.with_conn(|conn| queries::name_pools::comic_ids_for_creators(conn, creator_ids, role))
    }

    fn collaboration_rows(
        &self,
        creator_ids: &[i64],
        deadline: Deadline,
    ) -> EngineResult<Vec<CollabRow>> {
        deadline.check()?;
        self.with_conn(|conn| queries::collaboration::collaboration_rows(conn, creator_ids))
    }

    fn catalog_stats(&self) -> EngineResult<CatalogStats> {
        self.with_conn(queries::stats::catalog_stats)
    }
}
