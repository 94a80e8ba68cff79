use crate::deadline::Deadline;
use crate::errors::EngineResult;
use crate::models::{
    CatalogStats, CollabRow, ComicSummary, CreatorCredit, NameKind, NamedRow, SqlPredicate,
};

/// Read-only Data Store boundary. The engine threads the caller's deadline
/// into every fetch; connections, pooling, and retries are the store's
/// concern, never the engine's.
pub trait ICatalogStore: Send + Sync {
    // --- Predicate execution ---
    /// Distinct comics satisfying the predicate, with series and publisher
    /// names resolved.
    fn comics_where(
        &self,
        predicate: &SqlPredicate,
        deadline: Deadline,
    ) -> EngineResult<Vec<ComicSummary>>;

    /// Summaries for an explicit id set (fuzzy-fallback result mapping).
    fn comics_by_ids(&self, ids: &[i64], deadline: Deadline) -> EngineResult<Vec<ComicSummary>>;

    // --- Relations for assembly ---
    fn creators_for(&self, comic_id: i64) -> EngineResult<Vec<CreatorCredit>>;
    fn characters_for(&self, comic_id: i64) -> EngineResult<Vec<String>>;
    fn teams_for(&self, comic_id: i64) -> EngineResult<Vec<String>>;

    // --- Fuzzy fallback support ---
    /// All (id, name) rows of one entity kind, for cascade candidate pools.
    fn name_pool(&self, kind: NameKind, deadline: Deadline) -> EngineResult<Vec<NamedRow>>;

    /// Comic ids linked to any of the given entities of `kind`.
    /// For [`NameKind::ComicTitle`] the entity ids are comic ids.
    fn comic_ids_for(
        &self,
        kind: NameKind,
        entity_ids: &[i64],
        deadline: Deadline,
    ) -> EngineResult<Vec<i64>>;

    /// Comic ids for characters, optionally excluding team-roster rows.
    fn comic_ids_for_characters(
        &self,
        character_ids: &[i64],
        include_teams: bool,
        deadline: Deadline,
    ) -> EngineResult<Vec<i64>>;

    /// Comic ids for creators, optionally restricted to one role
    /// (case-insensitive).
    fn comic_ids_for_creators(
        &self,
        creator_ids: &[i64],
        role: Option<&str>,
        deadline: Deadline,
    ) -> EngineResult<Vec<i64>>;

    // --- Collaboration ---
    /// Raw co-credit rows for comics the given creators appear on.
    /// Includes the primary creators' own credits; the aggregator excludes
    /// self-pairs.
    fn collaboration_rows(
        &self,
        creator_ids: &[i64],
        deadline: Deadline,
    ) -> EngineResult<Vec<CollabRow>>;

    // --- Aggregation ---
    fn catalog_stats(&self) -> EngineResult<CatalogStats>;
}
