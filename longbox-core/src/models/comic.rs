use serde::{Deserialize, Serialize};

/// One comic row with its series and publisher names resolved.
/// Relations (creators, characters, teams) are fetched separately
/// by the result assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComicSummary {
    pub id: i64,
    pub title: String,
    pub series: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<i32>,
    pub file_path: String,
}

/// A creator credit on a comic: name plus the role held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorCredit {
    pub name: String,
    pub role: String,
}

/// An (id, name) row from one of the named-entity tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRow {
    pub id: i64,
    pub name: String,
}

/// One raw co-credit row: a collaborator's credit on a comic shared
/// with the primary creator. Self-pairs are excluded by the aggregator,
/// not the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollabRow {
    pub comic_id: i64,
    pub collaborator_id: i64,
    pub collaborator_name: String,
    pub role: String,
}

/// Which name pool a fuzzy fallback draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    /// Comic titles; the "entity id" is the comic id itself.
    ComicTitle,
    Series,
    Publisher,
    Creator,
    Character,
    Team,
    Event,
}
