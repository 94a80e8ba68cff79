//! Response envelope shared by every search tool.

use serde::Serialize;

use longbox_core::models::{Confidence, CreatorCredit};

/// One assembled comic with its relations nested.
#[derive(Debug, Clone, Serialize)]
pub struct ComicResult {
    pub id: i64,
    pub title: String,
    pub series: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<i32>,
    pub creators: Vec<CreatorCredit>,
    pub characters: Vec<String>,
    pub teams: Vec<String>,
    pub file_path: String,
    pub match_confidence: Confidence,
}

/// Caller-auditable query metadata attached to every response.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseMetadata {
    pub query_time_ms: u64,
    pub result_count: usize,
    /// The caller's search terms, echoed back verbatim.
    pub search_terms: serde_json::Value,
    /// Whether any cascade tier beyond exact contributed results.
    pub fuzzy_matches_used: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub results: Vec<ComicResult>,
    pub metadata: ResponseMetadata,
}

/// One ranked collaborator row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollaborationEntry {
    pub collaborator: String,
    pub role: String,
    pub shared_comic_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollaborationResponse {
    pub results: Vec<CollaborationEntry>,
    pub metadata: ResponseMetadata,
}
