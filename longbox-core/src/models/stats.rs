use serde::{Deserialize, Serialize};

/// Whole-catalog counts and year span.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_comics: usize,
    pub total_series: usize,
    pub total_publishers: usize,
    pub total_creators: usize,
    pub total_characters: usize,
    pub total_teams: usize,
    pub total_events: usize,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
}
