use serde::{Deserialize, Serialize};

use crate::constants;

/// Search engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Structural result count below which the match cascade engages.
    pub min_results: usize,
    /// Acceptance threshold for the edit-distance cascade tier.
    pub fuzzy_threshold: f64,
    /// Strip leading articles ("the", "a", "an") during name normalization.
    pub strip_leading_articles: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_results: constants::DEFAULT_MIN_RESULTS,
            fuzzy_threshold: constants::DEFAULT_FUZZY_THRESHOLD,
            strip_leading_articles: false,
        }
    }
}
