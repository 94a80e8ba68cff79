//! Engine-wide default values.

/// Minimum result count a cascade tier must reach before escalation stops.
pub const DEFAULT_MIN_RESULTS: usize = 1;

/// Default acceptance threshold for the edit-distance cascade tier.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// Leading articles the normalizer may strip for sort-insensitive matching.
pub const LEADING_ARTICLES: [&str; 3] = ["the", "a", "an"];
