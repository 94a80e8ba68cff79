//! Tiered match cascade: exact → substring → token overlap → edit distance.
//!
//! Tiers engage in order, and only while the running match count is below
//! the configured minimum. A candidate matched by an earlier tier is never
//! rescored by a later one.

use std::collections::HashSet;

use tracing::debug;

use longbox_core::constants::{DEFAULT_FUZZY_THRESHOLD, DEFAULT_MIN_RESULTS};
use longbox_core::models::Confidence;

use crate::normalizer::Normalizer;

/// One strictness level in the escalation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    Exact,
    Substring,
    TokenOverlap,
    EditDistance,
}

impl MatchTier {
    const ALL: [MatchTier; 4] = [
        MatchTier::Exact,
        MatchTier::Substring,
        MatchTier::TokenOverlap,
        MatchTier::EditDistance,
    ];

    /// Per-tier confidence ceiling. Ceilings are non-increasing down the
    /// cascade, which is what makes per-pair confidence monotone across
    /// tiers (see [`match_cascade`]).
    pub fn ceiling(self) -> f64 {
        match self {
            MatchTier::Exact => 1.0,
            MatchTier::Substring => 0.9,
            MatchTier::TokenOverlap => 0.85,
            MatchTier::EditDistance => 0.85,
        }
    }

    /// Whether this tier is a fuzzy escalation beyond exact matching.
    pub fn is_fuzzy(self) -> bool {
        self != MatchTier::Exact
    }
}

/// Cascade tuning. `min_results` is the escalation rule: a tier only runs
/// while fewer matches than this have accumulated.
#[derive(Debug, Clone)]
pub struct CascadeConfig {
    pub min_results: usize,
    /// Jaro-Winkler acceptance threshold for the edit-distance tier.
    pub fuzzy_threshold: f64,
    /// Caller override: run tier 1 only and return empty rather than
    /// escalate.
    pub exact_only: bool,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            min_results: DEFAULT_MIN_RESULTS,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            exact_only: false,
        }
    }
}

/// A candidate accepted by the cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch {
    /// The candidate string as supplied, not its normalized form.
    pub candidate: String,
    pub confidence: Confidence,
    pub tier: MatchTier,
}

/// Run the cascade for `query` over a pool of candidate names.
///
/// Returns matches sorted by confidence descending, then candidate name
/// ascending. The confidence a tier assigns a pair is
/// `min(tier ceiling, max(raw score of this and every later tier))`;
/// together with non-increasing ceilings this guarantees that a pair
/// matched at tier *k* scores at least what any later tier would have
/// given it.
pub fn match_cascade<'a, I>(
    query: &str,
    candidates: I,
    config: &CascadeConfig,
    normalizer: &Normalizer,
) -> Vec<ScoredMatch>
where
    I: IntoIterator<Item = &'a str>,
{
    let query_norm = normalizer.normalize(query);
    if query_norm.is_empty() {
        return Vec::new();
    }
    let query_tokens = tokenize(&query_norm);

    // Score every tier for every candidate up front; the escalation loop
    // below only decides which tier claims the pair.
    let scored: Vec<CandidateScores> = candidates
        .into_iter()
        .map(|raw| {
            let norm = normalizer.normalize(raw);
            CandidateScores::compute(raw, &norm, &query_norm, &query_tokens, config.fuzzy_threshold)
        })
        .collect();

    let mut matches: Vec<ScoredMatch> = Vec::new();
    let mut taken = vec![false; scored.len()];

    for tier in MatchTier::ALL {
        if config.exact_only && tier.is_fuzzy() {
            break;
        }
        if tier.is_fuzzy() && matches.len() >= config.min_results {
            break;
        }
        for (idx, cand) in scored.iter().enumerate() {
            if taken[idx] {
                continue;
            }
            if cand.raw(tier).is_some() {
                taken[idx] = true;
                matches.push(ScoredMatch {
                    candidate: cand.raw_name.clone(),
                    confidence: Confidence::new(cand.confidence_at(tier)),
                    tier,
                });
            }
        }
    }

    matches.sort_by(|a, b| {
        b.confidence
            .value()
            .partial_cmp(&a.confidence.value())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.candidate.cmp(&b.candidate))
    });

    debug!(
        query = %query,
        pool = scored.len(),
        matched = matches.len(),
        "match cascade complete"
    );
    matches
}

/// Raw per-tier scores for one (query, candidate) pair.
struct CandidateScores {
    raw_name: String,
    exact: Option<f64>,
    substring: Option<f64>,
    token: Option<f64>,
    edit: Option<f64>,
}

impl CandidateScores {
    fn compute(
        raw_name: &str,
        norm: &str,
        query_norm: &str,
        query_tokens: &HashSet<String>,
        fuzzy_threshold: f64,
    ) -> Self {
        if norm.is_empty() {
            return Self {
                raw_name: raw_name.to_string(),
                exact: None,
                substring: None,
                token: None,
                edit: None,
            };
        }

        let exact = (norm == query_norm).then_some(1.0);
        let substring = norm.contains(query_norm).then_some(0.9);

        let jaccard = token_jaccard(query_tokens, &tokenize(norm));
        let token = (jaccard > 0.0).then(|| 0.5 + 0.35 * jaccard);

        let similarity = strsim::jaro_winkler(query_norm, norm);
        let edit = (similarity >= fuzzy_threshold).then_some(similarity);

        Self {
            raw_name: raw_name.to_string(),
            exact,
            substring,
            token,
            edit,
        }
    }

    fn raw(&self, tier: MatchTier) -> Option<f64> {
        match tier {
            MatchTier::Exact => self.exact,
            MatchTier::Substring => self.substring,
            MatchTier::TokenOverlap => self.token,
            MatchTier::EditDistance => self.edit,
        }
    }

    /// `min(ceiling, max of this and every later tier's raw score)`.
    fn confidence_at(&self, tier: MatchTier) -> f64 {
        let best_below = MatchTier::ALL
            .iter()
            .filter(|t| **t >= tier)
            .filter_map(|t| self.raw(*t))
            .fold(0.0_f64, f64::max);
        best_below.min(tier.ceiling())
    }
}

/// Split a normalized name on whitespace and hyphens.
fn tokenize(norm: &str) -> HashSet<String> {
    norm.split(|c: char| c.is_whitespace() || c == '-')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn token_jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    if shared == 0 {
        return 0.0;
    }
    let union = a.len() + b.len() - shared;
    shared as f64 / union as f64
}
