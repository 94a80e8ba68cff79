//! Property tests: normalizer idempotence, cascade determinism,
//! exact-only override, per-pair confidence dominance over later tiers.

use std::collections::HashSet;

use proptest::prelude::*;

use longbox_match::{match_cascade, CascadeConfig, MatchTier, Normalizer};

fn tokenize(norm: &str) -> HashSet<String> {
    norm.split(|c: char| c.is_whitespace() || c == '-')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let shared = a.intersection(b).count();
    if shared == 0 {
        return 0.0;
    }
    shared as f64 / (a.len() + b.len() - shared) as f64
}

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(s in ".{0,60}") {
        for normalizer in [Normalizer::new(false), Normalizer::new(true)] {
            let once = normalizer.normalize(&s);
            let twice = normalizer.normalize(&once);
            prop_assert_eq!(&once, &twice);
        }
    }

    #[test]
    fn prop_cascade_is_deterministic(
        query in "[a-zA-Z][a-zA-Z -]{0,15}",
        pool in prop::collection::vec("[a-zA-Z][a-zA-Z -]{0,15}", 0..8),
    ) {
        let normalizer = Normalizer::default();
        let config = CascadeConfig::default();
        let names: Vec<&str> = pool.iter().map(String::as_str).collect();
        let a = match_cascade(&query, names.iter().copied(), &config, &normalizer);
        let b = match_cascade(&query, names.iter().copied(), &config, &normalizer);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_exact_only_never_escalates(
        query in "[a-zA-Z][a-zA-Z -]{0,15}",
        pool in prop::collection::vec("[a-zA-Z][a-zA-Z -]{0,15}", 0..8),
    ) {
        let normalizer = Normalizer::default();
        let config = CascadeConfig {
            exact_only: true,
            ..CascadeConfig::default()
        };
        let matches = match_cascade(
            &query,
            pool.iter().map(String::as_str),
            &config,
            &normalizer,
        );
        for m in &matches {
            prop_assert_eq!(
                normalizer.normalize(&m.candidate),
                normalizer.normalize(&query)
            );
            prop_assert_eq!(m.confidence.value(), 1.0);
        }
    }

    #[test]
    fn prop_output_is_sorted_and_bounded(
        query in "[a-zA-Z][a-zA-Z -]{0,15}",
        pool in prop::collection::vec("[a-zA-Z][a-zA-Z -]{0,15}", 0..10),
    ) {
        let normalizer = Normalizer::default();
        // Force every tier to run so the whole confidence surface shows up.
        let config = CascadeConfig {
            min_results: usize::MAX,
            ..CascadeConfig::default()
        };
        let matches = match_cascade(
            &query,
            pool.iter().map(String::as_str),
            &config,
            &normalizer,
        );
        for pair in matches.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.confidence.value() >= b.confidence.value());
            if a.confidence.value() == b.confidence.value() {
                prop_assert!(a.candidate <= b.candidate);
            }
        }
        for m in &matches {
            prop_assert!((0.0..=1.0).contains(&m.confidence.value()));
        }
    }

    /// A pair matched at tier k scores at least what any later tier would
    /// have assigned it.
    #[test]
    fn prop_confidence_dominates_later_tiers(
        query in "[a-zA-Z][a-zA-Z -]{0,15}",
        pool in prop::collection::vec("[a-zA-Z][a-zA-Z -]{0,15}", 0..10),
    ) {
        let normalizer = Normalizer::default();
        let config = CascadeConfig {
            min_results: usize::MAX,
            ..CascadeConfig::default()
        };
        let matches = match_cascade(
            &query,
            pool.iter().map(String::as_str),
            &config,
            &normalizer,
        );
        let query_norm = normalizer.normalize(&query);
        let query_tokens = tokenize(&query_norm);

        for m in &matches {
            let cand_norm = normalizer.normalize(&m.candidate);
            let conf = m.confidence.value();

            // Independently recompute what the later tiers would assign.
            let j = jaccard(&query_tokens, &tokenize(&cand_norm));
            let sim = strsim::jaro_winkler(&query_norm, &cand_norm);
            let edit_assign = if sim >= config.fuzzy_threshold {
                Some(sim.min(MatchTier::EditDistance.ceiling()))
            } else {
                None
            };
            let token_assign = if j > 0.0 {
                let raw = 0.5 + 0.35 * j;
                Some(raw.max(edit_assign.unwrap_or(0.0)).min(MatchTier::TokenOverlap.ceiling()))
            } else {
                None
            };

            if m.tier < MatchTier::EditDistance {
                if let Some(edit) = edit_assign {
                    prop_assert!(conf >= edit - 1e-12, "tier {:?}: {conf} < edit {edit}", m.tier);
                }
            }
            if m.tier < MatchTier::TokenOverlap {
                if let Some(token) = token_assign {
                    prop_assert!(conf >= token - 1e-12, "tier {:?}: {conf} < token {token}", m.tier);
                }
            }
            if m.tier == MatchTier::Exact {
                prop_assert_eq!(conf, 1.0);
            }
        }
    }
}
