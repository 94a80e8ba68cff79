//! Property tests: LIKE escaping, builder determinism, boundary rejection.

use proptest::prelude::*;

use longbox_core::errors::ValidationError;
use longbox_core::models::BindValue;
use longbox_query::{build_predicate, Criteria, Criterion, TextMatch};

const KNOWN_FIELDS: [&str; 10] = [
    "title",
    "series",
    "publisher",
    "creator",
    "character",
    "team",
    "event",
    "year",
    "start_year",
    "end_year",
];

proptest! {
    /// Every `%`, `_`, and `\` in user text reaches the bind escaped, and
    /// the only unescaped wildcards are the containment wrapper's own.
    #[test]
    fn prop_like_wildcards_are_escaped(value in ".{1,40}") {
        let criteria = Criteria::new().with(Criterion::Title(TextMatch::partial(value.clone())));
        let p = build_predicate(&criteria, true).unwrap();
        prop_assert_eq!(p.binds.len(), 1);
        let BindValue::Text(bound) = &p.binds[0] else {
            panic!("title bind must be text");
        };
        prop_assert!(bound.starts_with('%') && bound.ends_with('%'));

        // Walk the interior: every metacharacter must follow a backslash.
        let interior = &bound[1..bound.len() - 1];
        let mut chars = interior.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                // Escape pair: consumes the escaped character.
                prop_assert!(matches!(chars.next(), Some('\\' | '%' | '_')));
            } else {
                prop_assert!(c != '%' && c != '_');
            }
        }
    }

    #[test]
    fn prop_builder_is_deterministic(
        title in ".{1,20}",
        team in ".{1,20}",
        match_all in any::<bool>(),
    ) {
        let criteria = Criteria::new()
            .with(Criterion::Title(TextMatch::partial(title)))
            .with(Criterion::Team(TextMatch::partial(team)));
        let a = build_predicate(&criteria, match_all).unwrap();
        let b = build_predicate(&criteria, match_all).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_unknown_keys_fail_loudly(key in "[a-z_]{1,15}") {
        prop_assume!(!KNOWN_FIELDS.contains(&key.as_str()));
        let raw = serde_json::json!({ key.clone(): "anything" });
        let err = Criteria::from_json(&raw).unwrap_err();
        prop_assert_eq!(err, ValidationError::UnknownField { field: key });
    }

    /// `year` combined with either range bound is always ambiguous.
    #[test]
    fn prop_year_with_range_is_ambiguous(
        year in 1900..2100i32,
        bound in 1900..2100i32,
        use_start in any::<bool>(),
    ) {
        let key = if use_start { "start_year" } else { "end_year" };
        let raw = serde_json::json!({ "year": year, key: bound });
        let err = Criteria::from_json(&raw).unwrap_err();
        prop_assert!(matches!(err, ValidationError::AmbiguousYear { .. }), "expected AmbiguousYear");
    }

    /// Placeholders number exactly the binds, in order.
    #[test]
    fn prop_placeholders_match_binds(
        values in prop::collection::vec(".{1,10}", 1..5),
    ) {
        let mut criteria = Criteria::new();
        for v in &values {
            criteria.push(Criterion::Title(TextMatch::partial(v.clone())));
        }
        let p = build_predicate(&criteria, false).unwrap();
        prop_assert_eq!(p.binds.len(), values.len());
        for i in 1..=values.len() {
            prop_assert!(p.where_sql.contains(&format!("?{i}")), "missing placeholder ?{}", i);
        }
    }
}
