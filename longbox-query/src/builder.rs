//! Predicate assembly: criteria → WHERE text + binds + join plan.

use longbox_core::errors::ValidationError;
use longbox_core::models::{BindValue, JoinTable, SqlPredicate};

use crate::criteria::{Criteria, Criterion, TextMatch};

/// Build a parameterized predicate from validated criteria.
///
/// `match_all` conjoins the per-field conditions; otherwise they are
/// disjoined, with each field's own internal options (exact vs. partial,
/// role filter, team inclusion) still honored inside its condition.
pub fn build_predicate(
    criteria: &Criteria,
    match_all: bool,
) -> Result<SqlPredicate, ValidationError> {
    let mut b = PredicateBuilder::default();

    let mut saw_year = false;
    let mut saw_range = false;

    for criterion in criteria {
        match criterion {
            Criterion::Title(text) => {
                let cond = b.text_condition("c.title", text);
                b.conditions.push(cond);
            }
            Criterion::Series(text) => {
                b.join(JoinTable::Series);
                let cond = b.text_condition("s.name", text);
                b.conditions.push(cond);
            }
            Criterion::Publisher(text) => {
                b.join(JoinTable::Publisher);
                let cond = b.text_condition("p.name", text);
                b.conditions.push(cond);
            }
            Criterion::Character {
                name,
                include_teams,
            } => {
                b.join(JoinTable::Characters);
                let mut cond = b.text_condition("ch.name", name);
                if !include_teams {
                    cond = format!("({cond} AND cch.via_team = 0)");
                }
                b.conditions.push(cond);
            }
            Criterion::Team(text) => {
                b.join(JoinTable::Teams);
                let cond = b.text_condition("t.name", text);
                b.conditions.push(cond);
            }
            Criterion::Creator { name, role } => {
                b.join(JoinTable::Creators);
                let mut cond = b.text_condition("cr.name", name);
                if let Some(role) = role {
                    let role_ph = b.bind(BindValue::Text(role.clone()));
                    cond = format!("({cond} AND UPPER(cc.role) = UPPER({role_ph}))");
                }
                b.conditions.push(cond);
            }
            Criterion::Event(text) => {
                b.join(JoinTable::Events);
                let cond = b.text_condition("ev.name", text);
                b.conditions.push(cond);
            }
            Criterion::Year(year) => {
                if saw_range {
                    return Err(ValidationError::AmbiguousYear {
                        field: "start_year".to_string(),
                    });
                }
                saw_year = true;
                let ph = b.bind(BindValue::Int(i64::from(*year)));
                b.conditions.push(format!("c.year = {ph}"));
            }
            Criterion::YearRange { start, end } => {
                if saw_year {
                    return Err(ValidationError::AmbiguousYear {
                        field: "start_year".to_string(),
                    });
                }
                saw_range = true;
                let cond = year_range_condition(&mut b, *start, *end)?;
                b.conditions.push(cond);
            }
        }
    }

    let connector = if match_all { " AND " } else { " OR " };
    let where_sql = if b.conditions.is_empty() {
        "1=1".to_string()
    } else {
        b.conditions.join(connector)
    };

    Ok(SqlPredicate {
        where_sql,
        binds: b.binds,
        joins: b.joins,
    })
}

fn year_range_condition(
    b: &mut PredicateBuilder,
    start: Option<i32>,
    end: Option<i32>,
) -> Result<String, ValidationError> {
    match (start, end) {
        (None, None) => Err(ValidationError::MissingYearBounds),
        (Some(s), Some(e)) => {
            if s > e {
                return Err(ValidationError::InvalidYearRange { start: s, end: e });
            }
            let sp = b.bind(BindValue::Int(i64::from(s)));
            let ep = b.bind(BindValue::Int(i64::from(e)));
            Ok(format!("(c.year >= {sp} AND c.year <= {ep})"))
        }
        (Some(s), None) => {
            let sp = b.bind(BindValue::Int(i64::from(s)));
            Ok(format!("c.year >= {sp}"))
        }
        (None, Some(e)) => {
            let ep = b.bind(BindValue::Int(i64::from(e)));
            Ok(format!("c.year <= {ep}"))
        }
    }
}

#[derive(Default)]
struct PredicateBuilder {
    conditions: Vec<String>,
    binds: Vec<BindValue>,
    joins: Vec<JoinTable>,
}

impl PredicateBuilder {
    /// Register a bind value and return its numbered placeholder.
    fn bind(&mut self, value: BindValue) -> String {
        self.binds.push(value);
        format!("?{}", self.binds.len())
    }

    /// Record a join once, preserving first-use order.
    fn join(&mut self, table: JoinTable) {
        if !self.joins.contains(&table) {
            self.joins.push(table);
        }
    }

    /// Case-insensitive equality or escaped containment on a text column.
    fn text_condition(&mut self, column: &str, text: &TextMatch) -> String {
        if text.exact {
            let ph = self.bind(BindValue::Text(text.value.clone()));
            format!("UPPER({column}) = UPPER({ph})")
        } else {
            let ph = self.bind(BindValue::Text(format!("%{}%", escape_like(&text.value))));
            format!("UPPER({column}) LIKE UPPER({ph}) ESCAPE '\\'")
        }
    }
}

/// Escape LIKE metacharacters so user-supplied `%`/`_` match literally.
/// The backslash itself is escaped first; the predicate carries an
/// `ESCAPE '\'` clause.
fn escape_like(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(escape_like("100%_done\\"), "100\\%\\_done\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn partial_title_uses_like_with_escape() {
        let criteria = Criteria::new().with(Criterion::Title(TextMatch::partial("50% Off")));
        let p = build_predicate(&criteria, true).unwrap();
        assert_eq!(p.where_sql, "UPPER(c.title) LIKE UPPER(?1) ESCAPE '\\'");
        assert_eq!(p.binds, vec![BindValue::Text("%50\\% Off%".to_string())]);
        assert!(p.joins.is_empty());
    }

    #[test]
    fn exact_title_uses_equality() {
        let criteria = Criteria::new().with(Criterion::Title(TextMatch::exact("X-Men")));
        let p = build_predicate(&criteria, true).unwrap();
        assert_eq!(p.where_sql, "UPPER(c.title) = UPPER(?1)");
    }

    #[test]
    fn creator_role_is_part_of_the_field_condition() {
        let criteria = Criteria::new().with(Criterion::Creator {
            name: TextMatch::partial("Kirby"),
            role: Some("artist".to_string()),
        });
        let p = build_predicate(&criteria, true).unwrap();
        assert_eq!(
            p.where_sql,
            "(UPPER(cr.name) LIKE UPPER(?1) ESCAPE '\\' AND UPPER(cc.role) = UPPER(?2))"
        );
        assert_eq!(p.joins, vec![JoinTable::Creators]);
    }

    #[test]
    fn character_without_teams_filters_roster_rows() {
        let criteria = Criteria::new().with(Criterion::Character {
            name: TextMatch::partial("Wolverine"),
            include_teams: false,
        });
        let p = build_predicate(&criteria, true).unwrap();
        assert!(p.where_sql.contains("cch.via_team = 0"));
    }

    #[test]
    fn match_all_false_disjoins() {
        let criteria = Criteria::new()
            .with(Criterion::Title(TextMatch::partial("Secret")))
            .with(Criterion::Team(TextMatch::partial("Avengers")));
        let p = build_predicate(&criteria, false).unwrap();
        assert!(p.where_sql.contains(" OR "));
        assert_eq!(p.joins, vec![JoinTable::Teams]);
    }

    #[test]
    fn joins_deduplicate() {
        let criteria = Criteria::new()
            .with(Criterion::Creator {
                name: TextMatch::partial("Lee"),
                role: None,
            })
            .with(Criterion::Creator {
                name: TextMatch::partial("Kirby"),
                role: None,
            });
        let p = build_predicate(&criteria, true).unwrap();
        assert_eq!(p.joins, vec![JoinTable::Creators]);
    }

    #[test]
    fn year_and_range_conflict_even_programmatically() {
        let criteria = Criteria::new()
            .with(Criterion::Year(2004))
            .with(Criterion::YearRange {
                start: Some(2000),
                end: None,
            });
        let err = build_predicate(&criteria, true).unwrap_err();
        assert!(matches!(err, ValidationError::AmbiguousYear { .. }));
    }

    #[test]
    fn inclusive_range_binds_both_bounds() {
        let criteria = Criteria::new().with(Criterion::YearRange {
            start: Some(2000),
            end: Some(2009),
        });
        let p = build_predicate(&criteria, true).unwrap();
        assert_eq!(p.where_sql, "(c.year >= ?1 AND c.year <= ?2)");
        assert_eq!(p.binds, vec![BindValue::Int(2000), BindValue::Int(2009)]);
    }

    #[test]
    fn empty_range_is_rejected() {
        let criteria = Criteria::new().with(Criterion::YearRange {
            start: None,
            end: None,
        });
        let err = build_predicate(&criteria, true).unwrap_err();
        assert_eq!(err, ValidationError::MissingYearBounds);
    }

    #[test]
    fn no_criteria_matches_everything() {
        let p = build_predicate(&Criteria::new(), true).unwrap();
        assert_eq!(p.where_sql, "1=1");
        assert!(p.binds.is_empty());
    }
}
