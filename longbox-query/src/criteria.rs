//! The closed criterion union and its dynamic JSON boundary.

use serde_json::Value;

use longbox_core::errors::ValidationError;

/// How a text field matches: case-insensitive containment by default,
/// case-insensitive full equality when `exact` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch {
    pub value: String,
    pub exact: bool,
}

impl TextMatch {
    pub fn partial(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            exact: false,
        }
    }

    pub fn exact(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            exact: true,
        }
    }
}

/// One validated search criterion. The set of kinds is closed: the JSON
/// boundary rejects anything else instead of passing it through.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    Title(TextMatch),
    Series(TextMatch),
    Publisher(TextMatch),
    Character {
        name: TextMatch,
        /// Count team-roster appearance rows as matches.
        include_teams: bool,
    },
    Team(TextMatch),
    Creator {
        name: TextMatch,
        /// Case-insensitive role filter on the credit row.
        role: Option<String>,
    },
    Event(TextMatch),
    Year(i32),
    YearRange {
        start: Option<i32>,
        end: Option<i32>,
    },
}

/// An ordered, validated set of criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria(Vec<Criterion>);

impl Criteria {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with(mut self, criterion: Criterion) -> Self {
        self.0.push(criterion);
        self
    }

    pub fn push(&mut self, criterion: Criterion) {
        self.0.push(criterion);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Criterion> {
        self.0.iter()
    }

    /// Validate a caller-supplied criteria mapping.
    ///
    /// Accepted keys: `title`, `series`, `publisher`, `creator`, `character`,
    /// `team`, `event`, `year`, `start_year`, `end_year`. Text fields take a
    /// string or `{ "value": .., "exact": bool }` (creator additionally
    /// `"role"`, character additionally `"include_teams"`). Unknown keys and
    /// ill-typed values are [`ValidationError`]s, never silent no-ops.
    pub fn from_json(raw: &Value) -> Result<Self, ValidationError> {
        let Some(map) = raw.as_object() else {
            return Err(ValidationError::CriteriaNotAnObject);
        };
        if map.is_empty() {
            return Err(ValidationError::EmptyCriteria);
        }

        let mut year: Option<i32> = None;
        let mut start_year: Option<i32> = None;
        let mut end_year: Option<i32> = None;
        let mut out = Vec::new();

        // serde_json maps iterate in key order, so criterion order (and with
        // it placeholder numbering) is deterministic for a given input.
        for (key, value) in map {
            match key.as_str() {
                "title" => out.push(Criterion::Title(text_match(key, value)?)),
                "series" => out.push(Criterion::Series(text_match(key, value)?)),
                "publisher" => out.push(Criterion::Publisher(text_match(key, value)?)),
                "team" => out.push(Criterion::Team(text_match(key, value)?)),
                "event" => out.push(Criterion::Event(text_match(key, value)?)),
                "creator" => {
                    let name = text_match(key, value)?;
                    let role = match value.get("role") {
                        None => None,
                        Some(Value::String(r)) => Some(r.clone()),
                        Some(_) => {
                            return Err(ValidationError::InvalidValue {
                                field: "creator.role".to_string(),
                                expected: "a string",
                            })
                        }
                    };
                    out.push(Criterion::Creator { name, role });
                }
                "character" => {
                    let name = text_match(key, value)?;
                    let include_teams = match value.get("include_teams") {
                        None => true,
                        Some(Value::Bool(b)) => *b,
                        Some(_) => {
                            return Err(ValidationError::InvalidValue {
                                field: "character.include_teams".to_string(),
                                expected: "a boolean",
                            })
                        }
                    };
                    out.push(Criterion::Character {
                        name,
                        include_teams,
                    });
                }
                "year" => year = Some(int_value(key, value)?),
                "start_year" => start_year = Some(int_value(key, value)?),
                "end_year" => end_year = Some(int_value(key, value)?),
                _ => {
                    return Err(ValidationError::UnknownField {
                        field: key.clone(),
                    })
                }
            }
        }

        if let Some(y) = year {
            if start_year.is_some() {
                return Err(ValidationError::AmbiguousYear {
                    field: "start_year".to_string(),
                });
            }
            if end_year.is_some() {
                return Err(ValidationError::AmbiguousYear {
                    field: "end_year".to_string(),
                });
            }
            out.push(Criterion::Year(y));
        } else if start_year.is_some() || end_year.is_some() {
            if let (Some(s), Some(e)) = (start_year, end_year) {
                if s > e {
                    return Err(ValidationError::InvalidYearRange { start: s, end: e });
                }
            }
            out.push(Criterion::YearRange {
                start: start_year,
                end: end_year,
            });
        }

        Ok(Self(out))
    }
}

impl<'a> IntoIterator for &'a Criteria {
    type Item = &'a Criterion;
    type IntoIter = std::slice::Iter<'a, Criterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parse a text field: bare string, or an object with `value` and an
/// optional `exact` flag.
fn text_match(field: &str, value: &Value) -> Result<TextMatch, ValidationError> {
    match value {
        Value::String(s) => Ok(TextMatch::partial(s.clone())),
        Value::Object(obj) => {
            let text = match obj.get("value") {
                Some(Value::String(s)) => s.clone(),
                _ => {
                    return Err(ValidationError::InvalidValue {
                        field: format!("{field}.value"),
                        expected: "a string",
                    })
                }
            };
            let exact = match obj.get("exact") {
                None => false,
                Some(Value::Bool(b)) => *b,
                Some(_) => {
                    return Err(ValidationError::InvalidValue {
                        field: format!("{field}.exact"),
                        expected: "a boolean",
                    })
                }
            };
            Ok(TextMatch { value: text, exact })
        }
        _ => Err(ValidationError::InvalidValue {
            field: field.to_string(),
            expected: "a string or { value, exact }",
        }),
    }
}

fn int_value(field: &str, value: &Value) -> Result<i32, ValidationError> {
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| ValidationError::InvalidValue {
            field: field.to_string(),
            expected: "an integer year",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_unknown_field() {
        let err = Criteria::from_json(&json!({"villain": "Doctor Doom"})).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownField {
                field: "villain".to_string()
            }
        );
    }

    #[test]
    fn rejects_year_with_range() {
        let err = Criteria::from_json(&json!({"year": 2004, "start_year": 2000})).unwrap_err();
        assert!(matches!(err, ValidationError::AmbiguousYear { .. }));
    }

    #[test]
    fn rejects_inverted_range() {
        let err = Criteria::from_json(&json!({"start_year": 2010, "end_year": 2000})).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidYearRange {
                start: 2010,
                end: 2000
            }
        );
    }

    #[test]
    fn rejects_non_object() {
        let err = Criteria::from_json(&json!("Spider-Man")).unwrap_err();
        assert_eq!(err, ValidationError::CriteriaNotAnObject);
    }

    #[test]
    fn rejects_empty_object() {
        let err = Criteria::from_json(&json!({})).unwrap_err();
        assert_eq!(err, ValidationError::EmptyCriteria);
    }

    #[test]
    fn parses_scalar_and_object_forms() {
        let criteria = Criteria::from_json(&json!({
            "title": "Spider-Man",
            "creator": {"value": "Stan Lee", "exact": true, "role": "writer"},
            "character": {"value": "Wolverine", "include_teams": false},
            "start_year": 1960,
            "end_year": 1970,
        }))
        .unwrap();

        let kinds: Vec<&Criterion> = criteria.iter().collect();
        assert_eq!(kinds.len(), 4);
        assert!(criteria.iter().any(|c| matches!(
            c,
            Criterion::Creator { name, role: Some(r) } if name.exact && r == "writer"
        )));
        assert!(criteria.iter().any(|c| matches!(
            c,
            Criterion::Character { include_teams: false, .. }
        )));
        assert!(criteria.iter().any(|c| matches!(
            c,
            Criterion::YearRange {
                start: Some(1960),
                end: Some(1970)
            }
        )));
    }

    #[test]
    fn rejects_ill_typed_year() {
        let err = Criteria::from_json(&json!({"year": "nineteen sixty-three"})).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
    }
}
