/// Malformed or contradictory search criteria. Always names the offending
/// field; never folded silently into an empty result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown search field: {field}")]
    UnknownField { field: String },

    #[error("ambiguous year criteria: `year` cannot be combined with `{field}`")]
    AmbiguousYear { field: String },

    #[error("invalid year range: start {start} is after end {end}")]
    InvalidYearRange { start: i32, end: i32 },

    #[error("year search requires `year` or at least one of `start_year`/`end_year`")]
    MissingYearBounds,

    #[error("invalid value for field `{field}`: expected {expected}")]
    InvalidValue { field: String, expected: &'static str },

    #[error("criteria must be a JSON object")]
    CriteriaNotAnObject,

    #[error("no criteria supplied")]
    EmptyCriteria,
}
