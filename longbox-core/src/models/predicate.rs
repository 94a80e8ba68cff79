//! The parameterized relational predicate handed to the store.
//!
//! Literal values are always carried as [`BindValue`]s, never interpolated
//! into the predicate text, so user input cannot reach the SQL surface.

/// A relational filter: WHERE text with numbered placeholders, the bound
/// literal values, and the join plan needed to reach appearance tables.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlPredicate {
    /// WHERE clause body using `?1`-style placeholders, without the
    /// `WHERE` keyword itself. `"1=1"` when no criteria constrain rows.
    pub where_sql: String,
    /// Bound literal values, in placeholder order.
    pub binds: Vec<BindValue>,
    /// Joins required to evaluate `where_sql`, deduplicated.
    pub joins: Vec<JoinTable>,
}

impl SqlPredicate {
    /// A predicate matching every comic.
    pub fn match_all() -> Self {
        Self {
            where_sql: "1=1".to_string(),
            binds: Vec::new(),
            joins: Vec::new(),
        }
    }
}

/// A literal value bound into a predicate placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Int(i64),
}

/// Appearance/reference tables a predicate may need joined onto `comics c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinTable {
    Series,
    Publisher,
    Creators,
    Characters,
    Teams,
    Events,
}

impl JoinTable {
    /// The JOIN fragment for this table, using the engine's fixed aliases.
    /// Appearance tables join LEFT: a disjoined predicate must not drop a
    /// comic just because one of its OR branches has no appearance row.
    pub fn sql(self) -> &'static str {
        match self {
            JoinTable::Series => "LEFT JOIN series s ON c.series_id = s.id",
            JoinTable::Publisher => "LEFT JOIN publishers p ON c.publisher_id = p.id",
            JoinTable::Creators => {
                "LEFT JOIN comic_creators cc ON c.id = cc.comic_id \
                 LEFT JOIN creators cr ON cc.creator_id = cr.id"
            }
            JoinTable::Characters => {
                "LEFT JOIN comic_characters cch ON c.id = cch.comic_id \
                 LEFT JOIN characters ch ON cch.character_id = ch.id"
            }
            JoinTable::Teams => {
                "LEFT JOIN comic_teams ct ON c.id = ct.comic_id \
                 LEFT JOIN teams t ON ct.team_id = t.id"
            }
            JoinTable::Events => {
                "LEFT JOIN comic_events ce ON c.id = ce.comic_id \
                 LEFT JOIN events ev ON ce.event_id = ev.id"
            }
        }
    }
}
