//! Read queries over the catalog schema.

pub mod collaboration;
pub mod comic_rows;
pub mod name_pools;
pub mod stats;

use rusqlite::types::ToSqlOutput;
use rusqlite::ToSql;

use longbox_core::models::BindValue;

/// Adapter so predicate bind values can feed `params_from_iter`.
pub(crate) struct Bind<'a>(pub &'a BindValue);

impl ToSql for Bind<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self.0 {
            BindValue::Text(s) => s.to_sql(),
            BindValue::Int(i) => i.to_sql(),
        }
    }
}

/// `?1, ?2, …` placeholder list for an IN clause of `len` values.
pub(crate) fn placeholders(len: usize) -> String {
    (1..=len)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}
