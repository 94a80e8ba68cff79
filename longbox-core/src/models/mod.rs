//! Catalog row types shared between the engine and the store.

mod comic;
mod confidence;
mod predicate;
mod stats;

pub use comic::{CollabRow, ComicSummary, CreatorCredit, NameKind, NamedRow};
pub use confidence::Confidence;
pub use predicate::{BindValue, JoinTable, SqlPredicate};
pub use stats::CatalogStats;
