//! # longbox-core
//!
//! Foundation crate for the Longbox catalog search engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod deadline;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SearchConfig;
pub use deadline::Deadline;
pub use errors::{EngineError, EngineResult, StoreError, ValidationError};
pub use models::{
    CatalogStats, CollabRow, ComicSummary, Confidence, CreatorCredit, NameKind, NamedRow,
    SqlPredicate,
};
pub use traits::ICatalogStore;
