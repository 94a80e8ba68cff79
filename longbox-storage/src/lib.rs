//! # longbox-storage
//!
//! The SQLite Data Store collaborator: owns the connection, runs the
//! schema migration, executes predicates, and offers the seed API the
//! catalog is built with. The engine reaches it only through
//! [`longbox_core::ICatalogStore`].

pub mod migrations;
pub mod queries;
pub mod seed;
mod store;

pub use store::CatalogStore;

use longbox_core::errors::{EngineError, StoreError};

/// Map a low-level SQLite failure into the engine taxonomy.
pub(crate) fn to_store_err(message: impl Into<String>) -> EngineError {
    EngineError::Store(StoreError::Sqlite {
        message: message.into(),
    })
}
