//! Error taxonomy for all engine operations.

mod store_error;
mod validation_error;

pub use store_error::StoreError;
pub use validation_error::ValidationError;

/// Top-level error returned by every engine operation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Deadline exceeded during fetch or assembly. Distinct from a store
    /// failure: the store was healthy, the caller's budget ran out.
    #[error("deadline exceeded")]
    Timeout,
}

pub type EngineResult<T> = Result<T, EngineError>;
