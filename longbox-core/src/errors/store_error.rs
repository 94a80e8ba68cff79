/// Data Store collaborator errors. The engine never retries these
/// internally; retry and backoff policy belong to the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },
}
