/// Errors from artifact store operations.
///
/// "Not found" is deliberately absent: missing artifacts are reported as
/// `Ok(None)` / `Ok(false)`, never as an error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
