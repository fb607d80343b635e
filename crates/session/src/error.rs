use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    /// The underlying key/value store failed.
    #[error("session storage failed: {0}")]
    Store(#[from] opsdesk_store::StoreError),
}
