//! View layer errors.

/// Errors from the list view layer. Fetch failures are not errors here;
/// they surface as notices on the controller.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// Persisting or reading view preferences failed.
    #[error("Preference storage failed: {0}")]
    Store(#[from] opsdesk_store::StoreError),
}
