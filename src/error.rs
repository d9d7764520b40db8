use thiserror::Error;

/// Boxed cause for a failed page request. The listing client and test
/// doubles both produce this, so the loader stays transport-agnostic.
pub(crate) type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// Error surface of a listing drain.
#[derive(Debug, Error)]
pub(crate) enum LoadError {
    #[error("page size must be greater than zero (got {0})")]
    InvalidPageSize(usize),

    /// A page request failed. The whole load is abandoned; nothing partial
    /// is ever published.
    #[error("page request failed: {0}")]
    Fetch(#[source] FetchError),

    /// The owning view was torn down while the load was in flight.
    #[error("load cancelled")]
    Cancelled,
}
