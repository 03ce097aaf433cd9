use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletenessError {
    /// A blocking calculation task panicked or was cancelled.
    #[error("completeness task for product {identifier} failed: {source}")]
    Task {
        identifier: String,
        #[source]
        source: tokio::task::JoinError,
    },
}
