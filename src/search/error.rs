//! Error types for search operations

/// Result type for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A candidate catalog could not be read
    #[error("Candidate catalog unavailable for type '{0}'")]
    CatalogUnavailable(String),

    /// The query could not be executed as given
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),

    /// Any other failure inside the search core
    #[error("Search execution failed: {0}")]
    Internal(String),
}
