//! Error types

/// Errors raised by table helpers.
///
/// Missing data (an absent width, an unresolvable key path) is never an
/// error; those cases degrade to zero or "undefined".
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A row identity was requested for a row that does not exist.
    #[error("row is required when computing row identity")]
    MissingRow,

    /// A row inside a collection is absent, so no identity can be indexed.
    #[error("row {index} is missing; cannot compute its identity")]
    MissingRowAt { index: usize },

    /// Fixed layout was requested before the table layout was available.
    #[error("table layout is not available")]
    MissingLayout,

    /// Table options did not match the expected shape.
    #[error("invalid table options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TableError>;
