//! Error types for the catalog browser.
//!
//! The library surfaces one [`CatalogError`] enum; the binary and the terminal
//! loop wrap it in `anyhow` with context, the same split the UI layer uses for
//! its own failures.

use thiserror::Error;

/// Failures raised while assembling the catalog or bringing up the runtime.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The dataset was built with a page size of zero.
    #[error("page size must be at least 1")]
    InvalidPageSize,

    /// Two books share the same id, so lookups would be ambiguous.
    #[error("duplicate book id `{0}`")]
    DuplicateBook(String),

    /// A book references an author id missing from the author map.
    #[error("book `{book}` references unknown author `{author}`")]
    UnknownAuthor { book: String, author: String },

    /// A book references a genre id missing from the genre map.
    #[error("book `{book}` references unknown genre `{genre}`")]
    UnknownGenre { book: String, genre: String },

    /// A publication date is not an ISO `YYYY-MM-DD` date.
    #[error("book `{book}` has an invalid publication date `{value}`")]
    InvalidDate { book: String, value: String },

    /// The tracing subscriber could not be installed.
    #[error("logging error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
