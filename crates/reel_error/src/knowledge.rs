//! Knowledge store error types.

/// Specific failures of an indexed knowledge store.
///
/// The retriever recovers from query-side failures by falling back to its
/// seed data. Ingestion failures reach the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum KnowledgeErrorKind {
    /// Store endpoint could not be reached
    #[display("Knowledge store unavailable: {}", _0)]
    Unavailable(String),
    /// Named collection does not exist
    #[display("Collection not found: {}", _0)]
    CollectionNotFound(String),
    /// Store rejected the query
    #[display("Query failed with status {}: {}", status, message)]
    QueryFailed {
        /// HTTP status returned by the store
        status: u16,
        /// Body or reason returned by the store
        message: String,
    },
    /// Store rejected a document upsert
    #[display("Upsert failed with status {}: {}", status, message)]
    UpsertFailed {
        /// HTTP status returned by the store
        status: u16,
        /// Body or reason returned by the store
        message: String,
    },
    /// Source documents could not be read for ingestion
    #[display("Cannot ingest {}: {}", path, reason)]
    Ingest {
        /// File or directory being ingested
        path: String,
        /// Underlying failure
        reason: String,
    },
    /// Store answered with a payload we could not interpret
    #[display("Unexpected store response: {}", _0)]
    InvalidResponse(String),
}

/// Knowledge store error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Knowledge Error: {} at line {} in {}", kind, line, file)]
pub struct KnowledgeError {
    /// The specific error condition
    pub kind: KnowledgeErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl KnowledgeError {
    /// Create a new `KnowledgeError` with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use reel_error::{KnowledgeError, KnowledgeErrorKind};
    ///
    /// let err = KnowledgeError::new(KnowledgeErrorKind::CollectionNotFound("reel_knowledge".into()));
    /// assert!(format!("{}", err).contains("reel_knowledge"));
    /// ```
    #[track_caller]
    pub fn new(kind: KnowledgeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
