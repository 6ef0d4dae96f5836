//! Top-level error wrapper types.

use crate::{
    BackendError, ConfigError, HttpError, JsonError, KnowledgeError, ModelsError,
    ProductionError, StorageError,
};

/// Every error condition the workspace can surface.
///
/// # Examples
///
/// ```
/// use reel_error::{ReelError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: ReelError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ReelErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Generic backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Artifact storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Knowledge store error
    #[from(KnowledgeError)]
    Knowledge(KnowledgeError),
    /// Text generation provider error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Media production error
    #[from(ProductionError)]
    Production(ProductionError),
}

/// Reel error with kind discrimination.
///
/// # Examples
///
/// ```
/// use reel_error::{ReelErrorKind, ReelResult, ConfigError};
///
/// fn might_fail() -> ReelResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), ReelErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Reel Error: {}", _0)]
pub struct ReelError(Box<ReelErrorKind>);

impl ReelError {
    /// Create a new error from a kind.
    pub fn new(kind: ReelErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ReelErrorKind {
        &self.0
    }
}

impl<T> From<T> for ReelError
where
    T: Into<ReelErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Reel operations.
pub type ReelResult<T> = std::result::Result<T, ReelError>;
