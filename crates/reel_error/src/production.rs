//! Media production error types.

/// Failures of the image and video generation backends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProductionErrorKind {
    /// Provider credentials are not configured
    #[display("Missing credentials: {}", _0)]
    MissingCredentials(String),
    /// Provider returned a non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Error body returned by the provider
        message: String,
    },
    /// Provider returned a body that is not the expected media
    #[display("Unexpected content type: {}", _0)]
    UnexpectedContentType(String),
    /// Prediction finished without an output reference
    #[display("Prediction produced no output: {}", _0)]
    MissingOutput(String),
    /// Generated media could not be downloaded
    #[display("Download failed: {}", _0)]
    Download(String),
    /// Generated media could not be written to disk
    #[display("Failed to write media: {}", _0)]
    FileWrite(String),
}

/// Production error with location tracking.
///
/// # Examples
///
/// ```
/// use reel_error::{ProductionError, ProductionErrorKind};
///
/// let err = ProductionError::new(ProductionErrorKind::MissingCredentials("HF_TOKEN".into()));
/// assert!(format!("{}", err).contains("HF_TOKEN"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Production Error: {} at line {} in {}", kind, line, file)]
pub struct ProductionError {
    /// The specific error condition
    pub kind: ProductionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ProductionError {
    /// Create a new `ProductionError` with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProductionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
