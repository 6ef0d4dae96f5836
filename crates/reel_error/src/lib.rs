//! Error types for the Reel workspace.
//!
//! Every crate in the workspace reports failures through the types defined here.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind together with the source location
//! - Constructors use `#[track_caller]` so the location is captured automatically
//!
//! Message-only errors (`HttpError`, `JsonError`, `ConfigError`, `BackendError`)
//! skip the kind enum and carry a string.
//!
//! # Examples
//!
//! ```
//! use reel_error::{ReelResult, HttpError};
//!
//! fn fetch_data() -> ReelResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! assert!(fetch_data().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod knowledge;
mod message;
mod models;
mod production;
mod storage;

pub use error::{ReelError, ReelErrorKind, ReelResult};
pub use knowledge::{KnowledgeError, KnowledgeErrorKind};
pub use message::{BackendError, ConfigError, HttpError, JsonError};
pub use models::{ModelsError, ModelsErrorKind, ModelsResult};
pub use production::{ProductionError, ProductionErrorKind};
pub use storage::{StorageError, StorageErrorKind};
