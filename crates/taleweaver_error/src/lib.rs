//! Error types for the Taleweaver story engine.
//!
//! This crate provides the error taxonomy shared by every Taleweaver crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Errors fall into two classes. [`StoryError`] covers conditions the caller
//! can recover from (unknown session, wrong state, bad input). Everything else
//! is a server-side failure and is surfaced through an opaque [`ErrorReport`].
//!
//! # Examples
//!
//! ```
//! use taleweaver_error::{StoryError, StoryErrorKind, TaleweaverResult};
//!
//! fn find_session() -> TaleweaverResult<String> {
//!     Err(StoryError::new(StoryErrorKind::NotFound("session 42".to_string())))?
//! }
//!
//! let err = find_session().unwrap_err();
//! assert!(err.is_client_error());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod json;
mod report;
mod storage;
mod story;
mod validation;

pub use config::ConfigError;
pub use error::{TaleweaverError, TaleweaverErrorKind, TaleweaverResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use json::JsonError;
pub use report::{ErrorClass, ErrorReport, MAX_REPORT_MESSAGE_CHARS, sanitize_message};
pub use storage::{StorageError, StorageErrorKind};
pub use story::{StoryError, StoryErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
