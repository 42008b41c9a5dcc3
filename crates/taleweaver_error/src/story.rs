//! Story state machine errors the caller can act on.

/// Conditions rejected by the story state machine.
///
/// These are expected outcomes of bad requests, not failures of the engine,
/// and are never logged as errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoryErrorKind {
    /// A session or segment referenced by id/index does not exist
    #[display("Not found: {}", _0)]
    NotFound(String),
    /// The operation is not allowed in the session's current state
    #[display("Invalid state: {}", _0)]
    InvalidState(String),
    /// The caller supplied malformed input
    #[display("Invalid input: {}", _0)]
    InvalidInput(String),
}

/// Error type for story state machine operations.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::InvalidInput("choiceId is blank".to_string()));
/// assert!(format!("{}", err).contains("choiceId is blank"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The specific error condition
    pub kind: StoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a [`StoryErrorKind::NotFound`] error.
    #[track_caller]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(StoryErrorKind::NotFound(what.into()))
    }

    /// Shorthand for a [`StoryErrorKind::InvalidState`] error.
    #[track_caller]
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::new(StoryErrorKind::InvalidState(reason.into()))
    }

    /// Shorthand for a [`StoryErrorKind::InvalidInput`] error.
    #[track_caller]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::new(StoryErrorKind::InvalidInput(reason.into()))
    }
}
