//! Errors raised while obtaining content from the text generation collaborator.

/// Specific generation failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The collaborator was unreachable, timed out, returned an error status,
    /// or produced empty/unparsable output
    #[display("Generation failed: {}", _0)]
    Failure(String),
    /// The collaborator ignored a forced-termination directive on every attempt
    #[display("Generation contract violated: {}", _0)]
    ContractViolation(String),
}

/// Generation error with location tracking.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::Failure("HTTP 503".to_string()));
/// assert!(err.is_retryable());
///
/// let err = GenerationError::new(GenerationErrorKind::ContractViolation("not ended".to_string()));
/// assert!(!err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific error condition
    pub kind: GenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a [`GenerationErrorKind::Failure`] error.
    #[track_caller]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::Failure(message.into()))
    }

    /// Whether another attempt may succeed.
    ///
    /// Only collaborator-level failures are retryable; a contract violation
    /// is only raised once the attempt budget is spent.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, GenerationErrorKind::Failure(_))
    }
}
