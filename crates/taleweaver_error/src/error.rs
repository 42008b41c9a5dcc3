//! Top-level error wrapper types.

use crate::{
    ConfigError, GenerationError, JsonError, StorageError, StoryError, ValidationError,
};

/// Every error family a Taleweaver operation can produce.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{TaleweaverError, JsonError};
///
/// let json_err = JsonError::new("unexpected end of input");
/// let err: TaleweaverError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TaleweaverErrorKind {
    /// Story state machine rejected the request
    #[from(StoryError)]
    Story(StoryError),
    /// Text generation collaborator failed
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Generated segment broke the structural contract
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Persistence failure
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Taleweaver error with kind discrimination.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{StoryError, TaleweaverResult};
///
/// fn might_fail() -> TaleweaverResult<()> {
///     Err(StoryError::invalid_state("story ended"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Taleweaver Error: {}", _0)]
pub struct TaleweaverError(Box<TaleweaverErrorKind>);

impl TaleweaverError {
    /// Create a new error from a kind.
    pub fn new(kind: TaleweaverErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TaleweaverErrorKind {
        &self.0
    }

    /// True for conditions caused by the caller (unknown id, wrong state,
    /// malformed input). Everything else is a server-side failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self.kind(), TaleweaverErrorKind::Story(_))
    }

    /// The story error, if this is one.
    pub fn as_story(&self) -> Option<&StoryError> {
        match self.kind() {
            TaleweaverErrorKind::Story(e) => Some(e),
            _ => None,
        }
    }

    /// The generation error, if this is one.
    pub fn as_generation(&self) -> Option<&GenerationError> {
        match self.kind() {
            TaleweaverErrorKind::Generation(e) => Some(e),
            _ => None,
        }
    }

    /// The validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self.kind() {
            TaleweaverErrorKind::Validation(e) => Some(e),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to TaleweaverErrorKind
impl<T> From<T> for TaleweaverError
where
    T: Into<TaleweaverErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Taleweaver operations.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{GenerationError, TaleweaverResult};
///
/// fn generate() -> TaleweaverResult<String> {
///     Err(GenerationError::failure("empty response body"))?
/// }
/// ```
pub type TaleweaverResult<T> = std::result::Result<T, TaleweaverError>;
