//! Opaque error reports handed to callers.
//!
//! Server-side failures must never leak internal details verbatim. A report
//! carries a short correlation id that matches the log line written when the
//! report was captured, so operators can find the full context.

use crate::TaleweaverError;

/// Maximum length of the message carried by a report.
pub const MAX_REPORT_MESSAGE_CHARS: usize = 400;

/// Who is responsible for an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ErrorClass {
    /// The caller sent something the engine cannot act on
    #[display("client")]
    Client,
    /// The engine or one of its collaborators failed
    #[display("server")]
    Server,
}

/// Caller-facing summary of a failed operation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("[{}] {} error: {}", error_id, class, message)]
pub struct ErrorReport {
    /// Correlation id, also written to the log for server errors
    pub error_id: String,
    /// Client or server
    pub class: ErrorClass,
    /// Sanitized, length-bounded message
    pub message: String,
}

impl ErrorReport {
    /// Build a report for `err` and log it.
    ///
    /// Client errors are logged at debug level only. Server errors are logged
    /// at error level together with the correlation id.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_error::{ErrorClass, ErrorReport, StoryError, TaleweaverError};
    ///
    /// let err: TaleweaverError = StoryError::not_found("session").into();
    /// let report = ErrorReport::capture(&err);
    /// assert_eq!(report.class, ErrorClass::Client);
    /// assert_eq!(report.error_id.len(), 10);
    /// ```
    pub fn capture(err: &TaleweaverError) -> Self {
        let error_id = new_error_id();
        let message = sanitize_message(&err.to_string(), MAX_REPORT_MESSAGE_CHARS);

        let class = if err.is_client_error() {
            tracing::debug!(error_id = %error_id, error = %err, "Rejected story request");
            ErrorClass::Client
        } else {
            tracing::error!(error_id = %error_id, error = ?err, "Story operation failed");
            ErrorClass::Server
        };

        Self {
            error_id,
            class,
            message,
        }
    }
}

fn new_error_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..10].to_string()
}

/// Strip control characters (newlines become spaces) and cut to `max_chars`,
/// appending an ellipsis when something was cut.
pub fn sanitize_message(message: &str, max_chars: usize) -> String {
    let cleaned: String = message
        .chars()
        .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.chars().count() <= max_chars {
        return cleaned.to_string();
    }
    let mut cut: String = cleaned.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GenerationError, StoryError};

    #[test]
    fn client_errors_are_classified_as_client() {
        let err: TaleweaverError = StoryError::invalid_input("choiceId is blank").into();
        let report = ErrorReport::capture(&err);
        assert_eq!(report.class, ErrorClass::Client);
        assert!(report.message.contains("choiceId is blank"));
    }

    #[test]
    fn generation_failures_are_server_errors() {
        let err: TaleweaverError = GenerationError::failure("HTTP 500").into();
        let report = ErrorReport::capture(&err);
        assert_eq!(report.class, ErrorClass::Server);
        assert_eq!(report.error_id.len(), 10);
    }

    #[test]
    fn correlation_ids_differ() {
        let err: TaleweaverError = GenerationError::failure("boom").into();
        let a = ErrorReport::capture(&err);
        let b = ErrorReport::capture(&err);
        assert_ne!(a.error_id, b.error_id);
    }

    #[test]
    fn sanitize_strips_control_characters() {
        assert_eq!(sanitize_message("line one\nline\u{7}two", 100), "line one linetwo");
    }

    #[test]
    fn sanitize_truncates_long_messages() {
        let long = "x".repeat(500);
        let cleaned = sanitize_message(&long, MAX_REPORT_MESSAGE_CHARS);
        assert_eq!(cleaned.chars().count(), MAX_REPORT_MESSAGE_CHARS + 1);
        assert!(cleaned.ends_with('…'));
    }
}
