//! Trait definitions for generation backends.

use async_trait::async_trait;
use taleweaver_core::{GenerationRequest, SpeechRequest};
use taleweaver_error::TaleweaverResult;

/// Backend that turns a prompt into raw text.
///
/// Implementations collapse every transport problem (unreachable host,
/// timeout, error status, empty body) into a
/// [`GenerationError`](taleweaver_error::GenerationError) of kind `Failure`.
/// The engine parses and validates the returned text itself.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate raw text for a request.
    async fn generate(&self, req: &GenerationRequest) -> TaleweaverResult<String>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier.
    fn model_name(&self) -> &str;
}

/// Backend that renders speech audio.
#[async_trait]
pub trait SpeechRenderer: Send + Sync {
    /// Render the request into encoded audio bytes.
    async fn render(&self, req: &SpeechRequest) -> TaleweaverResult<Vec<u8>>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;
}
