//! Recording speech renderer for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use taleweaver_core::SpeechRequest;
use taleweaver_error::TaleweaverResult;
use taleweaver_interface::SpeechRenderer;

/// Renderer that records requests and returns the text bytes as audio.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    calls: Arc<Mutex<Vec<SpeechRequest>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<SpeechRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechRenderer for RecordingRenderer {
    async fn render(&self, request: &SpeechRequest) -> TaleweaverResult<Vec<u8>> {
        self.calls.lock().unwrap().push(request.clone());
        Ok(request.text.as_bytes().to_vec())
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}
