//! Scripted text generator for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use taleweaver_core::{GenerationPurpose, GenerationRequest};
use taleweaver_error::{GenerationError, GenerationErrorKind, TaleweaverResult};
use taleweaver_interface::TextGenerator;

/// A single scripted segment response (success or error).
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(GenerationErrorKind),
}

/// Mock generator that replays a script of segment responses.
///
/// Title requests never consume the script: they are answered with the
/// configured title reply, or fail when none is set.
#[derive(Clone)]
pub struct MockGenerator {
    script: Arc<Mutex<VecDeque<MockResponse>>>,
    title_reply: Option<String>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockGenerator {
    /// Create a generator that replies to title requests with `title`.
    pub fn new(title: &str) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            title_reply: Some(format!(r#"{{"title": "{}"}}"#, title)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a generator whose title requests fail.
    pub fn without_title() -> Self {
        Self {
            title_reply: None,
            ..Self::new("")
        }
    }

    /// Queue a successful segment response.
    pub fn then_segment(self, raw: impl Into<String>) -> Self {
        self.push(MockResponse::Success(raw.into()));
        self
    }

    /// Queue a failing segment response.
    pub fn then_error(self, kind: GenerationErrorKind) -> Self {
        self.push(MockResponse::Error(kind));
        self
    }

    /// Queue a response on a generator already owned by an engine.
    pub fn push(&self, response: MockResponse) {
        self.script.lock().unwrap().push_back(response);
    }

    /// Every request received so far, titles included.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Segment requests received so far.
    pub fn segment_requests(&self) -> Vec<GenerationRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.purpose == GenerationPurpose::Segment)
            .collect()
    }

    /// Scripted responses not consumed yet.
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> TaleweaverResult<String> {
        self.requests.lock().unwrap().push(request.clone());

        if request.purpose == GenerationPurpose::Title {
            return match &self.title_reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(GenerationError::failure("title service down").into()),
            };
        }

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Success(raw)) => Ok(raw),
            Some(MockResponse::Error(kind)) => Err(GenerationError::new(kind).into()),
            None => Err(GenerationError::failure("mock script exhausted").into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-storyteller-v1"
    }
}
