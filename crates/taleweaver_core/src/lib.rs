//! Core data types for the Taleweaver interactive story engine.
//!
//! This crate provides the session and segment model shared by every
//! Taleweaver crate, along with the request and response shapes exchanged
//! with callers and collaborators.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod node;
mod request;
mod segment;
mod session;
mod speech;
mod view;

pub use node::SegmentNode;
pub use request::{
    GenerationPurpose, GenerationRequest, StartStoryRequest, StartStoryRequestBuilder,
};
pub use segment::{
    AgeGroup, Choice, Gender, GeneratedSegment, HERO_SPEAKER, Utterance, fold_choice_id,
};
pub use session::{FailedChoice, Session, StoryFraming, StoryPlan, StoryStatus, StoryVariation};
pub use speech::{AudioFormat, SpeechRequest, UtteranceSpeechRequest, VoiceSelection};
pub use view::{RewindView, SegmentView};
