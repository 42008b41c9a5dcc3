//! Narrative state engine for Taleweaver.
//!
//! This crate drives a branching children's story: it asks a text generator
//! for one segment at a time, checks the segment's structure, persists it,
//! and moves the session through its lives, failures and rewinds.
//!
//! # Features
//!
//! - **Story engine**: start, choose and rewind over any [`TextGenerator`] and
//!   [`StoryRepository`]
//! - **Segment validation**: dialogue, choice and ending rules
//! - **Variation**: seeded opening styles, variation packs and avoid-lists
//! - **Voices**: stable per-speaker voice assignment for speech rendering
//! - **Layered configuration**: bundled defaults overridden by user files
//!
//! # Example
//!
//! ```rust,ignore
//! use taleweaver_core::StartStoryRequest;
//! use taleweaver_narrative::{InMemoryStoryRepository, StoryEngine, StoryEngineConfig};
//!
//! # async fn example(generator: impl taleweaver_interface::TextGenerator) -> Result<(), Box<dyn std::error::Error>> {
//! let engine = StoryEngine::new(generator, InMemoryStoryRepository::new(), StoryEngineConfig::load()?);
//!
//! let request = StartStoryRequest::builder()
//!     .target_age(7u8)
//!     .player_name("Mia")
//!     .theme("pirates")
//!     .chapter_count(10u32)
//!     .build()?;
//!
//! let first = engine.start(&request).await?;
//! println!("{}: {}", first.title, first.narration);
//! # Ok(())
//! # }
//! ```
//!
//! [`TextGenerator`]: taleweaver_interface::TextGenerator
//! [`StoryRepository`]: taleweaver_interface::StoryRepository

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod extraction;
mod in_memory_repository;
mod pipeline;
pub mod prompt;
mod speech;
mod title;
mod utterance;
mod validator;
mod variation;
mod voice;

pub use config::{
    FramingDefaults, GenerationSettings, LocaleGuidance, SpeechSettings, StoryEngineConfig,
    StorySettings,
};
pub use engine::StoryEngine;
pub use extraction::{extract_json, parse_json};
pub use in_memory_repository::InMemoryStoryRepository;
pub use pipeline::MAX_ATTEMPTS;
pub use prompt::{ESCALATION_DIRECTIVE, MORAL_SUMMARY, START_SUMMARY, immoral_summary};
pub use speech::UtteranceSpeech;
pub use title::{generate_title, shorten_title};
pub use utterance::{is_hero, normalize_utterances};
pub use validator::{REQUIRED_CHOICES, REQUIRED_MORAL_CHOICES, SegmentValidator};
pub use variation::{draw_variation, new_seed, seeded_rng};
pub use voice::{DEFAULT_SPEED, MAX_SPEED, MIN_SPEED, clamp_speed, pick_voice};
