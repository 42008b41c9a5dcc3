//! Taleweaver - branching children's stories with a moral compass
//!
//! Taleweaver runs an interactive story for a young listener. A text generator
//! writes one segment at a time; after each segment the listener picks one of
//! four choices, two of them moral. A tempting choice costs a life and ends
//! the story on the next segment, with a short lesson. Rewind returns to the
//! last checkpoint with the failed choice disabled.
//!
//! # Features
//!
//! - **Story engine**: start, choose and rewind with lives and checkpoints
//! - **Strict segment contract**: choices, dialogue and endings are validated
//!   before anything is saved
//! - **Variety**: every story gets a seeded opening style, variation pack and
//!   avoid-list
//! - **Voices**: each character keeps a stable voice across the story
//! - **Pluggable collaborators**: bring your own text generator, speech
//!   renderer and repository
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use taleweaver::{
//!     InMemoryStoryRepository, LogFormat, StartStoryRequest, StoryEngine, StoryEngineConfig,
//!     init_tracing,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     init_tracing(LogFormat::Pretty)?;
//!
//!     let engine = StoryEngine::new(
//!         MyGenerator::new(),
//!         InMemoryStoryRepository::new(),
//!         StoryEngineConfig::load()?,
//!     );
//!
//!     let request = StartStoryRequest::builder()
//!         .target_age(7u8)
//!         .player_name("Mia")
//!         .theme("pirates")
//!         .chapter_count(10u32)
//!         .build()?;
//!
//!     let first = engine.start(&request).await?;
//!     let next = engine.choose(first.session_id, "A").await?;
//!     println!("{}", next.narration);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Taleweaver is organized as a workspace with focused crates:
//!
//! - `taleweaver_error` - Error types and caller-facing error reports
//! - `taleweaver_core` - Sessions, segments, requests and views
//! - `taleweaver_interface` - Generator, speech and repository traits
//! - `taleweaver_narrative` - The story engine and its policies
//!
//! This crate (`taleweaver`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod telemetry;

pub use taleweaver_core::*;
pub use taleweaver_error::*;
pub use taleweaver_interface::*;
pub use taleweaver_narrative::{
    DEFAULT_SPEED, ESCALATION_DIRECTIVE, FramingDefaults, GenerationSettings,
    InMemoryStoryRepository, LocaleGuidance, MAX_ATTEMPTS, MAX_SPEED, MIN_SPEED, MORAL_SUMMARY,
    REQUIRED_CHOICES, REQUIRED_MORAL_CHOICES, START_SUMMARY, SegmentValidator, SpeechSettings,
    StoryEngine, StoryEngineConfig, StorySettings, UtteranceSpeech, clamp_speed, draw_variation,
    extract_json, generate_title, immoral_summary, is_hero, new_seed, normalize_utterances,
    parse_json, pick_voice, seeded_rng, shorten_title,
};

pub use telemetry::{LogFormat, init_tracing};
