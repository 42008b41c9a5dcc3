//! Collaborator trait definitions for the Taleweaver story engine.
//!
//! The engine owns the narrative rules. Text generation, speech rendering and
//! persistence are supplied by the host through the traits in this crate.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod repository;
mod traits;

pub use repository::StoryRepository;
pub use traits::{SpeechRenderer, TextGenerator};
