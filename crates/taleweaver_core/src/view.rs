//! Response shapes returned by the story engine.

use crate::{Choice, GeneratedSegment, Session, Utterance};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freshly generated segment with the session's display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentView {
    /// Session identity
    pub session_id: Uuid,
    /// Display title
    pub title: String,
    /// Narration text
    pub narration: String,
    /// Options offered to the player
    pub choices: Vec<Choice>,
    /// Whether the story stopped
    pub ended: bool,
    /// Lesson, empty unless ended
    pub explanation: String,
    /// Lives left
    pub lives_remaining: u32,
    /// Lives granted
    pub lives_total: u32,
    /// Index of this segment
    pub segment_index: u32,
    /// Planned story length
    pub planned_segments: u32,
    /// Always empty on this path
    pub disabled_choice_ids: Vec<String>,
    /// Requested story length
    pub chapter_count: u32,
    /// Structured dialogue
    pub utterances: Vec<Utterance>,
}

impl SegmentView {
    /// Combine session display fields with a segment.
    pub fn new(session: &Session, segment: &GeneratedSegment) -> Self {
        Self {
            session_id: session.id,
            title: session.title.clone(),
            narration: segment.narration.clone(),
            choices: segment.offered_choices().to_vec(),
            ended: segment.ended,
            explanation: segment.explanation_text().to_string(),
            lives_remaining: session.lives_remaining,
            lives_total: session.lives_total(),
            segment_index: session.current_segment_index,
            planned_segments: session.planned_segments(),
            disabled_choice_ids: Vec::new(),
            chapter_count: session.chapter_count,
            utterances: segment.utterances.clone(),
        }
    }
}

/// A restored checkpoint after a rewind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewindView {
    /// Session identity
    pub session_id: Uuid,
    /// Display title
    pub title: String,
    /// Restored index
    pub segment_index: u32,
    /// Narration of the restored segment
    pub narration: String,
    /// Choices of the restored segment
    pub choices: Vec<Choice>,
    /// Lives left
    pub lives_remaining: u32,
    /// Lives granted
    pub lives_total: u32,
    /// Planned story length
    pub planned_segments: u32,
    /// Choice ids the player may not pick again
    pub disabled_choice_ids: Vec<String>,
}

impl RewindView {
    /// Build the view for the segment restored at the session's current index.
    pub fn new(session: &Session, segment: &GeneratedSegment) -> Self {
        let index = session.current_segment_index;
        Self {
            session_id: session.id,
            title: session.title.clone(),
            segment_index: index,
            narration: segment.narration.clone(),
            choices: segment.offered_choices().to_vec(),
            lives_remaining: session.lives_remaining,
            lives_total: session.lives_total(),
            planned_segments: session.planned_segments(),
            disabled_choice_ids: session.disabled_choices_at(index),
        }
    }
}
