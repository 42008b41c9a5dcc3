//! Persisted segment nodes.

use crate::GeneratedSegment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted, validated segment.
///
/// Exactly one node exists per `(session_id, segment_index)`. Nodes are never
/// mutated; rewind deletes the ones past the restored checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct SegmentNode {
    /// Node identity
    id: Uuid,
    /// Owning session
    session_id: Uuid,
    /// Position in the story
    segment_index: u32,
    /// Creation time
    created_at: DateTime<Utc>,
    /// The normalized segment, serialized as JSON
    segment_json: String,
    /// Whether the player reached this node through a moral choice
    arrived_via_moral_choice: bool,
}

impl SegmentNode {
    /// Serialize `segment` into a new node.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_core::{GeneratedSegment, SegmentNode};
    /// use uuid::Uuid;
    ///
    /// let segment = GeneratedSegment {
    ///     narration: "Once upon a time.".to_string(),
    ///     ..Default::default()
    /// };
    /// let node = SegmentNode::new(Uuid::new_v4(), 0, &segment, true).unwrap();
    /// assert_eq!(node.decode().unwrap(), segment);
    /// ```
    pub fn new(
        session_id: Uuid,
        segment_index: u32,
        segment: &GeneratedSegment,
        arrived_via_moral_choice: bool,
    ) -> serde_json::Result<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            session_id,
            segment_index,
            created_at: Utc::now(),
            segment_json: serde_json::to_string(segment)?,
            arrived_via_moral_choice,
        })
    }

    /// Parse the stored payload back into a segment.
    pub fn decode(&self) -> serde_json::Result<GeneratedSegment> {
        serde_json::from_str(&self.segment_json)
    }
}
