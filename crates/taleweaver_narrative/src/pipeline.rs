//! Segment generation, validation and persistence.

use crate::{StoryEngine, normalize_utterances, parse_json, prompt};
use taleweaver_core::{GeneratedSegment, SegmentNode, SegmentView, Session, StoryStatus};
use taleweaver_error::{
    GenerationError, GenerationErrorKind, JsonError, TaleweaverError, TaleweaverResult,
    sanitize_message,
};
use taleweaver_interface::{StoryRepository, TextGenerator};
use tracing::{debug, error, info, warn};

/// Generation attempts per segment.
pub const MAX_ATTEMPTS: u32 = 2;

impl<G: TextGenerator, R: StoryRepository> StoryEngine<G, R> {
    /// Generate, validate and persist the segment at the session's current
    /// index.
    ///
    /// A session that is not running forces the segment to end the story. A
    /// segment that ends marks the session failed. The node and the session
    /// are committed together.
    #[tracing::instrument(
        skip(self, session, transition_summary),
        fields(session_id = %session.id, segment_index = session.current_segment_index)
    )]
    pub(crate) async fn generate_segment(
        &self,
        session: &mut Session,
        transition_summary: &str,
        arrived_via_moral: bool,
    ) -> TaleweaverResult<SegmentView> {
        if session.ensure_plan() {
            debug!(
                planned_segments = session.planned_segments(),
                lives_total = session.lives_total(),
                "Resolved story plan"
            );
            self.repository.upsert_session(session).await?;
        }

        let force_termination = session.status != StoryStatus::Running;
        let segment = self
            .obtain_segment(session, transition_summary, force_termination)
            .await?;

        let node = SegmentNode::new(
            session.id,
            session.current_segment_index,
            &segment,
            arrived_via_moral,
        )
        .map_err(|e| JsonError::new(format!("Failed to serialize segment: {}", e)))?;

        if segment.ended {
            session.status = StoryStatus::Failed;
        }
        self.repository.commit_segment(&node, session).await?;

        info!(
            ended = segment.ended,
            choices = segment.offered_choices().len(),
            utterances = segment.utterances.len(),
            "Segment persisted"
        );
        Ok(SegmentView::new(session, &segment))
    }

    async fn obtain_segment(
        &self,
        session: &Session,
        transition_summary: &str,
        force_termination: bool,
    ) -> TaleweaverResult<GeneratedSegment> {
        for attempt in 1..=MAX_ATTEMPTS {
            let escalate = force_termination && attempt > 1;
            let request = prompt::segment_request(
                session,
                transition_summary,
                force_termination,
                escalate,
                &self.config,
            )?;

            debug!(attempt, force_termination, escalate, "Requesting segment");
            let raw = match self.generator.generate(&request).await {
                Ok(raw) => raw,
                Err(e) if attempt < MAX_ATTEMPTS && is_retryable(&e) => {
                    warn!(
                        attempt,
                        provider = self.generator.provider_name(),
                        error = %e,
                        "Segment generation failed, retrying"
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };

            let mut segment: GeneratedSegment = parse_json(&raw).inspect_err(|e| {
                error!(error = %e, raw = %self.excerpt(&raw), "Generator returned an unreadable segment");
            })?;
            normalize_utterances(&mut segment, &session.player_name);

            if force_termination && !segment.ended {
                if attempt < MAX_ATTEMPTS {
                    warn!(attempt, "Generator ignored forced termination, escalating");
                    continue;
                }
                error!(raw = %self.excerpt(&raw), "Generator ignored forced termination on every attempt");
                return Err(GenerationError::new(GenerationErrorKind::ContractViolation(
                    format!(
                        "Story was not terminated after {} attempts despite the failure",
                        MAX_ATTEMPTS
                    ),
                ))
                .into());
            }

            if let Err(e) = self.validator.validate(&segment) {
                error!(error = %e, raw = %self.excerpt(&raw), "Generated segment failed validation");
                return Err(e.into());
            }

            return Ok(segment);
        }

        Err(GenerationError::failure("Segment generation attempts exhausted").into())
    }

    fn excerpt(&self, raw: &str) -> String {
        sanitize_message(raw, self.config.generation().log_excerpt_chars)
    }
}

fn is_retryable(err: &TaleweaverError) -> bool {
    err.as_generation().is_some_and(GenerationError::is_retryable)
}
