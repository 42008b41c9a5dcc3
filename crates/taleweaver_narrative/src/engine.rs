//! The narrative state machine.

use crate::{
    SegmentValidator, StoryEngineConfig, draw_variation, generate_title, new_seed,
    prompt::{self, MORAL_SUMMARY, START_SUMMARY},
};
use taleweaver_core::{
    GeneratedSegment, RewindView, SegmentNode, SegmentView, Session, StartStoryRequest,
    StoryFraming, StoryStatus,
};
use taleweaver_error::{StorageError, StorageErrorKind, StoryError, TaleweaverResult};
use taleweaver_interface::{StoryRepository, TextGenerator};
use tracing::{debug, info};
use uuid::Uuid;

/// Drives story sessions through start, choose and rewind.
///
/// Sessions are only ever mutated through these three entry points. Calls for
/// different sessions are independent; callers must not run two mutating
/// calls for the same session at once.
///
/// # Example
///
/// ```rust,ignore
/// use taleweaver_narrative::{InMemoryStoryRepository, StoryEngine, StoryEngineConfig};
///
/// # async fn example(generator: impl taleweaver_interface::TextGenerator) -> taleweaver_error::TaleweaverResult<()> {
/// let engine = StoryEngine::new(generator, InMemoryStoryRepository::new(), StoryEngineConfig::load()?);
/// let first = engine.start(&request).await?;
/// let next = engine.choose(first.session_id, "A").await?;
/// # Ok(())
/// # }
/// ```
pub struct StoryEngine<G: TextGenerator, R: StoryRepository> {
    pub(crate) generator: G,
    pub(crate) repository: R,
    pub(crate) config: StoryEngineConfig,
    pub(crate) validator: SegmentValidator,
}

impl<G: TextGenerator, R: StoryRepository> StoryEngine<G, R> {
    /// Create an engine over a generator and a repository.
    pub fn new(generator: G, repository: R, config: StoryEngineConfig) -> Self {
        Self {
            generator,
            repository,
            config,
            validator: SegmentValidator::new(),
        }
    }

    /// The text generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// The repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// The active configuration.
    pub fn config(&self) -> &StoryEngineConfig {
        &self.config
    }

    /// Create a session and generate its first segment.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when the age or chapter count is out of bounds, or the
    ///   player name or theme is blank
    /// - any generation, validation or storage error from the first segment;
    ///   the session itself is already saved by then
    #[tracing::instrument(
        skip(self, request),
        fields(
            player_name = %request.player_name,
            theme = %request.theme,
            chapter_count = request.chapter_count,
        )
    )]
    pub async fn start(&self, request: &StartStoryRequest) -> TaleweaverResult<SegmentView> {
        self.check_start_request(request)?;

        let player_name = request.player_name.trim();
        let theme = request.theme.trim();
        let framing = self.resolve_framing(request, player_name, theme);
        let variation = draw_variation(
            new_seed(),
            theme,
            request.target_age,
            request.chapter_count,
        );

        let mut session = Session::new(
            request.target_age,
            player_name,
            theme,
            request.chapter_count,
            framing,
            variation,
        );
        session.title = generate_title(&self.generator, &session, &self.config).await;
        self.repository.upsert_session(&session).await?;

        info!(
            session_id = %session.id,
            title = %session.title,
            opening_style = %session.variation.opening_style,
            "Story session created"
        );

        self.generate_segment(&mut session, START_SUMMARY, true).await
    }

    /// Apply the player's choice and generate the next segment.
    ///
    /// A moral choice records a checkpoint. Any other choice costs a life,
    /// marks the session failed, and forces the next segment to end the story.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the session or its current segment is missing
    /// - `InvalidState` when the session is not running or the current
    ///   segment has already ended
    /// - `InvalidInput` when `choice_id` is blank or matches no choice
    /// - any generation, validation or storage error; counter updates made by
    ///   this call stay saved
    #[tracing::instrument(skip(self), fields(segment_index))]
    pub async fn choose(&self, session_id: Uuid, choice_id: &str) -> TaleweaverResult<SegmentView> {
        let mut session = self.repository.get_session(session_id).await?;

        if session.status != StoryStatus::Running {
            return Err(StoryError::invalid_state(
                "Story ended. Rewind to continue from the last checkpoint.",
            )
            .into());
        }

        let index = session.current_segment_index;
        tracing::Span::current().record("segment_index", index);

        let node = self
            .repository
            .get_node(session_id, index)
            .await?
            .ok_or_else(|| StoryError::not_found(format!("No segment found at index={}", index)))?;
        let segment = decode_node(&node)?;

        if segment.ended {
            return Err(StoryError::invalid_state("Cannot choose on an ended segment").into());
        }

        let choice_id = choice_id.trim();
        if choice_id.is_empty() {
            return Err(StoryError::invalid_input("choiceId is blank").into());
        }

        let chosen = segment
            .find_choice(choice_id)
            .ok_or_else(|| StoryError::invalid_input(format!("Invalid choice id: {}", choice_id)))?;
        let moral = segment.is_moral_choice(&chosen.id);

        let summary = if moral {
            session.record_moral_choice();
            MORAL_SUMMARY.to_string()
        } else {
            session.record_immoral_choice(chosen.id.trim());
            prompt::immoral_summary(&chosen.text, self.config.story().choice_summary_max_chars)
        };
        session.current_segment_index = index + 1;
        self.repository.upsert_session(&session).await?;

        info!(
            choice_id = %chosen.id,
            moral,
            lives_remaining = session.lives_remaining,
            immoral_choices = session.immoral_choices_count,
            "Choice applied"
        );

        self.generate_segment(&mut session, &summary, moral).await
    }

    /// Restore the last checkpoint.
    ///
    /// Returns to the most recent failure if there is one, otherwise to the
    /// last moral checkpoint, deleting every later segment. The failed choice
    /// is reported as disabled when it belongs to the restored segment.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the session or the segment at the restore index is
    ///   missing
    /// - storage errors; the deletion and the session update commit together
    #[tracing::instrument(skip(self))]
    pub async fn rewind(&self, session_id: Uuid) -> TaleweaverResult<RewindView> {
        let mut session = self.repository.get_session(session_id).await?;
        let restore_index = session.restore_index();

        let node = self
            .repository
            .get_node(session_id, restore_index)
            .await?
            .ok_or_else(|| {
                StoryError::not_found(format!("No node found at index={}", restore_index))
            })?;
        let segment = decode_node(&node)?;

        session.current_segment_index = restore_index;
        session.status = StoryStatus::Running;
        let removed = self
            .repository
            .commit_rewind(&session, restore_index)
            .await?;

        let view = RewindView::new(&session, &segment);
        info!(
            restore_index,
            removed,
            disabled = ?view.disabled_choice_ids,
            "Story rewound"
        );
        Ok(view)
    }

    fn check_start_request(&self, request: &StartStoryRequest) -> TaleweaverResult<()> {
        let story = self.config.story();

        if !(story.min_target_age..=story.max_target_age).contains(&request.target_age) {
            return Err(StoryError::invalid_input(format!(
                "targetAge must be between {} and {}, got {}",
                story.min_target_age, story.max_target_age, request.target_age
            ))
            .into());
        }
        if !(story.min_chapters..=story.max_chapters).contains(&request.chapter_count) {
            return Err(StoryError::invalid_input(format!(
                "chapterCount must be between {} and {}, got {}",
                story.min_chapters, story.max_chapters, request.chapter_count
            ))
            .into());
        }
        if request.player_name.trim().is_empty() {
            return Err(StoryError::invalid_input("playerName is blank").into());
        }
        if request.theme.trim().is_empty() {
            return Err(StoryError::invalid_input("theme is blank").into());
        }
        Ok(())
    }

    fn resolve_framing(
        &self,
        request: &StartStoryRequest,
        player_name: &str,
        theme: &str,
    ) -> StoryFraming {
        let defaults = self.config.defaults();
        let given = |field: &Option<String>| {
            field
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let framing = StoryFraming {
            character: given(&request.character)
                .unwrap_or_else(|| format!("{}{}", defaults.character_prefix, player_name)),
            environment: given(&request.environment)
                .unwrap_or_else(|| format!("{}{}", defaults.environment_prefix, theme)),
            mission: given(&request.mission).unwrap_or_else(|| defaults.mission.clone()),
            tone: given(&request.tone).unwrap_or_else(|| defaults.tone.clone()),
        };
        debug!(?framing, "Resolved story framing");
        framing
    }
}

/// Parse a stored node, reporting unreadable payloads as corrupt storage.
pub(crate) fn decode_node(node: &SegmentNode) -> TaleweaverResult<GeneratedSegment> {
    node.decode().map_err(|e| {
        StorageError::new(StorageErrorKind::Corrupt(format!(
            "Segment {} of session {} is unreadable: {}",
            node.segment_index(),
            node.session_id(),
            e
        )))
        .into()
    })
}
