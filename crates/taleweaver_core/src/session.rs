//! Story session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a session.
///
/// A session starts `Running`. It becomes `Failed` after an immoral choice or
/// when a generated segment ends the story, and only `rewind` brings it back.
///
/// # Examples
///
/// ```
/// use taleweaver_core::StoryStatus;
///
/// assert_eq!(format!("{}", StoryStatus::Failed), "FAILED");
/// assert_eq!("RUNNING".parse::<StoryStatus>().unwrap(), StoryStatus::Running);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StoryStatus {
    /// The player may choose
    #[default]
    Running,
    /// The story has stopped; only rewind is accepted
    Failed,
}

/// Story length and life budget, resolved once on first generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryPlan {
    /// Total number of segments the story is paced for
    pub planned_segments: u32,
    /// Lives granted for the whole session
    pub lives_total: u32,
}

impl StoryPlan {
    /// Resolve the plan for a requested chapter count.
    ///
    /// One life per two chapters, rounded up, never fewer than two.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_core::StoryPlan;
    ///
    /// let plan = StoryPlan::for_chapters(10);
    /// assert_eq!(plan.planned_segments, 10);
    /// assert_eq!(plan.lives_total, 5);
    ///
    /// assert_eq!(StoryPlan::for_chapters(3).lives_total, 2);
    /// assert_eq!(StoryPlan::for_chapters(7).lives_total, 4);
    /// ```
    pub fn for_chapters(chapter_count: u32) -> Self {
        let planned_segments = chapter_count.max(1);
        let lives_total = planned_segments.div_ceil(2).max(2);
        Self {
            planned_segments,
            lives_total,
        }
    }
}

/// Narrative framing, each field either supplied by the caller or defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryFraming {
    /// Who the hero is
    pub character: String,
    /// Where the story takes place
    pub environment: String,
    /// What the hero sets out to do
    pub mission: String,
    /// Overall mood
    pub tone: String,
}

/// Seeded variation drawn once when the session is created.
///
/// Stored verbatim and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryVariation {
    /// Session-lifetime random seed
    pub seed: String,
    /// How the first segment should open
    pub opening_style: String,
    /// Structured era/twist/obstacle/style line
    pub variation_pack: String,
    /// Phrases the generator must not reuse
    pub avoid_list: Vec<String>,
}

/// The most recent immoral choice, used to grey it out after a rewind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedChoice {
    /// Segment index the choice was made at
    pub segment_index: u32,
    /// Choice id as it appears in that segment
    pub choice_id: String,
}

/// One interactive story instance and its running counters.
///
/// Mutated only through the story engine's entry points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session identity
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Age of the listener
    pub target_age: u8,
    /// Name of the hero
    pub player_name: String,
    /// Story theme
    pub theme: String,
    /// Character, environment, mission and tone
    pub framing: StoryFraming,
    /// Requested story length
    pub chapter_count: u32,
    /// Resolved length and lives, set once on first generation
    pub plan: Option<StoryPlan>,
    /// Cursor into the segment list
    pub current_segment_index: u32,
    /// Running or failed
    pub status: StoryStatus,
    /// Lives left; never above `plan.lives_total`
    pub lives_remaining: u32,
    /// Number of immoral choices ever made; never decremented
    pub immoral_choices_count: u32,
    /// Last index at which a moral choice was made
    pub last_moral_segment_index: u32,
    /// Most recent immoral choice
    pub last_failure: Option<FailedChoice>,
    /// Seed, opening style, variation pack and avoid-list
    pub variation: StoryVariation,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a fresh running session at index 0 with no plan yet.
    pub fn new(
        target_age: u8,
        player_name: impl Into<String>,
        theme: impl Into<String>,
        chapter_count: u32,
        framing: StoryFraming,
        variation: StoryVariation,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            target_age,
            player_name: player_name.into(),
            theme: theme.into(),
            framing,
            chapter_count,
            plan: None,
            current_segment_index: 0,
            status: StoryStatus::Running,
            lives_remaining: 0,
            immoral_choices_count: 0,
            last_moral_segment_index: 0,
            last_failure: None,
            variation,
            created_at: Utc::now(),
        }
    }

    /// Whether the session accepts choices.
    pub fn is_running(&self) -> bool {
        self.status == StoryStatus::Running
    }

    /// Planned segment count, or 0 before the plan is resolved.
    pub fn planned_segments(&self) -> u32 {
        self.plan.map(|p| p.planned_segments).unwrap_or(0)
    }

    /// Total lives, or 0 before the plan is resolved.
    pub fn lives_total(&self) -> u32 {
        self.plan.map(|p| p.lives_total).unwrap_or(0)
    }

    /// Resolve the plan if it has not been resolved yet.
    ///
    /// Returns `true` when the plan was set by this call. Later calls leave
    /// the plan and the lives untouched.
    pub fn ensure_plan(&mut self) -> bool {
        if self.plan.is_some() {
            return false;
        }
        let plan = StoryPlan::for_chapters(self.chapter_count);
        if self.lives_remaining == 0 {
            self.lives_remaining = plan.lives_total;
        }
        self.plan = Some(plan);
        true
    }

    /// Record a moral choice made at the current index.
    pub fn record_moral_choice(&mut self) {
        self.last_moral_segment_index = self.current_segment_index;
        self.status = StoryStatus::Running;
    }

    /// Record an immoral choice made at the current index.
    pub fn record_immoral_choice(&mut self, choice_id: impl Into<String>) {
        self.immoral_choices_count += 1;
        self.lives_remaining = self.lives_remaining.saturating_sub(1);
        self.status = StoryStatus::Failed;
        self.last_failure = Some(FailedChoice {
            segment_index: self.current_segment_index,
            choice_id: choice_id.into(),
        });
    }

    /// Index a rewind returns to: the last failure if any, else the last
    /// moral checkpoint.
    pub fn restore_index(&self) -> u32 {
        self.last_failure
            .as_ref()
            .map(|f| f.segment_index)
            .unwrap_or(self.last_moral_segment_index)
    }

    /// Choice ids to disable when showing the segment at `index`.
    pub fn disabled_choices_at(&self, index: u32) -> Vec<String> {
        match &self.last_failure {
            Some(failure) if failure.segment_index == index && !failure.choice_id.trim().is_empty() => {
                vec![failure.choice_id.clone()]
            }
            _ => Vec::new(),
        }
    }
}
