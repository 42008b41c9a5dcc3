//! Structural validation errors for generated segments.

/// The rule a generated segment broke.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Narration is blank
    #[display("Narration is empty")]
    EmptyNarration,
    /// Ended segment without a final scene
    #[display("Ended segment must include a final narration")]
    EmptyFinalNarration,
    /// Quoted dialogue in narration does not line up with utterances
    #[display(
        "Narration contains {} quoted dialogues but utterances has {}",
        quoted,
        utterances
    )]
    DialogueCountMismatch {
        /// Number of quoted fragments found in narration
        quoted: usize,
        /// Number of utterances supplied
        utterances: usize,
    },
    /// Utterance without a speaker
    #[display("Utterance[{}] speaker missing", _0)]
    MissingSpeaker(usize),
    /// Utterance without an age group
    #[display("Utterance[{}] ageGroup missing (CHILD/ADULT)", _0)]
    MissingAgeGroup(usize),
    /// Utterance without text
    #[display("Utterance[{}] text missing", _0)]
    MissingUtteranceText(usize),
    /// Ended segment still offers choices (or omits the list)
    #[display("Ended segment must have empty choices")]
    EndedWithChoices,
    /// Ended segment still lists moral choice ids (or omits the list)
    #[display("Ended segment must have empty moralChoiceIds")]
    EndedWithMoralChoices,
    /// Ended segment without an explanation
    #[display("Ended segment must include explanation")]
    MissingExplanation,
    /// Running segment without exactly four choices
    #[display("Segment must have exactly 4 choices, got {}", _0)]
    ChoiceCount(usize),
    /// Choice with a blank id
    #[display("Choice id missing")]
    MissingChoiceId,
    /// Choice with blank text
    #[display("Choice text missing for id={}", _0)]
    MissingChoiceText(String),
    /// Two choices share an id (case-insensitive)
    #[display("Choice ids must be unique")]
    DuplicateChoiceIds,
    /// Running segment without exactly two distinct moral choice ids
    #[display("Segment must have exactly 2 moral choices, got {}", _0)]
    MoralChoiceCount(usize),
    /// Blank moral choice id
    #[display("Moral choice id is blank")]
    BlankMoralChoiceId,
    /// Moral choice id that names no choice
    #[display("Invalid moralChoiceId: {}", _0)]
    UnknownMoralChoiceId(String),
}

/// Validation error with location tracking.
///
/// Raised when collaborator output parses but breaks the segment contract.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::DialogueCountMismatch {
///     quoted: 1,
///     utterances: 0,
/// });
/// assert!(format!("{}", err).contains("1 quoted dialogues"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The rule that was broken
    pub kind: ValidationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
