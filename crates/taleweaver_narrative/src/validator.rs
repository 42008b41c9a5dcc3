//! Structural validation of generated segments.

use regex::Regex;
use std::collections::HashSet;
use taleweaver_core::{GeneratedSegment, fold_choice_id};
use taleweaver_error::{ValidationError, ValidationErrorKind};
use tracing::{debug, instrument};

/// Choices a running segment must offer.
pub const REQUIRED_CHOICES: usize = 4;
/// Moral choices among them.
pub const REQUIRED_MORAL_CHOICES: usize = 2;

/// Checks the structural contract of a generated segment.
///
/// Pure and synchronous. Run it after utterance normalization so defaulted
/// fields pass the non-blank checks.
#[derive(Debug, Clone)]
pub struct SegmentValidator {
    quoted_dialogue: Regex,
}

impl Default for SegmentValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentValidator {
    /// Create a validator.
    pub fn new() -> Self {
        // Non-greedy and dot-matches-newline so each quote pair counts once.
        let quoted_dialogue = Regex::new(r#"(?s)"(.*?)""#).expect("Valid dialogue regex");
        Self { quoted_dialogue }
    }

    /// Number of quoted fragments in `narration` with non-blank content.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_narrative::SegmentValidator;
    ///
    /// let validator = SegmentValidator::new();
    /// assert_eq!(validator.count_quoted_dialogues(r#"He said "Hello there""#), 1);
    /// assert_eq!(validator.count_quoted_dialogues(r#"An empty "  " pair"#), 0);
    /// assert_eq!(validator.count_quoted_dialogues("\"one\nline\" and \"two\""), 2);
    /// ```
    pub fn count_quoted_dialogues(&self, narration: &str) -> usize {
        self.quoted_dialogue
            .captures_iter(narration)
            .filter(|caps| caps.get(1).is_some_and(|m| !m.as_str().trim().is_empty()))
            .count()
    }

    /// Validate a segment.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first broken rule.
    #[instrument(skip(self, segment), fields(ended = segment.ended))]
    pub fn validate(&self, segment: &GeneratedSegment) -> Result<(), ValidationError> {
        if segment.narration.trim().is_empty() {
            return Err(ValidationError::new(if segment.ended {
                ValidationErrorKind::EmptyFinalNarration
            } else {
                ValidationErrorKind::EmptyNarration
            }));
        }

        self.validate_utterances(segment)?;

        if segment.ended {
            return validate_ending(segment);
        }
        validate_choices(segment)?;

        debug!("Segment passed validation");
        Ok(())
    }

    fn validate_utterances(&self, segment: &GeneratedSegment) -> Result<(), ValidationError> {
        let quoted = self.count_quoted_dialogues(&segment.narration);
        let utterances = segment.utterances.len();

        if quoted > 0 && utterances != quoted {
            return Err(ValidationError::new(
                ValidationErrorKind::DialogueCountMismatch { quoted, utterances },
            ));
        }

        for (i, u) in segment.utterances.iter().enumerate() {
            if u.speaker.trim().is_empty() {
                return Err(ValidationError::new(ValidationErrorKind::MissingSpeaker(i)));
            }
            if u.age_group.trim().is_empty() {
                return Err(ValidationError::new(ValidationErrorKind::MissingAgeGroup(i)));
            }
            if u.text.trim().is_empty() {
                return Err(ValidationError::new(
                    ValidationErrorKind::MissingUtteranceText(i),
                ));
            }
        }
        Ok(())
    }
}

fn validate_ending(segment: &GeneratedSegment) -> Result<(), ValidationError> {
    if !segment.choices.as_ref().is_some_and(Vec::is_empty) {
        return Err(ValidationError::new(ValidationErrorKind::EndedWithChoices));
    }
    if !segment.moral_choice_ids.as_ref().is_some_and(Vec::is_empty) {
        return Err(ValidationError::new(
            ValidationErrorKind::EndedWithMoralChoices,
        ));
    }
    if segment.explanation_text().trim().is_empty() {
        return Err(ValidationError::new(ValidationErrorKind::MissingExplanation));
    }
    Ok(())
}

fn validate_choices(segment: &GeneratedSegment) -> Result<(), ValidationError> {
    let choices = segment.offered_choices();
    if segment.choices.is_none() || choices.len() != REQUIRED_CHOICES {
        return Err(ValidationError::new(ValidationErrorKind::ChoiceCount(
            choices.len(),
        )));
    }

    // Moral ids behave as a set: case-insensitive duplicates collapse.
    let moral_ids: HashSet<String> = segment
        .moral_ids()
        .iter()
        .map(|id| fold_choice_id(id))
        .collect();
    if segment.moral_choice_ids.is_none() || moral_ids.len() != REQUIRED_MORAL_CHOICES {
        return Err(ValidationError::new(ValidationErrorKind::MoralChoiceCount(
            moral_ids.len(),
        )));
    }

    for choice in choices {
        if choice.id.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::MissingChoiceId));
        }
        if choice.text.trim().is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingChoiceText(choice.id.clone()),
            ));
        }
    }

    let choice_ids: HashSet<String> = choices
        .iter()
        .map(|c| fold_choice_id(&c.id))
        .collect();
    if choice_ids.len() != REQUIRED_CHOICES {
        return Err(ValidationError::new(ValidationErrorKind::DuplicateChoiceIds));
    }

    for moral_id in segment.moral_ids() {
        if moral_id.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::BlankMoralChoiceId));
        }
        if !choice_ids.contains(&fold_choice_id(moral_id)) {
            return Err(ValidationError::new(
                ValidationErrorKind::UnknownMoralChoiceId(moral_id.clone()),
            ));
        }
    }
    Ok(())
}
