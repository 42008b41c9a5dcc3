//! Tests for the segment structural contract.

use taleweaver_core::{Choice, GeneratedSegment, Utterance};
use taleweaver_error::ValidationErrorKind;
use taleweaver_narrative::{SegmentValidator, normalize_utterances};

fn choices(ids: &[&str]) -> Vec<Choice> {
    ids.iter()
        .map(|id| Choice::new(*id, format!("Option {}", id)))
        .collect()
}

fn running(narration: &str, utterances: Vec<Utterance>) -> GeneratedSegment {
    GeneratedSegment {
        narration: narration.to_string(),
        utterances,
        choices: Some(choices(&["A", "B", "C", "D"])),
        moral_choice_ids: Some(vec!["A".to_string(), "C".to_string()]),
        ended: false,
        explanation: None,
    }
}

fn ending() -> GeneratedSegment {
    GeneratedSegment {
        narration: "The bridge gave way.".to_string(),
        ended: true,
        explanation: Some("Rushing ahead put everyone at risk.".to_string()),
        ..Default::default()
    }
}

fn kind(segment: &GeneratedSegment) -> ValidationErrorKind {
    SegmentValidator::new()
        .validate(segment)
        .expect_err("expected a validation error")
        .kind
}

#[test]
fn test_well_formed_segment_passes() {
    let segment = running(
        r#"He said "Hello there""#,
        vec![Utterance::new("HERO", "CHILD", "MALE", "Hello there")],
    );
    assert!(SegmentValidator::new().validate(&segment).is_ok());
}

#[test]
fn test_quoted_dialogue_needs_matching_utterances() {
    let segment = running(r#"He said "Hello there""#, vec![]);
    assert_eq!(
        kind(&segment),
        ValidationErrorKind::DialogueCountMismatch {
            quoted: 1,
            utterances: 0
        }
    );
}

#[test]
fn test_utterances_without_quotes_are_allowed() {
    let segment = running(
        "The wind howled.",
        vec![Utterance::new("HERO", "CHILD", "MALE", "Brr")],
    );
    assert!(SegmentValidator::new().validate(&segment).is_ok());
}

#[test]
fn test_blank_narration_fails() {
    let segment = running("   ", vec![]);
    assert_eq!(kind(&segment), ValidationErrorKind::EmptyNarration);

    let mut end = ending();
    end.narration = String::new();
    assert_eq!(kind(&end), ValidationErrorKind::EmptyFinalNarration);
}

#[test]
fn test_missing_age_group_is_fixed_by_normalization() {
    let mut segment = running(
        r#"Mom said "Dinner!""#,
        vec![Utterance::new("MOM", "", "", "Dinner!")],
    );
    assert_eq!(kind(&segment), ValidationErrorKind::MissingAgeGroup(0));

    normalize_utterances(&mut segment, "Mia");
    assert!(SegmentValidator::new().validate(&segment).is_ok());
}

#[test]
fn test_blank_speaker_and_text_fail() {
    let segment = running(
        r#""Hi""#,
        vec![Utterance::new(" ", "CHILD", "MALE", "Hi")],
    );
    assert_eq!(kind(&segment), ValidationErrorKind::MissingSpeaker(0));

    let segment = running(
        "No quotes here.",
        vec![Utterance::new("HERO", "CHILD", "MALE", "")],
    );
    assert_eq!(kind(&segment), ValidationErrorKind::MissingUtteranceText(0));
}

#[test]
fn test_running_segment_needs_four_choices() {
    let mut segment = running("Three doors.", vec![]);
    segment.choices = Some(choices(&["A", "B", "C"]));
    assert_eq!(kind(&segment), ValidationErrorKind::ChoiceCount(3));

    segment.choices = None;
    assert_eq!(kind(&segment), ValidationErrorKind::ChoiceCount(0));
}

#[test]
fn test_running_segment_needs_two_moral_ids() {
    let mut segment = running("Doors.", vec![]);
    segment.moral_choice_ids = Some(vec!["A".to_string()]);
    assert_eq!(kind(&segment), ValidationErrorKind::MoralChoiceCount(1));

    // Case-insensitive duplicates collapse.
    segment.moral_choice_ids = Some(vec!["A".to_string(), "a".to_string()]);
    assert_eq!(kind(&segment), ValidationErrorKind::MoralChoiceCount(1));

    segment.moral_choice_ids = None;
    assert_eq!(kind(&segment), ValidationErrorKind::MoralChoiceCount(0));
}

#[test]
fn test_moral_ids_must_name_offered_choices() {
    let mut segment = running("Doors.", vec![]);
    segment.moral_choice_ids = Some(vec!["A".to_string(), "Z".to_string()]);
    assert_eq!(
        kind(&segment),
        ValidationErrorKind::UnknownMoralChoiceId("Z".to_string())
    );

    segment.moral_choice_ids = Some(vec!["a".to_string(), " c ".to_string()]);
    assert!(SegmentValidator::new().validate(&segment).is_ok());
}

#[test]
fn test_non_ascii_ids_fold_like_choice_lookup() {
    let mut segment = running("Doors.", vec![]);
    segment.choices = Some(choices(&["É", "B", "C", "D"]));
    segment.moral_choice_ids = Some(vec!["é".to_string(), "C".to_string()]);
    assert!(SegmentValidator::new().validate(&segment).is_ok());

    assert_eq!(segment.find_choice("é").map(|c| c.id.as_str()), Some("É"));
    assert!(segment.is_moral_choice("É"));
    assert!(!segment.is_moral_choice("B"));

    segment.choices = Some(choices(&["É", "é", "C", "D"]));
    assert_eq!(kind(&segment), ValidationErrorKind::DuplicateChoiceIds);
}

#[test]
fn test_choice_ids_must_be_unique_and_filled() {
    let mut segment = running("Doors.", vec![]);
    segment.choices = Some(choices(&["A", "B", "C", "a"]));
    assert_eq!(kind(&segment), ValidationErrorKind::DuplicateChoiceIds);

    segment.choices = Some(vec![
        Choice::new("A", "Left"),
        Choice::new("B", ""),
        Choice::new("C", "Right"),
        Choice::new("D", "Back"),
    ]);
    assert_eq!(
        kind(&segment),
        ValidationErrorKind::MissingChoiceText("B".to_string())
    );
}

#[test]
fn test_ending_rules() {
    assert!(SegmentValidator::new().validate(&ending()).is_ok());

    let mut end = ending();
    end.choices = Some(choices(&["A"]));
    assert_eq!(kind(&end), ValidationErrorKind::EndedWithChoices);

    let mut end = ending();
    end.choices = None;
    assert_eq!(kind(&end), ValidationErrorKind::EndedWithChoices);

    let mut end = ending();
    end.moral_choice_ids = Some(vec!["A".to_string()]);
    assert_eq!(kind(&end), ValidationErrorKind::EndedWithMoralChoices);

    let mut end = ending();
    end.explanation = Some("  ".to_string());
    assert_eq!(kind(&end), ValidationErrorKind::MissingExplanation);
}
