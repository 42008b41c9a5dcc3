//! Seeded variation that keeps successive sessions distinct.
//!
//! Everything here is drawn once, when a session is created, from a single
//! generator seeded with a hash of the session seed. The result is stored on
//! the session and never recomputed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use taleweaver_core::StoryVariation;

const OPENING_STYLES: &[&str] = &[
    "journal",
    "dialogue",
    "secret message",
    "radio bulletin",
    "investigation",
    "fairy tale",
    "treasure map",
    "in medias res",
    "rumor",
    "challenge",
    "letter",
    "strange dream",
    "announcement",
    "theater scene",
    "mission plan",
];

const ERAS: &[&str] = &[
    "today",
    "near future",
    "middle ages",
    "underwater world",
    "space station",
    "flying city",
    "crystal desert",
    "mechanical island",
    "living museum",
    "magic train",
];

const TWISTS: &[&str] = &[
    "an unexpected ally",
    "a magic rule",
    "a secret to protect",
    "a misunderstanding",
    "a strange object",
    "a place that changes",
    "a double objective",
    "a subtle moral trap",
    "an ambiguous character",
];

const OBSTACLES: &[&str] = &[
    "riddle",
    "negotiation",
    "courage",
    "cooperation",
    "patience",
    "observation",
    "creativity",
    "empathy",
    "caution",
];

const STYLES: &[&str] = &[
    "lively",
    "funny",
    "poetic",
    "gentle suspense",
    "epic",
    "mysterious",
    "tender",
];

const OVERUSED_PHRASES: &[&str] = &[
    "wounded fox",
    "mysterious forest",
    "curious little explorer",
    "sunbeams through the trees",
    "suddenly a strange noise",
    "an old oak",
    "a fishing net",
    "a trapped animal",
    "you walk softly",
    "big shining eyes",
];

const TEMPLATE_PHRASES: &[&str] = &[
    "an adventurer's bag contains",
    "you hear birds singing",
    "a squirrel looks at you",
    "golden patterns on the floor",
];

const OVERUSED_PICKS: usize = 6;
const TEMPLATE_PICKS: usize = 4;

/// Setting the generator falls back to when nothing steers it elsewhere.
const FALLBACK_SETTING: &str = "forest";

/// Fresh session seed.
pub fn new_seed() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Deterministic generator for a session seed.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use taleweaver_narrative::seeded_rng;
///
/// let a: u64 = seeded_rng("seed-1").r#gen();
/// let b: u64 = seeded_rng("seed-1").r#gen();
/// assert_eq!(a, b);
/// ```
pub fn seeded_rng(seed: &str) -> StdRng {
    let digest = Sha256::digest(seed.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    StdRng::from_seed(bytes)
}

/// Draw the opening style, variation pack and avoid-list for a new session.
///
/// Same inputs always yield the same variation.
#[tracing::instrument(skip(seed))]
pub fn draw_variation(
    seed: String,
    theme: &str,
    target_age: u8,
    chapter_count: u32,
) -> StoryVariation {
    let mut rng = seeded_rng(&seed);

    let opening_style = pick(&mut rng, OPENING_STYLES).to_string();
    let variation_pack = variation_pack(&mut rng, theme, target_age, chapter_count);
    let avoid_list = avoid_list(&mut rng, theme);

    tracing::debug!(
        opening_style = %opening_style,
        variation_pack = %variation_pack,
        avoid_terms = avoid_list.len(),
        "Drew session variation"
    );

    StoryVariation {
        seed,
        opening_style,
        variation_pack,
        avoid_list,
    }
}

fn pick<'a>(rng: &mut StdRng, catalog: &[&'a str]) -> &'a str {
    catalog[rng.gen_range(0..catalog.len())]
}

fn variation_pack(rng: &mut StdRng, theme: &str, target_age: u8, chapter_count: u32) -> String {
    let era = pick(rng, ERAS);
    let twist = pick(rng, TWISTS);
    let obstacle = pick(rng, OBSTACLES);
    let style = pick(rng, STYLES);
    let humour = if target_age <= 7 { "light" } else { "moderate" };
    let segments = chapter_count.max(1);

    format!(
        "theme={}; era={}; twist={}; key_obstacle={}; style={}; humour={}; segments={}",
        theme.trim(),
        era,
        twist,
        obstacle,
        style,
        humour,
        segments
    )
}

fn avoid_list(rng: &mut StdRng, theme: &str) -> Vec<String> {
    let mut overused = OVERUSED_PHRASES.to_vec();
    overused.shuffle(rng);
    let mut templates = TEMPLATE_PHRASES.to_vec();
    templates.shuffle(rng);

    let mut picked: Vec<&str> = overused.into_iter().take(OVERUSED_PICKS).collect();
    picked.extend(templates.into_iter().take(TEMPLATE_PICKS));

    let theme = theme.trim();
    if !theme.is_empty() && !theme.to_lowercase().contains(FALLBACK_SETTING) {
        picked.push(FALLBACK_SETTING);
    }

    let mut terms: Vec<String> = Vec::with_capacity(picked.len());
    for term in picked.into_iter().map(str::trim).filter(|t| !t.is_empty()) {
        if !terms.iter().any(|t| t == term) {
            terms.push(term.to_string());
        }
    }
    terms
}
