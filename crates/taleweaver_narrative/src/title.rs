//! Story title generation.

use crate::{StoryEngineConfig, parse_json, prompt};
use serde::Deserialize;
use taleweaver_core::Session;
use taleweaver_error::TaleweaverResult;
use taleweaver_interface::TextGenerator;

#[derive(Debug, Deserialize)]
struct TitleReply {
    #[serde(default)]
    title: Option<String>,
}

/// Ask the generator for a title, falling back to the configured one.
///
/// Never fails: any generator or parse error is logged and replaced by
/// `story.fallback_title`.
#[tracing::instrument(skip_all, fields(session_id = %session.id))]
pub async fn generate_title<G: TextGenerator>(
    generator: &G,
    session: &Session,
    config: &StoryEngineConfig,
) -> String {
    let fallback = &config.story().fallback_title;
    match request_title(generator, session, config).await {
        Ok(title) => shorten_title(&title, config.story().title_max_chars)
            .unwrap_or_else(|| fallback.clone()),
        Err(e) => {
            tracing::warn!(error = %e, "Title generation failed, using fallback title");
            fallback.clone()
        }
    }
}

async fn request_title<G: TextGenerator>(
    generator: &G,
    session: &Session,
    config: &StoryEngineConfig,
) -> TaleweaverResult<String> {
    let request = prompt::title_request(session, config)?;
    let raw = generator.generate(&request).await?;
    let reply: TitleReply = parse_json(&raw)?;
    Ok(reply.title.unwrap_or_default())
}

/// Trim a title and cut it to `max_chars`; `None` when blank.
///
/// # Examples
///
/// ```
/// use taleweaver_narrative::shorten_title;
///
/// assert_eq!(shorten_title("  Moon Cats  ", 46).as_deref(), Some("Moon Cats"));
/// assert_eq!(shorten_title("The Very Long Journey", 9).as_deref(), Some("The Very"));
/// assert_eq!(shorten_title("   ", 46), None);
/// ```
pub fn shorten_title(title: &str, max_chars: usize) -> Option<String> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    let cut: String = title.chars().take(max_chars).collect();
    let cut = cut.trim();
    (!cut.is_empty()).then(|| cut.to_string())
}
