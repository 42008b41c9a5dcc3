//! Utilities for pulling JSON out of generator responses.
//!
//! Generators often wrap the requested object in a markdown code fence or
//! surround it with a sentence of prose. These helpers find the object and
//! parse it.

use taleweaver_error::{GenerationError, TaleweaverResult};

/// Extract a JSON object from a response that may contain markdown or prose.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ``` (or an unlabeled fence)
/// 2. The first balanced `{ ... }`
///
/// # Errors
///
/// Returns a generation failure if no object is found.
///
/// # Examples
///
/// ```
/// use taleweaver_narrative::extract_json;
///
/// let response = "Here is the segment:\n\
///     \n\
///     ```json\n\
///     {\"narration\": \"Once upon a time\"}\n\
///     ```\n";
///
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_json(response: &str) -> TaleweaverResult<String> {
    if let Some(json) = extract_from_code_block(response).filter(|j| j.starts_with('{')) {
        return Ok(json);
    }

    if let Some(json) = extract_balanced(response, '{', '}') {
        return Ok(json);
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON object found in generator response"
    );

    Err(GenerationError::failure(format!(
        "No JSON object found in response (length: {})",
        response.len()
    ))
    .into())
}

/// Extract content from a markdown code block.
///
/// Looks for ```json first, then any fence, skipping a language tag.
fn extract_from_code_block(response: &str) -> Option<String> {
    let pattern = "```json";
    if let Some(start) = response.find(pattern) {
        let content_start = start + pattern.len();
        return Some(until_fence(&response[content_start..]));
    }

    if let Some(start) = response.find("```") {
        let content_start = start + 3;
        let skip_to = response[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);
        return Some(until_fence(&response[skip_to..]));
    }

    None
}

// Truncated responses have no closing fence; take everything.
fn until_fence(rest: &str) -> String {
    match rest.find("```") {
        Some(end) => rest[..end].trim().to_string(),
        None => rest.trim().to_string(),
    }
}

/// Extract content between balanced delimiters.
///
/// Finds the first `open` and returns up to the matching `close`, skipping
/// delimiters inside string literals.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(response[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Extract and parse a JSON object into `T`.
///
/// # Errors
///
/// Returns a generation failure if no object is found or it does not fit `T`.
///
/// # Examples
///
/// ```
/// use taleweaver_narrative::parse_json;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Title {
///     title: String,
/// }
///
/// let title: Title = parse_json("Sure! {\"title\": \"The Lost Map\"}").unwrap();
/// assert_eq!(title.title, "The Lost Map");
/// ```
pub fn parse_json<T>(response: &str) -> TaleweaverResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let json = extract_json(response)?;
    serde_json::from_str(&json).map_err(|e| {
        let preview = json.chars().take(100).collect::<String>();

        tracing::error!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        GenerationError::failure(format!(
            "Failed to parse JSON: {} (JSON: {}...)",
            e, preview
        ))
        .into()
    })
}
