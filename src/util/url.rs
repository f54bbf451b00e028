//! URL extraction from free-form chat text.

use regex::Regex;
use std::sync::LazyLock;

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<?https?://[^\s<>]+>?").unwrap());

/// Punctuation that commonly follows a link in prose but is never part of it.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '\'', '"', '*', '_', '~', '|'];

/// Extracts every http(s) URL from a chat message in order of appearance.
///
/// Links wrapped in `<...>` (Discord embed suppression) are unwrapped, trailing punctuation
/// is stripped and an unbalanced closing parenthesis is dropped so `(see https://x.com/a)`
/// yields the bare link.
///
/// # Arguments
/// - `text` - Message content
///
/// # Returns
/// - `Vec<String>` - URLs in source order, duplicates included
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_REGEX
        .find_iter(text)
        .filter_map(|m| clean_url(m.as_str()))
        .collect()
}

fn clean_url(raw: &str) -> Option<String> {
    let mut url = raw.trim_start_matches('<').trim_end_matches('>');

    loop {
        let trimmed = url.trim_end_matches(TRAILING_PUNCTUATION);
        let trimmed = if trimmed.ends_with(')') && !has_balanced_parens(trimmed) {
            &trimmed[..trimmed.len() - 1]
        } else {
            trimmed
        };

        if trimmed.len() == url.len() {
            break;
        }
        url = trimmed;
    }

    let scheme_end = url.find("://")? + 3;
    if url.len() <= scheme_end {
        return None;
    }

    Some(url.to_string())
}

fn has_balanced_parens(s: &str) -> bool {
    s.matches('(').count() >= s.matches(')').count()
}
