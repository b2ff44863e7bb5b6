//! Text helpers shared by the source adapters and the summarizer

use regex::Regex;
use std::sync::LazyLock;

/// Marker appended to every truncated body
pub const ELLIPSIS: &str = "...";

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid regex"));
static SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("Invalid regex"));

/// Cut `text` to at most `max_chars` characters and append [`ELLIPSIS`]
///
/// Counts `char`s, not bytes, so multibyte text is never split mid-character.
/// Text that already fits is returned unchanged.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Remove markup tags and collapse the whitespace they leave behind
pub fn strip_tags(html: &str) -> String {
    let without_tags = TAG_RE.replace_all(html, "");
    let decoded = without_tags
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&");
    SPACE_RE.replace_all(decoded.trim(), " ").into_owned()
}

/// Case-insensitive substring check against a keyword table
///
/// Keywords are expected to be lower case already.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}
