//! Parsing helpers for raw AI responses.
//!
//! Models wrap JSON in markdown fences, prepend commentary, or fall back to
//! plain lists. These helpers salvage what they can and signal cleanly when
//! they cannot.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::SeoPackage;

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)```(?:json)?").unwrap())
}

fn list_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^\d+\.\s*|"|^\s*-\s*"#).unwrap())
}

/// Strips markdown code fences from a response.
pub fn strip_code_fences(text: &str) -> String {
    fence_re().replace_all(text, "").into_owned()
}

/// Attempts to recover a [`SeoPackage`] from free-form model output.
///
/// Fences are stripped, then the substring between the first `{` and the last
/// `}` is parsed. Returns `None` when no such span exists or the span is not
/// valid package JSON.
pub fn package_from_text(text: &str) -> Option<SeoPackage> {
    let cleaned = strip_code_fences(text);
    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&cleaned[start..=end]).ok()
}

/// Parses a keyword list from model output, capping at `limit` entries.
///
/// A JSON string array is preferred; otherwise the text is split on commas
/// and newlines with numbering, quotes and bullet markers stripped.
pub fn keyword_list_from_text(text: &str, limit: usize) -> Vec<String> {
    let cleaned = strip_code_fences(text);

    if let (Some(start), Some(end)) = (cleaned.find('['), cleaned.rfind(']')) {
        if start < end {
            if let Ok(list) = serde_json::from_str::<Vec<String>>(&cleaned[start..=end]) {
                return list
                    .into_iter()
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty())
                    .take(limit)
                    .collect();
            }
        }
    }

    cleaned
        .split(['\n', ','])
        .map(|k| list_marker_re().replace_all(k.trim(), "").trim().to_string())
        .filter(|k| !k.is_empty())
        .take(limit)
        .collect()
}

/// Heuristic for quota exhaustion in upstream error text.
pub fn is_quota_error(message: &str) -> bool {
    let lowered = message.to_lowercase();
    lowered.contains("quota") || lowered.contains("rate limit") || lowered.contains("429")
}
