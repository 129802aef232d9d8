//! Keyword categorization by search intent.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Keywords bucketed by the intent their wording signals.
///
/// A keyword can land in several buckets; one that matches nothing lands in
/// none.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedKeywords {
    pub buyer_intent: Vec<String>,
    pub informational: Vec<String>,
    pub branded: Vec<String>,
    pub product_features: Vec<String>,
}

fn buyer_intent_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)buy|purchase|shop|price|cost|discount|deal|cheap|best|top|review")
            .unwrap()
    })
}

fn informational_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)what|how|guide|tips|vs|versus|compare|difference|tutorial").unwrap()
    })
}

fn branded_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)brand|amazon|flipkart|meesho|myntra|online|shipping").unwrap()
    })
}

fn features_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)feature|benefit|quality|premium|professional|advanced|latest|modern|durable|lightweight|portable|eco-friendly|washable|sustainable",
        )
        .unwrap()
    })
}

/// Sorts keywords into intent buckets by pattern matching on their wording.
pub fn categorize_keywords<I>(keywords: I) -> CategorizedKeywords
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out = CategorizedKeywords::default();
    for keyword in keywords {
        let keyword = keyword.as_ref();
        if buyer_intent_re().is_match(keyword) {
            out.buyer_intent.push(keyword.to_string());
        }
        if informational_re().is_match(keyword) {
            out.informational.push(keyword.to_string());
        }
        if branded_re().is_match(keyword) {
            out.branded.push(keyword.to_string());
        }
        if features_re().is_match(keyword) {
            out.product_features.push(keyword.to_string());
        }
    }
    out
}
