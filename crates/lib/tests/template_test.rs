//! # Template Generation Tests
//!
//! The template layer is pure, so these tests assert exact behavior:
//! determinism, caps, dedup, and seed routing by word count.

mod common;

use seoforge::templates::{
    combined_keywords, dedupe_keywords, long_tail_keywords, platform_keywords,
    short_tail_keywords, template_package, COMBINED_CAP, LONG_TAIL_CAP, SHORT_TAIL_CAP,
};

use crate::common::setup_tracing;

#[test]
fn test_short_tail_respects_cap_and_starts_with_product() {
    setup_tracing();
    let keywords = short_tail_keywords("yoga mat", &[]);

    assert!(keywords.len() <= SHORT_TAIL_CAP);
    assert_eq!(keywords[0], "yoga mat");
    assert!(keywords.contains(&"best yoga mat".to_string()));
    assert!(keywords.iter().all(|k| k == &k.to_lowercase()));
}

#[test]
fn test_short_tail_seeds_come_first() {
    setup_tracing();
    let scraped = vec!["cork yoga mat".to_string(), "eco mat".to_string()];
    let keywords = short_tail_keywords("yoga mat", &scraped);

    assert_eq!(keywords[0], "cork yoga mat");
    assert_eq!(keywords[1], "eco mat");
}

#[test]
fn test_seed_routing_by_word_count() {
    setup_tracing();
    let scraped = vec![
        "cork yoga mat".to_string(),
        "extra thick yoga mat for beginners".to_string(),
    ];

    let short = short_tail_keywords("yoga mat", &scraped);
    let long = long_tail_keywords("yoga mat", &scraped);

    // Three words or fewer go short-tail, longer phrases go long-tail.
    assert!(short.contains(&"cork yoga mat".to_string()));
    assert!(!short.contains(&"extra thick yoga mat for beginners".to_string()));
    assert_eq!(long[0], "extra thick yoga mat for beginners");
    assert!(!long.contains(&"cork yoga mat".to_string()));
}

#[test]
fn test_long_tail_respects_cap() {
    setup_tracing();
    let keywords = long_tail_keywords("yoga mat", &[]);

    assert_eq!(keywords.len(), LONG_TAIL_CAP);
    assert!(keywords[0].contains("yoga mat"));
}

#[test]
fn test_dedupe_is_case_insensitive_and_order_preserving() {
    setup_tracing();
    let keywords = dedupe_keywords(["Yoga Mat", "yoga mat", "  YOGA MAT  ", "cork mat", ""]);

    assert_eq!(keywords, vec!["yoga mat", "cork mat"]);
}

#[test]
fn test_platform_keywords_carry_marketplace_vocabulary() {
    setup_tracing();
    let buckets = platform_keywords("Yoga Mat");

    assert!(buckets.amazon.contains(&"yoga mat with prime delivery".to_string()));
    assert!(buckets.flipkart.contains(&"yoga mat with no cost EMI".to_string()));
    assert!(buckets.meesho.contains(&"yoga mat wholesale".to_string()));
    assert!(buckets.myntra.contains(&"trendy yoga mat".to_string()));
    assert_eq!(buckets.amazon.len(), 10);
}

#[test]
fn test_combined_keywords_union_the_other_lists() {
    setup_tracing();
    let keywords = combined_keywords("yoga mat");

    assert!(keywords.len() <= COMBINED_CAP);
    assert_eq!(keywords[0], "yoga mat");
    // Short-tail and long-tail entries both flow into the combined list.
    assert!(keywords.contains(&"best yoga mat".to_string()));
    assert!(keywords.iter().any(|k| k.split_whitespace().count() > 3));
}

#[test]
fn test_template_package_is_deterministic_and_complete() {
    setup_tracing();
    let first = template_package("wooden puzzle", &[]);
    let second = template_package("wooden puzzle", &[]);

    assert_eq!(first, second);
    assert!(first.product_description.contains("wooden puzzle"));
    assert!(first.seo_title.contains("wooden puzzle"));
    assert!(first.meta_description.contains("wooden puzzle"));
    assert_eq!(first.product_features.len(), 10);
    assert_eq!(first.target_audience.len(), 7);
    assert_eq!(first.seo_recommendations.len(), 8);
    assert_eq!(first.content_ideas.len(), 5);
    assert!(!first.competitor_analysis.is_empty());
    assert!(!first.combined_keywords.is_empty());
}

#[test]
fn test_package_round_trips_through_camel_case_json() {
    setup_tracing();
    let package = template_package("yoga mat", &[]);

    let json = serde_json::to_value(&package).unwrap();
    assert!(json.get("productDescription").is_some());
    assert!(json.get("longTailKeywords").is_some());
    assert!(json.get("ecommerceKeywords").unwrap().get("flipkart").is_some());
}
