//! # Default Prompt Templates
//!
//! Prompt templates sent to the AI provider. The package prompt asks for a
//! single JSON object matching [`crate::types::SeoPackage`]; the suggestion
//! prompt asks for a bare JSON array of strings.

/// System prompt for full SEO package generation.
pub const SEO_PACKAGE_SYSTEM_PROMPT: &str = "You are a senior SEO director with 15+ years of \
    specialized experience in e-commerce SEO and conversion-focused keyword strategy. You \
    respond with a single JSON object and nothing else.";

/// User prompt template for full SEO package generation.
///
/// Placeholders: `{product_name}`, `{description_part}`
pub const SEO_PACKAGE_USER_PROMPT: &str = r#"Generate comprehensive SEO-optimized content for the following product: "{product_name}"
{description_part}

Respond with a single JSON object with exactly these keys:
- "productDescription": a persuasive 300-350 word product description
- "keywords": an array of up to 30 short, commercially valuable keywords
- "seoTitle": an optimized title tag (50-60 characters)
- "metaDescription": a conversion-optimized meta description (150-160 characters)
- "longTailKeywords": an array of up to 15 specific long-tail keywords
- "productFeatures": an array of 10 features mapped to user benefits
- "targetAudience": an array of 7 buyer persona descriptions
- "seoRecommendations": an array of 8 actionable SEO recommendations
- "competitorAnalysis": a short competitive landscape summary
- "contentIdeas": an array of 5 content marketing ideas
- "ecommerceKeywords": an object with "amazon", "flipkart", "meesho" and "myntra" keys, each an array of 10 platform-specific keywords
- "combinedKeywords": an array of up to 50 diverse keywords across the purchase funnel

Create diverse keyword patterns, use natural language real users would search for, and
prioritize keywords with genuine commercial intent. ONLY return the JSON object, with no
additional text and no markdown fences."#;

/// System prompt for standalone keyword suggestion.
pub const KEYWORD_SUGGESTION_SYSTEM_PROMPT: &str = "You are an e-commerce SEO strategist. You \
    respond with a single JSON array of strings and nothing else.";

/// User prompt template for standalone keyword suggestion.
///
/// Placeholders: `{product_name}`, `{description_part}`
pub const KEYWORD_SUGGESTION_USER_PROMPT: &str = r#"Generate 10 diverse, commercially valuable SEO keywords for the following product:

Product Name: {product_name}
{description_part}

Include core product terms with qualifying modifiers, feature and benefit terms,
audience-specific terms, and purchase intent terms. Vary the word order and phrasing to
cover different search patterns.

Return ONLY a JSON array of strings, with no additional text."#;

/// Fills the package prompt template.
pub fn seo_package_user_prompt(product_name: &str, description: Option<&str>) -> String {
    SEO_PACKAGE_USER_PROMPT
        .replace("{product_name}", product_name)
        .replace("{description_part}", &description_part(description))
}

/// Fills the suggestion prompt template.
pub fn keyword_suggestion_user_prompt(product_name: &str, description: Option<&str>) -> String {
    KEYWORD_SUGGESTION_USER_PROMPT
        .replace("{product_name}", product_name)
        .replace("{description_part}", &description_part(description))
}

fn description_part(description: Option<&str>) -> String {
    match description {
        Some(d) if !d.trim().is_empty() => format!("Product Description: {d}"),
        _ => "Generate based only on the product name".to_string(),
    }
}
