//! # Template Keyword Synthesis
//!
//! Deterministic, offline keyword and package generation. Everything here is
//! a pure function of the product name plus any scraped keyword seeds, so the
//! pipeline always has a usable baseline even when the remote provider is
//! unavailable.

use crate::types::{EcommerceKeywords, SeoPackage};

/// Maximum short-tail keywords returned per generation.
pub const SHORT_TAIL_CAP: usize = 30;

/// Maximum long-tail keywords returned per generation.
pub const LONG_TAIL_CAP: usize = 40;

/// Maximum combined keywords returned per generation.
pub const COMBINED_CAP: usize = 50;

/// Modifiers prepended to the product name for short-tail combinations.
/// The leading empty entry keeps the bare product name in the output.
const SHORT_TAIL_MODIFIERS: &[&str] = &[
    "",
    "best",
    "top",
    "new",
    "popular",
    "quality",
    "premium",
    "affordable",
    "cheap",
    "discount",
    "sale",
    "wholesale",
    "bulk",
    "custom",
    "personalized",
    "trending",
    "viral",
    "must-have",
    "essential",
    "unique",
];

const SHORT_TAIL_CATEGORIES: &[&str] = &[
    "",
    "for kids",
    "for children",
    "for toddlers",
    "for babies",
    "for adults",
    "for family",
    "for home",
    "for school",
    "for office",
    "for travel",
    "for outdoor",
    "for indoor",
    "for learning",
    "for education",
    "for beginners",
    "for professionals",
    "for students",
    "for teachers",
    "for parents",
];

const LONG_TAIL_ADJECTIVES: &[&str] = &[
    "best",
    "top-rated",
    "high-quality",
    "premium",
    "affordable",
    "durable",
    "eco-friendly",
    "non-toxic",
    "washable",
    "safe",
    "educational",
    "interactive",
    "engaging",
    "fun",
    "creative",
    "innovative",
    "sustainable",
    "reusable",
    "portable",
    "lightweight",
];

const LONG_TAIL_PURPOSES: &[&str] = &[
    "for learning",
    "for education",
    "for development",
    "for training",
    "for practice",
    "for improvement",
    "for enhancement",
    "for growth",
    "for skill building",
    "for knowledge",
    "for creativity",
    "for imagination",
    "for problem solving",
    "for critical thinking",
    "for motor skills",
    "for cognitive development",
    "for social skills",
    "for emotional intelligence",
    "for STEM learning",
    "for language development",
];

const LONG_TAIL_FEATURES: &[&str] = &[
    "with pictures",
    "with illustrations",
    "with storage box",
    "with carrying case",
    "with instructions",
    "with guide",
    "with manual",
    "with accessories",
    "with bonus items",
    "with extra features",
    "with multiple colors",
    "with different sizes",
    "with easy setup",
    "with quick assembly",
    "with safety features",
    "with educational content",
    "with interactive elements",
    "with sound effects",
    "with light effects",
    "with motion sensors",
];

const LONG_TAIL_AGE_GROUPS: &[&str] = &[
    "for toddlers",
    "for preschoolers",
    "for kindergarten",
    "for elementary",
    "for middle school",
    "for high school",
    "for college",
    "for adults",
    "for all ages",
    "for beginners",
    "for advanced learners",
    "for special needs",
    "for gifted children",
    "for early childhood",
    "for primary school",
    "for secondary school",
    "for university students",
    "for professionals",
    "for teachers",
    "for parents",
];

/// Deduplicates keywords case-insensitively, preserving first-seen order.
/// Entries are trimmed and lowercased; empties are dropped.
pub fn dedupe_keywords<I>(keywords: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for keyword in keywords {
        let normalized = keyword.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            continue;
        }
        if seen.insert(normalized.clone()) {
            out.push(normalized);
        }
    }
    out
}

/// Generates up to [`SHORT_TAIL_CAP`] short-tail keywords.
///
/// Scraped seeds of three words or fewer come first, then modifier and
/// category combinations around the product name.
pub fn short_tail_keywords(product_name: &str, scraped: &[String]) -> Vec<String> {
    let product = product_name.trim().to_lowercase();
    let mut candidates: Vec<String> = scraped
        .iter()
        .filter(|k| k.split_whitespace().count() <= 3)
        .cloned()
        .collect();

    for modifier in SHORT_TAIL_MODIFIERS {
        for category in SHORT_TAIL_CATEGORIES {
            let keyword = match (modifier.is_empty(), category.is_empty()) {
                (false, false) => format!("{modifier} {product} {category}"),
                (false, true) => format!("{modifier} {product}"),
                (true, false) => format!("{product} {category}"),
                (true, true) => product.clone(),
            };
            candidates.push(keyword);
        }
    }

    let mut keywords = dedupe_keywords(candidates);
    keywords.truncate(SHORT_TAIL_CAP);
    keywords
}

/// Generates up to [`LONG_TAIL_CAP`] long-tail keywords.
///
/// Scraped seeds of more than three words come first, then adjective,
/// purpose, feature and age-group combinations.
pub fn long_tail_keywords(product_name: &str, scraped: &[String]) -> Vec<String> {
    let product = product_name.trim().to_lowercase();
    let mut candidates: Vec<String> = scraped
        .iter()
        .filter(|k| k.split_whitespace().count() > 3)
        .cloned()
        .collect();

    // The full cross product is enormous; stop collecting once the cap is
    // comfortably covered so generation stays cheap.
    'outer: for adjective in LONG_TAIL_ADJECTIVES {
        for purpose in LONG_TAIL_PURPOSES {
            for feature in LONG_TAIL_FEATURES {
                for age in LONG_TAIL_AGE_GROUPS {
                    candidates.push(format!("{adjective} {product} {purpose} {feature} {age}"));
                    if candidates.len() >= LONG_TAIL_CAP * 2 {
                        break 'outer;
                    }
                }
            }
        }
    }

    let mut keywords = dedupe_keywords(candidates);
    keywords.truncate(LONG_TAIL_CAP);
    keywords
}

/// Marketplace-specific keyword buckets built around platform shopping
/// vocabulary (delivery, EMI, wholesale, fashion).
pub fn platform_keywords(product_name: &str) -> EcommerceKeywords {
    let p = product_name.trim().to_lowercase();
    EcommerceKeywords {
        amazon: vec![
            format!("best selling {p}"),
            format!("{p} with prime delivery"),
            format!("top rated {p}"),
            format!("{p} best seller"),
            format!("premium {p}"),
            format!("affordable {p}"),
            format!("{p} with warranty"),
            format!("{p} with free shipping"),
            format!("{p} gift"),
            format!("{p} bundle"),
        ],
        flipkart: vec![
            format!("{p} lowest price"),
            format!("{p} with no cost EMI"),
            format!("best {p} flipkart"),
            format!("{p} with exchange offer"),
            format!("{p} big discount"),
            format!("{p} combo offer"),
            format!("{p} special edition"),
            format!("{p} latest model"),
            format!("{p} best deals"),
            format!("{p} all sizes"),
        ],
        meesho: vec![
            format!("{p} wholesale"),
            format!("{p} bulk order"),
            format!("cheap {p}"),
            format!("{p} reseller"),
            format!("{p} low price"),
            format!("{p} cash on delivery"),
            format!("{p} supplier"),
            format!("{p} manufacturer"),
            format!("{p} budget friendly"),
            format!("{p} best quality"),
        ],
        myntra: vec![
            format!("trendy {p}"),
            format!("{p} fashion"),
            format!("{p} new arrival"),
            format!("designer {p}"),
            format!("{p} for men"),
            format!("{p} for women"),
            format!("{p} premium collection"),
            format!("{p} latest collection"),
            format!("{p} best brands"),
            format!("{p} festival offer"),
        ],
    }
}

/// Unions the short-tail, long-tail and platform lists into one combined
/// list, capped at [`COMBINED_CAP`].
pub fn combine_keyword_fields(
    keywords: &[String],
    long_tail: &[String],
    platforms: &EcommerceKeywords,
) -> Vec<String> {
    let mut combined = dedupe_keywords(
        keywords
            .iter()
            .chain(long_tail)
            .chain(&platforms.amazon)
            .chain(&platforms.flipkart)
            .chain(&platforms.meesho)
            .chain(&platforms.myntra),
    );
    combined.truncate(COMBINED_CAP);
    combined
}

/// The combined keyword list for a product without scraped seeds.
pub fn combined_keywords(product_name: &str) -> Vec<String> {
    let platforms = platform_keywords(product_name);
    combine_keyword_fields(
        &short_tail_keywords(product_name, &[]),
        &long_tail_keywords(product_name, &[]),
        &platforms,
    )
}

/// Builds the full deterministic package for a product.
///
/// This is the baseline every synthesis starts from and the entire result
/// when no provider is configured.
pub fn template_package(product_name: &str, scraped: &[String]) -> SeoPackage {
    let name = product_name.trim();
    let keywords = short_tail_keywords(name, scraped);
    let long_tail = long_tail_keywords(name, scraped);
    let platforms = platform_keywords(name);
    let combined = combine_keyword_fields(&keywords, &long_tail, &platforms);
    SeoPackage {
        product_description: format!(
            "Introducing our premium {name}, designed with the utmost attention to quality \
             and functionality. This exceptional product combines reliable construction with \
             thoughtful design, making it a standout choice for discerning customers.\n\n\
             The {name} features an intuitive design that makes everyday use simple, even for \
             first-time buyers. Its modern aesthetic complements any environment, while its \
             compact form factor ensures it does not occupy unnecessary space.\n\n\
             What sets our {name} apart is its versatility. Whether you are using it at home, \
             in a professional setting, or on the go, it consistently delivers dependable \
             results. It comes with comprehensive customer support and a robust warranty, \
             reflecting our confidence in its longevity."
        ),
        keywords,
        seo_title: format!("Premium {name} | High-Quality, Affordable & Durable"),
        meta_description: format!(
            "Discover our exceptional {name} featuring premium design and unmatched \
             durability. Shop now for the best prices and free shipping!"
        ),
        long_tail_keywords: long_tail,
        product_features: vec![
            "Premium quality materials for exceptional durability".to_string(),
            "Intuitive interface for easy operation".to_string(),
            "Sleek, modern design that complements any environment".to_string(),
            "Space-saving compact form factor".to_string(),
            "Multiple usage settings for different environments".to_string(),
            "Energy-efficient operation".to_string(),
            "Quick setup and minimal maintenance required".to_string(),
            "Compatible with a wide range of accessories".to_string(),
            "Advanced technology for superior performance".to_string(),
            "Ergonomic design for comfortable use".to_string(),
        ],
        target_audience: vec![
            "Busy professionals seeking time-saving solutions".to_string(),
            "Home enthusiasts looking for quality products".to_string(),
            "First-time buyers who need user-friendly products".to_string(),
            "Tech-savvy consumers interested in modern features".to_string(),
            "Quality-conscious shoppers who value durability".to_string(),
            "Small business owners with professional needs".to_string(),
            "Elderly users who prefer easy-to-use products".to_string(),
        ],
        seo_recommendations: vec![
            "Create detailed product pages with comprehensive specifications".to_string(),
            "Develop a comparison chart with competitor products".to_string(),
            "Include high-quality images showcasing the product from multiple angles".to_string(),
            "Produce video demonstrations highlighting key features and benefits".to_string(),
            "Gather and showcase authentic customer reviews and testimonials".to_string(),
            "Create FAQ sections addressing common customer questions".to_string(),
            "Optimize for local search with \"near me\" keywords".to_string(),
            "Develop detailed how-to guides and tutorials for users".to_string(),
        ],
        competitor_analysis: format!(
            "The {name} market is currently dominated by established brands focusing on \
             premium features at higher price points. Most competitors emphasize technical \
             specifications but often overlook user experience, creating a gap in the market. \
             Budget options typically sacrifice durability for initial affordability.\n\n\
             Strategic opportunities exist in highlighting superior user experience, \
             maintenance simplicity, and long-term value. Addressing the consumer pain \
             points that competitors neglect differentiates this offering."
        ),
        content_ideas: vec![
            format!("\"The Complete Guide to Choosing Your First {name}\""),
            format!("\"10 Innovative Ways to Use Your {name} You Haven't Thought Of\""),
            format!("\"{name} Maintenance: Simple Tips to Double Its Lifespan\""),
            format!("\"How Our {name} Compares to Leading Brands: An Honest Review\""),
            format!("\"Expert Interview: The Technology Behind Modern {name} Design\""),
        ],
        ecommerce_keywords: platforms,
        combined_keywords: combined,
    }
}
