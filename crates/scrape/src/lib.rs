//! # seoforge-scrape: Marketplace Competitor Scraping
//!
//! This crate fetches search result pages from e-commerce marketplaces and
//! extracts lightweight product data (title, price, rating, review count)
//! for competitor analysis and keyword seeding. Every platform is scraped
//! best-effort: a platform that fails or times out contributes nothing
//! instead of failing the whole run.

use std::collections::HashSet;
use std::time::Duration;

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

/// Browser-like User-Agent; marketplaces serve stripped pages to obvious bots.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Product cards read per platform.
const PRODUCTS_PER_PLATFORM: usize = 5;

/// Default per-platform scrape deadline.
pub const DEFAULT_SCRAPE_TIMEOUT: Duration = Duration::from_millis(5000);

// --- Error Definitions ---

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Failed to build Reqwest client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Failed to fetch page: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Search URL is invalid: {0}")]
    Url(#[from] url::ParseError),
    #[error("CSS selector failed to parse: {0}")]
    Selector(String),
    #[error("Platform responded with status {0}")]
    BadStatus(u16),
}

// --- Data Structures ---

/// A marketplace platform with known search URL and page structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Amazon,
    Flipkart,
    Myntra,
    Meesho,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Amazon => "Amazon",
            Platform::Flipkart => "Flipkart",
            Platform::Myntra => "Myntra",
            Platform::Meesho => "Meesho",
        }
    }
}

/// One product card lifted from a search results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrapedProduct {
    pub title: String,
    pub price: Option<String>,
    pub rating: Option<String>,
    pub reviews: Option<String>,
    pub platform: String,
}

impl Default for ScrapedProduct {
    fn default() -> Self {
        Self {
            title: String::new(),
            price: None,
            rating: None,
            reviews: None,
            platform: String::new(),
        }
    }
}

/// Per-platform product counts in one competitor run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformCounts {
    pub amazon: usize,
    pub flipkart: usize,
    pub myntra: usize,
    pub meesho: usize,
}

/// Aggregate statistics over all scraped products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorAnalysis {
    pub total_products: usize,
    pub average_price: Option<f64>,
    pub average_rating: Option<f64>,
    pub platforms: PlatformCounts,
}

/// The full outcome of one competitor scrape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitorData {
    pub products: Vec<ScrapedProduct>,
    pub keywords: Vec<String>,
    pub analysis: CompetitorAnalysis,
}

/// Base URLs per platform, overridable so tests can point at a local server.
#[derive(Debug, Clone)]
pub struct ScrapeEndpoints {
    pub amazon: String,
    pub flipkart: String,
    pub myntra: String,
    pub meesho: String,
}

impl Default for ScrapeEndpoints {
    fn default() -> Self {
        Self {
            amazon: "https://www.amazon.com".to_string(),
            flipkart: "https://www.flipkart.com".to_string(),
            myntra: "https://www.myntra.com".to_string(),
            meesho: "https://www.meesho.com".to_string(),
        }
    }
}

// --- Scraper ---

/// Scrapes marketplace search pages for competitor products.
pub struct MarketplaceScraper {
    client: reqwest::Client,
    endpoints: ScrapeEndpoints,
    timeout: Duration,
}

impl MarketplaceScraper {
    pub fn new(endpoints: ScrapeEndpoints, timeout: Duration) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ScrapeError::ClientBuild)?;
        Ok(Self {
            client,
            endpoints,
            timeout,
        })
    }

    /// Scrapes all platforms concurrently and aggregates the results.
    ///
    /// Each platform races its own deadline; failures and timeouts yield an
    /// empty contribution. This method itself never fails.
    pub async fn scrape_competitors(&self, product_name: &str) -> CompetitorData {
        info!(product = product_name, "Starting competitor scrape");

        let (amazon, flipkart, myntra, meesho) = tokio::join!(
            self.platform_or_empty(Platform::Amazon, product_name),
            self.platform_or_empty(Platform::Flipkart, product_name),
            self.platform_or_empty(Platform::Myntra, product_name),
            self.platform_or_empty(Platform::Meesho, product_name),
        );

        let counts = PlatformCounts {
            amazon: amazon.len(),
            flipkart: flipkart.len(),
            myntra: myntra.len(),
            meesho: meesho.len(),
        };

        let products: Vec<ScrapedProduct> = amazon
            .into_iter()
            .chain(flipkart)
            .chain(myntra)
            .chain(meesho)
            .collect();

        info!(total = products.len(), "Competitor scrape finished");

        let keywords = extract_keywords(&products);
        let analysis = analyze(&products, counts);

        CompetitorData {
            products,
            keywords,
            analysis,
        }
    }

    async fn platform_or_empty(&self, platform: Platform, product_name: &str) -> Vec<ScrapedProduct> {
        match tokio::time::timeout(self.timeout, self.scrape_platform(platform, product_name)).await
        {
            Ok(Ok(products)) => {
                debug!(platform = platform.as_str(), count = products.len(), "Platform scraped");
                products
            }
            Ok(Err(e)) => {
                warn!(platform = platform.as_str(), error = %e, "Platform scrape failed");
                Vec::new()
            }
            Err(_) => {
                warn!(
                    platform = platform.as_str(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Platform scrape timed out"
                );
                Vec::new()
            }
        }
    }

    /// Fetches and parses one platform's search results page.
    pub async fn scrape_platform(
        &self,
        platform: Platform,
        product_name: &str,
    ) -> Result<Vec<ScrapedProduct>, ScrapeError> {
        let url = self.search_url(platform, product_name)?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ScrapeError::BadStatus(response.status().as_u16()));
        }
        let body = response.text().await?;

        match platform {
            Platform::Amazon => parse_amazon(&body),
            Platform::Flipkart => parse_flipkart(&body),
            Platform::Myntra => parse_myntra(&body),
            Platform::Meesho => parse_meesho(&body),
        }
    }

    fn search_url(&self, platform: Platform, product_name: &str) -> Result<Url, ScrapeError> {
        let url = match platform {
            Platform::Amazon => {
                let mut url = Url::parse(&self.endpoints.amazon)?.join("/s")?;
                url.query_pairs_mut().append_pair("k", product_name);
                url
            }
            Platform::Flipkart => {
                let mut url = Url::parse(&self.endpoints.flipkart)?.join("/search")?;
                url.query_pairs_mut().append_pair("q", product_name);
                url
            }
            Platform::Myntra => Url::parse(&self.endpoints.myntra)?.join(product_name)?,
            Platform::Meesho => {
                let mut url = Url::parse(&self.endpoints.meesho)?.join("/search")?;
                url.query_pairs_mut().append_pair("q", product_name);
                url
            }
        };
        Ok(url)
    }
}

// --- Page Parsers ---
//
// Selectors mirror each marketplace's current listing markup. They break when
// the sites redesign; the per-platform fallback keeps that from being fatal.

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(e.to_string()))
}

fn parse_amazon(body: &str) -> Result<Vec<ScrapedProduct>, ScrapeError> {
    let document = Html::parse_document(body);
    let card = selector(".s-result-item")?;
    let title = selector("h2 a span")?;
    let price = selector(".a-price .a-offscreen")?;
    let rating = selector(".a-icon-star-small .a-icon-alt")?;
    let reviews = selector(".a-size-small .a-link-normal")?;

    Ok(document
        .select(&card)
        .take(PRODUCTS_PER_PLATFORM)
        .filter_map(|element| {
            let title = text_of(&element, &title)?;
            Some(ScrapedProduct {
                title,
                price: text_of(&element, &price),
                rating: text_of(&element, &rating),
                reviews: text_of(&element, &reviews),
                platform: Platform::Amazon.as_str().to_string(),
            })
        })
        .collect())
}

fn parse_flipkart(body: &str) -> Result<Vec<ScrapedProduct>, ScrapeError> {
    let document = Html::parse_document(body);
    let card = selector("._1AtVbE")?;
    let title = selector("._4rR01T")?;
    let price = selector("._30jeq3")?;
    let rating = selector("._3LWZlK")?;
    let reviews = selector("._2_R_DZ span")?;

    Ok(document
        .select(&card)
        .take(PRODUCTS_PER_PLATFORM)
        .filter_map(|element| {
            let title = text_of(&element, &title)?;
            Some(ScrapedProduct {
                title,
                price: text_of(&element, &price),
                rating: text_of(&element, &rating),
                reviews: text_of(&element, &reviews),
                platform: Platform::Flipkart.as_str().to_string(),
            })
        })
        .collect())
}

fn parse_myntra(body: &str) -> Result<Vec<ScrapedProduct>, ScrapeError> {
    let document = Html::parse_document(body);
    let card = selector(".product-base")?;
    let title = selector(".product-product")?;
    let price = selector(".product-discountedPrice")?;
    let rating = selector(".product-ratingsContainer")?;

    Ok(document
        .select(&card)
        .take(PRODUCTS_PER_PLATFORM)
        .filter_map(|element| {
            let title = text_of(&element, &title)?;
            Some(ScrapedProduct {
                title,
                price: text_of(&element, &price),
                rating: text_of(&element, &rating),
                reviews: None,
                platform: Platform::Myntra.as_str().to_string(),
            })
        })
        .collect())
}

fn parse_meesho(body: &str) -> Result<Vec<ScrapedProduct>, ScrapeError> {
    let document = Html::parse_document(body);
    let card = selector(".ProductList__GridCol-sc-8lnc8s-0")?;
    let title = selector(".ProductCard__Title-sc-8lnc8s-4")?;
    let price = selector(".ProductCard__Price-sc-8lnc8s-6")?;

    Ok(document
        .select(&card)
        .take(PRODUCTS_PER_PLATFORM)
        .filter_map(|element| {
            let title = text_of(&element, &title)?;
            Some(ScrapedProduct {
                title,
                price: text_of(&element, &price),
                rating: None,
                reviews: None,
                platform: Platform::Meesho.as_str().to_string(),
            })
        })
        .collect())
}

/// Joined, trimmed text of the first descendant matching `selector`.
/// `None` when there is no match or the text is empty.
fn text_of(element: &scraper::ElementRef, selector: &Selector) -> Option<String> {
    let text: String = element
        .select(selector)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

// --- Aggregation ---

/// Extracts seed keywords from product titles: every word longer than two
/// characters plus the full lowercased title.
pub fn extract_keywords(products: &[ScrapedProduct]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();
    for product in products {
        let lowered = product.title.to_lowercase();
        for word in lowered.split_whitespace() {
            if word.len() > 2 && seen.insert(word.to_string()) {
                keywords.push(word.to_string());
            }
        }
        if seen.insert(lowered.clone()) {
            keywords.push(lowered);
        }
    }
    keywords
}

/// Computes aggregate price and rating statistics over scraped products.
pub fn analyze(products: &[ScrapedProduct], platforms: PlatformCounts) -> CompetitorAnalysis {
    let prices: Vec<f64> = products
        .iter()
        .filter_map(|p| p.price.as_deref())
        .filter_map(parse_price)
        .collect();
    let ratings: Vec<f64> = products
        .iter()
        .filter_map(|p| p.rating.as_deref())
        .filter_map(parse_rating)
        .collect();

    CompetitorAnalysis {
        total_products: products.len(),
        average_price: mean(&prices),
        average_rating: mean(&ratings),
        platforms,
    }
}

/// Parses a display price like "₹1,299" or "$24.99" by keeping digits and dots.
fn parse_price(display: &str) -> Option<f64> {
    let digits: String = display.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    digits.parse().ok()
}

/// Parses a rating like "4.3 out of 5 stars" from its leading token.
fn parse_rating(display: &str) -> Option<f64> {
    display.split_whitespace().next()?.parse().ok()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
