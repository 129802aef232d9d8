//! Request and response payloads for the HTTP API, plus the WhatsApp
//! webhook wire format. Everything inbound is lenient: unknown fields are
//! ignored and missing ones default, since Meta's payloads evolve.

use seoforge_scrape::{PlatformCounts, ScrapedProduct};
use serde::{Deserialize, Serialize};

// --- Generation API ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub product_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordsRequest {
    pub product_name: String,
}

/// Response for `/keywords`: generated keyword pools plus a competitor
/// snapshot from the marketplace scrape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordsResponse {
    pub short_tail_keywords: Vec<String>,
    pub long_tail_keywords: Vec<String>,
    pub total_keywords: usize,
    pub competitor_analysis: CompetitorReport,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorReport {
    pub total_products: usize,
    pub average_price: Option<f64>,
    pub average_rating: Option<f64>,
    pub platforms: PlatformCounts,
    pub top_products: Vec<ScrapedProduct>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRequest {
    pub product_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub keywords: Vec<String>,
}

// --- WhatsApp webhook wire format ---

#[derive(Debug, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookEntry {
    #[serde(default)]
    pub changes: Vec<WebhookChange>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookChange {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub value: WebhookValue,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookValue {
    #[serde(default)]
    pub messages: Vec<IncomingMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub from: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<TextBody>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TextBody {
    #[serde(default)]
    pub body: String,
}
