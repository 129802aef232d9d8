//! # API Handlers
//!
//! Axum handler functions for the HTTP API and the WhatsApp webhook.
//! Handlers are thin: they validate input, call into the synthesis or
//! scrape crates, and map outcomes onto `AppError`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use seoforge::{
    templates::{long_tail_keywords, short_tail_keywords},
    RemoteStatus, SeoPackage,
};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::state::AppState;
use crate::types::{
    CompetitorReport, GenerateRequest, KeywordsRequest, KeywordsResponse, SuggestRequest,
    SuggestResponse, WebhookPayload,
};
use crate::whatsapp::ReplyJob;

const TOP_PRODUCTS: usize = 5;

/// Handler for the root path providing a welcome message.
pub async fn root_handler() -> &'static str {
    "seoforge server is running."
}

/// Handler for the `/health` endpoint for liveness checks.
pub async fn health_handler() -> &'static str {
    "OK"
}

/// Handler for `/generate`: builds a full SEO package for one product.
///
/// Quota exhaustion upstream is surfaced as HTTP 429 with a retry hint;
/// every other remote failure falls back to the template package and
/// still returns 200.
pub async fn generate_handler(
    State(state): State<AppState>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<SeoPackage>, AppError> {
    let product_name = payload.product_name.trim();
    if product_name.is_empty() {
        return Err(AppError::BadRequest("productName must not be empty".into()));
    }
    info!(product = product_name, "Received generate request");

    let synthesis = state
        .seo_client
        .synthesize(product_name, payload.description.as_deref())
        .await;

    if let RemoteStatus::QuotaExceeded(retry_after_secs) = synthesis.remote {
        return Err(AppError::Quota { retry_after_secs });
    }

    Ok(Json(synthesis.package))
}

/// Handler for `/keywords`: scrapes marketplaces for the product and
/// expands the scraped titles into short and long tail keyword pools.
pub async fn keywords_handler(
    State(state): State<AppState>,
    Json(payload): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    let product_name = payload.product_name.trim();
    if product_name.is_empty() {
        return Err(AppError::BadRequest("productName must not be empty".into()));
    }
    info!(product = product_name, "Received keywords request");

    let data = state.scraper.scrape_competitors(product_name).await;

    let short_tail = short_tail_keywords(product_name, &data.keywords);
    let long_tail = long_tail_keywords(product_name, &data.keywords);
    let total_keywords = short_tail.len() + long_tail.len();

    let top_products = data.products.iter().take(TOP_PRODUCTS).cloned().collect();

    Ok(Json(KeywordsResponse {
        short_tail_keywords: short_tail,
        long_tail_keywords: long_tail,
        total_keywords,
        competitor_analysis: CompetitorReport {
            total_products: data.analysis.total_products,
            average_price: data.analysis.average_price,
            average_rating: data.analysis.average_rating,
            platforms: data.analysis.platforms,
            top_products,
        },
    }))
}

/// Handler for `/suggest`: a small list of additional keyword ideas.
pub async fn suggest_handler(
    State(state): State<AppState>,
    Json(payload): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    let product_name = payload.product_name.trim();
    if product_name.is_empty() {
        return Err(AppError::BadRequest("productName must not be empty".into()));
    }
    info!(product = product_name, "Received suggest request");

    let keywords = state
        .seo_client
        .suggest_keywords(product_name, payload.description.as_deref())
        .await?;

    Ok(Json(SuggestResponse { keywords }))
}

/// Handler for webhook verification (`GET /webhook`).
///
/// Meta sends `hub.mode`, `hub.verify_token` and `hub.challenge`; on a
/// token match the challenge is echoed back verbatim with 200.
pub async fn webhook_verify_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mode = params.get("hub.mode");
    let token = params.get("hub.verify_token");
    let challenge = params.get("hub.challenge");

    match (mode, token, challenge) {
        (Some(mode), Some(token), Some(challenge)) if mode == "subscribe" => {
            let expected = state.config.whatsapp.verify_token.as_deref();
            if expected == Some(token.as_str()) {
                info!("Webhook verified");
                (StatusCode::OK, challenge.clone()).into_response()
            } else {
                warn!("Webhook verification failed: token mismatch");
                StatusCode::FORBIDDEN.into_response()
            }
        }
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

/// Handler for inbound WhatsApp notifications (`POST /webhook`).
///
/// Acknowledges with 200 immediately and hands each text message to the
/// reply worker; the synthesis happens after the HTTP response is sent.
pub async fn webhook_receive_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Response {
    let payload: WebhookPayload = match serde_json::from_value(body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Rejecting malformed webhook payload");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    if payload.object != "whatsapp_business_account" {
        return StatusCode::NOT_FOUND.into_response();
    }

    for entry in payload.entry {
        for change in entry.changes {
            if change.field != "messages" {
                continue;
            }
            for message in change.value.messages {
                if message.kind != "text" {
                    continue;
                }
                let Some(text) = message.text else { continue };
                let product = text.body.trim().to_string();
                if product.is_empty() {
                    continue;
                }
                info!(from = %message.from, product = %product, "Queueing WhatsApp reply");
                match &state.reply_tx {
                    Some(tx) => {
                        if let Err(e) = tx.try_send(ReplyJob {
                            to: message.from.clone(),
                            product,
                        }) {
                            warn!(error = %e, "Reply queue full, dropping message");
                        }
                    }
                    None => {
                        warn!("WhatsApp sending not configured, dropping message");
                    }
                }
            }
        }
    }

    StatusCode::OK.into_response()
}
