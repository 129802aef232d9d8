//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the
//! logic for building it at startup. The `AppState` holds the synthesis
//! client, the marketplace scraper, and the reply worker's job queue,
//! making them accessible to all request handlers.

use std::sync::Arc;
use std::time::Duration;

use seoforge::{
    providers::ai::{gemini::GeminiProvider, AiProvider},
    SeoClient, SeoClientBuilder,
};
use seoforge_scrape::{MarketplaceScraper, ScrapeEndpoints, DEFAULT_SCRAPE_TIMEOUT};
use tokio::sync::mpsc;
use tracing::info;

use crate::config::AppConfig;
use crate::whatsapp::{spawn_reply_worker, ReplyJob, WhatsAppClient};

/// Reply jobs waiting for the worker before webhook handlers start shedding.
const REPLY_QUEUE_DEPTH: usize = 64;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The synthesis client, throttled and optionally provider-backed.
    pub seo_client: Arc<SeoClient>,
    /// The marketplace scraper for competitor analysis.
    pub scraper: Arc<MarketplaceScraper>,
    /// Producer side of the reply worker queue. `None` when outbound
    /// WhatsApp messaging is not configured.
    pub reply_tx: Option<mpsc::Sender<ReplyJob>>,
}

/// Builds the shared application state from the configuration.
///
/// A placeholder Gemini key selects template mode instead of failing, so a
/// fresh checkout serves useful responses with zero credentials. When the
/// WhatsApp access token and phone number are present, the reply worker is
/// spawned here and its queue handle stored in the state.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let mut builder = SeoClientBuilder::new()
        .min_request_interval(Duration::from_secs(config.throttle.min_request_interval_secs))
        .quota_retry_secs(config.throttle.quota_retry_secs);

    if config.gemini.is_placeholder() {
        info!("Gemini API key is unset or a placeholder; running in template mode");
    } else {
        let provider: Box<dyn AiProvider> = Box::new(GeminiProvider::new(
            config.gemini.effective_api_url(),
            config.gemini.api_key.clone(),
        )?);
        builder = builder.ai_provider(provider);
    }
    let seo_client = Arc::new(builder.build());

    let mut endpoints = ScrapeEndpoints::default();
    if let Some(url) = &config.scrape.amazon_url {
        endpoints.amazon = url.clone();
    }
    if let Some(url) = &config.scrape.flipkart_url {
        endpoints.flipkart = url.clone();
    }
    if let Some(url) = &config.scrape.myntra_url {
        endpoints.myntra = url.clone();
    }
    if let Some(url) = &config.scrape.meesho_url {
        endpoints.meesho = url.clone();
    }
    let timeout = config
        .scrape
        .timeout_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_SCRAPE_TIMEOUT);
    let scraper = Arc::new(MarketplaceScraper::new(endpoints, timeout)?);

    let reply_tx = match (&config.whatsapp.access_token, &config.whatsapp.phone_number_id) {
        (Some(token), Some(phone_id)) => {
            let client = Arc::new(WhatsAppClient::new(
                config.whatsapp.api_url.clone(),
                token.clone(),
                phone_id.clone(),
            ));
            let (tx, rx) = mpsc::channel(REPLY_QUEUE_DEPTH);
            spawn_reply_worker(seo_client.clone(), client, rx);
            info!("WhatsApp reply worker started");
            Some(tx)
        }
        _ => {
            info!("WhatsApp credentials not configured; webhook replies disabled");
            None
        }
    };

    Ok(AppState {
        config: Arc::new(config),
        seo_client,
        scraper,
        reply_tx,
    })
}
