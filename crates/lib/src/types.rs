use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::providers::ai::AiProvider;
use crate::throttle::Throttler;

/// Default minimum spacing between upstream AI calls, in seconds.
pub const DEFAULT_MIN_REQUEST_INTERVAL_SECS: u64 = 35;

/// Default retry hint returned when the upstream reports quota exhaustion.
pub const DEFAULT_QUOTA_RETRY_SECS: u64 = 60;

/// A complete SEO content package for one product.
///
/// Field names follow the wire format consumed by downstream clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoPackage {
    pub product_description: String,
    pub keywords: Vec<String>,
    pub seo_title: String,
    pub meta_description: String,
    pub long_tail_keywords: Vec<String>,
    pub product_features: Vec<String>,
    pub target_audience: Vec<String>,
    pub seo_recommendations: Vec<String>,
    pub competitor_analysis: String,
    pub content_ideas: Vec<String>,
    pub ecommerce_keywords: EcommerceKeywords,
    pub combined_keywords: Vec<String>,
}

/// Marketplace-specific keyword buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcommerceKeywords {
    pub amazon: Vec<String>,
    pub flipkart: Vec<String>,
    pub meesho: Vec<String>,
    pub myntra: Vec<String>,
}

/// What happened to the remote enrichment leg of a synthesis run.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteStatus {
    /// No provider is configured; the package is purely template-built.
    Skipped,
    /// The remote package was parsed and merged over the template baseline.
    Merged,
    /// The remote responded but its payload was not a usable package.
    /// The raw text is kept for logging and diagnostics.
    ParseFailure(String),
    /// The upstream reported quota exhaustion; retry after the given delay.
    QuotaExceeded(u64),
    /// The call failed in transit.
    Transport(String),
}

/// The outcome of a synthesis run: the package plus how it was produced.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub package: SeoPackage,
    pub remote: RemoteStatus,
}

/// A client that builds SEO packages from a template baseline, optionally
/// enriched by a remote AI provider behind a request throttler.
pub struct SeoClient {
    pub(crate) ai_provider: Option<Box<dyn AiProvider>>,
    pub(crate) throttler: Throttler,
    pub(crate) quota_retry_secs: u64,
}

impl fmt::Debug for SeoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeoClient")
            .field("has_provider", &self.ai_provider.is_some())
            .field("throttler", &self.throttler)
            .finish_non_exhaustive()
    }
}

/// A builder for creating `SeoClient` instances.
#[derive(Default)]
pub struct SeoClientBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    min_request_interval: Option<Duration>,
    quota_retry_secs: Option<u64>,
}

impl SeoClientBuilder {
    /// Creates a new `SeoClientBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AI provider used for remote enrichment.
    ///
    /// Without a provider the client runs in template mode and every
    /// synthesis reports `RemoteStatus::Skipped`.
    pub fn ai_provider(mut self, provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    /// Sets the minimum spacing between upstream calls.
    pub fn min_request_interval(mut self, interval: Duration) -> Self {
        self.min_request_interval = Some(interval);
        self
    }

    /// Sets the retry hint handed back on quota exhaustion.
    pub fn quota_retry_secs(mut self, secs: u64) -> Self {
        self.quota_retry_secs = Some(secs);
        self
    }

    /// Builds the `SeoClient`.
    pub fn build(self) -> SeoClient {
        let interval = self
            .min_request_interval
            .unwrap_or(Duration::from_secs(DEFAULT_MIN_REQUEST_INTERVAL_SECS));
        SeoClient {
            ai_provider: self.ai_provider,
            throttler: Throttler::new(interval),
            quota_retry_secs: self.quota_retry_secs.unwrap_or(DEFAULT_QUOTA_RETRY_SECS),
        }
    }
}
