//! # SEO Content Synthesis
//!
//! This crate builds SEO content packages for e-commerce products. Every
//! synthesis starts from a deterministic template baseline; when an AI
//! provider is configured, a remote package is requested through a
//! rate-limiting throttler and merged over the baseline. Remote failures
//! never fail a synthesis, they only change how it was produced.

pub mod categorize;
pub mod errors;
pub mod extract;
pub mod prompts;
pub mod providers;
pub mod templates;
pub mod throttle;
pub mod types;

pub use errors::SeoError;
pub use throttle::Throttler;
pub use types::{
    EcommerceKeywords, RemoteStatus, SeoClient, SeoClientBuilder, SeoPackage, Synthesis,
};

use tracing::{debug, info, warn};

/// Number of keywords returned by [`SeoClient::suggest_keywords`].
pub const SUGGESTION_LIMIT: usize = 10;

impl SeoClient {
    /// Builds a complete SEO package for a product.
    ///
    /// The template baseline is always produced. With a provider configured,
    /// a remote package is requested through the throttler and merged over
    /// the baseline; any remote failure falls back to the baseline with the
    /// failure recorded in [`RemoteStatus`]. This method never fails.
    pub async fn synthesize(&self, product_name: &str, description: Option<&str>) -> Synthesis {
        let baseline = templates::template_package(product_name, &[]);

        let Some(provider) = &self.ai_provider else {
            info!(product = product_name, "No AI provider configured, template mode");
            return Synthesis {
                package: baseline,
                remote: RemoteStatus::Skipped,
            };
        };

        let provider = provider.clone();
        let system = prompts::SEO_PACKAGE_SYSTEM_PROMPT.to_string();
        let user = prompts::seo_package_user_prompt(product_name, description);
        let outcome = self
            .throttler
            .enqueue(async move { provider.generate(&system, &user).await })
            .await;

        let raw = match outcome {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) | Err(e) => {
                let remote = self.classify_failure(&e);
                warn!(product = product_name, error = %e, "Remote synthesis failed, using template package");
                return Synthesis {
                    package: baseline,
                    remote,
                };
            }
        };

        match extract::package_from_text(&raw) {
            Some(remote) => {
                debug!(product = product_name, "Merging remote package over template baseline");
                Synthesis {
                    package: merge_packages(baseline, remote),
                    remote: RemoteStatus::Merged,
                }
            }
            None => {
                warn!(
                    product = product_name,
                    response_len = raw.len(),
                    "Remote response was not a usable package"
                );
                Synthesis {
                    package: baseline,
                    remote: RemoteStatus::ParseFailure(raw),
                }
            }
        }
    }

    /// Suggests up to [`SUGGESTION_LIMIT`] keywords for a product.
    ///
    /// Unlike [`synthesize`](Self::synthesize), provider errors are surfaced
    /// to the caller, with quota exhaustion mapped to
    /// [`SeoError::QuotaExceeded`] carrying the configured retry hint.
    /// Without a provider the deterministic combined list is returned.
    pub async fn suggest_keywords(
        &self,
        product_name: &str,
        description: Option<&str>,
    ) -> Result<Vec<String>, SeoError> {
        let Some(provider) = &self.ai_provider else {
            let mut keywords = templates::combined_keywords(product_name);
            keywords.truncate(SUGGESTION_LIMIT);
            return Ok(keywords);
        };

        let provider = provider.clone();
        let system = prompts::KEYWORD_SUGGESTION_SYSTEM_PROMPT.to_string();
        let user = prompts::keyword_suggestion_user_prompt(product_name, description);
        let raw = match self
            .throttler
            .enqueue(async move { provider.generate(&system, &user).await })
            .await
        {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) | Err(e) => {
                if let RemoteStatus::QuotaExceeded(secs) = self.classify_failure(&e) {
                    return Err(SeoError::QuotaExceeded {
                        retry_after_secs: secs,
                    });
                }
                return Err(e);
            }
        };

        let keywords = extract::keyword_list_from_text(&raw, SUGGESTION_LIMIT);
        if keywords.is_empty() {
            return Err(SeoError::UnparsableResponse);
        }
        Ok(keywords)
    }

    fn classify_failure(&self, error: &SeoError) -> RemoteStatus {
        let message = error.to_string();
        if extract::is_quota_error(&message) {
            RemoteStatus::QuotaExceeded(self.quota_retry_secs)
        } else {
            RemoteStatus::Transport(message)
        }
    }
}

/// Merges a remote package over the template baseline.
///
/// Keyword fields are unioned case-insensitively with the template entries
/// first; narrative fields take the remote value when it is non-empty.
fn merge_packages(template: SeoPackage, remote: SeoPackage) -> SeoPackage {
    fn union(template: Vec<String>, remote: Vec<String>) -> Vec<String> {
        templates::dedupe_keywords(template.into_iter().chain(remote))
    }
    fn prefer_remote(template: String, remote: String) -> String {
        if remote.trim().is_empty() {
            template
        } else {
            remote
        }
    }
    fn prefer_remote_list(template: Vec<String>, remote: Vec<String>) -> Vec<String> {
        if remote.is_empty() {
            template
        } else {
            remote
        }
    }

    // Generation caps apply to the template expansion only; the short and
    // long tail unions may exceed them by the remote additions.
    let keywords = union(template.keywords, remote.keywords);
    let long_tail = union(template.long_tail_keywords, remote.long_tail_keywords);
    let mut combined = union(template.combined_keywords, remote.combined_keywords);
    combined.truncate(templates::COMBINED_CAP);

    SeoPackage {
        product_description: prefer_remote(template.product_description, remote.product_description),
        keywords,
        seo_title: prefer_remote(template.seo_title, remote.seo_title),
        meta_description: prefer_remote(template.meta_description, remote.meta_description),
        long_tail_keywords: long_tail,
        product_features: prefer_remote_list(template.product_features, remote.product_features),
        target_audience: prefer_remote_list(template.target_audience, remote.target_audience),
        seo_recommendations: prefer_remote_list(
            template.seo_recommendations,
            remote.seo_recommendations,
        ),
        competitor_analysis: prefer_remote(template.competitor_analysis, remote.competitor_analysis),
        content_ideas: prefer_remote_list(template.content_ideas, remote.content_ideas),
        ecommerce_keywords: EcommerceKeywords {
            amazon: union(template.ecommerce_keywords.amazon, remote.ecommerce_keywords.amazon),
            flipkart: union(
                template.ecommerce_keywords.flipkart,
                remote.ecommerce_keywords.flipkart,
            ),
            meesho: union(template.ecommerce_keywords.meesho, remote.ecommerce_keywords.meesho),
            myntra: union(template.ecommerce_keywords.myntra, remote.ecommerce_keywords.myntra),
        },
        combined_keywords: combined,
    }
}
