//! # WhatsApp Outbound Messaging
//!
//! The client for the WhatsApp Business Cloud API and the background worker
//! that turns incoming product names into formatted SEO reports. The worker
//! consumes jobs from an mpsc channel so webhook handlers can acknowledge
//! immediately.

use std::sync::Arc;

use seoforge::{SeoClient, SeoPackage};
use serde_json::json;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// One queued reply: who asked, and for which product.
#[derive(Debug, Clone)]
pub struct ReplyJob {
    pub to: String,
    pub product: String,
}

/// A client for sending text messages through the WhatsApp Business API.
#[derive(Clone)]
pub struct WhatsAppClient {
    client: reqwest::Client,
    api_url: String,
    access_token: String,
    phone_number_id: String,
}

impl WhatsAppClient {
    pub fn new(api_url: String, access_token: String, phone_number_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token,
            phone_number_id,
        }
    }

    /// Sends a plain text message. A non-success status fails the attempt;
    /// there is no retry.
    pub async fn send_text(&self, to: &str, body: &str) -> anyhow::Result<()> {
        let url = format!("{}/{}/messages", self.api_url, self.phone_number_id);
        let payload = json!({
            "messaging_product": "whatsapp",
            "to": to,
            "type": "text",
            "text": { "body": body },
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("WhatsApp send failed with status {status}: {body}");
        }
        Ok(())
    }
}

/// Spawns the reply worker task.
///
/// The worker synthesizes a package per job, formats the report, and sends
/// it. Failures are logged; when sending the report fails an apology is
/// attempted so the user is not left waiting silently.
pub fn spawn_reply_worker(
    seo_client: Arc<SeoClient>,
    whatsapp: Arc<WhatsAppClient>,
    mut jobs: mpsc::Receiver<ReplyJob>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(job) = jobs.recv().await {
            info!(to = %job.to, product = %job.product, "Processing WhatsApp reply");
            let synthesis = seo_client.synthesize(&job.product, None).await;
            let report = format_seo_reply(&synthesis.package);

            if let Err(e) = whatsapp.send_text(&job.to, &report).await {
                error!(to = %job.to, error = %e, "Failed to send WhatsApp reply");
                let apology = "Sorry, I encountered an error while processing your request. \
                    Please try again later.";
                if let Err(e) = whatsapp.send_text(&job.to, apology).await {
                    error!(to = %job.to, error = %e, "Failed to send apology message");
                }
            }
        }
        info!("Reply worker shutting down, job channel closed");
    })
}

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {item}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats a package as the sectioned WhatsApp text report.
pub fn format_seo_reply(package: &SeoPackage) -> String {
    let keywords: Vec<String> = package.keywords.iter().take(15).cloned().collect();

    format!(
        "\u{1f50d} *SEO-Optimized Content*\n\n\
         *Title:*\n{title}\n\n\
         *Meta Description:*\n{meta}\n\n\
         *Product Description:*\n{description}\n\n\
         *Keywords:*\n{keywords}\n\n\
         *Long-Tail Keywords:*\n{long_tail}\n\n\
         *Key Features:*\n{features}\n\n\
         *Target Audience:*\n{audience}\n\n\
         *SEO Recommendations:*\n{recommendations}\n\n\
         *Competitor Analysis:*\n{competitors}\n\n\
         *Content Ideas:*\n{ideas}\n\n\
         \u{1f4a1} *Tips:*\n\
         \u{2022} Use these keywords in your product title and description\n\
         \u{2022} Include keywords in image alt text\n\
         \u{2022} Use keywords in product URLs\n\
         \u{2022} Add keywords to product tags and categories\n\
         \u{2022} Create content based on the suggested ideas",
        title = package.seo_title,
        meta = package.meta_description,
        description = package.product_description,
        keywords = numbered(&keywords),
        long_tail = numbered(&package.long_tail_keywords),
        features = numbered(&package.product_features),
        audience = numbered(&package.target_audience),
        recommendations = numbered(&package.seo_recommendations),
        competitors = package.competitor_analysis,
        ideas = numbered(&package.content_ideas),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use seoforge::templates::template_package;

    #[test]
    fn test_reply_contains_every_section() {
        let package = template_package("yoga mat", &[]);
        let reply = format_seo_reply(&package);

        for section in [
            "*Title:*",
            "*Meta Description:*",
            "*Product Description:*",
            "*Keywords:*",
            "*Long-Tail Keywords:*",
            "*Key Features:*",
            "*Target Audience:*",
            "*SEO Recommendations:*",
            "*Competitor Analysis:*",
            "*Content Ideas:*",
            "*Tips:*",
        ] {
            assert!(reply.contains(section), "missing section {section}");
        }
        assert!(reply.contains("1. yoga mat"));
    }

    #[test]
    fn test_keywords_section_is_capped_at_fifteen() {
        let package = template_package("yoga mat", &[]);
        let reply = format_seo_reply(&package);

        let keywords_section = reply
            .split("*Keywords:*\n")
            .nth(1)
            .and_then(|rest| rest.split("\n\n").next())
            .expect("keywords section exists");
        assert_eq!(keywords_section.lines().count(), 15);
        assert!(!keywords_section.contains("16."));
    }
}
