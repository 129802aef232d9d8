use thiserror::Error;

/// Custom error types for the application.
#[derive(Error, Debug)]
pub enum SeoError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("AI provider quota exhausted, retry in {retry_after_secs}s")]
    QuotaExceeded { retry_after_secs: u64 },
    #[error("AI response could not be parsed into the expected structure")]
    UnparsableResponse,
    #[error("Queued request was dropped before it could run")]
    Cancelled,
    #[error("API key is missing")]
    MissingApiKey,
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
