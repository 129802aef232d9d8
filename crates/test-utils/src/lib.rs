use async_trait::async_trait;
use seoforge::errors::SeoError;
use seoforge::providers::ai::AiProvider;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

/// An `AiProvider` with pre-programmed responses, keyed by a substring of
/// the system prompt. Unmatched prompts fail, so tests always program what
/// they expect.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, Outcome>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

#[derive(Clone, Debug)]
enum Outcome {
    Respond(String),
    Fail(String),
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs a response for a specific prompt.
    /// The key should be a unique substring of the system prompt.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), Outcome::Respond(response.to_string()));
    }

    /// Pre-programs a failure for a specific prompt. The error message is
    /// surfaced through `SeoError::AiApi`, so quota wording ("quota",
    /// "rate limit", "429") can be simulated verbatim.
    pub fn add_failure(&self, key: &str, message: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), Outcome::Fail(message.to_string()));
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, SeoError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((system_prompt.to_string(), user_prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        for (key, outcome) in responses.iter() {
            if system_prompt.contains(key) {
                return match outcome {
                    Outcome::Respond(response) => Ok(response.clone()),
                    Outcome::Fail(message) => Err(SeoError::AiApi(message.clone())),
                };
            }
        }

        Err(SeoError::AiApi(format!(
            "MockAiProvider: No response programmed for system prompt. Got: '{system_prompt}'"
        )))
    }
}
