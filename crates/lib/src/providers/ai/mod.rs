pub mod gemini;

use crate::errors::SeoError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with an AI provider.
///
/// This trait defines a common interface for generating content from prompts
/// using different Large Language Models.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    ///
    /// The result should be a string containing the AI's raw response.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, SeoError>;
}

dyn_clone::clone_trait_object!(AiProvider);
