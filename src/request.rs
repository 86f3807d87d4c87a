//! Completion request/response types and the service seam

use serde::{Deserialize, Serialize};

/// One single-message completion call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest
{   /// The prompt text, sent as the only user message
    pub prompt: String
  , /// Max tokens to generate
    pub max_tokens: usize
}

impl CompletionRequest
{   pub fn new(prompt: String, max_tokens: usize) -> Self
    {   CompletionRequest
        {   prompt
          , max_tokens
        }
    }
}

/// Text returned by one completion call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse
{   /// Generated text
    pub text: String
  , /// Model that generated it
    pub model: String
  , /// Why generation stopped, if the provider said
    pub stop_reason: Option<String>
}

/// Anything that can turn a prompt into text.
///
/// The pipeline only depends on this trait, so a provider can be
/// swapped (or scripted in tests) without touching stage logic.
#[async_trait::async_trait]
pub trait CompletionService: Send + Sync
{   async fn complete(
      &self
    , request: CompletionRequest
    ) -> Result<CompletionResponse, crate::error::Error>;
}
