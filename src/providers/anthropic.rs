use serde::{Deserialize, Serialize};
use log::{debug, trace, error, warn};
use std::time::Duration;

use crate::request::{CompletionRequest, CompletionResponse};

// ===== Message Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesRequest
{   pub model: String
  , pub max_tokens: usize
  , pub messages: Vec<ChatMessage>
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse
{   #[serde(default)]
    pub content: Vec<ContentBlock>
  , #[serde(default)]
    pub model: Option<String>
  , #[serde(default)]
    pub stop_reason: Option<String>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock
{   #[serde(rename = "type", default)]
    pub kind: Option<String>
  , #[serde(default)]
    pub text: Option<String>
}

impl MessagesResponse
{   /// Text of the first content block, if it has any
    pub fn first_text(&self) -> Option<&str>
    {   self.content
          .first()
          .and_then(|block| block.text.as_deref())
          .filter(|text| !text.is_empty())
    }
}

// ===== Anthropic Client =====

/// Completion service speaking the Anthropic Messages wire format
pub struct AnthropicClient
{   endpoint: String
  , model: String
  , api_key: Option<String>
  , api_version: String
  , http_client: reqwest::Client
}

impl AnthropicClient
{   pub fn new(
      config: &crate::config::ProviderConfig
    ) -> Result<Self, crate::error::Error>
    {   debug!("Creating AnthropicClient for {}", config.api_base);
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs
        {   builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(|e| {
          error!("Failed to build HTTP client: {}", e);
          crate::error::Error::InvalidConfiguration(e.to_string())
        })?;

        if config.api_key.is_none()
        {   warn!("No API key configured; requests go out unauthenticated");
        }

        Ok(AnthropicClient
        {   endpoint: format!(
              "{}/v1/messages",
              config.api_base.trim_end_matches('/')
            )
          , model: config.model.clone()
          , api_key: config.api_key.clone()
          , api_version: config.api_version.clone()
          , http_client
        })
    }

    async fn handle_send_prompt(
      &self
    , request: CompletionRequest
    ) -> Result<CompletionResponse, crate::error::Error>
    {   debug!(
          "Sending prompt to {} (max_tokens={})",
          self.model, request.max_tokens
        );

        let body = MessagesRequest
        {   model: self.model.clone()
          , max_tokens: request.max_tokens
          , messages: vec![
              ChatMessage
              {   role: "user".to_string()
                , content: request.prompt
              }
            ]
        };

        trace!("Anthropic request: {:?}", body);

        let mut http_request = self.http_client
          .post(&self.endpoint)
          .header("Content-Type", "application/json")
          .header("anthropic-version", &self.api_version)
          .json(&body);
        if let Some(key) = &self.api_key
        {   http_request = http_request.header("x-api-key", key);
        }

        let response = http_request
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::HttpError(e.to_string())
          })?;

        let status = response.status();
        trace!("Anthropic response status: {}", status);

        if !status.is_success()
        {   let error_text = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!("Anthropic API error {}: {}", status, error_text);
            return Err(crate::error::Error::ApiError
            {   status: status.as_u16()
              , body: error_text
            });
        }

        let raw = response.text().await.map_err(|e| {
          error!("Failed to read response body: {}", e);
          crate::error::Error::HttpError(e.to_string())
        })?;

        let messages: MessagesResponse
          = serde_json::from_str(&raw).map_err(|e| {
            error!("Parse error: {}", e);
            crate::error::Error::ParseError(e.to_string())
          })?;

        let text = messages.first_text()
          .map(str::to_string)
          .ok_or_else(|| {
            error!("No text content in response");
            crate::error::Error::MissingContent
          })?;

        debug!("Received {} chars from {}", text.chars().count(), self.model);
        Ok(CompletionResponse
        {   text
          , model: messages.model.unwrap_or_else(|| self.model.clone())
          , stop_reason: messages.stop_reason
        })
    }
}

#[async_trait::async_trait]
impl crate::request::CompletionService for AnthropicClient
{   async fn complete(
      &self
    , request: CompletionRequest
    ) -> Result<CompletionResponse, crate::error::Error>
    {   self.handle_send_prompt(request).await
    }
}
