//! Configuration for the completion provider and pipeline budgets

use serde::{Deserialize, Serialize};
use std::path::Path;
use log::debug;

pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const MODEL_ENV: &str = "MAQALA_MODEL";
pub const API_BASE_ENV: &str = "MAQALA_API_BASE";

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig
{   /// API base URL, without the `/v1/messages` suffix
    pub api_base: String
  , /// Model identifier sent with every call
    pub model: String
  , /// Sent as `x-api-key` when present
    pub api_key: Option<String>
  , /// Value of the `anthropic-version` header
    pub api_version: String
  , /// Request timeout in seconds
    pub timeout_secs: Option<u64>
}

impl Default for ProviderConfig
{   fn default() -> Self
    {   ProviderConfig
        {   api_base: DEFAULT_API_BASE.to_string()
          , model: DEFAULT_MODEL.to_string()
          , api_key: None
          , api_version: DEFAULT_API_VERSION.to_string()
          , timeout_secs: Some(300)
        }
    }
}

/// Token budget for each article length tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthBudgets
{   pub short: usize
  , pub medium: usize
  , pub long: usize
}

impl Default for LengthBudgets
{   fn default() -> Self
    {   LengthBudgets
        {   short: 3000
          , medium: 4500
          , long: 7500
        }
    }
}

impl LengthBudgets
{   pub fn budget_for(&self, tier: crate::LengthTier) -> usize
    {   match tier
        {   crate::LengthTier::Short => self.short
          , crate::LengthTier::Medium => self.medium
          , crate::LengthTier::Long => self.long
        }
    }
}

/// Stage budgets for the three calls of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig
{   /// Output bound for the keyword stage
    pub keywords_max_tokens: usize
  , /// Output bound for the title stage
    pub title_max_tokens: usize
  , /// Characters of the article fed to the title stage
    pub title_excerpt_chars: usize
  , pub length_budgets: LengthBudgets
}

impl Default for PipelineConfig
{   fn default() -> Self
    {   PipelineConfig
        {   keywords_max_tokens: 200
          , title_max_tokens: 100
          , title_excerpt_chars: 500
          , length_budgets: LengthBudgets::default()
        }
    }
}

/// Top-level maqala configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig
{   pub provider: ProviderConfig
  , pub pipeline: PipelineConfig
}

impl GeneratorConfig
{   /// Load a JSON configuration file. Missing fields take defaults.
    pub fn from_file(
      path: impl AsRef<Path>
    ) -> Result<Self, crate::error::Error>
    {   let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let raw = std::fs::read_to_string(path).map_err(|e| {
          crate::error::Error::InvalidConfiguration(
            format!("{}: {}", path.display(), e)
          )
        })?;
        serde_json::from_str(&raw).map_err(|e| {
          crate::error::Error::InvalidConfiguration(
            format!("{}: {}", path.display(), e)
          )
        })
    }

    /// Apply environment overrides on top of file/default values
    pub fn apply_env(mut self) -> Self
    {   if let Ok(key) = std::env::var(API_KEY_ENV)
        {   if !key.trim().is_empty()
            {   debug!("Using API key from {}", API_KEY_ENV);
                self.provider.api_key = Some(key);
            }
        }
        if let Ok(model) = std::env::var(MODEL_ENV)
        {   debug!("Model overridden by {}: {}", MODEL_ENV, model);
            self.provider.model = model;
        }
        if let Ok(base) = std::env::var(API_BASE_ENV)
        {   debug!("API base overridden by {}: {}", API_BASE_ENV, base);
            self.provider.api_base = base;
        }
        self
    }

    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   let base = self.provider.api_base.trim();
        if !(base.starts_with("http://") || base.starts_with("https://"))
        {   return Err(crate::error::Error::InvalidConfiguration(
              format!("api_base must be an http(s) URL: {}", base)
            ));
        }
        if self.provider.model.trim().is_empty()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "model must not be empty".to_string()
            ));
        }
        let p = &self.pipeline;
        let budgets =
        [   ("keywords_max_tokens", p.keywords_max_tokens)
          , ("title_max_tokens", p.title_max_tokens)
          , ("title_excerpt_chars", p.title_excerpt_chars)
          , ("length_budgets.short", p.length_budgets.short)
          , ("length_budgets.medium", p.length_budgets.medium)
          , ("length_budgets.long", p.length_budgets.long)
        ];
        if let Some((name, _)) = budgets.iter().find(|(_, v)| *v == 0)
        {   return Err(crate::error::Error::InvalidConfiguration(
              format!("{} must be greater than zero", name)
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn partial_json_keeps_defaults()
    {   let cfg: GeneratorConfig = serde_json::from_str(
          r#"{ "pipeline": { "length_budgets": { "long": 9000 } } }"#
        ).unwrap();
        assert_eq!(cfg.pipeline.length_budgets.long, 9000);
        assert_eq!(cfg.pipeline.length_budgets.medium, 4500);
        assert_eq!(cfg.pipeline.keywords_max_tokens, 200);
        assert_eq!(cfg.provider.model, DEFAULT_MODEL);
    }

    #[test]
    fn zero_budget_is_rejected()
    {   let mut cfg = GeneratorConfig::default();
        cfg.pipeline.title_max_tokens = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("title_max_tokens"));
    }

    #[test]
    fn non_http_base_is_rejected()
    {   let mut cfg = GeneratorConfig::default();
        cfg.provider.api_base = "api.anthropic.com".to_string();
        assert!(cfg.validate().is_err());
    }
}
