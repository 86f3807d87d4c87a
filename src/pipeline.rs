//! Three-stage content pipeline: keywords, article, title.
//!
//! Each stage feeds the next, so the stages run strictly in order.
//! A run either produces a complete [`GenerationResult`] or fails as a
//! whole; nothing from an earlier stage leaks out of a failed run.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use log::{debug, error, info, warn};

use crate::config::PipelineConfig;
use crate::prompt;
use crate::request::{CompletionRequest, CompletionService};
use crate::{GenerationRequest, GenerationResult};

/// Where a pipeline run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState
{   Idle
  , KeywordsPending
  , ArticlePending
  , TitlePending
  , Complete
  , Failed
}

/// Strip what the title stage tends to wrap its answer in
pub fn clean_title(raw: &str) -> String
{   raw.chars()
      .filter(|c| !matches!(c, '"' | '\n' | '\r'))
      .collect::<String>()
      .trim()
      .to_string()
}

pub struct ContentPipeline
{   service: Arc<dyn CompletionService>
  , config: PipelineConfig
  , state: PipelineState
  , progress: Option<mpsc::UnboundedSender<PipelineState>>
}

impl ContentPipeline
{   pub fn new(
      service: Arc<dyn CompletionService>
    , config: PipelineConfig
    ) -> Self
    {   ContentPipeline
        {   service
          , config
          , state: PipelineState::Idle
          , progress: None
        }
    }

    /// Publish every state transition on `tx`
    pub fn with_progress(
      mut self
    , tx: mpsc::UnboundedSender<PipelineState>
    ) -> Self
    {   self.progress = Some(tx);
        self
    }

    pub fn state(&self) -> PipelineState
    {   self.state
    }

    fn transition(&mut self, next: PipelineState)
    {   debug!("Pipeline {:?} -> {:?}", self.state, next);
        self.state = next;
        if let Some(tx) = &self.progress
        {   let _ = tx.send(next);
        }
    }

    /// Run all three stages for `request`.
    ///
    /// An empty topic is rejected before any call is issued. Any
    /// stage failure, or `cancel` firing while a stage is awaited,
    /// ends the run in [`PipelineState::Failed`].
    pub async fn generate(
      &mut self
    , request: GenerationRequest
    , cancel: &CancellationToken
    ) -> Result<GenerationResult, crate::error::Error>
    {   self.state = PipelineState::Idle;

        if let Err(e) = request.validate()
        {   warn!("Rejected request: {}", e);
            return Err(e);
        }

        info!(
          "Generating {} article ({:?})",
          request.language.code(), request.length
        );

        match self.run_stages(&request, cancel).await
        {   Ok(result) => {
              self.transition(PipelineState::Complete);
              info!("Generated \"{}\"", result.title);
              Ok(result)
            }
          , Err(e) => {
              error!("Pipeline failed in {:?}: {}", self.state, e);
              self.transition(PipelineState::Failed);
              Err(e)
            }
        }
    }

    async fn run_stages(
      &mut self
    , request: &GenerationRequest
    , cancel: &CancellationToken
    ) -> Result<GenerationResult, crate::error::Error>
    {   // Stage 1: keywords
        self.transition(PipelineState::KeywordsPending);
        let keywords = self.call_stage(
          prompt::keywords_prompt(&request.topic, request.language)
        , self.config.keywords_max_tokens
        , cancel
        ).await?;
        let suggested_keywords = keywords.trim().to_string();
        debug!("Suggested keywords: {}", suggested_keywords);

        // Stage 2: article
        self.transition(PipelineState::ArticlePending);
        let budget = self.config.length_budgets.budget_for(request.length);
        let article_body = self.call_stage(
          prompt::article_prompt(request, Some(&suggested_keywords))
        , budget
        , cancel
        ).await?;

        // Stage 3: title
        self.transition(PipelineState::TitlePending);
        let excerpt = prompt::leading_chars(
          &article_body,
          self.config.title_excerpt_chars
        );
        let raw_title = self.call_stage(
          prompt::title_prompt(excerpt, request.language)
        , self.config.title_max_tokens
        , cancel
        ).await?;
        let title = clean_title(&raw_title);
        if title.is_empty()
        {   return Err(crate::error::Error::MissingContent);
        }

        Ok(GenerationResult
        {   suggested_keywords
          , article_body
          , title
        })
    }

    async fn call_stage(
      &self
    , prompt: String
    , max_tokens: usize
    , cancel: &CancellationToken
    ) -> Result<String, crate::error::Error>
    {   let request = CompletionRequest::new(prompt, max_tokens);
        tokio::select!
        {   biased;
            _ = cancel.cancelled() => {
              warn!("Cancelled during {:?}", self.state);
              Err(crate::error::Error::Cancelled)
            }
            response = self.service.complete(request) => {
              response.map(|r| r.text)
            }
        }
    }
}
