use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use maqala::error::Error;
use maqala::request::{CompletionRequest, CompletionResponse, CompletionService};

/// What the scripted service does for one call
#[allow(dead_code)]
pub enum Step
{   Reply(&'static str)
  , Fail(Error)
  , /// Never resolves; only cancellation gets past it
    Hang
  , /// Panics inside the call
    Panic
}

/// Completion service that plays back a fixed script and records
/// every request it sees
pub struct ScriptedService
{   steps: Mutex<VecDeque<Step>>
  , calls: Mutex<Vec<CompletionRequest>>
}

#[allow(dead_code)]
impl ScriptedService
{   pub fn new(steps: Vec<Step>) -> Arc<Self>
    {   Arc::new(ScriptedService
        {   steps: Mutex::new(steps.into())
          , calls: Mutex::new(vec![])
        })
    }

    pub fn calls(&self) -> Vec<CompletionRequest>
    {   self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CompletionService for ScriptedService
{   async fn complete(
      &self
    , request: CompletionRequest
    ) -> Result<CompletionResponse, Error>
    {   self.calls.lock().unwrap().push(request);
        let step = self.steps.lock().unwrap().pop_front();
        match step
        {   Some(Step::Reply(text)) => Ok(CompletionResponse
            {   text: text.to_string()
              , model: "scripted".to_string()
              , stop_reason: Some("end_turn".to_string())
            })
          , Some(Step::Fail(e)) => Err(e)
          , Some(Step::Hang) => std::future::pending().await
          , Some(Step::Panic) => panic!("scripted service panicked")
          , None => Err(Error::Other("script exhausted".to_string()))
        }
    }
}
