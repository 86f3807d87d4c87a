use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use log::{debug, error, info, warn};
use crate::ArticleFoot;
use crate::request::CompletionService;

/// The single run a backend may have in flight
struct InFlight
{   id: usize
  , cancel: CancellationToken
  , task: tokio::task::JoinHandle<()>
}

/// Reports a run as finished when dropped, so the slot is released
/// even if the run task panics
struct RunSlot
{   id: usize
  , done: mpsc::UnboundedSender<usize>
}

impl Drop for RunSlot
{   fn drop(&mut self)
    {   let _ = self.done.send(self.id);
    }
}

/// Backend state owned by the event loop
pub struct ArticleBackendState
{   pub service: Arc<dyn CompletionService>
  , pub config: crate::config::PipelineConfig
  , in_flight: Option<InFlight>
  , next_id: usize
}

impl ArticleBackendState
{   pub fn new(
      service: Arc<dyn CompletionService>
    , config: crate::config::PipelineConfig
    ) -> Self
    {   debug!("Initializing ArticleBackendState");
        ArticleBackendState
        {   service
          , config
          , in_flight: None
          , next_id: 0
        }
    }

    pub fn is_busy(&self) -> bool
    {   self.in_flight.is_some()
    }
}

/// Public API for the maqala backend - owns the task.
///
/// At most one generation runs at a time; a second `generate` while
/// one is in flight is answered with [`crate::error::Error::Busy`].
pub struct ArticleBackend
{   hand: crate::ArticleHand
  , _task_handle: tokio::task::JoinHandle<()>
}

impl ArticleBackend
{   /// Build the configured provider and spawn the backend
    pub fn new(
      config: crate::config::GeneratorConfig
    ) -> Result<Self, crate::error::Error>
    {   config.validate()?;
        let service = crate::providers::AnthropicClient::new(
          &config.provider
        )?;
        Ok(Self::with_service(Arc::new(service), config.pipeline))
    }

    /// Spawn a backend around any completion service.
    /// Returns immediately - spawns background task
    pub fn with_service(
      service: Arc<dyn CompletionService>
    , config: crate::config::PipelineConfig
    ) -> Self
    {   debug!("Creating ArticleBackend with task ownership");

        let (generate_tx, generate_rx)
          = mpsc::unbounded_channel();
        let (cancel_tx, cancel_rx)
          = mpsc::unbounded_channel();
        let (kill_process_tx, kill_process_rx)
          = mpsc::unbounded_channel();

        let hand = crate::ArticleHand
        {   generate_tx
          , cancel_tx
          , kill_process_tx
        };

        let foot = crate::ArticleFoot
        {   generate_rx
          , cancel_rx
          , kill_process_rx
        };

        let state = ArticleBackendState::new(service, config);
        let _task_handle = tokio::spawn(async move {
          run_backend_loop(foot, state).await
        });

        ArticleBackend
        {   hand
          , _task_handle
        }
    }

    /// Queue a generation - returns almost immediately
    pub async fn generate(
      &self
    , request: crate::GenerationRequest
    ) -> Result<
        mpsc::UnboundedReceiver<crate::GenerateReply>,
        crate::error::Error
      >
    {   debug!("generate queuing request for topic: {}", request.topic);
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::GenerateArgs
        {   request
          , reply: reply_tx
        };

        self.hand.generate_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel closed");
            crate::error::Error::Other(
              "Backend disconnected".to_string()
            )
          })?;

        Ok(reply_rx)
    }

    /// Cancel the in-flight generation, if any
    pub async fn cancel(
      &self
    ) -> Result<
        mpsc::UnboundedReceiver<crate::CancelReply>,
        crate::error::Error
      >
    {   debug!("cancel queuing command");
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::CancelArgs
        {   reply: reply_tx
        };

        self.hand.cancel_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel closed");
            crate::error::Error::Other(
              "Backend disconnected".to_string()
            )
          })?;

        Ok(reply_rx)
    }

    /// Gracefully shutdown the backend, cancelling any in-flight run
    pub async fn shutdown(self)
      -> Result<(), crate::error::Error>
    {   debug!("Shutting down ArticleBackend");
        let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::KillProcessArgs
        {   reply: reply_tx
        };

        self.hand.kill_process_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel already closed");
            crate::error::Error::Other(
              "Backend already shutdown".to_string()
            )
          })?;

        // Wait for shutdown confirmation
        if let Some(result) = reply_rx.recv().await
        {   debug!("Backend shutdown confirmed");
            result
        } else
        {   error!("Backend shutdown timeout");
            Err(crate::error::Error::Other(
              "Backend stopped without confirming shutdown".to_string()
            ))
        }
    }
}

/// Main backend event loop
///
/// tokio::select! only routes commands. Accepted generations run on
/// their own task and report back on `done_rx` so the loop stays free
/// to answer cancel and shutdown. `done_rx` is polled first so a
/// finished run releases its slot before the next generate is seen.
async fn run_backend_loop(
  foot: crate::ArticleFoot
, mut state: ArticleBackendState
)
{   debug!("Starting ArticleBackend event loop");
    let ArticleFoot
    {   mut generate_rx
      , mut cancel_rx
      , mut kill_process_rx
    } = foot;
    let (done_tx, mut done_rx)
      = mpsc::unbounded_channel::<usize>();

    loop
    { tokio::select!
      { biased;
        Some(id) = done_rx.recv() => {
          if state.in_flight.as_ref().map(|f| f.id) == Some(id)
          {   debug!("Run {} finished", id);
              state.in_flight = None;
          }
        }
      , Some(cmd) = generate_rx.recv() => {
          if state.is_busy()
          {   warn!("Rejecting generate: a run is already in flight");
              let _ = cmd.reply.send(Err(crate::error::Error::Busy));
              continue;
          }

          let id = state.next_id;
          state.next_id += 1;
          debug!("Starting run {}", id);

          let cancel = CancellationToken::new();
          let mut pipeline = crate::pipeline::ContentPipeline::new(
            state.service.clone(),
            state.config.clone()
          );
          let run_cancel = cancel.clone();
          let slot = RunSlot { id, done: done_tx.clone() };
          let task = tokio::spawn(async move {
            let result = pipeline
              .generate(cmd.request, &run_cancel)
              .await;
            // Free the slot before the caller can see the reply
            drop(slot);
            let _ = cmd.reply.send(result);
          });

          state.in_flight = Some(InFlight { id, cancel, task });
        }
      , Some(cmd) = cancel_rx.recv() => {
          debug!("Received Cancel");
          let signalled = match &state.in_flight
          {   Some(flight) => {
                info!("Cancelling run {}", flight.id);
                flight.cancel.cancel();
                true
              }
            , None => false
          };
          let _ = cmd.reply.send(Ok(signalled));
        }
      , Some(cmd) = kill_process_rx.recv() => {
          debug!("Received KillProcess");
          if let Some(flight) = state.in_flight.take()
          {   flight.cancel.cancel();
              let _ = flight.task.await;
          }
          let _ = cmd.reply.send(Ok(()));
          info!("ArticleBackend shutting down");
          break;
        }
      }
    }
}
