//! Pipeline run loop.
//!
//! A single logical consumer drains the stage-event stream into a per-run
//! aggregator, halting on the terminal stage's final record or the turn
//! ceiling, whichever comes first. The reduced log is parsed into a verdict
//! and handed to the action dispatcher.
//!
//! A run that closes without a single accepted event is a failure, not a
//! SAFE outcome: it is the signal that something upstream (rate limiting,
//! quota, timeout) broke, and must never be mistaken for a benign verdict.

use std::sync::Arc;

use futures::Stream;
use log::Level;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

use crate::alert::{ActionDispatcher, ActionReport};
use crate::config::types::{RunLimits, UpstreamPolicy};
use crate::guardian_log;
use crate::pipeline::aggregator::EventAggregator;
use crate::pipeline::events::{AggregatedLog, StageEvent, StageId};
use crate::pipeline::source::{AnalysisInput, StageSource};
use crate::pipeline::verdict::{extract_verdict, Verdict};

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The upstream stream closed before any event was accepted: likely an
    /// upstream rate limit, quota, or timeout, not a judgment on the content.
    #[error("no stage events received before stream close (upstream rate limit or timeout?)")]
    NoData,
}

/// Everything one completed run produced.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub log: AggregatedLog,
    pub verdict: Verdict,
    pub actions: ActionReport,
}

/// Wire an external stage source into a bounded channel and consume it.
pub async fn run_pipeline<D>(
    source: Arc<dyn StageSource>,
    input: AnalysisInput,
    policy: UpstreamPolicy,
    limits: RunLimits,
    dispatcher: &D,
) -> Result<PipelineOutcome, PipelineError>
where
    D: ActionDispatcher,
{
    let (tx, rx) = mpsc::channel(source.capacity());
    let name = source.name();

    task::spawn(async move {
        log::info!("stage source '{name}' started");
        if let Err(e) = source.ingest(input, policy, tx).await {
            log::error!("stage source '{name}' failed: {e:#}");
        }
        log::info!("stage source '{name}' exited");
    });

    consume(ReceiverStream::new(rx), limits, dispatcher).await
}

/// Reduce one event stream to a pipeline outcome.
///
/// Advances one event per turn; halts once the terminal stage holds its
/// final record or `limits.max_turns` events were received.
pub async fn consume<S, D>(
    mut events: S,
    limits: RunLimits,
    dispatcher: &D,
) -> Result<PipelineOutcome, PipelineError>
where
    S: Stream<Item = StageEvent> + Unpin,
    D: ActionDispatcher,
{
    let mut aggregator = EventAggregator::new();
    let terminal = StageId::terminal();
    let mut turns = 0usize;

    while let Some(event) = events.next().await {
        turns += 1;
        aggregator.ingest(event);

        if aggregator.is_finalized(terminal) {
            guardian_log!(Level::Debug, "pipeline", "Terminal stage finalized after {} turn(s)", turns);
            break;
        }
        if turns >= limits.max_turns {
            guardian_log!(Level::Warn, "pipeline", "Turn ceiling of {} reached, cutting run off", limits.max_turns);
            break;
        }
    }

    if aggregator.is_empty() {
        return Err(PipelineError::NoData);
    }

    let log = aggregator.snapshot();
    let verdict = extract_verdict(&log);
    let actions = dispatcher.escalate(verdict.level, &verdict.summary);
    guardian_log!(
        Level::Info,
        "pipeline",
        "Run complete: level={}, score={}",
        verdict.level.map_or("UNKNOWN", |l| l.as_str()),
        verdict.score
    );

    Ok(PipelineOutcome { log, verdict, actions })
}
