//! Stage source boundary.
//! -----------------------------------------------------------------------------
//! A **stage source** owns everything the core treats as external: audio
//! transcription, OCR, the language-model stages, URL reputation lookups. It
//! ingests one analysis task and pushes `StageEvent`s into the channel the
//! run loop consumes. The core passes the caller-supplied `UpstreamPolicy`
//! through untouched; retries and timeouts happen on the far side of this
//! trait, never inside the core's pure functions.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::config::types::UpstreamPolicy;
use crate::pipeline::events::StageEvent;

/// What a run analyses. Audio and screenshots are turned into text by the
/// source's transcription/OCR collaborators before the first stage reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisInput {
    Audio(PathBuf),
    Screenshot(PathBuf),
    Transcript(String),
}

#[async_trait]
pub trait StageSource: Send + Sync + 'static {
    /// Display name for metrics / logs.
    fn name(&self) -> &'static str;

    /// Capacity of the event queue between source and consumer.
    fn capacity(&self) -> usize {
        64
    }

    /// Drive the upstream stages for one task, pushing each emission into
    /// `tx`. Returning (or dropping `tx`) closes the stream; a source that
    /// produced nothing surfaces as the run's no-data failure, whether it
    /// returned cleanly or with an error.
    async fn ingest(
        self: Arc<Self>,
        input: AnalysisInput,
        policy: UpstreamPolicy,
        tx: mpsc::Sender<StageEvent>,
    ) -> anyhow::Result<()>;
}
