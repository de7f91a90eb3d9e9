//! # Run Loop Tests
//!
//! Drives the pipeline run loop with scripted stage sources: a full
//! four-stage run, the turn ceiling, and the zero-event failure that must
//! never be confused with a SAFE verdict.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use guardian::alert::SimulatedAlerts;
use guardian::config::{RunLimits, UpstreamPolicy};
use guardian::intel::ThreatLevel;
use guardian::pipeline::{
    consume, run_pipeline, AnalysisInput, PipelineError, StageEvent, StageSource,
};

/// Replays a fixed list of events, standing in for the external agent team.
struct ScriptedSource {
    events: Vec<StageEvent>,
}

#[async_trait]
impl StageSource for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn ingest(
        self: Arc<Self>,
        _input: AnalysisInput,
        _policy: UpstreamPolicy,
        tx: mpsc::Sender<StageEvent>,
    ) -> anyhow::Result<()> {
        for ev in self.events.clone() {
            if tx.send(ev).await.is_err() {
                // downstream dropped → exit
                break;
            }
        }
        Ok(())
    }
}

fn scam_call_script() -> Vec<StageEvent> {
    vec![
        StageEvent::partial("Speech_Agent", "transcribing audio…"),
        StageEvent::partial("Reasoning_Agent", "calling analyze_transcript…"),
        StageEvent::finalized("Speech_Agent", "TRANSCRIPT_PROVIDED: you are under digital arrest"),
        StageEvent::finalized("Reasoning_Agent", "threat_score: 95, strong indicators. REASONING_DONE"),
        StageEvent::finalized(
            "Decision_Agent",
            "FINAL_VERDICT:\n- Threat Level: CRITICAL\n- Threat Score: 95\n\
             - Summary: Digital arrest scam.\n- Caller Type: Scammer\n\
             - Recommendation: Hang up.\nDECISION_DONE",
        ),
        StageEvent::finalized("Action_Agent", "alerts sent. GUARDIAN_ANGEL_COMPLETE"),
    ]
}

#[tokio::test]
async fn full_run_produces_critical_outcome() {
    let source = Arc::new(ScriptedSource { events: scam_call_script() });
    let outcome = run_pipeline(
        source,
        AnalysisInput::Transcript("you are under digital arrest".into()),
        UpstreamPolicy::default(),
        RunLimits::default(),
        &SimulatedAlerts,
    )
    .await
    .expect("run must succeed");

    assert_eq!(outcome.log.entries.len(), 4);
    assert_eq!(outcome.verdict.level, Some(ThreatLevel::Critical));
    assert_eq!(outcome.verdict.score, 95);
    assert!(outcome.actions.family_notified);
    assert!(outcome.actions.police_notified);
    // Partials were superseded by the final records.
    assert_eq!(outcome.log.entries[0].content, "TRANSCRIPT_PROVIDED: you are under digital arrest");
}

#[tokio::test]
async fn zero_events_surface_as_no_data_failure() {
    let events = tokio_stream::iter(Vec::<StageEvent>::new());
    let result = consume(events, RunLimits::default(), &SimulatedAlerts).await;
    assert!(matches!(result, Err(PipelineError::NoData)));
}

#[tokio::test]
async fn discarded_chatter_alone_is_still_no_data() {
    let events = tokio_stream::iter(vec![
        StageEvent::partial("Oracle_Agent", "not a recognized stage"),
        StageEvent::partial("Speech_Agent", ""),
    ]);
    let result = consume(events, RunLimits::default(), &SimulatedAlerts).await;
    assert!(matches!(result, Err(PipelineError::NoData)));
}

#[tokio::test]
async fn turn_ceiling_cuts_off_a_chatty_stream() {
    let events: Vec<StageEvent> = (0..20)
        .map(|i| StageEvent::partial("Reasoning_Agent", format!("partial #{i}")))
        .collect();
    let limits = RunLimits { max_turns: 4 };

    let outcome = consume(tokio_stream::iter(events), limits, &SimulatedAlerts)
        .await
        .expect("accepted events exist");

    // Only the first max_turns events were consumed; latest-wins projection.
    assert_eq!(outcome.log.entries.len(), 1);
    assert_eq!(outcome.log.entries[0].content, "partial #3");
    // No verdict block in the chatter → unresolved level, advisory actions only.
    assert_eq!(outcome.verdict.level, None);
    assert!(!outcome.actions.family_notified);
    assert!(!outcome.actions.police_notified);
}

#[tokio::test]
async fn run_halts_once_terminal_stage_is_finalized() {
    let mut events = scam_call_script();
    // Anything after the terminal final record must not be consumed.
    events.push(StageEvent::partial("Action_Agent", "late chatter"));
    let source = Arc::new(ScriptedSource { events });

    let outcome = run_pipeline(
        source,
        AnalysisInput::Transcript("transcript".into()),
        UpstreamPolicy::default(),
        RunLimits::default(),
        &SimulatedAlerts,
    )
    .await
    .expect("run must succeed");

    assert_eq!(outcome.log.entries[3].content, "alerts sent. GUARDIAN_ANGEL_COMPLETE");
}
