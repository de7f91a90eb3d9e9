//! # Pipeline Projection Tests
//!
//! Aggregator supersession/override semantics and verdict extraction over
//! realistic combined logs, including the noisy formatting the upstream
//! stages actually produce.

use guardian::intel::ThreatLevel;
use guardian::pipeline::{extract_verdict, EventAggregator, StageEvent, StageId};

#[test]
fn supersession_yields_latest_content_at_first_position() {
    let mut agg = EventAggregator::new();
    agg.ingest(StageEvent::partial("Speech_Agent", "partial"));
    agg.ingest(StageEvent::partial("Speech_Agent", "final"));

    let log = agg.snapshot();
    assert_eq!(log.entries.len(), 1);
    assert_eq!(log.entries[0].stage, StageId::Speech);
    assert_eq!(log.entries[0].content, "final");
}

#[test]
fn final_record_survives_interleaved_partials() {
    let mut agg = EventAggregator::new();
    agg.ingest(StageEvent::partial("Decision_Agent", "calling get_threat_level…"));
    agg.ingest(StageEvent::partial("Action_Agent", "preparing alerts"));
    agg.ingest(StageEvent::finalized("Decision_Agent", "FINAL_VERDICT: …"));
    agg.ingest(StageEvent::partial("Decision_Agent", "stale tool chatter"));

    let log = agg.snapshot();
    assert_eq!(log.entries[0].content, "FINAL_VERDICT: …");
}

#[test]
fn verdict_extracted_from_combined_log() {
    let mut agg = EventAggregator::new();
    agg.ingest(StageEvent::finalized(
        "Speech_Agent",
        "TRANSCRIPT_PROVIDED: Your Aadhaar is linked to a case. SPEECH_DONE",
    ));
    agg.ingest(StageEvent::finalized(
        "Reasoning_Agent",
        "threat_score is 95 with strong fear and authority indicators. REASONING_DONE",
    ));
    agg.ingest(StageEvent::finalized(
        "Decision_Agent",
        "FINAL_VERDICT:\n- Threat Level: **CRITICAL**\n- Threat Score: 95\n\
         - Summary: Digital arrest scam in progress.\n- Caller Type: Scammer\n\
         - Recommendation: Hang up now and call family.\nDECISION_DONE",
    ));
    agg.ingest(StageEvent::finalized(
        "Action_Agent",
        "Alerts triggered and result archived. GUARDIAN_ANGEL_COMPLETE",
    ));

    let verdict = extract_verdict(&agg.snapshot());
    assert_eq!(verdict.level, Some(ThreatLevel::Critical));
    assert_eq!(verdict.score, 95);
    assert_eq!(verdict.summary, "Digital arrest scam in progress.");
    assert_eq!(verdict.caller_type, "Scammer");
    assert_eq!(verdict.recommendation, "Hang up now and call family.");
}

#[test]
fn extraction_of_empty_log_keeps_defaults() {
    let verdict = extract_verdict(&EventAggregator::new().snapshot());
    assert_eq!(verdict.level, None);
    assert_eq!(verdict.score, 0);
    assert_eq!(verdict.caller_type, "Unknown");
}
