//! Stage event model used across the pipeline.
//!
//! Upstream analysis stages emit free-text progress events; the aggregator
//! reduces them to one latest message per stage. Events are serde-compatible
//! because they cross a process boundary in the host system.
//!
//! ## Extension
//! To recognize a new stage, add a `StageId` variant, its canonical name, and
//! its position in `StageId::SEQUENCE`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of recognized pipeline stages, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageId {
    #[serde(rename = "Speech_Agent")]
    Speech,
    #[serde(rename = "Reasoning_Agent")]
    Reasoning,
    #[serde(rename = "Decision_Agent")]
    Decision,
    #[serde(rename = "Action_Agent")]
    Action,
}

impl StageId {
    /// Pipeline order. The last entry is the terminal stage whose final
    /// record ends a run.
    pub const SEQUENCE: [StageId; 4] =
        [StageId::Speech, StageId::Reasoning, StageId::Decision, StageId::Action];

    /// Canonical stage name as emitted by the upstream source.
    pub fn as_str(&self) -> &'static str {
        match self {
            StageId::Speech => "Speech_Agent",
            StageId::Reasoning => "Reasoning_Agent",
            StageId::Decision => "Decision_Agent",
            StageId::Action => "Action_Agent",
        }
    }

    /// Terminal stage of the pipeline.
    pub fn terminal() -> StageId {
        *StageId::SEQUENCE.last().expect("sequence is non-empty")
    }

    /// Resolve an upstream stage name, tolerant of case and of space vs
    /// underscore, with or without the `_agent` suffix. Unknown names yield
    /// `None` and the event is discarded by the aggregator.
    pub fn from_name(name: &str) -> Option<StageId> {
        let normalized = name.trim().to_lowercase().replace(' ', "_");
        let stem = normalized.strip_suffix("_agent").unwrap_or(&normalized);
        match stem {
            "speech" => Some(StageId::Speech),
            "reasoning" => Some(StageId::Reasoning),
            "decision" => Some(StageId::Decision),
            "action" => Some(StageId::Action),
            _ => None,
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One emission from an upstream stage.
///
/// `is_final` marks authoritative end-of-run content: the upstream final
/// record is delivered as one such event per stage it covers, and a finalized
/// stage can no longer be superseded by stale partials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageEvent {
    pub stage: String,
    pub content: String,
    pub is_final: bool,
}

impl StageEvent {
    pub fn partial(stage: impl Into<String>, content: impl Into<String>) -> Self {
        StageEvent { stage: stage.into(), content: content.into(), is_final: false }
    }

    pub fn finalized(stage: impl Into<String>, content: impl Into<String>) -> Self {
        StageEvent { stage: stage.into(), content: content.into(), is_final: true }
    }
}

/// One entry of the aggregated projection: a stage and its latest content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub stage: StageId,
    pub content: String,
}

/// Stable combined log: one entry per stage that has emitted at least one
/// accepted event, in first-emission order, content always the latest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregatedLog {
    pub entries: Vec<LogEntry>,
}

impl AggregatedLog {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the log as `[Stage_Name] content` lines for the verdict
    /// extractor and for presentation layers.
    pub fn combined_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push('[');
            out.push_str(entry.stage.as_str());
            out.push_str("] ");
            out.push_str(&entry.content);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names_resolve_tolerantly() {
        assert_eq!(StageId::from_name("Speech_Agent"), Some(StageId::Speech));
        assert_eq!(StageId::from_name("reasoning agent"), Some(StageId::Reasoning));
        assert_eq!(StageId::from_name("DECISION"), Some(StageId::Decision));
        assert_eq!(StageId::from_name("Oracle_Agent"), None);
    }

    #[test]
    fn stage_event_json_roundtrip() {
        let ev = StageEvent::partial("Speech_Agent", "transcript text");
        let json = serde_json::to_string(&ev).unwrap();
        let back: StageEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ev);
    }

    #[test]
    fn combined_text_frames_each_stage() {
        let log = AggregatedLog {
            entries: vec![
                LogEntry { stage: StageId::Speech, content: "hello".into() },
                LogEntry { stage: StageId::Decision, content: "verdict".into() },
            ],
        };
        assert_eq!(log.combined_text(), "[Speech_Agent] hello\n[Decision_Agent] verdict\n");
    }
}
