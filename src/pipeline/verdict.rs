//! Verdict extraction from the combined pipeline log.
//!
//! The decision stage reports its conclusion as a labeled free-text block
//! (`FINAL_VERDICT: … DECISION_DONE`). Upstream output format is not
//! contractually guaranteed, so this is a best-effort parser over an
//! underspecified text protocol: tolerant of markdown decoration, varied
//! spacing, and partial or malformed blocks. It never fails (unresolved
//! fields keep their defaults), and blocks that yield no level at all are
//! flagged for observability instead of silently defaulting.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use metrics::counter;

use crate::intel::level::ThreatLevel;
use crate::pipeline::events::AggregatedLog;

/// Structured final judgment derived from the terminal stage's free text.
///
/// `level: None` means the text never named a threat level; the action
/// dispatcher treats that as SUSPICIOUS (least-disruptive fail-safe).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub level: Option<ThreatLevel>,
    pub score: u32,
    pub summary: String,
    pub caller_type: String,
    pub recommendation: String,
}

impl Default for Verdict {
    fn default() -> Self {
        Verdict {
            level: None,
            score: 0,
            summary: String::new(),
            caller_type: "Unknown".into(),
            recommendation: String::new(),
        }
    }
}

fn verdict_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)FINAL_VERDICT[:\s]*(.*?)(?:DECISION_DONE|$)")
            .expect("verdict block regex must compile")
    })
}

fn labeled_level_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)Threat\s*Level[:\s*_]+(SAFE|SUSPICIOUS|HIGH[_\s]RISK|CRITICAL)")
            .expect("threat level regex must compile")
    })
}

fn labeled_score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)Threat\s*Score[:\s*_]+(\d+)").expect("threat score regex must compile")
    })
}

fn bare_score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)score[:\s]+(\d+)\s*(?:/\s*100)?").expect("bare score regex must compile")
    })
}

// Field values run until the next bulleted field, the end marker, or
// end-of-text. The regex crate has no lookahead, so the stop pattern is a
// consuming alternative; only the capture group is kept.
fn summary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)Summary[:\s*_]+(.+?)(?:\n\s*[-*]\s+\w|DECISION_DONE|$)")
            .expect("summary regex must compile")
    })
}

fn caller_type_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)Caller\s*Type[:\s*_]+(.+?)(?:\n\s*[-*]\s+\w|DECISION_DONE|$)")
            .expect("caller type regex must compile")
    })
}

fn recommendation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)Recommendation[:\s*_]+(.+?)(?:\n\s*[-*]\s+\w|DECISION_DONE|$)")
            .expect("recommendation regex must compile")
    })
}

fn markdown_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[*_`#]+").expect("markdown regex must compile"))
}

/// Strip markdown bold/italic/code decoration from a captured value.
fn strip_md(text: &str) -> String {
    markdown_re().replace_all(text, "").trim().to_string()
}

fn labeled_level(block: &str) -> Option<ThreatLevel> {
    // The capture holds only the level name (letters, `_`, or a space), so it
    // parses directly; `FromStr` absorbs the spacing variants.
    labeled_level_re().captures(block).and_then(|caps| caps[1].parse().ok())
}

/// Fallback: first level keyword anywhere in the block, most severe first,
/// so a severe keyword is preferred over a casually mentioned milder one.
fn scanned_level(block: &str) -> Option<ThreatLevel> {
    const SCAN_ORDER: [(&str, ThreatLevel); 5] = [
        ("critical", ThreatLevel::Critical),
        ("high_risk", ThreatLevel::HighRisk),
        ("high risk", ThreatLevel::HighRisk),
        ("suspicious", ThreatLevel::Suspicious),
        ("safe", ThreatLevel::Safe),
    ];
    let lower = block.to_lowercase();
    SCAN_ORDER
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, level)| *level)
}

fn labeled_score(block: &str) -> Option<u32> {
    labeled_score_re().captures(block).and_then(|caps| caps[1].parse().ok())
}

fn bare_score(block: &str) -> Option<u32> {
    bare_score_re().captures(block).and_then(|caps| caps[1].parse().ok())
}

fn field(re: &Regex, block: &str) -> Option<String> {
    re.captures(block).map(|caps| strip_md(&caps[1]))
}

/// Extract a best-effort verdict from the combined pipeline log.
pub fn extract_verdict(log: &AggregatedLog) -> Verdict {
    extract_from_text(&log.combined_text())
}

/// Extract a best-effort verdict from raw log text.
///
/// Each field is resolved by an ordered list of strategies, tried in
/// sequence until one succeeds; unresolved fields keep their defaults.
pub fn extract_from_text(full_log: &str) -> Verdict {
    let mut verdict = Verdict::default();

    // Prefer the delimited verdict block; fall back to the whole text.
    let block: &str = verdict_block_re()
        .captures(full_log)
        .and_then(|caps| caps.get(1))
        .map_or(full_log, |m| m.as_str());

    let level_strategies: [fn(&str) -> Option<ThreatLevel>; 2] = [labeled_level, scanned_level];
    verdict.level = level_strategies.iter().find_map(|strategy| strategy(block));

    let score_strategies: [fn(&str) -> Option<u32>; 2] = [labeled_score, bare_score];
    if let Some(score) = score_strategies.iter().find_map(|strategy| strategy(block)) {
        verdict.score = score;
    }

    if let Some(summary) = field(summary_re(), block) {
        verdict.summary = summary;
    }
    if let Some(caller_type) = field(caller_type_re(), block) {
        verdict.caller_type = caller_type;
    }
    if let Some(recommendation) = field(recommendation_re(), block) {
        verdict.recommendation = recommendation;
    }

    if verdict.level.is_none() {
        log::warn!("verdict block yielded no threat level; keeping defaults");
        counter!("pipeline_verdicts_unparsed_total").increment(1);
    }

    verdict
}
