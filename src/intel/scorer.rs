//! Rule-based keyword-signal scorer.
//!
//! Analyses conversational text for scam indicators using the curated
//! multilingual lexicon and aggregates the evidence into a bounded 0-100
//! threat score. Pure and deterministic: identical input always yields an
//! identical result, independent of call order or prior calls.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::intel::lexicon::{lexicon, Category, CategorySet};

/// Per-call scoring result. Evidence sets hold the canonical keyword strings,
/// deduplicated; the score is always reproducible from the evidence.
///
/// Serialized field names are the wire shape consumed by downstream stages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub fear_indicators: BTreeSet<String>,
    pub authority_impersonation: BTreeSet<String>,
    pub urgency_signals: BTreeSet<String>,
    pub financial_pressure: BTreeSet<String>,
    pub threat_score: u32,
    pub high_severity_count: u32,
}

impl AnalysisResult {
    /// JSON rendition handed to downstream stages.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Transcription collaborators prefix transcripts with a `[Language: xx]`
/// tag; it carries no signal and is stripped before matching.
fn language_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[Language:.*?\]").expect("language tag regex must compile"))
}

fn find_category(set: &CategorySet, text: &str) -> BTreeSet<String> {
    set.find_matches(text).into_iter().map(str::to_owned).collect()
}

/// Analyse text for scam indicators.
///
/// Empty input yields the zero result; this function never fails.
pub fn analyze(text: &str) -> AnalysisResult {
    if text.is_empty() {
        return AnalysisResult::default();
    }

    let clean = language_tag_re().replace_all(text, "");
    let clean = clean.trim();
    let lex = lexicon();

    let fear = find_category(&lex.fear, clean);
    let authority = find_category(&lex.authority, clean);
    let urgency = find_category(&lex.urgency, clean);
    let financial = find_category(&lex.financial, clean);
    let high_severity_count = lex.count_high_severity(&clean.to_lowercase());

    let threat_score = compute_score(&[&fear, &authority, &urgency, &financial], high_severity_count);

    AnalysisResult {
        fear_indicators: fear,
        authority_impersonation: authority,
        urgency_signals: urgency,
        financial_pressure: financial,
        threat_score,
        high_severity_count,
    }
}

/// 0-100 threat score from the four evidence sets.
///
/// Each category contributes up to its weight, capped at 2 distinct hits;
/// 2+ triggered categories add a flat bonus; the first two high-severity
/// phrase hits add 15 each.
fn compute_score(categories: &[&BTreeSet<String>; 4], high_severity: u32) -> u32 {
    let mut score = 0.0f64;

    for matches in categories {
        let hits = matches.len().min(2) as f64;
        score += hits / 2.0 * f64::from(Category::WEIGHT);
    }

    let triggered = categories.iter().filter(|m| !m.is_empty()).count();
    if triggered >= 2 {
        score += 10.0;
    }

    score += f64::from(high_severity.min(2) * 15);

    (score as u32).min(100)
}
