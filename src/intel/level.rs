//! Threat level classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordinal threat level. The derived order is
/// `Safe < Suspicious < HighRisk < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatLevel {
    Safe,
    Suspicious,
    HighRisk,
    Critical,
}

impl ThreatLevel {
    /// Canonical upper-case label, `HIGH_RISK` style.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Safe => "SAFE",
            ThreatLevel::Suspicious => "SUSPICIOUS",
            ThreatLevel::HighRisk => "HIGH_RISK",
            ThreatLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThreatLevel {
    type Err = ();

    /// Tolerant of case and of `HIGH RISK` ≡ `HIGH_RISK` spacing variants.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(' ', "_").as_str() {
            "SAFE" => Ok(ThreatLevel::Safe),
            "SUSPICIOUS" => Ok(ThreatLevel::Suspicious),
            "HIGH_RISK" => Ok(ThreatLevel::HighRisk),
            "CRITICAL" => Ok(ThreatLevel::Critical),
            _ => Err(()),
        }
    }
}

/// Map a numeric threat score to a threat level.
///
/// Thresholds are closed on the lower bound; total over all `u32`, so
/// out-of-range scores above 100 still classify as `Critical`.
pub fn classify(score: u32) -> ThreatLevel {
    match score {
        75.. => ThreatLevel::Critical,
        50..=74 => ThreatLevel::HighRisk,
        25..=49 => ThreatLevel::Suspicious,
        _ => ThreatLevel::Safe,
    }
}
