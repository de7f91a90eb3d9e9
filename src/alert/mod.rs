//! Escalation rules and the action dispatcher boundary.
//!
//! The rule table is compiled-in configuration: which notification classes
//! (family, authority) a threat level triggers, and the advisory message
//! shown to the operator. Delivery itself (SMS, email, console) is an
//! external concern behind the `ActionDispatcher` trait; the bundled
//! `SimulatedAlerts` reproduces the console simulation through the log
//! facade.

use chrono::Local;
use log::Level;

use crate::guardian_log;
use crate::intel::level::ThreatLevel;

/// Static policy for one threat level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscalationRule {
    pub notify_family: bool,
    pub notify_police: bool,
    pub message: &'static str,
}

const SAFE_RULE: EscalationRule = EscalationRule {
    notify_family: false,
    notify_police: false,
    message: "[SAFE] Call appears SAFE. No action required.",
};

const SUSPICIOUS_RULE: EscalationRule = EscalationRule {
    notify_family: false,
    notify_police: false,
    message: "[WARNING] SUSPICIOUS activity detected. \
              Advise the senior NOT to share personal or financial details. \
              Monitor the situation.",
};

const HIGH_RISK_RULE: EscalationRule = EscalationRule {
    notify_family: true,
    notify_police: false,
    message: "[HIGH RISK] HIGH RISK scam detected! \
              Family members have been notified. \
              Senior should end the call immediately and consult family.",
};

const CRITICAL_RULE: EscalationRule = EscalationRule {
    notify_family: true,
    notify_police: true,
    message: "[CRITICAL] CRITICAL THREAT -- SCAM CALL IN PROGRESS! \
              Emergency alert sent to family AND local cybercrime police. \
              Senior must HANG UP IMMEDIATELY. Do NOT share any information.",
};

/// Rule for a (possibly unresolved) threat level.
///
/// An unresolved level fails toward the least-disruptive action (the
/// SUSPICIOUS advisory), never toward silence and never toward full
/// escalation.
pub fn rule_for(level: Option<ThreatLevel>) -> &'static EscalationRule {
    match level {
        Some(ThreatLevel::Safe) => &SAFE_RULE,
        Some(ThreatLevel::HighRisk) => &HIGH_RISK_RULE,
        Some(ThreatLevel::Critical) => &CRITICAL_RULE,
        Some(ThreatLevel::Suspicious) | None => &SUSPICIOUS_RULE,
    }
}

/// Human-readable record of which notification classes were triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    pub family_notified: bool,
    pub police_notified: bool,
    pub report: String,
}

/// Dispatch boundary the run loop drives once a verdict exists.
pub trait ActionDispatcher {
    fn escalate(&self, level: Option<ThreatLevel>, summary: &str) -> ActionReport;
}

/// Console-simulation dispatcher: every notification is a structured log
/// line instead of a real SMS / incident report.
#[derive(Debug, Default)]
pub struct SimulatedAlerts;

impl SimulatedAlerts {
    fn notify_family(&self, level: Option<ThreatLevel>, summary: &str, timestamp: &str) {
        let level = level.map_or("UNKNOWN", |l| l.as_str());
        guardian_log!(
            Level::Warn,
            "alert",
            "[SMS] Family contact notified at {}: senior is on a {} risk call. Details: {}",
            timestamp,
            level,
            truncate(summary, 120)
        );
    }

    fn notify_police(&self, level: Option<ThreatLevel>, summary: &str, timestamp: &str) {
        let level = level.map_or("UNKNOWN", |l| l.as_str());
        guardian_log!(
            Level::Warn,
            "alert",
            "[POLICE] Cybercrime cell incident logged at {}: severity={}. Details: {}",
            timestamp,
            level,
            truncate(summary, 200)
        );
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

impl ActionDispatcher for SimulatedAlerts {
    fn escalate(&self, level: Option<ThreatLevel>, summary: &str) -> ActionReport {
        let rule = rule_for(level);
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let mut actions: Vec<&str> = Vec::new();

        if rule.notify_family {
            self.notify_family(level, summary, &timestamp);
            actions.push("[OK] Family notified via console simulation");
        }
        if rule.notify_police {
            self.notify_police(level, summary, &timestamp);
            actions.push("[OK] Cybercrime Police alerted via console simulation");
        }
        if actions.is_empty() {
            actions.push("[INFO] No external alerts sent (threat level: SAFE/SUSPICIOUS)");
        }

        let report = format!("{}\n\nActions taken:\n{}", rule.message, actions.join("\n"));

        ActionReport {
            family_notified: rule.notify_family,
            police_notified: rule.notify_police,
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_match_escalation_policy() {
        assert!(!rule_for(Some(ThreatLevel::Safe)).notify_family);
        assert!(!rule_for(Some(ThreatLevel::Suspicious)).notify_family);
        let high = rule_for(Some(ThreatLevel::HighRisk));
        assert!(high.notify_family && !high.notify_police);
        let critical = rule_for(Some(ThreatLevel::Critical));
        assert!(critical.notify_family && critical.notify_police);
    }

    #[test]
    fn unresolved_level_fails_toward_suspicious() {
        assert_eq!(rule_for(None), rule_for(Some(ThreatLevel::Suspicious)));
    }

    #[test]
    fn escalate_reports_actions_taken() {
        let dispatcher = SimulatedAlerts;
        let report = dispatcher.escalate(Some(ThreatLevel::Critical), "digital arrest call");
        assert!(report.family_notified);
        assert!(report.police_notified);
        assert!(report.report.contains("Actions taken:"));
        assert!(report.report.contains("Family notified"));
        assert!(report.report.contains("Police alerted"));
    }
}
