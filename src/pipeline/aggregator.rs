//! Per-run event aggregator.
//!
//! Reduces the ordered, possibly repeating stream of stage emissions to one
//! latest message per stage, preserving first-emission order. One aggregator
//! owns one run; construct (or `clear`) a fresh one per run and feed it from
//! exactly one producer sequence; it is not safe for concurrent mutation.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::Level;
use metrics::counter;

use crate::guardian_log;
use crate::pipeline::events::{AggregatedLog, LogEntry, StageEvent, StageId};

#[derive(Debug)]
struct StageSlot {
    content: String,
    /// Set once an authoritative record arrived; stale partials for this
    /// stage are discarded from then on.
    finalized: bool,
}

/// Latest-wins projection of stage emissions for a single pipeline run.
#[derive(Debug, Default)]
pub struct EventAggregator {
    latest: HashMap<StageId, StageSlot>,
    order: Vec<StageId>,
}

impl EventAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one stage emission. Returns `true` if the projection accepted
    /// the event. Unknown stage names and empty content are discarded
    /// without error: upstream chatter is noisy by nature.
    pub fn ingest(&mut self, event: StageEvent) -> bool {
        let Some(stage) = StageId::from_name(&event.stage) else {
            guardian_log!(Level::Debug, "aggregator", "Discarding event from unknown stage {:?}", event.stage);
            counter!("pipeline_events_discarded_total").increment(1);
            return false;
        };
        if event.content.is_empty() {
            counter!("pipeline_events_discarded_total").increment(1);
            return false;
        }

        match self.latest.entry(stage) {
            Entry::Occupied(mut occupied) => {
                let slot = occupied.get_mut();
                if slot.finalized && !event.is_final {
                    guardian_log!(Level::Debug, "aggregator", "Stale partial for finalized {} ignored", stage);
                    return false;
                }
                // Supersession: latest wins per stage, order untouched.
                slot.content = event.content;
                slot.finalized |= event.is_final;
            }
            Entry::Vacant(vacant) => {
                self.order.push(stage);
                vacant.insert(StageSlot { content: event.content, finalized: event.is_final });
            }
        }
        true
    }

    /// True iff no event was ever accepted.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// True once `stage` holds authoritative end-of-run content.
    pub fn is_finalized(&self, stage: StageId) -> bool {
        self.latest.get(&stage).is_some_and(|slot| slot.finalized)
    }

    /// Read-only snapshot of the current projection; callable at any time.
    pub fn snapshot(&self) -> AggregatedLog {
        let entries = self
            .order
            .iter()
            .map(|stage| LogEntry {
                stage: *stage,
                content: self.latest[stage].content.clone(),
            })
            .collect();
        AggregatedLog { entries }
    }

    /// Reset for reuse. State never leaks across runs.
    pub fn clear(&mut self) {
        self.latest.clear();
        self.order.clear();
    }
}
