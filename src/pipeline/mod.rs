
pub mod aggregator;
pub mod events;
pub mod runner;
pub mod source;
pub mod verdict;

pub use aggregator::EventAggregator;
pub use events::{AggregatedLog, LogEntry, StageEvent, StageId};
pub use runner::{consume, run_pipeline, PipelineError, PipelineOutcome};
pub use source::{AnalysisInput, StageSource};
pub use verdict::{extract_verdict, Verdict};
