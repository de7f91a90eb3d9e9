
pub mod level;
pub mod lexicon;
pub mod scorer;

pub use level::{classify, ThreatLevel};
pub use scorer::{analyze, AnalysisResult};
