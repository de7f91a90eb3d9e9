pub mod loader;
pub mod types;

pub use loader::{convert_run_limits, convert_upstream_policy, load_master_config};
pub use types::{LoggingConfig, MasterConfig, RunLimits, UpstreamPolicy};
