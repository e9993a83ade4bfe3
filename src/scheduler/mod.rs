//! The generic method-scheduling engine (C3): configuration, iteration-log
//! filtering policy, and the `Scheduler` itself.

mod config;
mod runner;
mod types;

pub use config::SchedulerParameters;
pub use runner::{MethodSequence, Scheduler};
pub use types::should_log;
