//! Configuration loading and concurrent execution of external SAST tools.
//!
//! Resolves tool configs into command lines, launches them as child
//! processes, and collects their raw output as [`sast_core::ToolRun`]s.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod backend;
pub mod config;
pub mod error;
pub mod invocation;
pub mod orchestrator;
pub mod process;

pub use backend::ToolBackend;
pub use config::{load_config, Config, Defaults};
pub use error::{ConfigError, RunnerError};
pub use invocation::{ToolInvocation, DEFAULT_TIMEOUT};
pub use orchestrator::ToolOrchestrator;
pub use process::ProcessBackend;
