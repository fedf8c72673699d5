//! Tool execution backend abstraction trait.
//!
//! Allows swapping the real process launcher for a mock without changing
//! the orchestration logic.

use async_trait::async_trait;

use sast_core::ToolRun;

use crate::{RunnerError, ToolInvocation};

/// Executes a prepared tool invocation and captures its output.
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait ToolBackend: Send + Sync {
    /// Run the invocation to completion.
    ///
    /// A non-zero exit status is not an error: analyzers commonly exit
    /// non-zero when they report findings.
    ///
    /// # Errors
    /// Returns [`RunnerError::SpawnFailed`] if the program cannot be started.
    /// Returns [`RunnerError::Timeout`] if it exceeds the invocation timeout.
    async fn execute(&self, invocation: &ToolInvocation) -> Result<ToolRun, RunnerError>;
}
