//! Local child-process backend.

use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use tokio::process::Command;

use sast_core::ToolRun;

use crate::backend::ToolBackend;
use crate::{RunnerError, ToolInvocation};

/// Runs analyzers as local child processes.
///
/// The child is killed if the future is dropped, which is how the
/// timeout is enforced.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessBackend;

impl ProcessBackend {
    /// Create a new process backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ToolBackend for ProcessBackend {
    async fn execute(&self, invocation: &ToolInvocation) -> Result<ToolRun, RunnerError> {
        let tool = invocation.tool_name.as_str();
        tracing::info!(tool, "running");
        tracing::debug!(tool, command = %invocation.command_line(), "executing");

        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RunnerError::SpawnFailed {
                tool: tool.to_owned(),
                program: invocation.program.clone(),
                source,
            })?;

        let started_at = Utc::now();
        let wall_start = Instant::now();

        let output = tokio::time::timeout(invocation.timeout, child.wait_with_output())
            .await
            .map_err(|_| RunnerError::Timeout {
                tool: tool.to_owned(),
                timeout: invocation.timeout,
            })??;

        let duration = wall_start.elapsed();
        let exit_code = output.status.code();

        match exit_code {
            Some(0) => {}
            Some(code) => tracing::warn!(
                tool,
                exit_code = code,
                "non-zero exit (normal for tools reporting findings)"
            ),
            None => tracing::warn!(tool, "terminated by signal"),
        }

        tracing::info!(
            tool,
            elapsed_ms = duration.as_millis(),
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "finished"
        );

        Ok(ToolRun::new(
            tool,
            exit_code,
            output.stdout,
            output.stderr,
            started_at,
            duration,
        ))
    }
}
