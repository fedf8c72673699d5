//! Concurrent tool orchestration over a [`ToolBackend`].

use std::sync::Arc;

use tokio::task::JoinSet;

use sast_core::ToolRun;

use crate::{RunnerError, ToolBackend, ToolInvocation};

/// Runs a batch of tool invocations in parallel.
///
/// Each invocation gets its own task; results come back in the order the
/// invocations were given, independent of completion order.
pub struct ToolOrchestrator<B: ToolBackend + 'static> {
    backend: Arc<B>,
}

impl<B: ToolBackend + 'static> ToolOrchestrator<B> {
    /// Create a new orchestrator backed by the given backend.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self { backend: Arc::new(backend) }
    }

    /// Execute every invocation concurrently.
    ///
    /// Never fails as a whole: each element carries its own outcome, so one
    /// broken tool does not hide the others.
    pub async fn run_all(&self, invocations: Vec<ToolInvocation>) -> Vec<Result<ToolRun, RunnerError>> {
        let mut join_set = JoinSet::new();
        let total = invocations.len();

        for (index, invocation) in invocations.into_iter().enumerate() {
            let backend = Arc::clone(&self.backend);
            join_set.spawn(async move { (index, backend.execute(&invocation).await) });
        }

        let mut slots: Vec<Option<Result<ToolRun, RunnerError>>> =
            std::iter::repeat_with(|| None).take(total).collect();
        let mut lost = Vec::new();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => lost.push(e.to_string()),
            }
        }

        // A panicked task loses its index; fill the empty slots with the join errors.
        let mut lost = lost.into_iter();
        slots
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| {
                    Err(RunnerError::TaskJoin(
                        lost.next().unwrap_or_else(|| "task result missing".to_owned()),
                    ))
                })
            })
            .collect()
    }
}
