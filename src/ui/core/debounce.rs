use super::actions::Action;
use super::task_manager::{TaskId, TaskManager};
use std::time::Duration;

/// Coalesces bursts of edits into one delayed `DebounceElapsed` action.
///
/// At most one timer is pending; scheduling again cancels it and starts a
/// fresh quiet period. Each schedule bumps the generation, so an elapsed
/// action that raced a cancellation is recognised as stale by [`fire`].
///
/// [`fire`]: Debouncer::fire
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
    pending: Option<TaskId>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Restart the quiet period. Returns the new generation.
    pub fn schedule(&mut self, tasks: &TaskManager) -> u64 {
        self.cancel(tasks);
        self.generation += 1;
        let generation = self.generation;
        self.pending = Some(tasks.spawn_delayed(
            self.delay,
            Action::DebounceElapsed { generation },
            format!("Debounce timer {}", generation),
        ));
        generation
    }

    /// Drop the pending timer, if any.
    pub fn cancel(&mut self, tasks: &TaskManager) {
        if let Some(task_id) = self.pending.take() {
            tasks.cancel(task_id);
        }
    }

    /// Consume an elapsed timer. True only for the current pending generation.
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.pending.is_some() && generation == self.generation {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
