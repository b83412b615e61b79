use super::actions::Action;
use super::requests::RequestId;
use crate::model::{FilterField, PageRequest};
use crate::service::{CatalogService, QueryService, RecordLoader};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: tokio::time::Instant,
}

/// Spawns background work and reports its outcome as an [`Action`].
///
/// Every asynchronous result re-enters the UI through the action channel
/// returned by [`TaskManager::new`]. Clones share the same task table.
#[derive(Clone)]
pub struct TaskManager {
    tasks: Arc<Mutex<HashMap<TaskId, BackgroundTask>>>,
    next_task_id: Arc<AtomicU64>,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: Arc::new(Mutex::new(HashMap::new())),
                next_task_id: Arc::new(AtomicU64::new(1)),
                action_sender: tx,
            },
            rx,
        )
    }

    /// Sender for collaborators that emit actions directly.
    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_sender.clone()
    }

    fn spawn<Fut>(&self, description: String, work: Fut) -> TaskId
    where
        Fut: Future<Output = Action> + Send + 'static,
    {
        let task_id = self.next_task_id.fetch_add(1, Ordering::Relaxed);
        let action_sender = self.action_sender.clone();

        let handle = tokio::spawn(async move {
            let action = work.await;
            let _ = action_sender.send(action);
        });

        let task = BackgroundTask {
            id: task_id,
            handle,
            description,
            started_at: tokio::time::Instant::now(),
        };

        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.insert(task_id, task);
        }
        task_id
    }

    /// Spawn a page query tagged with `request_id`
    pub fn spawn_page_query(
        &self,
        request_id: RequestId,
        service: Arc<dyn QueryService>,
        request: PageRequest,
    ) -> TaskId {
        let description = format!("Query page {} (request {})", request.page_number, request_id);
        self.spawn(description, async move {
            let result = service.get_items(request).await;
            Action::PageLoaded { request_id, result }
        })
    }

    /// Spawn a single record load tagged with `request_id`
    pub fn spawn_record_load(&self, request_id: RequestId, loader: Arc<dyn RecordLoader>, item_id: String) -> TaskId {
        let description = format!("Load matter '{}' (request {})", item_id, request_id);
        self.spawn(description, async move {
            let result = loader.load(&item_id).await;
            Action::RecordLoaded { request_id, result }
        })
    }

    /// Spawn a catalog load for one filter field
    pub fn spawn_catalog_load(&self, field: FilterField, service: Arc<dyn CatalogService>) -> TaskId {
        let description = format!("Load {} catalog", field);
        self.spawn(description, async move {
            let result = service.get_categories(field).await;
            Action::CatalogLoaded { field, result }
        })
    }

    /// Deliver `action` after `delay` unless cancelled first
    pub fn spawn_delayed(&self, delay: Duration, action: Action, description: String) -> TaskId {
        self.spawn(description, async move {
            tokio::time::sleep(delay).await;
            action
        })
    }

    /// Abort a task; its action will never be delivered
    pub fn cancel(&self, task_id: TaskId) -> bool {
        let task = self.tasks.lock().ok().and_then(|mut tasks| tasks.remove(&task_id));
        match task {
            Some(task) => {
                task.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Drop finished tasks from the table, returning their descriptions
    pub fn cleanup_finished_tasks(&self) -> Vec<(TaskId, String)> {
        let Ok(mut tasks) = self.tasks.lock() else {
            return Vec::new();
        };

        let finished: Vec<TaskId> = tasks
            .iter()
            .filter(|(_, task)| task.handle.is_finished())
            .map(|(id, _)| *id)
            .collect();

        finished
            .into_iter()
            .filter_map(|id| tasks.remove(&id).map(|task| (id, task.description)))
            .collect()
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&self) {
        if let Ok(mut tasks) = self.tasks.lock() {
            for (_, task) in tasks.drain() {
                task.handle.abort();
            }
        }
    }

    /// Get the number of tracked tasks
    pub fn task_count(&self) -> usize {
        self.tasks.lock().map(|tasks| tasks.len()).unwrap_or(0)
    }

    /// Tasks running for longer than `threshold`
    pub fn long_running(&self, threshold: Duration) -> Vec<String> {
        self.tasks
            .lock()
            .map(|tasks| {
                tasks
                    .values()
                    .filter(|task| !task.handle.is_finished() && task.started_at.elapsed() > threshold)
                    .map(|task| task.description.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}
