use super::actions::Action;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

/// Future resolving to the action that reports its result.
pub type JobFuture = Pin<Box<dyn Future<Output = Action> + Send + 'static>>;

/// A unit of background work queued by a component.
pub struct Job {
    pub description: String,
    pub future: JobFuture,
}

impl Job {
    pub fn new<F>(description: impl Into<String>, future: F) -> Self
    where
        F: Future<Output = Action> + Send + 'static,
    {
        Self {
            description: description.into(),
            future: Box::pin(future),
        }
    }
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job").field("description", &self.description).finish()
    }
}

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: std::time::Instant,
}

/// Runs jobs on the tokio runtime and forwards their result actions to the
/// UI loop through an unbounded channel.
///
/// Tasks are never cancelled on navigation; stale results are filtered by
/// the receiving page.
pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
            },
            rx,
        )
    }

    /// Spawn a job; its output action is sent back when it completes.
    pub fn spawn(&mut self, job: Job) -> TaskId {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let action_sender = self.action_sender.clone();
        let future = job.future;
        let handle = tokio::spawn(async move {
            let action = future.await;
            // The receiver is gone only while shutting down.
            let _ = action_sender.send(action);
        });

        log::debug!("task {} started: {}", task_id, job.description);
        self.tasks.insert(
            task_id,
            BackgroundTask {
                id: task_id,
                handle,
                description: job.description,
                started_at: std::time::Instant::now(),
            },
        );
        task_id
    }

    /// Drop finished tasks and return their ids.
    pub fn cleanup_finished_tasks(&mut self) -> Vec<TaskId> {
        let finished: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.handle.is_finished())
            .map(|(id, _)| *id)
            .collect();

        for task_id in &finished {
            if let Some(task) = self.tasks.remove(task_id) {
                log::debug!(
                    "task {} finished after {:?}: {}",
                    task.id,
                    task.started_at.elapsed(),
                    task.description
                );
            }
        }

        finished
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        // Cancel all tasks when the manager is dropped
        self.cancel_all_tasks();
    }
}
