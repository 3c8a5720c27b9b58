//! Canonical task state ownership.
//!
//! The repository is the single writer for the board's task list and search
//! query. Everything else (drag controller, view composition) holds derived
//! read copies and funnels writes through the mutation methods here.

use crate::events::RepositoryEvent;
use taskboard_domain::search::{CompositeSearcher, TaskSearcher};
use taskboard_domain::{Task, TaskStatus};
use taskboard_persistence::{decode_tasks, BlobStore};
use tokio::sync::{broadcast, mpsc};

/// Capacity for the subscriber channel; events are tiny and subscribers
/// re-query on receipt, so lagging receivers only miss redundant wakeups.
const EVENT_CHANNEL_CAPACITY: usize = 64;

pub struct TaskRepository {
    tasks: Vec<Task>,
    search_query: String,
    seed: Vec<Task>,
    events: broadcast::Sender<RepositoryEvent>,
    mirror_tx: Option<mpsc::UnboundedSender<Vec<Task>>>,
}

impl TaskRepository {
    /// Create a repository seeded with the given task list.
    pub fn new(seed: Vec<Task>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            tasks: seed.clone(),
            search_query: String::new(),
            seed,
            events,
            mirror_tx: None,
        }
    }

    /// Load the canonical list from the store, falling back to `seed` when
    /// the blob is absent or fails to decode. Store failures are never
    /// fatal here.
    pub async fn load(store: &dyn BlobStore, key: &str, seed: Vec<Task>) -> Self {
        let mut repo = Self::new(seed);
        match store.get(key).await {
            Ok(Some(bytes)) => match decode_tasks(&bytes) {
                Ok(tasks) => {
                    tracing::info!("Loaded {} tasks from store key {key:?}", tasks.len());
                    repo.tasks = tasks;
                }
                Err(e) => {
                    tracing::warn!("Persisted blob under {key:?} is invalid, using seed data: {e}");
                }
            },
            Ok(None) => {
                tracing::info!("No persisted blob under {key:?}, using seed data");
            }
            Err(e) => {
                tracing::warn!("Store read for {key:?} failed, using seed data: {e}");
            }
        }
        repo
    }

    /// Attach the persistence mirror channel. Every canonical-list mutation
    /// sends a snapshot; the receiving loop writes it out fire-and-forget.
    pub fn set_mirror(&mut self, tx: mpsc::UnboundedSender<Vec<Task>>) {
        self.mirror_tx = Some(tx);
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<RepositoryEvent> {
        self.events.subscribe()
    }

    /// The full canonical list, in order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Find a task by id.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Tasks matching the current search query, canonical order preserved.
    ///
    /// The query is matched case-insensitively as a substring of the title,
    /// description, any tag, or the assignee name. An empty query returns
    /// the full list.
    pub fn filtered_tasks(&self) -> Vec<Task> {
        if self.search_query.is_empty() {
            return self.tasks.clone();
        }
        let searcher = CompositeSearcher::all(self.search_query.as_str());
        self.tasks
            .iter()
            .filter(|task| searcher.matches(task))
            .cloned()
            .collect()
    }

    /// `filtered_tasks()` restricted to one status.
    ///
    /// The four per-status views partition the filtered set exactly: every
    /// filtered task appears in precisely one of them.
    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<Task> {
        if self.search_query.is_empty() {
            return self
                .tasks
                .iter()
                .filter(|task| task.status == status)
                .cloned()
                .collect();
        }
        self.filtered_tasks()
            .into_iter()
            .filter(|task| task.status == status)
            .collect()
    }

    /// Replace the status of the matching task in place. The task keeps its
    /// position in the canonical list; an unknown id is a silent no-op.
    pub fn update_task_status(&mut self, task_id: &str, new_status: TaskStatus) {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                tracing::debug!(
                    "Task {task_id}: {} -> {new_status}",
                    task.status
                );
                task.update_status(new_status);
                self.notify(RepositoryEvent::TasksChanged);
                self.mirror();
            }
            None => {
                tracing::debug!("update_task_status: unknown task id {task_id:?}, ignoring");
            }
        }
    }

    /// Replace the canonical list wholesale, for reorders within or across
    /// columns. The replacement must be a permutation of the current list
    /// (same task ids); anything that drops or duplicates a task is
    /// rejected as a no-op.
    pub fn reorder_tasks(&mut self, new_order: Vec<Task>) {
        if !same_id_multiset(&self.tasks, &new_order) {
            tracing::warn!(
                "reorder_tasks: replacement list does not match current task set \
                 ({} -> {} tasks), ignoring",
                self.tasks.len(),
                new_order.len()
            );
            return;
        }
        self.tasks = new_order;
        self.notify(RepositoryEvent::TasksChanged);
        self.mirror();
    }

    /// Replace the search query verbatim; matching is applied at read time.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.notify(RepositoryEvent::SearchChanged);
    }

    /// Restore the seed list and clear the search query. A recovery action,
    /// not a normal lifecycle step.
    pub fn reset_tasks(&mut self) {
        self.tasks = self.seed.clone();
        self.search_query.clear();
        self.notify(RepositoryEvent::TasksChanged);
        self.notify(RepositoryEvent::SearchChanged);
        self.mirror();
    }

    fn notify(&self, event: RepositoryEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn mirror(&self) {
        if let Some(tx) = &self.mirror_tx {
            // Fire-and-forget: a closed mirror loop must not block mutations.
            let _ = tx.send(self.tasks.clone());
        }
    }
}

fn same_id_multiset(a: &[Task], b: &[Task]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a_ids: Vec<&str> = a.iter().map(|t| t.id.as_str()).collect();
    let mut b_ids: Vec<&str> = b.iter().map(|t| t.id.as_str()).collect();
    a_ids.sort_unstable();
    b_ids.sort_unstable();
    a_ids == b_ids
}
