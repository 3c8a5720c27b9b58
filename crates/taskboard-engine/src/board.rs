//! Board facade: wires the repository and the drag session controller
//! behind the surface the view composition layer consumes.

use crate::events::RepositoryEvent;
use crate::repository::TaskRepository;
use crate::session::{DragPayload, DragSessionController, TaskMove};
use std::sync::Arc;
use std::time::Duration;
use taskboard_domain::{seed_tasks, Task, TaskStatus};
use taskboard_persistence::{encode_tasks, BlobStore};
use tokio::sync::{broadcast, mpsc};

pub struct BoardEngine {
    repository: TaskRepository,
    session: DragSessionController,
}

impl BoardEngine {
    /// Engine without persistence, seeded with the bundled task list.
    pub fn new() -> Self {
        Self {
            repository: TaskRepository::new(seed_tasks()),
            session: DragSessionController::new(),
        }
    }

    /// Load from `store` under `key`, falling back to seed data when the
    /// blob is absent or invalid, and spawn the mirror loop that writes
    /// every mutation back out. Never fails: persistence trouble degrades
    /// to a seeded in-memory board.
    pub async fn load(store: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut repository = TaskRepository::load(store.as_ref(), &key, seed_tasks()).await;

        let (tx, rx) = mpsc::unbounded_channel();
        repository.set_mirror(tx);
        spawn_mirror(store, key, rx);

        Self {
            repository,
            session: DragSessionController::new(),
        }
    }

    /// Override the drag-end grace window (tests, non-animating hosts).
    pub fn with_session_grace(mut self, grace: Duration) -> Self {
        self.session = DragSessionController::with_grace(grace);
        self
    }

    // Query surface.

    pub fn filtered_tasks(&self) -> Vec<Task> {
        self.repository.filtered_tasks()
    }

    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.repository.tasks_by_status(status)
    }

    pub fn search_query(&self) -> &str {
        self.repository.search_query()
    }

    pub fn tasks(&self) -> &[Task] {
        self.repository.tasks()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RepositoryEvent> {
        self.repository.subscribe()
    }

    /// Published drag state, for view feedback (ghost cards, lane
    /// highlights). Read-only.
    pub fn session(&self) -> &DragSessionController {
        &self.session
    }

    // Mutation surface.

    pub fn update_task_status(&mut self, task_id: &str, new_status: TaskStatus) {
        self.repository.update_task_status(task_id, new_status);
    }

    pub fn reorder_tasks(&mut self, new_order: Vec<Task>) {
        self.repository.reorder_tasks(new_order);
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.repository.set_search_query(query);
    }

    pub fn reset_tasks(&mut self) {
        self.repository.reset_tasks();
    }

    // Drag session handlers, wired to raw input events by the view layer.

    /// Begin dragging the given task. Unknown ids are ignored.
    pub fn on_drag_start(&mut self, task_id: &str) {
        match self.repository.task(task_id) {
            Some(task) => {
                let task = task.clone();
                self.session.on_drag_start(&task);
            }
            None => {
                tracing::debug!("on_drag_start: unknown task id {task_id:?}, ignoring");
            }
        }
    }

    pub fn on_drag_over_column(&mut self, status: TaskStatus) {
        self.session.on_drag_over_column(status);
    }

    pub fn on_drag_leave_column(&mut self, status: TaskStatus) {
        self.session.on_drag_leave_column(status);
    }

    /// Complete the gesture over `target`. Applies at most one repository
    /// mutation per drop; returns the applied move, if any.
    pub fn on_drop(
        &mut self,
        target: TaskStatus,
        payload: Option<&DragPayload>,
    ) -> Option<TaskMove> {
        let mv = self.session.on_drop(target, payload)?;
        self.repository.update_task_status(&mv.task_id, mv.to);
        Some(mv)
    }

    pub fn on_drag_end(&mut self) {
        self.session.on_drag_end();
    }

    /// Advance deferred session cleanup. Hosts call this from their tick or
    /// animation-frame loop.
    pub fn tick(&mut self) {
        self.session.tick();
    }
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_mirror(
    store: Arc<dyn BlobStore>,
    key: String,
    mut rx: mpsc::UnboundedReceiver<Vec<Task>>,
) {
    tokio::spawn(async move {
        while let Some(tasks) = rx.recv().await {
            match encode_tasks(&tasks) {
                Ok(bytes) => {
                    if let Err(e) = store.set(&key, &bytes).await {
                        // Persistence is best-effort; the in-memory board
                        // stays authoritative.
                        tracing::warn!("Mirror write for {key:?} failed: {e}");
                    }
                }
                Err(e) => {
                    tracing::warn!("Mirror encode for {key:?} failed: {e}");
                }
            }
        }
        tracing::debug!("Mirror loop for {key:?} stopped");
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::{BoardError, BoardResult};
    use taskboard_persistence::MemoryBlobStore;

    const KEY: &str = "task-storage";

    fn engine() -> BoardEngine {
        BoardEngine::new().with_session_grace(Duration::ZERO)
    }

    async fn wait_for_blob(store: &MemoryBlobStore, key: &str) -> Vec<u8> {
        for _ in 0..100 {
            if let Some(blob) = store.get(key).await.unwrap() {
                return blob;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("mirror never wrote blob under {key:?}");
    }

    #[test]
    fn test_drag_lifecycle_applies_exactly_one_update() {
        let mut engine = engine();
        let task_id = engine.tasks_by_status(TaskStatus::Todo)[0].id.clone();

        engine.on_drag_start(&task_id);
        engine.on_drag_over_column(TaskStatus::Approved);
        engine.on_drag_over_column(TaskStatus::InProgress);

        let mv = engine.on_drop(TaskStatus::InProgress, None).unwrap();
        assert_eq!(mv.to, TaskStatus::InProgress);

        engine.on_drag_end();
        engine.tick();

        let task = engine
            .tasks()
            .iter()
            .find(|t| t.id == task_id)
            .unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert!(engine.session().is_idle());
    }

    #[test]
    fn test_same_column_drop_mutates_nothing() {
        let mut engine = engine();
        let before = engine.tasks().to_vec();
        let task_id = before
            .iter()
            .find(|t| t.status == TaskStatus::Todo)
            .unwrap()
            .id
            .clone();
        let mut rx = engine.subscribe();

        engine.on_drag_start(&task_id);
        assert!(engine.on_drop(TaskStatus::Todo, None).is_none());
        engine.on_drag_end();
        engine.tick();

        assert_eq!(engine.tasks(), before.as_slice());
        assert!(rx.try_recv().is_err());
        assert!(engine.session().is_idle());
    }

    #[test]
    fn test_drag_start_with_unknown_id_is_noop() {
        let mut engine = engine();

        engine.on_drag_start("nonexistent");
        assert!(engine.session().is_idle());
        assert!(engine.on_drop(TaskStatus::Approved, None).is_none());
    }

    #[tokio::test]
    async fn test_load_uses_seed_when_store_empty() {
        let store = Arc::new(MemoryBlobStore::new());
        let engine = BoardEngine::load(store, KEY).await;

        assert_eq!(engine.tasks(), seed_tasks().as_slice());
    }

    #[tokio::test]
    async fn test_load_uses_seed_when_blob_invalid() {
        let store = Arc::new(MemoryBlobStore::new());
        store.set(KEY, b"{{{ not json").await.unwrap();

        let engine = BoardEngine::load(store, KEY).await;
        assert_eq!(engine.tasks(), seed_tasks().as_slice());
    }

    mockall::mock! {
        Store {}

        #[async_trait::async_trait]
        impl BlobStore for Store {
            async fn get(&self, key: &str) -> BoardResult<Option<Vec<u8>>>;
            async fn set(&self, key: &str, blob: &[u8]) -> BoardResult<()>;
        }
    }

    #[tokio::test]
    async fn test_load_tolerates_store_read_failure() {
        let mut store = MockStore::new();
        store
            .expect_get()
            .returning(|_| Err(BoardError::Storage("disk on fire".to_string())));
        store
            .expect_set()
            .returning(|_, _| Err(BoardError::Storage("disk on fire".to_string())));

        let mut engine = BoardEngine::load(Arc::new(store), KEY).await;
        assert_eq!(engine.tasks(), seed_tasks().as_slice());

        // Mirror failures stay silent too.
        engine.update_task_status("1", TaskStatus::Approved);
        tokio::task::yield_now().await;
        assert_eq!(
            engine.tasks().iter().find(|t| t.id == "1").unwrap().status,
            TaskStatus::Approved
        );
    }

    #[tokio::test]
    async fn test_persistence_round_trip() {
        let store = Arc::new(MemoryBlobStore::new());

        let mut engine = BoardEngine::load(store.clone(), KEY).await;
        engine.on_drag_start("1");
        engine.on_drop(TaskStatus::Approved, None);
        engine.on_drag_end();

        wait_for_blob(&store, KEY).await;
        let expected = engine.tasks().to_vec();

        let reloaded = BoardEngine::load(store, KEY).await;
        assert_eq!(reloaded.tasks(), expected.as_slice());
        assert_eq!(
            reloaded.tasks().iter().find(|t| t.id == "1").unwrap().status,
            TaskStatus::Approved
        );
    }

    #[tokio::test]
    async fn test_round_trip_tolerates_loose_enum_strings() {
        let store = Arc::new(MemoryBlobStore::new());

        // A blob written by a sloppier producer: mixed-case enums.
        let blob = r#"[{
            "id": "1",
            "title": "Fix login bug",
            "description": "",
            "status": "In Progress",
            "priority": "HIGH",
            "assignee": { "name": "Maya Chen", "avatar": "🦊" },
            "dueDate": "2025-03-10",
            "comments": 7,
            "tags": ["bug", "auth"]
        }]"#;
        store.set(KEY, blob.as_bytes()).await.unwrap();

        let engine = BoardEngine::load(store, KEY).await;
        assert_eq!(engine.tasks().len(), 1);
        assert_eq!(engine.tasks()[0].status, TaskStatus::InProgress);
    }

    #[tokio::test]
    async fn test_mutations_mirrored_in_dispatch_order() {
        let store = Arc::new(MemoryBlobStore::new());
        let mut engine = BoardEngine::load(store.clone(), KEY).await;

        engine.update_task_status("1", TaskStatus::InProgress);
        engine.update_task_status("1", TaskStatus::Reject);

        // The final blob must reflect the last mutation, not a stale one.
        for _ in 0..100 {
            let blob = store.get(KEY).await.unwrap();
            if let Some(bytes) = blob {
                let tasks = taskboard_persistence::decode_tasks(&bytes).unwrap();
                if tasks.iter().any(|t| t.id == "1" && t.status == TaskStatus::Reject) {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("mirror never converged on the latest mutation");
    }
}
