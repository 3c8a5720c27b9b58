//! Drag gesture lifecycle.
//!
//! One controller tracks at most one active drag session:
//! `Idle -> Dragging -> {Dropped | Cancelled} -> Idle`. The controller never
//! mutates repository state itself; a completed gesture is translated into a
//! [`TaskMove`] request the owner applies through the repository.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use taskboard_domain::{Task, TaskId, TaskStatus};

/// How long session fields stay readable after the drag-end signal, so exit
/// animations referencing them can finish. Short enough that a human cannot
/// start the next gesture inside the window; a programmatic drag-start
/// resets the fields synchronously anyway.
const DRAG_END_GRACE: Duration = Duration::from_millis(100);

/// Typed message carried on the platform's drag-data channel.
///
/// Purely a serialization detail: the controller's own tracked state is the
/// authoritative source for a drop, and the payload is consulted only when
/// the session carries no state (a drop delivered without a tracked start).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub task_id: TaskId,
    pub from_status: TaskStatus,
}

impl DragPayload {
    pub fn new(task_id: impl Into<TaskId>, from_status: TaskStatus) -> Self {
        Self {
            task_id: task_id.into(),
            from_status,
        }
    }

    /// Parse a payload string. A malformed payload is not an error anywhere
    /// in the drop path, so this swallows parse failures into `None`.
    pub fn from_json(s: &str) -> Option<Self> {
        serde_json::from_str(s).ok()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// A validated move request produced by a completed drop gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMove {
    pub task_id: TaskId,
    pub from: TaskStatus,
    pub to: TaskStatus,
}

/// Tracks a single drag gesture: source task, source column, and the column
/// currently hovered.
pub struct DragSessionController {
    dragged_task: Option<Task>,
    dragged_from: Option<TaskStatus>,
    drag_over_column: Option<TaskStatus>,
    is_dragging: bool,
    ended_at: Option<Instant>,
    grace: Duration,
}

impl DragSessionController {
    pub fn new() -> Self {
        Self::with_grace(DRAG_END_GRACE)
    }

    /// Controller with a custom end-of-drag grace window. Tests and
    /// non-animating hosts use `Duration::ZERO`.
    pub fn with_grace(grace: Duration) -> Self {
        Self {
            dragged_task: None,
            dragged_from: None,
            drag_over_column: None,
            is_dragging: false,
            ended_at: None,
            grace,
        }
    }

    /// Begin a drag session for `task`.
    ///
    /// Always resets all session fields synchronously first, so a new drag
    /// started during a previous session's grace window never observes
    /// stale state.
    pub fn on_drag_start(&mut self, task: &Task) {
        self.reset();
        tracing::debug!("Drag start: task {} from {}", task.id, task.status);
        self.dragged_from = Some(task.status);
        self.dragged_task = Some(task.clone());
        self.is_dragging = true;
    }

    /// Hover entered a column. Last write wins.
    pub fn on_drag_over_column(&mut self, status: TaskStatus) {
        if self.is_dragging {
            self.drag_over_column = Some(status);
        }
    }

    /// Hover left a column. Only clears the hover state when it still points
    /// at that column, so a leave event racing the enter event of a nested
    /// or sibling zone cannot flicker the hover away.
    pub fn on_drag_leave_column(&mut self, status: TaskStatus) {
        if self.drag_over_column == Some(status) {
            self.drag_over_column = None;
        }
    }

    /// A drop fired over `target`. Returns the move request for a valid
    /// differing transition, `None` for a same-column drop (legal no-op) or
    /// a drop with no known source.
    ///
    /// The session's own state is authoritative; `payload` is the decoded
    /// drag-data message, used only when the session carries no state.
    pub fn on_drop(&mut self, target: TaskStatus, payload: Option<&DragPayload>) -> Option<TaskMove> {
        self.drag_over_column = None;

        let (task_id, from) = match (&self.dragged_task, self.dragged_from) {
            (Some(task), Some(from)) => (task.id.clone(), from),
            _ => {
                let payload = payload?;
                tracing::debug!("Drop without tracked session, using payload");
                (payload.task_id.clone(), payload.from_status)
            }
        };

        if from == target {
            tracing::debug!("Same-column drop for task {task_id}, no transition");
            return None;
        }

        tracing::debug!("Drop: task {task_id} {from} -> {target}");
        Some(TaskMove {
            task_id,
            from,
            to: target,
        })
    }

    /// The drag gesture ended (with or without a drop). Field clearing is
    /// deferred by the grace window; call [`tick`](Self::tick) to let it
    /// take effect.
    pub fn on_drag_end(&mut self) {
        self.ended_at = Some(Instant::now());
    }

    /// Advance deferred cleanup: clears the session once the grace window
    /// after drag-end has elapsed.
    pub fn tick(&mut self) {
        if let Some(ended_at) = self.ended_at {
            if ended_at.elapsed() >= self.grace {
                self.reset();
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// True when no session is active and nothing is pending cleanup.
    pub fn is_idle(&self) -> bool {
        !self.is_dragging
            && self.dragged_task.is_none()
            && self.dragged_from.is_none()
            && self.drag_over_column.is_none()
    }

    pub fn dragged_task(&self) -> Option<&Task> {
        self.dragged_task.as_ref()
    }

    pub fn dragged_from(&self) -> Option<TaskStatus> {
        self.dragged_from
    }

    pub fn drag_over_column(&self) -> Option<TaskStatus> {
        self.drag_over_column
    }

    fn reset(&mut self) {
        self.dragged_task = None;
        self.dragged_from = None;
        self.drag_over_column = None;
        self.is_dragging = false;
        self.ended_at = None;
    }
}

impl Default for DragSessionController {
    fn default() -> Self {
        Self::new()
    }
}
