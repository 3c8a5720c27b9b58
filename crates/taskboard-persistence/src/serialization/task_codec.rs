//! Codec for the persisted task blob.
//!
//! The blob is a bare ordered JSON array of task records with no envelope
//! and no version field, so the decode path never trusts its shape: enum
//! fields arrive as free-form strings and are coerced through the domain's
//! lenient parsers. A single unrecognized value fails the whole decode and
//! the caller falls back to seed data.

use chrono::NaiveDate;
use serde::Deserialize;
use taskboard_core::{BoardError, BoardResult};
use taskboard_domain::{Assignee, Task, TaskPriority, TaskStatus};

/// Loosely-typed wire form of a task record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    status: String,
    priority: String,
    assignee: AssigneeRecord,
    due_date: String,
    #[serde(default)]
    comments: u32,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AssigneeRecord {
    name: String,
    #[serde(default)]
    avatar: String,
}

impl TaskRecord {
    fn into_task(self) -> BoardResult<Task> {
        let status = TaskStatus::from_loose(&self.status).ok_or_else(|| {
            BoardError::Serialization(format!(
                "task {}: unrecognized status {:?}",
                self.id, self.status
            ))
        })?;
        let priority = TaskPriority::from_loose(&self.priority).ok_or_else(|| {
            BoardError::Serialization(format!(
                "task {}: unrecognized priority {:?}",
                self.id, self.priority
            ))
        })?;
        let due_date = NaiveDate::parse_from_str(&self.due_date, "%Y-%m-%d").map_err(|e| {
            BoardError::Serialization(format!("task {}: bad due date: {e}", self.id))
        })?;

        Ok(Task {
            id: self.id,
            title: self.title,
            description: self.description,
            status,
            priority,
            assignee: Assignee::new(self.assignee.name, self.assignee.avatar),
            due_date,
            comments: self.comments,
            tags: self.tags,
        })
    }
}

/// Decode a persisted blob into well-typed tasks, preserving order.
pub fn decode_tasks(bytes: &[u8]) -> BoardResult<Vec<Task>> {
    let records: Vec<TaskRecord> = serde_json::from_slice(bytes)
        .map_err(|e| BoardError::Serialization(e.to_string()))?;
    records.into_iter().map(TaskRecord::into_task).collect()
}

/// Encode tasks into the persisted blob shape.
pub fn encode_tasks(tasks: &[Task]) -> BoardResult<Vec<u8>> {
    serde_json::to_vec_pretty(tasks).map_err(|e| BoardError::Serialization(e.to_string()))
}
