use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type TaskId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Approved,
    Reject,
}

impl TaskStatus {
    /// Every status, in swimlane order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Approved,
        TaskStatus::Reject,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "inprogress",
            TaskStatus::Approved => "approved",
            TaskStatus::Reject => "reject",
        }
    }

    /// Parse a status from an untrusted source. Case-insensitive, and
    /// tolerates spaces, hyphens, and underscores ("In Progress",
    /// "IN-PROGRESS"). Returns `None` for anything unrecognized.
    pub fn from_loose(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "todo" => Some(TaskStatus::Todo),
            "inprogress" => Some(TaskStatus::InProgress),
            "approved" => Some(TaskStatus::Approved),
            "reject" => Some(TaskStatus::Reject),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    /// Lenient counterpart of the serde representation, for untrusted
    /// persisted payloads.
    pub fn from_loose(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub name: String,
    pub avatar: String,
}

impl Assignee {
    pub fn new(name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}

/// A single card on the board.
///
/// `id` is unique and immutable after creation. `due_date`, `comments`,
/// and `tags` are display-only and never drive transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee: Assignee,
    pub due_date: NaiveDate,
    pub comments: u32,
    pub tags: Vec<String>,
}

impl Task {
    pub fn update_status(&mut self, status: TaskStatus) {
        self.status = status;
    }
}
