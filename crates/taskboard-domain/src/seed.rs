//! Bundled seed data.
//!
//! Used as the initial canonical list when no persisted blob exists, and
//! by the repository reset operation.

use chrono::NaiveDate;

use crate::task::{Assignee, Task, TaskPriority, TaskStatus};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn task(
    id: &str,
    title: &str,
    description: &str,
    status: TaskStatus,
    priority: TaskPriority,
    assignee: Assignee,
    due_date: NaiveDate,
    comments: u32,
    tags: &[&str],
) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        status,
        priority,
        assignee,
        due_date,
        comments,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// The initial board contents, in canonical order.
pub fn seed_tasks() -> Vec<Task> {
    vec![
        task(
            "1",
            "Design login page",
            "Create responsive mockups for the new authentication flow",
            TaskStatus::Todo,
            TaskPriority::High,
            Assignee::new("Maya Chen", "🦊"),
            date(2025, 3, 14),
            4,
            &["design", "auth"],
        ),
        task(
            "2",
            "Fix login bug",
            "Session cookie expires while the user is still active",
            TaskStatus::Todo,
            TaskPriority::High,
            Assignee::new("Jonas Weber", "🐻"),
            date(2025, 3, 10),
            7,
            &["bug", "auth"],
        ),
        task(
            "3",
            "Update onboarding copy",
            "Rewrite the welcome emails with the new product naming",
            TaskStatus::Todo,
            TaskPriority::Low,
            Assignee::new("Priya Nair", "🦉"),
            date(2025, 3, 21),
            1,
            &["content"],
        ),
        task(
            "4",
            "Implement search endpoint",
            "Full-text search over tasks with pagination",
            TaskStatus::InProgress,
            TaskPriority::Medium,
            Assignee::new("Jonas Weber", "🐻"),
            date(2025, 3, 12),
            2,
            &["backend", "search"],
        ),
        task(
            "5",
            "Migrate billing tables",
            "Move invoices to the partitioned schema without downtime",
            TaskStatus::InProgress,
            TaskPriority::High,
            Assignee::new("Sofia Marques", "🐙"),
            date(2025, 3, 18),
            9,
            &["backend", "database"],
        ),
        task(
            "6",
            "Dashboard dark mode",
            "Token-based theming for all dashboard widgets",
            TaskStatus::Approved,
            TaskPriority::Medium,
            Assignee::new("Maya Chen", "🦊"),
            date(2025, 2, 28),
            5,
            &["design", "frontend"],
        ),
        task(
            "7",
            "Export board as CSV",
            "One row per task, columns match the card fields",
            TaskStatus::Approved,
            TaskPriority::Low,
            Assignee::new("Priya Nair", "🦉"),
            date(2025, 2, 20),
            0,
            &["frontend"],
        ),
        task(
            "8",
            "Inline video previews",
            "Autoplay muted previews in the activity feed",
            TaskStatus::Reject,
            TaskPriority::Low,
            Assignee::new("Sofia Marques", "🐙"),
            date(2025, 2, 14),
            12,
            &["frontend", "media"],
        ),
    ]
}
