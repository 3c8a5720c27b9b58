use serde::{Deserialize, Serialize};

use crate::task::TaskStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwimlaneColor {
    Blue,
    Orange,
    Green,
    Red,
}

/// A status column. Derived from `TaskStatus`, never persisted: the set of
/// lanes is fixed and total over the status enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swimlane {
    pub id: TaskStatus,
    pub title: &'static str,
    pub color: SwimlaneColor,
}

impl Swimlane {
    /// The four board columns, in display order.
    pub fn all() -> [Swimlane; 4] {
        TaskStatus::ALL.map(Swimlane::for_status)
    }

    pub fn for_status(status: TaskStatus) -> Swimlane {
        match status {
            TaskStatus::Todo => Swimlane {
                id: TaskStatus::Todo,
                title: "To Do",
                color: SwimlaneColor::Blue,
            },
            TaskStatus::InProgress => Swimlane {
                id: TaskStatus::InProgress,
                title: "In Progress",
                color: SwimlaneColor::Orange,
            },
            TaskStatus::Approved => Swimlane {
                id: TaskStatus::Approved,
                title: "Approved",
                color: SwimlaneColor::Green,
            },
            TaskStatus::Reject => Swimlane {
                id: TaskStatus::Reject,
                title: "Reject",
                color: SwimlaneColor::Red,
            },
        }
    }
}
