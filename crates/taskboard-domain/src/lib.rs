pub mod search;
pub mod seed;
pub mod swimlane;
pub mod task;

pub use seed::seed_tasks;
pub use swimlane::{Swimlane, SwimlaneColor};
pub use task::{Assignee, Task, TaskId, TaskPriority, TaskStatus};
