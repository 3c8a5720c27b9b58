pub mod board;
pub mod events;
pub mod repository;
pub mod session;

pub use board::BoardEngine;
pub use events::RepositoryEvent;
pub use repository::TaskRepository;
pub use session::{DragPayload, DragSessionController, TaskMove};
