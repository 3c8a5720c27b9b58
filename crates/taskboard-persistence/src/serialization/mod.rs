pub mod task_codec;

pub use task_codec::{decode_tasks, encode_tasks};
