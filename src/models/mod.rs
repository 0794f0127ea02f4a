pub mod completion;
pub mod entry;
pub mod routine;
pub mod target;
pub mod task;
