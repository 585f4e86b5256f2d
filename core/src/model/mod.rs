pub mod range;
pub mod task;
