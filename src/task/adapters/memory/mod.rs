//! In-memory adapters for tasks.

mod task;

pub use task::InMemoryTaskRepository;
