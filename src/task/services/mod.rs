//! Application services for tasks.

mod board;

pub use board::{
    CheckboxEditRequest, CreateTaskRequest, TaskBoardError, TaskBoardResult, TaskBoardService,
    TaskDetails, UpdateTaskRequest,
};
