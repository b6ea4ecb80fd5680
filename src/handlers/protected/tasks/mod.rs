pub mod create;
pub mod list;
pub mod update;

use serde::Serialize;

use crate::database::models::Task;

pub use create::task_create;
pub use list::task_list;
pub use update::task_update;

#[derive(Debug, Serialize)]
pub struct TaskBody {
    pub task: Task,
}

#[derive(Debug, Serialize)]
pub struct TaskListBody {
    pub tasks: Vec<Task>,
}
