pub mod task;
pub mod user;

pub use task::{NewTask, Task, TaskRow, TaskStatus, UnknownStatus};
pub use user::{NewUser, PublicUser, User};
