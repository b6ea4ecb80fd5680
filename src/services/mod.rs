pub mod account_service;
pub mod task_service;

pub use account_service::AccountService;
pub use task_service::TaskService;
