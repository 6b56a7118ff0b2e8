pub mod assignments;
pub mod auth;
pub mod common;
pub mod courses;
pub mod enrollments;
pub mod reports;
pub mod submissions;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;

/// 程序启动时间，注入 app data 用于运行时长统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
