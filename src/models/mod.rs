pub mod analytics;
pub mod assignments;
pub mod auth;
pub mod calendar;
pub mod chat;
pub mod common;
pub mod courses;
pub mod dashboard;
pub mod grades;
pub mod navigation;
pub mod notes;
pub mod notifications;
pub mod users;

pub use common::{ApiResponse, ErrorCode, PaginationInfo, PaginationQuery};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
