use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 通知类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub enum NotificationType {
    Assignment,
    Grade,
    Announcement,
    Message,
    System,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NotificationType::Assignment => "assignment",
            NotificationType::Grade => "grade",
            NotificationType::Announcement => "announcement",
            NotificationType::Message => "message",
            NotificationType::System => "system",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    // 前端跳转路径
    #[serde(default)]
    pub link: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
