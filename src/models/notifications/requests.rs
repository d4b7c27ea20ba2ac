use super::entities::NotificationType;
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub unread_only: Option<bool>,
}

/// 内部创建通知请求（由作业、成绩、选课等流程触发）
#[derive(Debug, Clone)]
pub struct CreateNotificationRequest {
    pub user_id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
}
