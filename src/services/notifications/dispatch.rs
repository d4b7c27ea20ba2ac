//! 业务事件触发的通知：写入存储后推送给在线用户
//!
//! 通知发送失败只记录日志，不影响触发它的业务操作。

use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::notifications::entities::NotificationType;
use crate::models::notifications::requests::CreateNotificationRequest;
use crate::services::websocket::push_notifications;
use crate::storage::Storage;

/// 一次通知的内容，发送给多个接收者
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
}

impl NotificationDraft {
    pub fn new(
        notification_type: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            notification_type,
            title: title.into(),
            message: message.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    fn for_user(&self, user_id: i64) -> CreateNotificationRequest {
        CreateNotificationRequest {
            user_id,
            notification_type: self.notification_type,
            title: self.title.clone(),
            message: self.message.clone(),
            link: self.link.clone(),
        }
    }
}

/// 给多个用户发送同一条通知，返回创建的条数
pub async fn notify_users(
    storage: &Arc<dyn Storage>,
    user_ids: &[i64],
    draft: NotificationDraft,
) -> usize {
    if user_ids.is_empty() {
        return 0;
    }

    let requests = user_ids.iter().map(|&id| draft.for_user(id)).collect();
    match storage.create_notifications_batch(requests).await {
        Ok(notifications) => {
            let created = notifications.len();
            let pushed = push_notifications(notifications);
            debug!(
                "Notification '{}' created for {} user(s), {} pushed live",
                draft.title, created, pushed
            );
            created
        }
        Err(e) => {
            warn!("Failed to create notification '{}': {}", draft.title, e);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_storage::test_support::fixture_storage;

    #[tokio::test]
    async fn test_notify_users_creates_one_per_recipient() {
        let storage: Arc<dyn Storage> = Arc::new(fixture_storage());
        let before = storage.get_unread_notification_count(1).await.unwrap();

        let draft = NotificationDraft::new(NotificationType::Announcement, "Hello", "World")
            .with_link("/courses/1");
        assert_eq!(notify_users(&storage, &[1, 2], draft).await, 2);

        let after = storage.get_unread_notification_count(1).await.unwrap();
        assert_eq!(after, before + 1);
    }

    #[tokio::test]
    async fn test_notify_nobody_is_noop() {
        let storage: Arc<dyn Storage> = Arc::new(fixture_storage());
        let draft = NotificationDraft::new(NotificationType::System, "t", "m");
        assert_eq!(notify_users(&storage, &[], draft).await, 0);
    }
}
