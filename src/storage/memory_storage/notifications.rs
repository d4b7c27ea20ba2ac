//! 通知存储操作

use super::MemoryStorage;
use crate::errors::Result;
use crate::models::{
    common::pagination::paginate,
    notifications::{
        entities::Notification,
        requests::{CreateNotificationRequest, NotificationQueryParams},
        responses::NotificationListResponse,
    },
};

fn build_notification(id: i64, req: CreateNotificationRequest) -> Notification {
    Notification {
        id,
        user_id: req.user_id,
        notification_type: req.notification_type,
        title: req.title,
        message: req.message,
        read: false,
        link: req.link,
        timestamp: chrono::Utc::now(),
    }
}

impl MemoryStorage {
    /// 创建通知
    pub async fn create_notification_impl(
        &self,
        req: CreateNotificationRequest,
    ) -> Result<Notification> {
        Ok(self
            .notifications
            .insert_with(|id| build_notification(id, req))
            .await)
    }

    /// 批量创建通知
    pub async fn create_notifications_batch_impl(
        &self,
        reqs: Vec<CreateNotificationRequest>,
    ) -> Result<Vec<Notification>> {
        let mut notifications = Vec::with_capacity(reqs.len());
        for req in reqs {
            notifications.push(
                self.notifications
                    .insert_with(|id| build_notification(id, req))
                    .await,
            );
        }
        Ok(notifications)
    }

    /// 列出用户通知（分页，最新在前）
    pub async fn list_notifications_with_pagination_impl(
        &self,
        user_id: i64,
        query: NotificationQueryParams,
    ) -> Result<NotificationListResponse> {
        let (page, size) = query.pagination.normalized();
        let unread_only = query.unread_only.unwrap_or(false);

        let mut notifications = self
            .notifications
            .filter(|n| n.user_id == user_id && (!unread_only || !n.read))
            .await;
        notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));

        let (items, pagination) = paginate(notifications, page, size);
        Ok(NotificationListResponse { items, pagination })
    }

    /// 未读数量
    pub async fn get_unread_notification_count_impl(&self, user_id: i64) -> Result<i64> {
        Ok(self
            .notifications
            .count(|n| n.user_id == user_id && !n.read)
            .await as i64)
    }

    /// 标记单条已读
    pub async fn mark_notification_as_read_impl(&self, notification_id: i64) -> Result<bool> {
        Ok(self
            .notifications
            .update(notification_id, |n| n.read = true)
            .await
            .is_some())
    }

    /// 标记全部已读，返回本次标记的条数
    pub async fn mark_all_notifications_as_read_impl(&self, user_id: i64) -> Result<i64> {
        Ok(self
            .notifications
            .update_where(|n| n.user_id == user_id && !n.read, |n| n.read = true)
            .await as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::fixture_storage;
    use crate::models::common::PaginationQuery;
    use crate::models::notifications::{
        entities::NotificationType,
        requests::{CreateNotificationRequest, NotificationQueryParams},
    };

    fn query(unread_only: bool) -> NotificationQueryParams {
        NotificationQueryParams {
            pagination: PaginationQuery::default(),
            unread_only: Some(unread_only),
        }
    }

    #[tokio::test]
    async fn test_unread_count_and_mark_all() {
        let storage = fixture_storage();
        assert_eq!(storage.get_unread_notification_count_impl(3).await.unwrap(), 2);

        assert_eq!(storage.mark_all_notifications_as_read_impl(3).await.unwrap(), 2);
        assert_eq!(storage.get_unread_notification_count_impl(3).await.unwrap(), 0);
        // 重复标记不会再计数
        assert_eq!(storage.mark_all_notifications_as_read_impl(3).await.unwrap(), 0);
        // 其他用户不受影响
        assert_eq!(storage.get_unread_notification_count_impl(4).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_unread_only_newest_first() {
        let storage = fixture_storage();
        let all = storage
            .list_notifications_with_pagination_impl(3, query(false))
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 4);
        assert!(all.items.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));

        let unread = storage
            .list_notifications_with_pagination_impl(3, query(true))
            .await
            .unwrap();
        assert_eq!(unread.items.len(), 2);
        assert!(unread.items.iter().all(|n| !n.read));
    }

    #[tokio::test]
    async fn test_create_batch_and_mark_read() {
        let storage = fixture_storage();
        let reqs = [5, 6]
            .into_iter()
            .map(|user_id| CreateNotificationRequest {
                user_id,
                notification_type: NotificationType::Announcement,
                title: "Exam moved".to_string(),
                message: "The final exam moved to Monday.".to_string(),
                link: None,
            })
            .collect();
        let created = storage.create_notifications_batch_impl(reqs).await.unwrap();
        assert_eq!(created.len(), 2);
        assert_ne!(created[0].id, created[1].id);
        assert!(created.iter().all(|n| !n.read));

        assert!(storage.mark_notification_as_read_impl(created[0].id).await.unwrap());
        assert_eq!(storage.get_unread_notification_count_impl(5).await.unwrap(), 0);
        assert!(!storage.mark_notification_as_read_impl(404).await.unwrap());
    }
}
