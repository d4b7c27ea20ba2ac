//! 用户存储操作

use super::MemoryStorage;
use crate::errors::Result;
use crate::models::{
    common::pagination::paginate,
    users::{entities::User, requests::UserListQuery, responses::UserListResponse},
};

impl MemoryStorage {
    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        Ok(self.users.get(id).await)
    }

    /// 通过用户名或邮箱获取用户（不区分大小写）
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let identifier = identifier.trim().to_lowercase();
        if identifier.is_empty() {
            return Ok(None);
        }

        Ok(self
            .users
            .find(|u| {
                u.username.to_lowercase() == identifier || u.email.to_lowercase() == identifier
            })
            .await)
    }

    /// 批量获取用户，按传入 ID 的顺序返回，不存在的 ID 被忽略
    pub async fn get_users_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<User>> {
        let found = self.users.filter(|u| ids.contains(&u.id)).await;
        Ok(ids
            .iter()
            .filter_map(|id| found.iter().find(|u| u.id == *id).cloned())
            .collect())
    }

    /// 列出用户（分页）
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut users = self
            .users
            .filter(|u| {
                if let Some(role) = query.role
                    && u.role != role
                {
                    return false;
                }
                match &search {
                    Some(keyword) => {
                        u.username.to_lowercase().contains(keyword)
                            || u.name.to_lowercase().contains(keyword)
                            || u.email.to_lowercase().contains(keyword)
                    }
                    None => true,
                }
            })
            .await;
        users.sort_by(|a, b| a.name.cmp(&b.name));

        let (items, pagination) =
            paginate(users, query.page.unwrap_or(1), query.size.unwrap_or(10));
        Ok(UserListResponse { items, pagination })
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now();
        Ok(self
            .users
            .update(id, |u| u.last_login = Some(now))
            .await
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::fixture_storage;
    use crate::models::users::{entities::UserRole, requests::UserListQuery};

    #[tokio::test]
    async fn test_lookup_by_username_or_email_ignores_case() {
        let storage = fixture_storage();
        let by_name = storage
            .get_user_by_username_or_email_impl("Grace.Hopper")
            .await
            .unwrap()
            .expect("user by username");
        let by_email = storage
            .get_user_by_username_or_email_impl("GRACE.HOPPER@campus.edu")
            .await
            .unwrap()
            .expect("user by email");
        assert_eq!(by_name.id, by_email.id);
        assert!(
            storage
                .get_user_by_username_or_email_impl("  ")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_get_users_by_ids_keeps_order() {
        let storage = fixture_storage();
        let users = storage.get_users_by_ids_impl(&[4, 999, 1]).await.unwrap();
        let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![4, 1]);
    }

    #[tokio::test]
    async fn test_list_users_filters_role_and_search() {
        let storage = fixture_storage();
        let professors = storage
            .list_users_with_pagination_impl(UserListQuery {
                role: Some(UserRole::Professor),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(professors.pagination.total, 2);
        assert!(professors.items.iter().all(|u| u.is_professor()));

        let searched = storage
            .list_users_with_pagination_impl(UserListQuery {
                search: Some("torvalds".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(searched.items.len(), 1);
        assert_eq!(searched.items[0].username, "linus.torvalds");
    }

    #[tokio::test]
    async fn test_update_last_login() {
        let storage = fixture_storage();
        assert!(storage.update_last_login_impl(3).await.unwrap());
        assert!(storage.get_user_by_id_impl(3).await.unwrap().unwrap().last_login.is_some());
        assert!(!storage.update_last_login_impl(404).await.unwrap());
    }
}
