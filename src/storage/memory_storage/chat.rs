//! 聊天室与消息存储操作

use super::MemoryStorage;
use crate::errors::{CampusError, Result};
use crate::models::chat::{
    entities::{ChatMessage, ChatRoom},
    requests::{CreateChatRoomRequest, NewChatMessage},
};

impl MemoryStorage {
    /// 创建聊天室，参与者去重
    pub async fn create_chat_room_impl(&self, req: CreateChatRoomRequest) -> Result<ChatRoom> {
        let mut participants: Vec<i64> = Vec::with_capacity(req.participants.len());
        for id in req.participants {
            if !participants.contains(&id) {
                participants.push(id);
            }
        }

        let now = chrono::Utc::now();
        Ok(self
            .chat_rooms
            .insert_with(|id| ChatRoom {
                id,
                name: req.name.trim().to_string(),
                course_id: req.course_id,
                participants,
                created_at: now,
            })
            .await)
    }

    /// 追加消息，聊天室必须存在
    pub async fn append_message_impl(&self, message: NewChatMessage) -> Result<ChatMessage> {
        if self.chat_rooms.get(message.chat_room_id).await.is_none() {
            return Err(CampusError::not_found(format!(
                "Chat room {} not found",
                message.chat_room_id
            )));
        }

        let now = chrono::Utc::now();
        Ok(self
            .messages
            .insert_with(|id| ChatMessage {
                id,
                chat_room_id: message.chat_room_id,
                sender_id: message.sender_id,
                content: message.content,
                timestamp: now,
                read_by: Vec::new(),
            })
            .await)
    }

    /// 将房间内他人发送的消息标记为 `user_id` 已读，返回新标记条数
    pub async fn mark_messages_read_impl(&self, room_id: i64, user_id: i64) -> Result<i64> {
        let marked = self
            .messages
            .update_where(
                |m| m.chat_room_id == room_id && !m.is_read_by(user_id),
                |m| m.read_by.push(user_id),
            )
            .await;
        Ok(marked as i64)
    }

    /// `user_id` 在给定房间中的未读消息总数
    pub async fn count_unread_messages_impl(&self, user_id: i64, room_ids: &[i64]) -> Result<i64> {
        let count = self
            .messages
            .count(|m| room_ids.contains(&m.chat_room_id) && !m.is_read_by(user_id))
            .await;
        Ok(count as i64)
    }

    /// 最近 `limit` 条消息，按时间升序
    pub async fn list_messages_impl(&self, room_id: i64, limit: usize) -> Result<Vec<ChatMessage>> {
        let mut messages = self.messages.filter(|m| m.chat_room_id == room_id).await;
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));

        let skip = messages.len().saturating_sub(limit);
        Ok(messages.split_off(skip))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::fixture_storage;
    use crate::models::chat::requests::{CreateChatRoomRequest, NewChatMessage};

    #[tokio::test]
    async fn test_list_messages_returns_latest_in_order() {
        let storage = fixture_storage();
        let all = storage.list_messages_impl(1, 50).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

        let latest = storage.list_messages_impl(1, 2).await.unwrap();
        let ids: Vec<i64> = latest.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert!(storage.list_messages_impl(404, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_message_requires_room() {
        let storage = fixture_storage();
        let err = storage
            .append_message_impl(NewChatMessage {
                chat_room_id: 404,
                sender_id: 3,
                content: "hello?".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");

        let message = storage
            .append_message_impl(NewChatMessage {
                chat_room_id: 3,
                sender_id: 3,
                content: "Sure, tomorrow?".to_string(),
            })
            .await
            .unwrap();
        let latest = storage.list_messages_impl(3, 1).await.unwrap();
        assert_eq!(latest[0].id, message.id);
    }

    #[tokio::test]
    async fn test_mark_read_skips_own_messages() {
        let storage = fixture_storage();
        // Linus 在房间 1 还有两条未读
        assert_eq!(storage.count_unread_messages_impl(4, &[1, 3]).await.unwrap(), 2);
        assert_eq!(storage.mark_messages_read_impl(1, 4).await.unwrap(), 2);
        assert_eq!(storage.count_unread_messages_impl(4, &[1, 3]).await.unwrap(), 0);
        // 再次标记没有新变化
        assert_eq!(storage.mark_messages_read_impl(1, 4).await.unwrap(), 0);

        // 新消息对发送者已读，对其他参与者未读
        storage
            .append_message_impl(NewChatMessage {
                chat_room_id: 1,
                sender_id: 4,
                content: "thanks all".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(storage.count_unread_messages_impl(4, &[1]).await.unwrap(), 0);
        assert_eq!(storage.count_unread_messages_impl(3, &[1]).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_room_dedups_participants() {
        let storage = fixture_storage();
        let room = storage
            .create_chat_room_impl(CreateChatRoomRequest {
                name: " Project team ".to_string(),
                course_id: None,
                participants: vec![3, 5, 3],
            })
            .await
            .unwrap();
        assert_eq!(room.name, "Project team");
        assert_eq!(room.participants, vec![3, 5]);
    }
}
