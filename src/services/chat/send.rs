//! 聊天消息投递，HTTP 接口与 WebSocket 共用

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::errors::CampusError;
use crate::models::chat::entities::ChatMessage;
use crate::models::chat::requests::NewChatMessage;
use crate::services::websocket::broadcast_chat_message;
use crate::storage::Storage;

#[derive(Debug)]
pub enum DeliveryError {
    EmptyContent,
    RoomNotFound(i64),
    NotParticipant(i64),
    Storage(CampusError),
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryError::EmptyContent => write!(f, "content is required"),
            DeliveryError::RoomNotFound(id) => write!(f, "Chat room {id} not found"),
            DeliveryError::NotParticipant(id) => {
                write!(f, "You are not a participant of chat room {id}")
            }
            DeliveryError::Storage(e) => write!(f, "Failed to store message: {}", e.message()),
        }
    }
}

impl From<CampusError> for DeliveryError {
    fn from(err: CampusError) -> Self {
        DeliveryError::Storage(err)
    }
}

/// 写入消息并广播给在线参与者（包括发送者本人）
pub async fn deliver_message(
    storage: &Arc<dyn Storage>,
    sender_id: i64,
    room_id: i64,
    content: &str,
) -> Result<ChatMessage, DeliveryError> {
    if content.trim().is_empty() {
        return Err(DeliveryError::EmptyContent);
    }

    let room = storage
        .get_chat_room_by_id(room_id)
        .await?
        .ok_or(DeliveryError::RoomNotFound(room_id))?;
    if !room.has_participant(sender_id) {
        return Err(DeliveryError::NotParticipant(room_id));
    }

    let message = storage
        .append_message(NewChatMessage {
            chat_room_id: room_id,
            sender_id,
            content: content.to_string(),
        })
        .await?;

    let delivered = broadcast_chat_message(&room.participants, message.clone());
    debug!(
        "Message {} in room {} delivered to {} online participant(s)",
        message.id, room_id, delivered
    );
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_storage::test_support::fixture_storage;

    fn storage() -> Arc<dyn Storage> {
        Arc::new(fixture_storage())
    }

    #[tokio::test]
    async fn test_participant_message_is_appended() {
        let storage = storage();
        let message = deliver_message(&storage, 3, 1, "see you at the lab")
            .await
            .unwrap();
        assert_eq!(message.chat_room_id, 1);
        assert_eq!(message.sender_id, 3);

        let history = storage.list_messages(1, 50).await.unwrap();
        assert_eq!(history.last().map(|m| m.id), Some(message.id));
    }

    #[tokio::test]
    async fn test_rejections() {
        let storage = storage();
        // 用户 6 不在房间 1
        assert!(matches!(
            deliver_message(&storage, 6, 1, "hi").await,
            Err(DeliveryError::NotParticipant(1))
        ));
        assert!(matches!(
            deliver_message(&storage, 3, 999, "hi").await,
            Err(DeliveryError::RoomNotFound(999))
        ));
        assert!(matches!(
            deliver_message(&storage, 3, 1, "   ").await,
            Err(DeliveryError::EmptyContent)
        ));
    }
}
