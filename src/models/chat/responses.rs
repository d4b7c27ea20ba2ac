use super::entities::{ChatMessage, ChatRoom};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct ChatRoomSummary {
    #[serde(flatten)]
    #[ts(flatten)]
    pub room: ChatRoom,
    pub last_message: Option<ChatMessage>,
    pub online_count: i64,
    // 当前用户在该房间的未读消息数
    pub unread_count: i64,
}

/// 带当前用户已读状态的消息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct ChatMessageView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub message: ChatMessage,
    pub read: bool,
}

impl ChatMessageView {
    pub fn for_user(message: ChatMessage, user_id: i64) -> Self {
        let read = message.is_read_by(user_id);
        Self { message, read }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct ChatRoomListResponse {
    pub items: Vec<ChatRoomSummary>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct MessageListResponse {
    pub items: Vec<ChatMessageView>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct ChatUnreadCountResponse {
    pub unread_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct MarkMessagesReadResponse {
    pub marked: i64,
}
