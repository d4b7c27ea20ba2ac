pub mod messages;
pub mod read;
pub mod rooms;
pub mod send;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::chat::entities::ChatRoom;
use crate::models::chat::requests::{CreateChatRoomRequest, MessageHistoryQuery, SendMessageRequest};
use crate::models::users::entities::User;
use crate::services::common::{forbidden, not_found, storage_failure};
use crate::storage::Storage;

pub struct ChatService {
    storage: Option<Arc<dyn Storage>>,
}

impl ChatService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 当前用户参与的聊天室
    pub async fn list_rooms(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        rooms::list_rooms(self, request).await
    }

    pub async fn get_room(&self, request: &HttpRequest, room_id: i64) -> ActixResult<HttpResponse> {
        rooms::get_room(self, request, room_id).await
    }

    pub async fn create_room(
        &self,
        request: &HttpRequest,
        room_data: CreateChatRoomRequest,
    ) -> ActixResult<HttpResponse> {
        rooms::create_room(self, request, room_data).await
    }

    // 聊天记录，按时间升序
    pub async fn list_messages(
        &self,
        request: &HttpRequest,
        room_id: i64,
        query: MessageHistoryQuery,
    ) -> ActixResult<HttpResponse> {
        messages::list_messages(self, request, room_id, query).await
    }

    // 通过 HTTP 发送消息，效果与 socket 发送相同
    pub async fn send_message(
        &self,
        request: &HttpRequest,
        room_id: i64,
        message: SendMessageRequest,
    ) -> ActixResult<HttpResponse> {
        messages::send_message(self, request, room_id, message).await
    }

    // 当前用户所有聊天室的未读消息总数
    pub async fn unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        read::unread_count(self, request).await
    }

    pub async fn mark_room_read(
        &self,
        request: &HttpRequest,
        room_id: i64,
    ) -> ActixResult<HttpResponse> {
        read::mark_room_read(self, request, room_id).await
    }
}

/// 聊天室只对参与者可见
async fn load_room_for_participant(
    storage: &Arc<dyn Storage>,
    room_id: i64,
    user: &User,
) -> Result<ChatRoom, HttpResponse> {
    match storage.get_chat_room_by_id(room_id).await {
        Ok(Some(room)) if room.has_participant(user.id) => Ok(room),
        Ok(Some(_)) => Err(forbidden(
            ErrorCode::ChatPermissionDenied,
            "You are not a participant of this chat room",
        )),
        Ok(None) => Err(not_found(ErrorCode::ChatRoomNotFound, "Chat room not found")),
        Err(e) => Err(storage_failure("Failed to load chat room", e)),
    }
}
