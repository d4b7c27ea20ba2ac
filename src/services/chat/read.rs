use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::{ChatService, load_room_for_participant};
use crate::models::ApiResponse;
use crate::models::chat::responses::{ChatUnreadCountResponse, MarkMessagesReadResponse};
use crate::services::common::{current_user, storage_failure};

pub async fn unread_count(
    service: &ChatService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    // 只统计仍在参与的聊天室
    let room_ids: Vec<i64> = match storage.list_user_chat_rooms(user.id).await {
        Ok(rooms) => rooms.into_iter().map(|r| r.id).collect(),
        Err(e) => return Ok(storage_failure("Failed to list chat rooms", e)),
    };

    match storage.count_unread_messages(user.id, &room_ids).await {
        Ok(unread_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ChatUnreadCountResponse { unread_count },
            "Unread count retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to count unread messages", e)),
    }
}

pub async fn mark_room_read(
    service: &ChatService,
    request: &HttpRequest,
    room_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_room_for_participant(&storage, room_id, &user).await {
        return Ok(resp);
    }

    match storage.mark_messages_read(room_id, user.id).await {
        Ok(marked) => {
            debug!("User {} marked {} message(s) read in room {}", user.id, marked, room_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                MarkMessagesReadResponse { marked },
                "Messages marked as read",
            )))
        }
        Err(e) => Ok(storage_failure("Failed to mark messages as read", e)),
    }
}
