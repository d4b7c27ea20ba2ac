use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ChatService, load_room_for_participant};
use crate::models::ApiResponse;
use crate::models::chat::entities::ChatRoom;
use crate::models::chat::requests::CreateChatRoomRequest;
use crate::models::chat::responses::{ChatRoomListResponse, ChatRoomSummary};
use crate::services::common::{
    current_user, load_course_for_member, storage_failure, validation_failure,
};
use crate::services::websocket::ConnectionManager;
use crate::storage::Storage;
use crate::utils::validate::FieldErrors;

pub async fn list_rooms(service: &ChatService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let rooms = match storage.list_user_chat_rooms(user.id).await {
        Ok(rooms) => rooms,
        Err(e) => return Ok(storage_failure("Failed to list chat rooms", e)),
    };

    let mut items = Vec::with_capacity(rooms.len());
    for room in rooms {
        match summarize_room(&storage, room, user.id).await {
            Ok(summary) => items.push(summary),
            Err(resp) => return Ok(resp),
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ChatRoomListResponse { items },
        "Chat rooms retrieved successfully",
    )))
}

pub async fn get_room(
    service: &ChatService,
    request: &HttpRequest,
    room_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let room = match load_room_for_participant(&storage, room_id, &user).await {
        Ok(room) => room,
        Err(resp) => return Ok(resp),
    };
    match summarize_room(&storage, room, user.id).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Chat room retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}

pub async fn create_room(
    service: &ChatService,
    request: &HttpRequest,
    mut room_data: CreateChatRoomRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(msg) = FieldErrors::new()
        .require("name", &room_data.name)
        .finish()
    {
        return Ok(validation_failure(msg));
    }

    if let Some(course_id) = room_data.course_id
        && let Err(resp) = load_course_for_member(&storage, course_id, &user).await
    {
        return Ok(resp);
    }

    // 创建者自动加入
    if !room_data.participants.contains(&user.id) {
        room_data.participants.push(user.id);
    }

    match storage.get_users_by_ids(&room_data.participants).await {
        Ok(found) => {
            let missing: Vec<String> = room_data
                .participants
                .iter()
                .filter(|id| !found.iter().any(|u| u.id == **id))
                .map(|id| id.to_string())
                .collect();
            if !missing.is_empty() {
                return Ok(validation_failure(format!(
                    "Unknown participant(s): {}",
                    missing.join(", ")
                )));
            }
        }
        Err(e) => return Ok(storage_failure("Failed to load participants", e)),
    }

    match storage.create_chat_room(room_data).await {
        Ok(room) => {
            info!("Chat room {} created by user {}", room.id, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                room,
                "Chat room created successfully",
            )))
        }
        Err(e) => Ok(storage_failure("Chat room creation failed", e)),
    }
}

async fn summarize_room(
    storage: &Arc<dyn Storage>,
    room: ChatRoom,
    user_id: i64,
) -> Result<ChatRoomSummary, HttpResponse> {
    let last_message = match storage.list_messages(room.id, 1).await {
        Ok(mut messages) => messages.pop(),
        Err(e) => return Err(storage_failure("Failed to load messages", e)),
    };
    let unread_count = match storage.count_unread_messages(user_id, &[room.id]).await {
        Ok(count) => count,
        Err(e) => return Err(storage_failure("Failed to count unread messages", e)),
    };
    let online_count = ConnectionManager::get().online_count_in(&room.participants) as i64;
    Ok(ChatRoomSummary {
        room,
        last_message,
        online_count,
        unread_count,
    })
}
