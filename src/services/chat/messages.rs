use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::send::{DeliveryError, deliver_message};
use super::{ChatService, load_room_for_participant};
use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::models::ErrorCode;
use crate::models::chat::requests::{MessageHistoryQuery, SendMessageRequest};
use crate::models::chat::responses::{ChatMessageView, MessageListResponse};
use crate::services::common::{
    current_user, forbidden, not_found, storage_failure, validation_failure,
};

pub async fn list_messages(
    service: &ChatService,
    request: &HttpRequest,
    room_id: i64,
    query: MessageHistoryQuery,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_room_for_participant(&storage, room_id, &user).await {
        return Ok(resp);
    }

    let limit = query
        .limit
        .unwrap_or(AppConfig::get().chat.history_limit)
        .max(1);
    match storage.list_messages(room_id, limit).await {
        Ok(messages) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MessageListResponse {
                items: messages
                    .into_iter()
                    .map(|m| ChatMessageView::for_user(m, user.id))
                    .collect(),
            },
            "Messages retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list messages", e)),
    }
}

pub async fn send_message(
    service: &ChatService,
    request: &HttpRequest,
    room_id: i64,
    message: SendMessageRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match deliver_message(&storage, user.id, room_id, &message.content).await {
        Ok(saved) => Ok(HttpResponse::Created().json(ApiResponse::success(
            saved,
            "Message sent successfully",
        ))),
        Err(e @ DeliveryError::EmptyContent) => Ok(validation_failure(e.to_string())),
        Err(e @ DeliveryError::RoomNotFound(_)) => {
            Ok(not_found(ErrorCode::ChatRoomNotFound, e.to_string()))
        }
        Err(e @ DeliveryError::NotParticipant(_)) => {
            Ok(forbidden(ErrorCode::ChatPermissionDenied, e.to_string()))
        }
        Err(DeliveryError::Storage(e)) => Ok(storage_failure("Failed to send message", e)),
    }
}
