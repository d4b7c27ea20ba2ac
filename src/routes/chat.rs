use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::chat::requests::{
    CreateChatRoomRequest, MessageHistoryQuery, SendMessageRequest,
};
use crate::services::ChatService;
use crate::utils::SafeRoomId;

static CHAT_SERVICE: Lazy<ChatService> = Lazy::new(ChatService::new_lazy);

pub async fn list_rooms(req: HttpRequest) -> ActixResult<HttpResponse> {
    CHAT_SERVICE.list_rooms(&req).await
}

pub async fn create_room(
    req: HttpRequest,
    body: web::Json<CreateChatRoomRequest>,
) -> ActixResult<HttpResponse> {
    CHAT_SERVICE.create_room(&req, body.into_inner()).await
}

pub async fn get_room(req: HttpRequest, path: SafeRoomId) -> ActixResult<HttpResponse> {
    CHAT_SERVICE.get_room(&req, path.0).await
}

pub async fn list_messages(
    req: HttpRequest,
    path: SafeRoomId,
    query: web::Query<MessageHistoryQuery>,
) -> ActixResult<HttpResponse> {
    CHAT_SERVICE
        .list_messages(&req, path.0, query.into_inner())
        .await
}

pub async fn send_message(
    req: HttpRequest,
    path: SafeRoomId,
    body: web::Json<SendMessageRequest>,
) -> ActixResult<HttpResponse> {
    CHAT_SERVICE
        .send_message(&req, path.0, body.into_inner())
        .await
}

pub async fn unread_count(req: HttpRequest) -> ActixResult<HttpResponse> {
    CHAT_SERVICE.unread_count(&req).await
}

pub async fn mark_room_read(req: HttpRequest, path: SafeRoomId) -> ActixResult<HttpResponse> {
    CHAT_SERVICE.mark_room_read(&req, path.0).await
}

// 发送消息按用户限流，需在 RequireJWT 之后执行
pub fn configure_chat_routes(cfg: &mut web::ServiceConfig, message_limit: RateLimit) {
    cfg.service(
        web::scope("/api/v1/chat")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/rooms")
                    .route(web::get().to(list_rooms))
                    .route(web::post().to(create_room)),
            )
            .route("/unread-count", web::get().to(unread_count))
            .route("/rooms/{room_id}", web::get().to(get_room))
            .route("/rooms/{room_id}/read", web::put().to(mark_room_read))
            .service(
                web::resource("/rooms/{room_id}/messages")
                    .route(web::get().to(list_messages))
                    .route(web::post().to(send_message).wrap(message_limit)),
            ),
    );
}
