//! 实时通道入口
//!
//! 浏览器无法在 WebSocket 握手中携带 `Authorization` 头，
//! access token 通过查询参数传入：`/api/v1/ws?token=<access_token>`。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::cache::ObjectCache;
use crate::middlewares::RateLimit;
use crate::middlewares::require_jwt::authenticate_token;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::WebSocketService;
use crate::storage::Storage;

#[derive(Debug, Deserialize)]
pub struct SocketQuery {
    pub token: Option<String>,
}

fn unauthorized(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(ErrorCode::Unauthorized, message))
}

pub async fn connect(
    req: HttpRequest,
    body: web::Payload,
    query: web::Query<SocketQuery>,
    message_limit: web::Data<RateLimit>,
) -> ActixResult<HttpResponse> {
    let Some(token) = query.token.as_deref().filter(|t| !t.is_empty()) else {
        return Ok(unauthorized("Unauthorized: missing access token"));
    };

    let storage = match req.app_data::<web::Data<Arc<dyn Storage>>>() {
        Some(storage) => storage.get_ref().clone(),
        None => {
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Storage is not configured",
            )));
        }
    };
    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone());

    let user = match authenticate_token(token, &storage, cache.as_ref()).await {
        Ok(user) => user,
        Err(message) => return Ok(unauthorized(&message)),
    };

    let (response, session, stream) = actix_ws::handle(&req, body)?;
    info!("Upgrading chat socket for user {}", user.id);
    actix_web::rt::spawn(WebSocketService::handle_connection(
        user.id,
        storage,
        message_limit.get_ref().clone(),
        session,
        stream,
    ));
    Ok(response)
}

// socket 发送的聊天消息与 HTTP 发送共用 `message_limit`
pub fn configure_websocket_routes(cfg: &mut web::ServiceConfig, message_limit: RateLimit) {
    cfg.service(
        web::resource("/api/v1/ws")
            .app_data(web::Data::new(message_limit))
            .route(web::get().to(connect)),
    );
}
