//! 请求参数解析错误处理
//!
//! 把 actix 默认的纯文本错误换成统一的 `ApiResponse` 格式。

use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, PathError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(err: impl std::fmt::Display + std::fmt::Debug + 'static, message: String) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, response).into()
}

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("JSON payload error on {}: {}", req.path(), err);
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "Request body is too large".to_string()
        }
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {e}"),
        other => format!("Invalid request body: {other}"),
    };
    bad_request(err, message)
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Query string error on {}: {}", req.path(), err);
    let message = format!("Invalid query parameters: {err}");
    bad_request(err, message)
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!("Path parameter error on {}: {}", req.path(), err);
    let message = format!("Invalid path parameters: {err}");
    bad_request(err, message)
}
