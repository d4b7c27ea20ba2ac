use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use crate::middlewares::require_jwt::user_cache_key;
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 处理用户登出
/// 清除 refresh_token cookie，并移除该 access token 对应的用户缓存
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(token) = JwtUtils::extract_bearer_token(request)
        && let Some(cache) = service.get_cache(request)
    {
        cache.remove(&user_cache_key(&token)).await;
        debug!("Evicted cached user for logged out token");
    }

    // max_age=0 会让浏览器删除该 cookie
    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();

    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::<()>::success_empty("Logged out successfully")))
}
