use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::navigation::navigation_for;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::services::common::{storage_failure, validation_failure};
use crate::utils::jwt;
use crate::utils::validate::FieldErrors;

use super::AuthService;

/// 演示环境的登录：已知用户加任意非空密码即可通过
pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 1. 必填校验
    if let Err(msg) = FieldErrors::new()
        .require("username", &login_request.username)
        .require("password", &login_request.password)
        .finish()
    {
        return Ok(validation_failure(msg));
    }

    // 2. 根据用户名或邮箱获取用户信息
    let mut user = match storage
        .get_user_by_username_or_email(&login_request.username)
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                "Username or password is incorrect",
            )));
        }
        Err(e) => return Ok(storage_failure("Login failed", e)),
    };

    // 3. 更新最后登录时间
    let now = chrono::Utc::now();
    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for user {}: {}", user.id, e);
    } else {
        user.last_login = Some(now);
    }

    // 4. 生成令牌对
    let refresh_expiry = jwt::JwtUtils::refresh_token_expiry(login_request.remember_me);
    match user.generate_token_pair(Some(refresh_expiry)) {
        Ok(token_pair) => {
            tracing::info!("User {} logged in successfully", user.username);

            let response = LoginResponse {
                access_token: token_pair.access_token,
                expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
                navigation: navigation_for(user.role),
                user,
                created_at: now,
            };

            let refresh_cookie = jwt::JwtUtils::create_refresh_token_cookie(
                &token_pair.refresh_token,
                login_request.remember_me,
            );

            Ok(HttpResponse::Ok()
                .cookie(refresh_cookie)
                .json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}
