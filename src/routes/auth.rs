use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::auth::requests::LoginRequest;
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn login(
    req: HttpRequest,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(user_data.into_inner(), &req).await
}

pub async fn refresh_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(&request).await
}

pub async fn logout(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&request).await
}

pub async fn verify_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.verify_token(&request).await
}

pub async fn get_user(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_user(&request).await
}

/// 限流实例需要跨 worker 共享，由调用方在 `HttpServer::new` 之外创建
pub fn configure_auth_routes(
    cfg: &mut web::ServiceConfig,
    login_limit: RateLimit,
    refresh_limit: RateLimit,
) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limit)
                    .route(web::post().to(login)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(refresh_limit)
                    .route(web::post().to(refresh_token)),
            )
            .route("/logout", web::post().to(logout))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/verify-token", web::get().to(verify_token))
                    .route("/me", web::get().to(get_user)),
            ),
    );
}
