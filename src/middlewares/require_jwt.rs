/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>` 中的 access token，并把当前用户
 * 写入请求扩展，处理函数通过 `RequireJWT::extract_*` 读取。
 *
 * ```rust,ignore
 * web::scope("/api/v1/courses")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_courses))
 * ```
 *
 * 用户信息以 `user:{token}` 为键缓存，注销时删除。
 */

use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::middlewares::create_error_response;
use crate::models::ErrorCode;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

#[derive(Clone)]
pub struct RequireJWT;

/// 用户缓存键
pub fn user_cache_key(token: &str) -> String {
    format!("user:{token}")
}

/// 校验 access token 并加载用户，优先读缓存
pub async fn authenticate_token(
    token: &str,
    storage: &Arc<dyn Storage>,
    cache: Option<&Arc<dyn ObjectCache>>,
) -> Result<User, String> {
    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid or expired token".to_string()
    })?;

    let key = user_cache_key(token);
    if let Some(cache) = cache
        && let Some(user) = cache.get_json::<User>(&key).await
    {
        return Ok(user);
    }

    let user_id = claims
        .user_id()
        .map_err(|_| "Invalid user ID in token".to_string())?;
    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| format!("Failed to load user: {e}"))?
        .ok_or_else(|| "User not found".to_string())?;

    if let Some(cache) = cache {
        cache
            .insert_json(key, &user, AppConfig::get().cache.default_ttl)
            .await;
    }
    Ok(user)
}

async fn authenticate_request(req: &ServiceRequest) -> Result<User, String> {
    let token = JwtUtils::extract_bearer_token(req.request())
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| "Storage is not configured".to_string())?;
    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone());

    authenticate_token(&token, &storage, cache.as_ref()).await
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match authenticate_request(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for user {}", user.id);
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(err) => {
                    info!("JWT authentication failed for {}: {}", req.path(), err);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 当前登录用户
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }
}
