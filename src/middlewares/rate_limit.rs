/*!
 * 速率限制中间件
 *
 * 固定时间窗口计数。每个 `RateLimit` 实例持有自己的计数表，
 * 克隆后共享同一张表，因此应在 `HttpServer::new` 之外创建，
 * 再克隆进各个 worker。
 *
 * ```rust,ignore
 * let login_limit = RateLimit::login();
 * HttpServer::new(move || {
 *     App::new().service(
 *         web::resource("/api/v1/auth/login")
 *             .wrap(login_limit.clone())
 *             .route(web::post().to(login)),
 *     )
 * })
 * ```
 *
 * 已登录请求按用户 ID 计数，否则按客户端 IP 计数。超限返回 429。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode, users::entities::User};

#[derive(Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// 速率限制配置
#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window: Duration,
    key_prefix: String,
    windows: Cache<String, Window>,
}

/// 本次计数后的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: u64 },
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        let window = Duration::from_secs(window_secs.max(1));
        Self {
            max_requests,
            window,
            key_prefix: String::new(),
            windows: Cache::builder()
                .time_to_live(window)
                .max_capacity(100_000)
                .build(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 登录：5 次/分钟/IP
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }

    /// 刷新令牌：10 次/分钟
    pub fn refresh_token() -> Self {
        Self::new(10, 60).with_prefix("refresh")
    }

    /// 聊天消息：30 条/分钟/用户
    pub fn chat_message() -> Self {
        Self::new(30, 60).with_prefix("chat")
    }

    fn cache_key(&self, identifier: &str) -> String {
        if self.key_prefix.is_empty() {
            identifier.to_string()
        } else {
            format!("{}:{}", self.key_prefix, identifier)
        }
    }

    /// 按用户计数，HTTP 接口与 socket 使用相同的键
    pub async fn check_user(&self, user_id: i64) -> RateDecision {
        self.check(&user_identifier(user_id)).await
    }

    /// 为 `identifier` 计数一次
    pub async fn check(&self, identifier: &str) -> RateDecision {
        let key = self.cache_key(identifier);
        let now = Instant::now();

        let current = match self.windows.get(&key).await {
            Some(w) if now.duration_since(w.started) < self.window => w,
            _ => Window {
                started: now,
                count: 0,
            },
        };

        if current.count >= self.max_requests {
            let elapsed = now.duration_since(current.started);
            let retry_after = self.window.saturating_sub(elapsed).as_secs().max(1);
            return RateDecision::Limited { retry_after };
        }

        let next = Window {
            count: current.count + 1,
            ..current
        };
        self.windows.insert(key, next).await;
        RateDecision::Allowed {
            remaining: self.max_requests - next.count,
        }
    }
}

fn user_identifier(user_id: i64) -> String {
    format!("user:{user_id}")
}

/// 客户端 IP：优先连接地址，其次反向代理头
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ip) = connection_ip.as_deref().and_then(parse_ip) {
        return ip;
    }

    for header in ["X-Forwarded-For", "X-Real-IP"] {
        if let Some(value) = req.headers().get(header)
            && let Ok(value) = value.to_str()
            && let Some(ip) = value.split(',').next().and_then(parse_ip)
        {
            return ip;
        }
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

/// 接受 `ip` 或 `ip:port`
fn parse_ip(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(ip) = raw.parse::<IpAddr>() {
        return Some(ip.to_string());
    }
    raw.parse::<std::net::SocketAddr>()
        .ok()
        .map(|addr| addr.ip().to_string())
}

fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .json(ApiResponse::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let limit = self.limit.clone();

        Box::pin(async move {
            let user_id = req.extensions().get::<User>().map(|user| user.id);
            let identifier = match user_id {
                Some(id) => user_identifier(id),
                None => format!("ip:{}", extract_client_ip(&req)),
            };

            match limit.check(&identifier).await {
                RateDecision::Allowed { .. } => Ok(srv.call(req).await?.map_into_left_body()),
                RateDecision::Limited { retry_after } => {
                    warn!(
                        "Rate limit exceeded for {} on {} ({} per {}s)",
                        identifier,
                        req.path(),
                        limit.max_requests,
                        limit.window.as_secs()
                    );
                    Ok(req.into_response(
                        create_rate_limit_response(retry_after).map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window, Duration::from_secs(60));
        assert_eq!(login.key_prefix, "login");
        assert_eq!(RateLimit::refresh_token().max_requests, 10);
    }

    #[tokio::test]
    async fn test_fixed_window_blocks_after_limit() {
        let limit = RateLimit::new(2, 60).with_prefix("test");
        assert_eq!(limit.check("ip:1.2.3.4").await, RateDecision::Allowed { remaining: 1 });
        assert_eq!(limit.check("ip:1.2.3.4").await, RateDecision::Allowed { remaining: 0 });
        assert!(matches!(
            limit.check("ip:1.2.3.4").await,
            RateDecision::Limited { .. }
        ));
        // 不同来源互不影响
        assert_eq!(limit.check("ip:5.6.7.8").await, RateDecision::Allowed { remaining: 1 });
    }

    #[tokio::test]
    async fn test_clones_share_counters_but_instances_do_not() {
        let a = RateLimit::new(1, 60);
        let b = a.clone();
        assert!(matches!(a.check("k").await, RateDecision::Allowed { .. }));
        assert!(matches!(b.check("k").await, RateDecision::Limited { .. }));

        let fresh = RateLimit::new(1, 60);
        assert!(matches!(fresh.check("k").await, RateDecision::Allowed { .. }));
    }

    #[test]
    fn test_parse_ip_accepts_socket_addr() {
        assert_eq!(parse_ip("10.0.0.1"), Some("10.0.0.1".to_string()));
        assert_eq!(parse_ip("10.0.0.1:8080"), Some("10.0.0.1".to_string()));
        assert_eq!(parse_ip("garbage"), None);
    }
}
