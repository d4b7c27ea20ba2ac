pub mod analytics;

pub mod assignments;

pub mod auth;

pub mod calendar;

pub mod chat;

pub mod courses;

pub mod dashboard;

pub mod frontend;

pub mod grades;

pub mod navigation;

pub mod notes;

pub mod notifications;

pub mod users;

pub mod websocket;

pub use analytics::configure_analytics_routes;
pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use calendar::configure_calendar_routes;
pub use chat::configure_chat_routes;
pub use courses::configure_course_routes;
pub use dashboard::configure_dashboard_routes;
pub use frontend::configure_frontend_routes;
pub use grades::configure_grade_routes;
pub use navigation::configure_navigation_routes;
pub use notes::configure_note_routes;
pub use notifications::configure_notification_routes;
pub use users::configure_user_routes;
pub use websocket::configure_websocket_routes;

use actix_web::web;

use crate::middlewares::RateLimit;

/// 限流计数表，克隆后共享
#[derive(Clone)]
pub struct RouteLimits {
    pub login: RateLimit,
    pub refresh: RateLimit,
    pub chat_message: RateLimit,
}

impl Default for RouteLimits {
    fn default() -> Self {
        Self {
            login: RateLimit::login(),
            refresh: RateLimit::refresh_token(),
            chat_message: RateLimit::chat_message(),
        }
    }
}

/// 注册全部 API 路由，前端回退路由需在其后单独注册
pub fn configure_api_routes(cfg: &mut web::ServiceConfig, limits: RouteLimits) {
    configure_auth_routes(cfg, limits.login, limits.refresh);
    configure_navigation_routes(cfg);
    configure_user_routes(cfg);
    configure_course_routes(cfg);
    configure_assignment_routes(cfg);
    configure_grade_routes(cfg);
    configure_note_routes(cfg);
    configure_notification_routes(cfg);
    configure_chat_routes(cfg, limits.chat_message.clone());
    configure_calendar_routes(cfg);
    configure_dashboard_routes(cfg);
    configure_analytics_routes(cfg);
    configure_websocket_routes(cfg, limits.chat_message);
}
