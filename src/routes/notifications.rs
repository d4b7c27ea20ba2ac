use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::notifications::requests::NotificationQueryParams;
use crate::services::NotificationService;
use crate::utils::SafeNotificationId;

// 懒加载的全局 NotificationService 实例
static NOTIFICATION_SERVICE: Lazy<NotificationService> =
    Lazy::new(NotificationService::new_lazy);

pub async fn list_notifications(
    req: HttpRequest,
    query: web::Query<NotificationQueryParams>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .list_notifications(&req, query.into_inner())
        .await
}

pub async fn get_unread_count(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.get_unread_count(&req).await
}

pub async fn mark_as_read(req: HttpRequest, path: SafeNotificationId) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_as_read(&req, path.0).await
}

pub async fn mark_all_as_read(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_all_as_read(&req).await
}

pub async fn delete_notification(
    req: HttpRequest,
    path: SafeNotificationId,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.delete_notification(&req, path.0).await
}

// 配置路由
pub fn configure_notification_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_notifications))
            .route("/unread-count", web::get().to(get_unread_count))
            .route("/read-all", web::put().to(mark_all_as_read))
            .route("/{notification_id}/read", web::put().to(mark_as_read))
            .route("/{notification_id}", web::delete().to(delete_notification)),
    );
}
