use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::AnalyticsService;
use crate::utils::SafeCourseId;

static ANALYTICS_SERVICE: Lazy<AnalyticsService> = Lazy::new(AnalyticsService::new_lazy);

pub async fn get_overview(req: HttpRequest) -> ActixResult<HttpResponse> {
    ANALYTICS_SERVICE.get_overview(&req).await
}

pub async fn get_course_analytics(
    req: HttpRequest,
    path: SafeCourseId,
) -> ActixResult<HttpResponse> {
    ANALYTICS_SERVICE.get_course_analytics(&req, path.0).await
}

// 仅教师可见
pub fn configure_analytics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/analytics")
            .wrap(middlewares::RequireRole::new(&UserRole::Professor))
            .wrap(middlewares::RequireJWT)
            .route("/overview", web::get().to(get_overview))
            .route("/courses/{course_id}", web::get().to(get_course_analytics)),
    );
}
