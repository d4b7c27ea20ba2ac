use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::requests::{CreateGradeRequest, GradeQueryParams, UpdateGradeRequest};
use crate::models::users::entities::UserRole;
use crate::services::GradeService;
use crate::utils::SafeGradeId;

static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeQueryParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(&req, query.into_inner()).await
}

pub async fn create_grade(
    req: HttpRequest,
    body: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.create_grade(&req, body.into_inner()).await
}

pub async fn update_grade(
    req: HttpRequest,
    path: SafeGradeId,
    body: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .update_grade(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_grade(req: HttpRequest, path: SafeGradeId) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.delete_grade(&req, path.0).await
}

// 学生成绩汇总
pub async fn get_summary(req: HttpRequest) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_summary(&req).await
}

pub fn configure_grade_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_grades))
                    .route(
                        web::post()
                            .to(create_grade)
                            .wrap(middlewares::RequireRole::new(&UserRole::Professor)),
                    ),
            )
            .service(
                web::resource("/summary")
                    .route(web::get().to(get_summary))
                    .wrap(middlewares::RequireRole::new(&UserRole::Student)),
            )
            .service(
                web::resource("/{grade_id}")
                    .route(web::put().to(update_grade))
                    .route(web::delete().to(delete_grade))
                    .wrap(middlewares::RequireRole::new(&UserRole::Professor)),
            ),
    );
}
