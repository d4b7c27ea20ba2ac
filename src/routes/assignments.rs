use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{
    AssignmentQueryParams, CreateAssignmentRequest, GradeSubmissionRequest,
    SubmitAssignmentRequest, UpdateAssignmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AssignmentService;
use crate::utils::{SafeAssignmentId, SafeSubmissionId};

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 列出作业
pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentQueryParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(&req, query.into_inner())
        .await
}

// 发布作业
pub async fn create_assignment(
    req: HttpRequest,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, body.into_inner())
        .await
}

pub async fn get_assignment(req: HttpRequest, path: SafeAssignmentId) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_assignment(&req, path.0).await
}

pub async fn update_assignment(
    req: HttpRequest,
    path: SafeAssignmentId,
    body: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_assignment(
    req: HttpRequest,
    path: SafeAssignmentId,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete_assignment(&req, path.0).await
}

// 学生提交
pub async fn submit_assignment(
    req: HttpRequest,
    path: SafeAssignmentId,
    body: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .submit_assignment(&req, path.0, body.into_inner())
        .await
}

pub async fn list_submissions(
    req: HttpRequest,
    path: SafeAssignmentId,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_submissions(&req, path.0).await
}

// 批改提交
pub async fn grade_submission(
    req: HttpRequest,
    assignment_id: SafeAssignmentId,
    submission_id: SafeSubmissionId,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .grade_submission(&req, assignment_id.0, submission_id.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 学生与教师返回不同视图
                    .route(web::get().to(list_assignments))
                    .route(
                        web::post()
                            .to(create_assignment)
                            .wrap(middlewares::RequireRole::new(&UserRole::Professor)),
                    ),
            )
            .service(
                web::resource("/{assignment_id}")
                    .route(web::get().to(get_assignment))
                    .route(
                        web::put()
                            .to(update_assignment)
                            .wrap(middlewares::RequireRole::new(&UserRole::Professor)),
                    )
                    .route(
                        web::delete()
                            .to(delete_assignment)
                            .wrap(middlewares::RequireRole::new(&UserRole::Professor)),
                    ),
            )
            .service(
                web::resource("/{assignment_id}/submit")
                    .route(web::post().to(submit_assignment))
                    .wrap(middlewares::RequireRole::new(&UserRole::Student)),
            )
            .service(
                web::scope("/{assignment_id}/submissions")
                    .wrap(middlewares::RequireRole::new(&UserRole::Professor))
                    .route("", web::get().to(list_submissions))
                    .route("/{submission_id}/grade", web::put().to(grade_submission)),
            ),
    );
}
