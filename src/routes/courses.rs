use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{
    CourseQueryParams, CreateCourseRequest, EnrollStudentRequest, RecordAttendanceRequest,
    UpdateCourseRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::{SafeCourseId, SafeStudentId};

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// 列出课程
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseQueryParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

pub async fn create_course(
    req: HttpRequest,
    body: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.create_course(&req, body.into_inner()).await
}

pub async fn get_course(req: HttpRequest, path: SafeCourseId) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, path.0).await
}

pub async fn update_course(
    req: HttpRequest,
    path: SafeCourseId,
    body: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_course(req: HttpRequest, path: SafeCourseId) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, path.0).await
}

// 选课（学生本人或教师代选）
pub async fn enroll_student(
    req: HttpRequest,
    path: SafeCourseId,
    body: web::Json<EnrollStudentRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .enroll_student(&req, path.0, body.into_inner())
        .await
}

// 退课
pub async fn drop_student(
    req: HttpRequest,
    course_id: SafeCourseId,
    student_id: SafeStudentId,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .drop_student(&req, course_id.0, student_id.0)
        .await
}

pub async fn record_attendance(
    req: HttpRequest,
    path: SafeCourseId,
    body: web::Json<RecordAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .record_attendance(&req, path.0, body.into_inner())
        .await
}

pub async fn list_attendance(req: HttpRequest, path: SafeCourseId) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_attendance(&req, path.0).await
}

pub async fn my_attendance(req: HttpRequest, path: SafeCourseId) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.my_attendance(&req, path.0).await
}

pub async fn get_roster(req: HttpRequest, path: SafeCourseId) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_roster(&req, path.0).await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列表按角色过滤
                    .route(web::get().to(list_courses))
                    .route(
                        web::post()
                            .to(create_course)
                            .wrap(middlewares::RequireRole::new(&UserRole::Professor)),
                    ),
            )
            .service(
                web::resource("/{course_id}")
                    // 成员资格在业务层检查
                    .route(web::get().to(get_course))
                    .route(
                        web::put()
                            .to(update_course)
                            .wrap(middlewares::RequireRole::new(&UserRole::Professor)),
                    )
                    .route(
                        web::delete()
                            .to(delete_course)
                            .wrap(middlewares::RequireRole::new(&UserRole::Professor)),
                    ),
            )
            .route("/{course_id}/students", web::post().to(enroll_student))
            .route(
                "/{course_id}/students/{student_id}",
                web::delete().to(drop_student),
            )
            .service(
                web::resource("/{course_id}/attendance")
                    .wrap(middlewares::RequireRole::new(&UserRole::Professor))
                    .route(web::get().to(list_attendance))
                    .route(web::post().to(record_attendance)),
            )
            .route("/{course_id}/attendance/me", web::get().to(my_attendance))
            .route(
                "/{course_id}/roster",
                web::get()
                    .to(get_roster)
                    .wrap(middlewares::RequireRole::new(&UserRole::Professor)),
            ),
    );
}
