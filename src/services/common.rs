//! 各业务服务共用的请求辅助函数

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};
use tracing::error;

use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::courses::entities::Course;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 当前登录用户，缺失时返回 401 响应
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user information",
        ))
    })
}

/// 存储层错误转换为响应，5xx 记录日志
pub(crate) fn storage_failure(context: &str, err: CampusError) -> HttpResponse {
    let status = err.status_code();
    if status.is_server_error() {
        error!("{}: {}", context, err);
    }
    HttpResponse::build(status).json(ApiResponse::error_empty(
        ErrorCode::from(&err),
        format!("{context}: {}", err.message()),
    ))
}

pub(crate) fn validation_failure(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ValidationFailed,
        message,
    ))
}

pub(crate) fn forbidden(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) async fn load_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
) -> Result<Course, HttpResponse> {
    match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => Ok(course),
        Ok(None) => Err(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Err(storage_failure("Failed to load course", e)),
    }
}

/// 课程成员（任课教师或已选课学生）才能访问
pub(crate) async fn load_course_for_member(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    user: &User,
) -> Result<Course, HttpResponse> {
    let course = load_course(storage, course_id).await?;
    if !course.is_member(user.id) {
        return Err(forbidden(
            ErrorCode::CoursePermissionDenied,
            "You are not a member of this course",
        ));
    }
    Ok(course)
}

/// 仅任课教师可以管理课程
pub(crate) async fn load_course_for_instructor(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    user: &User,
) -> Result<Course, HttpResponse> {
    let course = load_course(storage, course_id).await?;
    if !course.is_instructor(user.id) {
        return Err(forbidden(
            ErrorCode::CoursePermissionDenied,
            "Only the course instructor can perform this action",
        ));
    }
    Ok(course)
}
