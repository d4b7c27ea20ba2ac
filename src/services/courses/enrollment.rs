use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::errors::CampusError;
use crate::models::courses::entities::Course;
use crate::models::courses::requests::EnrollStudentRequest;
use crate::models::notifications::entities::NotificationType;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    current_user, forbidden, load_course, not_found, storage_failure, validation_failure,
};
use crate::services::notifications::dispatch::{NotificationDraft, notify_users};
use crate::storage::Storage;

pub async fn enroll_student(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    enroll_data: EnrollStudentRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let course = match load_course(&storage, course_id).await {
        Ok(course) => course,
        Err(resp) => return Ok(resp),
    };

    let student_id = match resolve_target_student(&user, &course, enroll_data.student_id) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_student_account(&storage, student_id).await {
        return Ok(resp);
    }

    match storage.enroll_student(course_id, student_id).await {
        Ok(Some(updated)) => {
            info!("Student {} enrolled in course {}", student_id, updated.code);
            notify_enrollment(&storage, &user, &updated, student_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                updated,
                "Student enrolled successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(CampusError::Conflict(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::AlreadyEnrolled, msg))),
        Err(e) => Ok(storage_failure("Enrollment failed", e)),
    }
}

pub async fn drop_student(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let course = match load_course(&storage, course_id).await {
        Ok(course) => course,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = resolve_target_student(&user, &course, Some(student_id)) {
        return Ok(resp);
    }

    match storage.drop_student(course_id, student_id).await {
        Ok(Some(updated)) => {
            info!("Student {} dropped from course {}", student_id, updated.code);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                updated,
                "Student dropped successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(CampusError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotEnrolled, msg))),
        Err(e) => Ok(storage_failure("Drop failed", e)),
    }
}

/// 学生只能操作自己，教师只能操作自己任教的课程
fn resolve_target_student(
    user: &User,
    course: &Course,
    requested: Option<i64>,
) -> Result<i64, HttpResponse> {
    match user.role {
        UserRole::Student => match requested {
            Some(id) if id != user.id => Err(forbidden(
                ErrorCode::PermissionDenied,
                "Students can only enroll or drop themselves",
            )),
            _ => Ok(user.id),
        },
        UserRole::Professor => {
            if !course.is_instructor(user.id) {
                return Err(forbidden(
                    ErrorCode::CoursePermissionDenied,
                    "Only the course instructor can manage its students",
                ));
            }
            requested.ok_or_else(|| validation_failure("student_id is required"))
        }
    }
}

async fn ensure_student_account(
    storage: &Arc<dyn Storage>,
    student_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_id(student_id).await {
        Ok(Some(u)) if u.role == UserRole::Student => Ok(()),
        Ok(Some(_)) => Err(validation_failure("Only students can be enrolled in a course")),
        Ok(None) => Err(not_found(ErrorCode::UserNotFound, "Student not found")),
        Err(e) => Err(storage_failure("Failed to load student", e)),
    }
}

// 教师添加学生时通知学生，学生自行选课时通知任课教师
async fn notify_enrollment(
    storage: &Arc<dyn Storage>,
    actor: &User,
    course: &Course,
    student_id: i64,
) {
    let link = format!("/courses/{}", course.id);
    let (recipient, draft) = if actor.id == student_id {
        (
            course.instructor_id,
            NotificationDraft::new(
                NotificationType::Announcement,
                "New enrollment",
                format!("{} enrolled in {} {}", actor.name, course.code, course.title),
            ),
        )
    } else {
        (
            student_id,
            NotificationDraft::new(
                NotificationType::Announcement,
                "Course enrollment",
                format!("You have been enrolled in {} {}", course.code, course.title),
            ),
        )
    };
    notify_users(storage, &[recipient], draft.with_link(link)).await;
}
