use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::models::ApiResponse;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::notifications::entities::NotificationType;
use crate::services::common::{
    current_user, load_course_for_instructor, storage_failure, validation_failure,
};
use crate::services::notifications::dispatch::{NotificationDraft, notify_users};
use crate::utils::validate::FieldErrors;

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_data: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(msg) = FieldErrors::new()
        .require("title", &assignment_data.title)
        .require_some("due_date", assignment_data.due_date.as_ref())
        .positive("max_points", assignment_data.max_points)
        .finish()
    {
        return Ok(validation_failure(msg));
    }

    let course =
        match load_course_for_instructor(&storage, assignment_data.course_id, &user).await {
            Ok(course) => course,
            Err(resp) => return Ok(resp),
        };

    match storage.create_assignment(user.id, assignment_data).await {
        Ok(assignment) => {
            info!(
                "Assignment {} created in course {} by professor {}",
                assignment.id, course.code, user.id
            );

            let draft = NotificationDraft::new(
                NotificationType::Assignment,
                "New assignment",
                format!(
                    "{}: {} is due {}",
                    course.code,
                    assignment.title,
                    assignment.due_date.format("%Y-%m-%d %H:%M UTC")
                ),
            )
            .with_link(format!("/assignments/{}", assignment.id));
            notify_users(&storage, &course.students, draft).await;

            Ok(HttpResponse::Created().json(ApiResponse::success(
                assignment,
                "Assignment created successfully",
            )))
        }
        Err(e) => Ok(storage_failure("Assignment creation failed", e)),
    }
}
