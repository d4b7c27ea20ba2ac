use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use super::attendance::summarize_attendance;
use crate::models::ApiResponse;
use crate::models::courses::responses::{CourseRosterResponse, RosterEntry};
use crate::models::grades::entities::{average_percentage, round2};
use crate::models::grades::requests::GradeListQuery;
use crate::services::common::{current_user, load_course_for_instructor, storage_failure};

/// 花名册：选课学生的出勤率与平均成绩，按选课顺序排列
pub async fn get_roster(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let course = match load_course_for_instructor(&storage, course_id, &user).await {
        Ok(course) => course,
        Err(resp) => return Ok(resp),
    };

    let students = match storage.get_users_by_ids(&course.students).await {
        Ok(students) => students,
        Err(e) => return Ok(storage_failure("Failed to load students", e)),
    };
    let records = match storage.list_attendance(course_id).await {
        Ok(records) => records,
        Err(e) => return Ok(storage_failure("Failed to list attendance", e)),
    };
    let grades = match storage
        .list_grades(GradeListQuery {
            course_ids: Some(vec![course_id]),
            ..Default::default()
        })
        .await
    {
        Ok(grades) => grades,
        Err(e) => return Ok(storage_failure("Failed to list grades", e)),
    };

    let items = course
        .students
        .iter()
        .filter_map(|id| students.iter().find(|s| s.id == *id))
        .map(|student| {
            let summary = summarize_attendance(course_id, &records, student.id);
            RosterEntry {
                student_id: student.id,
                name: student.name.clone(),
                email: student.email.clone(),
                sessions: summary.sessions,
                attended: summary.attended,
                attendance_rate: summary.attendance_rate,
                average_percentage: average_percentage(
                    grades.iter().filter(|g| g.student_id == student.id),
                )
                .map(round2),
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CourseRosterResponse {
            course_id,
            course_code: course.code,
            items,
        },
        "Roster retrieved successfully",
    )))
}
