use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::courses::entities::AttendanceRecord;
use crate::models::courses::requests::RecordAttendanceRequest;
use crate::models::courses::responses::{AttendanceListResponse, AttendanceSummary};
use crate::models::grades::entities::round2;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    current_user, forbidden, load_course_for_instructor, load_course_for_member, storage_failure,
    validation_failure,
};

/// 学生在给定记录中的出勤统计
pub(crate) fn summarize_attendance(
    course_id: i64,
    records: &[AttendanceRecord],
    student_id: i64,
) -> AttendanceSummary {
    let sessions = records.len() as i64;
    let absent_dates: Vec<_> = records
        .iter()
        .filter(|r| !r.is_present(student_id))
        .map(|r| r.date)
        .collect();
    let attended = sessions - absent_dates.len() as i64;
    AttendanceSummary {
        course_id,
        sessions,
        attended,
        attendance_rate: (sessions > 0)
            .then(|| round2(attended as f64 / sessions as f64 * 100.0)),
        absent_dates,
    }
}

pub async fn record_attendance(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    attendance_data: RecordAttendanceRequest,
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

    let unknown: Vec<String> = attendance_data
        .present_students
        .iter()
        .filter(|id| !course.is_enrolled(**id))
        .map(|id| id.to_string())
        .collect();
    if !unknown.is_empty() {
        return Ok(validation_failure(format!(
            "Student(s) not enrolled in {}: {}",
            course.code,
            unknown.join(", ")
        )));
    }

    let date = attendance_data
        .date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    match storage
        .record_attendance(course_id, user.id, date, attendance_data.present_students)
        .await
    {
        Ok(record) => {
            info!(
                "Attendance for {} on {} recorded by professor {}: {}/{} present",
                course.code,
                date,
                user.id,
                record.present_students.len(),
                course.students.len()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                record,
                "Attendance recorded successfully",
            )))
        }
        Err(e) => Ok(storage_failure("Failed to record attendance", e)),
    }
}

pub async fn list_attendance(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_course_for_instructor(&storage, course_id, &user).await {
        return Ok(resp);
    }

    match storage.list_attendance(course_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendanceListResponse { items },
            "Attendance retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list attendance", e)),
    }
}

pub async fn my_attendance(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let course = match load_course_for_member(&storage, course_id, &user).await {
        Ok(course) => course,
        Err(resp) => return Ok(resp),
    };
    if !course.is_enrolled(user.id) {
        return Ok(forbidden(
            ErrorCode::NotEnrolled,
            "Only enrolled students have an attendance record",
        ));
    }

    match storage.list_attendance(course_id).await {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summarize_attendance(course_id, &records, user.id),
            "Attendance retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list attendance", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn record(id: i64, date: &str, present: Vec<i64>) -> AttendanceRecord {
        AttendanceRecord {
            id,
            course_id: 1,
            date: date.parse().unwrap(),
            present_students: present,
            recorded_by: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_counts_absences() {
        let records = vec![
            record(1, "2026-10-05", vec![3, 4, 5]),
            record(2, "2026-10-07", vec![3, 5]),
            record(3, "2026-10-12", vec![3, 4]),
        ];
        let summary = summarize_attendance(1, &records, 4);
        assert_eq!(summary.sessions, 3);
        assert_eq!(summary.attended, 2);
        assert_eq!(summary.attendance_rate, Some(66.67));
        assert_eq!(
            summary.absent_dates,
            vec!["2026-10-07".parse::<NaiveDate>().unwrap()]
        );
    }

    #[test]
    fn test_summary_without_sessions() {
        let summary = summarize_attendance(4, &[], 3);
        assert_eq!(summary.sessions, 0);
        assert_eq!(summary.attendance_rate, None);
        assert!(summary.absent_dates.is_empty());
    }
}
