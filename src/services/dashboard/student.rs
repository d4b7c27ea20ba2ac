use std::sync::Arc;

use actix_web::HttpResponse;
use chrono::{DateTime, Duration, Utc};

use crate::config::AppConfig;
use crate::models::assignments::entities::{Assignment, AssignmentStatus, Submission};
use crate::models::assignments::requests::AssignmentListQuery;
use crate::models::courses::entities::Course;
use crate::models::dashboard::{StudentDashboard, UpcomingAssignment};
use crate::models::grades::entities::{Grade, average_percentage, round2};
use crate::models::grades::requests::GradeListQuery;
use crate::models::grades::responses::GradeView;
use crate::services::common::storage_failure;
use crate::storage::{Storage, SubmissionListQuery};

pub(super) async fn load_student_dashboard(
    storage: &Arc<dyn Storage>,
    student_id: i64,
) -> Result<StudentDashboard, HttpResponse> {
    let courses: Vec<Course> = storage
        .list_user_courses(student_id)
        .await
        .map_err(|e| storage_failure("Failed to load courses", e))?
        .into_iter()
        .filter(|c| c.is_enrolled(student_id))
        .collect();

    let assignments = storage
        .list_assignments(AssignmentListQuery {
            course_ids: Some(courses.iter().map(|c| c.id).collect()),
        })
        .await
        .map_err(|e| storage_failure("Failed to load assignments", e))?;
    let submissions = storage
        .list_submissions(SubmissionListQuery {
            assignment_ids: None,
            student_id: Some(student_id),
        })
        .await
        .map_err(|e| storage_failure("Failed to load submissions", e))?;
    let grades = storage
        .list_grades(GradeListQuery {
            student_id: Some(student_id),
            ..Default::default()
        })
        .await
        .map_err(|e| storage_failure("Failed to load grades", e))?;
    let unread_notifications = storage
        .get_unread_notification_count(student_id)
        .await
        .map_err(|e| storage_failure("Failed to count notifications", e))?;

    let settings = &AppConfig::get().dashboard;
    Ok(build_student_dashboard(
        StudentData {
            courses: &courses,
            assignments: &assignments,
            submissions: &submissions,
            grades: &grades,
            unread_notifications,
        },
        Utc::now(),
        settings.upcoming_days,
        settings.recent_grades,
    ))
}

pub struct StudentData<'a> {
    pub courses: &'a [Course],
    pub assignments: &'a [Assignment],
    pub submissions: &'a [Submission],
    // 按评分时间倒序
    pub grades: &'a [Grade],
    pub unread_notifications: i64,
}

pub fn build_student_dashboard(
    data: StudentData<'_>,
    now: DateTime<Utc>,
    upcoming_days: i64,
    recent_grades: usize,
) -> StudentDashboard {
    let horizon = now + Duration::days(upcoming_days);

    let mut upcoming_assignments = Vec::new();
    let mut overdue_count = 0;
    for assignment in data.assignments {
        let submission = data
            .submissions
            .iter()
            .find(|s| s.assignment_id == assignment.id);
        match AssignmentStatus::derive(assignment.due_date, submission, now) {
            AssignmentStatus::Overdue => overdue_count += 1,
            AssignmentStatus::Pending if assignment.due_date <= horizon => {
                let course_code = data
                    .courses
                    .iter()
                    .find(|c| c.id == assignment.course_id)
                    .map(|c| c.code.clone())
                    .unwrap_or_default();
                upcoming_assignments.push(UpcomingAssignment {
                    assignment_id: assignment.id,
                    course_id: assignment.course_id,
                    course_code,
                    title: assignment.title.clone(),
                    due_date: assignment.due_date,
                    status: AssignmentStatus::Pending,
                });
            }
            _ => {}
        }
    }
    upcoming_assignments.sort_by_key(|a| a.due_date);

    StudentDashboard {
        enrolled_courses: data.courses.len() as i64,
        upcoming_assignments,
        overdue_count,
        recent_grades: data
            .grades
            .iter()
            .take(recent_grades)
            .cloned()
            .map(GradeView::from)
            .collect(),
        average_percentage: average_percentage(data.grades).map(round2),
        unread_notifications: data.unread_notifications,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::AssignmentType;

    fn course(id: i64) -> Course {
        Course {
            id,
            code: format!("CS{id}"),
            title: "Course".to_string(),
            description: None,
            schedule: "Mon".to_string(),
            location: None,
            credits: 3,
            semester: String::new(),
            instructor_id: 1,
            students: vec![3],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn assignment(id: i64, due: DateTime<Utc>) -> Assignment {
        Assignment {
            id,
            course_id: 1,
            title: format!("A{id}"),
            description: None,
            assignment_type: AssignmentType::Homework,
            due_date: due,
            max_points: 100.0,
            allow_late_submission: false,
            created_by: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn submission(assignment_id: i64, at: DateTime<Utc>) -> Submission {
        Submission {
            id: assignment_id,
            assignment_id,
            student_id: 3,
            content: "done".to_string(),
            attachment_url: None,
            submitted_at: at,
            score: None,
            feedback: None,
            graded_at: None,
        }
    }

    fn grade(id: i64, score: f64) -> Grade {
        Grade {
            id,
            student_id: 3,
            course_id: 1,
            assignment_id: None,
            score,
            max_score: 100.0,
            feedback: None,
            graded_by: 1,
            graded_at: Utc::now(),
        }
    }

    #[test]
    fn test_student_dashboard_buckets() {
        let now = Utc::now();
        let assignments = [
            assignment(1, now + Duration::days(3)),  // 即将截止
            assignment(2, now + Duration::days(1)),  // 即将截止，更早
            assignment(3, now + Duration::days(30)), // 超出窗口
            assignment(4, now - Duration::days(2)),  // 逾期
            assignment(5, now + Duration::days(2)),  // 已提交
        ];
        let submissions = [submission(5, now)];
        let grades = [grade(1, 90.0), grade(2, 70.0)];

        let dashboard = build_student_dashboard(
            StudentData {
                courses: &[course(1)],
                assignments: &assignments,
                submissions: &submissions,
                grades: &grades,
                unread_notifications: 4,
            },
            now,
            7,
            1,
        );

        let upcoming: Vec<i64> = dashboard
            .upcoming_assignments
            .iter()
            .map(|a| a.assignment_id)
            .collect();
        assert_eq!(upcoming, vec![2, 1]);
        assert_eq!(dashboard.overdue_count, 1);
        assert_eq!(dashboard.enrolled_courses, 1);
        assert_eq!(dashboard.recent_grades.len(), 1);
        assert_eq!(dashboard.average_percentage, Some(80.0));
        assert_eq!(dashboard.unread_notifications, 4);
    }
}
