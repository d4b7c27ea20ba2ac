use std::collections::BTreeSet;
use std::sync::Arc;

use actix_web::HttpResponse;
use chrono::{DateTime, Duration, Utc};

use crate::config::AppConfig;
use crate::models::assignments::entities::{Assignment, AssignmentStatus, Submission};
use crate::models::assignments::requests::AssignmentListQuery;
use crate::models::courses::entities::Course;
use crate::models::dashboard::{ProfessorDashboard, RecentSubmission, UpcomingAssignment};
use crate::models::users::entities::User;
use crate::services::common::storage_failure;
use crate::storage::{Storage, SubmissionListQuery};

const RECENT_SUBMISSIONS: usize = 5;

pub(super) async fn load_professor_dashboard(
    storage: &Arc<dyn Storage>,
    professor_id: i64,
) -> Result<ProfessorDashboard, HttpResponse> {
    let courses: Vec<Course> = storage
        .list_user_courses(professor_id)
        .await
        .map_err(|e| storage_failure("Failed to load courses", e))?
        .into_iter()
        .filter(|c| c.is_instructor(professor_id))
        .collect();

    let assignments = storage
        .list_assignments(AssignmentListQuery {
            course_ids: Some(courses.iter().map(|c| c.id).collect()),
        })
        .await
        .map_err(|e| storage_failure("Failed to load assignments", e))?;
    let submissions = storage
        .list_submissions(SubmissionListQuery {
            assignment_ids: Some(assignments.iter().map(|a| a.id).collect()),
            student_id: None,
        })
        .await
        .map_err(|e| storage_failure("Failed to load submissions", e))?;

    let student_ids: Vec<i64> = submissions
        .iter()
        .map(|s| s.student_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let students = storage
        .get_users_by_ids(&student_ids)
        .await
        .map_err(|e| storage_failure("Failed to load students", e))?;
    let unread_notifications = storage
        .get_unread_notification_count(professor_id)
        .await
        .map_err(|e| storage_failure("Failed to count notifications", e))?;

    Ok(build_professor_dashboard(
        ProfessorData {
            courses: &courses,
            assignments: &assignments,
            submissions: &submissions,
            students: &students,
            unread_notifications,
        },
        Utc::now(),
        AppConfig::get().dashboard.upcoming_days,
    ))
}

pub struct ProfessorData<'a> {
    pub courses: &'a [Course],
    pub assignments: &'a [Assignment],
    pub submissions: &'a [Submission],
    pub students: &'a [User],
    pub unread_notifications: i64,
}

pub fn build_professor_dashboard(
    data: ProfessorData<'_>,
    now: DateTime<Utc>,
    upcoming_days: i64,
) -> ProfessorDashboard {
    let horizon = now + Duration::days(upcoming_days);
    let course_code = |course_id: i64| {
        data.courses
            .iter()
            .find(|c| c.id == course_id)
            .map(|c| c.code.clone())
            .unwrap_or_default()
    };

    // 退课学生的历史提交不再计入
    let active: Vec<&Submission> = data
        .submissions
        .iter()
        .filter(|s| {
            data.assignments
                .iter()
                .find(|a| a.id == s.assignment_id)
                .and_then(|a| data.courses.iter().find(|c| c.id == a.course_id))
                .is_some_and(|c| c.is_enrolled(s.student_id))
        })
        .collect();

    let total_students = data
        .courses
        .iter()
        .flat_map(|c| c.students.iter().copied())
        .collect::<BTreeSet<i64>>()
        .len() as i64;

    let mut upcoming_deadlines: Vec<UpcomingAssignment> = data
        .assignments
        .iter()
        .filter(|a| a.due_date >= now && a.due_date <= horizon)
        .map(|a| UpcomingAssignment {
            assignment_id: a.id,
            course_id: a.course_id,
            course_code: course_code(a.course_id),
            title: a.title.clone(),
            due_date: a.due_date,
            status: AssignmentStatus::Pending,
        })
        .collect();
    upcoming_deadlines.sort_by_key(|a| a.due_date);

    let mut recent: Vec<&Submission> = active.clone();
    recent.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    let recent_submissions = recent
        .into_iter()
        .take(RECENT_SUBMISSIONS)
        .filter_map(|s| {
            let assignment = data.assignments.iter().find(|a| a.id == s.assignment_id)?;
            let student_name = data
                .students
                .iter()
                .find(|u| u.id == s.student_id)
                .map(|u| u.name.clone())
                .unwrap_or_else(|| format!("Student #{}", s.student_id));
            Some(RecentSubmission {
                submission_id: s.id,
                assignment_id: assignment.id,
                assignment_title: assignment.title.clone(),
                student_id: s.student_id,
                student_name,
                submitted_at: s.submitted_at,
                late: s.is_late(assignment.due_date),
            })
        })
        .collect();

    ProfessorDashboard {
        courses_taught: data.courses.len() as i64,
        total_students,
        pending_grading: active.iter().filter(|s| !s.is_graded()).count() as i64,
        upcoming_deadlines,
        recent_submissions,
        unread_notifications: data.unread_notifications,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_storage::test_support::fixture_storage;

    #[tokio::test]
    async fn test_professor_dashboard_from_fixtures() {
        let storage: Arc<dyn Storage> = Arc::new(fixture_storage());
        let dashboard = load_professor_dashboard(&storage, 1).await.unwrap();

        // CS101 与 CS240 共有学生 3、4、5、6
        assert_eq!(dashboard.courses_taught, 2);
        assert_eq!(dashboard.total_students, 4);
        // 提交 3、4、8 尚未评分
        assert_eq!(dashboard.pending_grading, 3);
        assert!(dashboard.recent_submissions.len() <= RECENT_SUBMISSIONS);
        assert!(
            dashboard
                .recent_submissions
                .windows(2)
                .all(|w| w[0].submitted_at >= w[1].submitted_at)
        );
    }

    #[tokio::test]
    async fn test_dropped_student_leaves_grading_queue() {
        let storage: Arc<dyn Storage> = Arc::new(fixture_storage());
        // 学生 5 在 CS101 有一份未评分的提交（提交 3）
        storage.drop_student(1, 5).await.unwrap().unwrap();

        let dashboard = load_professor_dashboard(&storage, 1).await.unwrap();
        assert_eq!(dashboard.total_students, 3);
        assert_eq!(dashboard.pending_grading, 2);
        assert!(dashboard.recent_submissions.iter().all(|s| s.student_id != 5));
    }
}
