use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use super::assignments::entities::AssignmentStatus;
use super::grades::responses::GradeView;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct UpcomingAssignment {
    pub assignment_id: i64,
    pub course_id: i64,
    pub course_code: String,
    pub title: String,
    pub due_date: DateTime<Utc>,
    pub status: AssignmentStatus,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct RecentSubmission {
    pub submission_id: i64,
    pub assignment_id: i64,
    pub assignment_title: String,
    pub student_id: i64,
    pub student_name: String,
    pub submitted_at: DateTime<Utc>,
    pub late: bool,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentDashboard {
    pub enrolled_courses: i64,
    pub upcoming_assignments: Vec<UpcomingAssignment>,
    pub overdue_count: i64,
    pub recent_grades: Vec<GradeView>,
    pub average_percentage: Option<f64>,
    pub unread_notifications: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct ProfessorDashboard {
    pub courses_taught: i64,
    pub total_students: i64,
    pub pending_grading: i64,
    pub upcoming_deadlines: Vec<UpcomingAssignment>,
    pub recent_submissions: Vec<RecentSubmission>,
    pub unread_notifications: i64,
}

#[derive(Debug, Serialize, TS)]
#[serde(tag = "role", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub enum DashboardResponse {
    Student(StudentDashboard),
    Professor(ProfessorDashboard),
}
