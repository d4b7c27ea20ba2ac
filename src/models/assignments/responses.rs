use super::entities::{Assignment, AssignmentStatus, Submission};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

/// 学生视角的作业
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct StudentAssignment {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: Assignment,
    pub course_code: String,
    pub status: AssignmentStatus,
    pub submission: Option<Submission>,
}

/// 教师视角的作业
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct ProfessorAssignment {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: Assignment,
    pub course_code: String,
    pub enrolled_count: i64,
    pub submitted_count: i64,
    pub graded_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AssignmentView {
    Student(StudentAssignment),
    Professor(ProfessorAssignment),
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<AssignmentView>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<Submission>,
    pub missing_students: Vec<i64>,
}
