use super::entities::{AssignmentStatus, AssignmentType};
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_string_to_i64;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

// 作业查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    pub course_id: Option<i64>,
    // 仅学生视图生效
    pub status: Option<AssignmentStatus>,
    #[serde(rename = "type")]
    pub assignment_type: Option<AssignmentType>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub assignment_type: Option<AssignmentType>,
    pub due_date: Option<DateTime<Utc>>,
    pub max_points: Option<f64>,
    #[serde(default)]
    pub allow_late_submission: bool,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub assignment_type: Option<AssignmentType>,
    pub due_date: Option<DateTime<Utc>>,
    pub max_points: Option<f64>,
    pub allow_late_submission: Option<bool>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmitAssignmentRequest {
    pub content: String,
    pub attachment_url: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct GradeSubmissionRequest {
    pub score: f64,
    pub feedback: Option<String>,
}

// 作业列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AssignmentListQuery {
    pub course_ids: Option<Vec<i64>>,
}
