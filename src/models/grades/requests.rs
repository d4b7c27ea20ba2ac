use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_string_to_i64;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    pub course_id: Option<i64>,
    // 仅教师视图生效
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    pub student_id: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub assignment_id: Option<i64>,
    pub score: f64,
    pub max_score: Option<f64>,
    pub feedback: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct UpdateGradeRequest {
    pub score: Option<f64>,
    pub max_score: Option<f64>,
    pub feedback: Option<String>,
}

// 成绩列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct GradeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub course_ids: Option<Vec<i64>>,
}
