use super::entities::{Grade, LetterGrade};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

/// 带派生字段的成绩
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub grade: Grade,
    pub percentage: f64,
    pub letter: LetterGrade,
}

impl From<Grade> for GradeView {
    fn from(grade: Grade) -> Self {
        Self {
            percentage: super::entities::round2(grade.percentage()),
            letter: grade.letter(),
            grade,
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<GradeView>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CourseGradeSummary {
    pub course_id: i64,
    pub course_code: String,
    pub course_title: String,
    pub credits: i32,
    pub grade_count: i64,
    pub average_percentage: f64,
    pub letter: LetterGrade,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSummaryResponse {
    pub courses: Vec<CourseGradeSummary>,
    // 按学分加权的 4.0 绩点
    pub gpa: Option<f64>,
    pub overall_percentage: Option<f64>,
}
