use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use super::grades::entities::LetterGrade;

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/analytics.ts")]
pub struct LetterCount {
    pub letter: LetterGrade,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/analytics.ts")]
pub struct AssignmentAnalytics {
    pub assignment_id: i64,
    pub title: String,
    pub due_date: DateTime<Utc>,
    pub submitted: i64,
    pub on_time: i64,
    pub late: i64,
    // 已过截止且未提交
    pub missing: i64,
    pub submission_rate: f64,
    pub average_score: Option<f64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/analytics.ts")]
pub struct CourseAnalytics {
    pub course_id: i64,
    pub course_code: String,
    pub course_title: String,
    pub enrollment: i64,
    pub average_percentage: Option<f64>,
    pub letter_distribution: Vec<LetterCount>,
    pub assignments: Vec<AssignmentAnalytics>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/analytics.ts")]
pub struct CourseOverview {
    pub course_id: i64,
    pub course_code: String,
    pub course_title: String,
    pub enrollment: i64,
    pub assignment_count: i64,
    pub average_percentage: Option<f64>,
    pub submission_rate: f64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/analytics.ts")]
pub struct AnalyticsOverviewResponse {
    pub courses: Vec<CourseOverview>,
}
