use super::entities::{AttendanceRecord, Course};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 课程列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Course>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct AttendanceListResponse {
    pub items: Vec<AttendanceRecord>,
}

/// 学生本人在某门课的出勤情况
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct AttendanceSummary {
    pub course_id: i64,
    pub sessions: i64,
    pub attended: i64,
    // 尚无记录时为空
    pub attendance_rate: Option<f64>,
    pub absent_dates: Vec<chrono::NaiveDate>,
}

/// 花名册中的一名学生
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct RosterEntry {
    pub student_id: i64,
    pub name: String,
    pub email: String,
    pub sessions: i64,
    pub attended: i64,
    pub attendance_rate: Option<f64>,
    // 已评分作业的平均百分比
    pub average_percentage: Option<f64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseRosterResponse {
    pub course_id: i64,
    pub course_code: String,
    pub items: Vec<RosterEntry>,
}
