use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 课程查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    // 学生浏览全部课程目录
    #[serde(default)]
    pub all: bool,
}

// 创建课程请求，教师为当前登录用户
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub schedule: String,
    pub location: Option<String>,
    pub credits: Option<i32>,
    pub semester: Option<String>,
}

// 更新课程请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub code: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub schedule: Option<String>,
    pub location: Option<String>,
    pub credits: Option<i32>,
    pub semester: Option<String>,
}

// 教师为课程添加学生
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct EnrollStudentRequest {
    pub student_id: Option<i64>,
}

// 记录一次课的出勤，未给出日期时使用当天
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct RecordAttendanceRequest {
    pub date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub present_students: Vec<i64>,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub instructor_id: Option<i64>,
    pub student_id: Option<i64>,
    pub search: Option<String>,
}
