use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    // 课程代码，如 CS101
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    // 上课时间，如 "Mon/Wed 10:00-11:30"
    pub schedule: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_credits")]
    pub credits: i32,
    #[serde(default)]
    pub semester: String,
    pub instructor_id: i64,
    // 选课学生 ID 列表
    #[serde(default)]
    pub students: Vec<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

fn default_credits() -> i32 {
    3
}

impl Course {
    pub fn is_instructor(&self, user_id: i64) -> bool {
        self.instructor_id == user_id
    }

    pub fn is_enrolled(&self, user_id: i64) -> bool {
        self.students.contains(&user_id)
    }

    /// 教师或已选课学生
    pub fn is_member(&self, user_id: i64) -> bool {
        self.is_instructor(user_id) || self.is_enrolled(user_id)
    }
}

/// 某次课的出勤记录，每门课每天一条
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub course_id: i64,
    pub date: chrono::NaiveDate,
    #[serde(default)]
    pub present_students: Vec<i64>,
    pub recorded_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl AttendanceRecord {
    pub fn is_present(&self, student_id: i64) -> bool {
        self.present_students.contains(&student_id)
    }
}
