use super::entities::CalendarEventType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use ts_rs::TS;

// 日历查询参数（来自HTTP请求）
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/calendar.ts")]
pub struct CalendarQueryParams {
    pub course_id: Option<i64>,
    // 仅返回与该日期有交集的事件，格式 YYYY-MM-DD
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/calendar.ts")]
pub struct CreateCalendarEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub course_id: Option<i64>,
    #[serde(default, rename = "type")]
    pub event_type: CalendarEventType,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
}

// 日历事件查询条件（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct CalendarEventListQuery {
    // 课程事件只返回这些课程的，None 表示不限
    pub course_ids: Option<Vec<i64>>,
    // 是否包含不属于任何课程的全校事件
    pub include_general: bool,
    pub date: Option<NaiveDate>,
}

/// 存储层创建事件，时间已校验
#[derive(Debug, Clone)]
pub struct NewCalendarEvent {
    pub title: String,
    pub description: Option<String>,
    pub course_id: Option<i64>,
    pub event_type: CalendarEventType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub created_by: i64,
}
