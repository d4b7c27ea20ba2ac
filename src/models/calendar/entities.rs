use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/calendar.ts")]
pub enum CalendarEventType {
    Class,
    Exam,
    Assignment,
    #[default]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/calendar.ts")]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    // 为空表示全校事件
    #[serde(default)]
    pub course_id: Option<i64>,
    #[serde(default, rename = "type")]
    pub event_type: CalendarEventType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

impl CalendarEvent {
    /// 事件时间段与给定日期（UTC）有交集
    pub fn occurs_on(&self, day: NaiveDate) -> bool {
        self.start_time.date_naive() <= day && day <= self.end_time.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(start: &str, end: &str) -> CalendarEvent {
        CalendarEvent {
            id: 1,
            title: "Hackathon".to_string(),
            description: None,
            course_id: None,
            event_type: CalendarEventType::Other,
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            location: None,
            created_by: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_occurs_on_spans_days() {
        let overnight = event("2026-10-20T20:00:00Z", "2026-10-22T02:00:00Z");
        let day = |s: &str| s.parse::<NaiveDate>().unwrap();
        assert!(!overnight.occurs_on(day("2026-10-19")));
        assert!(overnight.occurs_on(day("2026-10-20")));
        assert!(overnight.occurs_on(day("2026-10-21")));
        assert!(overnight.occurs_on(day("2026-10-22")));
        assert!(!overnight.occurs_on(day("2026-10-23")));
    }

    #[test]
    fn test_type_defaults_to_other() {
        let parsed: CalendarEvent = serde_json::from_str(
            r#"{"id":2,"title":"Open day","start_time":"2026-10-19T09:00:00Z",
                "end_time":"2026-10-19T12:00:00Z","created_by":2,
                "created_at":"2026-10-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(parsed.event_type, CalendarEventType::Other);
        assert_eq!(parsed.course_id, None);
    }
}
