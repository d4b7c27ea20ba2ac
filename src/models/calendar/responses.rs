use super::entities::CalendarEvent;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/calendar.ts")]
pub struct CalendarEventListResponse {
    pub items: Vec<CalendarEvent>,
}
