//! 日历事件存储操作

use super::MemoryStorage;
use crate::errors::Result;
use crate::models::calendar::{
    entities::CalendarEvent,
    requests::{CalendarEventListQuery, NewCalendarEvent},
};

impl MemoryStorage {
    pub async fn create_calendar_event_impl(&self, event: NewCalendarEvent) -> Result<CalendarEvent> {
        let now = chrono::Utc::now();
        Ok(self
            .calendar_events
            .insert_with(|id| CalendarEvent {
                id,
                title: event.title.trim().to_string(),
                description: event.description,
                course_id: event.course_id,
                event_type: event.event_type,
                start_time: event.start_time,
                end_time: event.end_time,
                location: event.location,
                created_by: event.created_by,
                created_at: now,
            })
            .await)
    }

    /// 按开始时间升序
    pub async fn list_calendar_events_impl(
        &self,
        query: CalendarEventListQuery,
    ) -> Result<Vec<CalendarEvent>> {
        let mut events = self
            .calendar_events
            .filter(|e| {
                let in_scope = match e.course_id {
                    Some(course_id) => query
                        .course_ids
                        .as_ref()
                        .is_none_or(|ids| ids.contains(&course_id)),
                    None => query.include_general,
                };
                in_scope && query.date.is_none_or(|day| e.occurs_on(day))
            })
            .await;
        events.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::fixture_storage;
    use crate::models::calendar::entities::CalendarEventType;
    use crate::models::calendar::requests::{CalendarEventListQuery, NewCalendarEvent};

    fn day(s: &str) -> chrono::NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_list_filters_by_course_and_day() {
        let storage = fixture_storage();

        let cs101 = storage
            .list_calendar_events_impl(CalendarEventListQuery {
                course_ids: Some(vec![1]),
                include_general: false,
                date: None,
            })
            .await
            .unwrap();
        assert_eq!(cs101.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1]);

        // 10 月 19 日：CS101 上课与全校招聘会
        let monday = storage
            .list_calendar_events_impl(CalendarEventListQuery {
                course_ids: Some(vec![1, 2]),
                include_general: true,
                date: Some(day("2026-10-19")),
            })
            .await
            .unwrap();
        assert_eq!(monday.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);

        let everything = storage
            .list_calendar_events_impl(CalendarEventListQuery {
                include_general: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(everything.len(), 4);
        assert!(everything.windows(2).all(|w| w[0].start_time <= w[1].start_time));
    }

    #[tokio::test]
    async fn test_create_and_delete_event() {
        let storage = fixture_storage();
        let event = storage
            .create_calendar_event_impl(NewCalendarEvent {
                title: "  Review session ".to_string(),
                description: None,
                course_id: Some(2),
                event_type: CalendarEventType::Class,
                start_time: "2026-10-21T16:00:00Z".parse().unwrap(),
                end_time: "2026-10-21T17:00:00Z".parse().unwrap(),
                location: Some("Lab 2".to_string()),
                created_by: 1,
            })
            .await
            .unwrap();
        assert_eq!(event.title, "Review session");
        assert!(event.id > 4);

        assert!(storage.calendar_events.remove(event.id).await);
        assert!(storage.calendar_events.get(event.id).await.is_none());
    }
}
