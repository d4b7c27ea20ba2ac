//! 出勤记录存储操作

use chrono::NaiveDate;

use super::MemoryStorage;
use crate::errors::Result;
use crate::models::courses::entities::AttendanceRecord;

impl MemoryStorage {
    /// 同一课程同一天只保留一条记录，重复记录覆盖到场名单
    pub async fn record_attendance_impl(
        &self,
        course_id: i64,
        recorded_by: i64,
        date: NaiveDate,
        present_students: Vec<i64>,
    ) -> Result<AttendanceRecord> {
        let mut present: Vec<i64> = Vec::with_capacity(present_students.len());
        for id in present_students {
            if !present.contains(&id) {
                present.push(id);
            }
        }

        let now = chrono::Utc::now();
        let (record, _) = self
            .attendance
            .upsert(
                |a| a.course_id == course_id && a.date == date,
                |a| {
                    a.present_students = present.clone();
                    a.recorded_by = recorded_by;
                    a.updated_at = now;
                },
                |id| AttendanceRecord {
                    id,
                    course_id,
                    date,
                    present_students: present.clone(),
                    recorded_by,
                    created_at: now,
                    updated_at: now,
                },
            )
            .await;
        Ok(record)
    }

    /// 按日期升序
    pub async fn list_attendance_impl(&self, course_id: i64) -> Result<Vec<AttendanceRecord>> {
        let mut records = self.attendance.filter(|a| a.course_id == course_id).await;
        records.sort_by_key(|a| a.date);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::fixture_storage;

    #[tokio::test]
    async fn test_record_twice_on_same_day_overwrites() {
        let storage = fixture_storage();
        let date = "2026-10-14".parse().unwrap();

        let first = storage
            .record_attendance_impl(1, 1, date, vec![3, 3, 4])
            .await
            .unwrap();
        assert_eq!(first.present_students, vec![3, 4]);

        let second = storage
            .record_attendance_impl(1, 1, date, vec![5])
            .await
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.present_students, vec![5]);

        let records = storage.list_attendance_impl(1).await.unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records.last().unwrap().date, date);
        assert!(records.windows(2).all(|w| w[0].date < w[1].date));
    }
}
