//! 静态数据集加载
//!
//! 默认使用编译时嵌入的 `fixtures/*.json`，配置了 `fixtures.dir`
//! 时改为从该目录读取。目录本身不存在时启动失败，目录中缺失的文件视为空集合。

use rust_embed::Embed;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, warn};

use crate::errors::{CampusError, Result};
use crate::models::{
    assignments::entities::{Assignment, Submission},
    calendar::entities::CalendarEvent,
    chat::entities::{ChatMessage, ChatRoom},
    courses::entities::{AttendanceRecord, Course},
    grades::entities::Grade,
    notes::entities::Note,
    notifications::entities::Notification,
    users::entities::User,
};

#[derive(Embed)]
#[folder = "fixtures/"]
struct EmbeddedFixtures;

/// 启动时加载的完整数据集
#[derive(Debug, Default)]
pub struct FixtureSet {
    pub users: Vec<User>,
    pub courses: Vec<Course>,
    pub assignments: Vec<Assignment>,
    pub submissions: Vec<Submission>,
    pub grades: Vec<Grade>,
    pub notes: Vec<Note>,
    pub notifications: Vec<Notification>,
    pub chat_rooms: Vec<ChatRoom>,
    pub messages: Vec<ChatMessage>,
    pub calendar_events: Vec<CalendarEvent>,
    pub attendance: Vec<AttendanceRecord>,
}

impl FixtureSet {
    /// 加载数据集，`dir` 为空时使用嵌入资源
    pub fn load(dir: Option<&str>) -> Result<Self> {
        if let Some(dir) = dir
            && !Path::new(dir).is_dir()
        {
            return Err(CampusError::fixture_load(format!(
                "fixtures directory {dir} does not exist"
            )));
        }

        Ok(Self {
            users: load_collection(dir, "users.json")?,
            courses: load_collection(dir, "courses.json")?,
            assignments: load_collection(dir, "assignments.json")?,
            submissions: load_collection(dir, "submissions.json")?,
            grades: load_collection(dir, "grades.json")?,
            notes: load_collection(dir, "notes.json")?,
            notifications: load_collection(dir, "notifications.json")?,
            chat_rooms: load_collection(dir, "chat_rooms.json")?,
            messages: load_collection(dir, "messages.json")?,
            calendar_events: load_collection(dir, "calendar_events.json")?,
            attendance: load_collection(dir, "attendance.json")?,
        })
    }

    /// 使用嵌入的默认数据集
    pub fn embedded() -> Result<Self> {
        Self::load(None)
    }
}

fn read_fixture(dir: Option<&str>, file_name: &str) -> Result<Option<Vec<u8>>> {
    match dir {
        Some(dir) => {
            let path = Path::new(dir).join(file_name);
            if !path.exists() {
                warn!(
                    "Fixture {} not found in {}, starting with an empty collection",
                    file_name, dir
                );
                return Ok(None);
            }
            std::fs::read(&path).map(Some).map_err(|e| {
                CampusError::fixture_load(format!("failed to read {}: {e}", path.display()))
            })
        }
        None => Ok(EmbeddedFixtures::get(file_name).map(|f| f.data.to_vec())),
    }
}

fn load_collection<T: DeserializeOwned>(dir: Option<&str>, file_name: &str) -> Result<Vec<T>> {
    let Some(bytes) = read_fixture(dir, file_name)? else {
        debug!("Fixture {} not found, starting with an empty collection", file_name);
        return Ok(Vec::new());
    };

    let rows: Vec<T> = serde_json::from_slice(&bytes)
        .map_err(|e| CampusError::fixture_load(format!("invalid fixture {file_name}: {e}")))?;
    debug!("Loaded {} record(s) from {}", rows.len(), file_name);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_fixtures_parse() {
        let set = FixtureSet::embedded().expect("embedded fixtures must parse");
        assert!(!set.users.is_empty());
        assert!(!set.courses.is_empty());
        assert!(!set.assignments.is_empty());
        assert!(!set.chat_rooms.is_empty());
    }

    #[test]
    fn test_embedded_references_are_consistent() {
        let set = FixtureSet::embedded().unwrap();
        let user_ids: Vec<i64> = set.users.iter().map(|u| u.id).collect();
        let course_ids: Vec<i64> = set.courses.iter().map(|c| c.id).collect();

        for course in &set.courses {
            assert!(user_ids.contains(&course.instructor_id));
            assert!(course.students.iter().all(|s| user_ids.contains(s)));
        }
        for assignment in &set.assignments {
            assert!(course_ids.contains(&assignment.course_id));
        }
        for grade in &set.grades {
            assert!(course_ids.contains(&grade.course_id));
        }
        for event in &set.calendar_events {
            assert!(event.course_id.is_none_or(|id| course_ids.contains(&id)));
            assert!(event.start_time < event.end_time);
        }
        for record in &set.attendance {
            let course = set.courses.iter().find(|c| c.id == record.course_id).unwrap();
            assert!(record.present_students.iter().all(|s| course.is_enrolled(*s)));
        }
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let err = FixtureSet::load(Some("./definitely-not-a-fixture-dir")).unwrap_err();
        assert_eq!(err.code(), "E003");
        assert!(err.message().contains("definitely-not-a-fixture-dir"));
    }

    #[test]
    fn test_directory_with_missing_files() {
        let dir = std::env::temp_dir().join(format!("campus-fixtures-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("users.json"), include_bytes!("../../../fixtures/users.json"))
            .unwrap();

        let set = FixtureSet::load(dir.to_str()).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(set.users.len(), 6);
        assert!(set.courses.is_empty());
        assert!(set.messages.is_empty());
    }
}
