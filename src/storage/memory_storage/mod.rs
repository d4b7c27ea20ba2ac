//! 内存存储实现
//!
//! 启动时从静态数据集整体加载，之后所有修改只发生在内存中，进程重启即丢弃。

mod assignments;
mod attendance;
mod calendar;
mod chat;
mod courses;
pub mod fixtures;
mod grades;
mod notes;
mod notifications;
mod table;
mod users;

use crate::config::AppConfig;
use crate::errors::Result;
use tracing::info;

pub use fixtures::FixtureSet;
use table::{Record, Table};

use crate::models::{
    assignments::{
        entities::{Assignment, Submission},
        requests::{
            AssignmentListQuery, CreateAssignmentRequest, SubmitAssignmentRequest,
            UpdateAssignmentRequest,
        },
    },
    calendar::{
        entities::CalendarEvent,
        requests::{CalendarEventListQuery, NewCalendarEvent},
    },
    chat::{
        entities::{ChatMessage, ChatRoom},
        requests::{CreateChatRoomRequest, NewChatMessage},
    },
    courses::{
        entities::{AttendanceRecord, Course},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    grades::{
        entities::Grade,
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
        responses::GradeListResponse,
    },
    notes::{
        entities::Note,
        requests::{CreateNoteRequest, NoteListQuery, UpdateNoteRequest},
        responses::NoteListResponse,
    },
    notifications::{
        entities::Notification,
        requests::{CreateNotificationRequest, NotificationQueryParams},
        responses::NotificationListResponse,
    },
    users::{entities::User, requests::UserListQuery, responses::UserListResponse},
};
use crate::storage::{Storage, SubmissionListQuery};
use async_trait::async_trait;

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> i64 {
                    self.id
                }
            }
        )*
    };
}

impl_record!(
    User,
    Course,
    Assignment,
    Submission,
    Grade,
    Note,
    Notification,
    ChatRoom,
    ChatMessage,
    CalendarEvent,
    AttendanceRecord,
);

/// 内存存储
pub struct MemoryStorage {
    pub(crate) users: Table<User>,
    pub(crate) courses: Table<Course>,
    pub(crate) assignments: Table<Assignment>,
    pub(crate) submissions: Table<Submission>,
    pub(crate) grades: Table<Grade>,
    pub(crate) notes: Table<Note>,
    pub(crate) notifications: Table<Notification>,
    pub(crate) chat_rooms: Table<ChatRoom>,
    pub(crate) messages: Table<ChatMessage>,
    pub(crate) calendar_events: Table<CalendarEvent>,
    pub(crate) attendance: Table<AttendanceRecord>,
}

impl MemoryStorage {
    /// 按配置加载数据集并创建存储
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let fixtures = FixtureSet::load(config.fixtures_dir())?;
        let storage = Self::from_fixtures(fixtures)?;

        info!(
            "Memory storage initialized from {} fixtures",
            config.fixtures_dir().unwrap_or("embedded")
        );
        Ok(storage)
    }

    pub fn from_fixtures(set: FixtureSet) -> Result<Self> {
        let storage = Self {
            users: Table::new("users", set.users)?,
            courses: Table::new("courses", set.courses)?,
            assignments: Table::new("assignments", set.assignments)?,
            submissions: Table::new("submissions", set.submissions)?,
            grades: Table::new("grades", set.grades)?,
            notes: Table::new("notes", set.notes)?,
            notifications: Table::new("notifications", set.notifications)?,
            chat_rooms: Table::new("chat_rooms", set.chat_rooms)?,
            messages: Table::new("messages", set.messages)?,
            calendar_events: Table::new("calendar_events", set.calendar_events)?,
            attendance: Table::new("attendance", set.attendance)?,
        };
        Ok(storage)
    }

    /// 各表记录数，用于启动日志与调试
    pub async fn table_sizes(&self) -> Vec<(&'static str, usize)> {
        vec![
            (self.users.name(), self.users.len().await),
            (self.courses.name(), self.courses.len().await),
            (self.assignments.name(), self.assignments.len().await),
            (self.submissions.name(), self.submissions.len().await),
            (self.grades.name(), self.grades.len().await),
            (self.notes.name(), self.notes.len().await),
            (self.notifications.name(), self.notifications.len().await),
            (self.chat_rooms.name(), self.chat_rooms.len().await),
            (self.messages.name(), self.messages.len().await),
            (self.calendar_events.name(), self.calendar_events.len().await),
            (self.attendance.name(), self.attendance.len().await),
        ]
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    // 用户模块
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<i64> {
        Ok(self.users.len().await as i64)
    }

    // 课程模块
    async fn create_course(
        &self,
        instructor_id: i64,
        course: CreateCourseRequest,
    ) -> Result<Course> {
        self.create_course_impl(instructor_id, course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        Ok(self.courses.get(course_id).await)
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn list_user_courses(&self, user_id: i64) -> Result<Vec<Course>> {
        Ok(self.courses.filter(|c| c.is_member(user_id)).await)
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<Option<Course>> {
        self.enroll_student_impl(course_id, student_id).await
    }

    async fn drop_student(&self, course_id: i64, student_id: i64) -> Result<Option<Course>> {
        self.drop_student_impl(course_id, student_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        created_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(created_by, assignment).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        Ok(self.assignments.get(assignment_id).await)
    }

    async fn list_assignments(&self, query: AssignmentListQuery) -> Result<Vec<Assignment>> {
        self.list_assignments_impl(query).await
    }

    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(assignment_id, update).await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    // 提交模块
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        submission: SubmitAssignmentRequest,
    ) -> Result<Submission> {
        self.upsert_submission_impl(assignment_id, student_id, submission)
            .await
    }

    async fn get_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        Ok(self
            .submissions
            .find(|s| s.assignment_id == assignment_id && s.student_id == student_id)
            .await)
    }

    async fn list_submissions(&self, query: SubmissionListQuery) -> Result<Vec<Submission>> {
        self.list_submissions_impl(query).await
    }

    async fn grade_submission(
        &self,
        submission_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(submission_id, score, feedback)
            .await
    }

    // 成绩模块
    async fn upsert_grade(&self, graded_by: i64, grade: CreateGradeRequest) -> Result<Grade> {
        self.upsert_grade_impl(graded_by, grade).await
    }

    async fn get_grade_by_id(&self, grade_id: i64) -> Result<Option<Grade>> {
        Ok(self.grades.get(grade_id).await)
    }

    async fn list_grades_with_pagination(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        self.list_grades_with_pagination_impl(query).await
    }

    async fn list_grades(&self, query: GradeListQuery) -> Result<Vec<Grade>> {
        self.list_grades_impl(query).await
    }

    async fn update_grade(
        &self,
        grade_id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>> {
        self.update_grade_impl(grade_id, update).await
    }

    async fn delete_grade(&self, grade_id: i64) -> Result<bool> {
        Ok(self.grades.remove(grade_id).await)
    }

    // 笔记模块
    async fn create_note(&self, owner_id: i64, note: CreateNoteRequest) -> Result<Note> {
        self.create_note_impl(owner_id, note).await
    }

    async fn get_note_by_id(&self, note_id: i64) -> Result<Option<Note>> {
        Ok(self.notes.get(note_id).await)
    }

    async fn list_notes_with_pagination(
        &self,
        owner_id: i64,
        query: NoteListQuery,
    ) -> Result<NoteListResponse> {
        self.list_notes_with_pagination_impl(owner_id, query).await
    }

    async fn update_note(&self, note_id: i64, update: UpdateNoteRequest) -> Result<Option<Note>> {
        self.update_note_impl(note_id, update).await
    }

    async fn delete_note(&self, note_id: i64) -> Result<bool> {
        Ok(self.notes.remove(note_id).await)
    }

    // 通知模块
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification> {
        self.create_notification_impl(req).await
    }

    async fn create_notifications_batch(
        &self,
        reqs: Vec<CreateNotificationRequest>,
    ) -> Result<Vec<Notification>> {
        self.create_notifications_batch_impl(reqs).await
    }

    async fn get_notification_by_id(&self, notification_id: i64) -> Result<Option<Notification>> {
        Ok(self.notifications.get(notification_id).await)
    }

    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationQueryParams,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(user_id, query)
            .await
    }

    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64> {
        self.get_unread_notification_count_impl(user_id).await
    }

    async fn mark_notification_as_read(&self, notification_id: i64) -> Result<bool> {
        self.mark_notification_as_read_impl(notification_id).await
    }

    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64> {
        self.mark_all_notifications_as_read_impl(user_id).await
    }

    async fn delete_notification(&self, notification_id: i64) -> Result<bool> {
        Ok(self.notifications.remove(notification_id).await)
    }

    // 聊天模块
    async fn create_chat_room(&self, room: CreateChatRoomRequest) -> Result<ChatRoom> {
        self.create_chat_room_impl(room).await
    }

    async fn get_chat_room_by_id(&self, room_id: i64) -> Result<Option<ChatRoom>> {
        Ok(self.chat_rooms.get(room_id).await)
    }

    async fn list_user_chat_rooms(&self, user_id: i64) -> Result<Vec<ChatRoom>> {
        Ok(self.chat_rooms.filter(|r| r.has_participant(user_id)).await)
    }

    async fn append_message(&self, message: NewChatMessage) -> Result<ChatMessage> {
        self.append_message_impl(message).await
    }

    async fn list_messages(&self, room_id: i64, limit: usize) -> Result<Vec<ChatMessage>> {
        self.list_messages_impl(room_id, limit).await
    }

    async fn mark_messages_read(&self, room_id: i64, user_id: i64) -> Result<i64> {
        self.mark_messages_read_impl(room_id, user_id).await
    }

    async fn count_unread_messages(&self, user_id: i64, room_ids: &[i64]) -> Result<i64> {
        self.count_unread_messages_impl(user_id, room_ids).await
    }

    // 日历模块
    async fn create_calendar_event(&self, event: NewCalendarEvent) -> Result<CalendarEvent> {
        self.create_calendar_event_impl(event).await
    }

    async fn get_calendar_event_by_id(&self, event_id: i64) -> Result<Option<CalendarEvent>> {
        Ok(self.calendar_events.get(event_id).await)
    }

    async fn list_calendar_events(
        &self,
        query: CalendarEventListQuery,
    ) -> Result<Vec<CalendarEvent>> {
        self.list_calendar_events_impl(query).await
    }

    async fn delete_calendar_event(&self, event_id: i64) -> Result<bool> {
        Ok(self.calendar_events.remove(event_id).await)
    }

    // 出勤模块
    async fn record_attendance(
        &self,
        course_id: i64,
        recorded_by: i64,
        date: chrono::NaiveDate,
        present_students: Vec<i64>,
    ) -> Result<AttendanceRecord> {
        self.record_attendance_impl(course_id, recorded_by, date, present_students)
            .await
    }

    async fn list_attendance(&self, course_id: i64) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_impl(course_id).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// 基于嵌入数据集的存储实例
    pub fn fixture_storage() -> MemoryStorage {
        MemoryStorage::from_fixtures(FixtureSet::embedded().expect("embedded fixtures"))
            .expect("fixture storage")
    }
}
