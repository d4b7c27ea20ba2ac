use std::sync::Arc;
use tracing::debug;

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

use crate::errors::Result;

pub mod memory_storage;

/// 提交记录查询条件
#[derive(Debug, Clone, Default)]
pub struct SubmissionListQuery {
    pub assignment_ids: Option<Vec<i64>>,
    pub student_id: Option<i64>,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 批量获取用户
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 用户总数
    async fn count_users(&self) -> Result<i64>;

    /// 课程管理方法
    async fn create_course(&self, instructor_id: i64, course: CreateCourseRequest)
    -> Result<Course>;
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 用户作为教师或学生参与的全部课程
    async fn list_user_courses(&self, user_id: i64) -> Result<Vec<Course>>;
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程，级联删除作业、提交、成绩、课程聊天室、日历事件与出勤记录
    async fn delete_course(&self, course_id: i64) -> Result<bool>;
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<Option<Course>>;
    async fn drop_student(&self, course_id: i64, student_id: i64) -> Result<Option<Course>>;

    /// 作业管理方法
    async fn create_assignment(
        &self,
        created_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 按截止时间升序
    async fn list_assignments(&self, query: AssignmentListQuery) -> Result<Vec<Assignment>>;
    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 删除作业，级联删除提交与关联成绩
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;

    /// 提交管理方法
    // 提交或重新提交（重新提交会清空评分）
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        submission: SubmitAssignmentRequest,
    ) -> Result<Submission>;
    async fn get_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    async fn list_submissions(&self, query: SubmissionListQuery) -> Result<Vec<Submission>>;
    async fn grade_submission(
        &self,
        submission_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>>;

    /// 成绩管理方法
    // 带 assignment_id 时按 (学生, 作业) 更新已有成绩
    async fn upsert_grade(&self, graded_by: i64, grade: CreateGradeRequest) -> Result<Grade>;
    async fn get_grade_by_id(&self, grade_id: i64) -> Result<Option<Grade>>;
    async fn list_grades_with_pagination(&self, query: GradeListQuery)
    -> Result<GradeListResponse>;
    async fn list_grades(&self, query: GradeListQuery) -> Result<Vec<Grade>>;
    async fn update_grade(&self, grade_id: i64, update: UpdateGradeRequest)
    -> Result<Option<Grade>>;
    async fn delete_grade(&self, grade_id: i64) -> Result<bool>;

    /// 笔记管理方法
    async fn create_note(&self, owner_id: i64, note: CreateNoteRequest) -> Result<Note>;
    async fn get_note_by_id(&self, note_id: i64) -> Result<Option<Note>>;
    async fn list_notes_with_pagination(
        &self,
        owner_id: i64,
        query: NoteListQuery,
    ) -> Result<NoteListResponse>;
    async fn update_note(&self, note_id: i64, update: UpdateNoteRequest) -> Result<Option<Note>>;
    async fn delete_note(&self, note_id: i64) -> Result<bool>;

    /// 通知管理方法
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification>;
    async fn create_notifications_batch(
        &self,
        reqs: Vec<CreateNotificationRequest>,
    ) -> Result<Vec<Notification>>;
    async fn get_notification_by_id(&self, notification_id: i64) -> Result<Option<Notification>>;
    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationQueryParams,
    ) -> Result<NotificationListResponse>;
    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64>;
    async fn mark_notification_as_read(&self, notification_id: i64) -> Result<bool>;
    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64>;
    async fn delete_notification(&self, notification_id: i64) -> Result<bool>;

    /// 聊天管理方法
    async fn create_chat_room(&self, room: CreateChatRoomRequest) -> Result<ChatRoom>;
    async fn get_chat_room_by_id(&self, room_id: i64) -> Result<Option<ChatRoom>>;
    async fn list_user_chat_rooms(&self, user_id: i64) -> Result<Vec<ChatRoom>>;
    async fn append_message(&self, message: NewChatMessage) -> Result<ChatMessage>;
    // 最近的 limit 条消息，按时间升序返回
    async fn list_messages(&self, room_id: i64, limit: usize) -> Result<Vec<ChatMessage>>;
    // 将房间内他人发送的消息标记为已读，返回新标记条数
    async fn mark_messages_read(&self, room_id: i64, user_id: i64) -> Result<i64>;
    async fn count_unread_messages(&self, user_id: i64, room_ids: &[i64]) -> Result<i64>;

    /// 日历管理方法
    async fn create_calendar_event(&self, event: NewCalendarEvent) -> Result<CalendarEvent>;
    async fn get_calendar_event_by_id(&self, event_id: i64) -> Result<Option<CalendarEvent>>;
    // 按开始时间升序
    async fn list_calendar_events(&self, query: CalendarEventListQuery)
    -> Result<Vec<CalendarEvent>>;
    async fn delete_calendar_event(&self, event_id: i64) -> Result<bool>;

    /// 出勤管理方法
    // 同一课程同一天重复记录时覆盖
    async fn record_attendance(
        &self,
        course_id: i64,
        recorded_by: i64,
        date: chrono::NaiveDate,
        present_students: Vec<i64>,
    ) -> Result<AttendanceRecord>;
    async fn list_attendance(&self, course_id: i64) -> Result<Vec<AttendanceRecord>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = memory_storage::MemoryStorage::new_async().await?;
    for (table, size) in storage.table_sizes().await {
        debug!("Table {} loaded with {} record(s)", table, size);
    }
    Ok(Arc::new(storage))
}
