use serde::Serialize;
use ts_rs::TS;

use crate::errors::CampusError;

/// API 业务错误码
///
/// 按模块分段：1xxx 请求、2xxx 认证、3xxx 课程、4xxx 作业与成绩、
/// 5xxx 笔记/通知/聊天/日历、9xxx 系统。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,

    Unauthorized = 2000,
    AuthFailed = 2001,
    PermissionDenied = 2003,
    UserNotFound = 2004,

    CourseNotFound = 3000,
    CoursePermissionDenied = 3001,
    CourseCreationFailed = 3002,
    AlreadyEnrolled = 3003,
    NotEnrolled = 3004,

    AssignmentNotFound = 4000,
    SubmissionClosed = 4001,
    SubmissionNotFound = 4002,
    GradeNotFound = 4100,
    GradeOutOfRange = 4101,

    NoteNotFound = 5000,
    NotificationNotFound = 5100,
    ChatRoomNotFound = 5200,
    ChatPermissionDenied = 5201,
    CalendarEventNotFound = 5300,
    CalendarPermissionDenied = 5301,

    InternalServerError = 9000,
}

impl From<&CampusError> for ErrorCode {
    fn from(err: &CampusError) -> Self {
        match err {
            CampusError::Validation(_) | CampusError::DateParse(_) => ErrorCode::ValidationFailed,
            CampusError::NotFound(_) => ErrorCode::NotFound,
            CampusError::Conflict(_) => ErrorCode::Conflict,
            CampusError::Authentication(_) => ErrorCode::Unauthorized,
            CampusError::Authorization(_) => ErrorCode::PermissionDenied,
            _ => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_codes() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::CourseNotFound as i32, 3000);
        assert_eq!(ErrorCode::InternalServerError as i32, 9000);
    }

    #[test]
    fn test_from_campus_error() {
        assert_eq!(
            ErrorCode::from(&CampusError::conflict("dup")),
            ErrorCode::Conflict
        );
        assert_eq!(
            ErrorCode::from(&CampusError::fixture_load("bad")),
            ErrorCode::InternalServerError
        );
    }
}
