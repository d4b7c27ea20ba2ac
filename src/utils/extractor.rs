//! 路径参数提取器
//!
//! 路径中的 ID 必须是正整数，否则直接返回 400，不进入处理函数。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 解析正整数 ID
pub fn parse_positive_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

fn invalid_id_error(param: &str, raw: Option<&str>) -> actix_web::Error {
    let message = match raw {
        Some(raw) => format!("Invalid {param}: '{raw}' is not a positive integer"),
        None => format!("Missing path parameter: {param}"),
    };
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, message.clone()));
    InternalError::from_response(message, response).into()
}

macro_rules! define_safe_id {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    let raw = req.match_info().get($param);
                    ready(
                        raw.and_then(parse_positive_id)
                            .map($name)
                            .ok_or_else(|| invalid_id_error($param, raw)),
                    )
                }
            }
        )*
    };
}

define_safe_id!(
    SafeUserId => "user_id",
    SafeCourseId => "course_id",
    SafeStudentId => "student_id",
    SafeAssignmentId => "assignment_id",
    SafeSubmissionId => "submission_id",
    SafeGradeId => "grade_id",
    SafeNoteId => "note_id",
    SafeNotificationId => "notification_id",
    SafeRoomId => "room_id",
    SafeEventId => "event_id",
);

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_parse_positive_id() {
        assert_eq!(parse_positive_id("42"), Some(42));
        assert_eq!(parse_positive_id(" 7 "), Some(7));
        assert_eq!(parse_positive_id("0"), None);
        assert_eq!(parse_positive_id("-3"), None);
        assert_eq!(parse_positive_id("abc"), None);
    }

    #[actix_web::test]
    async fn test_extractor_reads_named_segment() {
        let req = TestRequest::default()
            .param("course_id", "12")
            .to_http_request();
        let id = SafeCourseId::extract(&req).await.unwrap();
        assert_eq!(id, SafeCourseId(12));

        let req = TestRequest::default()
            .param("course_id", "twelve")
            .to_http_request();
        let err = SafeCourseId::extract(&req).await.unwrap_err();
        assert_eq!(
            err.as_response_error().status_code(),
            actix_web::http::StatusCode::BAD_REQUEST
        );
    }
}
