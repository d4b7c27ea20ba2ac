pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod validate;

pub use extractor::{
    SafeAssignmentId, SafeCourseId, SafeEventId, SafeGradeId, SafeNoteId, SafeNotificationId,
    SafeRoomId, SafeStudentId, SafeSubmissionId, SafeUserId,
};
pub use parameter_error_handler::{json_error_handler, path_error_handler, query_error_handler};
