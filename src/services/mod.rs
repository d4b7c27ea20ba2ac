pub mod analytics;
pub mod assignments;
pub mod auth;
pub mod calendar;
pub mod chat;
pub mod common;
pub mod courses;
pub mod dashboard;
pub mod grades;
pub mod navigation;
pub mod notes;
pub mod notifications;
pub mod users;
pub mod websocket;

pub use analytics::AnalyticsService;
pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use calendar::CalendarService;
pub use chat::ChatService;
pub use courses::CourseService;
pub use dashboard::DashboardService;
pub use grades::GradeService;
pub use navigation::NavigationService;
pub use notes::NoteService;
pub use notifications::NotificationService;
pub use users::UserService;
pub use websocket::WebSocketService;
