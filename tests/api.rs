//! HTTP 接口集成测试，基于嵌入的数据集
//!
//! 数据集中的当前日期约为 2026-10-18：作业 1、2、4、6 已截止，3、5、7 尚未截止。

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use campus_connect::cache::ObjectCache;
use campus_connect::cache::object_cache::moka::MokaObjectCache;
use campus_connect::models::users::entities::UserRole;
use campus_connect::routes::{self, RouteLimits};
use campus_connect::storage::Storage;
use campus_connect::storage::memory_storage::MemoryStorage;
use campus_connect::storage::memory_storage::fixtures::FixtureSet;
use campus_connect::utils::jwt::JwtUtils;
use campus_connect::utils::{json_error_handler, query_error_handler};

const ADA: i64 = 1;
const ALAN: i64 = 2;
const GRACE: i64 = 3;
const LINUS: i64 = 4;
const MARGARET: i64 = 5;
const KEN: i64 = 6;

macro_rules! campus_app {
    () => {{
        let storage: Arc<dyn Storage> = Arc::new(
            MemoryStorage::from_fixtures(FixtureSet::embedded().unwrap()).unwrap(),
        );
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaObjectCache::with_settings(1_000, 60));
        test::init_service(
            App::new()
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache))
                .configure(|cfg| routes::configure_api_routes(cfg, RouteLimits::default()))
                .configure(routes::configure_frontend_routes),
        )
        .await
    }};
}

fn bearer(user_id: i64, role: UserRole) -> (header::HeaderName, String) {
    let token = JwtUtils::generate_access_token(user_id, role).unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

fn student(user_id: i64) -> (header::HeaderName, String) {
    bearer(user_id, UserRole::Student)
}

fn professor(user_id: i64) -> (header::HeaderName, String) {
    bearer(user_id, UserRole::Professor)
}

#[actix_web::test]
async fn test_login_returns_token_and_navigation() {
    let app = campus_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "grace.hopper", "password": "any" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(header::SET_COOKIE));

    let body: Value = test::read_body_json(resp).await;
    assert!(!body["data"]["access_token"].as_str().unwrap().is_empty());
    assert_eq!(body["data"]["user"]["id"], GRACE);
    assert!(!body["data"]["navigation"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_login_rejects_unknown_user_and_blank_fields() {
    let app = campus_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "nobody", "password": "secret" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "grace.hopper", "password": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_login_is_rate_limited() {
    let app = campus_app!();

    let mut last = StatusCode::OK;
    for _ in 0..6 {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "username": "nobody", "password": "secret" }))
            .to_request();
        last = test::call_service(&app, req).await.status();
    }
    assert_eq!(last, StatusCode::TOO_MANY_REQUESTS);
}

#[actix_web::test]
async fn test_protected_routes_require_token() {
    let app = campus_app!();

    let req = test::TestRequest::get().uri("/api/v1/courses").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/courses")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_student_sees_enrolled_courses_only() {
    let app = campus_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/courses")
        .insert_header(student(GRACE))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let codes: Vec<&str> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes.len(), 2);
    assert!(codes.contains(&"CS101"));
    assert!(codes.contains(&"CS240"));

    // 非成员不能查看课程详情
    let req = test::TestRequest::get()
        .uri("/api/v1/courses/3")
        .insert_header(student(GRACE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_course_creation_requires_professor() {
    let app = campus_app!();

    let payload = json!({ "code": "cs499", "title": "Capstone", "schedule": "Fri 13:00" });

    let req = test::TestRequest::post()
        .uri("/api/v1/courses")
        .insert_header(student(GRACE))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/courses")
        .insert_header(professor(ADA))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["instructor_id"], ADA);
    assert!(body["data"]["students"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_enroll_twice_conflicts() {
    let app = campus_app!();

    // 课程 4 尚无学生
    let req = test::TestRequest::post()
        .uri("/api/v1/courses/4/students")
        .insert_header(student(KEN))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/courses/4/students")
        .insert_header(student(KEN))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_submission_rules() {
    let app = campus_app!();

    // 作业 4 已截止且不接受迟交
    let req = test::TestRequest::post()
        .uri("/api/v1/assignments/4/submit")
        .insert_header(student(KEN))
        .set_json(json!({ "content": "late work" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // 作业 2 已截止但允许迟交，Linus 尚未提交
    let req = test::TestRequest::post()
        .uri("/api/v1/assignments/2/submit")
        .insert_header(student(LINUS))
        .set_json(json!({ "content": "chapter 3 exercises, a bit late" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "late");
    assert_eq!(body["data"]["submission"]["student_id"], LINUS);

    // 作业 3 尚未截止
    let req = test::TestRequest::post()
        .uri("/api/v1/assignments/3/submit")
        .insert_header(student(GRACE))
        .set_json(json!({ "content": "final project draft" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "submitted");

    // 内容不能为空
    let req = test::TestRequest::post()
        .uri("/api/v1/assignments/3/submit")
        .insert_header(student(GRACE))
        .set_json(json!({ "content": "  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_grading_checks_range_and_notifies() {
    let app = campus_app!();

    let req = test::TestRequest::put()
        .uri("/api/v1/assignments/2/submissions/4/grade")
        .insert_header(professor(ADA))
        .set_json(json!({ "score": 150 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/notifications/unread-count")
        .insert_header(student(GRACE))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let before = body["data"]["unread_count"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri("/api/v1/assignments/2/submissions/4/grade")
        .insert_header(professor(ADA))
        .set_json(json!({ "score": 91, "feedback": "Nice work" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/notifications/unread-count")
        .insert_header(student(GRACE))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["unread_count"].as_i64().unwrap(), before + 1);

    // 其他教师不能批改
    let req = test::TestRequest::put()
        .uri("/api/v1/assignments/2/submissions/4/grade")
        .insert_header(professor(ALAN))
        .set_json(json!({ "score": 10 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_notes_are_private() {
    let app = campus_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/notes/1")
        .insert_header(student(GRACE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/notes/1")
        .insert_header(student(LINUS))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri("/api/v1/notes/1")
        .insert_header(student(GRACE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/notes/1")
        .insert_header(student(GRACE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_dashboard_is_role_specific() {
    let app = campus_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/dashboard")
        .insert_header(student(GRACE))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["role"], "student");
    assert_eq!(body["data"]["enrolled_courses"], 2);

    let req = test::TestRequest::get()
        .uri("/api/v1/dashboard")
        .insert_header(professor(ADA))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["role"], "professor");
    assert_eq!(body["data"]["courses_taught"], 2);
}

#[actix_web::test]
async fn test_analytics_access() {
    let app = campus_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/analytics/overview")
        .insert_header(student(GRACE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/v1/analytics/courses/1")
        .insert_header(professor(ALAN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/v1/analytics/courses/1")
        .insert_header(professor(ADA))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["enrollment"], 3);
    assert_eq!(body["data"]["letter_distribution"].as_array().unwrap().len(), 5);
}

#[actix_web::test]
async fn test_chat_history_for_participants() {
    let app = campus_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/chat/rooms/1/messages")
        .insert_header(student(GRACE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 学生 6 不在房间 1
    let req = test::TestRequest::get()
        .uri("/api/v1/chat/rooms/1/messages")
        .insert_header(student(KEN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/chat/rooms/3/messages")
        .insert_header(student(LINUS))
        .set_json(json!({ "content": "see you at the lab" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn test_chat_unread_count_and_mark_read() {
    let app = campus_app!();

    // 房间 2 与房间 3 各有一条 Grace 未读的消息
    let req = test::TestRequest::get()
        .uri("/api/v1/chat/unread-count")
        .insert_header(student(GRACE))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["unread_count"], 2);

    let req = test::TestRequest::put()
        .uri("/api/v1/chat/rooms/2/read")
        .insert_header(student(GRACE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["marked"], 1);

    let req = test::TestRequest::get()
        .uri("/api/v1/chat/rooms/2")
        .insert_header(student(GRACE))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["unread_count"], 0);

    let req = test::TestRequest::get()
        .uri("/api/v1/chat/unread-count")
        .insert_header(student(GRACE))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["unread_count"], 1);

    // Linus 尚未读过消息 2 和 3
    let req = test::TestRequest::get()
        .uri("/api/v1/chat/rooms/1/messages")
        .insert_header(student(LINUS))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let read: Vec<bool> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["read"].as_bool().unwrap())
        .collect();
    assert_eq!(read, vec![true, false, false]);

    // 非参与者不能标记
    let req = test::TestRequest::put()
        .uri("/api/v1/chat/rooms/1/read")
        .insert_header(student(KEN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_assignments_filter_by_type_and_course() {
    let app = campus_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/assignments?type=project")
        .insert_header(student(GRACE))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let mut found = ids(&body);
    found.sort();
    assert_eq!(found, vec![3, 5]);

    let req = test::TestRequest::get()
        .uri("/api/v1/assignments?type=project&course_id=2&page=1")
        .insert_header(student(GRACE))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 5);
    assert_eq!(items[0]["type"], "project");

    let req = test::TestRequest::get()
        .uri("/api/v1/assignments?type=essay")
        .insert_header(student(GRACE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

fn ids(body: &Value) -> Vec<i64> {
    body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect()
}

#[actix_web::test]
async fn test_calendar_events_by_course_and_day() {
    let app = campus_app!();

    // Grace 参与 CS101 与 CS240，看不到 MATH201 的事件
    let req = test::TestRequest::get()
        .uri("/api/v1/calendar/events")
        .insert_header(student(GRACE))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), vec![1, 3, 2]);

    let req = test::TestRequest::get()
        .uri("/api/v1/calendar/events?date=2026-10-19")
        .insert_header(student(GRACE))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), vec![1, 3]);

    let req = test::TestRequest::get()
        .uri("/api/v1/calendar/events?course_id=3")
        .insert_header(student(GRACE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/v1/calendar/events?date=19-10-2026")
        .insert_header(student(GRACE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_calendar_event_lifecycle() {
    let app = campus_app!();

    let payload = json!({
        "title": "CS101 Review",
        "course_id": 1,
        "type": "class",
        "start_time": "2026-10-26T10:00:00Z",
        "end_time": "2026-10-26T11:00:00Z"
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/calendar/events")
        .insert_header(student(GRACE))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Alan 不是 CS101 的任课教师
    let req = test::TestRequest::post()
        .uri("/api/v1/calendar/events")
        .insert_header(professor(ALAN))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/calendar/events")
        .insert_header(professor(ADA))
        .set_json(json!({
            "title": "Backwards",
            "start_time": "2026-10-26T11:00:00Z",
            "end_time": "2026-10-26T10:00:00Z"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/calendar/events")
        .insert_header(professor(ADA))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let event_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["type"], "class");
    assert_eq!(body["data"]["created_by"], ADA);

    let req = test::TestRequest::get()
        .uri("/api/v1/calendar/events?course_id=1")
        .insert_header(student(LINUS))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), vec![1, event_id]);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/calendar/events/{event_id}"))
        .insert_header(professor(ALAN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/calendar/events/{event_id}"))
        .insert_header(professor(ADA))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/calendar/events/{event_id}"))
        .insert_header(professor(ADA))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_attendance_and_roster() {
    let app = campus_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/courses/1/roster")
        .insert_header(professor(ADA))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["course_code"], "CS101");
    let roster = body["data"]["items"].as_array().unwrap();
    assert_eq!(roster.len(), 3);
    assert_eq!(roster[0]["student_id"], GRACE);
    assert_eq!(roster[0]["attended"], 3);
    assert_eq!(roster[0]["attendance_rate"], 100.0);
    assert_eq!(roster[0]["average_percentage"], 95.0);
    assert_eq!(roster[1]["student_id"], LINUS);
    assert_eq!(roster[1]["attendance_rate"], 66.67);
    assert_eq!(roster[2]["student_id"], MARGARET);
    assert_eq!(roster[2]["average_percentage"], 72.0);

    // 花名册与出勤管理只对任课教师开放
    let req = test::TestRequest::get()
        .uri("/api/v1/courses/1/roster")
        .insert_header(professor(ALAN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/v1/courses/1/attendance")
        .insert_header(student(GRACE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/courses/1/attendance")
        .insert_header(professor(ADA))
        .set_json(json!({ "date": "2026-10-14", "present_students": [GRACE, KEN] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/courses/1/attendance")
        .insert_header(professor(ADA))
        .set_json(json!({ "date": "2026-10-14", "present_students": [GRACE, LINUS] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/courses/1/attendance")
        .insert_header(professor(ADA))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 4);

    let req = test::TestRequest::get()
        .uri("/api/v1/courses/1/attendance/me")
        .insert_header(student(LINUS))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["sessions"], 4);
    assert_eq!(body["data"]["attended"], 3);
    assert_eq!(body["data"]["absent_dates"], json!(["2026-10-07"]));

    // 教师本人没有出勤记录
    let req = test::TestRequest::get()
        .uri("/api/v1/courses/1/attendance/me")
        .insert_header(professor(ADA))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/v1/courses/1/attendance/me")
        .insert_header(student(KEN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_invalid_ids_and_unknown_api_paths() {
    let app = campus_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/courses/abc")
        .insert_header(student(GRACE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/does-not-exist")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 前端路由回退到首页
    let req = test::TestRequest::get().uri("/courses/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
