//! 导航菜单
//!
//! 学生与教师视图展示不同的导航项。切换角色视图只影响这里返回的列表，
//! 不会改动任何存储中的数据。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::users::entities::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/navigation.ts")]
pub struct NavigationItem {
    pub key: &'static str,
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
}

const fn item(
    key: &'static str,
    label: &'static str,
    path: &'static str,
    icon: &'static str,
) -> NavigationItem {
    NavigationItem {
        key,
        label,
        path,
        icon,
    }
}

const STUDENT_ITEMS: &[NavigationItem] = &[
    item("dashboard", "Dashboard", "/dashboard", "home"),
    item("courses", "My Courses", "/courses", "book"),
    item("assignments", "Assignments", "/assignments", "clipboard"),
    item("grades", "Grades", "/grades", "award"),
    item("calendar", "Calendar", "/calendar", "calendar"),
    item("notes", "Notes", "/notes", "edit"),
    item("chat", "Chat", "/chat", "message-circle"),
    item("notifications", "Notifications", "/notifications", "bell"),
];

const PROFESSOR_ITEMS: &[NavigationItem] = &[
    item("dashboard", "Dashboard", "/dashboard", "home"),
    item("courses", "Teaching", "/courses", "book"),
    item("students", "Students", "/students", "users"),
    item("assignments", "Assignments", "/assignments", "clipboard"),
    item("grading", "Grading", "/grading", "check-square"),
    item("analytics", "Analytics", "/analytics", "bar-chart"),
    item("calendar", "Calendar", "/calendar", "calendar"),
    item("notes", "Notes", "/notes", "edit"),
    item("chat", "Chat", "/chat", "message-circle"),
    item("notifications", "Notifications", "/notifications", "bell"),
];

/// 获取角色对应的导航项
pub fn navigation_for(role: UserRole) -> Vec<NavigationItem> {
    match role {
        UserRole::Student => STUDENT_ITEMS.to_vec(),
        UserRole::Professor => PROFESSOR_ITEMS.to_vec(),
    }
}

// 导航查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/navigation.ts")]
pub struct NavigationQuery {
    pub role: Option<UserRole>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/navigation.ts")]
pub struct NavigationResponse {
    pub role: UserRole,
    pub items: Vec<NavigationItem>,
}
