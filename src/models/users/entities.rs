use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Student,   // 学生
    Professor, // 教师
}

impl UserRole {
    pub const STUDENT: &'static str = "student";
    pub const PROFESSOR: &'static str = "professor";

    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::Student, &Self::Professor]
    }

    /// 切换到另一角色视图
    pub fn toggled(self) -> Self {
        match self {
            UserRole::Student => UserRole::Professor,
            UserRole::Professor => UserRole::Student,
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid user role: '{s}'. supported roles: student, professor"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
            UserRole::Professor => write!(f, "{}", UserRole::PROFESSOR),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::PROFESSOR => Ok(UserRole::Professor),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_professor(&self) -> bool {
        self.role == UserRole::Professor
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(self.id, self.role, refresh_token_expiry)
            .map_err(|e| format!("failed to generate token pair: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        assert_eq!("student".parse::<UserRole>(), Ok(UserRole::Student));
        assert_eq!(UserRole::Professor.to_string(), "professor");
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_toggle() {
        assert_eq!(UserRole::Student.toggled(), UserRole::Professor);
        assert_eq!(UserRole::Professor.toggled().toggled(), UserRole::Professor);
    }

    #[test]
    fn test_deserialize_rejects_unknown_role() {
        let err = serde_json::from_str::<UserRole>(r#""teacher""#).unwrap_err();
        assert!(err.to_string().contains("invalid user role"));
    }
}
