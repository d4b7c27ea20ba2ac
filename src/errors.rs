//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use actix_web::http::StatusCode;
use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_campus_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CampusError {
            $($variant(String),)*
        }

        impl CampusError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CampusError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CampusError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CampusError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CampusError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CampusError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_campus_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    FixtureLoad("E003", "Fixture Load Error"),
    StorageOperation("E004", "Storage Operation Error"),
    FileOperation("E005", "File Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Conflict("E008", "Resource Conflict"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
}

impl CampusError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl CampusError {
    /// 映射到 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            CampusError::Validation(_) | CampusError::DateParse(_) => StatusCode::BAD_REQUEST,
            CampusError::NotFound(_) => StatusCode::NOT_FOUND,
            CampusError::Conflict(_) => StatusCode::CONFLICT,
            CampusError::Authentication(_) => StatusCode::UNAUTHORIZED,
            CampusError::Authorization(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for CampusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CampusError {}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for CampusError {
    fn from(err: std::io::Error) -> Self {
        CampusError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CampusError {
    fn from(err: serde_json::Error) -> Self {
        CampusError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CampusError {
    fn from(err: chrono::ParseError) -> Self {
        CampusError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CampusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CampusError::cache_connection("test").code(), "E001");
        assert_eq!(CampusError::fixture_load("test").code(), "E003");
        assert_eq!(CampusError::validation("test").code(), "E006");
        assert_eq!(CampusError::authentication("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CampusError::fixture_load("test").error_type(),
            "Fixture Load Error"
        );
        assert_eq!(
            CampusError::conflict("test").error_type(),
            "Resource Conflict"
        );
    }

    #[test]
    fn test_error_message() {
        let err = CampusError::validation("title is required");
        assert_eq!(err.message(), "title is required");
    }

    #[test]
    fn test_format_simple() {
        let err = CampusError::not_found("course 42");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("course 42"));
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            CampusError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(CampusError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            CampusError::storage_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_serde_error() {
        let err: CampusError = serde_json::from_str::<i64>("not a number")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), "E009");
    }
}
