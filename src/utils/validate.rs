//! 请求字段校验
//!
//! 只做必填与数值范围检查，所有错误一次性收集后返回。

/// 校验结果收集器
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 字符串必填且不能全是空白
    pub fn require(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.errors.push(format!("{field} is required"));
        }
        self
    }

    /// 可选字段：提供时不能为空白
    pub fn not_blank(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.require(field, value),
            None => self,
        }
    }

    pub fn require_some<T>(mut self, field: &str, value: Option<&T>) -> Self {
        if value.is_none() {
            self.errors.push(format!("{field} is required"));
        }
        self
    }

    pub fn positive(mut self, field: &str, value: Option<f64>) -> Self {
        if let Some(value) = value
            && !(value.is_finite() && value > 0.0)
        {
            self.errors.push(format!("{field} must be greater than 0"));
        }
        self
    }

    /// 分数必须位于 0..=max
    pub fn score_within(mut self, field: &str, score: f64, max: f64) -> Self {
        if !score.is_finite() || score < 0.0 || score > max {
            self.errors
                .push(format!("{field} must be between 0 and {max}"));
        }
        self
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }

    pub fn finish(self) -> Result<(), String> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self.error_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_collected() {
        let err = FieldErrors::new()
            .require("title", "  ")
            .require("code", "CS101")
            .require_some::<i64>("due_date", None)
            .finish()
            .unwrap_err();
        assert_eq!(err, "title is required; due_date is required");
    }

    #[test]
    fn test_optional_field_only_checked_when_present() {
        assert!(FieldErrors::new().not_blank("title", None).finish().is_ok());
        assert!(FieldErrors::new().not_blank("title", Some("")).finish().is_err());
    }

    #[test]
    fn test_score_range() {
        assert!(FieldErrors::new().score_within("score", 100.0, 100.0).is_valid());
        assert!(FieldErrors::new().score_within("score", 0.0, 100.0).is_valid());
        assert!(!FieldErrors::new().score_within("score", 100.5, 100.0).is_valid());
        assert!(!FieldErrors::new().score_within("score", -1.0, 100.0).is_valid());
        assert!(!FieldErrors::new().score_within("score", f64::NAN, 100.0).is_valid());
    }

    #[test]
    fn test_positive() {
        assert!(FieldErrors::new().positive("max_score", None).is_valid());
        assert!(FieldErrors::new().positive("max_score", Some(50.0)).is_valid());
        assert!(!FieldErrors::new().positive("max_score", Some(0.0)).is_valid());
    }
}
