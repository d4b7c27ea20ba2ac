use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 分页查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_size",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub size: i64,
}

// 分页响应信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub size: i64,
    pub total: i64,
    pub pages: i64,
}

pub const MAX_PAGE_SIZE: i64 = 100;

impl PaginationQuery {
    /// 规范化页码与每页数量：页码至少为 1，每页数量限制在 1..=100
    pub fn normalized(&self) -> (i64, i64) {
        (self.page.max(1), self.size.clamp(1, MAX_PAGE_SIZE))
    }
}

/// 对内存中的有序列表做分页切片
pub fn paginate<T>(items: Vec<T>, page: i64, size: i64) -> (Vec<T>, PaginationInfo) {
    let page = page.max(1);
    let size = size.clamp(1, MAX_PAGE_SIZE);
    let total = items.len() as i64;
    let pages = (total + size - 1) / size;
    let skip = ((page - 1) * size) as usize;

    let slice = items.into_iter().skip(skip).take(size as usize).collect();
    (
        slice,
        PaginationInfo {
            page,
            size,
            total,
            pages,
        },
    )
}

// 自定义反序列化函数，支持字符串到i64的转换
fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

/// 可选的数字查询参数，与分页参数一同展开时值以字符串形式到达
pub(crate) fn deserialize_optional_string_to_i64<'de, D>(
    deserializer: D,
) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Lenient(#[serde(deserialize_with = "deserialize_string_to_i64")] i64);

    Ok(Option::<Lenient>::deserialize(deserializer)?.map(|v| v.0))
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_middle_page() {
        let (items, info) = paginate((1..=25).collect::<Vec<i32>>(), 2, 10);
        assert_eq!(items, (11..=20).collect::<Vec<i32>>());
        assert_eq!(info.total, 25);
        assert_eq!(info.pages, 3);
    }

    #[test]
    fn test_paginate_clamps_inputs() {
        let (items, info) = paginate(vec![1, 2, 3], 0, 0);
        assert_eq!(items, vec![1]);
        assert_eq!(info.page, 1);
        assert_eq!(info.size, 1);

        let (items, info) = paginate(vec![1, 2, 3], 9, 10);
        assert!(items.is_empty());
        assert_eq!(info.pages, 1);
    }

    #[test]
    fn test_query_accepts_string_numbers() {
        let query: PaginationQuery = serde_json::from_str(r#"{"page":"3","size":"20"}"#).unwrap();
        assert_eq!(query.normalized(), (3, 20));

        let query: PaginationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.normalized(), (1, 10));
    }

    #[derive(Debug, Deserialize)]
    struct FilteredQuery {
        #[serde(flatten)]
        pagination: PaginationQuery,
        #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
        course_id: Option<i64>,
    }

    #[test]
    fn test_flattened_filters_accept_string_numbers() {
        let query: FilteredQuery =
            serde_json::from_str(r#"{"page":"2","course_id":"7"}"#).unwrap();
        assert_eq!(query.pagination.page, 2);
        assert_eq!(query.course_id, Some(7));

        let query: FilteredQuery = serde_json::from_str(r#"{"course_id":4}"#).unwrap();
        assert_eq!(query.course_id, Some(4));

        let query: FilteredQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.course_id, None);

        assert!(serde_json::from_str::<FilteredQuery>(r#"{"course_id":"abc"}"#).is_err());
    }
}
