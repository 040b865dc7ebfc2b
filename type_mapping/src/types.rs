//! Runtime value definitions
//!
//! SQLite stores every value in one of five storage classes. [`SqlValue`]
//! mirrors them one to one and is what flows through statement parameters
//! and decoded result rows.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum SqlValue {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Storage class name, as SQLite's `typeof()` reports it
    pub fn kind(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Integer(_) => "integer",
            SqlValue::Real(_) => "real",
            SqlValue::Text(_) => "text",
            SqlValue::Blob(_) => "blob",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SqlValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Integer(i) => write!(f, "{}", i),
            SqlValue::Real(r) => write!(f, "{}", r),
            SqlValue::Text(s) => write!(f, "'{}'", s),
            SqlValue::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

macro_rules! integer_into_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SqlValue {
                fn from(val: $ty) -> Self {
                    SqlValue::Integer(val as i64)
                }
            }
        )*
    };
}

integer_into_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for SqlValue {
    fn from(val: bool) -> Self {
        SqlValue::Integer(val as i64)
    }
}

impl From<f32> for SqlValue {
    fn from(val: f32) -> Self {
        SqlValue::Real(val as f64)
    }
}

impl From<f64> for SqlValue {
    fn from(val: f64) -> Self {
        SqlValue::Real(val)
    }
}

impl From<String> for SqlValue {
    fn from(val: String) -> Self {
        SqlValue::Text(val)
    }
}

impl From<&str> for SqlValue {
    fn from(val: &str) -> Self {
        SqlValue::Text(val.to_string())
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(val: Vec<u8>) -> Self {
        SqlValue::Blob(val)
    }
}

impl From<&[u8]> for SqlValue {
    fn from(val: &[u8]) -> Self {
        SqlValue::Blob(val.to_vec())
    }
}

impl From<Uuid> for SqlValue {
    fn from(val: Uuid) -> Self {
        SqlValue::Text(val.hyphenated().to_string())
    }
}

impl From<chrono::DateTime<chrono::Utc>> for SqlValue {
    fn from(val: chrono::DateTime<chrono::Utc>) -> Self {
        SqlValue::Text(val.to_rfc3339())
    }
}

impl From<serde_json::Value> for SqlValue {
    fn from(val: serde_json::Value) -> Self {
        match val {
            serde_json::Value::Null => SqlValue::Null,
            other => SqlValue::Text(other.to_string()),
        }
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(SqlValue::from(7i32), SqlValue::Integer(7));
        assert_eq!(SqlValue::from(true), SqlValue::Integer(1));
        assert_eq!(SqlValue::from("bob"), SqlValue::Text("bob".to_string()));
        assert_eq!(SqlValue::from(1.5f64), SqlValue::Real(1.5));
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(3u8)), SqlValue::Integer(3));
    }

    #[test]
    fn test_json_null_is_sql_null() {
        assert_eq!(SqlValue::from(serde_json::Value::Null), SqlValue::Null);
        assert_eq!(
            SqlValue::from(serde_json::json!({"a": 1})),
            SqlValue::Text("{\"a\":1}".to_string())
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(SqlValue::Null.kind(), "null");
        assert_eq!(SqlValue::Blob(vec![1]).kind(), "blob");
        assert_eq!(SqlValue::Real(0.0).kind(), "real");
    }
}
