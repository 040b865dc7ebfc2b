//! Field slots
//!
//! A [`FieldSlot`] is a typed location inside a record that can be read as a
//! [`SqlValue`] and written from one. Record bindings hand out
//! `&dyn FieldSlot` / `&mut dyn FieldSlot` so the mapping layer can move
//! values without knowing concrete field types.

use crate::errors::ConversionError;
use crate::types::SqlValue;
use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

/// Layout SQLite uses for `CURRENT_TIMESTAMP`
const SQLITE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub trait FieldSlot: Send + Sync {
    /// Current value as a statement parameter
    fn to_value(&self) -> SqlValue;

    /// Whether the slot holds its type's zero value
    fn is_zero(&self) -> bool;

    /// Overwrite the slot with a decoded column value
    fn set_value(&mut self, value: SqlValue) -> Result<(), ConversionError>;

    /// Store an engine-generated row id. Returns false for non-integer slots.
    fn set_generated_id(&mut self, _id: i64) -> bool {
        false
    }
}

fn parse_integer(target: &'static str, value: &SqlValue) -> Result<i64, ConversionError> {
    match value {
        SqlValue::Integer(i) => Ok(*i),
        SqlValue::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| ConversionError::parse(target, s.as_str(), e)),
        SqlValue::Real(r) if r.fract() == 0.0 => whole_real_to_i64(target, *r),
        other => Err(ConversionError::mismatch(target, other)),
    }
}

/// `2^63` is exactly representable, `i64::MAX` is not
fn whole_real_to_i64(target: &'static str, r: f64) -> Result<i64, ConversionError> {
    if r >= i64::MIN as f64 && r < i64::MAX as f64 {
        Ok(r as i64)
    } else {
        Err(ConversionError::parse(
            target,
            r.to_string(),
            "outside the 64-bit integer range",
        ))
    }
}

fn parse_real(target: &'static str, value: &SqlValue) -> Result<f64, ConversionError> {
    match value {
        SqlValue::Real(r) => Ok(*r),
        SqlValue::Integer(i) => Ok(*i as f64),
        SqlValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| ConversionError::parse(target, s.as_str(), e)),
        other => Err(ConversionError::mismatch(target, other)),
    }
}

fn into_text(target: &'static str, value: SqlValue) -> Result<String, ConversionError> {
    match value {
        SqlValue::Text(s) => Ok(s),
        SqlValue::Integer(i) => Ok(i.to_string()),
        SqlValue::Real(r) => Ok(r.to_string()),
        SqlValue::Blob(b) => {
            String::from_utf8(b).map_err(|e| ConversionError::parse(target, "<blob>", e))
        }
        SqlValue::Null => Err(ConversionError::mismatch(target, &SqlValue::Null)),
    }
}

macro_rules! integer_slot {
    ($($ty:ty),*) => {
        $(
            impl FieldSlot for $ty {
                fn to_value(&self) -> SqlValue {
                    SqlValue::Integer(*self as i64)
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn set_value(&mut self, value: SqlValue) -> Result<(), ConversionError> {
                    let raw = parse_integer(stringify!($ty), &value)?;
                    *self = <$ty>::try_from(raw).map_err(|_| ConversionError::OutOfRange {
                        target: stringify!($ty),
                        value: raw,
                    })?;
                    Ok(())
                }

                fn set_generated_id(&mut self, id: i64) -> bool {
                    match <$ty>::try_from(id) {
                        Ok(v) => {
                            *self = v;
                            true
                        }
                        Err(_) => false,
                    }
                }
            }
        )*
    };
}

integer_slot!(i8, i16, i32, i64, u8, u16, u32);

impl FieldSlot for u64 {
    fn to_value(&self) -> SqlValue {
        // SQLite integers are signed 64-bit
        match i64::try_from(*self) {
            Ok(v) => SqlValue::Integer(v),
            Err(_) => SqlValue::Text(self.to_string()),
        }
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }

    fn set_value(&mut self, value: SqlValue) -> Result<(), ConversionError> {
        if let SqlValue::Text(s) = &value {
            *self = s
                .trim()
                .parse::<u64>()
                .map_err(|e| ConversionError::parse("u64", s.as_str(), e))?;
            return Ok(());
        }
        let raw = parse_integer("u64", &value)?;
        *self = u64::try_from(raw).map_err(|_| ConversionError::OutOfRange {
            target: "u64",
            value: raw,
        })?;
        Ok(())
    }

    fn set_generated_id(&mut self, id: i64) -> bool {
        match u64::try_from(id) {
            Ok(v) => {
                *self = v;
                true
            }
            Err(_) => false,
        }
    }
}

impl FieldSlot for f64 {
    fn to_value(&self) -> SqlValue {
        SqlValue::Real(*self)
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn set_value(&mut self, value: SqlValue) -> Result<(), ConversionError> {
        *self = parse_real("f64", &value)?;
        Ok(())
    }
}

impl FieldSlot for f32 {
    fn to_value(&self) -> SqlValue {
        SqlValue::Real(*self as f64)
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn set_value(&mut self, value: SqlValue) -> Result<(), ConversionError> {
        *self = parse_real("f32", &value)? as f32;
        Ok(())
    }
}

impl FieldSlot for bool {
    fn to_value(&self) -> SqlValue {
        SqlValue::Integer(*self as i64)
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn set_value(&mut self, value: SqlValue) -> Result<(), ConversionError> {
        *self = match &value {
            SqlValue::Integer(i) => *i != 0,
            SqlValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "t" | "true" => true,
                "0" | "f" | "false" => false,
                _ => return Err(ConversionError::parse("bool", s.as_str(), "not a boolean")),
            },
            other => return Err(ConversionError::mismatch("bool", other)),
        };
        Ok(())
    }
}

impl FieldSlot for String {
    fn to_value(&self) -> SqlValue {
        SqlValue::Text(self.clone())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn set_value(&mut self, value: SqlValue) -> Result<(), ConversionError> {
        *self = into_text("String", value)?;
        Ok(())
    }
}

impl FieldSlot for Vec<u8> {
    fn to_value(&self) -> SqlValue {
        SqlValue::Blob(self.clone())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn set_value(&mut self, value: SqlValue) -> Result<(), ConversionError> {
        *self = match value {
            SqlValue::Blob(b) => b,
            SqlValue::Text(s) => s.into_bytes(),
            other => return Err(ConversionError::mismatch("Vec<u8>", &other)),
        };
        Ok(())
    }
}

impl FieldSlot for DateTime<Utc> {
    fn to_value(&self) -> SqlValue {
        SqlValue::Text(self.to_rfc3339())
    }

    fn is_zero(&self) -> bool {
        self.timestamp() == 0 && self.timestamp_subsec_nanos() == 0
    }

    fn set_value(&mut self, value: SqlValue) -> Result<(), ConversionError> {
        *self = match &value {
            SqlValue::Text(s) => match DateTime::parse_from_rfc3339(s) {
                Ok(dt) => dt.with_timezone(&Utc),
                Err(_) => NaiveDateTime::parse_from_str(s, SQLITE_DATETIME_FORMAT)
                    .map(|naive| naive.and_utc())
                    .map_err(|e| ConversionError::parse("DateTime<Utc>", s.as_str(), e))?,
            },
            SqlValue::Integer(secs) => DateTime::from_timestamp(*secs, 0).ok_or(
                ConversionError::OutOfRange {
                    target: "DateTime<Utc>",
                    value: *secs,
                },
            )?,
            other => return Err(ConversionError::mismatch("DateTime<Utc>", other)),
        };
        Ok(())
    }
}

impl FieldSlot for NaiveDateTime {
    fn to_value(&self) -> SqlValue {
        SqlValue::Text(self.format(SQLITE_DATETIME_FORMAT).to_string())
    }

    fn is_zero(&self) -> bool {
        *self == NaiveDateTime::default()
    }

    fn set_value(&mut self, value: SqlValue) -> Result<(), ConversionError> {
        *self = match &value {
            SqlValue::Text(s) => NaiveDateTime::parse_from_str(s, SQLITE_DATETIME_FORMAT)
                .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.naive_utc()))
                .map_err(|e| ConversionError::parse("NaiveDateTime", s.as_str(), e))?,
            SqlValue::Integer(secs) => DateTime::from_timestamp(*secs, 0)
                .map(|dt| dt.naive_utc())
                .ok_or(ConversionError::OutOfRange {
                    target: "NaiveDateTime",
                    value: *secs,
                })?,
            other => return Err(ConversionError::mismatch("NaiveDateTime", other)),
        };
        Ok(())
    }
}

impl FieldSlot for Uuid {
    fn to_value(&self) -> SqlValue {
        SqlValue::Text(self.hyphenated().to_string())
    }

    fn is_zero(&self) -> bool {
        self.is_nil()
    }

    fn set_value(&mut self, value: SqlValue) -> Result<(), ConversionError> {
        *self = match &value {
            SqlValue::Text(s) => {
                Uuid::parse_str(s).map_err(|e| ConversionError::parse("Uuid", s.as_str(), e))?
            }
            SqlValue::Blob(b) => {
                Uuid::from_slice(b).map_err(|e| ConversionError::parse("Uuid", "<blob>", e))?
            }
            other => return Err(ConversionError::mismatch("Uuid", other)),
        };
        Ok(())
    }
}

impl FieldSlot for serde_json::Value {
    fn to_value(&self) -> SqlValue {
        self.clone().into()
    }

    fn is_zero(&self) -> bool {
        self.is_null()
    }

    fn set_value(&mut self, value: SqlValue) -> Result<(), ConversionError> {
        *self = match value {
            SqlValue::Null => serde_json::Value::Null,
            SqlValue::Text(s) => serde_json::from_str(&s)
                .map_err(|e| ConversionError::parse("serde_json::Value", s.as_str(), e))?,
            SqlValue::Integer(i) => serde_json::Value::from(i),
            SqlValue::Real(r) => serde_json::Value::from(r),
            other => return Err(ConversionError::mismatch("serde_json::Value", &other)),
        };
        Ok(())
    }
}

impl<T> FieldSlot for Option<T>
where
    T: FieldSlot + Default,
{
    fn to_value(&self) -> SqlValue {
        match self {
            Some(inner) => inner.to_value(),
            None => SqlValue::Null,
        }
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn set_value(&mut self, value: SqlValue) -> Result<(), ConversionError> {
        if value.is_null() {
            *self = None;
            return Ok(());
        }
        let mut inner = T::default();
        inner.set_value(value)?;
        *self = Some(inner);
        Ok(())
    }

    fn set_generated_id(&mut self, id: i64) -> bool {
        let mut inner = T::default();
        if inner.set_generated_id(id) {
            *self = Some(inner);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_slot() {
        let mut id: i64 = 0;
        assert!(id.is_zero());
        id.set_value(SqlValue::Integer(42)).unwrap();
        assert_eq!(id, 42);
        assert!(!id.is_zero());
        assert_eq!(id.to_value(), SqlValue::Integer(42));

        id.set_value(SqlValue::Text(" 17 ".to_string())).unwrap();
        assert_eq!(id, 17);
    }

    #[test]
    fn test_integer_slot_rejects_null_and_overflow() {
        let mut small: i8 = 0;
        assert!(matches!(
            small.set_value(SqlValue::Integer(1000)),
            Err(ConversionError::OutOfRange { target: "i8", value: 1000 })
        ));
        assert!(matches!(
            small.set_value(SqlValue::Null),
            Err(ConversionError::TypeMismatch { found: "null", .. })
        ));
    }

    #[test]
    fn test_whole_reals_outside_i64_are_rejected() {
        let mut wide: i64 = 0;
        wide.set_value(SqlValue::Real(-9_223_372_036_854_775_808.0)).unwrap();
        assert_eq!(wide, i64::MIN);
        wide.set_value(SqlValue::Real(12.0)).unwrap();
        assert_eq!(wide, 12);

        for r in [1e20, -1e20, 9_223_372_036_854_775_808.0] {
            assert!(matches!(
                wide.set_value(SqlValue::Real(r)),
                Err(ConversionError::Parse { target: "i64", .. })
            ));
        }
        assert_eq!(wide, 12);

        let mut narrow: i32 = 0;
        assert!(matches!(
            narrow.set_value(SqlValue::Real(1e20)),
            Err(ConversionError::Parse { target: "i32", .. })
        ));
        assert!(matches!(
            narrow.set_value(SqlValue::Real(f64::INFINITY)),
            Err(ConversionError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_generated_id_only_for_integers() {
        let mut id: i32 = 0;
        assert!(id.set_generated_id(4));
        assert_eq!(id, 4);

        let mut name = String::new();
        assert!(!name.set_generated_id(4));
        assert!(name.is_empty());

        let mut maybe: Option<i64> = None;
        assert!(maybe.set_generated_id(9));
        assert_eq!(maybe, Some(9));

        let mut tiny: u8 = 0;
        assert!(!tiny.set_generated_id(300));
    }

    #[test]
    fn test_string_slot() {
        let mut name = String::new();
        assert!(name.is_zero());
        name.set_value(SqlValue::Text("bob".to_string())).unwrap();
        assert_eq!(name, "bob");
        name.set_value(SqlValue::Integer(5)).unwrap();
        assert_eq!(name, "5");
        assert!(name.set_value(SqlValue::Null).is_err());
    }

    #[test]
    fn test_option_slot() {
        let mut nickname: Option<String> = Some("x".to_string());
        assert!(!nickname.is_zero());
        nickname.set_value(SqlValue::Null).unwrap();
        assert!(nickname.is_none());
        assert!(nickname.is_zero());
        assert_eq!(nickname.to_value(), SqlValue::Null);

        // Some(0) is not the zero value of Option
        let zero: Option<i64> = Some(0);
        assert!(!zero.is_zero());
    }

    #[test]
    fn test_bool_and_real_slots() {
        let mut active = false;
        active.set_value(SqlValue::Integer(1)).unwrap();
        assert!(active);
        active.set_value(SqlValue::Text("false".to_string())).unwrap();
        assert!(!active);

        let mut price = 0.0f64;
        price.set_value(SqlValue::Integer(3)).unwrap();
        assert_eq!(price, 3.0);
        assert!(!price.is_zero());
    }

    #[test]
    fn test_datetime_slot_accepts_sqlite_format() {
        let mut at = DateTime::<Utc>::default();
        assert!(at.is_zero());
        at.set_value(SqlValue::Text("2024-03-01 10:20:30".to_string()))
            .unwrap();
        assert_eq!(at.to_rfc3339(), "2024-03-01T10:20:30+00:00");

        let mut naive = NaiveDateTime::default();
        naive
            .set_value(SqlValue::Text("2024-03-01 10:20:30".to_string()))
            .unwrap();
        assert_eq!(
            naive.to_value(),
            SqlValue::Text("2024-03-01 10:20:30".to_string())
        );
    }

    #[test]
    fn test_uuid_and_json_slots() {
        let mut id = Uuid::nil();
        assert!(id.is_zero());
        let fresh = Uuid::new_v4();
        id.set_value(fresh.into()).unwrap();
        assert_eq!(id, fresh);

        let mut doc = serde_json::Value::Null;
        assert!(doc.is_zero());
        doc.set_value(SqlValue::Text("{\"k\":[1,2]}".to_string()))
            .unwrap();
        assert_eq!(doc, serde_json::json!({"k": [1, 2]}));
    }
}
