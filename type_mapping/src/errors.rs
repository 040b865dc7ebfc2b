//! Conversion errors raised while moving values in and out of field slots

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("cannot store {found} value into {target}")]
    TypeMismatch {
        target: &'static str,
        found: &'static str,
    },

    #[error("value {value} is out of range for {target}")]
    OutOfRange { target: &'static str, value: i64 },

    #[error("cannot parse '{value}' as {target}: {reason}")]
    Parse {
        target: &'static str,
        value: String,
        reason: String,
    },
}

impl ConversionError {
    pub fn mismatch(target: &'static str, found: &crate::SqlValue) -> Self {
        Self::TypeMismatch {
            target,
            found: found.kind(),
        }
    }

    pub fn parse(target: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            target,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
