//! SQLite column affinity
//!
//! SQLite derives a column's preferred storage class from the declared type
//! text using a fixed, ordered set of substring rules. The first rule that
//! matches wins.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Affinity {
    Integer,
    Text,
    Blob,
    Real,
    Numeric,
}

impl Affinity {
    /// Determine affinity from a declared column type such as `VARCHAR(40)`
    pub fn from_declared_type(declared: &str) -> Self {
        let upper = declared.to_ascii_uppercase();

        if upper.contains("INT") {
            Affinity::Integer
        } else if upper.contains("CHAR") || upper.contains("CLOB") || upper.contains("TEXT") {
            Affinity::Text
        } else if upper.contains("BLOB") || upper.trim().is_empty() {
            Affinity::Blob
        } else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB") {
            Affinity::Real
        } else {
            Affinity::Numeric
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Affinity::Integer => "INTEGER",
            Affinity::Text => "TEXT",
            Affinity::Blob => "BLOB",
            Affinity::Real => "REAL",
            Affinity::Numeric => "NUMERIC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affinity_rules() {
        assert_eq!(Affinity::from_declared_type("INTEGER"), Affinity::Integer);
        assert_eq!(Affinity::from_declared_type("bigint"), Affinity::Integer);
        assert_eq!(Affinity::from_declared_type("VARCHAR(255)"), Affinity::Text);
        assert_eq!(Affinity::from_declared_type("text"), Affinity::Text);
        assert_eq!(Affinity::from_declared_type(""), Affinity::Blob);
        assert_eq!(Affinity::from_declared_type("BLOB"), Affinity::Blob);
        assert_eq!(Affinity::from_declared_type("DOUBLE PRECISION"), Affinity::Real);
        assert_eq!(Affinity::from_declared_type("DECIMAL(10,5)"), Affinity::Numeric);
        assert_eq!(Affinity::from_declared_type("DATETIME"), Affinity::Numeric);
    }

    #[test]
    fn test_rule_order() {
        // "CHARINT" hits the INT rule first
        assert_eq!(Affinity::from_declared_type("CHARINT"), Affinity::Integer);
        // "POINT" contains INT
        assert_eq!(Affinity::from_declared_type("FLOATING POINT"), Affinity::Integer);
    }
}
