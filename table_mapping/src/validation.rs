//! Validation module
//!
//! Table names reach SQL text (the catalog pragma, every generated
//! statement), so they are checked once and always emitted double-quoted.

use std::fmt;

/// Validation errors for database identifiers
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Name is empty
    Empty,
    /// Name contains a NUL character, which SQLite cannot quote
    NulCharacter(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty => {
                write!(f, "Name cannot be empty")
            }
            ValidationError::NulCharacter(name) => {
                write!(f, "Name '{}' contains a NUL character", name.escape_debug())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validated table name that is safe to quote into SQL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedTableName(String);

impl ValidatedTableName {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::Empty);
        }
        if name.contains('\0') {
            return Err(ValidationError::NulCharacter(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Quoted form for SQL text
    pub fn quoted(&self) -> String {
        quote_identifier(&self.0)
    }
}

/// Double-quote an identifier, escaping embedded quotes as `""`
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_table_names() {
        assert!(ValidatedTableName::new("users").is_ok());
        assert!(ValidatedTableName::new("user profiles").is_ok());
        assert!(ValidatedTableName::new("select").is_ok());
    }

    #[test]
    fn test_invalid_table_names() {
        assert_eq!(ValidatedTableName::new(""), Err(ValidationError::Empty));
        assert!(matches!(
            ValidatedTableName::new("us\0ers"),
            Err(ValidationError::NulCharacter(_))
        ));
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("users"), "\"users\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(
            ValidatedTableName::new("users; DROP TABLE users; --")
                .unwrap()
                .quoted(),
            "\"users; DROP TABLE users; --\""
        );
    }
}
