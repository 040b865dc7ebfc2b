use thiserror::Error;

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("cannot read table info for '{table}': {reason}")]
    Introspection { table: String, reason: String },

    #[error("invalid mapping item: {0}")]
    InvalidRecord(String),

    #[error("not found")]
    NotFound,

    #[error("multiple rows found")]
    MultipleRowsFound,

    #[error("database error: {0}")]
    Execution(#[from] sqlx::Error),
}

impl MappingError {
    pub fn introspection(table: &str, reason: impl ToString) -> Self {
        Self::Introspection {
            table: table.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord(message.into())
    }

    /// Wrap a field conversion failure the way a driver scan error would be reported
    pub fn column_decode(column: &str, source: type_mapping::ConversionError) -> Self {
        Self::Execution(sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(source),
        })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
