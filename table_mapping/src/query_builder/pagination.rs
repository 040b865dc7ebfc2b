//! LIMIT / OFFSET accumulation

/// Pagination configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Pagination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.offset.is_none()
    }

    pub fn to_sql(&self) -> String {
        match (self.limit, self.offset) {
            (None, None) => String::new(),
            (Some(limit), None) => format!("LIMIT {}", limit),
            (Some(limit), Some(offset)) => format!("LIMIT {} OFFSET {}", limit, offset),
            // SQLite only accepts OFFSET after a LIMIT, -1 means unbounded
            (None, Some(offset)) => format!("LIMIT -1 OFFSET {}", offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_sql() {
        assert_eq!(Pagination::new().to_sql(), "");
        assert_eq!(Pagination::new().with_limit(1).to_sql(), "LIMIT 1");
        assert_eq!(
            Pagination::new().with_limit(2).with_offset(1).to_sql(),
            "LIMIT 2 OFFSET 1"
        );
        assert_eq!(Pagination::new().with_offset(5).to_sql(), "LIMIT -1 OFFSET 5");
    }
}
