//! ORDER BY accumulation

use crate::validation::quote_identifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Ascending columns are emitted before descending ones, each group in call order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ordering {
    pub ascending: Vec<String>,
    pub descending: Vec<String>,
}

impl Ordering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: String, order: SortOrder) {
        match order {
            SortOrder::Asc => self.ascending.push(column),
            SortOrder::Desc => self.descending.push(column),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ascending.is_empty() && self.descending.is_empty()
    }

    pub fn to_sql(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let terms = self
            .ascending
            .iter()
            .map(|column| (column, SortOrder::Asc))
            .chain(self.descending.iter().map(|column| (column, SortOrder::Desc)))
            .map(|(column, order)| format!("{} {}", quote_identifier(column), order.to_sql()))
            .collect::<Vec<_>>()
            .join(", ");

        format!("ORDER BY {}", terms)
    }
}
