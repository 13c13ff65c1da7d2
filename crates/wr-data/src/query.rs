use crate::dataset::{Dataset, Row};
use crate::value::Value;

/// A builder for filtering rows of a dataset.
///
/// Queries return row indices in dataset order so callers can sample from
/// them without cloning rows.
pub struct RowQuery<'d> {
    dataset: &'d Dataset,
    required: Vec<String>,
    not_revealing: Option<(String, String)>,
}

impl<'d> RowQuery<'d> {
    /// Start a query that matches every row.
    pub fn new(dataset: &'d Dataset) -> Self {
        Self {
            dataset,
            required: Vec::new(),
            not_revealing: None,
        }
    }

    /// Only rows that carry the field.
    pub fn has(mut self, field: impl Into<String>) -> Self {
        self.required.push(field.into());
        self
    }

    /// Drop rows whose `item` text contains their own `category` text
    /// (case-insensitive), e.g. "South Africa" in category "Africa".
    pub fn not_revealing(mut self, item: impl Into<String>, category: impl Into<String>) -> Self {
        self.not_revealing = Some((item.into(), category.into()));
        self
    }

    /// Execute the query and return matching row indices.
    pub fn execute(self) -> Vec<usize> {
        self.dataset
            .iter()
            .filter(|(_, row)| self.matches(row))
            .map(|(i, _)| i)
            .collect()
    }

    fn matches(&self, row: &Row) -> bool {
        if !self.required.iter().all(|f| row.has(f)) {
            return false;
        }
        if let Some((item, category)) = &self.not_revealing
            && let (Some(item), Some(category)) = (
                row.get(item).and_then(Value::as_text),
                row.get(category).and_then(Value::as_text),
            )
            && reveals(item, category)
        {
            return false;
        }
        true
    }
}

/// Whether an item's text trivially contains its category name.
pub fn reveals(item: &str, category: &str) -> bool {
    let category = category.trim().to_lowercase();
    !category.is_empty() && item.to_lowercase().contains(&category)
}
