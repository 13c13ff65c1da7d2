use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};
use crate::query::RowQuery;
use crate::value::Value;

/// One record of a dataset: named fields mapped to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: BTreeMap<String, Value>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Get a raw field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Whether the row carries the field (with any value).
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterate over field names in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Read a text field.
    pub fn text(&self, field: &str) -> DataResult<&str> {
        let value = self.require(field)?;
        value.as_text().ok_or_else(|| wrong_type(field, "text", value))
    }

    /// Read a numeric field.
    pub fn number(&self, field: &str) -> DataResult<f64> {
        let value = self.require(field)?;
        value
            .as_number()
            .ok_or_else(|| wrong_type(field, "a number", value))
    }

    /// Read a numeric series field.
    pub fn series(&self, field: &str) -> DataResult<&[f64]> {
        let value = self.require(field)?;
        value
            .as_series()
            .ok_or_else(|| wrong_type(field, "a series", value))
    }

    /// Read a text list field.
    pub fn list(&self, field: &str) -> DataResult<&[String]> {
        let value = self.require(field)?;
        value.as_list().ok_or_else(|| wrong_type(field, "a list", value))
    }

    fn require(&self, field: &str) -> DataResult<&Value> {
        self.fields
            .get(field)
            .ok_or_else(|| DataError::MissingField(field.to_string()))
    }
}

fn wrong_type(field: &str, expected: &'static str, found: &Value) -> DataError {
    DataError::WrongType {
        field: field.to_string(),
        expected,
        found: found.type_name(),
    }
}

/// An ordered, immutable-by-convention table of rows.
///
/// Row indices are stable for the lifetime of the dataset; games refer to
/// rows by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Display name, usually the source file stem.
    pub name: String,
    rows: Vec<Row>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Create a dataset from existing rows.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Parse a JSON array of objects.
    pub fn from_json_str(name: impl Into<String>, json: &str) -> DataResult<Self> {
        let rows: Vec<Row> = serde_json::from_str(json)?;
        Ok(Self::from_rows(name, rows))
    }

    /// Load a JSON array of objects from a file. The dataset is named after
    /// the file stem.
    pub fn from_json_file(path: &Path) -> DataResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_json_str(name, &json)
    }

    /// Append a row.
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a row by index.
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Get a row by index, failing with [`DataError::RowOutOfRange`].
    pub fn row(&self, index: usize) -> DataResult<&Row> {
        self.rows.get(index).ok_or(DataError::RowOutOfRange {
            index,
            len: self.rows.len(),
        })
    }

    /// All rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Iterate over `(index, row)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.rows.iter().enumerate()
    }

    /// Distinct text values of a field, sorted. Rows without the field, or
    /// with a non-text value, are skipped.
    pub fn categories(&self, field: &str) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .rows
            .iter()
            .filter_map(|r| r.get(field).and_then(Value::as_text))
            .collect();
        set.into_iter().map(String::from).collect()
    }

    /// Start a row query over this dataset.
    pub fn query(&self) -> RowQuery<'_> {
        RowQuery::new(self)
    }
}
