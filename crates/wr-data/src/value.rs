use std::fmt;

use serde::{Deserialize, Serialize};

/// A single field value in a dataset row.
///
/// Deserialized untagged from JSON: `null`, booleans, numbers, strings,
/// arrays of numbers (time series) and arrays of strings (option lists).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No value.
    Null,
    /// A boolean flag.
    Bool(bool),
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
    /// A numeric time series, oldest point first.
    Series(Vec<f64>),
    /// A list of text values.
    List(Vec<String>),
}

impl Value {
    /// Human-readable name of the stored type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "a boolean",
            Self::Number(_) => "a number",
            Self::Text(_) => "text",
            Self::Series(_) => "a series",
            Self::List(_) => "a list",
        }
    }

    /// The text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric content, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The series content, if this is a numeric series.
    pub fn as_series(&self) -> Option<&[f64]> {
        match self {
            Self::Series(s) => Some(s),
            _ => None,
        }
    }

    /// The list content, if this is a text list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "-"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Series(s) => {
                let parts: Vec<String> = s.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::List(l) => write!(f, "[{}]", l.join(", ")),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<f64>> for Value {
    fn from(s: Vec<f64>) -> Self {
        Self::Series(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(l: Vec<String>) -> Self {
        Self::List(l)
    }
}

impl From<Vec<&str>> for Value {
    fn from(l: Vec<&str>) -> Self {
        Self::List(l.into_iter().map(String::from).collect())
    }
}
