//! User answers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kinds::trend::Trend;

/// What a user submits for a round. The shape depends on the game kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Answer {
    /// One option picked from a list (quiz, duel, geo, impostor).
    Choice(String),
    /// A numeric estimate.
    Number(f64),
    /// A full ordering of the round's items.
    Ranking(Vec<String>),
    /// A trend prediction.
    Trend(Trend),
}

impl Answer {
    /// Name of the answer shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Choice(_) => "choice",
            Self::Number(_) => "number",
            Self::Ranking(_) => "ranking",
            Self::Trend(_) => "trend",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Choice(c) => write!(f, "{c}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Ranking(items) => write!(f, "{}", items.join(" > ")),
            Self::Trend(t) => write!(f, "{t}"),
        }
    }
}
