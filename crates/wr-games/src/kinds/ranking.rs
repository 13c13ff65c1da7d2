//! Ranking (classifier): order `k` sampled rows by value.
//!
//! Scoring is per position: an exact hit earns `exact_points`, an item that
//! sits next to its correct slot earns `adjacent_points`, and a fully
//! correct order adds `perfect_bonus` on top.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use wr_data::{DataError, Dataset};

use super::{ConfigIssue, Minigame, RoundSlot, Score, check_rows, mismatch};
use crate::answer::Answer;
use crate::error::{GameError, GameResult};
use crate::sampler::{DEFAULT_MAX_ATTEMPTS, RandomRoundSampler};
use crate::translate::{Translator, fill};

/// Sort direction of the correct order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Largest value first.
    #[default]
    Descending,
    /// Smallest value first.
    Ascending,
}

/// Which misplacements earn adjacency credit.
///
/// Distance is always measured from the submitted position to the item's
/// index in the correct order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjacency {
    /// The item belongs exactly one slot further down than submitted.
    #[default]
    Ahead,
    /// The item belongs one slot away in either direction.
    Either,
}

impl Adjacency {
    /// Whether an item submitted at `position` whose correct index is
    /// `correct_index` earns adjacency credit.
    pub fn credits(self, position: usize, correct_index: usize) -> bool {
        match self {
            Self::Ahead => correct_index == position + 1,
            Self::Either => position.abs_diff(correct_index) == 1,
        }
    }
}

/// Ranking configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingGame {
    /// Text field naming each item.
    pub label_field: String,
    /// Numeric field the items are ordered by.
    pub value_field: String,
    /// Number of items per round.
    pub items: usize,
    /// Direction of the correct order.
    pub order: SortOrder,
    /// Points per item in its exact slot.
    pub exact_points: u32,
    /// Points per item next to its slot.
    pub adjacent_points: u32,
    /// Bonus for a fully correct order.
    pub perfect_bonus: u32,
    /// Adjacency policy.
    pub adjacency: Adjacency,
    /// Resampling cap when sampled values or labels collide.
    pub max_attempts: usize,
}

impl Default for RankingGame {
    fn default() -> Self {
        Self {
            label_field: "name".to_string(),
            value_field: "value".to_string(),
            items: 4,
            order: SortOrder::default(),
            exact_points: 15,
            adjacent_points: 5,
            perfect_bonus: 25,
            adjacency: Adjacency::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// An item to rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    /// Source row.
    pub row: usize,
    /// Display label.
    pub label: String,
    /// Value the order is based on.
    pub value: f64,
}

/// One ranking round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRound {
    /// Items in display (sampled) order.
    pub items: Vec<RankedItem>,
    /// Labels in the correct order.
    pub correct_order: Vec<String>,
}

impl RankingRound {
    /// Labels in display order.
    pub fn labels(&self) -> Vec<String> {
        self.items.iter().map(|i| i.label.clone()).collect()
    }
}

impl RankingGame {
    /// Score a submitted order against the correct one.
    pub fn score_order(&self, submitted: &[String], correct: &[String]) -> Score {
        let mut points = 0;
        for (position, label) in submitted.iter().enumerate() {
            if correct.get(position) == Some(label) {
                points += self.exact_points;
            } else if let Some(correct_index) = correct.iter().position(|c| c == label)
                && self.adjacency.credits(position, correct_index)
            {
                points += self.adjacent_points;
            }
        }

        let perfect = submitted == correct;
        if perfect {
            points += self.perfect_bonus;
        }
        Score {
            points,
            correct: perfect,
        }
    }

    fn item(&self, data: &Dataset, row: usize) -> GameResult<RankedItem> {
        let r = data.row(row)?;
        let at = |e: DataError| GameError::row(row, e);
        Ok(RankedItem {
            row,
            label: r.text(&self.label_field).map_err(at)?.to_string(),
            value: r.number(&self.value_field).map_err(at)?,
        })
    }
}

fn all_distinct(items: &[RankedItem]) -> bool {
    let labels: HashSet<&str> = items.iter().map(|i| i.label.as_str()).collect();
    let values: HashSet<u64> = items.iter().map(|i| i.value.to_bits()).collect();
    labels.len() == items.len() && values.len() == items.len()
}

/// A submitted order must list every item of the round exactly once.
fn check_permutation(submitted: &[String], correct: &[String]) -> GameResult<()> {
    let invalid = |reason: String| GameError::InvalidAnswer {
        kind: RankingGame::NAME,
        reason,
    };
    if submitted.len() != correct.len() {
        return Err(invalid(format!(
            "expected {} items, got {}",
            correct.len(),
            submitted.len()
        )));
    }
    let mut seen = HashSet::new();
    for label in submitted {
        if !correct.contains(label) {
            return Err(invalid(format!("\"{label}\" is not in this round")));
        }
        if !seen.insert(label.as_str()) {
            return Err(invalid(format!("\"{label}\" is listed twice")));
        }
    }
    Ok(())
}

impl Minigame for RankingGame {
    type Round = RankingRound;

    const NAME: &'static str = "ranking";
    const ICON: &'static str = "📊";
    const ROW_BASED: bool = false;

    fn validate(&self, data: &Dataset) -> Result<(), ConfigIssue> {
        if self.items < 2 {
            return Err(format!("a ranking needs at least 2 items, configured {}", self.items).into());
        }
        if data.len() < self.items {
            return Err(format!(
                "a ranking of {} items needs at least {} rows, found {}",
                self.items,
                self.items,
                data.len()
            )
            .into());
        }
        check_rows(data, |row| {
            row.text(&self.label_field)?;
            row.number(&self.value_field)?;
            Ok(())
        })
    }

    fn prepare_round(
        &self,
        data: &Dataset,
        _slot: RoundSlot,
        sampler: &mut RandomRoundSampler,
    ) -> GameResult<RankingRound> {
        let items = sampler.with_retries(
            self.max_attempts,
            "items with distinct labels and values",
            |s| {
                let picked = s.sample_indices(data.len(), self.items)?;
                let items: Vec<RankedItem> = picked
                    .into_iter()
                    .map(|row| self.item(data, row))
                    .collect::<GameResult<_>>()
                    .ok()?;
                all_distinct(&items).then_some(items)
            },
        )?;

        let mut sorted = items.clone();
        sorted.sort_by(|a, b| match self.order {
            SortOrder::Descending => b.value.total_cmp(&a.value),
            SortOrder::Ascending => a.value.total_cmp(&b.value),
        });

        Ok(RankingRound {
            correct_order: sorted.into_iter().map(|i| i.label).collect(),
            items,
        })
    }

    fn score(&self, answer: &Answer, round: &RankingRound) -> GameResult<Score> {
        match answer {
            Answer::Ranking(order) => {
                check_permutation(order, &round.correct_order)?;
                Ok(self.score_order(order, &round.correct_order))
            }
            other => Err(mismatch(Self::NAME, other)),
        }
    }

    fn max_points(&self) -> u32 {
        self.exact_points * self.items as u32 + self.perfect_bonus
    }

    fn instructions(&self, tr: &dyn Translator) -> String {
        match self.order {
            SortOrder::Descending => tr.translate(
                Self::NAME,
                "instructions_descending",
                "Order the items from highest to lowest value.",
            ),
            SortOrder::Ascending => tr.translate(
                Self::NAME,
                "instructions_ascending",
                "Order the items from lowest to highest value.",
            ),
        }
    }

    fn reveal(&self, round: &RankingRound, tr: &dyn Translator) -> String {
        fill(
            &tr.translate(Self::NAME, "reveal", "Correct order: {order}."),
            &[("order", round.correct_order.join(" > "))],
        )
    }
}
