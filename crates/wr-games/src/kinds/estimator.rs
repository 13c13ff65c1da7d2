//! Estimator: guess a row's numeric value on a slider.

use serde::{Deserialize, Serialize};
use wr_data::{DataError, Dataset};

use super::{ConfigIssue, Minigame, RoundSlot, Score, check_rows, mismatch};
use crate::answer::Answer;
use crate::error::{GameError, GameResult};
use crate::sampler::RandomRoundSampler;
use crate::translate::{Translator, fill};

/// Highest score of one estimate.
pub const MAX_ESTIMATE_POINTS: u32 = 100;

/// Lowest slider bound.
pub const MIN_SLIDER_MAX: f64 = 100.0;

/// Score a guess: 100 minus the percentage error, never below 0.
///
/// A zero target only rewards an exact zero guess. `correct` means the error
/// stayed strictly below `close_threshold`.
pub fn estimate_score(guess: f64, target: f64, close_threshold: f64) -> Score {
    if target == 0.0 {
        return Score::all_or_nothing(guess == 0.0, MAX_ESTIMATE_POINTS);
    }
    let error = ((guess - target).abs() / target.abs()).min(1.0);
    let points = (f64::from(MAX_ESTIMATE_POINTS) * (1.0 - error)).round() as u32;
    Score {
        points,
        correct: error < close_threshold,
    }
}

/// Estimator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorGame {
    /// Text field naming the thing to estimate.
    pub label_field: String,
    /// Numeric field holding the target.
    pub value_field: String,
    /// Unit shown next to values.
    pub unit: Option<String>,
    /// Relative error below which a guess counts as close.
    pub close_threshold: f64,
}

impl Default for EstimatorGame {
    fn default() -> Self {
        Self {
            label_field: "name".to_string(),
            value_field: "value".to_string(),
            unit: None,
            close_threshold: 0.1,
        }
    }
}

/// A value to estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorRound {
    /// Source row.
    pub row: usize,
    /// What is being estimated.
    pub label: String,
    /// The true value.
    pub target: f64,
    /// Upper slider bound.
    pub slider_max: f64,
    /// Unit, if any.
    pub unit: Option<String>,
}

impl EstimatorRound {
    /// Format a value with the round's unit.
    pub fn with_unit(&self, value: f64) -> String {
        match &self.unit {
            Some(unit) => format!("{value} {unit}"),
            None => value.to_string(),
        }
    }
}

impl Minigame for EstimatorGame {
    type Round = EstimatorRound;

    const NAME: &'static str = "estimator";
    const ICON: &'static str = "🎯";
    const ROW_BASED: bool = true;

    fn validate(&self, data: &Dataset) -> Result<(), ConfigIssue> {
        check_rows(data, |row| {
            row.text(&self.label_field)?;
            row.number(&self.value_field)?;
            Ok(())
        })
    }

    fn prepare_round(
        &self,
        data: &Dataset,
        slot: RoundSlot,
        sampler: &mut RandomRoundSampler,
    ) -> GameResult<EstimatorRound> {
        let index = slot.require_row()?;
        let row = data.row(index)?;
        let at = |e: DataError| GameError::row(index, e);

        let label = row.text(&self.label_field).map_err(at)?.to_string();
        let target = row.number(&self.value_field).map_err(at)?;
        let stretch = sampler.uniform(1.5..2.5);
        let offset = f64::from(sampler.uniform_int(100..=500));
        let slider_max = (target * stretch + offset).floor().max(MIN_SLIDER_MAX);

        Ok(EstimatorRound {
            row: index,
            label,
            target,
            slider_max,
            unit: self.unit.clone(),
        })
    }

    fn score(&self, answer: &Answer, round: &EstimatorRound) -> GameResult<Score> {
        match answer {
            Answer::Number(guess) => Ok(estimate_score(*guess, round.target, self.close_threshold)),
            other => Err(mismatch(Self::NAME, other)),
        }
    }

    fn max_points(&self) -> u32 {
        MAX_ESTIMATE_POINTS
    }

    fn instructions(&self, tr: &dyn Translator) -> String {
        tr.translate(
            Self::NAME,
            "instructions",
            "Estimate the value. The closer you get, the more points you earn.",
        )
    }

    fn reveal(&self, round: &EstimatorRound, tr: &dyn Translator) -> String {
        fill(
            &tr.translate(Self::NAME, "reveal", "{label}: the true value is {value}."),
            &[
                ("label", round.label.clone()),
                ("value", round.with_unit(round.target)),
            ],
        )
    }
}
