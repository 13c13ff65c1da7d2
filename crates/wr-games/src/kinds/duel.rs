//! Duel: two sampled rows, pick the one that wins under the rule.

use serde::{Deserialize, Serialize};
use wr_data::{DataError, Dataset};

use super::{ConfigIssue, Minigame, RoundSlot, Score, check_rows, mismatch};
use crate::answer::Answer;
use crate::error::{GameError, GameResult};
use crate::sampler::{DEFAULT_MAX_ATTEMPTS, RandomRoundSampler};
use crate::translate::{Translator, fill};

/// Which value wins a duel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuelRule {
    /// The greater value wins.
    #[default]
    HigherWins,
    /// The smaller value wins.
    LowerWins,
}

impl DuelRule {
    /// Whether `a` strictly beats `b`. Equal values beat nobody.
    pub fn beats(self, a: f64, b: f64) -> bool {
        match self {
            Self::HigherWins => a > b,
            Self::LowerWins => a < b,
        }
    }
}

/// Duel configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelGame {
    /// Text field naming each contender.
    pub label_field: String,
    /// Numeric field compared between contenders.
    pub value_field: String,
    /// Comparison rule.
    pub rule: DuelRule,
    /// Points for picking the winner.
    pub points: u32,
    /// Resampling cap when a pair ties.
    pub max_attempts: usize,
}

impl Default for DuelGame {
    fn default() -> Self {
        Self {
            label_field: "name".to_string(),
            value_field: "value".to_string(),
            rule: DuelRule::default(),
            points: 20,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// One side of a duel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contender {
    /// Source row.
    pub row: usize,
    /// Display label.
    pub label: String,
    /// Compared value.
    pub value: f64,
}

/// Which contender won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The first contender.
    Left,
    /// The second contender.
    Right,
}

/// One duel pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelRound {
    /// First contender.
    pub left: Contender,
    /// Second contender.
    pub right: Contender,
    /// Rule in effect.
    pub rule: DuelRule,
    /// The winning side.
    pub winner: Side,
}

impl DuelRound {
    /// The winning contender.
    pub fn winning(&self) -> &Contender {
        match self.winner {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

impl DuelGame {
    fn contender(&self, data: &Dataset, row: usize) -> GameResult<Contender> {
        let r = data.row(row)?;
        let at = |e: DataError| GameError::row(row, e);
        Ok(Contender {
            row,
            label: r.text(&self.label_field).map_err(at)?.to_string(),
            value: r.number(&self.value_field).map_err(at)?,
        })
    }
}

impl Minigame for DuelGame {
    type Round = DuelRound;

    const NAME: &'static str = "duel";
    const ICON: &'static str = "⚔️";
    const ROW_BASED: bool = false;

    fn validate(&self, data: &Dataset) -> Result<(), ConfigIssue> {
        if data.len() < 2 {
            return Err(format!("a duel needs at least 2 rows, found {}", data.len()).into());
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
    ) -> GameResult<DuelRound> {
        let pair = sampler.with_retries(
            self.max_attempts,
            "a pair with distinct labels and a definite winner",
            |s| {
                let picked = s.sample_indices(data.len(), 2)?;
                let left = self.contender(data, picked[0]).ok()?;
                let right = self.contender(data, picked[1]).ok()?;
                if left.label == right.label {
                    return None;
                }
                let winner = if self.rule.beats(left.value, right.value) {
                    Side::Left
                } else if self.rule.beats(right.value, left.value) {
                    Side::Right
                } else {
                    return None;
                };
                Some((left, right, winner))
            },
        )?;

        let (left, right, winner) = pair;
        Ok(DuelRound {
            left,
            right,
            rule: self.rule,
            winner,
        })
    }

    fn score(&self, answer: &Answer, round: &DuelRound) -> GameResult<Score> {
        match answer {
            Answer::Choice(choice) => Ok(Score::all_or_nothing(
                *choice == round.winning().label,
                self.points,
            )),
            other => Err(mismatch(Self::NAME, other)),
        }
    }

    fn max_points(&self) -> u32 {
        self.points
    }

    fn instructions(&self, tr: &dyn Translator) -> String {
        match self.rule {
            DuelRule::HigherWins => tr.translate(
                Self::NAME,
                "instructions_higher",
                "Two contenders enter. Pick the one with the higher value.",
            ),
            DuelRule::LowerWins => tr.translate(
                Self::NAME,
                "instructions_lower",
                "Two contenders enter. Pick the one with the lower value.",
            ),
        }
    }

    fn reveal(&self, round: &DuelRound, tr: &dyn Translator) -> String {
        fill(
            &tr.translate(
                Self::NAME,
                "reveal",
                "{winner} ({winner_value}) beats {loser} ({loser_value}).",
            ),
            &[
                ("winner", round.winning().label.clone()),
                ("winner_value", round.winning().value.to_string()),
                ("loser", loser(round).label.clone()),
                ("loser_value", loser(round).value.to_string()),
            ],
        )
    }
}

fn loser(round: &DuelRound) -> &Contender {
    match round.winner {
        Side::Left => &round.right,
        Side::Right => &round.left,
    }
}
