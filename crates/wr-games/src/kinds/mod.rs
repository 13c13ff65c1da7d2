//! The closed set of game kinds.
//!
//! Each kind implements [`Minigame`] with its own round payload type.
//! [`GameKind`] and [`RoundPayload`] are the tagged sums the session stores
//! and dispatches on.

pub mod duel;
pub mod estimator;
pub mod geo;
pub mod impostor;
pub mod quiz;
pub mod ranking;
pub mod trend;

use std::fmt;

use serde::{Deserialize, Serialize};
use wr_data::{DataError, Dataset, Row};

use crate::answer::Answer;
use crate::error::{GameError, GameResult};
use crate::sampler::RandomRoundSampler;
use crate::translate::Translator;

pub use duel::{DuelGame, DuelRound};
pub use estimator::{EstimatorGame, EstimatorRound};
pub use geo::{GeoGame, GeoRound};
pub use impostor::{ImpostorGame, ImpostorRound};
pub use quiz::{QuizGame, QuizRound};
pub use ranking::{RankingGame, RankingRound};
pub use trend::{Trend, TrendGame, TrendRound};

/// Points awarded for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Points earned.
    pub points: u32,
    /// Whether the round counts as answered correctly.
    pub correct: bool,
}

impl Score {
    /// Full points if correct, nothing otherwise.
    pub fn all_or_nothing(correct: bool, points: u32) -> Self {
        Self {
            points: if correct { points } else { 0 },
            correct,
        }
    }
}

/// Where a round sits in the game: its index and, for row-based kinds, the
/// dataset row assigned to it by the session's permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSlot {
    /// 0-based round index.
    pub index: usize,
    /// Assigned dataset row (row-based kinds only).
    pub row: Option<usize>,
}

impl RoundSlot {
    /// The assigned row, or a generation error for kinds that need one.
    pub fn require_row(&self) -> GameResult<usize> {
        self.row.ok_or_else(|| GameError::RoundGeneration {
            round: self.index,
            reason: "no dataset row assigned to this round".to_string(),
        })
    }
}

/// Why a dataset cannot back a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue(pub String);

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DataError> for ConfigIssue {
    fn from(e: DataError) -> Self {
        Self(e.to_string())
    }
}

impl From<String> for ConfigIssue {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The operation set every game kind provides.
pub trait Minigame {
    /// Data describing one round.
    type Round;

    /// Kind name; also the translation scope.
    const NAME: &'static str;
    /// Icon shown in history listings.
    const ICON: &'static str;
    /// Whether rounds map 1:1 to dataset rows through a fixed permutation.
    const ROW_BASED: bool;

    /// Construction-time check that the dataset can back this game.
    fn validate(&self, data: &Dataset) -> Result<(), ConfigIssue>;

    /// Generate the data for one round. Pure in `(data, slot, sampler)`.
    fn prepare_round(
        &self,
        data: &Dataset,
        slot: RoundSlot,
        sampler: &mut RandomRoundSampler,
    ) -> GameResult<Self::Round>;

    /// Score an answer against a round.
    fn score(&self, answer: &Answer, round: &Self::Round) -> GameResult<Score>;

    /// Highest score a single round can award.
    fn max_points(&self) -> u32;

    /// How to play, shown before each round.
    fn instructions(&self, tr: &dyn Translator) -> String;

    /// The solution of a round, shown in feedback.
    fn reveal(&self, round: &Self::Round, tr: &dyn Translator) -> String;
}

/// Check every row, reporting the first failure with its row index.
pub(crate) fn check_rows(
    data: &Dataset,
    mut check: impl FnMut(&Row) -> Result<(), ConfigIssue>,
) -> Result<(), ConfigIssue> {
    for (i, row) in data.iter() {
        check(row).map_err(|e| ConfigIssue(format!("row {i}: {e}")))?;
    }
    Ok(())
}

/// Error for an answer whose shape does not fit the kind.
pub(crate) fn mismatch(expected: &'static str, answer: &Answer) -> GameError {
    GameError::AnswerMismatch {
        expected,
        found: answer.shape(),
    }
}

/// A configured game kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameKind {
    /// Multiple-choice questions.
    Quiz(QuizGame),
    /// Pick the winner of two rows.
    Duel(DuelGame),
    /// Order several rows by value.
    Ranking(RankingGame),
    /// Predict where a time series goes next.
    Trend(TrendGame),
    /// Guess a numeric value.
    Estimator(EstimatorGame),
    /// Name the category of a row.
    Geo(GeoGame),
    /// Spot the row that does not belong.
    Impostor(ImpostorGame),
}

/// Data for one round, tagged by game kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundPayload {
    /// A quiz question.
    Quiz(QuizRound),
    /// A duel pairing.
    Duel(DuelRound),
    /// Items to rank.
    Ranking(RankingRound),
    /// A truncated series.
    Trend(TrendRound),
    /// A value to estimate.
    Estimator(EstimatorRound),
    /// A row to place.
    Geo(GeoRound),
    /// Four items, one impostor.
    Impostor(ImpostorRound),
}

macro_rules! each_kind {
    ($kind:expr, $game:ident => $body:expr) => {
        match $kind {
            GameKind::Quiz($game) => $body,
            GameKind::Duel($game) => $body,
            GameKind::Ranking($game) => $body,
            GameKind::Trend($game) => $body,
            GameKind::Estimator($game) => $body,
            GameKind::Geo($game) => $body,
            GameKind::Impostor($game) => $body,
        }
    };
}

macro_rules! each_pair {
    ($kind:expr, $payload:expr, ($game:ident, $round:ident) => $body:expr) => {
        match ($kind, $payload) {
            (GameKind::Quiz($game), RoundPayload::Quiz($round)) => $body,
            (GameKind::Duel($game), RoundPayload::Duel($round)) => $body,
            (GameKind::Ranking($game), RoundPayload::Ranking($round)) => $body,
            (GameKind::Trend($game), RoundPayload::Trend($round)) => $body,
            (GameKind::Estimator($game), RoundPayload::Estimator($round)) => $body,
            (GameKind::Geo($game), RoundPayload::Geo($round)) => $body,
            (GameKind::Impostor($game), RoundPayload::Impostor($round)) => $body,
            (kind, payload) => Err(GameError::PayloadMismatch {
                expected: kind.name(),
                found: payload.kind_name(),
            }),
        }
    };
}

fn name_of<G: Minigame>(_: &G) -> &'static str {
    G::NAME
}

fn icon_of<G: Minigame>(_: &G) -> &'static str {
    G::ICON
}

fn row_based<G: Minigame>(_: &G) -> bool {
    G::ROW_BASED
}

impl GameKind {
    /// Kind name; also the translation scope.
    pub fn name(&self) -> &'static str {
        each_kind!(self, g => name_of(g))
    }

    /// Default icon for history listings.
    pub fn icon(&self) -> &'static str {
        each_kind!(self, g => icon_of(g))
    }

    /// Whether rounds consume dataset rows through a fixed permutation.
    pub fn is_row_based(&self) -> bool {
        each_kind!(self, g => row_based(g))
    }

    /// Check that the dataset can back this game.
    pub fn validate(&self, data: &Dataset) -> Result<(), ConfigIssue> {
        each_kind!(self, g => g.validate(data))
    }

    /// Generate the payload for one round.
    pub fn prepare_round(
        &self,
        data: &Dataset,
        slot: RoundSlot,
        sampler: &mut RandomRoundSampler,
    ) -> GameResult<RoundPayload> {
        match self {
            Self::Quiz(g) => g.prepare_round(data, slot, sampler).map(RoundPayload::Quiz),
            Self::Duel(g) => g.prepare_round(data, slot, sampler).map(RoundPayload::Duel),
            Self::Ranking(g) => g
                .prepare_round(data, slot, sampler)
                .map(RoundPayload::Ranking),
            Self::Trend(g) => g.prepare_round(data, slot, sampler).map(RoundPayload::Trend),
            Self::Estimator(g) => g
                .prepare_round(data, slot, sampler)
                .map(RoundPayload::Estimator),
            Self::Geo(g) => g.prepare_round(data, slot, sampler).map(RoundPayload::Geo),
            Self::Impostor(g) => g
                .prepare_round(data, slot, sampler)
                .map(RoundPayload::Impostor),
        }
    }

    /// Score an answer against a payload of the same kind.
    pub fn score(&self, answer: &Answer, payload: &RoundPayload) -> GameResult<Score> {
        each_pair!(self, payload, (g, r) => g.score(answer, r))
    }

    /// Highest score a single round can award.
    pub fn max_points(&self) -> u32 {
        each_kind!(self, g => g.max_points())
    }

    /// Translated instructions.
    pub fn instructions(&self, tr: &dyn Translator) -> String {
        each_kind!(self, g => g.instructions(tr))
    }

    /// Translated solution text for a payload.
    pub fn reveal(&self, payload: &RoundPayload, tr: &dyn Translator) -> GameResult<String> {
        each_pair!(self, payload, (g, r) => Ok(g.reveal(r, tr)))
    }
}

impl RoundPayload {
    /// Kind name of the payload.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Quiz(_) => QuizGame::NAME,
            Self::Duel(_) => DuelGame::NAME,
            Self::Ranking(_) => RankingGame::NAME,
            Self::Trend(_) => TrendGame::NAME,
            Self::Estimator(_) => EstimatorGame::NAME,
            Self::Geo(_) => GeoGame::NAME,
            Self::Impostor(_) => ImpostorGame::NAME,
        }
    }

    /// Selectable options for choice-style rounds, in display order. Empty
    /// for rankings, trends and estimates.
    pub fn choices(&self) -> Vec<String> {
        match self {
            Self::Quiz(r) => r.options.clone(),
            Self::Duel(r) => vec![r.left.label.clone(), r.right.label.clone()],
            Self::Geo(r) => r.options.clone(),
            Self::Impostor(r) => r.items.clone(),
            Self::Ranking(_) | Self::Trend(_) | Self::Estimator(_) => Vec::new(),
        }
    }

    /// Dataset row a row-based round was drawn from.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::Quiz(r) => Some(r.row),
            Self::Trend(r) => Some(r.row),
            Self::Estimator(r) => Some(r.row),
            Self::Geo(r) => Some(r.row),
            Self::Duel(_) | Self::Ranking(_) | Self::Impostor(_) => None,
        }
    }
}
