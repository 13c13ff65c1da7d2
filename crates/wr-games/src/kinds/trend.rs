//! Oracle: predict where a time series goes after its last visible point.

use std::fmt;

use serde::{Deserialize, Serialize};
use wr_data::{DataError, Dataset};

use super::{ConfigIssue, Minigame, RoundSlot, Score, check_rows, mismatch};
use crate::answer::Answer;
use crate::error::{GameError, GameResult};
use crate::sampler::RandomRoundSampler;
use crate::translate::{Translator, fill};

/// Direction of a step in a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Rose by more than the threshold.
    Up,
    /// Fell by more than the threshold.
    Down,
    /// Changed by at most the threshold.
    Stable,
}

impl Trend {
    /// All classes, in display order.
    pub const ALL: [Trend; 3] = [Trend::Up, Trend::Down, Trend::Stable];

    /// Parse a user-typed trend: full word or its first letter.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Some(Self::Up),
            "down" | "d" => Some(Self::Down),
            "stable" | "s" => Some(Self::Stable),
            _ => None,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        };
        f.write_str(s)
    }
}

/// Classify the step `prev -> next` by its percentage change.
///
/// Change is relative to `|prev|`; a zero `prev` classifies by the sign of
/// `next`. Exactly `±threshold_pct` is stable.
pub fn classify(prev: f64, next: f64, threshold_pct: f64) -> Trend {
    if prev == 0.0 {
        return if next > 0.0 {
            Trend::Up
        } else if next < 0.0 {
            Trend::Down
        } else {
            Trend::Stable
        };
    }
    let change = (next - prev) / prev.abs() * 100.0;
    if change > threshold_pct {
        Trend::Up
    } else if change < -threshold_pct {
        Trend::Down
    } else {
        Trend::Stable
    }
}

/// Oracle configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendGame {
    /// Text field naming the series.
    pub label_field: String,
    /// Series field.
    pub series_field: String,
    /// Points for the right class.
    pub points: u32,
    /// Percentage change separating up/down from stable.
    pub threshold_pct: f64,
}

impl Default for TrendGame {
    fn default() -> Self {
        Self {
            label_field: "name".to_string(),
            series_field: "series".to_string(),
            points: 25,
            threshold_pct: 2.0,
        }
    }
}

/// A series with its final point withheld.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRound {
    /// Source row.
    pub row: usize,
    /// Series label.
    pub label: String,
    /// Every point but the last.
    pub visible: Vec<f64>,
    /// The withheld last point.
    pub withheld: f64,
    /// Threshold in effect.
    pub threshold_pct: f64,
}

impl TrendRound {
    fn last_visible(&self) -> f64 {
        self.visible.last().copied().unwrap_or_default()
    }

    /// Class of the final step over the full series.
    pub fn actual_trend(&self) -> Trend {
        classify(self.last_visible(), self.withheld, self.threshold_pct)
    }
}

impl Minigame for TrendGame {
    type Round = TrendRound;

    const NAME: &'static str = "trend";
    const ICON: &'static str = "🔮";
    const ROW_BASED: bool = true;

    fn validate(&self, data: &Dataset) -> Result<(), ConfigIssue> {
        check_rows(data, |row| {
            row.text(&self.label_field)?;
            let series = row.series(&self.series_field)?;
            if series.len() < 3 {
                return Err(format!("series needs at least 3 points, found {}", series.len()).into());
            }
            Ok(())
        })
    }

    fn prepare_round(
        &self,
        data: &Dataset,
        slot: RoundSlot,
        _sampler: &mut RandomRoundSampler,
    ) -> GameResult<TrendRound> {
        let index = slot.require_row()?;
        let row = data.row(index)?;
        let at = |e: DataError| GameError::row(index, e);

        let label = row.text(&self.label_field).map_err(at)?.to_string();
        let series = row.series(&self.series_field).map_err(at)?;
        let Some((&withheld, visible)) = series.split_last() else {
            return Err(GameError::RoundGeneration {
                round: slot.index,
                reason: format!("row {index} has an empty series"),
            });
        };

        Ok(TrendRound {
            row: index,
            label,
            visible: visible.to_vec(),
            withheld,
            threshold_pct: self.threshold_pct,
        })
    }

    fn score(&self, answer: &Answer, round: &TrendRound) -> GameResult<Score> {
        match answer {
            Answer::Trend(t) => Ok(Score::all_or_nothing(
                *t == round.actual_trend(),
                self.points,
            )),
            other => Err(mismatch(Self::NAME, other)),
        }
    }

    fn max_points(&self) -> u32 {
        self.points
    }

    fn instructions(&self, tr: &dyn Translator) -> String {
        fill(
            &tr.translate(
                Self::NAME,
                "instructions",
                "Will the next value go up, down or stay stable (within {threshold}%)?",
            ),
            &[("threshold", self.threshold_pct.to_string())],
        )
    }

    fn reveal(&self, round: &TrendRound, tr: &dyn Translator) -> String {
        fill(
            &tr.translate(
                Self::NAME,
                "reveal",
                "{label} went from {prev} to {next}: {trend}.",
            ),
            &[
                ("label", round.label.clone()),
                ("prev", round.last_visible().to_string()),
                ("next", round.withheld.to_string()),
                ("trend", round.actual_trend().to_string()),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::Untranslated;
    use wr_data::Row;

    fn series_data() -> Dataset {
        Dataset::from_rows(
            "economy",
            vec![
                Row::new()
                    .with("name", "Exports")
                    .with("series", vec![50.0, 55.0, 65.0, 60.0, 70.0, 100.0]),
                Row::new()
                    .with("name", "Flat")
                    .with("series", vec![10.0, 10.0, 10.1]),
            ],
        )
    }

    fn slot(row: usize) -> RoundSlot {
        RoundSlot {
            index: 0,
            row: Some(row),
        }
    }

    #[test]
    fn classification_thresholds() {
        assert_eq!(classify(100.0, 103.0, 2.0), Trend::Up);
        assert_eq!(classify(100.0, 97.0, 2.0), Trend::Down);
        assert_eq!(classify(100.0, 102.0, 2.0), Trend::Stable);
        assert_eq!(classify(100.0, 98.0, 2.0), Trend::Stable);
        assert_eq!(classify(-100.0, -90.0, 2.0), Trend::Up);
        assert_eq!(classify(0.0, 1.0, 2.0), Trend::Up);
        assert_eq!(classify(0.0, 0.0, 2.0), Trend::Stable);
    }

    #[test]
    fn documented_oracle_example() {
        let game = TrendGame::default();
        let mut s = RandomRoundSampler::from_seed(0);
        let round = game.prepare_round(&series_data(), slot(0), &mut s).unwrap();

        assert_eq!(round.visible, vec![50.0, 55.0, 65.0, 60.0, 70.0]);
        assert_eq!(round.withheld, 100.0);
        // The last visible step rises too.
        assert_eq!(classify(60.0, 70.0, round.threshold_pct), Trend::Up);
        assert_eq!(round.actual_trend(), Trend::Up);

        let up = game.score(&Answer::Trend(Trend::Up), &round).unwrap();
        assert_eq!(up, Score { points: 25, correct: true });
        for other in [Trend::Down, Trend::Stable] {
            let s = game.score(&Answer::Trend(other), &round).unwrap();
            assert_eq!(s, Score { points: 0, correct: false });
        }
    }

    #[test]
    fn small_step_is_stable() {
        let game = TrendGame::default();
        let mut s = RandomRoundSampler::from_seed(0);
        let round = game.prepare_round(&series_data(), slot(1), &mut s).unwrap();
        assert_eq!(round.actual_trend(), Trend::Stable);
    }

    #[test]
    fn validate_requires_three_points() {
        let ds = Dataset::from_rows(
            "short",
            vec![Row::new().with("name", "x").with("series", vec![1.0, 2.0])],
        );
        assert!(TrendGame::default().validate(&ds).is_err());
        assert!(TrendGame::default().validate(&series_data()).is_ok());
    }

    #[test]
    fn parse_accepts_words_and_letters() {
        assert_eq!(Trend::parse("UP"), Some(Trend::Up));
        assert_eq!(Trend::parse(" d "), Some(Trend::Down));
        assert_eq!(Trend::parse("stable"), Some(Trend::Stable));
        assert_eq!(Trend::parse("sideways"), None);
    }

    #[test]
    fn reveal_shows_final_step() {
        let game = TrendGame::default();
        let mut s = RandomRoundSampler::from_seed(0);
        let round = game.prepare_round(&series_data(), slot(0), &mut s).unwrap();
        assert_eq!(
            game.reveal(&round, &Untranslated),
            "Exports went from 70 to 100: up."
        );
    }
}
