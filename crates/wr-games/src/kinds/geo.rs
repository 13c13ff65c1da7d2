//! GeoGuesser: name the category (region) a row belongs to.

use serde::{Deserialize, Serialize};
use wr_data::{DataError, Dataset};

use super::{ConfigIssue, Minigame, RoundSlot, Score, check_rows, mismatch};
use crate::answer::Answer;
use crate::error::{GameError, GameResult};
use crate::sampler::RandomRoundSampler;
use crate::translate::{Translator, fill};

/// GeoGuesser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoGame {
    /// Text field naming the row.
    pub label_field: String,
    /// Text field with the category to guess.
    pub category_field: String,
    /// Points for the right category.
    pub points: u32,
    /// Options per round, the correct one included.
    pub choices: usize,
}

impl Default for GeoGame {
    fn default() -> Self {
        Self {
            label_field: "name".to_string(),
            category_field: "region".to_string(),
            points: 20,
            choices: 4,
        }
    }
}

/// One row to place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRound {
    /// Source row.
    pub row: usize,
    /// Row label.
    pub label: String,
    /// Shuffled categories, the correct one included.
    pub options: Vec<String>,
    /// The row's category.
    pub correct: String,
}

impl Minigame for GeoGame {
    type Round = GeoRound;

    const NAME: &'static str = "geo";
    const ICON: &'static str = "🌍";
    const ROW_BASED: bool = true;

    fn validate(&self, data: &Dataset) -> Result<(), ConfigIssue> {
        if self.choices < 2 {
            return Err(format!("geo needs at least 2 choices, configured {}", self.choices).into());
        }
        check_rows(data, |row| {
            row.text(&self.label_field)?;
            row.text(&self.category_field)?;
            Ok(())
        })?;
        let distinct = data.categories(&self.category_field).len();
        if distinct < self.choices {
            return Err(format!(
                "{} choices need as many distinct categories in \"{}\", found {distinct}",
                self.choices, self.category_field
            )
            .into());
        }
        Ok(())
    }

    fn prepare_round(
        &self,
        data: &Dataset,
        slot: RoundSlot,
        sampler: &mut RandomRoundSampler,
    ) -> GameResult<GeoRound> {
        let index = slot.require_row()?;
        let row = data.row(index)?;
        let at = |e: DataError| GameError::row(index, e);

        let label = row.text(&self.label_field).map_err(at)?.to_string();
        let correct = row.text(&self.category_field).map_err(at)?.to_string();

        let others: Vec<String> = data
            .categories(&self.category_field)
            .into_iter()
            .filter(|c| *c != correct)
            .collect();
        let wrong = self.choices - 1;
        let Some(mut options) = sampler.sample(&others, wrong) else {
            return Err(GameError::RoundGeneration {
                round: slot.index,
                reason: format!(
                    "needed {wrong} other categories besides \"{correct}\", found {}",
                    others.len()
                ),
            });
        };
        options.push(correct.clone());
        sampler.shuffle(&mut options);

        Ok(GeoRound {
            row: index,
            label,
            options,
            correct,
        })
    }

    fn score(&self, answer: &Answer, round: &GeoRound) -> GameResult<Score> {
        match answer {
            Answer::Choice(choice) => Ok(Score::all_or_nothing(
                *choice == round.correct,
                self.points,
            )),
            other => Err(mismatch(Self::NAME, other)),
        }
    }

    fn max_points(&self) -> u32 {
        self.points
    }

    fn instructions(&self, tr: &dyn Translator) -> String {
        tr.translate(Self::NAME, "instructions", "Where does it belong? Pick the region.")
    }

    fn reveal(&self, round: &GeoRound, tr: &dyn Translator) -> String {
        fill(
            &tr.translate(Self::NAME, "reveal", "{label} belongs to {category}."),
            &[
                ("label", round.label.clone()),
                ("category", round.correct.clone()),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::translate::Untranslated;
    use wr_data::Row;

    fn countries() -> Dataset {
        let rows = [
            ("France", "Europe"),
            ("Kenya", "Africa"),
            ("Peru", "South America"),
            ("Japan", "Asia"),
            ("Canada", "North America"),
            ("Italy", "Europe"),
        ];
        Dataset::from_rows(
            "countries",
            rows.iter()
                .map(|(n, r)| Row::new().with("name", *n).with("region", *r))
                .collect(),
        )
    }

    fn slot(row: usize) -> RoundSlot {
        RoundSlot {
            index: 0,
            row: Some(row),
        }
    }

    #[test]
    fn options_are_distinct_and_contain_answer() {
        let game = GeoGame::default();
        for seed in 0..30 {
            let mut s = RandomRoundSampler::from_seed(seed);
            let round = game.prepare_round(&countries(), slot(1), &mut s).unwrap();
            assert_eq!(round.correct, "Africa");
            assert_eq!(round.options.len(), 4);
            let unique: HashSet<&String> = round.options.iter().collect();
            assert_eq!(unique.len(), 4);
            assert!(round.options.contains(&round.correct));
        }
    }

    #[test]
    fn validate_needs_enough_categories() {
        let game = GeoGame {
            choices: 6,
            ..GeoGame::default()
        };
        let err = game.validate(&countries()).unwrap_err();
        assert!(err.0.contains("found 5"), "{err}");
        assert!(GeoGame::default().validate(&countries()).is_ok());
    }

    #[test]
    fn scoring_and_reveal() {
        let game = GeoGame::default();
        let mut s = RandomRoundSampler::from_seed(5);
        let round = game.prepare_round(&countries(), slot(3), &mut s).unwrap();
        assert_eq!(
            game.score(&Answer::Choice("Asia".into()), &round).unwrap(),
            Score { points: 20, correct: true }
        );
        assert_eq!(
            game.score(&Answer::Choice("Europe".into()), &round).unwrap().points,
            0
        );
        assert_eq!(game.reveal(&round, &Untranslated), "Japan belongs to Asia.");
    }
}
