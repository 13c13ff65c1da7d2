//! Multiple-choice quiz: one dataset row per round.

use serde::{Deserialize, Serialize};
use wr_data::{DataError, Dataset};

use super::{ConfigIssue, Minigame, RoundSlot, Score, check_rows, mismatch};
use crate::answer::Answer;
use crate::error::{GameError, GameResult};
use crate::sampler::RandomRoundSampler;
use crate::translate::{Translator, fill};

/// Quiz configuration: which fields hold the question, options and answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizGame {
    /// Text field with the question.
    pub question_field: String,
    /// List field with the options.
    pub options_field: String,
    /// Text field with the correct option.
    pub answer_field: String,
    /// Points for a correct answer.
    pub points: u32,
    /// Shuffle the options of each question.
    pub shuffle_options: bool,
}

impl Default for QuizGame {
    fn default() -> Self {
        Self {
            question_field: "question".to_string(),
            options_field: "options".to_string(),
            answer_field: "answer".to_string(),
            points: 20,
            shuffle_options: true,
        }
    }
}

/// One quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizRound {
    /// Source row.
    pub row: usize,
    /// The question text.
    pub question: String,
    /// Options in display order.
    pub options: Vec<String>,
    /// The correct option.
    pub correct: String,
}

impl Minigame for QuizGame {
    type Round = QuizRound;

    const NAME: &'static str = "quiz";
    const ICON: &'static str = "❓";
    const ROW_BASED: bool = true;

    fn validate(&self, data: &Dataset) -> Result<(), ConfigIssue> {
        check_rows(data, |row| {
            row.text(&self.question_field)?;
            let options = row.list(&self.options_field)?;
            let answer = row.text(&self.answer_field)?;
            if options.iter().any(|o| o == answer) {
                Ok(())
            } else {
                Err(format!("answer \"{answer}\" is not among the options").into())
            }
        })
    }

    fn prepare_round(
        &self,
        data: &Dataset,
        slot: RoundSlot,
        sampler: &mut RandomRoundSampler,
    ) -> GameResult<QuizRound> {
        let index = slot.require_row()?;
        let row = data.row(index)?;
        let at = |e: DataError| GameError::row(index, e);

        let question = row.text(&self.question_field).map_err(at)?.to_string();
        let correct = row.text(&self.answer_field).map_err(at)?.to_string();
        let mut options = row.list(&self.options_field).map_err(at)?.to_vec();
        if self.shuffle_options {
            sampler.shuffle(&mut options);
        }

        Ok(QuizRound {
            row: index,
            question,
            options,
            correct,
        })
    }

    fn score(&self, answer: &Answer, round: &QuizRound) -> GameResult<Score> {
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
        tr.translate(
            Self::NAME,
            "instructions",
            "Pick the correct answer to each question.",
        )
    }

    fn reveal(&self, round: &QuizRound, tr: &dyn Translator) -> String {
        fill(
            &tr.translate(Self::NAME, "reveal", "The answer was {answer}."),
            &[("answer", round.correct.clone())],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::Untranslated;
    use wr_data::Row;

    fn questions() -> Dataset {
        Dataset::from_rows(
            "questions",
            vec![
                Row::new()
                    .with("question", "Capital of France?")
                    .with("options", vec!["Lyon", "Paris", "Nice"])
                    .with("answer", "Paris"),
                Row::new()
                    .with("question", "Largest ocean?")
                    .with("options", vec!["Atlantic", "Pacific"])
                    .with("answer", "Pacific"),
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
    fn validate_accepts_consistent_rows() {
        assert!(QuizGame::default().validate(&questions()).is_ok());
    }

    #[test]
    fn validate_rejects_answer_outside_options() {
        let mut ds = questions();
        ds.push(
            Row::new()
                .with("question", "2+2?")
                .with("options", vec!["3", "5"])
                .with("answer", "4"),
        );
        let err = QuizGame::default().validate(&ds).unwrap_err();
        assert!(err.0.starts_with("row 2:"), "{err}");
    }

    #[test]
    fn validate_reports_missing_field() {
        let ds = Dataset::from_rows("q", vec![Row::new().with("question", "?")]);
        let err = QuizGame::default().validate(&ds).unwrap_err();
        assert!(err.0.contains("missing field \"options\""), "{err}");
    }

    #[test]
    fn prepare_uses_assigned_row() {
        let game = QuizGame::default();
        let mut sampler = RandomRoundSampler::from_seed(1);
        let round = game.prepare_round(&questions(), slot(1), &mut sampler).unwrap();
        assert_eq!(round.row, 1);
        assert_eq!(round.question, "Largest ocean?");
        assert_eq!(round.correct, "Pacific");
        let mut options = round.options.clone();
        options.sort();
        assert_eq!(options, vec!["Atlantic", "Pacific"]);
    }

    #[test]
    fn prepare_without_row_fails() {
        let game = QuizGame::default();
        let mut sampler = RandomRoundSampler::from_seed(1);
        let no_row = RoundSlot { index: 3, row: None };
        assert!(matches!(
            game.prepare_round(&questions(), no_row, &mut sampler),
            Err(GameError::RoundGeneration { round: 3, .. })
        ));
    }

    #[test]
    fn exact_match_scoring() {
        let game = QuizGame::default();
        let mut sampler = RandomRoundSampler::from_seed(1);
        let round = game.prepare_round(&questions(), slot(0), &mut sampler).unwrap();

        let right = game.score(&Answer::Choice("Paris".into()), &round).unwrap();
        assert_eq!(right, Score { points: 20, correct: true });

        let wrong = game.score(&Answer::Choice("paris".into()), &round).unwrap();
        assert_eq!(wrong, Score { points: 0, correct: false });
    }

    #[test]
    fn wrong_answer_shape() {
        let game = QuizGame::default();
        let mut sampler = RandomRoundSampler::from_seed(1);
        let round = game.prepare_round(&questions(), slot(0), &mut sampler).unwrap();
        assert!(matches!(
            game.score(&Answer::Number(1.0), &round),
            Err(GameError::AnswerMismatch { expected: "quiz", found: "number" })
        ));
    }

    #[test]
    fn reveal_names_answer() {
        let game = QuizGame::default();
        let mut sampler = RandomRoundSampler::from_seed(1);
        let round = game.prepare_round(&questions(), slot(0), &mut sampler).unwrap();
        assert_eq!(game.reveal(&round, &Untranslated), "The answer was Paris.");
    }
}
