//! The rendering contract between the engine and its host.
//!
//! The engine decides *what* is shown and in which order; the host decides
//! how. A render pass may materialize the active round but never scores or
//! advances it.

use serde::{Deserialize, Serialize};

use crate::answer::Answer;
use crate::kinds::RoundPayload;
use crate::translate::{COMMON_SCOPE, Translator, fill};

/// Instructions shown above the active round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instructions {
    /// Game title.
    pub title: String,
    /// Translated instructions of the kind.
    pub text: String,
    /// 1-based number of the active round.
    pub round_number: usize,
    /// Total rounds in the game.
    pub num_rounds: usize,
    /// Score so far.
    pub total_score: u32,
}

/// Feedback for a completed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundFeedback {
    /// 1-based round number.
    pub round_number: usize,
    /// Points earned.
    pub points: u32,
    /// Highest possible points for the round.
    pub max_points: u32,
    /// Whether the round was answered correctly.
    pub correct: bool,
    /// Translated verdict.
    pub message: String,
    /// Translated solution text.
    pub reveal: String,
}

/// How a finished game is framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Score reached the victory threshold.
    Victory,
    /// Score stayed below the victory threshold.
    Defeat,
    /// No threshold configured.
    Completed,
}

impl Outcome {
    /// Frame a final score against an optional threshold.
    pub fn for_score(total: u32, min_score_for_victory: Option<u32>) -> Self {
        match min_score_for_victory {
            Some(min) if total >= min => Self::Victory,
            Some(_) => Self::Defeat,
            None => Self::Completed,
        }
    }

    /// Translated closing message.
    pub fn message(self, total: u32, max: u32, tr: &dyn Translator) -> String {
        let (key, default) = match self {
            Self::Victory => ("victory", "Victory! You scored {score} of {max} points."),
            Self::Defeat => ("defeat", "Game over. You scored {score} of {max} points."),
            Self::Completed => ("completed", "Finished with {score} of {max} points."),
        };
        fill(
            &tr.translate(COMMON_SCOPE, key, default),
            &[("score", total.to_string()), ("max", max.to_string())],
        )
    }
}

/// Host-side presentation of a game.
pub trait GameHost {
    /// Show the instructions of the active round.
    fn display_instructions(&mut self, instructions: &Instructions);

    /// Show the round and return the answer currently selected, if any.
    fn display_game_body(&mut self, payload: &RoundPayload) -> Option<Answer>;

    /// Show the result of a completed round.
    fn display_round_feedback(&mut self, feedback: &RoundFeedback);

    /// Show the final outcome of a finished game.
    fn display_outcome(&mut self, outcome: Outcome, message: &str);

    /// Content shown after a finished game, or instead of the game while
    /// game mode is disabled. Called at most once per render pass.
    fn on_post_game_content(&mut self) {}
}

/// Host that records every call, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub answer: Option<Answer>,
    pub instructions: Vec<Instructions>,
    pub bodies: Vec<RoundPayload>,
    pub feedback: Vec<RoundFeedback>,
    pub outcomes: Vec<(Outcome, String)>,
    pub post_game: usize,
}

#[cfg(test)]
impl RecordingHost {
    pub fn answering(answer: Answer) -> Self {
        Self {
            answer: Some(answer),
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl GameHost for RecordingHost {
    fn display_instructions(&mut self, instructions: &Instructions) {
        self.instructions.push(instructions.clone());
    }

    fn display_game_body(&mut self, payload: &RoundPayload) -> Option<Answer> {
        self.bodies.push(payload.clone());
        self.answer.clone()
    }

    fn display_round_feedback(&mut self, feedback: &RoundFeedback) {
        self.feedback.push(feedback.clone());
    }

    fn display_outcome(&mut self, outcome: Outcome, message: &str) {
        self.outcomes.push((outcome, message.to_string()));
    }

    fn on_post_game_content(&mut self) {
        self.post_game += 1;
    }
}
