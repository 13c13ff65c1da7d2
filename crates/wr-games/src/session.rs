//! The per-game state machine.
//!
//! A [`GameSession`] pairs an immutable configuration (its [`GameDef`],
//! clamped round count and shared dataset) with a serializable
//! [`SessionState`]. Hosts running a full-rerun loop rebuild the session on
//! every pass, [`restore`](GameSession::restore) the stored state, render,
//! optionally submit, and store [`state`](GameSession::state) again.
//!
//! Round data is generated lazily, once per round, and cached in the state.
//! [`submit`](GameSession::submit) is the only operation that scores or
//! advances a game.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use wr_data::Dataset;

use crate::answer::Answer;
use crate::config::GameDef;
use crate::error::{GameError, GameResult};
use crate::kinds::{RoundPayload, RoundSlot};
use crate::render::{GameHost, Instructions, Outcome, RoundFeedback};
use crate::sampler::RandomRoundSampler;
use crate::translate::{COMMON_SCOPE, Translator, fill};

/// A completed round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Points earned.
    pub score: u32,
    /// Whether the round was answered correctly.
    pub was_correct: bool,
    /// The submitted answer.
    pub answer: Answer,
    /// The round the answer was scored against.
    pub round: RoundPayload,
}

/// Mutable progress of one game instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    current_round: usize,
    rounds: Vec<RoundPayload>,
    results: Vec<RoundResult>,
    total_score: u32,
    completed_at: Option<DateTime<Utc>>,
    seed: u64,
    row_order: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    failure: Option<String>,
}

impl SessionState {
    fn fresh(seed: u64, row_based: bool, rows: usize) -> Self {
        let row_order = if row_based {
            RandomRoundSampler::from_seed(seed).permutation(rows)
        } else {
            Vec::new()
        };
        Self {
            current_round: 0,
            rounds: Vec::new(),
            results: Vec::new(),
            total_score: 0,
            completed_at: None,
            seed,
            row_order,
            failure: None,
        }
    }

    /// 0-based index of the active round.
    pub fn current_round(&self) -> usize {
        self.current_round
    }

    /// Rounds generated so far.
    pub fn rounds(&self) -> &[RoundPayload] {
        &self.rounds
    }

    /// Completed rounds, in submission order.
    pub fn results(&self) -> &[RoundResult] {
        &self.results
    }

    /// Sum of all round scores.
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    /// When the last round was submitted.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Seed of this game instance.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Round index to dataset row mapping (row-based kinds only).
    pub fn row_order(&self) -> &[usize] {
        &self.row_order
    }

    /// Why round generation failed, if it did.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}

/// Lifecycle position of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No round submitted yet.
    NotStarted,
    /// Playing the given 0-based round.
    InProgress {
        /// Active round.
        round: usize,
    },
    /// All rounds submitted.
    Finished,
}

/// Result of a render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// Nothing left to play: the game is finished, empty, or game mode is off.
    Done,
    /// A round is on screen.
    Active {
        /// 0-based round shown.
        round: usize,
        /// Answer the host reported as selected.
        selection: Option<Answer>,
    },
}

impl RenderOutcome {
    /// Whether the game needs no further interaction.
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Result of a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The round was scored and the game advanced.
    Scored(RoundResult),
    /// No answer selected; nothing changed.
    NeedsAnswer,
    /// The game is already finished; nothing changed.
    AlreadyFinished,
    /// Game mode is off; nothing changed.
    ModeDisabled,
}

/// One registered game.
#[derive(Debug, Clone)]
pub struct GameSession {
    def: GameDef,
    num_rounds: usize,
    data: Arc<Dataset>,
    state: SessionState,
}

impl GameSession {
    /// Build a session, checking that the dataset can back it.
    ///
    /// The round count is clamped to the dataset size. The first game
    /// instance uses `def.seed` if set, a random seed otherwise.
    pub fn new(def: GameDef, data: impl Into<Option<Arc<Dataset>>>) -> GameResult<Self> {
        let data = data
            .into()
            .ok_or_else(|| GameError::MissingDataset(def.id.clone()))?;
        if data.is_empty() && def.rounds > 0 {
            return Err(GameError::EmptyDataset {
                id: def.id.clone(),
                requested: def.rounds,
            });
        }

        let num_rounds = def.rounds.min(data.len());
        if num_rounds > 0 {
            def.kind
                .validate(&data)
                .map_err(|issue| GameError::InvalidConfig {
                    id: def.id.clone(),
                    reason: issue.0,
                })?;
        }
        if num_rounds < def.rounds {
            debug!(
                "{}: {} rounds requested, clamped to {num_rounds}",
                def.id, def.rounds
            );
        }

        let seed = def.seed.unwrap_or_else(rand::random);
        let state = SessionState::fresh(seed, def.kind.is_row_based(), data.len());
        Ok(Self {
            def,
            num_rounds,
            data,
            state,
        })
    }

    /// Game id.
    pub fn id(&self) -> &str {
        &self.def.id
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.def.title
    }

    /// Display icon.
    pub fn icon(&self) -> &str {
        self.def.display_icon()
    }

    /// The definition this session was built from.
    pub fn def(&self) -> &GameDef {
        &self.def
    }

    /// The shared dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    /// Number of rounds after clamping.
    pub fn num_rounds(&self) -> usize {
        self.num_rounds
    }

    /// Victory threshold.
    pub fn min_score_for_victory(&self) -> Option<u32> {
        self.def.min_score_for_victory
    }

    /// Current progress.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// 0-based index of the active round.
    pub fn current_round(&self) -> usize {
        self.state.current_round
    }

    /// Score so far.
    pub fn total_score(&self) -> u32 {
        self.state.total_score
    }

    /// When the game finished.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.state.completed_at
    }

    /// Whether all rounds have been submitted.
    pub fn is_finished(&self) -> bool {
        self.state.completed_at.is_some()
    }

    /// Lifecycle position.
    pub fn status(&self) -> SessionStatus {
        if self.is_finished() {
            SessionStatus::Finished
        } else if self.state.current_round == 0 {
            SessionStatus::NotStarted
        } else {
            SessionStatus::InProgress {
                round: self.state.current_round,
            }
        }
    }

    /// Highest total this game can award.
    pub fn max_score(&self) -> u32 {
        self.def.kind.max_points() * self.num_rounds as u32
    }

    /// `(total, successful)`: successful once finished with at least one
    /// correct round. `(0, false)` while unfinished.
    pub fn result(&self) -> (u32, bool) {
        if !self.is_finished() {
            return (0, false);
        }
        let successful = self.state.results.iter().any(|r| r.was_correct);
        (self.state.total_score, successful)
    }

    /// Victory framing of a finished game.
    pub fn outcome(&self) -> Option<Outcome> {
        self.is_finished().then(|| {
            Outcome::for_score(self.state.total_score, self.def.min_score_for_victory)
        })
    }

    /// The active round, generating it if this is the first time it is
    /// reached. `None` once there is nothing left to play.
    ///
    /// A generation failure is terminal: it is recorded in the state and
    /// every later call fails with [`GameError::SessionFailed`] until reset.
    pub fn current_round_data(&mut self) -> GameResult<Option<&RoundPayload>> {
        if self.is_finished() || self.num_rounds == 0 {
            return Ok(None);
        }
        self.ensure_round()?;
        Ok(self.state.rounds.get(self.state.current_round))
    }

    fn ensure_round(&mut self) -> GameResult<()> {
        if let Some(reason) = &self.state.failure {
            return Err(GameError::SessionFailed {
                id: self.def.id.clone(),
                reason: reason.clone(),
            });
        }

        let index = self.state.current_round;
        if self.state.rounds.len() > index {
            debug!("{}: round {index} served from cache", self.def.id);
            return Ok(());
        }

        let row = if self.def.kind.is_row_based() {
            self.state.row_order.get(index).copied()
        } else {
            None
        };
        let slot = RoundSlot { index, row };
        let mut sampler = RandomRoundSampler::for_round(self.state.seed, index);
        match self.def.kind.prepare_round(&self.data, slot, &mut sampler) {
            Ok(payload) => {
                debug!("{}: prepared round {index}", self.def.id);
                self.state.rounds.push(payload);
                Ok(())
            }
            Err(e) => {
                warn!("{}: round {index} failed: {e}", self.def.id);
                self.state.failure = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Instructions for the active round.
    pub fn instructions(&self, tr: &dyn Translator) -> Instructions {
        Instructions {
            title: self.def.title.clone(),
            text: self.def.kind.instructions(tr),
            round_number: self.state.current_round + 1,
            num_rounds: self.num_rounds,
            total_score: self.state.total_score,
        }
    }

    /// Feedback for a completed round.
    pub fn feedback(&self, index: usize, tr: &dyn Translator) -> GameResult<Option<RoundFeedback>> {
        let Some(result) = self.state.results.get(index) else {
            return Ok(None);
        };
        let max_points = self.def.kind.max_points();
        let (key, default) = if result.was_correct {
            ("correct", "Correct! {points} of {max} points.")
        } else {
            ("incorrect", "Not quite. {points} of {max} points.")
        };
        let message = fill(
            &tr.translate(COMMON_SCOPE, key, default),
            &[
                ("points", result.score.to_string()),
                ("max", max_points.to_string()),
            ],
        );
        Ok(Some(RoundFeedback {
            round_number: index + 1,
            points: result.score,
            max_points,
            correct: result.was_correct,
            message,
            reveal: self.def.kind.reveal(&result.round, tr)?,
        }))
    }

    /// Feedback for the most recently completed round.
    pub fn last_feedback(&self, tr: &dyn Translator) -> GameResult<Option<RoundFeedback>> {
        match self.state.results.len() {
            0 => Ok(None),
            n => self.feedback(n - 1, tr),
        }
    }

    /// One render pass.
    ///
    /// Disabled mode or an empty game: post-game content only. Finished:
    /// last feedback, outcome, post-game content. Otherwise: the previous
    /// round's feedback, instructions and the active round, which is the
    /// cached payload on every pass until it is submitted.
    pub fn render(
        &mut self,
        mode_enabled: bool,
        host: &mut dyn GameHost,
        tr: &dyn Translator,
    ) -> GameResult<RenderOutcome> {
        if !mode_enabled || self.num_rounds == 0 {
            host.on_post_game_content();
            return Ok(RenderOutcome::Done);
        }

        if self.is_finished() {
            if let Some(feedback) = self.last_feedback(tr)? {
                host.display_round_feedback(&feedback);
            }
            let total = self.state.total_score;
            let outcome = Outcome::for_score(total, self.def.min_score_for_victory);
            host.display_outcome(outcome, &outcome.message(total, self.max_score(), tr));
            host.on_post_game_content();
            return Ok(RenderOutcome::Done);
        }

        let round = self.state.current_round;
        self.ensure_round()?;
        if let Some(feedback) = self.last_feedback(tr)? {
            host.display_round_feedback(&feedback);
        }
        host.display_instructions(&self.instructions(tr));
        let payload = self
            .state
            .rounds
            .get(round)
            .ok_or(GameError::RoundNotPrepared(round))?;
        let selection = host.display_game_body(payload);
        Ok(RenderOutcome::Active { round, selection })
    }

    /// Score the active round and advance.
    ///
    /// Without an answer nothing changes and the host should prompt again.
    /// The active round must have been rendered first.
    pub fn submit(&mut self, answer: Option<Answer>) -> GameResult<SubmitOutcome> {
        if self.is_finished() {
            return Ok(SubmitOutcome::AlreadyFinished);
        }
        if let Some(reason) = &self.state.failure {
            return Err(GameError::SessionFailed {
                id: self.def.id.clone(),
                reason: reason.clone(),
            });
        }
        let Some(answer) = answer else {
            warn!("{}: submission without an answer ignored", self.def.id);
            return Ok(SubmitOutcome::NeedsAnswer);
        };

        let index = self.state.current_round;
        let payload = self
            .state
            .rounds
            .get(index)
            .ok_or(GameError::RoundNotPrepared(index))?;
        let score = self.def.kind.score(&answer, payload)?;

        let result = RoundResult {
            score: score.points,
            was_correct: score.correct,
            answer,
            round: payload.clone(),
        };
        self.state.results.push(result.clone());
        self.state.total_score += score.points;
        self.state.current_round += 1;
        debug!(
            "{}: round {index} scored {} (correct: {})",
            self.def.id, score.points, score.correct
        );

        if self.state.current_round == self.num_rounds {
            self.state.completed_at = Some(Utc::now());
            info!(
                "{}: finished with {} of {} points",
                self.def.id,
                self.state.total_score,
                self.max_score()
            );
        }
        Ok(SubmitOutcome::Scored(result))
    }

    /// Start a new game instance with a random seed.
    pub fn reset(&mut self) {
        self.reset_with_seed(rand::random());
    }

    /// Start a new game instance with the given seed. Configuration is kept;
    /// progress, cached rounds and the row permutation are not.
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.state = SessionState::fresh(seed, self.def.kind.is_row_based(), self.data.len());
        info!("{}: reset", self.def.id);
    }

    /// Adopt previously stored state after checking it against this
    /// session's configuration and invariants.
    pub fn restore(&mut self, state: SessionState) -> GameResult<()> {
        self.check(&state).map_err(|reason| GameError::CorruptState {
            id: self.def.id.clone(),
            reason,
        })?;
        self.state = state;
        Ok(())
    }

    fn check(&self, state: &SessionState) -> Result<(), String> {
        let current = state.current_round;
        if current > self.num_rounds {
            return Err(format!(
                "current round {current} exceeds {} rounds",
                self.num_rounds
            ));
        }
        if state.results.len() != current {
            return Err(format!(
                "{} results for current round {current}",
                state.results.len()
            ));
        }
        let cached = state.rounds.len();
        if cached < current || cached > (current + 1).min(self.num_rounds) {
            return Err(format!("{cached} cached rounds at round {current}"));
        }
        let finished = self.num_rounds > 0 && current == self.num_rounds;
        if state.completed_at.is_some() != finished {
            return Err("completion timestamp does not match progress".to_string());
        }
        let sum: u32 = state.results.iter().map(|r| r.score).sum();
        if sum != state.total_score {
            return Err(format!(
                "total score {} but rounds sum to {sum}",
                state.total_score
            ));
        }

        let expected = self.def.kind.name();
        if let Some(payload) = state.rounds.iter().find(|p| p.kind_name() != expected) {
            return Err(format!(
                "{} round stored for a {expected} game",
                payload.kind_name()
            ));
        }

        if self.def.kind.is_row_based() {
            let rows = self.data.len();
            let distinct: HashSet<usize> = state.row_order.iter().copied().collect();
            if state.row_order.len() != rows
                || distinct.len() != rows
                || state.row_order.iter().any(|&r| r >= rows)
            {
                return Err(format!("row order is not a permutation of {rows} rows"));
            }
        } else if !state.row_order.is_empty() {
            return Err("row order stored for a game without row mapping".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{DuelGame, EstimatorGame, GameKind, QuizGame};
    use crate::render::RecordingHost;
    use crate::translate::Untranslated;
    use proptest::prelude::*;
    use wr_data::Row;

    fn questions(n: usize) -> Arc<Dataset> {
        Arc::new(Dataset::from_rows(
            "questions",
            (0..n)
                .map(|i| {
                    Row::new()
                        .with("question", format!("Question {i}?"))
                        .with("options", vec!["yes", "no"])
                        .with("answer", "yes")
                })
                .collect(),
        ))
    }

    fn quiz(rounds: usize) -> GameDef {
        GameDef::new("quiz", "Quiz", GameKind::Quiz(QuizGame::default()))
            .with_rounds(rounds)
            .with_seed(42)
    }

    fn session(rounds: usize, rows: usize) -> GameSession {
        GameSession::new(quiz(rounds), questions(rows)).unwrap()
    }

    fn play_round(s: &mut GameSession, answer: &str) -> SubmitOutcome {
        let mut host = RecordingHost::answering(Answer::Choice(answer.into()));
        let RenderOutcome::Active { selection, .. } =
            s.render(true, &mut host, &Untranslated).unwrap()
        else {
            panic!("expected an active round");
        };
        s.submit(selection).unwrap()
    }

    fn assert_invariants(s: &GameSession) {
        let st = s.state();
        assert!(st.current_round() <= s.num_rounds());
        assert_eq!(st.results().len(), st.current_round());
        assert!(st.rounds().len() >= st.current_round());
        assert_eq!(
            st.completed_at().is_some(),
            s.num_rounds() > 0 && st.current_round() == s.num_rounds()
        );
    }

    #[test]
    fn construction_errors() {
        assert!(matches!(
            GameSession::new(quiz(3), None::<Arc<Dataset>>),
            Err(GameError::MissingDataset(id)) if id == "quiz"
        ));
        assert!(matches!(
            GameSession::new(quiz(3), questions(0)),
            Err(GameError::EmptyDataset { requested: 3, .. })
        ));
        let bad = Arc::new(Dataset::from_rows("bad", vec![Row::new().with("question", "?")]));
        let err = GameSession::new(quiz(1), bad).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn zero_rounds_on_empty_dataset_is_allowed() {
        let mut s = GameSession::new(quiz(0), questions(0)).unwrap();
        let mut host = RecordingHost::default();
        assert!(s.render(true, &mut host, &Untranslated).unwrap().is_done());
        assert_eq!(host.post_game, 1);
        assert_eq!(s.status(), SessionStatus::NotStarted);
    }

    #[test]
    fn rounds_clamp_to_dataset() {
        assert_eq!(session(10, 4).num_rounds(), 4);
        assert_eq!(session(2, 4).num_rounds(), 2);
    }

    #[test]
    fn full_game_lifecycle() {
        let mut s = session(3, 5);
        assert_eq!(s.status(), SessionStatus::NotStarted);
        assert_eq!(s.result(), (0, false));

        assert!(matches!(play_round(&mut s, "yes"), SubmitOutcome::Scored(r) if r.score == 20));
        assert_eq!(s.status(), SessionStatus::InProgress { round: 1 });
        play_round(&mut s, "no");
        assert_eq!(s.result(), (0, false));
        play_round(&mut s, "yes");

        assert_eq!(s.status(), SessionStatus::Finished);
        assert!(s.completed_at().is_some());
        assert_eq!(s.result(), (40, true));
        assert_eq!(s.max_score(), 60);
        assert_eq!(s.outcome(), Some(Outcome::Completed));
        assert_eq!(s.submit(Some(Answer::Choice("yes".into()))).unwrap(), SubmitOutcome::AlreadyFinished);
        assert_invariants(&s);
    }

    #[test]
    fn all_wrong_is_unsuccessful() {
        let mut s = session(2, 2);
        play_round(&mut s, "no");
        play_round(&mut s, "no");
        assert_eq!(s.result(), (0, false));
    }

    #[test]
    fn victory_threshold() {
        let mut s = GameSession::new(quiz(2).with_min_score(40), questions(2)).unwrap();
        play_round(&mut s, "yes");
        play_round(&mut s, "no");
        assert_eq!(s.outcome(), Some(Outcome::Defeat));

        let mut host = RecordingHost::default();
        assert!(s.render(true, &mut host, &Untranslated).unwrap().is_done());
        assert_eq!(host.feedback.len(), 1);
        assert_eq!(host.feedback[0].round_number, 2);
        assert_eq!(
            host.outcomes,
            vec![(Outcome::Defeat, "Game over. You scored 20 of 40 points.".to_string())]
        );
        assert_eq!(host.post_game, 1);
    }

    #[test]
    fn rerender_shows_the_same_round() {
        let mut s = session(3, 5);
        let mut host = RecordingHost::default();
        let first = s.render(true, &mut host, &Untranslated).unwrap();
        let second = s.render(true, &mut host, &Untranslated).unwrap();
        assert_eq!(first, second);
        assert_eq!(host.bodies.len(), 2);
        assert_eq!(host.bodies[0], host.bodies[1]);
        assert_eq!(s.state().rounds().len(), 1);
    }

    #[test]
    fn missing_answer_changes_nothing() {
        let mut s = session(3, 5);
        let mut host = RecordingHost::default();
        let RenderOutcome::Active { selection, .. } = s.render(true, &mut host, &Untranslated).unwrap() else {
            panic!("expected an active round");
        };
        assert_eq!(selection, None);
        let before = s.state().clone();
        assert_eq!(s.submit(selection).unwrap(), SubmitOutcome::NeedsAnswer);
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn submit_requires_prepared_round() {
        let mut s = session(3, 5);
        assert!(matches!(
            s.submit(Some(Answer::Choice("yes".into()))),
            Err(GameError::RoundNotPrepared(0))
        ));
        assert_invariants(&s);
    }

    #[test]
    fn wrong_answer_shape_changes_nothing() {
        let mut s = session(3, 5);
        s.current_round_data().unwrap();
        let before = s.state().clone();
        assert!(matches!(
            s.submit(Some(Answer::Number(1.0))),
            Err(GameError::AnswerMismatch { .. })
        ));
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn feedback_follows_submission() {
        let mut s = session(3, 5);
        play_round(&mut s, "yes");
        let mut host = RecordingHost::default();
        s.render(true, &mut host, &Untranslated).unwrap();
        assert_eq!(host.feedback.len(), 1);
        let fb = &host.feedback[0];
        assert_eq!(fb.round_number, 1);
        assert_eq!(fb.message, "Correct! 20 of 20 points.");
        assert_eq!(fb.reveal, "The answer was yes.");
        assert_eq!(host.instructions[0].round_number, 2);
    }

    #[test]
    fn disabled_mode_renders_post_game_only() {
        let mut s = session(3, 5);
        let mut host = RecordingHost::default();
        assert!(s.render(false, &mut host, &Untranslated).unwrap().is_done());
        assert_eq!(host.post_game, 1);
        assert!(host.bodies.is_empty());
        assert!(s.state().rounds().is_empty());
    }

    #[test]
    fn reset_restores_identity_not_progress() {
        let mut s = GameSession::new(quiz(3).with_min_score(10), questions(5)).unwrap();
        play_round(&mut s, "yes");
        play_round(&mut s, "yes");
        s.reset_with_seed(7);

        assert_eq!(s.id(), "quiz");
        assert_eq!(s.title(), "Quiz");
        assert_eq!(s.num_rounds(), 3);
        assert_eq!(s.min_score_for_victory(), Some(10));
        assert_eq!(s.current_round(), 0);
        assert_eq!(s.total_score(), 0);
        assert!(s.state().results().is_empty());
        assert!(s.state().rounds().is_empty());
        assert_eq!(s.state().seed(), 7);
        assert_eq!(s.status(), SessionStatus::NotStarted);
    }

    #[test]
    fn round_generation_failure_is_terminal_until_reset() {
        let ties = Arc::new(Dataset::from_rows(
            "ties",
            vec![
                Row::new().with("name", "A").with("value", 1.0),
                Row::new().with("name", "B").with("value", 1.0),
            ],
        ));
        let def = GameDef::new("duel", "Duel", GameKind::Duel(DuelGame::default())).with_rounds(2);
        let mut s = GameSession::new(def, ties).unwrap();
        let mut host = RecordingHost::default();

        assert!(matches!(
            s.render(true, &mut host, &Untranslated),
            Err(GameError::Exhausted { .. })
        ));
        assert!(matches!(
            s.render(true, &mut host, &Untranslated),
            Err(GameError::SessionFailed { .. })
        ));
        assert!(s.state().results().is_empty());

        s.reset();
        assert!(s.state().failure().is_none());
    }

    #[test]
    fn state_roundtrips_through_restore() {
        let mut s = session(3, 5);
        play_round(&mut s, "yes");
        s.current_round_data().unwrap();

        let json = serde_json::to_value(s.state()).unwrap();
        let mut fresh = GameSession::new(quiz(3), questions(5)).unwrap();
        fresh.restore(serde_json::from_value(json).unwrap()).unwrap();
        assert_eq!(fresh.state(), s.state());

        let mut host = RecordingHost::default();
        fresh.render(true, &mut host, &Untranslated).unwrap();
        assert_eq!(Some(&host.bodies[0]), s.state().rounds().get(1));
    }

    #[test]
    fn restore_rejects_inconsistent_state() {
        let mut s = session(3, 5);
        play_round(&mut s, "yes");

        let mut json = serde_json::to_value(s.state()).unwrap();
        json["total_score"] = serde_json::json!(999);
        let state: SessionState = serde_json::from_value(json).unwrap();
        assert!(matches!(
            session(3, 5).restore(state),
            Err(GameError::CorruptState { .. })
        ));

        let mut json = serde_json::to_value(s.state()).unwrap();
        json["row_order"] = serde_json::json!([0, 0, 1, 2, 3]);
        let state: SessionState = serde_json::from_value(json).unwrap();
        assert!(session(3, 5).restore(state).is_err());

        // A session over a different kind cannot adopt quiz rounds.
        let estimator = GameDef::new("quiz", "Quiz", GameKind::Estimator(EstimatorGame::default()))
            .with_rounds(3);
        let data = Arc::new(Dataset::from_rows(
            "numbers",
            (0..5)
                .map(|i| Row::new().with("name", format!("n{i}")).with("value", i as f64))
                .collect(),
        ));
        let mut other = GameSession::new(estimator, data).unwrap();
        assert!(other.restore(s.state().clone()).is_err());
    }

    proptest! {
        #[test]
        fn progress_is_monotonic_and_scored_once(
            rows in 1usize..8,
            rounds in 0usize..10,
            actions in proptest::collection::vec(0u8..4, 0..30),
        ) {
            let mut s = GameSession::new(quiz(rounds), questions(rows)).unwrap();
            for action in actions {
                let before = s.current_round();
                match action {
                    0 => {
                        let mut host = RecordingHost::default();
                        s.render(true, &mut host, &Untranslated).unwrap();
                    }
                    1 => {
                        let outcome = s.submit(None).unwrap();
                        prop_assert!(matches!(
                            outcome,
                            SubmitOutcome::NeedsAnswer | SubmitOutcome::AlreadyFinished
                        ));
                    }
                    _ => {
                        let answer = if action == 2 { "yes" } else { "no" };
                        let mut host = RecordingHost::answering(Answer::Choice(answer.into()));
                        let rendered = s.render(true, &mut host, &Untranslated).unwrap();
                        if let RenderOutcome::Active { selection, .. } = rendered {
                            prop_assert!(matches!(s.submit(selection).unwrap(), SubmitOutcome::Scored(_)));
                            prop_assert_eq!(s.current_round(), before + 1);
                        } else {
                            prop_assert!(s.is_finished() || s.num_rounds() == 0);
                        }
                    }
                }
                prop_assert!(s.current_round() >= before);
                let st = s.state();
                prop_assert!(st.current_round() <= s.num_rounds());
                prop_assert_eq!(st.results().len(), st.current_round());
                prop_assert!(st.rounds().len() >= st.current_round());
                prop_assert_eq!(
                    st.completed_at().is_some(),
                    s.num_rounds() > 0 && st.current_round() == s.num_rounds()
                );
                let sum: u32 = st.results().iter().map(|r| r.score).sum();
                prop_assert_eq!(sum, st.total_score());
            }
        }

        #[test]
        fn rows_never_repeat_within_a_game(rows in 1usize..12, seed in any::<u64>()) {
            let def = quiz(rows).with_seed(seed);
            let mut s = GameSession::new(def, questions(rows)).unwrap();
            while !s.is_finished() {
                play_round(&mut s, "yes");
            }
            let used: Vec<usize> = s.state().results().iter().filter_map(|r| r.round.row()).collect();
            let distinct: HashSet<usize> = used.iter().copied().collect();
            prop_assert_eq!(used.len(), rows);
            prop_assert_eq!(distinct.len(), rows);
        }
    }
}
