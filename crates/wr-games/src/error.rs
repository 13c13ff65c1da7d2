//! Error types for the minigame engine.

use thiserror::Error;
use wr_data::DataError;

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors surfaced to the host.
///
/// Invalid submissions (no answer selected) are not errors; see
/// [`crate::session::SubmitOutcome`].
#[derive(Debug, Error)]
pub enum GameError {
    /// The game was constructed without a dataset.
    #[error("game '{0}' has no dataset")]
    MissingDataset(String),

    /// Rounds were requested against an empty dataset.
    #[error("game '{id}' requests {requested} rounds but its dataset is empty")]
    EmptyDataset {
        /// Game id.
        id: String,
        /// Requested number of rounds.
        requested: usize,
    },

    /// The game's configuration does not fit its dataset.
    #[error("game '{id}' is misconfigured: {reason}")]
    InvalidConfig {
        /// Game id.
        id: String,
        /// What is wrong.
        reason: String,
    },

    /// A round's data could not be generated.
    #[error("round {round} could not be generated: {reason}")]
    RoundGeneration {
        /// 0-based round index.
        round: usize,
        /// What is wrong.
        reason: String,
    },

    /// Bounded-retry sampling ran out of attempts.
    #[error("gave up after {attempts} attempts: {reason}")]
    Exhausted {
        /// Attempts made.
        attempts: usize,
        /// What the sampler was looking for.
        reason: String,
    },

    /// A previous round failed to generate; the session is unusable until reset.
    #[error("game '{id}' failed: {reason}")]
    SessionFailed {
        /// Game id.
        id: String,
        /// The original failure.
        reason: String,
    },

    /// Submission attempted before the active round was rendered.
    #[error("round {0} has not been prepared")]
    RoundNotPrepared(usize),

    /// The answer's shape does not fit the round.
    #[error("a {found} answer does not fit a {expected} round")]
    AnswerMismatch {
        /// Game kind of the round.
        expected: &'static str,
        /// Shape of the answer.
        found: &'static str,
    },

    /// The answer has the right shape but cannot be scored against the round.
    #[error("invalid {kind} answer: {reason}")]
    InvalidAnswer {
        /// Game kind of the round.
        kind: &'static str,
        /// What is wrong.
        reason: String,
    },

    /// A stored round payload belongs to another game kind.
    #[error("round payload of kind {found} given to a {expected} game")]
    PayloadMismatch {
        /// Kind of the game.
        expected: &'static str,
        /// Kind of the payload.
        found: &'static str,
    },

    /// No game registered under this id.
    #[error("unknown game: {0}")]
    UnknownGame(String),

    /// Stored state violates the session invariants.
    #[error("stored state for game '{id}' is corrupt: {reason}")]
    CorruptState {
        /// Game id.
        id: String,
        /// Which invariant failed.
        reason: String,
    },

    /// Dataset access failed.
    #[error("row {row}: {source}")]
    Row {
        /// Row index.
        row: usize,
        /// Underlying data error.
        #[source]
        source: DataError,
    },

    /// Dataset error without row context.
    #[error(transparent)]
    Data(#[from] DataError),

    /// State (de)serialization failed.
    #[error("state serialization: {0}")]
    Json(#[from] serde_json::Error),
}

impl GameError {
    /// Wrap a data error with the row it came from.
    pub fn row(row: usize, source: DataError) -> Self {
        Self::Row { row, source }
    }

    /// Whether this error is a construction-time configuration failure.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::MissingDataset(_) | Self::EmptyDataset { .. } | Self::InvalidConfig { .. }
        )
    }
}
