//! The Wissensrunde minigame engine.
//!
//! Turns tabular [`wr_data::Dataset`]s into round-based knowledge games. A
//! [`GameController`] owns the registered [`GameSession`]s and the global
//! [`GameMode`]; each session runs one [`GameKind`] through its rounds,
//! generating every round lazily and exactly once, and scoring each round
//! exactly once.
//!
//! The engine is built for hosts that re-run their whole interaction surface
//! on every user action: all mutable state is serializable and round-trips
//! through a [`StateStore`] between passes.

/// User answers.
pub mod answer;
/// Game and controller configuration.
pub mod config;
/// The game registry and the global game mode.
pub mod controller;
/// Error types used throughout the crate.
pub mod error;
/// The closed set of game kinds and their shared trait.
pub mod kinds;
/// The game mode state machine.
pub mod mode;
/// The rendering contract with the host.
pub mod render;
/// Results export.
pub mod report;
/// Seeded sampling helpers.
pub mod sampler;
/// The per-game state machine.
pub mod session;
/// Keyed state storage.
pub mod store;
/// Translation lookup.
pub mod translate;

/// Re-export the answer type.
pub use answer::Answer;
/// Re-export configuration types.
pub use config::{ControllerConfig, GameDef};
/// Re-export controller types.
pub use controller::{GameController, HistoryEntry};
/// Re-export error types.
pub use error::{GameError, GameResult};
/// Re-export the game kind sums and the shared trait.
pub use kinds::{GameKind, Minigame, RoundPayload, Score};
/// Re-export mode types.
pub use mode::{GameMode, ModeTransition};
/// Re-export rendering contract types.
pub use render::{GameHost, Instructions, Outcome, RoundFeedback};
/// Re-export the report.
pub use report::Report;
/// Re-export the sampler.
pub use sampler::RandomRoundSampler;
/// Re-export session types.
pub use session::{
    GameSession, RenderOutcome, RoundResult, SessionState, SessionStatus, SubmitOutcome,
};
/// Re-export state stores.
pub use store::{MemoryStore, StateStore};
/// Re-export translation types.
pub use translate::{Catalog, Translator, Untranslated};
