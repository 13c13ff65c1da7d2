//! The game registry and the global game mode.
//!
//! The controller is an explicit context object: the host creates one per
//! user session and threads it through every call. Aggregates are computed
//! from the registered sessions on demand.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use wr_data::Dataset;

use crate::answer::Answer;
use crate::config::{ControllerConfig, GameDef};
use crate::error::{GameError, GameResult};
use crate::mode::{GameMode, ModeTransition};
use crate::render::GameHost;
use crate::session::{GameSession, RenderOutcome, SessionState, SubmitOutcome};
use crate::store::{CONTROLLER_KEY, MODE_KEY, StateStore, game_key};
use crate::translate::Translator;

/// A finished game as listed in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Game id.
    pub id: String,
    /// Display icon.
    pub icon: String,
    /// Display title.
    pub title: String,
    /// Points earned.
    pub points: u32,
    /// Highest possible points.
    pub max_points: u32,
    /// At least one round answered correctly.
    pub successful: bool,
    /// Completion time.
    pub completed_at: DateTime<Utc>,
}

/// Registry of game sessions plus the game mode.
///
/// Resets draw fresh session seeds from the controller's generator. The
/// number of draws is persisted so a seeded controller rebuilt on the next
/// pass continues its sequence instead of replaying it.
#[derive(Debug)]
pub struct GameController {
    games: BTreeMap<String, GameSession>,
    mode: GameMode,
    rng: StdRng,
    draws: u64,
}

/// Persisted controller progress.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct ControllerState {
    draws: u64,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl GameController {
    /// Create an empty controller.
    pub fn new(config: ControllerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            games: BTreeMap::new(),
            mode: config.mode,
            rng,
            draws: 0,
        }
    }

    /// Register a session. If the id is taken, the existing session is kept
    /// and returned.
    pub fn register(&mut self, session: GameSession) -> &mut GameSession {
        let id = session.id().to_string();
        if self.games.contains_key(&id) {
            debug!("{id}: already registered");
        }
        self.games.entry(id).or_insert(session)
    }

    /// Construct and register a session from its definition. If the id is
    /// taken, nothing is constructed and the existing session is returned.
    pub fn register_def(
        &mut self,
        def: GameDef,
        data: impl Into<Option<Arc<Dataset>>>,
    ) -> GameResult<&mut GameSession> {
        if self.games.contains_key(&def.id) {
            debug!("{}: already registered", def.id);
            return self.session_mut(&def.id);
        }
        let session = GameSession::new(def, data)?;
        Ok(self.register(session))
    }

    /// Session by id.
    pub fn get(&self, id: &str) -> Option<&GameSession> {
        self.games.get(id)
    }

    /// Mutable session by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut GameSession> {
        self.games.get_mut(id)
    }

    /// Session by id, or [`GameError::UnknownGame`].
    pub fn session(&self, id: &str) -> GameResult<&GameSession> {
        self.get(id)
            .ok_or_else(|| GameError::UnknownGame(id.to_string()))
    }

    /// Mutable session by id, or [`GameError::UnknownGame`].
    pub fn session_mut(&mut self, id: &str) -> GameResult<&mut GameSession> {
        self.games
            .get_mut(id)
            .ok_or_else(|| GameError::UnknownGame(id.to_string()))
    }

    /// All sessions, ordered by id.
    pub fn sessions(&self) -> impl Iterator<Item = &GameSession> {
        self.games.values()
    }

    /// Number of registered sessions.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether no session is registered.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Reset every session. Nothing is unregistered.
    pub fn full_reset(&mut self) {
        let ids: Vec<String> = self.games.keys().cloned().collect();
        for id in &ids {
            let seed = self.next_seed();
            if let Some(session) = self.games.get_mut(id) {
                session.reset_with_seed(seed);
            }
        }
        info!("reset {} games", ids.len());
    }

    /// Reset one session.
    pub fn reset(&mut self, id: &str) -> GameResult<()> {
        self.session(id)?;
        let seed = self.next_seed();
        self.session_mut(id)?.reset_with_seed(seed);
        Ok(())
    }

    fn next_seed(&mut self) -> u64 {
        self.draws += 1;
        self.rng.random()
    }

    /// Sum of the scores of all finished sessions.
    pub fn aggregate_score(&self) -> u32 {
        self.games
            .values()
            .filter(|s| s.is_finished())
            .map(GameSession::total_score)
            .sum()
    }

    /// Finished sessions, most recently completed first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        let mut entries: Vec<HistoryEntry> = self
            .games
            .values()
            .filter_map(|s| {
                let completed_at = s.completed_at()?;
                let (points, successful) = s.result();
                Some(HistoryEntry {
                    id: s.id().to_string(),
                    icon: s.icon().to_string(),
                    title: s.title().to_string(),
                    points,
                    max_points: s.max_score(),
                    successful,
                    completed_at,
                })
            })
            .collect();
        entries.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        entries
    }

    /// Current game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Whether games are playable.
    pub fn is_game_mode_enabled(&self) -> bool {
        self.mode.is_enabled()
    }

    /// Request game mode on or off. Turning it off only marks it pending;
    /// turning it back on from disabled resets every session.
    pub fn set_game_mode(&mut self, on: bool) -> ModeTransition {
        self.apply(self.mode.request(on))
    }

    /// Complete a pending deactivation.
    pub fn confirm_deactivation(&mut self) -> ModeTransition {
        self.apply(self.mode.confirm())
    }

    /// Withdraw a pending deactivation.
    pub fn cancel_deactivation(&mut self) -> ModeTransition {
        self.apply(self.mode.cancel())
    }

    fn apply(&mut self, (mode, transition): (GameMode, ModeTransition)) -> ModeTransition {
        if transition != ModeTransition::Unchanged {
            info!("game mode {:?} -> {mode:?} ({transition:?})", self.mode);
        }
        self.mode = mode;
        if transition == ModeTransition::Reactivated {
            self.full_reset();
        }
        transition
    }

    /// Render one game under the current mode.
    pub fn render(
        &mut self,
        id: &str,
        host: &mut dyn GameHost,
        tr: &dyn Translator,
    ) -> GameResult<RenderOutcome> {
        let enabled = self.mode.is_enabled();
        self.session_mut(id)?.render(enabled, host, tr)
    }

    /// Submit an answer to one game. Ignored while game mode is disabled.
    pub fn submit(&mut self, id: &str, answer: Option<Answer>) -> GameResult<SubmitOutcome> {
        let enabled = self.mode.is_enabled();
        let session = self.session_mut(id)?;
        if !enabled {
            warn!("{id}: submission ignored, game mode is disabled");
            return Ok(SubmitOutcome::ModeDisabled);
        }
        session.submit(answer)
    }

    /// Load the mode, the reseeding progress and every registered session's
    /// state from a store.
    ///
    /// Stored entries that do not parse or do not fit a session are discarded
    /// with a warning; the controller keeps its current value for them.
    pub fn restore(&mut self, store: &dyn StateStore) -> GameResult<()> {
        if let Some(value) = store.load(MODE_KEY)? {
            match serde_json::from_value(value) {
                Ok(mode) => self.mode = mode,
                Err(e) => warn!("discarding stored game mode: {e}"),
            }
        }
        if let Some(value) = store.load(CONTROLLER_KEY)? {
            match serde_json::from_value::<ControllerState>(value) {
                Ok(state) => {
                    let skipped = state.draws.saturating_sub(self.draws);
                    for _ in 0..skipped {
                        self.next_seed();
                    }
                    debug!("controller: skipped {skipped} seeds");
                }
                Err(e) => warn!("discarding stored controller state: {e}"),
            }
        }
        for (id, session) in &mut self.games {
            let Some(value) = store.load(&game_key(id))? else {
                continue;
            };
            let restored = serde_json::from_value::<SessionState>(value)
                .map_err(GameError::from)
                .and_then(|state| session.restore(state));
            if let Err(e) = restored {
                warn!("{id}: discarding stored state: {e}");
            }
        }
        Ok(())
    }

    /// Save the mode, the reseeding progress and every session's state to a
    /// store.
    pub fn persist(&self, store: &mut dyn StateStore) -> GameResult<()> {
        store.save(MODE_KEY, serde_json::to_value(self.mode)?)?;
        let progress = ControllerState { draws: self.draws };
        store.save(CONTROLLER_KEY, serde_json::to_value(progress)?)?;
        for (id, session) in &self.games {
            store.save(&game_key(id), serde_json::to_value(session.state())?)?;
        }
        Ok(())
    }
}
