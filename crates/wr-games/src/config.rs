//! Game and controller configuration.

use serde::{Deserialize, Serialize};

use crate::kinds::GameKind;
use crate::mode::GameMode;

/// Everything needed to construct a game session, minus its dataset.
///
/// Deserializes from a flat object: the kind-specific fields sit next to the
/// common ones and `kind` selects the variant.
///
/// ```json
/// { "id": "capitals", "title": "Capitals", "rounds": 5, "kind": "quiz" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDef {
    /// Unique id; registry key.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Icon override; defaults to the kind's icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Requested number of rounds, clamped to the dataset size.
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    /// Score needed for a victory message at completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score_for_victory: Option<u32>,
    /// Fixed seed for the first game instance; resets draw fresh seeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Variant and its settings.
    #[serde(flatten)]
    pub kind: GameKind,
}

fn default_rounds() -> usize {
    5
}

impl GameDef {
    /// A definition with default round count and no victory threshold.
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: GameKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: None,
            rounds: default_rounds(),
            min_score_for_victory: None,
            seed: None,
            kind,
        }
    }

    /// Set the requested number of rounds.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Set the victory threshold.
    pub fn with_min_score(mut self, min: u32) -> Self {
        self.min_score_for_victory = Some(min);
        self
    }

    /// Fix the initial seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Icon to display: the override or the kind's default.
    pub fn display_icon(&self) -> &str {
        self.icon.as_deref().unwrap_or(self.kind.icon())
    }
}

/// Controller-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Seed for the controller's generator, which seeds sessions on reset.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Initial game mode.
    #[serde(default)]
    pub mode: GameMode,
}

impl ControllerConfig {
    /// Seed the controller's generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start in the given mode.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{QuizGame, RankingGame};

    #[test]
    fn flat_json_with_defaults() {
        let def: GameDef = serde_json::from_str(
            r#"{ "id": "capitals", "title": "Capitals", "kind": "quiz", "points": 30 }"#,
        )
        .unwrap();
        assert_eq!(def.rounds, 5);
        assert_eq!(def.min_score_for_victory, None);
        assert_eq!(
            def.kind,
            GameKind::Quiz(QuizGame {
                points: 30,
                ..QuizGame::default()
            })
        );
        assert_eq!(def.display_icon(), "❓");
    }

    #[test]
    fn ranking_fields_flatten() {
        let def: GameDef = serde_json::from_str(
            r#"{
                "id": "rivers", "title": "Rivers", "rounds": 3,
                "kind": "ranking", "items": 5, "order": "ascending", "adjacency": "either",
                "min_score_for_victory": 100
            }"#,
        )
        .unwrap();
        let GameKind::Ranking(game) = &def.kind else {
            panic!("expected ranking, got {:?}", def.kind);
        };
        assert_eq!(game.items, 5);
        assert_eq!(game.exact_points, RankingGame::default().exact_points);
        assert_eq!(def.min_score_for_victory, Some(100));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = serde_json::from_str::<GameDef>(r#"{ "id": "x", "title": "X", "kind": "chess" }"#);
        assert!(err.is_err());
    }

    #[test]
    fn builder() {
        let def = GameDef::new("q", "Quiz", GameKind::Quiz(QuizGame::default()))
            .with_rounds(3)
            .with_min_score(40)
            .with_seed(9)
            .with_icon("🧠");
        assert_eq!(def.rounds, 3);
        assert_eq!(def.min_score_for_victory, Some(40));
        assert_eq!(def.seed, Some(9));
        assert_eq!(def.display_icon(), "🧠");
    }

    #[test]
    fn controller_config_builder() {
        let cfg = ControllerConfig::default()
            .with_seed(1)
            .with_mode(GameMode::Disabled);
        assert_eq!(cfg.seed, Some(1));
        assert_eq!(cfg.mode, GameMode::Disabled);
    }
}
