pub mod answer;
pub mod export;
pub mod games;
pub mod init;
pub mod mode;
pub mod play;
pub mod reset;
pub mod show;
pub mod summary;
pub mod terminal;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use wr_data::Dataset;
use wr_games::{Catalog, ControllerConfig, GameController, GameDef, GameMode, MemoryStore};

/// Collection manifest, relative to the collection directory.
pub const MANIFEST_FILE: &str = "games.json";

/// Engine state written after every command.
pub const STATE_FILE: &str = ".wr-state.json";

/// The `games.json` of a collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Seed of the controller rng used for full resets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Optional translation catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations: Option<PathBuf>,
    /// Dataset name to JSON file.
    #[serde(default)]
    pub datasets: BTreeMap<String, PathBuf>,
    /// Configured games, in listing order.
    #[serde(default)]
    pub games: Vec<GameEntry>,
}

/// One configured game and the dataset it plays on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEntry {
    /// Key into [`Manifest::datasets`].
    pub dataset: String,
    /// The game itself.
    #[serde(flatten)]
    pub def: GameDef,
}

impl GameEntry {
    pub fn new(dataset: &str, def: GameDef) -> Self {
        Self {
            dataset: dataset.to_string(),
            def,
        }
    }
}

/// A loaded collection: controller with restored state, translations and
/// the store the state is persisted through.
pub struct Workspace {
    dir: PathBuf,
    pub controller: GameController,
    pub catalog: Catalog,
    store: MemoryStore,
}

impl Workspace {
    /// Load the manifest, datasets, translations and stored state.
    pub fn open(dir: &Path) -> Result<Self, String> {
        let manifest_path = dir.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            return Err(format!(
                "no {MANIFEST_FILE} in '{}' (run `wr init` first)",
                dir.display()
            ));
        }
        let manifest: Manifest = read_json(&manifest_path)?;

        let mut datasets = BTreeMap::new();
        for (name, file) in &manifest.datasets {
            let data = Dataset::from_json_file(&dir.join(file))
                .map_err(|e| format!("cannot load dataset '{name}' from {}: {e}", file.display()))?;
            debug!("loaded dataset '{name}' with {} rows", data.len());
            datasets.insert(name.clone(), Arc::new(data));
        }

        let mut config = ControllerConfig::default();
        if let Some(seed) = manifest.seed {
            config = config.with_seed(seed);
        }
        let mut controller = GameController::new(config);
        for entry in manifest.games {
            let id = entry.def.id.clone();
            let data = datasets.get(&entry.dataset).cloned();
            controller
                .register_def(entry.def, data)
                .map_err(|e| format!("game '{id}': {e}"))?;
        }

        let catalog = match &manifest.translations {
            Some(file) => {
                let path = dir.join(file);
                let json = std::fs::read_to_string(&path)
                    .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
                Catalog::from_json_str(&json)
                    .map_err(|e| format!("invalid translations in {}: {e}", path.display()))?
            }
            None => Catalog::new(),
        };

        let store = load_store(&dir.join(STATE_FILE));
        controller
            .restore(&store)
            .map_err(|e| format!("cannot restore state: {e}"))?;

        Ok(Self {
            dir: dir.to_path_buf(),
            controller,
            catalog,
            store,
        })
    }

    /// Persist the engine state.
    pub fn save(&mut self) -> Result<(), String> {
        self.controller
            .persist(&mut self.store)
            .map_err(|e| format!("cannot store state: {e}"))?;
        let json = serde_json::to_string_pretty(&self.store)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        let path = self.dir.join(STATE_FILE);
        std::fs::write(&path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))
    }

    /// Print a note when game mode is not plainly on.
    pub fn print_mode_note(&self) {
        use colored::Colorize;

        match self.controller.mode() {
            GameMode::Enabled => {}
            GameMode::PendingDeactivation => println!(
                "  {}\n",
                "Game mode is being turned off. Run `wr mode confirm` or `wr mode cancel`."
                    .yellow()
            ),
            GameMode::Disabled => println!(
                "  {}\n",
                "Game mode is off. Run `wr mode on` to play.".yellow()
            ),
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&json).map_err(|e| format!("invalid JSON in {}: {e}", path.display()))
}

/// Stored state, or an empty store if there is none or it is unreadable.
fn load_store(path: &Path) -> MemoryStore {
    if !path.exists() {
        return MemoryStore::new();
    }
    match read_json(path) {
        Ok(store) => store,
        Err(e) => {
            warn!("starting fresh: {e}");
            MemoryStore::new()
        }
    }
}
