//! Runtime settings with persistence
//!
//! Settings are read from the path given on the command line, or from
//! `~/.config/dough/settings.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use dough_game::GameConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All runtime settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    pub game: GameConfig,
    pub headless: HeadlessSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            game: GameConfig::default(),
            headless: HeadlessSettings::default(),
        }
    }
}

/// Where the settings came from. Reported once logging is up.
#[derive(Debug)]
pub enum Origin {
    File(PathBuf),
    Missing(PathBuf),
    Invalid(PathBuf, String),
    NoConfigDir,
}

impl Origin {
    pub fn report(&self) {
        match self {
            Origin::File(path) => info!("Loaded settings from {:?}", path),
            Origin::Missing(path) => info!("No settings file at {:?}, using defaults", path),
            Origin::Invalid(path, e) => {
                warn!("Failed to load settings from {:?}: {}, using defaults", path, e)
            }
            Origin::NoConfigDir => warn!("Could not determine config directory"),
        }
    }
}

impl Settings {
    /// Default settings file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dough").join("settings.toml"))
    }

    /// Load settings from `path`, or the default location when `None`.
    /// Falls back to defaults when the file is absent or broken.
    pub fn load(path: Option<&Path>) -> (Self, Origin) {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return (Self::default(), Origin::NoConfigDir);
        };

        if !path.exists() {
            return (Self::default(), Origin::Missing(path));
        }

        match Self::read(&path) {
            Ok(settings) => (settings, Origin::File(path)),
            Err(e) => (Self::default(), Origin::Invalid(path, format!("{:#}", e))),
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save settings to `path`, creating its directory if needed
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Options for runs without a window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlessSettings {
    /// Frames to run before stopping (0 = until a quit event)
    pub frames: u64,
    /// Where to write the last frame, if anywhere
    pub screenshot: Option<PathBuf>,
    /// Input to replay, in frame order
    pub script: Vec<ScriptStep>,
}

impl Default for HeadlessSettings {
    fn default() -> Self {
        Self {
            frames: 120,
            screenshot: Some(PathBuf::from("screenshot.png")),
            script: vec![
                ScriptStep::new(1, ScriptAction::Press, "D"),
                ScriptStep::new(30, ScriptAction::Press, "S"),
                ScriptStep::new(60, ScriptAction::Release, "D"),
                ScriptStep::new(90, ScriptAction::Release, "S"),
            ],
        }
    }
}

/// One scripted input event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Frame the event is delivered in, counting from 1
    pub frame: u64,
    pub action: ScriptAction,
    /// Key name, e.g. `"W"` or `"Left"`; unused for `quit`
    #[serde(default)]
    pub key: String,
}

impl ScriptStep {
    pub fn new(frame: u64, action: ScriptAction, key: &str) -> Self {
        Self {
            frame,
            action,
            key: key.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptAction {
    Press,
    Release,
    Quit,
}
