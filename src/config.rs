//! TOML configuration

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

const APP_DIR: &str = "bubble-player";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub library: LibraryConfig,
    pub permissions: PermissionConfig,
    pub playback: PlaybackConfig,
    pub bubble: BubbleConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LibraryConfig {
    pub path: PathBuf,
    pub follow_links: bool,
}

/// Pre-answered permission grants. `None` means "ask at startup".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermissionConfig {
    pub media: Option<bool>,
    pub overlay: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    pub progress_interval: Duration,
    /// `skip_previous` restarts the current track past this position.
    pub restart_threshold: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleConfig {
    pub x: u16,
    pub y: u16,
}

impl Default for Config {
    fn default() -> Self {
        ConfigDocument::default().into()
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            progress_interval: Duration::from_millis(1000),
            restart_threshold: Duration::from_secs(3),
        }
    }
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self { x: 2, y: 1 }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Otherwise the user config directory and the
    /// working directory are searched, falling back to defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let mut candidates = Vec::new();
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(APP_DIR).join(CONFIG_FILE));
        }
        if let Ok(current_dir) = env::current_dir() {
            candidates.push(current_dir.join(CONFIG_FILE));
        }

        for path in candidates {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Config::default())
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&data)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn parse(data: &str) -> anyhow::Result<Self> {
        let doc: ConfigDocument = toml::from_str(data)?;
        Ok(doc.into())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigDocument {
    #[serde(default)]
    library: LibrarySection,
    #[serde(default)]
    permissions: PermissionSection,
    #[serde(default)]
    playback: PlaybackSection,
    #[serde(default)]
    bubble: BubbleSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LibrarySection {
    path: Option<PathBuf>,
    follow_links: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PermissionSection {
    media: Option<bool>,
    overlay: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlaybackSection {
    progress_interval_ms: Option<u64>,
    restart_threshold_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BubbleSection {
    x: Option<u16>,
    y: Option<u16>,
}

impl From<ConfigDocument> for Config {
    fn from(value: ConfigDocument) -> Self {
        let playback_defaults = PlaybackConfig::default();
        let bubble_defaults = BubbleConfig::default();

        let library_path = value
            .library
            .path
            .or_else(dirs::audio_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Config {
            library: LibraryConfig {
                path: library_path,
                follow_links: value.library.follow_links.unwrap_or(false),
            },
            permissions: PermissionConfig {
                media: value.permissions.media,
                overlay: value.permissions.overlay,
            },
            playback: PlaybackConfig {
                // A zero period would make the ticker spin.
                progress_interval: value
                    .playback
                    .progress_interval_ms
                    .map(|ms| Duration::from_millis(ms.max(100)))
                    .unwrap_or(playback_defaults.progress_interval),
                restart_threshold: value
                    .playback
                    .restart_threshold_secs
                    .map(Duration::from_secs)
                    .unwrap_or(playback_defaults.restart_threshold),
            },
            bubble: BubbleConfig {
                x: value.bubble.x.unwrap_or(bubble_defaults.x),
                y: value.bubble.y.unwrap_or(bubble_defaults.y),
            },
        }
    }
}
