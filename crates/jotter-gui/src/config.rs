#![forbid(unsafe_code)]

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use serde::Deserialize;

const CONFIG_DIR: &str = "jotter";
const CONFIG_FILE: &str = "config.toml";
const MAX_STATUS_SECONDS: u64 = 60 * 60;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub(crate) const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    pub(crate) fn points(self) -> f32 {
        [12.0, 14.0, 17.0][self as usize]
    }

    pub(crate) fn label(self) -> &'static str {
        ["Small Font", "Medium Font", "Large Font"][self as usize]
    }
}

/// User preferences, read once at startup and never written back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) font_size: FontSize,
    pub(crate) monospace: bool,
    pub(crate) status_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_size: FontSize::Medium,
            monospace: true,
            status_seconds: jotter_core::STATUS_CLEAR_AFTER.as_secs(),
        }
    }
}

impl Config {
    pub(crate) fn status_clear_after(&self) -> Duration {
        Duration::from_secs(self.status_seconds.min(MAX_STATUS_SECONDS))
    }

    /// Loads `<config dir>/jotter/config.toml`, falling back to defaults
    /// when it is absent or broken.
    pub(crate) fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(Some(config)) => {
                log::info!("loaded preferences from {}", path.display());
                config
            }
            Ok(None) => Self::default(),
            Err(err) => {
                log::warn!("ignoring preferences: {err:#}");
                Self::default()
            }
        }
    }

    fn load_from(path: &Path) -> anyhow::Result<Option<Self>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()));
            }
        };

        Self::parse(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))
            .map(Some)
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}
