//! Settings for the analyzer, read from `script-analyzer.toml`.
//!
//! Settings are split into one file per category. Each category has a public
//! settings struct with defaults and a private `*Patch` struct for partial
//! deserialization; [`AnalyzerSettings`] aggregates them.

pub(crate) mod logging;
pub(crate) mod search;

use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
};

use logging::LoggingSettingsPatch;
pub use logging::{LOG_TARGET, LogLevel, LoggingSettings};
use search::SearchSettingsPatch;
pub use search::{MAX_SLOW_QUERY_THRESHOLD_US, MIN_SLOW_QUERY_THRESHOLD_US, SearchSettings};
use serde::Deserialize;
use serde_json::Value;

pub const CONFIG_FILENAME: &str = "script-analyzer.toml";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzerSettings {
    pub search: SearchSettings,
    pub logging: LoggingSettings,
}

impl AnalyzerSettings {
    /// Parses a settings file body. Unknown keys are ignored.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let patch: AnalyzerSettingsPatch = toml::from_str(content).map_err(|error| ConfigError::Parse {
            path: None,
            reason: error.to_string(),
        })?;
        let mut settings = Self::default();
        settings.apply_patch(patch);
        settings.normalize();
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;
        let mut settings = Self::from_toml(&content).map_err(|error| error.with_path(path))?;
        if let (Some(file), Some(dir)) = (&settings.logging.file, path.parent())
            && file.is_relative()
        {
            settings.logging.file = Some(dir.join(file));
        }
        Ok(settings)
    }

    /// Settings from the nearest `script-analyzer.toml` above `start`, or the
    /// defaults when there is none.
    pub fn discover(start: &Path) -> Result<Self, ConfigError> {
        match find_config_file(start) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    fn apply_patch(
        &mut self,
        patch: AnalyzerSettingsPatch,
    ) {
        if let Some(p) = patch.search {
            self.search.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    fn normalize(&mut self) {
        self.search.normalize();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct AnalyzerSettingsPatch {
    search: Option<SearchSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

/// Walks parent directories from `start` looking for `script-analyzer.toml`.
/// Returns the path to the first one found, or `None`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_file() {
        start.parent()?
    } else {
        start
    };
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        reason: String,
    },
    Parse {
        path: Option<PathBuf>,
        reason: String,
    },
}

impl ConfigError {
    fn with_path(
        self,
        path: &Path,
    ) -> Self {
        match self {
            Self::Parse {
                path: None,
                reason,
            } => Self::Parse {
                path: Some(path.to_path_buf()),
                reason,
            },
            other => other,
        }
    }
}

impl Display for ConfigError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Read {
                path,
                reason,
            } => write!(f, "failed to read {}: {reason}", path.display()),
            Self::Parse {
                path: Some(path),
                reason,
            } => write!(f, "invalid settings in {}: {reason}", path.display()),
            Self::Parse {
                path: None,
                reason,
            } => write!(f, "invalid settings: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
#[path = "../../tests/src/config/settings_tests.rs"]
mod tests;
