use std::{collections::HashMap, path::PathBuf};

use serde::Deserialize;
use serde_json::Value;

/// Tracing target every directive is scoped to.
pub const LOG_TARGET: &str = "script_analyzer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// `EnvFilter` directive enabling this level for the crate only.
    pub fn directive(self) -> String {
        format!("{LOG_TARGET}={}", self.as_str())
    }
}

/// `[logging]` table. `--verbose` and `--log-file` on the command line win
/// over these.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoggingSettings {
    pub level: LogLevel,
    /// Also write logs to this file, without colors.
    pub file: Option<PathBuf>,
    /// Colored stderr output.
    pub ansi: bool,
}

impl LoggingSettings {
    /// Level after the `--verbose` override.
    pub fn effective_level(
        &self,
        verbose: bool,
    ) -> LogLevel {
        if verbose { self.level.max(LogLevel::Debug) } else { self.level }
    }

    pub(crate) fn apply_patch(
        &mut self,
        patch: LoggingSettingsPatch,
    ) {
        if let Some(v) = patch.level {
            self.level = v;
        }
        if let Some(v) = patch.file {
            self.file = Some(v);
        }
        if let Some(v) = patch.ansi {
            self.ansi = v;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct LoggingSettingsPatch {
    pub(crate) level: Option<LogLevel>,
    pub(crate) file: Option<PathBuf>,
    pub(crate) ansi: Option<bool>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
