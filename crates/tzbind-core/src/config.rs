//! Session configuration: which timezone forms use and how fields render.
//!
//! Values are resolved in priority order:
//!
//! 1. Overrides set on the [`ConfigBuilder`] (usually command-line flags)
//! 2. A JSON config file, either given explicitly or found at
//!    `$XDG_CONFIG_HOME/tzbind/config.json`
//! 3. The host timezone, then UTC
//!
//! ```json
//! {
//!   "timezone": "America/Los_Angeles",
//!   "precision": "minute",
//!   "show_zone_abbr": true
//! }
//! ```

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    convert::InputPrecision,
    error::{BindError, Result, ResultExt},
    field::FieldOptions,
    timezone::Timezone,
};

const CONFIG_FILE_NAME: &str = "config.json";

/// On-disk settings. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub timezone: Option<String>,
    pub precision: Option<InputPrecision>,
    pub show_zone_abbr: Option<bool>,
}

impl ConfigFile {
    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns `BindError::FileSystem` if the file cannot be read and
    /// `BindError::Configuration` if it is not valid config JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| BindError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&raw)
            .with_context_lazy(|| format!("Invalid config file '{}'", path.display()))
    }
}

/// Fully resolved settings for a form session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub timezone: Timezone,
    pub precision: InputPrecision,
    pub show_zone_abbr: bool,
    /// The file the settings were read from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Field options for `label` that honor the zone annotation preference.
    pub fn field_options(&self, label: impl Into<String>) -> FieldOptions {
        FieldOptions::new(label).zone_abbr(self.show_zone_abbr)
    }
}

/// Builder for resolving a [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    timezone: Option<String>,
    precision: Option<InputPrecision>,
    show_zone_abbr: Option<bool>,
    use_system_timezone: bool,
}

impl ConfigBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config_path: None,
            timezone: None,
            precision: None,
            show_zone_abbr: None,
            use_system_timezone: true,
        }
    }

    /// Sets a config file path. Unlike the XDG default, an explicit file
    /// must exist.
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.config_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    pub fn with_timezone(mut self, timezone: Option<impl Into<String>>) -> Self {
        if let Some(timezone) = timezone {
            self.timezone = Some(timezone.into());
        }
        self
    }

    pub fn with_precision(mut self, precision: Option<InputPrecision>) -> Self {
        if precision.is_some() {
            self.precision = precision;
        }
        self
    }

    pub fn with_zone_abbr(mut self, show: Option<bool>) -> Self {
        if show.is_some() {
            self.show_zone_abbr = show;
        }
        self
    }

    /// Skips the host timezone and falls back to UTC directly. Keeps
    /// resolution independent of the machine, mostly for tests.
    pub fn without_system_timezone(mut self) -> Self {
        self.use_system_timezone = false;
        self
    }

    /// Resolves the configuration.
    ///
    /// # Errors
    ///
    /// Returns `BindError::FileSystem` or `BindError::Configuration` for an
    /// unreadable or malformed config file and `BindError::UnknownTimezone`
    /// if the chosen timezone does not exist.
    pub fn build(self) -> Result<Config> {
        let (file, source) = match self.config_path {
            Some(path) => (ConfigFile::load(&path)?, Some(path)),
            None => match Self::default_config_path() {
                Some(path) => (ConfigFile::load(&path)?, Some(path)),
                None => (ConfigFile::default(), None),
            },
        };
        if let Some(path) = &source {
            debug!("Loaded config from {}", path.display());
        }

        let timezone = match self.timezone.or(file.timezone) {
            Some(name) => Timezone::get(&name)?,
            None if self.use_system_timezone => Timezone::system(),
            None => Timezone::utc(),
        };
        info!("Using timezone {timezone}");

        Ok(Config {
            timezone,
            precision: self.precision.or(file.precision).unwrap_or_default(),
            show_zone_abbr: self.show_zone_abbr.or(file.show_zone_abbr).unwrap_or(true),
            source,
        })
    }

    /// Returns the config file location under the XDG Base Directory
    /// specification, if such a file exists.
    fn default_config_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("tzbind").find_config_file(CONFIG_FILE_NAME)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
