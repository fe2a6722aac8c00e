//! Application configuration.
//!
//! Settings come from three layers, later layers winning:
//! built-in defaults, a TOML config file, and command-line flags.
//!
//! ```toml
//! [files]
//! input = "input.txt"
//! output = "output.txt"
//!
//! [matching]
//! placeholder = "?"
//! consumption = "by_index"   # or "by_value"
//! min_similarity = 0
//! ```

use std::path::{Path, PathBuf};

use catmatch_map::{Consumption, MatcherOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "catmatch.toml";
pub const DEFAULT_INPUT_FILE: &str = "input.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "output.txt";

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Line-oriented file holding the source and target blocks.
    pub input: PathBuf,
    /// Destination for `key:value` lines.
    pub output: PathBuf,
    /// Optional JSON report destination.
    pub json_report: Option<PathBuf>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_FILE),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            json_report: None,
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub files: FilesConfig,
    pub matching: MatcherOptions,
}

impl AppConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Resolves the config to use.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] in
    /// `dir` is used when present, otherwise defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            return Self::load(&candidate);
        }
        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(input) = &overrides.input {
            self.files.input = input.clone();
        }
        if let Some(output) = &overrides.output {
            self.files.output = output.clone();
        }
        if let Some(report) = &overrides.json_report {
            self.files.json_report = Some(report.clone());
        }
        if let Some(placeholder) = &overrides.placeholder {
            self.matching.placeholder = placeholder.clone();
        }
        if let Some(consumption) = overrides.consumption {
            self.matching.consumption = consumption;
        }
        if let Some(min_similarity) = overrides.min_similarity {
            self.matching.min_similarity = min_similarity;
        }
    }
}

/// Values given on the command line. `None` leaves the config untouched.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub json_report: Option<PathBuf>,
    pub placeholder: Option<String>,
    pub consumption: Option<Consumption>,
    pub min_similarity: Option<usize>,
}
