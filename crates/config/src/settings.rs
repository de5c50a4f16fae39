// Application settings
// Loaded from ~/.config/pricelist/config.toml (or an explicit --config path)

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use pricelist_engine::fields::{DEFAULT_NAME_ALIASES, DEFAULT_PRICE_ALIASES, DEFAULT_WEIGHT_ALIASES};
use pricelist_engine::FieldMapping;
use pricelist_io::BadFilePolicy;

pub const DEFAULT_SOURCE_DIR: &str = "files";
pub const DEFAULT_OUTPUT_PATH: &str = "files/output.html";

#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    Read { path: PathBuf, message: String },
    /// TOML parse / deserialization error.
    Parse(String),
    /// Values parsed but are not usable (bad alias table, empty path, ...).
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "cannot read config {}: {message}", path.display())
            }
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Validation(msg) => write!(f, "config validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Header aliases per canonical field, highest priority first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldAliases {
    pub name: Vec<String>,
    pub price: Vec<String>,
    pub weight: Vec<String>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        let owned = |list: &[&str]| -> Vec<String> { list.iter().map(|s| s.to_string()).collect() };
        Self {
            name: owned(&DEFAULT_NAME_ALIASES),
            price: owned(&DEFAULT_PRICE_ALIASES),
            weight: owned(&DEFAULT_WEIGHT_ALIASES),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory scanned for `*.csv` price lists
    pub source_dir: PathBuf,

    /// Where the HTML report is written on exit
    pub output_path: PathBuf,

    /// Behaviour when one price list cannot be loaded
    pub on_bad_file: BadFilePolicy,

    pub fields: FieldAliases,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            on_bad_file: BadFilePolicy::Skip,
            fields: FieldAliases::default(),
        }
    }
}

impl Settings {
    /// Default config file location.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pricelist");
        config_dir.join("config.toml")
    }

    /// Load settings.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// and a missing file means built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("source_dir must not be empty".into()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("output_path must not be empty".into()));
        }
        self.field_mapping().map(|_| ())
    }

    /// Build the alias mapping described by `[fields]`.
    pub fn field_mapping(&self) -> Result<FieldMapping, ConfigError> {
        FieldMapping::from_aliases(
            self.fields.name.clone(),
            self.fields.price.clone(),
            self.fields.weight.clone(),
        )
        .map_err(|e| ConfigError::Validation(e.to_string()))
    }
}
