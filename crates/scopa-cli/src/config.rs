use scopa_core::RuleSet;
use scopa_core::model::player::validate_name;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_SEATS: usize = 3;

/// Root game configuration loaded from YAML. Every block is optional.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GameConfig {
    /// Names to seat without prompting. When empty, `seats` names are asked for.
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default = "default_seats")]
    pub seats: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub rules: RuleSet,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub outputs: OutputsConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            seats: DEFAULT_SEATS,
            seed: None,
            rules: RuleSet::default(),
            logging: LoggingConfig::default(),
            outputs: OutputsConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: GameConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    ///
    /// Names are trimmed in place and `seats` follows the name list when one is given.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.validate_players()?;
        self.rules
            .validate()
            .map_err(|err| ValidationError::InvalidField {
                field: "rules".to_string(),
                message: err.to_string(),
            })?;

        let needed = self.rules.opening_deal_size(self.seats);
        if needed > scopa_core::model::deck::DECK_SIZE {
            return Err(ValidationError::InvalidField {
                field: "seats".to_string(),
                message: format!(
                    "{} players cannot be dealt from one deck ({needed} cards needed)",
                    self.seats
                ),
            });
        }
        self.rules
            .validate_for(self.seats)
            .map_err(|err| ValidationError::InvalidField {
                field: "rules".to_string(),
                message: err.to_string(),
            })?;

        self.logging.normalize();
        if self.logging.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.logging.tracing_level),
            });
        }
        self.outputs.validate()?;
        Ok(())
    }

    fn validate_players(&mut self) -> Result<(), ValidationError> {
        if self.players.is_empty() {
            if self.seats == 0 {
                return Err(ValidationError::InvalidField {
                    field: "seats".to_string(),
                    message: "at least one player is required".to_string(),
                });
            }
            return Ok(());
        }

        let mut accepted: Vec<String> = Vec::with_capacity(self.players.len());
        for (index, raw) in self.players.iter().enumerate() {
            let name =
                validate_name(raw, &accepted).map_err(|err| ValidationError::InvalidField {
                    field: format!("players[{index}]"),
                    message: err.to_string(),
                })?;
            accepted.push(name);
        }
        self.seats = accepted.len();
        self.players = accepted;
        Ok(())
    }

    /// Names used when nobody is at the keyboard.
    pub fn scripted_names(&self) -> Vec<String> {
        if self.players.is_empty() {
            (1..=self.seats).map(|seat| format!("Player {seat}")).collect()
        } else {
            self.players.clone()
        }
    }
}

fn default_seats() -> usize {
    DEFAULT_SEATS
}

/// Console logging goes to stderr; `json_file` switches to a structured log file instead.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub json_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tracing_level: default_tracing_level(),
            json_file: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

/// Output artifact configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct OutputsConfig {
    /// JSONL file receiving one row per turn, round and game result.
    #[serde(default)]
    pub report: Option<PathBuf>,
}

impl OutputsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(report) = &self.report {
            if report.as_os_str().is_empty() || report.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: "outputs.report".to_string(),
                    message: "path must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
