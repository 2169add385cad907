//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.cardraw/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! Loading and resolving happen before the logger exists (the log file is
//! itself a setting), so diagnostics are collected as [`Notice`]s and
//! emitted by the caller once logging is up.

use log::Level;
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CardrawConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Diagnostics from loading this file.
    #[serde(skip)]
    pub notices: Vec<Notice>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub deck_path: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: Option<String>,
}

/// A diagnostic recorded while loading or resolving config.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DECK_PATH: &str = "cards.json";
pub const DEFAULT_LOG_FILE: &str = "cardraw.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options except the seed)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub deck_path: PathBuf,
    /// `None` draws from the thread RNG.
    pub seed: Option<u64>,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    /// Everything noticed on the way, in order. Log after logger init.
    pub notices: Vec<Notice>,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub deck_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.cardraw/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".cardraw").join("config.toml"))
}

/// Load config from `~/.cardraw/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `CardrawConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<CardrawConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            let mut config = CardrawConfig::default();
            config.notices.push(Notice::new(
                Level::Warn,
                "Could not determine home directory, using default config",
            ));
            Ok(config)
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<CardrawConfig, ConfigError> {
    if !path.exists() {
        let mut config = CardrawConfig::default();
        config.notices.push(Notice::new(
            Level::Info,
            format!("No config file found, generating default at {}", path.display()),
        ));
        if let Err(message) = generate_default_config(path) {
            config.notices.push(Notice::new(Level::Warn, message));
        }
        return Ok(config);
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: CardrawConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    let summary = format!("Config: {:?} {:?}", config.general, config.logging);
    config.notices.push(Notice::new(
        Level::Info,
        format!("Loaded config from {}", path.display()),
    ));
    config.notices.push(Notice::new(Level::Debug, summary));
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> Result<(), String> {
    let default_content = r#"# Cardraw Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# deck_path = "cards.json"     # Or set CARDRAW_DECK env var
# seed = 42                    # Fixed seed for reproducible draws (CARDRAW_SEED)

# [logging]
# file = "cardraw.log"         # Or set CARDRAW_LOG_FILE env var
# level = "debug"              # "off", "error", "warn", "info", "debug", "trace"
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {e}"))?;
    }
    fs::write(path, default_content).map_err(|e| format!("Failed to write default config: {e}"))
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &CardrawConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an explicit environment lookup.
pub fn resolve_with_env(
    config: &CardrawConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let mut notices = config.notices.clone();

    // Deck: CLI → env → config → default
    let deck_path = cli
        .deck_path
        .clone()
        .or_else(|| env("CARDRAW_DECK").map(PathBuf::from))
        .or_else(|| config.general.deck_path.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DECK_PATH));

    // Seed: CLI → env → config → none
    let seed = cli
        .seed
        .or_else(|| {
            env("CARDRAW_SEED").and_then(|raw| {
                parse_seed(&raw)
                    .map_err(|message| notices.push(Notice::new(Level::Warn, message)))
                    .ok()
            })
        })
        .or(config.general.seed);

    // Log file: CLI → env → config → default
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| env("CARDRAW_LOG_FILE").map(PathBuf::from))
        .or_else(|| config.logging.file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let log_level = config
        .logging
        .level
        .as_deref()
        .and_then(|raw| {
            parse_level(raw)
                .map_err(|message| notices.push(Notice::new(Level::Warn, message)))
                .ok()
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        deck_path,
        seed,
        log_file,
        log_level,
        notices,
    }
}

fn parse_seed(raw: &str) -> Result<u64, String> {
    raw.trim()
        .parse()
        .map_err(|e| format!("Ignoring CARDRAW_SEED={raw:?}: {e}"))
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("Unknown log level {raw:?}, using default"))
}
