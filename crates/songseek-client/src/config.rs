use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Deserializer, Serialize};
use songseek_core::{MissingLimitPolicy, SearchOptions};
use toml_edit::DocumentMut;

use crate::fetcher::{DEFAULT_USER_AGENT, GENIUS_SEARCH_ENDPOINT};

/// Keys accepted by [`set_value_in`] and [`Config::get`].
pub const VALID_KEYS: [&str; 8] = [
    "endpoint",
    "timeout_secs",
    "user_agent",
    "default_limit",
    "missing_limit",
    "logging.level",
    "logging.coloured",
    "logging.report_caller",
];

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration for songseek.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (SONGSEEK_* prefix)
/// 3. Config file (~/.config/songseek/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search endpoint URL.
    ///
    /// Can be set via:
    /// - ENV: SONGSEEK_ENDPOINT
    /// - Config: endpoint = "..."
    pub endpoint: String,

    /// Request timeout in seconds.
    #[serde(deserialize_with = "whole_number")]
    pub timeout_secs: u64,

    /// User-agent header sent with every request.
    pub user_agent: String,

    /// Limit applied when a search is run without an explicit one.
    #[serde(deserialize_with = "optional_whole_number")]
    pub default_limit: Option<usize>,

    /// What to do when matches exist but no limit was given.
    pub missing_limit: MissingLimitPolicy,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: GENIUS_SEARCH_ENDPOINT.to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_limit: None,
            missing_limit: MissingLimitPolicy::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// The `[logging]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error.
    pub level: String,
    pub coloured: bool,
    pub report_caller: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            coloured: true,
            report_caller: false,
        }
    }
}

impl Config {
    /// Load configuration from the default config file and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `config_path` (if it exists) and environment
    /// variables with the SONGSEEK_ prefix.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("songseek");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Search options for a call, falling back to `default_limit`.
    pub fn search_options(&self, limit: Option<usize>) -> SearchOptions {
        SearchOptions {
            limit: limit.or(self.default_limit),
            missing_limit: self.missing_limit,
        }
    }

    /// Effective value of a single key, formatted for display.
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "endpoint" => self.endpoint.clone(),
            "timeout_secs" => self.timeout_secs.to_string(),
            "user_agent" => self.user_agent.clone(),
            "default_limit" => self
                .default_limit
                .map(|l| l.to_string())
                .unwrap_or_else(|| String::from("<not set>")),
            "missing_limit" => policy_name(self.missing_limit).to_string(),
            "logging.level" => self.logging.level.clone(),
            "logging.coloured" => self.logging.coloured.to_string(),
            "logging.report_caller" => self.logging.report_caller.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }
}

/// Environment overrides arrive as text, so numeric keys accept either a
/// number or a string holding one.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
}

impl NumberOrText {
    fn into_u64<E: serde::de::Error>(self) -> std::result::Result<u64, E> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected a whole number, got {:?}", text))),
        }
    }
}

fn whole_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<u64, D::Error> {
    NumberOrText::deserialize(deserializer)?.into_u64()
}

fn optional_whole_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<usize>, D::Error> {
    Option::<NumberOrText>::deserialize(deserializer)?
        .map(|n| {
            n.into_u64().and_then(|n| {
                usize::try_from(n).map_err(<D::Error as serde::de::Error>::custom)
            })
        })
        .transpose()
}

fn policy_name(policy: MissingLimitPolicy) -> &'static str {
    match policy {
        MissingLimitPolicy::Withhold => "withhold",
        MissingLimitPolicy::ReturnAll => "return_all",
    }
}

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Unknown config key: {}\n\nValid keys: {}",
        key,
        VALID_KEYS.join(", ")
    )
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/songseek/config.toml
/// - macOS: ~/Library/Application Support/songseek/config.toml
/// - Windows: %APPDATA%\songseek\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("songseek")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Songseek Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (SONGSEEK_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Search endpoint. The query is appended as ?q=<percent-encoded query>.
#endpoint = "https://genius.com/api/search/multi"

# Request timeout in seconds
#timeout_secs = 30

# Limit applied when `songseek search` is run without --limit
#default_limit = 10

# What a search returns when songs matched but no limit was given:
# - "withhold"   : return nothing and say so (default)
# - "return_all" : return every match
#missing_limit = "withhold"

[logging]
# One of: trace, debug, info, warn, error
level = "info"
coloured = true
report_caller = false
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    ensure_config_file_at(&config_file_path())
}

/// Create the example config at `config_path` if nothing is there yet.
pub fn ensure_config_file_at(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

/// Set a single key in the config file at `config_path`, keeping comments
/// and layout intact. The file is created from the example if missing.
pub fn set_value_in(config_path: &Path, key: &str, value: &str) -> Result<()> {
    let item = parse_value(key, value)?;

    ensure_config_file_at(config_path)?;
    let contents =
        std::fs::read_to_string(config_path).context("Failed to read config file")?;
    let mut doc: DocumentMut = contents.parse().context("Config file is not valid TOML")?;

    match key.split_once('.') {
        Some((table, field)) => doc[table][field] = item,
        None => doc[key] = item,
    }

    std::fs::write(config_path, doc.to_string()).context("Failed to write config file")?;

    Ok(())
}

/// Validate `value` for `key` and convert it to a typed TOML item.
fn parse_value(key: &str, value: &str) -> Result<toml_edit::Item> {
    let item = match key {
        "endpoint" | "user_agent" => toml_edit::value(value),
        "timeout_secs" => {
            let secs: u64 = value
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", key))?;
            toml_edit::value(i64::try_from(secs).context("timeout_secs is too large")?)
        }
        "default_limit" => {
            let limit: i64 = value
                .parse()
                .with_context(|| format!("{} must be a positive integer", key))?;
            if limit < 1 {
                anyhow::bail!("{} must be a positive integer", key);
            }
            toml_edit::value(limit)
        }
        "missing_limit" => {
            if !matches!(value, "withhold" | "return_all") {
                anyhow::bail!("missing_limit must be \"withhold\" or \"return_all\"");
            }
            toml_edit::value(value)
        }
        "logging.level" => {
            if !LOG_LEVELS.contains(&value) {
                anyhow::bail!("logging.level must be one of: {}", LOG_LEVELS.join(", "));
            }
            toml_edit::value(value)
        }
        "logging.coloured" | "logging.report_caller" => {
            let flag: bool = value
                .parse()
                .with_context(|| format!("{} must be true or false", key))?;
            toml_edit::value(flag)
        }
        _ => return Err(unknown_key(key)),
    };
    Ok(item)
}
