//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.postlist/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PostListConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
pub const DEFAULT_LOG_FILE: &str = "postlist.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    /// A level name that didn't parse; `log_level` fell back to the default.
    pub rejected_log_level: Option<String>,
}

/// Values from CLI flags; `None` means the flag was not given.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
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

/// Returns the path to `~/.postlist/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".postlist").join("config.toml"))
}

/// Where the loaded settings came from. Loading happens before the logger
/// exists, so this is reported afterwards with [`ConfigSource::log`].
#[derive(Debug, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Generated(PathBuf),
    GenerateFailed { path: PathBuf, reason: String },
    NoHomeDir,
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded config from {}", path.display()),
            ConfigSource::Generated(path) => {
                info!("No config file found, generated default at {}", path.display())
            }
            ConfigSource::GenerateFailed { path, reason } => warn!(
                "No config file found, failed to write default at {}: {}",
                path.display(),
                reason
            ),
            ConfigSource::NoHomeDir => {
                warn!("Could not determine home directory, using default config")
            }
        }
    }
}

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: PostListConfig,
    pub source: ConfigSource,
}

/// Load config from `~/.postlist/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PostListConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LoadedConfig, ConfigError> {
    let Some(path) = config_path() else {
        return Ok(LoadedConfig {
            config: PostListConfig::default(),
            source: ConfigSource::NoHomeDir,
        });
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<LoadedConfig, ConfigError> {
    if !path.exists() {
        let source = match generate_default_config(path) {
            Ok(()) => ConfigSource::Generated(path.to_path_buf()),
            Err(e) => ConfigSource::GenerateFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        };
        return Ok(LoadedConfig {
            config: PostListConfig::default(),
            source,
        });
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PostListConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    Ok(LoadedConfig {
        config,
        source: ConfigSource::File(path.to_path_buf()),
    })
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# PostList Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "https://gorest.co.in/public/v2"   # Or set POSTLIST_BASE_URL

# [logging]
# level = "info"             # "off", "error", "warn", "info", "debug", "trace"
# file = "postlist.log"      # Or set POSTLIST_LOG_FILE
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PostListConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |name| std::env::var(name).ok())
}

fn resolve_with_env(
    config: &PostListConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("POSTLIST_BASE_URL"))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| env("POSTLIST_LOG_LEVEL"))
        .or_else(|| config.logging.level.clone());
    let (log_level, rejected_log_level) = match log_level {
        None => (DEFAULT_LOG_LEVEL, None),
        Some(name) => match parse_level(&name) {
            Some(level) => (level, None),
            None => (DEFAULT_LOG_LEVEL, Some(name)),
        },
    };

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| env("POSTLIST_LOG_FILE"))
        .or_else(|| config.logging.file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        base_url,
        log_level,
        log_file: PathBuf::from(log_file),
        rejected_log_level,
    }
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    level.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&PostListConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, "https://gorest.co.in/public/v2");
        assert_eq!(resolved.log_level, LevelFilter::Info);
        assert_eq!(resolved.log_file, PathBuf::from("postlist.log"));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = PostListConfig {
            api: ApiConfig {
                base_url: Some("http://localhost:8080".to_string()),
            },
            logging: LoggingConfig {
                level: Some("debug".to_string()),
                file: Some("/tmp/posts.log".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, "http://localhost:8080");
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/posts.log"));
    }

    #[test]
    fn test_env_wins_over_config_and_cli_wins_over_env() {
        let config = PostListConfig {
            api: ApiConfig {
                base_url: Some("http://from-config".to_string()),
            },
            ..Default::default()
        };
        let env = |name: &str| match name {
            "POSTLIST_BASE_URL" => Some("http://from-env".to_string()),
            "POSTLIST_LOG_LEVEL" => Some("warn".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.base_url, "http://from-env");
        assert_eq!(resolved.log_level, LevelFilter::Warn);

        let cli = CliOverrides {
            base_url: Some("http://from-cli".to_string()),
            log_level: Some("trace".to_string()),
            log_file: None,
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.base_url, "http://from-cli");
        assert_eq!(resolved.log_level, LevelFilter::Trace);
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let cli = CliOverrides {
            log_level: Some("chatty".to_string()),
            ..Default::default()
        };
        let resolved = resolve_with_env(&PostListConfig::default(), &cli, no_env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(resolved.rejected_log_level.as_deref(), Some("chatty"));

        let resolved = resolve_with_env(&PostListConfig::default(), &CliOverrides::default(), no_env);
        assert!(resolved.rejected_log_level.is_none());
    }

    #[test]
    fn test_toml_parses() {
        let toml_str = r#"
[api]
base_url = "https://example.com/v2"

[logging]
level = "debug"
file = "debug.log"
"#;
        let config: PostListConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("https://example.com/v2"));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.file.as_deref(), Some("debug.log"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[logging]
level = "warn"
"#;
        let config: PostListConfig = toml::from_str(toml_str).unwrap();
        assert!(config.api.base_url.is_none());
        assert!(config.logging.file.is_none());
        assert_eq!(config.logging.level.as_deref(), Some("warn"));
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = std::env::temp_dir().join(format!("postlist-config-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let loaded = load_config_from(&path).unwrap();
        assert!(loaded.config.api.base_url.is_none());
        assert_eq!(loaded.source, ConfigSource::Generated(path.clone()));
        assert!(path.exists());

        // The generated file is all comments, so it parses back to defaults
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.config.api.base_url.is_none());
        assert!(reloaded.config.logging.level.is_none());
        assert_eq!(reloaded.source, ConfigSource::File(path.clone()));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("postlist-config-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[api\nbase_url = ").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unwritable_default_is_reported_not_fatal() {
        let dir = std::env::temp_dir().join(format!("postlist-config-blocked-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        // A plain file where the config directory should be
        fs::write(&dir, "").unwrap();
        let path = dir.join("config.toml");

        let loaded = load_config_from(&path).unwrap();
        assert!(loaded.config.api.base_url.is_none());
        assert!(matches!(
            loaded.source,
            ConfigSource::GenerateFailed { path: ref p, .. } if *p == path
        ));

        let _ = fs::remove_file(&dir);
    }
}
