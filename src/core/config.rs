//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.apinav/config.toml` unless `--config` names another
//! file. If the default file is missing on first run, a commented-out
//! default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApinavConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

/// Colours as written in the file; parsed into a `Theme` by the TUI.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ThemeConfig {
    pub accent: Option<String>,
    pub get: Option<String>,
    pub post: Option<String>,
    pub put: Option<String>,
    pub patch: Option<String>,
    pub delete: Option<String>,
    pub deprecated: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
pub const DEFAULT_LOG_FILE: &str = "apinav.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub theme: ThemeConfig,
    /// Problems found while resolving. The logger isn't running yet at that
    /// point, so `main` logs these once it is.
    pub warnings: Vec<String>,
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

/// Returns the path to `~/.apinav/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".apinav").join("config.toml"))
}

/// Load config from `explicit`, or from `~/.apinav/config.toml`.
///
/// A missing explicit file is an error. A missing default file is generated
/// and `ApinavConfig::default()` returned. A malformed file is
/// `ConfigError::Parse` either way.
pub fn load_config(explicit: Option<&Path>) -> Result<ApinavConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => {
                warn!("Could not determine home directory, using default config");
                return Ok(ApinavConfig::default());
            }
        },
    };

    if explicit.is_none() && !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ApinavConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<ApinavConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

const DEFAULT_CONFIG_CONTENT: &str = r##"# apinav Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "info"          # off, error, warn, info, debug, trace (or APINAV_LOG_LEVEL)
# log_file = "apinav.log"     # Or set APINAV_LOG_FILE

# Colours: names ("blue"), hex ("#ff8800") or 256-colour indexes ("33").
# [theme]
# accent = "70"
# get = "33"
# post = "35"
# put = "148"
# patch = "218"
# delete = "172"
# deprecated = "246"
"##;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Values taken from the command line. `None` means not given.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub log_level: Option<&'a str>,
    pub log_file: Option<&'a Path>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ApinavConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with the environment lookup injected.
pub fn resolve_with_env(
    config: &ApinavConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let mut warnings = Vec::new();

    // Log level: CLI → env → config → default
    let raw_level = cli
        .log_level
        .map(str::to_string)
        .or_else(|| env("APINAV_LOG_LEVEL"))
        .or_else(|| config.general.log_level.clone());
    let log_level = match raw_level {
        Some(s) => s.parse::<LevelFilter>().unwrap_or_else(|_| {
            warnings.push(format!("unknown log level {s:?}, using {DEFAULT_LOG_LEVEL}"));
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    // Log file: CLI → env → config → default
    let log_file = cli
        .log_file
        .map(Path::to_path_buf)
        .or_else(|| env("APINAV_LOG_FILE").map(PathBuf::from))
        .or_else(|| config.general.log_file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    ResolvedConfig {
        log_level,
        log_file,
        theme: config.theme.clone(),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&ApinavConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.log_level, LevelFilter::Info);
        assert_eq!(resolved.log_file, PathBuf::from("apinav.log"));
        assert!(resolved.theme.get.is_none());
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ApinavConfig {
            general: GeneralConfig {
                log_level: Some("debug".to_string()),
                log_file: Some("/tmp/custom.log".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/custom.log"));
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = ApinavConfig {
            general: GeneralConfig {
                log_level: Some("debug".to_string()),
                log_file: None,
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "APINAV_LOG_LEVEL" => Some("warn".to_string()),
            "APINAV_LOG_FILE" => Some("env.log".to_string()),
            _ => None,
        };

        let from_env = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(from_env.log_level, LevelFilter::Warn);
        assert_eq!(from_env.log_file, PathBuf::from("env.log"));

        let cli = CliOverrides {
            log_level: Some("trace"),
            log_file: Some(Path::new("cli.log")),
        };
        let from_cli = resolve_with_env(&config, &cli, env);
        assert_eq!(from_cli.log_level, LevelFilter::Trace);
        assert_eq!(from_cli.log_file, PathBuf::from("cli.log"));
    }

    #[test]
    fn test_bad_log_level_falls_back_with_warning() {
        let cli = CliOverrides {
            log_level: Some("loud"),
            log_file: None,
        };
        let resolved = resolve_with_env(&ApinavConfig::default(), &cli, no_env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(resolved.warnings.len(), 1);
        assert!(resolved.warnings[0].contains("loud"));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r##"
[general]
log_level = "error"
log_file = "browse.log"

[theme]
accent = "#00ff00"
get = "blue"
delete = "172"
"##;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.general.log_level.as_deref(), Some("error"));
        assert_eq!(config.general.log_file.as_deref(), Some("browse.log"));
        assert_eq!(config.theme.accent.as_deref(), Some("#00ff00"));
        assert_eq!(config.theme.get.as_deref(), Some("blue"));
        assert_eq!(config.theme.delete.as_deref(), Some("172"));
        assert!(config.theme.post.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let config = parse_config("[theme]\npost = \"magenta\"\n").unwrap();
        assert_eq!(config.theme.post.as_deref(), Some("magenta"));
        assert!(config.general.log_level.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = parse_config("[general\nlog_level = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }

    #[test]
    fn test_generated_default_is_valid_toml() {
        let config = parse_config(DEFAULT_CONFIG_CONTENT).unwrap();
        assert!(config.general.log_file.is_none());
        assert!(config.theme.accent.is_none());
    }

    #[test]
    fn test_missing_explicit_config_is_io_error() {
        let path = std::env::temp_dir().join("apinav-no-such-dir").join("config.toml");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_explicit_config_file_is_read() {
        let path = std::env::temp_dir().join(format!("apinav-config-{}.toml", std::process::id()));
        fs::write(&path, "[general]\nlog_level = \"off\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(config.general.log_level.as_deref(), Some("off"));
    }
}
