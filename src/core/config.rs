//! # Configuration
//!
//! Decides which node endpoint the explorer talks to, with a clear override
//! hierarchy:
//!
//! ```text
//! --url  →  --chain  →  BLOCKSCOPE_URL  →  config `default`
//! ```
//!
//! The config file is `settings.toml` in the working directory, falling back
//! to `~/.blockscope/settings.toml`. It names chains so `--chain` can pick one:
//!
//! ```toml
//! default = "mainnet"
//!
//! [chains.mainnet]
//! url = "https://eth.example.org"
//! ```

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "settings.toml";
pub const URL_ENV_VAR: &str = "BLOCKSCOPE_URL";

// ============================================================================
// Config Structs
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ExplorerConfig {
    /// Name of the chain used when nothing else selects one.
    pub default: Option<String>,
    #[serde(default)]
    pub chains: HashMap<String, ChainEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainEntry {
    pub url: String,
}

impl ExplorerConfig {
    fn chain_url(&self, name: &str) -> Result<String, ConfigError> {
        self.chains
            .get(name)
            .map(|entry| entry.url.clone())
            .ok_or_else(|| {
                let mut known: Vec<&str> = self.chains.keys().map(String::as_str).collect();
                known.sort_unstable();
                let known = if known.is_empty() {
                    "none configured".to_string()
                } else {
                    known.join(", ")
                };
                ConfigError::Resolve(format!("unknown chain '{name}' (known: {known})"))
            })
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// The settings do not name a usable endpoint.
    Resolve(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Resolve(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// The first existing of `./settings.toml` and `~/.blockscope/settings.toml`.
pub fn config_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::home_dir()
        .map(|h| h.join(".blockscope").join(CONFIG_FILE_NAME))
        .filter(|p| p.exists())
}

/// Load the config file if there is one. A missing file yields the empty
/// config; a malformed one is an error.
pub fn load_config() -> Result<ExplorerConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            info!("No {} found, using empty config", CONFIG_FILE_NAME);
            Ok(ExplorerConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<ExplorerConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ExplorerConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the endpoint URL: CLI → env → config.
pub fn resolve_endpoint(
    config: &ExplorerConfig,
    cli_url: Option<&str>,
    cli_chain: Option<&str>,
) -> Result<String, ConfigError> {
    let env_url = std::env::var(URL_ENV_VAR).ok();
    resolve_endpoint_with(config, cli_url, cli_chain, env_url.as_deref())
}

fn resolve_endpoint_with(
    config: &ExplorerConfig,
    cli_url: Option<&str>,
    cli_chain: Option<&str>,
    env_url: Option<&str>,
) -> Result<String, ConfigError> {
    match (cli_url, cli_chain) {
        (Some(_), Some(_)) => Err(ConfigError::Resolve(
            "--url and --chain cannot be used together".to_string(),
        )),
        (Some(url), None) => Ok(url.to_string()),
        (None, Some(name)) => config.chain_url(name),
        (None, None) => {
            if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
                debug!("Endpoint from {}", URL_ENV_VAR);
                return Ok(url.to_string());
            }
            match &config.default {
                Some(name) => config.chain_url(name),
                None => Err(ConfigError::Resolve(format!(
                    "no endpoint: pass --url or --chain, set {URL_ENV_VAR}, \
                     or set `default` in {CONFIG_FILE_NAME}"
                ))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> ExplorerConfig {
        toml::from_str(
            r#"
default = "mainnet"

[chains.mainnet]
url = "https://mainnet.example"

[chains.local]
url = "http://localhost:8545"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_toml_parses_chains() {
        let config = sample_config();
        assert_eq!(config.default.as_deref(), Some("mainnet"));
        assert_eq!(config.chains.len(), 2);
        assert_eq!(config.chains["local"].url, "http://localhost:8545");
    }

    #[test]
    fn test_empty_toml_parses() {
        let config: ExplorerConfig = toml::from_str("").unwrap();
        assert!(config.default.is_none());
        assert!(config.chains.is_empty());
    }

    #[test]
    fn test_cli_url_wins() {
        let url = resolve_endpoint_with(
            &sample_config(),
            Some("http://cli"),
            None,
            Some("http://env"),
        )
        .unwrap();
        assert_eq!(url, "http://cli");
    }

    #[test]
    fn test_cli_chain_wins_over_env() {
        let url =
            resolve_endpoint_with(&sample_config(), None, Some("local"), Some("http://env"))
                .unwrap();
        assert_eq!(url, "http://localhost:8545");
    }

    #[test]
    fn test_env_wins_over_config_default() {
        let url = resolve_endpoint_with(&sample_config(), None, None, Some("http://env")).unwrap();
        assert_eq!(url, "http://env");
    }

    #[test]
    fn test_config_default_used_last() {
        let url = resolve_endpoint_with(&sample_config(), None, None, None).unwrap();
        assert_eq!(url, "https://mainnet.example");
    }

    #[test]
    fn test_url_and_chain_conflict() {
        let err = resolve_endpoint_with(&sample_config(), Some("http://x"), Some("local"), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Resolve(_)));
    }

    #[test]
    fn test_unknown_chain_lists_known() {
        let err =
            resolve_endpoint_with(&sample_config(), None, Some("goerli"), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown chain 'goerli' (known: local, mainnet)"
        );
    }

    #[test]
    fn test_nothing_configured_is_error() {
        let err = resolve_endpoint_with(&ExplorerConfig::default(), None, None, None).unwrap_err();
        assert!(err.to_string().starts_with("no endpoint"));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = std::env::temp_dir().join(format!("blockscope-bad-{}.toml", std::process::id()));
        fs::write(&path, "default = [").unwrap();
        let result = load_config_from(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config_from(Path::new("/nonexistent/blockscope/settings.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
