//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If either consumer credential is set, loads from environment variables
//! 2. If neither is set, falls back to a file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `TWITKIT_CONSUMER_KEY`: App consumer key (required)
//! - `TWITKIT_CONSUMER_SECRET`: App consumer secret (required)
//! - `TWITKIT_API_BASE_URL`: REST host
//! - `TWITKIT_UPLOAD_BASE_URL`: Media upload host
//! - `TWITKIT_TIMEOUT_SECS`: Request timeout in seconds
//! - `TWITKIT_CONNECT_TIMEOUT_SECS`: Connect timeout in seconds
//! - `TWITKIT_USER_AGENT`: User-Agent header
//! - `TWITKIT_MAX_ATTEMPTS`: Total attempts per request
//! - `TWITKIT_CA_CERT`: Extra PEM root certificate
//! - `TWITKIT_HTTPS_ONLY`: Refuse plain HTTP (true/false)
//! - `TWITKIT_SYSTEM_PROXY`: Honor `HTTPS_PROXY`/`HTTP_PROXY` (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./twitkit.json` or `./twitkit.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use twitkit_domain::{
    ApiEndpoint, AuthConfig, KitConfig, Result, TlsConfig, TransportConfig, TwitterError,
};

/// Load configuration with automatic fallback strategy
///
/// Environment variables win once either consumer credential is set there;
/// any error in them is returned as is. With neither set, falls back to
/// loading from a config file.
///
/// # Errors
/// Returns `TwitterError::Configuration` if:
/// - An environment variable is missing or has an invalid value
/// - No config file is found
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<KitConfig> {
    if env_opt("TWITKIT_CONSUMER_KEY").is_none() && env_opt("TWITKIT_CONSUMER_SECRET").is_none() {
        tracing::debug!("No consumer credentials in environment, trying file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// Consumer key and secret must be present; everything else falls back to
/// the defaults.
///
/// # Errors
/// Returns `TwitterError::Configuration` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<KitConfig> {
    let auth =
        AuthConfig::new(env_var("TWITKIT_CONSUMER_KEY")?, env_var("TWITKIT_CONSUMER_SECRET")?);

    let mut endpoint = ApiEndpoint::default();
    if let Some(url) = env_opt("TWITKIT_API_BASE_URL") {
        endpoint.base_url = url;
    }
    if let Some(url) = env_opt("TWITKIT_UPLOAD_BASE_URL") {
        endpoint.upload_url = url;
    }

    let mut transport = TransportConfig::default();
    if let Some(secs) = env_parse::<u64>("TWITKIT_TIMEOUT_SECS")? {
        transport.timeout_secs = secs;
    }
    if let Some(secs) = env_parse::<u64>("TWITKIT_CONNECT_TIMEOUT_SECS")? {
        transport.connect_timeout_secs = secs;
    }
    if let Some(agent) = env_opt("TWITKIT_USER_AGENT") {
        transport.user_agent = agent;
    }
    if let Some(attempts) = env_parse::<usize>("TWITKIT_MAX_ATTEMPTS")? {
        transport.max_attempts = attempts;
    }

    let mut tls = TlsConfig::default();
    if let Some(path) = env_opt("TWITKIT_CA_CERT") {
        tls.root_certificates.push(PathBuf::from(path));
    }
    tls.https_only = env_bool("TWITKIT_HTTPS_ONLY", false);
    transport.system_proxy = env_bool("TWITKIT_SYSTEM_PROXY", transport.system_proxy);

    let config = KitConfig { auth, endpoint, tls, transport };
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `TwitterError::Configuration` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<KitConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TwitterError::Configuration(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            TwitterError::Configuration(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path).map_err(|e| {
        TwitterError::Configuration(format!("Failed to read config file: {}", e))
    })?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<KitConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TwitterError::Configuration(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TwitterError::Configuration(format!("Invalid JSON format: {}", e))),
        _ => Err(TwitterError::Configuration(format!(
            "Unsupported config format: {}",
            extension
        ))),
    }
}

/// Blank credentials read from a config source surface as `Configuration`.
fn validate(config: &KitConfig) -> Result<()> {
    config.auth.validate().map_err(|e| TwitterError::Configuration(e.to_string()))?;
    if config.transport.max_attempts == 0 {
        return Err(TwitterError::Configuration("max_attempts must be at least 1".into()));
    }
    Ok(())
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_files(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_files(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_files(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("twitkit.json"),
        dir.join("twitkit.toml"),
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `TwitterError::Configuration` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        TwitterError::Configuration(format!("Missing required environment variable: {}", key))
    })
}

/// Optional variable; empty values count as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| {
                TwitterError::Configuration(format!("Invalid value for {}: {}", key, e))
            })
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
