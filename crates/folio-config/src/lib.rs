//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `store.project_id`
//! - `store.dataset`
//! - `store.token`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Serve from a dataset export instead of the remote store.
    pub export_file: Option<PathBuf>,
    /// Override the CDN flag.
    pub use_cdn: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Default content store API version.
const DEFAULT_API_VERSION: &str = "2025-07-18";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Content store connection (optional section).
    store: Option<StoreConfigRaw>,
    /// Listing sizes.
    pub content: ContentConfig,

    /// Resolved store configuration (set after loading).
    #[serde(skip)]
    pub store_resolved: Option<StoreConfig>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

/// Raw store configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize)]
struct StoreConfigRaw {
    project_id: String,
    dataset: String,
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default)]
    use_cdn: bool,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(default)]
    export_file: Option<String>,
}

/// Resolved content store connection parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Project identifier.
    pub project_id: String,
    /// Dataset name.
    pub dataset: String,
    /// API version (`YYYY-MM-DD` or `1`).
    pub api_version: String,
    /// Query the CDN endpoint instead of the live API.
    pub use_cdn: bool,
    /// Read token for private datasets.
    pub token: Option<String>,
    /// Global HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Dataset export to serve from instead of the remote API.
    pub export_file: Option<PathBuf>,
}

impl StoreConfig {
    /// Create a store configuration with default API version and timeout.
    #[must_use]
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
            api_version: DEFAULT_API_VERSION.to_owned(),
            use_cdn: false,
            token: None,
            timeout_secs: 30,
            export_file: None,
        }
    }

    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.project_id, "store.project_id")?;
        require_identifier(&self.project_id, "store.project_id")?;
        require_non_empty(&self.dataset, "store.dataset")?;
        require_identifier(&self.dataset, "store.dataset")?;
        require_api_version(&self.api_version)?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "store.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Listing sizes for the homepage sections.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Number of posts in the "latest" listing.
    pub latest_posts_limit: usize,
    /// Number of projects in the "featured" listing.
    pub featured_projects_limit: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            latest_posts_limit: 6,
            featured_projects_limit: 6,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`store.token`").
        field: String,
        /// Error message (e.g., "${`SANITY_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a project id or dataset name: lowercase alphanumerics, `-` and `_`.
fn require_identifier(value: &str, field: &str) -> Result<(), ConfigError> {
    let valid = value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if !valid {
        return Err(ConfigError::Validation(format!(
            "{field} may only contain lowercase letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}

/// Require an API version of `1` or a `YYYY-MM-DD` date.
fn require_api_version(version: &str) -> Result<(), ConfigError> {
    if version == "1" {
        return Ok(());
    }
    let parts: Vec<&str> = version.split('-').collect();
    let shaped = parts.len() == 3
        && parts[0].len() == 4
        && parts[1].len() == 2
        && parts[2].len() == 2
        && parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit()));
    if !shaped {
        return Err(ConfigError::Validation(format!(
            "store.api_version must be \"1\" or a YYYY-MM-DD date, got \"{version}\""
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(store) = self.store_resolved.as_mut() {
            if let Some(export_file) = &settings.export_file {
                store.export_file = Some(export_file.clone());
            }
            if let Some(use_cdn) = settings.use_cdn {
                store.use_cdn = use_cdn;
            }
        }
    }

    /// Get validated store configuration.
    ///
    /// Returns the store config if the `[store]` section is present and all
    /// fields are valid. Commands that talk to the content store use this
    /// instead of reading `store_resolved` directly.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_store(&self) -> Result<&StoreConfig, ConfigError> {
        let store = self.store_resolved.as_ref().ok_or_else(|| {
            ConfigError::Validation("[store] section required in config".into())
        })?;
        store.validate()?;
        Ok(store)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading from file. The `[store]` section is
    /// validated lazily by [`require_store`](Self::require_store).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_content()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate listing sizes.
    fn validate_content(&self) -> Result<(), ConfigError> {
        if self.content.latest_posts_limit == 0 {
            return Err(ConfigError::Validation(
                "content.latest_posts_limit must be greater than 0".to_owned(),
            ));
        }
        if self.content.featured_projects_limit == 0 {
            return Err(ConfigError::Validation(
                "content.featured_projects_limit must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref mut store) = self.store {
            store.project_id = expand::expand_env(&store.project_id, "store.project_id")?;
            store.dataset = expand::expand_env(&store.dataset, "store.dataset")?;
            if let Some(ref token) = store.token {
                let token = expand::expand_env(token, "store.token")?;
                // An empty token (e.g. `${SANITY_TOKEN:-}`) means anonymous access
                store.token = (!token.is_empty()).then_some(token);
            }
        }

        Ok(())
    }

    /// Resolve the raw `[store]` section, making `export_file` absolute.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.store_resolved = self.store.as_ref().map(|raw| StoreConfig {
            project_id: raw.project_id.clone(),
            dataset: raw.dataset.clone(),
            api_version: raw
                .api_version
                .clone()
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_owned()),
            use_cdn: raw.use_cdn,
            token: raw.token.clone(),
            timeout_secs: raw.timeout_secs.unwrap_or(30),
            export_file: raw.export_file.as_deref().map(|f| config_dir.join(f)),
        });
    }
}
