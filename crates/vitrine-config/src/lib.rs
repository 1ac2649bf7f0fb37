//! Configuration management for vitrine.
//!
//! Parses `vitrine.toml` configuration files with serde and provides
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
//! - `admin.token`

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
    /// Override content document path.
    pub content_file: Option<PathBuf>,
    /// Override upload directory.
    pub uploads_dir: Option<PathBuf>,
    /// Override frontend directory.
    pub frontend_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "vitrine.toml";

/// Default request body limit for uploads (10 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Content document configuration (paths are relative strings from TOML).
    #[serde(default)]
    content: ContentConfigRaw,
    /// Upload configuration (paths are relative strings from TOML).
    #[serde(default)]
    uploads: UploadsConfigRaw,
    /// Frontend configuration (paths are relative strings from TOML).
    #[serde(default)]
    frontend: FrontendConfigRaw,
    /// Admin gate configuration.
    pub admin: AdminConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Resolved uploads configuration (set after loading).
    #[serde(skip)]
    pub uploads_resolved: UploadsConfig,
    /// Resolved frontend configuration (set after loading).
    #[serde(skip)]
    pub frontend_resolved: FrontendConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
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
            port: 7070,
        }
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    file: Option<String>,
    seed: Option<bool>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Path of the JSON content document.
    pub file: PathBuf,
    /// Write the seed document on startup when the file is missing.
    pub seed: bool,
}

/// Raw uploads configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct UploadsConfigRaw {
    dir: Option<String>,
    public_prefix: Option<String>,
    max_upload_bytes: Option<usize>,
}

/// Resolved uploads configuration with absolute paths.
#[derive(Debug)]
pub struct UploadsConfig {
    /// Directory receiving uploaded image files.
    pub dir: PathBuf,
    /// URL prefix under which the upload directory is served.
    pub public_prefix: String,
    /// Request body limit for the upload endpoint.
    pub max_upload_bytes: usize,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::new(),
            public_prefix: "/portfolio".to_owned(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Raw frontend configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FrontendConfigRaw {
    dir: Option<String>,
}

/// Resolved frontend configuration with absolute paths.
#[derive(Debug, Default)]
pub struct FrontendConfig {
    /// Directory holding the built frontend (served with SPA fallback).
    pub dir: PathBuf,
}

/// Admin gate configuration.
///
/// The token is a UI gate for the admin panel, not an access-control
/// mechanism; see the server crate documentation.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AdminConfig {
    /// Shared token required on mutating API routes when set.
    pub token: Option<String>,
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
        /// Config field path (e.g., "`admin.token`").
        field: String,
        /// Error message (e.g., "${`VITRINE_ADMIN_TOKEN`} not set").
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

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `vitrine.toml` in current directory and parents.
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
            Self::default_with_cwd()
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
        if let Some(content_file) = &settings.content_file {
            self.content_resolved.file.clone_from(content_file);
        }
        if let Some(uploads_dir) = &settings.uploads_dir {
            self.uploads_resolved.dir.clone_from(uploads_dir);
        }
        if let Some(frontend_dir) = &settings.frontend_dir {
            self.frontend_resolved.dir.clone_from(frontend_dir);
        }
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

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            content: ContentConfigRaw::default(),
            uploads: UploadsConfigRaw::default(),
            frontend: FrontendConfigRaw::default(),
            admin: AdminConfig::default(),
            content_resolved: ContentConfig {
                file: base.join("data/content.json"),
                seed: false,
            },
            uploads_resolved: UploadsConfig {
                dir: base.join("public/portfolio"),
                ..UploadsConfig::default()
            },
            frontend_resolved: FrontendConfig {
                dir: base.join("frontend/dist"),
            },
            config_path: None,
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

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        let prefix = &self.uploads_resolved.public_prefix;
        require_non_empty(prefix, "uploads.public_prefix")?;
        if !prefix.starts_with('/') {
            return Err(ConfigError::Validation(
                "uploads.public_prefix must start with /".to_owned(),
            ));
        }
        if prefix.len() > 1 && prefix.ends_with('/') {
            return Err(ConfigError::Validation(
                "uploads.public_prefix must not end with /".to_owned(),
            ));
        }

        if self.uploads_resolved.max_upload_bytes == 0 {
            return Err(ConfigError::Validation(
                "uploads.max_upload_bytes must be greater than 0".to_owned(),
            ));
        }

        if let Some(token) = &self.admin.token {
            require_non_empty(token, "admin.token")?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(token) = &self.admin.token {
            self.admin.token = Some(expand::expand_env(token, "admin.token")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.content_resolved = ContentConfig {
            file: resolve(self.content.file.as_deref(), "data/content.json"),
            seed: self.content.seed.unwrap_or(false),
        };

        self.uploads_resolved = UploadsConfig {
            dir: resolve(self.uploads.dir.as_deref(), "public/portfolio"),
            public_prefix: self
                .uploads
                .public_prefix
                .clone()
                .unwrap_or_else(|| "/portfolio".to_owned()),
            max_upload_bytes: self
                .uploads
                .max_upload_bytes
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        };

        self.frontend_resolved = FrontendConfig {
            dir: resolve(self.frontend.dir.as_deref(), "frontend/dist"),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7070);
        assert_eq!(
            config.content_resolved.file,
            PathBuf::from("/test/data/content.json")
        );
        assert_eq!(
            config.uploads_resolved.dir,
            PathBuf::from("/test/public/portfolio")
        );
        assert_eq!(config.uploads_resolved.public_prefix, "/portfolio");
        assert_eq!(
            config.uploads_resolved.max_upload_bytes,
            DEFAULT_MAX_UPLOAD_BYTES
        );
        assert_eq!(
            config.frontend_resolved.dir,
            PathBuf::from("/test/frontend/dist")
        );
        assert!(config.admin.token.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7070);
    }

    #[test]
    fn test_parse_server_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[content]
file = "content/site.json"

[uploads]
dir = "static/images"
public_prefix = "/images"

[frontend]
dir = "dist"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.content_resolved.file,
            PathBuf::from("/project/content/site.json")
        );
        assert_eq!(
            config.uploads_resolved.dir,
            PathBuf::from("/project/static/images")
        );
        assert_eq!(config.uploads_resolved.public_prefix, "/images");
        assert_eq!(config.frontend_resolved.dir, PathBuf::from("/project/dist"));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("vitrine.toml");
        std::fs::write(
            &path,
            r#"
[content]
file = "site.json"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.content_resolved.file, tmp.path().join("site.json"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file_errors() {
        let err = Config::load(Some(Path::new("/nonexistent/vitrine.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(9000),
            content_file: Some(PathBuf::from("/custom/content.json")),
            uploads_dir: Some(PathBuf::from("/custom/uploads")),
            frontend_dir: None,
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.content_resolved.file,
            PathBuf::from("/custom/content.json")
        );
        assert_eq!(config.uploads_resolved.dir, PathBuf::from("/custom/uploads"));
        // Unchanged
        assert_eq!(
            config.frontend_resolved.dir,
            PathBuf::from("/test/frontend/dist")
        );
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let before = Config::default_with_base(Path::new("/test"));
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.host, before.server.host);
        assert_eq!(config.server.port, before.server.port);
        assert_eq!(config.content_resolved.file, before.content_resolved.file);
    }

    #[test]
    fn test_expand_env_vars_admin_token() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("VITRINE_TEST_TOKEN", "secret-token");
        }

        let toml = r#"
[admin]
token = "${VITRINE_TEST_TOKEN}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.admin.token.as_deref(), Some("secret-token"));

        unsafe {
            std::env::remove_var("VITRINE_TEST_TOKEN");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        unsafe {
            std::env::remove_var("VITRINE_MISSING_TOKEN_TEST");
        }

        let toml = r#"
[admin]
token = "${VITRINE_MISSING_TOKEN_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let result = config.expand_env_vars();

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("admin.token"));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = String::new();
        assert_validation_error(&config, &["server.host", "empty"]);
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;
        assert_validation_error(&config, &["server.port"]);
    }

    #[test]
    fn test_validate_public_prefix_must_start_with_slash() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.uploads_resolved.public_prefix = "portfolio".to_owned();
        assert_validation_error(&config, &["public_prefix", "start with /"]);
    }

    #[test]
    fn test_validate_public_prefix_no_trailing_slash() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.uploads_resolved.public_prefix = "/portfolio/".to_owned();
        assert_validation_error(&config, &["public_prefix", "end with /"]);
    }

    #[test]
    fn test_validate_max_upload_bytes_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.uploads_resolved.max_upload_bytes = 0;
        assert_validation_error(&config, &["max_upload_bytes"]);
    }

    #[test]
    fn test_validate_empty_admin_token() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.admin.token = Some(String::new());
        assert_validation_error(&config, &["admin.token", "empty"]);
    }

    #[test]
    fn test_validate_absent_admin_token_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }
}
