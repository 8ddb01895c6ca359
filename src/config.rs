//! Configuration management for the Smartcar demo server.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Configuration is read once at startup into an
//! immutable [`Config`] record; nothing mutates it afterwards.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, fmt, path::PathBuf, str::FromStr};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_SCOPE: &str = "read_vehicle_info read_location read_odometer control_security";
pub const DEFAULT_AUTH_URL: &str = "https://connect.smartcar.com/oauth/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://auth.smartcar.com/oauth/token";
pub const DEFAULT_API_URL: &str = "https://api.smartcar.com/v2.0";
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Errors raised while building the [`Config`] record.
///
/// Every variant is fatal: the binary reports it and exits before binding
/// the listener.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("PORT must be a port number, got {0:?}")]
    InvalidPort(String),
    #[error("SMARTCAR_MODE must be one of sandbox, live; got {0:?}")]
    InvalidMode(String),
}

/// Whether the gateway targets Smartcar's simulated vehicles or real ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Sandbox,
    Live,
}

impl Mode {
    /// Value of the `mode` parameter on the authorization URL.
    pub fn connect_param(self) -> &'static str {
        match self {
            Mode::Sandbox => "test",
            Mode::Live => "live",
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" | "development" => Ok(Mode::Sandbox),
            "live" | "production" => Ok(Mode::Live),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Sandbox => f.write_str("sandbox"),
            Mode::Live => f.write_str("live"),
        }
    }
}

/// Immutable server configuration loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub mode: Mode,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub static_dir: PathBuf,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `SMARTCAR_CLIENT_ID` or `SMARTCAR_SECRET`
    /// is missing, when `PORT` is not a valid port number, or when
    /// `SMARTCAR_MODE` is outside the supported set.
    ///
    /// # Example
    ///
    /// ```
    /// let config = Config::from_env()?;
    /// println!("listening on {}", config.port);
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones so that a blank line
    /// in a `.env` file does not count as a credential.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let client_id = get("SMARTCAR_CLIENT_ID").ok_or(ConfigError::Missing("SMARTCAR_CLIENT_ID"))?;
        let client_secret = get("SMARTCAR_SECRET").ok_or(ConfigError::Missing("SMARTCAR_SECRET"))?;

        let redirect_uri = get("SMARTCAR_REDIRECT_URI")
            .unwrap_or_else(|| format!("http://localhost:{port}/callback"));

        let mode = match get("SMARTCAR_MODE") {
            Some(raw) => raw.parse::<Mode>()?,
            None => Mode::default(),
        };

        Ok(Config {
            port,
            client_id,
            client_secret,
            redirect_uri,
            mode,
            scope: get("SMARTCAR_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            auth_url: get("SMARTCAR_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: get("SMARTCAR_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: get("SMARTCAR_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        })
    }

    /// Returns the address the HTTP listener binds to.
    ///
    /// # Example
    ///
    /// ```
    /// let addr = config.server_addr(); // e.g., "0.0.0.0:8000"
    /// ```
    pub fn server_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Returns the local URL of the landing page.
    pub fn local_url(&self) -> String {
        format!("http://localhost:{}/", self.port)
    }
}

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` file in the current working directory first and then in
/// the platform-specific local data directory under `smartcar-demo/.env`.
/// Variables already present in the process environment are never
/// overwritten, and a missing file is not an error.
///
/// # Directory Structure
///
/// The data directory `.env` file lives in:
/// - Linux: `~/.local/share/smartcar-demo/.env`
/// - macOS: `~/Library/Application Support/smartcar-demo/.env`
/// - Windows: `%LOCALAPPDATA%/smartcar-demo/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
///
/// # Example
///
/// ```
/// use smartcar_demo::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            return Err(e.to_string());
        }
    }

    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("smartcar-demo/.env");
    path
}
