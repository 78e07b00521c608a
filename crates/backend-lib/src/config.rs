// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use figment::{Figment, providers::{Env, Format, Serialized, Toml}};
use anyhow::{ensure, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::auth::CredentialHasher;

/// Config file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "gatekeeper.toml";

/// Prefix of environment overrides, e.g. `GATEKEEPER_AUTH__JWT_SECRET`
pub const ENV_PREFIX: &str = "GATEKEEPER_";

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Legacy `PORT` override applied on top of `bind_addr`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Directory for the user log; users are kept in memory only when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Log filter, e.g. `info` or `info,tower_http=debug`
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Credential and token settings
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// `[auth]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// HMAC secret for signing tokens. Required.
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: u64,
    /// Rules for new passwords
    pub password: PasswordPolicy,
    /// scrypt cost parameters for new digests
    pub scrypt: ScryptSettings,
}

/// Password length bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
}

/// scrypt cost parameters (`N = 2^log_n`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScryptSettings {
    pub log_n: u8,
    pub r: u32,
    pub p: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            port: None,
            data_dir: None,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            cors_origins: Vec::new(),
            auth: AuthSettings::default(),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: 60 * 60 * 24, // 24 hours
            password: PasswordPolicy::default(),
            scrypt: ScryptSettings::default(),
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 6,
            max_length: 128,
        }
    }
}

impl Default for ScryptSettings {
    fn default() -> Self {
        Self {
            log_n: 15,
            r: 8,
            p: 1,
        }
    }
}

impl Settings {
    /// Load from [`DEFAULT_CONFIG_FILE`] and the environment
    pub fn load() -> Result<Self> {
        load_settings(None)
    }

    /// Load from an explicit config file and the environment
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_settings(Some(path.as_ref()))
    }

    /// Token lifetime
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.auth.token_ttl_secs)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.auth.jwt_secret.trim().is_empty(),
            "auth.jwt_secret is not set (use {ENV_PREFIX}AUTH__JWT_SECRET or JWT_SECRET)"
        );
        ensure!(self.auth.token_ttl_secs > 0, "auth.token_ttl_secs must be positive");

        EnvFilter::try_new(&self.log_level)
            .with_context(|| format!("invalid log_level: {}", self.log_level))?;

        let policy = &self.auth.password;
        ensure!(policy.min_length >= 1, "auth.password.min_length must be at least 1");
        ensure!(
            policy.max_length >= policy.min_length,
            "auth.password.max_length must not be below min_length"
        );

        CredentialHasher::from_settings(&self.auth.scrypt)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .context("auth.scrypt")?;

        Ok(())
    }
}

/// Load settings from defaults, the TOML file, `GATEKEEPER_*` variables and the legacy
/// `JWT_SECRET` / `PORT` variables, in increasing priority. The result is validated.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

    let mut settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(Env::raw().only(&["JWT_SECRET"]).map(|_| "auth.jwt_secret".into()))
        .merge(Env::raw().only(&["PORT"]).map(|_| "port".into()))
        .extract()
        .with_context(|| format!("failed to load settings ({})", path.display()))?;

    if let Some(port) = settings.port {
        settings.bind_addr.set_port(port);
    }

    settings.validate()?;
    Ok(settings)
}
