// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub app: AppConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_workers() -> usize {
    4
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    pub provider: ProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_jwt_issuer")]
    pub issuer: String,
    #[serde(default = "default_jwt_audience")]
    pub audience: String,
    #[serde(default = "default_jwt_expiration_hours")]
    pub expiration_hours: u64,
    #[serde(default = "default_jwt_cookie_name")]
    pub cookie_name: String,
}

fn default_jwt_issuer() -> String {
    "folio".to_string()
}

fn default_jwt_audience() -> String {
    "folio-users".to_string()
}

fn default_jwt_expiration_hours() -> u64 {
    24
}

fn default_jwt_cookie_name() -> String {
    "jwt".to_string()
}

/// OAuth 2.0 authorization-code provider. Endpoint defaults target Google;
/// tests point them at a local stub.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    #[serde(default = "default_provider_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_provider_token_url")]
    pub token_url: String,
    #[serde(default = "default_provider_userinfo_url")]
    pub userinfo_url: String,
    #[serde(default = "default_provider_scope")]
    pub scope: String,
}

fn default_provider_auth_url() -> String {
    "https://accounts.google.com/o/oauth2/v2/auth".to_string()
}

fn default_provider_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_provider_userinfo_url() -> String {
    "https://www.googleapis.com/oauth2/v2/userinfo".to_string()
}

fn default_provider_scope() -> String {
    "profile email".to_string()
}

#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub logging: LoggingConfig,
    pub jwt: JwtConfig,
    pub provider: ProviderConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_yaml::from_str(&contents).map_err(|e| {
            ConfigError::LoadError(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Apply environment overrides and check the fields the server cannot
    /// run without. Secrets are overridable so deployments can keep them
    /// out of the config file.
    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        let Config {
            mut server,
            app,
            logging,
            auth,
        } = self;
        let AuthConfig {
            mut jwt,
            mut provider,
        } = auth;

        if let Ok(v) = env::var("PORT") {
            server.port = v.parse().map_err(|_| {
                ConfigError::ValidationError(format!("PORT is not a valid port number: {}", v))
            })?;
        }
        if let Ok(v) = env::var("FOLIO_JWT_SECRET") {
            jwt.secret = v;
        }
        if let Ok(v) = env::var("FOLIO_OAUTH_CLIENT_ID") {
            provider.client_id = v;
        }
        if let Ok(v) = env::var("FOLIO_OAUTH_CLIENT_SECRET") {
            provider.client_secret = v;
        }
        if let Ok(v) = env::var("FOLIO_OAUTH_REDIRECT_URL") {
            provider.redirect_url = v;
        }

        if jwt.secret.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.jwt.secret must not be empty".to_string(),
            ));
        }
        if jwt.cookie_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.jwt.cookie_name must not be empty".to_string(),
            ));
        }
        if jwt.expiration_hours == 0 {
            return Err(ConfigError::ValidationError(
                "auth.jwt.expiration_hours must be at least 1".to_string(),
            ));
        }
        // Provider credentials may legitimately be empty (the public surface
        // works without login); startup warns about them once logging is up.

        Ok(ValidatedConfig {
            server,
            app,
            logging,
            jwt,
            provider,
        })
    }
}

impl ValidatedConfig {
    /// True when the listener is bound to a loopback-only address. Drives
    /// the Secure attribute on the session cookie.
    pub fn is_localhost_only(&self) -> bool {
        matches!(self.server.host.as_str(), "127.0.0.1" | "::1" | "localhost")
    }

    pub fn has_provider_credentials(&self) -> bool {
        !self.provider.client_id.trim().is_empty()
            && !self.provider.client_secret.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_yaml() -> &'static str {
        "server:\n  host: \"127.0.0.1\"\n\napp:\n  name: \"Folio\"\n  description: \"test\"\n\nauth:\n  jwt:\n    secret: \"s3cret\"\n  provider:\n    client_id: \"cid\"\n    client_secret: \"csecret\"\n    redirect_url: \"http://127.0.0.1:3000/auth/google/callback\"\n"
    }

    #[test]
    fn minimal_config_fills_defaults() {
        let config: Config = serde_yaml::from_str(minimal_yaml()).expect("parse");
        let validated = config.validate().expect("validate");
        assert_eq!(validated.server.port, 3000);
        assert_eq!(validated.jwt.cookie_name, "jwt");
        assert_eq!(validated.jwt.expiration_hours, 24);
        assert_eq!(validated.provider.scope, "profile email");
        assert!(validated.is_localhost_only());
    }

    #[test]
    fn empty_secret_is_rejected() {
        let yaml = minimal_yaml().replace("\"s3cret\"", "\"\"");
        let config: Config = serde_yaml::from_str(&yaml).expect("parse");
        let err = config.validate().expect_err("must fail");
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
