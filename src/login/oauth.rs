// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::ProviderConfig;
use crate::iam::Identity;
use serde::Deserialize;

#[derive(Debug)]
pub enum ProviderError {
    ExchangeError(String),
    ProfileError(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::ExchangeError(msg) => write!(f, "Code exchange error: {}", msg),
            ProviderError::ProfileError(msg) => write!(f, "Profile fetch error: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

// The provider's userinfo document; only the fields the session needs.
#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

/// Client for the provider's authorization-code exchange. The provider is
/// an external collaborator; every failure here is non-fatal to the caller.
#[derive(Clone)]
pub struct OAuthClient {
    config: ProviderConfig,
    http: reqwest::Client,
}

impl OAuthClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// The provider authorize endpoint with the fixed `profile email` scope.
    pub fn authorize_url(&self) -> String {
        format!(
            "{}?response_type=code&client_id={}&redirect_uri={}&scope={}",
            self.config.auth_url,
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_url),
            urlencoding::encode(&self.config.scope),
        )
    }

    /// Exchange the callback code for an access token, then fetch the
    /// userinfo document and map it to an identity.
    pub async fn exchange_code(&self, code: &str) -> Result<Identity, ProviderError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_url.as_str()),
        ];

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::ExchangeError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::ExchangeError(format!(
                "Token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ExchangeError(e.to_string()))?;

        let response = self
            .http
            .get(&self.config.userinfo_url)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| ProviderError::ProfileError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::ProfileError(format!(
                "Userinfo endpoint returned {}",
                response.status()
            )));
        }

        let profile: UserInfoResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ProfileError(e.to_string()))?;

        if profile.id.is_empty() {
            return Err(ProviderError::ProfileError(
                "Userinfo document has no id".to_string(),
            ));
        }

        Ok(Identity {
            id: profile.id,
            name: profile.name,
            email: profile.email,
        })
    }
}
