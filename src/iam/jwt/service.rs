// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::types::{Claims, JwtError};
use crate::config::ValidatedConfig;
use crate::iam::types::Identity;
use actix_web::cookie::time::{Duration as CookieDuration, OffsetDateTime};
use actix_web::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

pub struct JwtService {
    secret: String,
    issuer: String,
    audience: String,
    expiration_hours: u64,
    cookie_name: String,
    is_localhost: bool,
}

impl JwtService {
    pub fn new(config: &ValidatedConfig) -> Self {
        JwtService {
            secret: config.jwt.secret.clone(),
            issuer: config.jwt.issuer.clone(),
            audience: config.jwt.audience.clone(),
            expiration_hours: config.jwt.expiration_hours,
            cookie_name: config.jwt.cookie_name.clone(),
            is_localhost: config.is_localhost_only(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Create a session token for a provider-verified identity. The token
    /// is the session; nothing is stored server-side.
    pub fn create_token(&self, identity: &Identity) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::hours(self.expiration_hours as i64);

        let claims = Claims {
            sub: identity.id.clone(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| JwtError::TokenCreationError(e.to_string()))?;

        Ok(token)
    }

    /// Verify a session token and return its claims. Malformed, badly
    /// signed and expired tokens all fail the same way.
    pub fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
        .map_err(|e| JwtError::TokenVerificationError(e.to_string()))?;

        Ok(token_data.claims)
    }

    /// Create the HTTP-only session cookie carrying the token.
    pub fn create_auth_cookie<'a>(&self, token: &str) -> Cookie<'a> {
        let expiration = Utc::now() + Duration::hours(self.expiration_hours as i64);

        let expires = match OffsetDateTime::from_unix_timestamp(expiration.timestamp()) {
            Ok(val) => val,
            Err(e) => {
                log::error!(
                    "Failed to convert expiration timestamp for auth cookie: {}",
                    e
                );
                OffsetDateTime::UNIX_EPOCH
            }
        };

        Cookie::build(self.cookie_name.clone(), token.to_string())
            .path("/")
            .secure(!self.is_localhost)
            .http_only(true)
            .same_site(SameSite::Lax)
            .expires(expires)
            .finish()
    }

    /// Create the cookie that removes the session token from the client.
    pub fn create_logout_cookie<'a>(&self) -> Cookie<'a> {
        Cookie::build(self.cookie_name.clone(), "")
            .path("/")
            .secure(!self.is_localhost)
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(CookieDuration::seconds(0))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .finish()
    }
}
