// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::iam::types::Identity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,   // Subject (provider-issued user id)
    pub name: String,  // User's display name
    pub email: String, // User's email
    pub iat: i64,      // Issued at
    pub exp: i64,      // Expiration (absolute, no refresh)
    pub iss: String,   // Issuer
    pub aud: String,   // Audience
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.sub.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum JwtError {
    TokenCreationError(String),
    TokenVerificationError(String),
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenCreationError(msg) => write!(f, "Token creation error: {}", msg),
            JwtError::TokenVerificationError(msg) => write!(f, "Token verification error: {}", msg),
        }
    }
}

impl std::error::Error for JwtError {}
