// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::oauth::OAuthClient;
use crate::iam::JwtService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

fn redirect_home() -> HttpResponse {
    HttpResponse::Found()
        .append_header(("Location", "/"))
        .finish()
}

/// GET /auth/google: hand the user to the provider.
pub(super) async fn start_auth(oauth: web::Data<OAuthClient>) -> HttpResponse {
    HttpResponse::Found()
        .append_header(("Location", oauth.authorize_url()))
        .finish()
}

#[derive(Debug, Deserialize)]
pub(super) struct CallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// GET /auth/google/callback: exchange the code, mint the session cookie,
/// go home. Any provider failure lands the user back home anonymous; no
/// error page is surfaced.
pub(super) async fn complete_auth(
    query: web::Query<CallbackQuery>,
    oauth: web::Data<OAuthClient>,
    jwt_service: web::Data<JwtService>,
) -> HttpResponse {
    let query = query.into_inner();

    if let Some(error) = query.error {
        log::warn!("Provider reported a login error: {}", error);
        return redirect_home();
    }
    let Some(code) = query.code else {
        log::warn!("Provider callback arrived without a code");
        return redirect_home();
    };

    let identity = match oauth.exchange_code(&code).await {
        Ok(identity) => identity,
        Err(err) => {
            log::warn!("Provider code exchange failed: {}", err);
            return redirect_home();
        }
    };

    match jwt_service.create_token(&identity) {
        Ok(token) => {
            let cookie = jwt_service.create_auth_cookie(&token);
            log::info!("User signed in: {}", identity.name);
            HttpResponse::Found()
                .cookie(cookie)
                .append_header(("Location", "/"))
                .finish()
        }
        Err(err) => {
            log::error!("Failed to issue session token: {}", err);
            redirect_home()
        }
    }
}

/// GET /logout: the cookie is the whole session, so removing it is the
/// whole logout. There is no provider-side session to terminate.
pub(super) async fn handle_logout(jwt_service: web::Data<JwtService>) -> HttpResponse {
    let cookie = jwt_service.create_logout_cookie();
    HttpResponse::Found()
        .cookie(cookie)
        .append_header(("Location", "/"))
        .finish()
}
