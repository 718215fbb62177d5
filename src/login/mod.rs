// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::web;

mod oauth;
mod session;

pub use oauth::{OAuthClient, ProviderError};

/// Configure the authentication routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/google", web::get().to(session::start_auth))
        .route(
            "/auth/google/callback",
            web::get().to(session::complete_auth),
        )
        .route("/logout", web::get().to(session::handle_logout));
}
