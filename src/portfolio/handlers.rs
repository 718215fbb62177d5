// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::app_state::AppState;
use crate::iam::AuthRequest;
use crate::portfolio::{PortfolioService, ProfileRecord};
use crate::public::error::serve_500;
use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::Deserialize;

/// Form body of POST /edit. Absent fields become empty strings, never
/// missing keys in the persisted record.
#[derive(Debug, Deserialize)]
pub(super) struct EditForm {
    #[serde(rename = "aboutMe", default)]
    pub about_me: Option<String>,
    #[serde(default)]
    pub projects: Option<String>,
    #[serde(rename = "githubContributions", default)]
    pub github_contributions: Option<String>,
}

pub(super) async fn submit_edit(
    req: HttpRequest,
    form: web::Form<EditForm>,
    portfolio: web::Data<PortfolioService>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let Some(identity) = req.identity() else {
        return Ok(HttpResponse::Forbidden().body("Unauthorized"));
    };

    let form = form.into_inner();
    let record = ProfileRecord {
        user: identity.name.clone(),
        about_me: form.about_me.unwrap_or_default(),
        projects: form.projects.unwrap_or_default(),
        github_contributions: form.github_contributions.unwrap_or_default(),
    };

    log::info!("Portfolio updated by {}", identity.name);

    match portfolio.upsert(identity.id, record).await {
        Ok(()) => Ok(HttpResponse::Found()
            .append_header(("Location", "/"))
            .finish()),
        Err(err) => {
            log::error!("Failed to persist portfolio edit: {}", err);
            serve_500(
                &app_state.error_renderer,
                Some(app_state.templates.as_ref()),
            )
        }
    }
}
