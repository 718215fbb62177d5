// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::iam::AuthRequest;
use crate::portfolio::{PortfolioService, ProfileRecord};
use crate::public::error::serve_500;
use crate::templates::{
    render_minijinja_template, HomeEntry, HomeIdentity, HomePageContext,
};
use actix_web::{web, HttpRequest, HttpResponse, Result};

fn home_entry(id: &str, record: &ProfileRecord) -> HomeEntry {
    HomeEntry {
        id: id.to_string(),
        user: record.user.clone(),
        about_me: record.about_me.clone(),
        projects: record.projects.clone(),
        github_contributions: record.github_contributions.clone(),
    }
}

/// GET /: everyone sees the full table; the signed-in user also gets an
/// edit form prefilled with their own record.
pub async fn render_home(
    req: HttpRequest,
    config: web::Data<ValidatedConfig>,
    portfolio: web::Data<PortfolioService>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let identity = req.identity();

    let table = match portfolio.load() {
        Ok(table) => table,
        Err(err) => {
            log::error!("Failed to load portfolio table: {}", err);
            return serve_500(
                &app_state.error_renderer,
                Some(app_state.templates.as_ref()),
            );
        }
    };

    let own_record = identity
        .as_ref()
        .and_then(|identity| table.get(&identity.id).map(|r| home_entry(&identity.id, r)));
    let entries: Vec<HomeEntry> = table.iter().map(|(id, r)| home_entry(id, r)).collect();
    let home_identity = identity.map(|identity| HomeIdentity {
        name: identity.name,
        email: identity.email,
    });

    let context =
        HomePageContext::new(&config.app.name, home_identity, entries, own_record).to_value();
    let html = render_minijinja_template(app_state.templates.as_ref(), "index.html", context)
        .map_err(|err| {
            log::error!("Failed to render home template: {}", err);
            actix_web::error::ErrorInternalServerError("Template rendering failed")
        })?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .append_header(("Cache-Control", "no-store"))
        .body(html))
}
