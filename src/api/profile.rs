// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;

use crate::iam::AuthRequest;

#[derive(Serialize)]
struct ProfileResponse {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

pub async fn get_profile(req: HttpRequest) -> HttpResponse {
    let Some(identity) = req.identity() else {
        return HttpResponse::Ok().json(ProfileResponse {
            authenticated: false,
            display_name: None,
            email: None,
        });
    };

    HttpResponse::Ok().json(ProfileResponse {
        authenticated: true,
        display_name: Some(identity.name),
        email: Some(identity.email),
    })
}
