// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use minijinja::{context, Value};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct ErrorPageContext {
    app_name: String,
}

impl ErrorPageContext {
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeIdentity {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeEntry {
    pub id: String,
    pub user: String,
    pub about_me: String,
    pub projects: String,
    pub github_contributions: String,
}

#[derive(Debug, Clone)]
pub struct HomePageContext {
    app_name: String,
    authenticated: bool,
    identity: Option<HomeIdentity>,
    entries: Vec<HomeEntry>,
    own_record: Option<HomeEntry>,
}

impl HomePageContext {
    pub fn new(
        app_name: &str,
        identity: Option<HomeIdentity>,
        entries: Vec<HomeEntry>,
        own_record: Option<HomeEntry>,
    ) -> Self {
        Self {
            app_name: app_name.to_string(),
            authenticated: identity.is_some(),
            identity,
            entries,
            own_record,
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name,
            authenticated => self.authenticated,
            identity => &self.identity,
            entries => &self.entries,
            own_record => &self.own_record
        }
    }
}
