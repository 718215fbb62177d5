// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::web;

mod handlers;
mod service;
mod store;
pub(crate) mod types;

pub use service::PortfolioService;
#[cfg(test)]
pub use store::MemoryPortfolioStore;
pub use store::{FilePortfolioStore, PortfolioStore};
pub use types::{PortfolioTable, ProfileRecord, StoreError};

/// Configure the authenticated edit route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/edit", web::post().to(handlers::submit_edit));
}
