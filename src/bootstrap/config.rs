// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{log_action, BootstrapError};
use crate::runtime_paths::RuntimePaths;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fs::OpenOptions;
use std::io::{self, Write};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_WORKERS: u16 = 4;

/// Create config.yaml with a generated signing secret on first run.
/// Returns true when the file was created by this call.
pub fn ensure_config(paths: &RuntimePaths) -> Result<bool, BootstrapError> {
    if paths.config_file.exists() {
        return Ok(false);
    }

    let jwt_secret = generate_jwt_secret();
    let contents = default_config_yaml(&jwt_secret);

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&paths.config_file)
    {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(BootstrapError::Io(err)),
    };

    file.write_all(contents.as_bytes())?;
    file.sync_all()?;

    log_action(format!(
        "created config.yaml with a generated signing secret (listening on port {})",
        DEFAULT_PORT
    ));

    Ok(true)
}

fn generate_jwt_secret() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);

    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        hex.push_str(&format!("{:02x}", byte));
    }

    hex
}

fn default_config_yaml(jwt_secret: &str) -> String {
    format!(
        "server:\n  host: \"0.0.0.0\"\n  port: {port}\n  workers: {workers}\n\napp:\n  name: \"Folio\"\n  description: \"A self-hosted portfolio editor\"\n\nlogging:\n  level: \"info\"\n\nauth:\n  jwt:\n    secret: \"{jwt_secret}\"\n    expiration_hours: 24\n    cookie_name: \"jwt\"\n  provider:\n    # Fill these in from the provider's console, or set the\n    # FOLIO_OAUTH_CLIENT_ID / FOLIO_OAUTH_CLIENT_SECRET /\n    # FOLIO_OAUTH_REDIRECT_URL environment variables.\n    client_id: \"\"\n    client_secret: \"\"\n    redirect_url: \"http://localhost:{port}/auth/google/callback\"\n",
        port = DEFAULT_PORT,
        workers = DEFAULT_WORKERS,
        jwt_secret = jwt_secret,
    )
}
