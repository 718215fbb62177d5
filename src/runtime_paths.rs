// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RuntimePaths {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub portfolio_file: PathBuf,
    pub logs_dir: PathBuf,
}

impl RuntimePaths {
    pub fn from_root(root: &Path) -> Result<Self, ConfigError> {
        let root_path = if root.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            root.to_path_buf()
        };

        if !root_path.exists() {
            fs::create_dir_all(&root_path).map_err(|e| {
                ConfigError::ValidationError(format!(
                    "Failed to create runtime root '{}': {}",
                    root_path.display(),
                    e
                ))
            })?;
        }

        let root_canonical = root_path.canonicalize().map_err(|e| {
            ConfigError::ValidationError(format!(
                "Failed to canonicalize runtime root '{}': {}",
                root_path.display(),
                e
            ))
        })?;

        let config_file = root_canonical.join("config.yaml");
        ensure_file_writable(&config_file, "Config file must be writable")?;

        let portfolio_file = root_canonical.join("portfolio.json");
        ensure_file_writable(&portfolio_file, "Portfolio file must be writable")?;

        let logs_dir = root_canonical.join("logs");

        Ok(Self {
            root: root_canonical,
            config_file,
            portfolio_file,
            logs_dir,
        })
    }
}

fn ensure_file_writable(path: &Path, message: &str) -> Result<(), ConfigError> {
    if !path.exists() {
        return Ok(());
    }

    let metadata = fs::metadata(path).map_err(|e| {
        ConfigError::ValidationError(format!(
            "Failed to read metadata for '{}': {}",
            path.display(),
            e
        ))
    })?;

    if metadata.permissions().readonly() {
        return Err(ConfigError::ValidationError(format!(
            "{}: {}",
            message,
            path.display()
        )));
    }

    Ok(())
}
