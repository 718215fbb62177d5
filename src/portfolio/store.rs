// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::types::{PortfolioTable, StoreError};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(test)]
use std::sync::{Arc, RwLock};

pub trait PortfolioStore: Send + Sync {
    /// Create the backing file with an empty mapping if it is absent, and
    /// rewrite it if it holds only whitespace. Idempotent; called at
    /// startup and before every access.
    fn ensure_exists(&self) -> Result<(), StoreError>;
    fn load(&self) -> Result<PortfolioTable, StoreError>;
    fn save(&self, table: &PortfolioTable) -> Result<(), StoreError>;
}

pub struct FilePortfolioStore {
    portfolio_file: PathBuf,
}

impl FilePortfolioStore {
    pub fn new(portfolio_file: PathBuf) -> Result<Self, StoreError> {
        if portfolio_file.as_os_str().is_empty() {
            return Err(StoreError::IoError(
                "Portfolio file path is empty".to_string(),
            ));
        }

        Ok(Self { portfolio_file })
    }

    fn parse_table(content: &str) -> Result<PortfolioTable, StoreError> {
        if content.trim().is_empty() {
            return Ok(PortfolioTable::new());
        }

        serde_json::from_str(content)
            .map_err(|e| StoreError::ParseError(format!("Failed to parse portfolio file: {}", e)))
    }

    fn serialize_table(table: &PortfolioTable) -> Result<String, StoreError> {
        serde_json::to_string_pretty(table)
            .map_err(|e| StoreError::ParseError(format!("Failed to serialize portfolio: {}", e)))
    }

    fn read_portfolio_file(&self) -> Result<String, StoreError> {
        std::fs::read_to_string(&self.portfolio_file)
            .map_err(|e| StoreError::IoError(format!("Failed to read portfolio file: {}", e)))
    }

    fn write_portfolio_file(&self, content: &str) -> Result<(), StoreError> {
        let parent = self.portfolio_file.parent().ok_or_else(|| {
            StoreError::IoError("Portfolio file path has no parent directory".to_string())
        })?;
        let file_name = self.portfolio_file.file_name().ok_or_else(|| {
            StoreError::IoError("Portfolio file path has no file name".to_string())
        })?;
        let (mut file, temp_path) = create_temp_file(parent, file_name)?;

        if let Err(err) = file.write_all(content.as_bytes()) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(StoreError::IoError(format!(
                "Failed to write portfolio temp file: {}",
                err
            )));
        }
        if let Err(err) = file.sync_all() {
            let _ = std::fs::remove_file(&temp_path);
            return Err(StoreError::IoError(format!(
                "Failed to sync portfolio temp file: {}",
                err
            )));
        }

        if let Err(err) = std::fs::rename(&temp_path, &self.portfolio_file) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(StoreError::IoError(format!(
                "Failed to replace portfolio file: {}",
                err
            )));
        }

        #[cfg(unix)]
        {
            if let Err(err) = sync_parent_dir(parent) {
                log::warn!("Portfolio directory sync failed: {}", err);
            }
        }

        Ok(())
    }
}

fn create_temp_file(
    dir: &Path,
    file_name: &std::ffi::OsStr,
) -> Result<(std::fs::File, PathBuf), StoreError> {
    use std::fs::OpenOptions;
    const MAX_ATTEMPTS: u32 = 100;
    let base = file_name.to_string_lossy();
    for attempt in 0..MAX_ATTEMPTS {
        let candidate = dir.join(format!(".{}.tmp.{}.{}", base, std::process::id(), attempt));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => return Ok((file, candidate)),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(err) => {
                return Err(StoreError::IoError(format!(
                    "Failed to create temp portfolio file: {}",
                    err
                )));
            }
        }
    }
    Err(StoreError::IoError(
        "Failed to create temp portfolio file after repeated attempts".to_string(),
    ))
}

#[cfg(unix)]
fn sync_parent_dir(parent: &Path) -> Result<(), StoreError> {
    let dir = std::fs::File::open(parent).map_err(|err| {
        StoreError::IoError(format!(
            "Failed to open portfolio directory for sync: {}",
            err
        ))
    })?;
    dir.sync_all()
        .map_err(|err| StoreError::IoError(format!("Failed to sync portfolio directory: {}", err)))
}

impl PortfolioStore for FilePortfolioStore {
    fn ensure_exists(&self) -> Result<(), StoreError> {
        if !self.portfolio_file.exists() {
            return self.write_portfolio_file("{}");
        }

        let content = self.read_portfolio_file()?;
        if content.trim().is_empty() {
            log::info!("portfolio.json was empty; initialized with an empty table");
            return self.write_portfolio_file("{}");
        }

        Ok(())
    }

    fn load(&self) -> Result<PortfolioTable, StoreError> {
        if !self.portfolio_file.exists() {
            return Ok(PortfolioTable::new());
        }

        let content = self.read_portfolio_file()?;
        Self::parse_table(&content)
    }

    fn save(&self, table: &PortfolioTable) -> Result<(), StoreError> {
        let content = Self::serialize_table(table)?;
        self.write_portfolio_file(&content)
    }
}

#[cfg(test)]
pub struct MemoryPortfolioStore {
    table: Arc<RwLock<PortfolioTable>>,
}

#[cfg(test)]
impl MemoryPortfolioStore {
    pub fn new(initial: PortfolioTable) -> Self {
        Self {
            table: Arc::new(RwLock::new(initial)),
        }
    }
}

#[cfg(test)]
impl PortfolioStore for MemoryPortfolioStore {
    fn ensure_exists(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn load(&self) -> Result<PortfolioTable, StoreError> {
        match self.table.read() {
            Ok(guard) => Ok(guard.clone()),
            Err(poisoned) => {
                log::error!("MemoryPortfolioStore lock poisoned on read; recovering");
                Ok(poisoned.into_inner().clone())
            }
        }
    }

    fn save(&self, table: &PortfolioTable) -> Result<(), StoreError> {
        match self.table.write() {
            Ok(mut guard) => {
                *guard = table.clone();
                Ok(())
            }
            Err(poisoned) => {
                log::error!("MemoryPortfolioStore lock poisoned on write; recovering");
                let mut guard = poisoned.into_inner();
                *guard = table.clone();
                Ok(())
            }
        }
    }
}
