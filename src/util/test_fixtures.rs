// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::runtime_paths::RuntimePaths;

#[derive(Debug)]
pub struct TestFixtureRoot {
    path: PathBuf,
}

impl TestFixtureRoot {
    pub fn new_fixed(name: &str) -> std::io::Result<Self> {
        let root = fixtures_root().join(name);
        if root.exists() {
            fs::remove_dir_all(&root)?;
        }
        fs::create_dir_all(&root)?;
        Ok(Self { path: root })
    }

    pub fn new_unique(prefix: &str) -> std::io::Result<Self> {
        let name = format!("{}-{}", prefix, Uuid::new_v4());
        Self::new_fixed(&name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn runtime_paths(&self) -> std::io::Result<RuntimePaths> {
        let root = self.path.canonicalize()?;

        Ok(RuntimePaths {
            config_file: root.join("config.yaml"),
            portfolio_file: root.join("portfolio.json"),
            logs_dir: root.join("logs"),
            root,
        })
    }
}

impl Drop for TestFixtureRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn fixtures_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.join("target").join("test-fixtures")
}
