// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::{Config, ConfigError, ValidatedConfig};
use crate::runtime_paths::RuntimePaths;
use std::error::Error;
use std::fmt;
use std::path::Path;

pub mod config;

#[derive(Debug)]
pub struct BootstrapResult {
    pub validated_config: ValidatedConfig,
    pub runtime_paths: RuntimePaths,
    pub created_config: bool,
}

#[derive(Debug)]
pub enum BootstrapError {
    Config(ConfigError),
    Io(std::io::Error),
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::Config(err) => write!(f, "{}", err),
            BootstrapError::Io(err) => write!(f, "Bootstrap I/O error: {}", err),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BootstrapError::Config(err) => Some(err),
            BootstrapError::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for BootstrapError {
    fn from(err: ConfigError) -> Self {
        BootstrapError::Config(err)
    }
}

impl From<std::io::Error> for BootstrapError {
    fn from(err: std::io::Error) -> Self {
        BootstrapError::Io(err)
    }
}

pub fn bootstrap_runtime(root: &Path) -> Result<BootstrapResult, BootstrapError> {
    let runtime_paths = RuntimePaths::from_root(root)?;

    let created_config = config::ensure_config(&runtime_paths)?;

    let validated_config = Config::load(&runtime_paths.config_file)?.validate()?;

    Ok(BootstrapResult {
        validated_config,
        runtime_paths,
        created_config,
    })
}

pub(crate) fn log_action(message: impl AsRef<str>) {
    eprintln!("[bootstrap] {}", message.as_ref());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_fixtures::TestFixtureRoot;
    use std::fs;

    #[test]
    fn bootstrap_creates_default_config_when_missing() {
        let fixture = TestFixtureRoot::new_unique("bootstrap-default").unwrap();
        let result = bootstrap_runtime(fixture.path()).expect("bootstrap should succeed");

        assert!(result.created_config);
        assert_eq!(result.validated_config.server.port, 3000);
        assert_eq!(result.validated_config.jwt.cookie_name, "jwt");
        assert!(result.runtime_paths.config_file.exists());
    }

    #[test]
    fn bootstrap_is_idempotent() {
        let fixture = TestFixtureRoot::new_unique("bootstrap-idempotent").unwrap();
        let first = bootstrap_runtime(fixture.path()).expect("first bootstrap");
        let second = bootstrap_runtime(fixture.path()).expect("second bootstrap");

        assert!(first.created_config);
        assert!(!second.created_config);
        assert_eq!(
            first.validated_config.jwt.secret,
            second.validated_config.jwt.secret
        );
    }

    #[test]
    fn bootstrap_fails_on_invalid_config() {
        let fixture = TestFixtureRoot::new_unique("bootstrap-invalid").unwrap();
        fs::write(fixture.path().join("config.yaml"), "server: [not, a, map]\n").unwrap();

        let err = bootstrap_runtime(fixture.path()).expect_err("must fail");
        assert!(matches!(err, BootstrapError::Config(_)));
    }
}
