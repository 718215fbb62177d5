// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One user's editable content block. Field names on disk match the
/// portfolio.json format; absent fields deserialize to empty strings so a
/// hand-edited file never produces missing keys on the next save.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProfileRecord {
    #[serde(default)]
    pub user: String,
    #[serde(rename = "aboutMe", default)]
    pub about_me: String,
    #[serde(default)]
    pub projects: String,
    #[serde(rename = "githubContributions", default)]
    pub github_contributions: String,
}

// The portfolio.json structure: identity-id -> profile record. BTreeMap
// keeps the persisted file stable across saves.
pub type PortfolioTable = BTreeMap<String, ProfileRecord>;

#[derive(Debug, Clone)]
pub enum StoreError {
    IoError(String),
    ParseError(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::IoError(msg) => write!(f, "Portfolio file error: {}", msg),
            StoreError::ParseError(msg) => write!(f, "Portfolio parse error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_defaults_absent_fields_to_empty_strings() {
        let record: ProfileRecord =
            serde_json::from_value(json!({ "user": "Ada" })).expect("record");
        assert_eq!(record.user, "Ada");
        assert_eq!(record.about_me, "");
        assert_eq!(record.projects, "");
        assert_eq!(record.github_contributions, "");
    }

    #[test]
    fn record_serializes_with_wire_field_names() {
        let record = ProfileRecord {
            user: "Ada".to_string(),
            about_me: "Hello".to_string(),
            projects: "P1".to_string(),
            github_contributions: "5 commits".to_string(),
        };
        let value = serde_json::to_value(&record).expect("value");
        assert_eq!(
            value,
            json!({
                "user": "Ada",
                "aboutMe": "Hello",
                "projects": "P1",
                "githubContributions": "5 commits"
            })
        );
    }
}
