// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::store::PortfolioStore;
use super::types::{PortfolioTable, ProfileRecord, StoreError};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

// Type aliases for the mutation channel
type MutationRequest = (String, ProfileRecord, oneshot::Sender<Result<(), StoreError>>);
type MutationSender = mpsc::UnboundedSender<MutationRequest>;
type MutationReceiver = mpsc::UnboundedReceiver<MutationRequest>;

/// Portfolio service fronting the backing store. Reads go straight to the
/// store; all writes funnel through a single consumer so two concurrent
/// edits cannot interleave their load-replace-save sections.
#[derive(Clone)]
pub struct PortfolioService {
    store: Arc<dyn PortfolioStore>,
    mutation_sender: MutationSender,
}

impl PortfolioService {
    /// Initialize the service with a portfolio store. Normalizes the
    /// backing file and starts the writer task for mutations.
    pub fn new(store: Arc<dyn PortfolioStore>) -> Result<Self, StoreError> {
        store.ensure_exists()?;

        let (mutation_sender, mut mutation_receiver): (MutationSender, MutationReceiver) =
            mpsc::unbounded_channel();

        let store_clone = store.clone();

        tokio::spawn(async move {
            while let Some((id, record, response_sender)) = mutation_receiver.recv().await {
                let result = Self::handle_upsert(&store_clone, id, record);
                let _ = response_sender.send(result);
            }
        });

        Ok(PortfolioService {
            store,
            mutation_sender,
        })
    }

    fn handle_upsert(
        store: &Arc<dyn PortfolioStore>,
        id: String,
        record: ProfileRecord,
    ) -> Result<(), StoreError> {
        store.ensure_exists()?;
        let mut table = store.load()?;
        table.insert(id, record);
        store.save(&table)
    }

    /// The full table, read from the backing file on every call so a
    /// corrupt file is detected per request.
    pub fn load(&self) -> Result<PortfolioTable, StoreError> {
        self.store.ensure_exists()?;
        self.store.load()
    }

    /// Replace the record stored for `id` (whole-record, no field merge).
    pub async fn upsert(&self, id: String, record: ProfileRecord) -> Result<(), StoreError> {
        let (response_sender, response_receiver) = oneshot::channel();

        self.mutation_sender
            .send((id, record, response_sender))
            .map_err(|_| StoreError::IoError("Portfolio writer task has stopped".to_string()))?;

        response_receiver
            .await
            .map_err(|_| StoreError::IoError("Portfolio writer dropped the request".to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::MemoryPortfolioStore;

    fn record(user: &str, about_me: &str, projects: &str) -> ProfileRecord {
        ProfileRecord {
            user: user.to_string(),
            about_me: about_me.to_string(),
            projects: projects.to_string(),
            github_contributions: String::new(),
        }
    }

    #[actix_web::test]
    async fn upsert_then_load_round_trips() {
        let store = Arc::new(MemoryPortfolioStore::new(PortfolioTable::new()));
        let service = PortfolioService::new(store).expect("service");

        service
            .upsert("u1".to_string(), record("Ada", "Hello", "P1"))
            .await
            .expect("upsert");

        let table = service.load().expect("load");
        assert_eq!(table.len(), 1);
        assert_eq!(table["u1"].about_me, "Hello");
        assert_eq!(table["u1"].user, "Ada");
    }

    #[actix_web::test]
    async fn second_upsert_fully_replaces_the_record() {
        let store = Arc::new(MemoryPortfolioStore::new(PortfolioTable::new()));
        let service = PortfolioService::new(store).expect("service");

        service
            .upsert("u1".to_string(), record("Ada", "Hello", "P1"))
            .await
            .expect("first upsert");
        service
            .upsert("u2".to_string(), record("Grace", "Hi", "P2"))
            .await
            .expect("other user");
        service
            .upsert("u1".to_string(), record("Ada", "Changed", ""))
            .await
            .expect("second upsert");

        let table = service.load().expect("load");
        assert_eq!(table.len(), 2);
        assert_eq!(table["u1"].about_me, "Changed");
        assert_eq!(table["u1"].projects, "", "no field-level merge");
        assert_eq!(table["u2"].about_me, "Hi", "other entries untouched");
    }

    #[actix_web::test]
    async fn concurrent_upserts_for_different_identities_both_land() {
        let store = Arc::new(MemoryPortfolioStore::new(PortfolioTable::new()));
        let service = PortfolioService::new(store).expect("service");

        let a = service.upsert("u1".to_string(), record("Ada", "A", ""));
        let b = service.upsert("u2".to_string(), record("Grace", "B", ""));
        let (ra, rb) = tokio::join!(a, b);
        ra.expect("u1 upsert");
        rb.expect("u2 upsert");

        let table = service.load().expect("load");
        assert_eq!(table.len(), 2, "no lost update");
    }
}
