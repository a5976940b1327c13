// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster registry pipeline
//!
//! Registrations are unique by canonicalized server address and the
//! remote enforces nothing, so the uniqueness check and the create must
//! happen under one exclusive guard.

use crate::LifecycleError;
use pilot_core::cluster::ClusterRecord;
use pilot_core::identity::{canonical_server, conflicts_with_existing, parse_id};
use pilot_core::{Domain, LockMode, LockRegistry};
use pilot_remote::ControlPlaneApi;
use std::sync::Arc;

/// Lifecycle operations for cluster registrations
#[derive(Clone)]
pub struct ClusterPipeline<A> {
    api: A,
    locks: Arc<LockRegistry>,
}

impl<A: ControlPlaneApi> ClusterPipeline<A> {
    pub fn new(api: A, locks: Arc<LockRegistry>) -> Self {
        Self { api, locks }
    }

    /// Register a cluster, enforcing canonical-server uniqueness.
    ///
    /// The exclusive guard spans the list-then-create sequence; releasing
    /// it between the two calls is exactly the race this crate exists to
    /// prevent.
    pub async fn register(&self, record: &ClusterRecord) -> Result<ClusterRecord, LifecycleError> {
        let _guard = self
            .locks
            .acquire_global(Domain::Clusters, LockMode::Exclusive)
            .await;

        let existing = self.api.list_clusters(Some(&record.server)).await?;
        if conflicts_with_existing(&record.server, &existing) {
            return Err(LifecycleError::Conflict {
                server: record.server.clone(),
            });
        }

        let mut created = self.api.create_cluster(record).await?;
        created.carry_sensitive_from(record);

        tracing::trace!(server = %created.server, id = %created.id(), "registered cluster");
        Ok(created)
    }

    /// Look a registration up by its composed identifier. `None` means it
    /// is gone remotely and local state should be cleared.
    pub async fn read(
        &self,
        id: &str,
        prior: Option<&ClusterRecord>,
    ) -> Result<Option<ClusterRecord>, LifecycleError> {
        let _guard = self
            .locks
            .acquire_global(Domain::Clusters, LockMode::Shared)
            .await;

        let (server, _name) = parse_id(id);

        let clusters = match self.api.list_clusters(Some(&server)).await {
            Ok(clusters) => clusters,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let wanted = canonical_server(&server);
        let Some(mut found) = clusters
            .into_iter()
            .find(|c| canonical_server(&c.server) == wanted)
        else {
            tracing::debug!(server = %server, "cluster gone remotely, clearing state");
            return Ok(None);
        };

        if let Some(prior) = prior {
            found.carry_sensitive_from(prior);
        }

        Ok(Some(found))
    }

    /// Push updated connection details for an existing registration.
    pub async fn update(&self, record: &ClusterRecord) -> Result<ClusterRecord, LifecycleError> {
        let _guard = self
            .locks
            .acquire_global(Domain::Clusters, LockMode::Exclusive)
            .await;

        let mut updated = self.api.update_cluster(record).await?;
        updated.carry_sensitive_from(record);

        tracing::trace!(server = %updated.server, "updated cluster");
        Ok(updated)
    }

    /// Remove a registration. Already gone remotely counts as success.
    pub async fn deregister(&self, id: &str) -> Result<(), LifecycleError> {
        let _guard = self
            .locks
            .acquire_global(Domain::Clusters, LockMode::Exclusive)
            .await;

        let (server, _name) = parse_id(id);

        match self.api.delete_cluster(&server).await {
            Ok(()) => {
                tracing::trace!(server = %server, "deregistered cluster");
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!(server = %server, "cluster already gone");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "clusters_tests.rs"]
mod tests;
