// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake control plane for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ControlPlaneApi, MintedCredential, RemoteError, SubjectRecord, TokenSummary};
use crate::token::unsigned_token;
use async_trait::async_trait;
use chrono::DateTime;
use pilot_core::cluster::ClusterRecord;
use pilot_core::credential::CredentialSubject;
use pilot_core::identity::canonical_server;
use pilot_core::{Clock, FakeClock};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    CreateCredential { subject: String },
    DeleteCredential { subject: String, id: String },
    GetSubject { name: String },
    ListClusters { filter: Option<String> },
    CreateCluster { server: String },
    UpdateCluster { server: String },
    DeleteCluster { server: String },
}

#[derive(Default)]
struct Inner {
    subjects: HashSet<String>,
    tokens: HashMap<String, Vec<TokenSummary>>,
    clusters: Vec<ClusterRecord>,
    calls: Vec<ApiCall>,
    fail_next: VecDeque<String>,
    minted: u64,
}

/// In-memory control plane with call recording and failure injection.
///
/// Deliberately performs no uniqueness check on cluster creation and
/// strips sensitive fields from everything it returns, mirroring the
/// remote API's behavior.
#[derive(Clone)]
pub struct FakeControlPlane {
    clock: FakeClock,
    inner: Arc<Mutex<Inner>>,
}

impl FakeControlPlane {
    pub fn new() -> Self {
        Self::with_clock(FakeClock::new())
    }

    /// Share a clock with the rest of the test
    pub fn with_clock(clock: FakeClock) -> Self {
        Self {
            clock,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    pub fn clock(&self) -> FakeClock {
        self.clock.clone()
    }

    /// Register a subject so tokens can be minted for it
    pub fn seed_subject(&self, name: impl Into<String>) {
        self.lock().subjects.insert(name.into());
    }

    /// Remove a subject, simulating out-of-band deletion
    pub fn remove_subject(&self, name: &str) {
        let mut inner = self.lock();
        inner.subjects.remove(name);
        inner.tokens.remove(name);
    }

    /// Pre-populate a cluster registration
    pub fn seed_cluster(&self, record: ClusterRecord) {
        self.lock().clusters.push(record);
    }

    /// Make the next API call fail with the given message
    pub fn fail_next(&self, message: impl Into<String>) {
        self.lock().fail_next.push_back(message.into());
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    /// Number of stored cluster registrations
    pub fn cluster_count(&self) -> usize {
        self.lock().clusters.len()
    }

    /// Tokens currently stored for a subject
    pub fn tokens_for(&self, subject: &str) -> Vec<TokenSummary> {
        self.lock().tokens.get(subject).cloned().unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_failure(inner: &mut Inner) -> Result<(), RemoteError> {
        match inner.fail_next.pop_front() {
            Some(message) => Err(RemoteError::Api(message)),
            None => Ok(()),
        }
    }

    fn sanitize(record: &ClusterRecord) -> ClusterRecord {
        let mut out = record.clone();
        out.config.password = None;
        out.config.bearer_token = None;
        if let Some(tls) = &mut out.config.tls {
            tls.key_data = None;
        }
        out
    }
}

impl Default for FakeControlPlane {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ControlPlaneApi for FakeControlPlane {
    async fn create_credential(
        &self,
        subject: &CredentialSubject,
        expires_in: Option<Duration>,
    ) -> Result<MintedCredential, RemoteError> {
        let mut inner = self.lock();
        inner.calls.push(ApiCall::CreateCredential {
            subject: subject.to_string(),
        });
        Self::check_failure(&mut inner)?;

        let name = subject.name().to_string();
        if !inner.subjects.contains(&name) {
            return Err(RemoteError::NotFound(name));
        }

        inner.minted += 1;
        let id = format!("token-{}", inner.minted);
        let issued = self.clock.now().timestamp();
        let expires = expires_in.map(|d| issued + d.as_secs() as i64);

        let raw = unsigned_token(&id, &name, Some(issued), expires);
        inner.tokens.entry(name).or_default().push(TokenSummary {
            id,
            issued_at: DateTime::from_timestamp(issued, 0),
            expires_at: expires.and_then(|s| DateTime::from_timestamp(s, 0)),
        });

        Ok(MintedCredential { raw })
    }

    async fn delete_credential(
        &self,
        subject: &CredentialSubject,
        id: &str,
    ) -> Result<(), RemoteError> {
        let mut inner = self.lock();
        inner.calls.push(ApiCall::DeleteCredential {
            subject: subject.to_string(),
            id: id.to_string(),
        });
        Self::check_failure(&mut inner)?;

        let tokens = inner
            .tokens
            .get_mut(subject.name())
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;

        let before = tokens.len();
        tokens.retain(|t| t.id != id);
        if tokens.len() == before {
            return Err(RemoteError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn get_subject(&self, name: &str) -> Result<SubjectRecord, RemoteError> {
        let mut inner = self.lock();
        inner.calls.push(ApiCall::GetSubject {
            name: name.to_string(),
        });
        Self::check_failure(&mut inner)?;

        if !inner.subjects.contains(name) {
            return Err(RemoteError::NotFound(name.to_string()));
        }

        Ok(SubjectRecord {
            name: name.to_string(),
            enabled: true,
            tokens: inner.tokens.get(name).cloned().unwrap_or_default(),
        })
    }

    async fn list_clusters(
        &self,
        server_filter: Option<&str>,
    ) -> Result<Vec<ClusterRecord>, RemoteError> {
        let mut inner = self.lock();
        inner.calls.push(ApiCall::ListClusters {
            filter: server_filter.map(str::to_string),
        });
        Self::check_failure(&mut inner)?;

        let clusters = inner
            .clusters
            .iter()
            .filter(|c| match server_filter {
                Some(filter) => canonical_server(&c.server) == canonical_server(filter),
                None => true,
            })
            .map(Self::sanitize)
            .collect();

        Ok(clusters)
    }

    async fn create_cluster(&self, record: &ClusterRecord) -> Result<ClusterRecord, RemoteError> {
        let mut inner = self.lock();
        inner.calls.push(ApiCall::CreateCluster {
            server: record.server.clone(),
        });
        Self::check_failure(&mut inner)?;

        // No uniqueness check, same as the remote.
        inner.clusters.push(record.clone());
        Ok(Self::sanitize(record))
    }

    async fn update_cluster(&self, record: &ClusterRecord) -> Result<ClusterRecord, RemoteError> {
        let mut inner = self.lock();
        inner.calls.push(ApiCall::UpdateCluster {
            server: record.server.clone(),
        });
        Self::check_failure(&mut inner)?;

        let wanted = canonical_server(&record.server).to_string();
        let existing = inner
            .clusters
            .iter_mut()
            .find(|c| canonical_server(&c.server) == wanted)
            .ok_or_else(|| RemoteError::NotFound(record.server.clone()))?;

        *existing = record.clone();
        Ok(Self::sanitize(record))
    }

    async fn delete_cluster(&self, server: &str) -> Result<(), RemoteError> {
        let mut inner = self.lock();
        inner.calls.push(ApiCall::DeleteCluster {
            server: server.to_string(),
        });
        Self::check_failure(&mut inner)?;

        let wanted = canonical_server(server).to_string();
        let before = inner.clusters.len();
        inner
            .clusters
            .retain(|c| canonical_server(&c.server) != wanted);

        if inner.clusters.len() == before {
            return Err(RemoteError::NotFound(server.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
