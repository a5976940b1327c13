// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control-plane API client trait
//!
//! The remote API offers no transactions, no compare-and-swap create and
//! no server-side uniqueness enforcement; every consistency guarantee is
//! supplied by the callers (see `pilot_core::coordination`).

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ApiCall, FakeControlPlane};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pilot_core::cluster::ClusterRecord;
use pilot_core::credential::CredentialSubject;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the remote control plane
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The remote entity does not exist. Read and delete paths treat this
    /// as "already gone", never as a failure.
    #[error("not found: {0}")]
    NotFound(String),
    /// Network or remote-side failure. Fatal for the current operation;
    /// there are no internal retries, recovery belongs to the next
    /// reconciliation cycle.
    #[error("control plane error: {0}")]
    Api(String),
}

impl RemoteError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::NotFound(_))
    }
}

/// A freshly minted credential. The secret exists only here; it is never
/// recoverable from a later read of the remote record.
#[derive(Debug, Clone)]
pub struct MintedCredential {
    pub raw: String,
}

/// Summary of a token as stored against a subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSummary {
    pub id: String,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// A subject record as returned by the control plane
#[derive(Debug, Clone)]
pub struct SubjectRecord {
    pub name: String,
    pub enabled: bool,
    pub tokens: Vec<TokenSummary>,
}

/// Client for the remote control-plane API
#[async_trait]
pub trait ControlPlaneApi: Clone + Send + Sync + 'static {
    /// Mint a credential for a subject
    async fn create_credential(
        &self,
        subject: &CredentialSubject,
        expires_in: Option<Duration>,
    ) -> Result<MintedCredential, RemoteError>;

    /// Delete a credential by id
    async fn delete_credential(
        &self,
        subject: &CredentialSubject,
        id: &str,
    ) -> Result<(), RemoteError>;

    /// Fetch a subject record by name
    async fn get_subject(&self, name: &str) -> Result<SubjectRecord, RemoteError>;

    /// List cluster registrations, optionally filtered by server address
    async fn list_clusters(
        &self,
        server_filter: Option<&str>,
    ) -> Result<Vec<ClusterRecord>, RemoteError>;

    /// Register a cluster. Performs no uniqueness check.
    async fn create_cluster(&self, record: &ClusterRecord) -> Result<ClusterRecord, RemoteError>;

    /// Update an existing cluster registration
    async fn update_cluster(&self, record: &ClusterRecord) -> Result<ClusterRecord, RemoteError>;

    /// Delete a cluster registration by server address
    async fn delete_cluster(&self, server: &str) -> Result<(), RemoteError>;
}
