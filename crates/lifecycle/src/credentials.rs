// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential lifecycle pipeline
//!
//! Account tokens are guarded by the `Secrets` domain lock; project-role
//! tokens by a named per-project lock. Reads of account subjects take the
//! `Configuration` lock instead: subjects live in configuration storage
//! even though their tokens live in secret storage.

use crate::LifecycleError;
use pilot_core::credential::{CredentialRecord, CredentialSpec, CredentialSubject};
use pilot_core::renewal::{decide, Decision};
use pilot_core::{Clock, Domain, Event, LockGuard, LockMode, LockRegistry};
use pilot_remote::{ControlPlaneApi, CredentialDecoder};
use std::sync::Arc;

/// A credential minted this cycle. The secret is never recoverable from a
/// later read; keep it or lose it.
#[derive(Debug, Clone)]
pub struct CreatedCredential {
    pub record: CredentialRecord,
    pub secret: String,
}

/// Lifecycle operations for account and project-role credentials
#[derive(Clone)]
pub struct CredentialPipeline<A, D, C> {
    api: A,
    decoder: D,
    locks: Arc<LockRegistry>,
    clock: C,
}

impl<A, D, C> CredentialPipeline<A, D, C>
where
    A: ControlPlaneApi,
    D: CredentialDecoder,
    C: Clock,
{
    pub fn new(api: A, decoder: D, locks: Arc<LockRegistry>, clock: C) -> Self {
        Self {
            api,
            decoder,
            locks,
            clock,
        }
    }

    /// Plan-time decision: does the prior credential survive this cycle?
    ///
    /// Pure apart from logging; no lock is taken and no remote call made.
    pub fn plan(
        &self,
        prior: Option<&CredentialRecord>,
        desired: Option<&CredentialSpec>,
    ) -> Decision {
        let (decision, events) = decide(prior, desired, self.clock.now());

        for event in events {
            match event {
                Event::CredentialIssueTimeMissing { id } => {
                    tracing::warn!(
                        id = %id,
                        "credential has no issue time; age is unknowable, keeping it"
                    );
                }
                Event::CredentialExpired { id, expired_at } => {
                    tracing::debug!(id = %id, %expired_at, "credential expired, will replace");
                }
                Event::CredentialRenewalDue {
                    id,
                    age_secs,
                    renew_after_secs,
                } => {
                    tracing::debug!(
                        id = %id,
                        age_secs,
                        renew_after_secs,
                        "credential past renewal window, will replace"
                    );
                }
            }
        }

        decision
    }

    /// Mint a new credential and capture its claims as the new record.
    pub async fn create(&self, spec: &CredentialSpec) -> Result<CreatedCredential, LifecycleError> {
        let _guard = self.write_lock(&spec.subject).await;

        let minted = self
            .api
            .create_credential(&spec.subject, spec.expires_in)
            .await?;
        let claims = self.decoder.decode(&minted.raw)?;

        let record = CredentialRecord {
            id: claims.id,
            subject: spec.subject.clone(),
            issued_at: claims.issued_at,
            expires_at: claims.expires_at,
        };
        record.validate()?;

        tracing::trace!(subject = %spec.subject, id = %record.id, "created credential");

        Ok(CreatedCredential {
            record,
            secret: minted.raw,
        })
    }

    /// Re-observe the subject. `None` means it is gone remotely and local
    /// state should be cleared; this is not an error.
    pub async fn read(
        &self,
        prior: &CredentialRecord,
    ) -> Result<Option<CredentialRecord>, LifecycleError> {
        let _guard = self.read_lock(&prior.subject).await;

        match self.api.get_subject(prior.subject.name()).await {
            Ok(_) => Ok(Some(prior.clone())),
            Err(e) if e.is_not_found() => {
                tracing::debug!(
                    subject = %prior.subject,
                    "subject gone remotely, clearing credential state"
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Destroy and reissue a credential whose plan decision was replace.
    ///
    /// Each half takes its own lock: one lock per remote call sequence.
    pub async fn replace(
        &self,
        prior: &CredentialRecord,
        spec: &CredentialSpec,
    ) -> Result<CreatedCredential, LifecycleError> {
        self.delete(prior).await?;
        self.create(spec).await
    }

    /// Delete the credential. Already gone remotely counts as success.
    pub async fn delete(&self, record: &CredentialRecord) -> Result<(), LifecycleError> {
        let _guard = self.write_lock(&record.subject).await;

        match self
            .api
            .delete_credential(&record.subject, &record.id)
            .await
        {
            Ok(()) => {
                tracing::trace!(subject = %record.subject, id = %record.id, "deleted credential");
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!(id = %record.id, "credential already gone");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write_lock(&self, subject: &CredentialSubject) -> LockGuard {
        match subject {
            CredentialSubject::Account(_) => {
                self.locks
                    .acquire_global(Domain::Secrets, LockMode::Exclusive)
                    .await
            }
            CredentialSubject::ProjectRole { project, .. } => {
                self.locks
                    .acquire_named(Domain::Projects, project, LockMode::Exclusive)
                    .await
            }
        }
    }

    async fn read_lock(&self, subject: &CredentialSubject) -> LockGuard {
        match subject {
            CredentialSubject::Account(_) => {
                self.locks
                    .acquire_global(Domain::Configuration, LockMode::Shared)
                    .await
            }
            CredentialSubject::ProjectRole { project, .. } => {
                self.locks
                    .acquire_named(Domain::Projects, project, LockMode::Shared)
                    .await
            }
        }
    }
}

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;
