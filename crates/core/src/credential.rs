// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential data model
//!
//! A credential is a time-bounded access token minted by the remote
//! control plane for an account or for a role within a project. The
//! secret value exists only in the state captured at creation time; it is
//! never recoverable from a read of the remote record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Who a credential is minted for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredentialSubject {
    /// A token scoped to a whole account
    Account(String),
    /// A token scoped to a role within a project
    ProjectRole { project: String, role: String },
}

impl CredentialSubject {
    /// The subject name as the control plane addresses it
    pub fn name(&self) -> &str {
        match self {
            Self::Account(name) => name,
            Self::ProjectRole { project, .. } => project,
        }
    }

    /// The role within the project, if this is a project-scoped subject
    pub fn role(&self) -> Option<&str> {
        match self {
            Self::Account(_) => None,
            Self::ProjectRole { role, .. } => Some(role),
        }
    }
}

impl std::fmt::Display for CredentialSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Account(name) => write!(f, "{name}"),
            Self::ProjectRole { project, role } => write!(f, "{project}:{role}"),
        }
    }
}

/// Per-credential state captured at creation and supplied back as `prior`
/// on every planning cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Token identifier, taken from the minted credential's claims
    pub id: String,
    pub subject: CredentialSubject,
    /// When the token was issued. Always present on well-formed records.
    pub issued_at: Option<DateTime<Utc>>,
    /// When the token expires, if it expires at all
    pub expires_at: Option<DateTime<Utc>>,
}

impl CredentialRecord {
    /// Check the issue/expiry ordering invariant
    pub fn validate(&self) -> Result<(), CredentialInvariantError> {
        if let (Some(issued_at), Some(expires_at)) = (self.issued_at, self.expires_at) {
            if issued_at > expires_at {
                return Err(CredentialInvariantError {
                    id: self.id.clone(),
                    issued_at,
                    expires_at,
                });
            }
        }

        Ok(())
    }
}

/// Violation of the `issued_at <= expires_at` invariant
#[derive(Debug, Clone, Error)]
#[error("credential {id}: issued_at {issued_at} is after expires_at {expires_at}")]
pub struct CredentialInvariantError {
    pub id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Desired credential configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSpec {
    pub subject: CredentialSubject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Duration before the token expires. Default: no expiration.
    #[serde(default, with = "humantime_serde")]
    pub expires_in: Option<Duration>,
    /// Regenerate the token once it is older than this, even if it has
    /// not expired yet
    #[serde(default, with = "humantime_serde")]
    pub renew_after: Option<Duration>,
}

impl CredentialSpec {
    pub fn new(subject: CredentialSubject) -> Self {
        Self {
            subject,
            description: None,
            expires_in: None,
            renew_after: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
        self.expires_in = Some(expires_in);
        self
    }

    pub fn with_renew_after(mut self, renew_after: Duration) -> Self {
        self.renew_after = Some(renew_after);
        self
    }
}

#[cfg(test)]
#[path = "credential_tests.rs"]
mod tests;
