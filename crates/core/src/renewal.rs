// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plan-time renewal state machine for credentials
//!
//! A pure decision function evaluated once per planning cycle, before any
//! remote call. It never performs the replacement itself: on `Replace` the
//! surrounding pipeline destroys and recreates the credential, and the new
//! issue/expiry times are decoded from the freshly minted token's claims.

use crate::credential::{CredentialRecord, CredentialSpec};
use crate::event::Event;
use chrono::{DateTime, Utc};

/// Outcome of a plan-time renewal check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Prior state is still valid and is carried forward unchanged
    Keep,
    /// The credential must be destroyed and reissued this cycle
    Replace(ReplaceReason),
    /// The credential's age cannot be determined. Fail-safe: pipelines
    /// treat this as keep and surface the accompanying warning event.
    Unknown,
}

impl Decision {
    pub fn requires_replace(&self) -> bool {
        matches!(self, Decision::Replace(_))
    }
}

/// Why a credential is being forcibly replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceReason {
    /// The expiry time has passed
    Expired,
    /// The token is older than its configured renewal window
    RenewalDue,
}

/// Decide whether an existing credential must be replaced.
///
/// `prior` is the state captured when the credential was last minted;
/// `desired` is the configuration for this cycle (absent when the
/// credential is being removed). Never forces replacement on ambiguous
/// input.
pub fn decide(
    prior: Option<&CredentialRecord>,
    desired: Option<&CredentialSpec>,
    now: DateTime<Utc>,
) -> (Decision, Vec<Event>) {
    // Nothing to replace on first creation.
    let Some(prior) = prior else {
        return (Decision::Keep, Vec::new());
    };

    // The destroy path handles removal, not a forced replace.
    let Some(desired) = desired else {
        return (Decision::Keep, Vec::new());
    };

    if let Some(expires_at) = prior.expires_at {
        if expires_at < now {
            let events = vec![Event::CredentialExpired {
                id: prior.id.clone(),
                expired_at: expires_at,
            }];
            return (Decision::Replace(ReplaceReason::Expired), events);
        }
    }

    let Some(renew_after) = desired.renew_after else {
        return (Decision::Keep, Vec::new());
    };

    // A missing issue date means the token's age is unknowable.
    let Some(issued_at) = prior.issued_at else {
        let events = vec![Event::CredentialIssueTimeMissing {
            id: prior.id.clone(),
        }];
        return (Decision::Unknown, events);
    };

    let age = now - issued_at;
    let window =
        chrono::Duration::from_std(renew_after).unwrap_or_else(|_| chrono::Duration::MAX);

    if age > window {
        let events = vec![Event::CredentialRenewalDue {
            id: prior.id.clone(),
            age_secs: age.num_seconds(),
            renew_after_secs: renew_after.as_secs(),
        }];
        return (Decision::Replace(ReplaceReason::RenewalDue), events);
    }

    (Decision::Keep, Vec::new())
}

#[cfg(test)]
#[path = "renewal_tests.rs"]
mod tests;
