// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events emitted by the plan-time state machine
//!
//! The renewal decision function is pure; anything it wants to tell the
//! outside world travels as an event alongside the decision. Pipelines
//! translate these into log output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events emitted by plan-time decisions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The credential's expiry time has passed
    CredentialExpired {
        id: String,
        expired_at: DateTime<Utc>,
    },
    /// The credential is older than its configured renewal window
    CredentialRenewalDue {
        id: String,
        age_secs: i64,
        renew_after_secs: u64,
    },
    /// The credential carries no issue time, so its age is unknowable.
    /// Every credential has an issue date; observing this is a bug
    /// somewhere upstream and is surfaced as a warning, never a forced
    /// replacement.
    CredentialIssueTimeMissing { id: String },
}

impl Event {
    /// Short name for tracing
    pub fn name(&self) -> &'static str {
        match self {
            Event::CredentialExpired { .. } => "credential:expired",
            Event::CredentialRenewalDue { .. } => "credential:renewal-due",
            Event::CredentialIssueTimeMissing { .. } => "credential:issue-time-missing",
        }
    }
}
