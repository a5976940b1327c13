// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock registry guarding shared remote collections
//!
//! The remote control plane offers no transactions, so every sequence of
//! remote calls that must be atomic runs under one of these locks. The
//! registry is an explicitly owned value injected into each pipeline; its
//! locks live for the process lifetime and are never destroyed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

/// Classes of shared remote state, each guarded independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Common control-plane configuration
    Configuration,
    /// Secret storage, where credentials live
    Secrets,
    /// Signature key storage
    GpgKeys,
    /// The cluster registry
    Clusters,
    /// Per-project resources; always paired with a named key
    Projects,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::Configuration,
        Domain::Secrets,
        Domain::GpgKeys,
        Domain::Clusters,
        Domain::Projects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Configuration => "configuration",
            Domain::Secrets => "secrets",
            Domain::GpgKeys => "gpg-keys",
            Domain::Clusters => "clusters",
            Domain::Projects => "projects",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shared for reads, exclusive for writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Shared,
    Exclusive,
}

/// RAII guard over a domain or named lock; released on drop
#[derive(Debug)]
pub enum LockGuard {
    Shared(OwnedRwLockReadGuard<()>),
    Exclusive(OwnedRwLockWriteGuard<()>),
}

impl LockGuard {
    pub fn is_exclusive(&self) -> bool {
        matches!(self, LockGuard::Exclusive(_))
    }
}

/// Registry of domain-wide and named locks
///
/// Named locks are created lazily on first reference. The insertion step
/// is serialized through the registry mutex so two concurrent first-time
/// acquisitions for the same key always resolve to the same lock. The
/// mutex is never held across an await.
#[derive(Debug, Default)]
pub struct LockRegistry {
    domains: [Arc<RwLock<()>>; Domain::ALL.len()],
    named: Mutex<HashMap<(Domain, String), Arc<RwLock<()>>>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a whole domain.
    ///
    /// Cannot fail. Blocks until the lock is granted; cancellation is the
    /// caller's responsibility (the future is cancel-safe until a guard
    /// is returned).
    pub async fn acquire_global(&self, domain: Domain, mode: LockMode) -> LockGuard {
        let lock = Arc::clone(&self.domains[domain as usize]);
        Self::acquire(lock, mode).await
    }

    /// Acquire the lock for a dynamic key within a domain, creating the
    /// lock on first reference.
    pub async fn acquire_named(&self, domain: Domain, key: &str, mode: LockMode) -> LockGuard {
        let lock = {
            let mut named = self.named.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(
                named
                    .entry((domain, key.to_string()))
                    .or_insert_with(|| Arc::new(RwLock::new(()))),
            )
        };

        Self::acquire(lock, mode).await
    }

    async fn acquire(lock: Arc<RwLock<()>>, mode: LockMode) -> LockGuard {
        match mode {
            LockMode::Shared => LockGuard::Shared(lock.read_owned().await),
            LockMode::Exclusive => LockGuard::Exclusive(lock.write_owned().await),
        }
    }

    /// Number of named locks created so far
    pub fn named_len(&self) -> usize {
        self.named.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Keys of all named locks created so far
    pub fn named_keys(&self) -> Vec<(Domain, String)> {
        self.named
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
