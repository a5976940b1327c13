// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pilot-core: Core library for the pilot control-plane lifecycle engine
//!
//! This crate provides:
//! - A lock registry serializing access to shared remote collections
//! - A pure plan-time renewal state machine for credentials
//! - Cluster identity resolution (canonical server keys, composed ids)
//! - The data model shared by the lifecycle pipelines

pub mod clock;

pub mod cluster;
pub mod coordination;
pub mod credential;
pub mod event;
pub mod identity;
pub mod renewal;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use cluster::{ClusterConfig, ClusterRecord, TlsConfig};
pub use coordination::{Domain, LockGuard, LockMode, LockRegistry};
pub use credential::{CredentialRecord, CredentialSpec, CredentialSubject};
pub use event::Event;
pub use identity::{canonical_server, compose_id, conflicts_with_existing, parse_id};
pub use renewal::{decide, Decision, ReplaceReason};
