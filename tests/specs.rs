//! Behavioral specifications for the pilot workspace.
//!
//! These tests drive the public API end to end against the in-memory
//! control plane, the way an embedding reconciler would.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// credential/
#[path = "specs/credential/reconcile.rs"]
mod credential_reconcile;

// cluster/
#[path = "specs/cluster/registry.rs"]
mod cluster_registry;
