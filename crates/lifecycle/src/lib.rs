// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pilot-lifecycle: lifecycle pipelines over the remote control plane
//!
//! Each pipeline operation acquires at most one domain or named lock,
//! performs exactly one remote call sequence under it, and releases. No
//! operation retries internally; a failed remote call surfaces
//! immediately and the next reconciliation cycle re-observes remote
//! state.

mod clusters;
mod credentials;
mod error;

pub use clusters::ClusterPipeline;
pub use credentials::{CreatedCredential, CredentialPipeline};
pub use error::LifecycleError;
