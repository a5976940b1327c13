// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for lifecycle pipelines

use pilot_core::credential::CredentialInvariantError;
use pilot_remote::{DecodeError, RemoteError};
use thiserror::Error;

/// Errors that can occur while driving a lifecycle operation
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A registration for the same canonical server already exists. The
    /// remote API performs no such check itself, so this aborts the
    /// operation before anything is created.
    #[error("cluster with server address {server} already exists")]
    Conflict { server: String },
    /// Remote call failed. `NotFound` never reaches here from read or
    /// delete paths; those treat it as "already gone".
    #[error(transparent)]
    Remote(#[from] RemoteError),
    /// The minted credential's claims could not be decoded
    #[error("credential claims could not be decoded: {0}")]
    Credential(#[from] DecodeError),
    /// The minted credential's claims are internally inconsistent
    #[error(transparent)]
    Invariant(#[from] CredentialInvariantError),
}
