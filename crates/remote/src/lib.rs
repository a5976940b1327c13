// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pilot-remote: the control-plane client boundary
//!
//! Trait definitions for the remote control-plane API and the credential
//! decoder, plus fake implementations for tests. The real transport lives
//! outside this workspace; pipelines only ever see these traits.

pub mod api;
pub mod token;

pub use api::{ControlPlaneApi, MintedCredential, RemoteError, SubjectRecord, TokenSummary};
pub use token::{CredentialClaims, CredentialDecoder, DecodeError, JwtDecoder};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use api::{ApiCall, FakeControlPlane};
#[cfg(any(test, feature = "test-support"))]
pub use token::unsigned_token;
