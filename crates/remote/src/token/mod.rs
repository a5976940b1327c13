// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential decoding
//!
//! The issue and expiry times of a minted credential are never computed
//! locally; they are read out of the claims embedded in the secret the
//! control plane hands back at creation time.

mod jwt;

pub use jwt::JwtDecoder;
#[cfg(any(test, feature = "test-support"))]
pub use jwt::unsigned_token;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Claims embedded in a minted credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialClaims {
    /// Token identifier (`jti`)
    pub id: String,
    /// Subject name (`sub`)
    pub subject: Option<String>,
    /// Issue time (`iat`)
    pub issued_at: Option<DateTime<Utc>>,
    /// Expiry time (`exp`)
    pub expires_at: Option<DateTime<Utc>>,
}

/// Errors from credential decoding
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed token: {0}")]
    Malformed(&'static str),
    #[error("claims segment is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("claims could not be parsed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decodes the claims embedded in a raw credential
pub trait CredentialDecoder: Clone + Send + Sync + 'static {
    fn decode(&self, raw: &str) -> Result<CredentialClaims, DecodeError>;
}
