// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JWT claims extraction
//!
//! Claims extraction only: the control plane is both issuer and verifier
//! of its tokens, so no signature validation happens on this side.

use super::{CredentialClaims, CredentialDecoder, DecodeError};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Registered JWT claim set as serialized on the wire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RegisteredClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    jti: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// Decoder for compact-serialized JWTs
#[derive(Clone, Copy, Default)]
pub struct JwtDecoder;

impl JwtDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialDecoder for JwtDecoder {
    fn decode(&self, raw: &str) -> Result<CredentialClaims, DecodeError> {
        let mut segments = raw.split('.');
        let (Some(_header), Some(payload)) = (segments.next(), segments.next()) else {
            return Err(DecodeError::Malformed("expected header.payload.signature"));
        };

        let bytes = URL_SAFE_NO_PAD.decode(payload)?;
        let claims: RegisteredClaims = serde_json::from_slice(&bytes)?;

        let Some(id) = claims.jti else {
            return Err(DecodeError::Malformed("missing jti claim"));
        };

        Ok(CredentialClaims {
            id,
            subject: claims.sub,
            issued_at: claims.iat.and_then(|s| DateTime::from_timestamp(s, 0)),
            expires_at: claims.exp.and_then(|s| DateTime::from_timestamp(s, 0)),
        })
    }
}

/// Build an unsigned compact JWT carrying the given claims.
///
/// Used by the fake control plane to mint tokens; real tokens are signed
/// by the remote issuer.
#[cfg(any(test, feature = "test-support"))]
pub fn unsigned_token(
    id: &str,
    subject: &str,
    issued_at: Option<i64>,
    expires_at: Option<i64>,
) -> String {
    let claims = RegisteredClaims {
        jti: Some(id.to_string()),
        sub: Some(subject.to_string()),
        iat: issued_at,
        exp: expires_at,
    };

    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap_or_default());
    format!("{header}.{payload}.")
}

#[cfg(test)]
#[path = "jwt_tests.rs"]
mod tests;
