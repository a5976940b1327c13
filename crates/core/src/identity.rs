// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster identity resolution
//!
//! The control plane performs no uniqueness checks on cluster
//! registrations, so identity lives entirely on this side: two
//! registrations are the same cluster iff their canonicalized server
//! addresses are equal (case-sensitive).

use crate::cluster::ClusterRecord;

const SCHEME_PREFIX: &str = "https://";

/// Canonical form of a server address: exactly one trailing `/` stripped
pub fn canonical_server(server: &str) -> &str {
    server.strip_suffix('/').unwrap_or(server)
}

/// True iff an existing registration already claims the desired server
pub fn conflicts_with_existing(desired_server: &str, existing: &[ClusterRecord]) -> bool {
    let desired = canonical_server(desired_server);

    existing
        .iter()
        .any(|c| canonical_server(&c.server) == desired)
}

/// Compose the registration identifier from server address and display
/// name. The name is appended only when set and distinct from the server.
pub fn compose_id(server: &str, name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() && name != server => format!("{server}/{name}"),
        _ => server.to_string(),
    }
}

/// Split a registration identifier back into server address and display
/// name.
///
/// An `https://` scheme prefix is set aside before splitting on the last
/// `/`, so server URLs survive intact. Inverse of [`compose_id`] whenever
/// the name contains no `/`; names containing `/` cannot be recovered
/// unambiguously.
pub fn parse_id(id: &str) -> (String, Option<String>) {
    let rest = id.strip_prefix(SCHEME_PREFIX).unwrap_or(id);

    match rest.rsplit_once('/') {
        Some((server, name)) if !server.is_empty() && !name.is_empty() => {
            if rest.len() != id.len() {
                (format!("{SCHEME_PREFIX}{server}"), Some(name.to_string()))
            } else {
                (server.to_string(), Some(name.to_string()))
            }
        }
        _ => (id.to_string(), None),
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
