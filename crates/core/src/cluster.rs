// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster registration data model
//!
//! A registration is unique by its canonicalized server address, not by
//! name; the remote API enforces nothing, so callers must check before
//! creating (see [`crate::identity`]).

use crate::identity::compose_id;
use serde::{Deserialize, Serialize};

/// TLS material for connecting to a cluster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsConfig {
    /// PEM-encoded root certificate bundle
    pub ca_data: Option<String>,
    /// PEM-encoded client certificate
    pub cert_data: Option<String>,
    /// PEM-encoded client key. Sensitive; never returned by the remote API.
    pub key_data: Option<String>,
    /// Skip server certificate verification
    pub insecure: bool,
    /// Name to pass to the server for SNI
    pub server_name: Option<String>,
}

/// Connection settings for a registered cluster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfig {
    pub username: Option<String>,
    /// Sensitive; never returned by the remote API
    pub password: Option<String>,
    /// Sensitive; never returned by the remote API
    pub bearer_token: Option<String>,
    pub tls: Option<TlsConfig>,
}

/// A cluster registration as known to the control plane
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRecord {
    /// API server URL. Uniqueness is defined by its canonical form.
    pub server: String,
    /// Display name. Defaults to the server address when omitted.
    pub name: Option<String>,
    /// Project this registration is scoped to, if any
    pub project: Option<String>,
    /// Namespaces accessible in the cluster; empty means all
    pub namespaces: Vec<String>,
    pub config: ClusterConfig,
}

impl ClusterRecord {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_config(mut self, config: ClusterConfig) -> Self {
        self.config = config;
        self
    }

    /// The identifier for this registration
    pub fn id(&self) -> String {
        compose_id(&self.server, self.name.as_deref())
    }

    /// Copy sensitive connection material forward from prior state.
    ///
    /// The remote API never returns passwords, bearer tokens, or client
    /// keys; after a read or update those fields only exist in the state
    /// captured when the registration was last written.
    pub fn carry_sensitive_from(&mut self, prior: &ClusterRecord) {
        if self.config.password.is_none() {
            self.config.password.clone_from(&prior.config.password);
        }

        if self.config.bearer_token.is_none() {
            self.config.bearer_token.clone_from(&prior.config.bearer_token);
        }

        if let Some(prior_tls) = &prior.config.tls {
            let tls = self.config.tls.get_or_insert_with(TlsConfig::default);
            if tls.key_data.is_none() {
                tls.key_data.clone_from(&prior_tls.key_data);
            }
        }
    }
}

#[cfg(test)]
#[path = "cluster_tests.rs"]
mod tests;
