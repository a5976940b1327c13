//! Shared helpers for spec tests

pub use pilot_core::cluster::{ClusterConfig, ClusterRecord, TlsConfig};
pub use pilot_core::credential::{CredentialRecord, CredentialSpec, CredentialSubject};
pub use pilot_core::renewal::{Decision, ReplaceReason};
pub use pilot_core::{FakeClock, LockRegistry};
pub use pilot_lifecycle::{ClusterPipeline, CredentialPipeline, LifecycleError};
pub use pilot_remote::{FakeControlPlane, JwtDecoder};
pub use std::sync::Arc;
pub use std::time::Duration;

/// One control plane with both pipelines wired to a shared lock registry
pub struct Harness {
    pub api: FakeControlPlane,
    pub credentials: CredentialPipeline<FakeControlPlane, JwtDecoder, FakeClock>,
    pub clusters: ClusterPipeline<FakeControlPlane>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_clock(FakeClock::new())
    }

    pub fn with_clock(clock: FakeClock) -> Self {
        let api = FakeControlPlane::with_clock(clock);
        let locks = Arc::new(LockRegistry::new());
        let credentials = CredentialPipeline::new(
            api.clone(),
            JwtDecoder::new(),
            Arc::clone(&locks),
            api.clock(),
        );
        let clusters = ClusterPipeline::new(api.clone(), locks);
        Self {
            api,
            credentials,
            clusters,
        }
    }
}
