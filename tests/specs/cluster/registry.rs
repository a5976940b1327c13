//! Cluster registry specs
//!
//! Full register, read, update, deregister passes over the registry.

use crate::prelude::*;

fn record_with_secrets(server: &str) -> ClusterRecord {
    ClusterRecord::new(server)
        .with_name("prod")
        .with_config(ClusterConfig {
            username: Some("admin".to_string()),
            password: Some("hunter2".to_string()),
            bearer_token: Some("bearer".to_string()),
            tls: Some(TlsConfig {
                ca_data: Some("ca".to_string()),
                key_data: Some("key".to_string()),
                ..TlsConfig::default()
            }),
        })
}

#[tokio::test]
async fn full_registration_lifecycle_preserves_secrets_throughout() {
    let h = Harness::new();

    let created = h
        .clusters
        .register(&record_with_secrets("https://k8s.example.com"))
        .await
        .unwrap();
    assert_eq!(created.id(), "https://k8s.example.com/prod");
    assert_eq!(created.config.password.as_deref(), Some("hunter2"));

    let observed = h
        .clusters
        .read(&created.id(), Some(&created))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(observed.config.bearer_token.as_deref(), Some("bearer"));
    assert_eq!(
        observed.config.tls.as_ref().and_then(|t| t.key_data.as_deref()),
        Some("key")
    );

    let mut renamed = observed.clone();
    renamed.name = Some("production".to_string());
    let updated = h.clusters.update(&renamed).await.unwrap();
    assert_eq!(updated.id(), "https://k8s.example.com/production");
    assert_eq!(updated.config.password.as_deref(), Some("hunter2"));

    h.clusters.deregister(&updated.id()).await.unwrap();
    assert_eq!(h.api.cluster_count(), 0);
    assert_eq!(h.clusters.read(&updated.id(), None).await.unwrap(), None);
}

#[tokio::test]
async fn registration_is_unique_by_canonical_server() {
    let h = Harness::new();

    h.clusters
        .register(&ClusterRecord::new("https://k8s.example.com"))
        .await
        .unwrap();

    // Same server, different spelling and different name: still a conflict.
    let err = h
        .clusters
        .register(&ClusterRecord::new("https://k8s.example.com/").with_name("other"))
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Conflict { .. }));
    assert_eq!(h.api.cluster_count(), 1);
}

#[tokio::test]
async fn unnamed_registrations_are_addressed_by_server_alone() {
    let h = Harness::new();

    let created = h
        .clusters
        .register(&ClusterRecord::new("https://k8s.example.com:6443"))
        .await
        .unwrap();
    assert_eq!(created.id(), "https://k8s.example.com:6443");

    let observed = h.clusters.read(&created.id(), None).await.unwrap().unwrap();
    assert_eq!(observed.server, "https://k8s.example.com:6443");
    assert_eq!(observed.name, None);
}
