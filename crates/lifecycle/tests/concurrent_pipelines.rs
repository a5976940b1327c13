// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concurrency tests: pipelines racing on shared remote collections

use pilot_core::cluster::ClusterRecord;
use pilot_core::credential::{CredentialSpec, CredentialSubject};
use pilot_core::{Domain, LockRegistry};
use pilot_lifecycle::{ClusterPipeline, CredentialPipeline, LifecycleError};
use pilot_remote::{FakeControlPlane, JwtDecoder};
use std::sync::Arc;

fn project_spec(project: &str) -> CredentialSpec {
    CredentialSpec::new(CredentialSubject::ProjectRole {
        project: project.to_string(),
        role: "deployer".to_string(),
    })
}

/// Two pipelines racing to register the same server must produce exactly
/// one registration and one conflict, every time.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_registrations_yield_one_winner() {
    for round in 0..20 {
        let api = FakeControlPlane::new();
        let locks = Arc::new(LockRegistry::new());
        let server = format!("https://cluster-{round}.example.com");

        let a = {
            let pipeline = ClusterPipeline::new(api.clone(), Arc::clone(&locks));
            let record = ClusterRecord::new(&server);
            tokio::spawn(async move { pipeline.register(&record).await })
        };
        let b = {
            let pipeline = ClusterPipeline::new(api.clone(), Arc::clone(&locks));
            let record = ClusterRecord::new(format!("{server}/"));
            tokio::spawn(async move { pipeline.register(&record).await })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let wins = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(LifecycleError::Conflict { .. })))
            .count();

        assert_eq!(wins, 1, "round {round}: expected exactly one winner");
        assert_eq!(conflicts, 1, "round {round}: expected exactly one conflict");
        assert_eq!(api.cluster_count(), 1, "round {round}: duplicate registration");
    }
}

/// Concurrent first-time token creation for one project must converge on
/// a single named lock and mint every token.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_project_token_creation_shares_one_lock() {
    const CALLERS: usize = 100;

    let api = FakeControlPlane::new();
    api.seed_subject("payments");
    let locks = Arc::new(LockRegistry::new());

    let mut handles = Vec::with_capacity(CALLERS);
    for _ in 0..CALLERS {
        let pipeline = CredentialPipeline::new(
            api.clone(),
            JwtDecoder::new(),
            Arc::clone(&locks),
            api.clock(),
        );
        handles.push(tokio::spawn(async move {
            pipeline.create(&project_spec("payments")).await
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(api.tokens_for("payments").len(), CALLERS);
    assert_eq!(
        locks.named_keys(),
        vec![(Domain::Projects, "payments".to_string())]
    );
}

/// Credential and cluster operations live in different domains and must
/// interleave freely.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn credential_and_cluster_domains_do_not_block_each_other() {
    let api = FakeControlPlane::new();
    api.seed_subject("admin");
    let locks = Arc::new(LockRegistry::new());

    let credentials = {
        let pipeline = CredentialPipeline::new(
            api.clone(),
            JwtDecoder::new(),
            Arc::clone(&locks),
            api.clock(),
        );
        tokio::spawn(async move {
            for _ in 0..50 {
                pipeline
                    .create(&CredentialSpec::new(CredentialSubject::Account(
                        "admin".to_string(),
                    )))
                    .await
                    .unwrap();
            }
        })
    };

    let clusters = {
        let pipeline = ClusterPipeline::new(api.clone(), Arc::clone(&locks));
        tokio::spawn(async move {
            for i in 0..50 {
                pipeline
                    .register(&ClusterRecord::new(format!("https://c{i}.example.com")))
                    .await
                    .unwrap();
            }
        })
    };

    credentials.await.unwrap();
    clusters.await.unwrap();

    assert_eq!(api.tokens_for("admin").len(), 50);
    assert_eq!(api.cluster_count(), 50);
}
