//! Credential reconcile specs
//!
//! Each test walks a full reconcile cycle: plan, apply, re-observe.

use crate::prelude::*;
use chrono::{DateTime, Utc};

fn epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn renewing_spec(renew_after: u64) -> CredentialSpec {
    CredentialSpec::new(CredentialSubject::Account("ci".to_string()))
        .with_renew_after(Duration::from_secs(renew_after))
}

#[tokio::test]
async fn reconcile_keeps_then_renews_an_aging_credential() {
    let h = Harness::with_clock(FakeClock::at(epoch()));
    h.api.seed_subject("ci");

    let spec = renewing_spec(3600);
    let created = h.credentials.create(&spec).await.unwrap();
    assert_eq!(created.record.issued_at, Some(epoch()));

    // Cycle 1: fresh, nothing to do.
    assert_eq!(
        h.credentials.plan(Some(&created.record), Some(&spec)),
        Decision::Keep
    );

    // Cycle 2: exactly at the renewal window. Still a keep; the window
    // must be exceeded, not merely reached.
    h.api.clock().advance(Duration::from_secs(3600));
    assert_eq!(
        h.credentials.plan(Some(&created.record), Some(&spec)),
        Decision::Keep
    );

    // Cycle 3: one second past the window.
    h.api.clock().advance(Duration::from_secs(1));
    assert_eq!(
        h.credentials.plan(Some(&created.record), Some(&spec)),
        Decision::Replace(ReplaceReason::RenewalDue)
    );

    let replaced = h.credentials.replace(&created.record, &spec).await.unwrap();
    assert_eq!(h.api.tokens_for("ci").len(), 1);
    assert_eq!(
        replaced.record.issued_at,
        Some(epoch() + chrono::Duration::seconds(3601))
    );

    // Cycle 4: the replacement is fresh again.
    assert_eq!(
        h.credentials.plan(Some(&replaced.record), Some(&spec)),
        Decision::Keep
    );
}

#[tokio::test]
async fn reconcile_replaces_an_expired_credential_before_checking_age() {
    let h = Harness::with_clock(FakeClock::at(epoch()));
    h.api.seed_subject("ci");

    // Expires well before the renewal window would trigger.
    let spec = renewing_spec(86_400).with_expires_in(Duration::from_secs(600));
    let created = h.credentials.create(&spec).await.unwrap();

    h.api.clock().advance(Duration::from_secs(601));
    assert_eq!(
        h.credentials.plan(Some(&created.record), Some(&spec)),
        Decision::Replace(ReplaceReason::Expired)
    );
}

#[tokio::test]
async fn reconcile_clears_state_for_a_vanished_subject() {
    let h = Harness::new();
    h.api.seed_subject("ci");

    let spec = renewing_spec(3600);
    let created = h.credentials.create(&spec).await.unwrap();

    h.api.remove_subject("ci");

    // The read reports "gone", and the embedding caller re-creates.
    assert_eq!(h.credentials.read(&created.record).await.unwrap(), None);

    h.api.seed_subject("ci");
    let recreated = h.credentials.create(&spec).await.unwrap();
    assert_ne!(recreated.record.id, created.record.id);
}

#[tokio::test]
async fn reconcile_leaves_a_legacy_credential_of_unknown_age_alone() {
    let h = Harness::new();

    let spec = renewing_spec(3600);
    let legacy = CredentialRecord {
        id: "token-legacy".to_string(),
        subject: spec.subject.clone(),
        issued_at: None,
        expires_at: None,
    };

    let decision = h.credentials.plan(Some(&legacy), Some(&spec));
    assert_eq!(decision, Decision::Unknown);
    assert!(!decision.requires_replace());
}

#[tokio::test]
async fn reconcile_without_renewal_config_never_replaces() {
    let h = Harness::new();
    h.api.seed_subject("ci");

    let spec = CredentialSpec::new(CredentialSubject::Account("ci".to_string()));
    let created = h.credentials.create(&spec).await.unwrap();

    h.api.clock().advance(Duration::from_secs(365 * 86_400));
    assert_eq!(
        h.credentials.plan(Some(&created.record), Some(&spec)),
        Decision::Keep
    );
}
