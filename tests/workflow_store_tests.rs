//! Document workflow store tests
//!
//! These tests verify the lifecycle and audit rules end to end:
//! - the registration -> purchasing -> billing -> operations walkthrough
//! - new-version attachments never move the lifecycle
//! - every mutation appends exactly one audit entry
//! - lookups by unknown order code change nothing
//! - list() hands out deep copies, never live references

use docuflow::{
    Area, AuditAction, DeliveryState, DocumentState, DocumentStore, FileRef, StageArea, UserRef,
};

mod fixtures;
use fixtures::*;

#[tokio::test]
async fn test_full_workflow_walkthrough() {
    let store = DocumentStore::in_memory();

    let doc = store
        .create("OC-100", FileRef::new("po.pdf"), &SALES_SUPERVISOR)
        .await;
    assert_eq!(doc.state, DocumentState::PendingPurchasing);
    assert_eq!(doc.history.len(), 1);
    assert_eq!(doc.history[0].action, AuditAction::Registered);
    assert_eq!(doc.history[0].file_name, "po.pdf");
    assert_eq!(doc.created_by, SALES_SUPERVISOR.id);
    assert!(doc.delivery_state.is_none());

    // First purchasing attachment advances exactly one stage.
    let doc = store
        .attach(
            "OC-100",
            StageArea::Purchasing,
            FileRef::new("invoice1.pdf"),
            &PURCHASING_USER,
            false,
        )
        .await
        .unwrap();
    assert_eq!(doc.state, DocumentState::PendingBilling);
    assert_eq!(doc.history.len(), 2);
    assert_eq!(
        doc.attachments.bucket(StageArea::Purchasing),
        &[FileRef::new("invoice1.pdf")]
    );

    // A new version lands in the bucket but leaves the state alone.
    let doc = store
        .attach(
            "OC-100",
            StageArea::Purchasing,
            FileRef::new("invoice2.pdf"),
            &PURCHASING_USER,
            true,
        )
        .await
        .unwrap();
    assert_eq!(doc.state, DocumentState::PendingBilling);
    assert_eq!(doc.history.len(), 3);
    assert_eq!(
        doc.attachments.bucket(StageArea::Purchasing),
        &[FileRef::new("invoice1.pdf"), FileRef::new("invoice2.pdf")]
    );
    assert_eq!(doc.history[2].action, AuditAction::NewVersionAttached);

    // Billing and operations complete the lifecycle.
    let doc = store
        .attach(
            "OC-100",
            StageArea::Billing,
            FileRef::new("bill.pdf"),
            &BILLING_USER,
            false,
        )
        .await
        .unwrap();
    assert_eq!(doc.state, DocumentState::PendingOperations);

    let doc = store
        .attach(
            "OC-100",
            StageArea::Operations,
            FileRef::new("dispatch.pdf"),
            &OPERATIONS_USER,
            false,
        )
        .await
        .unwrap();
    assert_eq!(doc.state, DocumentState::Completed);
    assert_eq!(doc.history.len(), 5);

    // Delivery is a side-state on top of the terminal lifecycle state.
    let doc = store
        .set_delivery_state("OC-100", DeliveryState::Delivered, &OPERATIONS_USER)
        .await
        .unwrap();
    assert_eq!(doc.state, DocumentState::Completed);
    assert_eq!(doc.delivery_state, Some(DeliveryState::Delivered));
    assert_eq!(doc.history.len(), 6);
    assert_eq!(
        doc.history[5].action,
        AuditAction::DeliveryUpdated(DeliveryState::Delivered)
    );
    assert_eq!(doc.history[5].file_name, "-");
}

#[tokio::test]
async fn test_unknown_order_code_is_a_no_op() {
    let store = seeded_store().await;
    let before = store.list().await;

    let result = store
        .attach(
            "OC-NONEXISTENT",
            StageArea::Purchasing,
            FileRef::new("x.pdf"),
            &PURCHASING_USER,
            false,
        )
        .await;
    assert!(result.is_none());

    let result = store
        .remove_attachment(
            "OC-NONEXISTENT",
            StageArea::Billing,
            &FileRef::new("x.pdf"),
            &BILLING_USER,
        )
        .await;
    assert!(result.is_none());

    let result = store
        .set_delivery_state("OC-NONEXISTENT", DeliveryState::Waiting, &OPERATIONS_USER)
        .await;
    assert!(result.is_none());

    assert_eq!(store.list().await, before);
}

#[tokio::test]
async fn test_every_mutation_appends_exactly_one_audit_entry() {
    let store = DocumentStore::in_memory();
    let doc = store
        .create("OC-200", FileRef::new("po.pdf"), &SALES_ASSISTANT)
        .await;
    let mut expected = doc.history.len();
    assert_eq!(expected, 1);

    let doc = store
        .attach(
            "OC-200",
            StageArea::Purchasing,
            FileRef::new("a.pdf"),
            &PURCHASING_USER,
            false,
        )
        .await
        .unwrap();
    expected += 1;
    assert_eq!(doc.history.len(), expected);

    let doc = store
        .remove_attachment(
            "OC-200",
            StageArea::Purchasing,
            &FileRef::new("a.pdf"),
            &PURCHASING_USER,
        )
        .await
        .unwrap();
    expected += 1;
    assert_eq!(doc.history.len(), expected);

    let doc = store
        .set_delivery_state("OC-200", DeliveryState::Waiting, &OPERATIONS_USER)
        .await
        .unwrap();
    expected += 1;
    assert_eq!(doc.history.len(), expected);
}

#[tokio::test]
async fn test_removal_without_match_still_logs() {
    let store = DocumentStore::in_memory();
    store
        .create("OC-300", FileRef::new("po.pdf"), &SALES_SUPERVISOR)
        .await;
    store
        .attach(
            "OC-300",
            StageArea::Billing,
            FileRef::new("bill.pdf"),
            &BILLING_USER,
            false,
        )
        .await
        .unwrap();

    let doc = store
        .remove_attachment(
            "OC-300",
            StageArea::Billing,
            &FileRef::new("not-there.pdf"),
            &BILLING_USER,
        )
        .await
        .unwrap();

    // Bucket untouched, audit entry written anyway.
    assert_eq!(
        doc.attachments.bucket(StageArea::Billing),
        &[FileRef::new("bill.pdf")]
    );
    assert_eq!(doc.history.len(), 3);
    assert_eq!(doc.history[2].action, AuditAction::AttachmentRemoved);
    assert_eq!(doc.history[2].file_name, "not-there.pdf");
}

#[tokio::test]
async fn test_removal_takes_first_matching_name_only() {
    let store = DocumentStore::in_memory();
    store
        .create("OC-301", FileRef::new("po.pdf"), &SALES_SUPERVISOR)
        .await;
    store
        .attach(
            "OC-301",
            StageArea::Operations,
            FileRef::new("dup.pdf"),
            &OPERATIONS_USER,
            false,
        )
        .await
        .unwrap();
    store
        .attach(
            "OC-301",
            StageArea::Operations,
            FileRef::new("dup.pdf"),
            &OPERATIONS_USER,
            true,
        )
        .await
        .unwrap();

    let doc = store
        .remove_attachment(
            "OC-301",
            StageArea::Operations,
            &FileRef::new("dup.pdf"),
            &OPERATIONS_USER,
        )
        .await
        .unwrap();
    assert_eq!(
        doc.attachments.bucket(StageArea::Operations),
        &[FileRef::new("dup.pdf")]
    );
}

#[tokio::test]
async fn test_state_never_regresses() {
    let store = seeded_store().await;

    // OC-1001 is Completed; a late first-style purchasing attachment must
    // not pull it backwards.
    let doc = store
        .attach(
            "OC-1001",
            StageArea::Purchasing,
            FileRef::new("late.pdf"),
            &PURCHASING_USER,
            false,
        )
        .await
        .unwrap();
    assert_eq!(doc.state, DocumentState::Completed);

    // Replaying the whole history of states of any document shows a
    // monotone sequence by construction; spot-check removal too.
    let doc = store
        .remove_attachment(
            "OC-1001",
            StageArea::Purchasing,
            &FileRef::new("late.pdf"),
            &PURCHASING_USER,
        )
        .await
        .unwrap();
    assert_eq!(doc.state, DocumentState::Completed);
}

#[tokio::test]
async fn test_list_returns_deep_copies() {
    let store = seeded_store().await;

    let mut snapshot = store.list().await;
    let tampered = &mut snapshot[0];
    tampered.oc = "OC-TAMPERED".to_string();
    tampered.state = DocumentState::PendingPurchasing;
    tampered.history.clear();
    tampered
        .attachments
        .bucket_mut(StageArea::Purchasing)
        .push(FileRef::new("injected.pdf"));

    let fresh = store.list().await;
    assert_eq!(fresh[0].oc, "OC-1001");
    assert_eq!(fresh[0].state, DocumentState::Completed);
    assert_eq!(fresh[0].history.len(), 5);
    assert!(!fresh[0]
        .attachments
        .bucket(StageArea::Purchasing)
        .contains(&FileRef::new("injected.pdf")));
}

#[tokio::test]
async fn test_delete_by_id_discards_history_without_audit() {
    let store = seeded_store().await;
    let docs = store.list().await;
    let target = docs.iter().find(|d| d.oc == "OC-1003").unwrap();

    assert!(store.delete(target.id).await);
    assert!(!store.delete(target.id).await);

    let remaining = store.list().await;
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|d| d.oc != "OC-1003"));
}

#[tokio::test]
async fn test_duplicate_order_codes_are_accepted() {
    let store = DocumentStore::in_memory();
    let first = store
        .create("OC-DUP", FileRef::new("a.pdf"), &SALES_SUPERVISOR)
        .await;
    let second = store
        .create("OC-DUP", FileRef::new("b.pdf"), &SALES_ASSISTANT)
        .await;

    assert_ne!(first.id, second.id);
    assert!(second.id > first.id, "ids are monotonically assigned");
    assert_eq!(store.list().await.len(), 2);

    // Lookups by order code resolve to the earliest match.
    let found = store.find("OC-DUP").await.unwrap();
    assert_eq!(found.id, first.id);
}

#[tokio::test]
async fn test_delivery_state_is_not_lifecycle_gated() {
    let store = DocumentStore::in_memory();
    store
        .create("OC-400", FileRef::new("po.pdf"), &SALES_SUPERVISOR)
        .await;

    // The store applies the update even before Completed; gating is the
    // caller's job.
    let doc = store
        .set_delivery_state("OC-400", DeliveryState::Waiting, &OPERATIONS_USER)
        .await
        .unwrap();
    assert_eq!(doc.state, DocumentState::PendingPurchasing);
    assert_eq!(doc.delivery_state, Some(DeliveryState::Waiting));
}

#[tokio::test]
async fn test_audit_entries_record_the_acting_user() {
    let store = seeded_store().await;
    let docs = store.list().await;
    let doc = docs.iter().find(|d| d.oc == "OC-1001").unwrap();

    assert_eq!(doc.history[0].user_id, SALES_SUPERVISOR.id);
    assert_eq!(doc.history[0].area, Area::Sales);
    assert_eq!(doc.history[1].user_id, PURCHASING_USER.id);
    assert_eq!(doc.history[1].area, Area::Purchasing);
    assert_eq!(doc.history[4].user_id, OPERATIONS_USER.id);
}

#[tokio::test]
async fn test_simulated_latency_delays_operations() {
    tokio::time::pause();
    let store = DocumentStore::new(std::time::Duration::from_millis(500));

    let started = tokio::time::Instant::now();
    let list = tokio::spawn(async move { store.list().await });
    // Paused time auto-advances past the sleep; the call still resolves.
    let result = list.await.unwrap();
    assert!(result.is_empty());
    assert!(started.elapsed() >= std::time::Duration::from_millis(500));
}
