// Document Workflow Store
//
// The one mutator of the canonical document collection. Views (search,
// reports, audit) only ever see snapshots from `list()`. Each operation
// sleeps for a configurable simulated latency standing in for a network
// round-trip, then holds the write lock for its whole body, so concurrent
// callers interleave at whole-operation granularity only.

use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::workflow::state_machine::state_after_attachment;
use crate::workflow::types::{
    AuditAction, AuditEntry, DeliveryState, Document, DocumentState, FileRef, StageArea, UserRef,
};

#[derive(Debug, Default)]
struct StoreInner {
    documents: Vec<Document>,
    next_id: u64,
}

impl StoreInner {
    fn find_by_oc_mut(&mut self, oc: &str) -> Option<&mut Document> {
        self.documents.iter_mut().find(|d| d.oc == oc)
    }
}

/// In-memory document store with an explicit lifecycle: construct, seed,
/// drop. Callers hold it behind an `Arc` and share it between the mutating
/// UI flows and the read-only projections.
#[derive(Debug)]
pub struct DocumentStore {
    inner: RwLock<StoreInner>,
    latency: Duration,
}

impl DocumentStore {
    /// Store with the configured simulated round-trip latency.
    pub fn new(latency: Duration) -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                documents: Vec::new(),
                next_id: 1,
            }),
            latency,
        }
    }

    /// Zero-latency store, the variant tests and seeding scripts use.
    pub fn in_memory() -> Self {
        Self::new(Duration::ZERO)
    }

    async fn simulate_round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Register a new document. Assigns the next monotonic id, starts the
    /// lifecycle at Pending Purchasing, and writes the first audit entry.
    /// Order codes are accepted as-is; duplicates are not rejected.
    pub async fn create(&self, oc: &str, primary_file: FileRef, acting: &UserRef) -> Document {
        self.simulate_round_trip().await;
        let mut inner = self.inner.write().await;

        let id = inner.next_id;
        inner.next_id += 1;

        let entry = AuditEntry::new(acting, AuditAction::Registered, primary_file.name.clone());
        let document = Document {
            id,
            oc: oc.to_string(),
            created_at: entry.timestamp,
            created_by: acting.id,
            state: DocumentState::initial(),
            delivery_state: None,
            attachments: Default::default(),
            history: vec![entry],
            primary_file,
        };

        info!(
            document.id = id,
            oc = %oc,
            user.id = acting.id,
            "document registered"
        );

        inner.documents.push(document.clone());
        document
    }

    /// Append `file` to `area`'s bucket on the document with order code
    /// `oc`. A first (non-version) submission advances the lifecycle per
    /// the fixed area mapping; a new version leaves it untouched. Returns
    /// `None` when no document matches, leaving everything unchanged.
    pub async fn attach(
        &self,
        oc: &str,
        area: StageArea,
        file: FileRef,
        acting: &UserRef,
        is_new_version: bool,
    ) -> Option<Document> {
        self.simulate_round_trip().await;
        let mut inner = self.inner.write().await;

        let Some(doc) = inner.find_by_oc_mut(oc) else {
            warn!(oc = %oc, "attach against unknown order code");
            return None;
        };

        let action = if is_new_version {
            AuditAction::NewVersionAttached
        } else {
            AuditAction::AttachmentAdded
        };
        let entry = AuditEntry::new(acting, action, file.name.clone());

        doc.attachments.bucket_mut(area).push(file);
        doc.state = state_after_attachment(doc.state, area, is_new_version);
        doc.history.push(entry);

        info!(
            document.id = doc.id,
            oc = %oc,
            area = %area,
            state = %doc.state,
            new_version = is_new_version,
            "attachment added"
        );

        Some(doc.clone())
    }

    /// Remove the first attachment in `area`'s bucket whose name matches
    /// `file`. An audit entry is written even when nothing matched; the
    /// lifecycle state is never touched.
    pub async fn remove_attachment(
        &self,
        oc: &str,
        area: StageArea,
        file: &FileRef,
        acting: &UserRef,
    ) -> Option<Document> {
        self.simulate_round_trip().await;
        let mut inner = self.inner.write().await;

        let Some(doc) = inner.find_by_oc_mut(oc) else {
            warn!(oc = %oc, "remove_attachment against unknown order code");
            return None;
        };

        let bucket = doc.attachments.bucket_mut(area);
        let removed = match bucket.iter().position(|f| f.name == file.name) {
            Some(index) => {
                bucket.remove(index);
                true
            }
            None => false,
        };

        doc.history.push(AuditEntry::new(
            acting,
            AuditAction::AttachmentRemoved,
            file.name.clone(),
        ));

        info!(
            document.id = doc.id,
            oc = %oc,
            area = %area,
            file = %file.name,
            removed,
            "attachment removal"
        );

        Some(doc.clone())
    }

    /// Set the delivery side-state. No lifecycle validation: the store
    /// trusts callers to gate this on area permission and Completed state.
    pub async fn set_delivery_state(
        &self,
        oc: &str,
        state: DeliveryState,
        acting: &UserRef,
    ) -> Option<Document> {
        self.simulate_round_trip().await;
        let mut inner = self.inner.write().await;

        let Some(doc) = inner.find_by_oc_mut(oc) else {
            warn!(oc = %oc, "delivery update against unknown order code");
            return None;
        };

        doc.delivery_state = Some(state);
        doc.history
            .push(AuditEntry::new(acting, AuditAction::DeliveryUpdated(state), "-"));

        info!(
            document.id = doc.id,
            oc = %oc,
            delivery = %state,
            "delivery state updated"
        );

        Some(doc.clone())
    }

    /// Delete a document by internal id. Returns whether it existed. The
    /// discarded document's history goes with it; deletion itself is not
    /// audited.
    pub async fn delete(&self, document_id: u64) -> bool {
        self.simulate_round_trip().await;
        let mut inner = self.inner.write().await;

        let before = inner.documents.len();
        inner.documents.retain(|d| d.id != document_id);
        let deleted = inner.documents.len() < before;

        if deleted {
            info!(document.id = document_id, "document deleted");
        } else {
            warn!(document.id = document_id, "delete against unknown document id");
        }
        deleted
    }

    /// Snapshot of every document. Deep copies: mutating the returned
    /// documents cannot reach store state.
    pub async fn list(&self) -> Vec<Document> {
        self.simulate_round_trip().await;
        let inner = self.inner.read().await;
        inner.documents.clone()
    }

    /// Look up a single document snapshot by order code.
    pub async fn find(&self, oc: &str) -> Option<Document> {
        self.simulate_round_trip().await;
        let inner = self.inner.read().await;
        inner.documents.iter().find(|d| d.oc == oc).cloned()
    }

    /// Load pre-built documents, advancing the id counter past them. Used
    /// by tests and demo seeding.
    pub async fn seed(&self, documents: Vec<Document>) {
        let mut inner = self.inner.write().await;
        for doc in documents {
            inner.next_id = inner.next_id.max(doc.id + 1);
            inner.documents.push(doc);
        }
    }
}
