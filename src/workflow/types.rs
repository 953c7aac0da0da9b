// Core types for the document workflow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Organizational department. Acts as both a workflow stage owner and a
/// user-affiliation scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    Sales,
    Purchasing,
    Billing,
    Operations,
    Admin,
}

impl Area {
    pub const ALL: [Area; 5] = [
        Area::Sales,
        Area::Purchasing,
        Area::Billing,
        Area::Operations,
        Area::Admin,
    ];
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Area::Sales => "sales",
            Area::Purchasing => "purchasing",
            Area::Billing => "billing",
            Area::Operations => "operations",
            Area::Admin => "admin",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Error)]
#[error("unrecognized area: {0}")]
pub struct ParseAreaError(pub String);

impl FromStr for Area {
    type Err = ParseAreaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sales" => Ok(Area::Sales),
            "purchasing" => Ok(Area::Purchasing),
            "billing" => Ok(Area::Billing),
            "operations" => Ok(Area::Operations),
            "admin" => Ok(Area::Admin),
            other => Err(ParseAreaError(other.to_string())),
        }
    }
}

/// The three downstream areas that own an attachment bucket on every
/// document. Sales registers documents and Admin administers users, so
/// neither can hold attachments; keeping the bucket key restricted to this
/// enum makes that unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageArea {
    Purchasing,
    Billing,
    Operations,
}

impl StageArea {
    pub const ALL: [StageArea; 3] = [
        StageArea::Purchasing,
        StageArea::Billing,
        StageArea::Operations,
    ];

    pub fn area(self) -> Area {
        match self {
            StageArea::Purchasing => Area::Purchasing,
            StageArea::Billing => Area::Billing,
            StageArea::Operations => Area::Operations,
        }
    }
}

impl fmt::Display for StageArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.area().fmt(f)
    }
}

impl FromStr for StageArea {
    type Err = ParseAreaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Area::from_str(s)? {
            Area::Purchasing => Ok(StageArea::Purchasing),
            Area::Billing => Ok(StageArea::Billing),
            Area::Operations => Ok(StageArea::Operations),
            other => Err(ParseAreaError(other.to_string())),
        }
    }
}

/// Lifecycle stage of a document. Strictly linear: the derived `Ord`
/// follows workflow order, so "state never regresses" is checkable with a
/// plain comparison.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DocumentState {
    PendingPurchasing,
    PendingBilling,
    PendingOperations,
    Completed,
}

impl fmt::Display for DocumentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentState::PendingPurchasing => "Pending Purchasing",
            DocumentState::PendingBilling => "Pending Billing",
            DocumentState::PendingOperations => "Pending Operations",
            DocumentState::Completed => "Completed",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Error)]
#[error("unrecognized document state: {0}")]
pub struct ParseDocumentStateError(pub String);

impl FromStr for DocumentState {
    type Err = ParseDocumentStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending-purchasing" => Ok(DocumentState::PendingPurchasing),
            "pending-billing" => Ok(DocumentState::PendingBilling),
            "pending-operations" => Ok(DocumentState::PendingOperations),
            "completed" => Ok(DocumentState::Completed),
            other => Err(ParseDocumentStateError(other.to_string())),
        }
    }
}

/// Delivery side-state, tracked independently of the lifecycle. Only
/// meaningful once a document is Completed, but the store does not enforce
/// that (callers gate it by area permission).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryState {
    Waiting,
    InTransit,
    Delivered,
}

impl fmt::Display for DeliveryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeliveryState::Waiting => "Waiting",
            DeliveryState::InTransit => "In Transit",
            DeliveryState::Delivered => "Delivered",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Error)]
#[error("unrecognized delivery state: {0}")]
pub struct ParseDeliveryStateError(pub String);

impl FromStr for DeliveryState {
    type Err = ParseDeliveryStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "waiting" => Ok(DeliveryState::Waiting),
            "in-transit" => Ok(DeliveryState::InTransit),
            "delivered" => Ok(DeliveryState::Delivered),
            other => Err(ParseDeliveryStateError(other.to_string())),
        }
    }
}

/// Opaque reference to a submitted file. The store never inspects content,
/// size, or type; the name is the identity used for removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
}

impl FileRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// What a mutating operation did, as recorded in the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    Registered,
    AttachmentAdded,
    NewVersionAttached,
    AttachmentRemoved,
    DeliveryUpdated(DeliveryState),
}

impl AuditAction {
    /// Attachment-related actions count toward per-user activity in reports.
    pub fn is_attachment_action(&self) -> bool {
        matches!(
            self,
            AuditAction::AttachmentAdded
                | AuditAction::NewVersionAttached
                | AuditAction::AttachmentRemoved
        )
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditAction::Registered => write!(f, "Document Registered"),
            AuditAction::AttachmentAdded => write!(f, "Attachment Added"),
            AuditAction::NewVersionAttached => write!(f, "New Version Attached"),
            AuditAction::AttachmentRemoved => write!(f, "Attachment Removed"),
            AuditAction::DeliveryUpdated(state) => {
                write!(f, "Delivery status updated to: {}", state)
            }
        }
    }
}

/// One immutable record in a document's append-only history. Entries are
/// never edited or removed once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub user_id: u64,
    pub area: Area,
    pub action: AuditAction,
    pub file_name: String,
}

impl AuditEntry {
    pub fn new(acting: &UserRef, action: AuditAction, file_name: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            user_id: acting.id,
            area: acting.area,
            action,
            file_name: file_name.into(),
        }
    }
}

/// Fixed-shape attachment storage: one ordered bucket per downstream area.
/// Append keeps the most recent file at the end; removal is by name match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentBuckets {
    pub purchasing: Vec<FileRef>,
    pub billing: Vec<FileRef>,
    pub operations: Vec<FileRef>,
}

impl AttachmentBuckets {
    pub fn bucket(&self, area: StageArea) -> &[FileRef] {
        match area {
            StageArea::Purchasing => &self.purchasing,
            StageArea::Billing => &self.billing,
            StageArea::Operations => &self.operations,
        }
    }

    pub fn bucket_mut(&mut self, area: StageArea) -> &mut Vec<FileRef> {
        match area {
            StageArea::Purchasing => &mut self.purchasing,
            StageArea::Billing => &mut self.billing,
            StageArea::Operations => &mut self.operations,
        }
    }

    /// Every attachment across all three buckets, purchasing first.
    pub fn iter_all(&self) -> impl Iterator<Item = &FileRef> {
        self.purchasing
            .iter()
            .chain(self.billing.iter())
            .chain(self.operations.iter())
    }
}

/// A tracked purchase-order document. Fully owned data: `clone()` is a deep
/// copy, which is what the store's copy-on-read contract relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Internal identifier, unique and monotonically assigned by the store.
    pub id: u64,
    /// Order code, the business key used for lookups. Not validated for
    /// uniqueness.
    pub oc: String,
    pub primary_file: FileRef,
    pub created_at: DateTime<Utc>,
    /// Id of the Sales user who registered the document.
    pub created_by: u64,
    pub state: DocumentState,
    pub delivery_state: Option<DeliveryState>,
    pub attachments: AttachmentBuckets,
    pub history: Vec<AuditEntry>,
}

/// The acting user's identity pair, supplied by the auth collaborator with
/// every mutating call. The store records it in audit entries but performs
/// no permission checks itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: u64,
    pub area: Area,
}

impl UserRef {
    pub fn new(id: u64, area: Area) -> Self {
        Self { id, area }
    }
}
