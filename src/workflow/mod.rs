// Document Workflow Module
//
// Domain model for purchase-order documents: areas, lifecycle states,
// attachment buckets, and the append-only audit trail. The transition
// rules live in state_machine; the store applies them.

pub mod state_machine;
pub mod types;


pub use types::{
    Area, AttachmentBuckets, AuditAction, AuditEntry, DeliveryState, Document, DocumentState,
    FileRef, StageArea, UserRef,
};
