// Flattened audit trail for the auditoria view

use serde::Serialize;

use crate::workflow::types::{Area, AuditEntry, Document};

/// One audit entry joined with the document it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRecord {
    pub document_id: u64,
    pub oc: String,
    pub entry: AuditEntry,
}

/// Every audit entry across every document, newest first. Ties keep the
/// per-document append order stable.
pub fn audit_trail(documents: &[Document]) -> Vec<AuditRecord> {
    let mut records: Vec<AuditRecord> = documents
        .iter()
        .flat_map(|doc| {
            doc.history.iter().map(|entry| AuditRecord {
                document_id: doc.id,
                oc: doc.oc.clone(),
                entry: entry.clone(),
            })
        })
        .collect();
    records.sort_by(|a, b| b.entry.timestamp.cmp(&a.entry.timestamp));
    records
}

pub fn for_area(records: &[AuditRecord], area: Area) -> Vec<AuditRecord> {
    records
        .iter()
        .filter(|r| r.entry.area == area)
        .cloned()
        .collect()
}

pub fn for_user(records: &[AuditRecord], user_id: u64) -> Vec<AuditRecord> {
    records
        .iter()
        .filter(|r| r.entry.user_id == user_id)
        .cloned()
        .collect()
}
