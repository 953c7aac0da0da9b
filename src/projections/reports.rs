// Reporting aggregates derived from document snapshots

use std::collections::BTreeMap;

use serde::Serialize;

use crate::directory::User;
use crate::workflow::types::{Area, Document, DocumentState, StageArea};

/// Per-user dashboard numbers, shaped by the user's area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaReport {
    /// Sales users track the documents they registered.
    Sales {
        registered: usize,
        completed: usize,
        pending: usize,
    },
    /// Downstream users track what is waiting on their area plus their own
    /// attachment activity.
    Stage {
        area: Area,
        pending_for_area: usize,
        attachment_actions: usize,
    },
}

/// The "simple reports" card values for one logged-in user.
pub fn area_report(documents: &[Document], user: &User) -> AreaReport {
    if user.area == Area::Sales {
        let own: Vec<&Document> = documents
            .iter()
            .filter(|d| d.created_by == user.id)
            .collect();
        let completed = own
            .iter()
            .filter(|d| d.state == DocumentState::Completed)
            .count();
        return AreaReport::Sales {
            registered: own.len(),
            completed,
            pending: own.len() - completed,
        };
    }

    let pending_state = pending_state_for(user.area);
    let pending_for_area = documents
        .iter()
        .filter(|d| Some(d.state) == pending_state)
        .count();
    let attachment_actions = documents
        .iter()
        .flat_map(|d| d.history.iter())
        .filter(|h| h.user_id == user.id && h.action.is_attachment_action())
        .count();

    AreaReport::Stage {
        area: user.area,
        pending_for_area,
        attachment_actions,
    }
}

/// Supervisor/admin overview across the whole document set, optionally
/// narrowed to one creator (the assistant filter in the original UI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Documents still waiting on their very first attachment.
    pub stalled_in_sales: usize,
    /// Sales counts every document; downstream areas count documents whose
    /// bucket has at least one attachment.
    pub documents_per_area: BTreeMap<String, usize>,
    pub state_distribution: BTreeMap<String, usize>,
}

pub fn summary_report(documents: &[Document], created_by: Option<u64>) -> SummaryReport {
    let docs: Vec<&Document> = documents
        .iter()
        .filter(|d| created_by.map_or(true, |id| d.created_by == id))
        .collect();

    let total = docs.len();
    let completed = docs
        .iter()
        .filter(|d| d.state == DocumentState::Completed)
        .count();
    let stalled_in_sales = docs
        .iter()
        .filter(|d| d.state == DocumentState::PendingPurchasing)
        .count();

    let mut documents_per_area = BTreeMap::new();
    documents_per_area.insert(Area::Sales.to_string(), total);
    for area in StageArea::ALL {
        let count = docs
            .iter()
            .filter(|d| !d.attachments.bucket(area).is_empty())
            .count();
        documents_per_area.insert(area.to_string(), count);
    }

    let mut state_distribution = BTreeMap::new();
    for doc in &docs {
        *state_distribution.entry(doc.state.to_string()).or_insert(0) += 1;
    }

    SummaryReport {
        total,
        completed,
        pending: total - completed,
        stalled_in_sales,
        documents_per_area,
        state_distribution,
    }
}

/// The lifecycle state a document sits in while waiting on `area`.
fn pending_state_for(area: Area) -> Option<DocumentState> {
    match area {
        Area::Purchasing => Some(DocumentState::PendingPurchasing),
        Area::Billing => Some(DocumentState::PendingBilling),
        Area::Operations => Some(DocumentState::PendingOperations),
        Area::Sales | Area::Admin => None,
    }
}
