// Lifecycle state machine for workflow documents
//
// The lifecycle is strictly linear:
//
//   PendingPurchasing -> PendingBilling -> PendingOperations -> Completed
//
// The only event that fires a transition is the FIRST attachment submitted
// to an area's bucket. Re-submissions ("new version") and removals never
// touch the lifecycle, and nothing ever moves a document backwards.
// Delivery state is an independent side-state and is not modeled here.

use super::types::{DocumentState, StageArea};

impl StageArea {
    /// The lifecycle state a document advances to once this area submits
    /// its first attachment. Fixed mapping, no branching.
    pub fn advanced_state(self) -> DocumentState {
        match self {
            StageArea::Purchasing => DocumentState::PendingBilling,
            StageArea::Billing => DocumentState::PendingOperations,
            StageArea::Operations => DocumentState::Completed,
        }
    }
}

impl DocumentState {
    /// State assigned at registration.
    pub fn initial() -> Self {
        DocumentState::PendingPurchasing
    }

    /// The next stage in workflow order, or `None` from the terminal state.
    pub fn next(self) -> Option<DocumentState> {
        match self {
            DocumentState::PendingPurchasing => Some(DocumentState::PendingBilling),
            DocumentState::PendingBilling => Some(DocumentState::PendingOperations),
            DocumentState::PendingOperations => Some(DocumentState::Completed),
            DocumentState::Completed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, DocumentState::Completed)
    }

    /// The area whose attachment a document in this state is waiting on.
    pub fn pending_area(self) -> Option<StageArea> {
        match self {
            DocumentState::PendingPurchasing => Some(StageArea::Purchasing),
            DocumentState::PendingBilling => Some(StageArea::Billing),
            DocumentState::PendingOperations => Some(StageArea::Operations),
            DocumentState::Completed => None,
        }
    }
}

/// Resolve the lifecycle state after an attachment lands in `area`'s
/// bucket. A new-version submission is a lifecycle no-op; a first
/// submission advances per the fixed area mapping. The result never moves
/// backwards: an out-of-order first submission from an earlier area leaves
/// a later state untouched.
pub fn state_after_attachment(
    current: DocumentState,
    area: StageArea,
    is_new_version: bool,
) -> DocumentState {
    if is_new_version {
        current
    } else {
        current.max(area.advanced_state())
    }
}
