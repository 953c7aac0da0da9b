// Read-only projections over store snapshots
//
// Search, reporting, and audit views all work on `Vec<Document>` snapshots
// obtained from `DocumentStore::list()`. Nothing in here mutates; the
// store stays the sole writer.

pub mod audit;
pub mod reports;
pub mod search;

pub use audit::{audit_trail, AuditRecord};
pub use reports::{area_report, summary_report, AreaReport, SummaryReport};
pub use search::{search, visible_documents, SearchFilter};
