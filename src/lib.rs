// Docuflow Library - Purchase-Order Document Workflow
// This exposes the workflow core and its read-only projections for testing
// and integration

pub mod config;
pub mod directory;
pub mod projections;
pub mod store;
pub mod telemetry;
pub mod workflow;

// Re-export key types for easy access
pub use config::{config, init_config, DocuflowConfig};
pub use directory::{Permission, Position, Role, User, UserDirectory};
pub use projections::{
    area_report, audit_trail, search, summary_report, AreaReport, AuditRecord, SearchFilter,
    SummaryReport,
};
pub use store::DocumentStore;
pub use telemetry::{
    create_document_span, generate_correlation_id, init_telemetry, shutdown_telemetry,
};
pub use workflow::{
    Area, AttachmentBuckets, AuditAction, AuditEntry, DeliveryState, Document, DocumentState,
    FileRef, StageArea, UserRef,
};
