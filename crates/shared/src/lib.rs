//! Types shared by the UMRS shell crates: catalog and compliance domain
//! values, audit event shapes and the error taxonomy.

pub mod audit;
pub mod domain;
pub mod error;

pub use audit::{AuditEvent, AuditEventKind, AuditSink};
pub use domain::{
    ComplianceContext, LabelParts, LaunchDescriptor, SecurityLabel, SelinuxMode, ToolId,
};
pub use error::{CatalogError, ComplianceError};
