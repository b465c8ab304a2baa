//! Startup compliance gate: security label, SELinux mode and strict-crypto
//! (FIPS) state of the host, plus the audit sinks the shell ships with.

mod gate;
pub mod sink;
pub mod status;

pub use gate::ComplianceGate;
pub use sink::{
    MemoryAuditSink, NullAuditSink, TeeAuditSink, TracingAuditSink, DEFAULT_MEMORY_CAPACITY,
};
pub use status::{StatusPaths, STRICT_MODE_ENABLED_VALUES};
pub use umrs_shared::{
    AuditEvent, AuditEventKind, AuditSink, ComplianceContext, ComplianceError,
};
