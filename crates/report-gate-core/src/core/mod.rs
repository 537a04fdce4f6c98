// crates/report-gate-core/src/core/mod.rs
// ============================================================================
// Module: Core Data Model
// Description: Job records, retry overrides, and report scopes.
// Purpose: Typed model shared by the gate, handler, and integrations.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The core data model covers the three shapes this module moves between: the
//! loosely typed job record supplied by the queue runtime, the per-type retry
//! override declared by a worker, and the report scope submitted to the
//! error-tracking client.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod job;
pub mod policy;
pub mod scope;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use job::FailureContext;
pub use job::JobRecord;
pub use policy::RetryOverride;
pub use scope::PersonScope;
pub use scope::ReportOptions;
pub use scope::ReportScope;
pub use scope::RequestScope;
