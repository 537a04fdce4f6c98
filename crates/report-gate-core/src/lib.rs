// crates/report-gate-core/src/lib.rs
// ============================================================================
// Module: Report Gate Core
// Description: Decision and formatting core for job-failure reporting.
// Purpose: Gate job failures and assemble sanitized report scopes.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This crate decides whether a background-job failure should be forwarded to
//! an external error-tracking service and, when it should, builds the
//! structured report scope (job metadata, scrubbed parameters, actor
//! identity). The queue runtime, the error-tracking client, and the
//! parameter scrubber stay behind trait seams in [`interfaces`].
//! Invariants:
//! - The gate is pure and never suppresses non-retryable jobs.
//! - Absent optional data degrades to "feature absent," never to an error.
//! - The failure handler never errors or panics outward.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::FailureContext;
pub use crate::core::JobRecord;
pub use crate::core::PersonScope;
pub use crate::core::ReportOptions;
pub use crate::core::ReportScope;
pub use crate::core::RequestScope;
pub use crate::core::RetryOverride;
pub use interfaces::ErrorReporter;
pub use interfaces::Identity;
pub use interfaces::ParamScrubber;
pub use interfaces::ReportError;
pub use interfaces::ResolutionError;
pub use interfaces::WorkerCapabilities;
pub use interfaces::WorkerRegistry;
pub use runtime::FailureHandler;
pub use runtime::HandlerSettings;
pub use runtime::should_skip;
