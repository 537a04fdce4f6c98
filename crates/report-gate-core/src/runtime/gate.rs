// crates/report-gate-core/src/runtime/gate.rs
// ============================================================================
// Module: Report Gate
// Description: Suppression predicate for retryable job failures.
// Purpose: Decide whether a failure is forwarded or silently suppressed.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The report gate decides whether one job failure should reach the
//! error-tracking client. Retryable jobs are suppressed while under the
//! global threshold unless the worker type declares its own override naming
//! the attempt(s) to report on.
//! Invariants:
//! - Non-retryable jobs and absent records are never suppressed.
//! - The gate is pure: no side effects, no errors, no panics.
//! - Every override resolution failure collapses to "no override."

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::JobRecord;
use crate::core::RetryOverride;
use crate::interfaces::WorkerRegistry;

// ============================================================================
// SECTION: Gate Predicate
// ============================================================================

/// Returns true when the failure should be suppressed.
///
/// An absent record and a non-retryable job always report (fail open). With a
/// resolved per-type override, the failure reports only on the designated
/// attempt(s); otherwise it reports once the effective retry count reaches
/// the global threshold.
#[must_use]
pub fn should_skip(
    job: Option<&JobRecord>,
    workers: &dyn WorkerRegistry,
    threshold: i64,
) -> bool {
    let Some(job) = job else {
        return false;
    };
    if !job.is_retryable() {
        return false;
    }

    let effective = job.effective_retry_count();
    resolve_override(job, workers).map_or_else(
        || effective < threshold,
        |declared| !declared.notifies_on(effective),
    )
}

/// Resolves the job type's retry override, collapsing failures to absent.
///
/// A missing class name, an unregistered class, a failing constructor, and a
/// failing accessor all read as "no override."
fn resolve_override(job: &JobRecord, workers: &dyn WorkerRegistry) -> Option<RetryOverride> {
    let class_name = job.class()?;
    let worker = workers.instantiate(class_name).ok().flatten()?;
    worker.retry_override().ok().flatten()
}
