// crates/report-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Report Gate Interfaces
// Description: Trait seams toward the worker registry, scrubber, and reporter.
// Purpose: Define the contract surfaces used by the failure handler.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the gate and failure handler reach their external
//! collaborators without embedding backend specifics. Every optional worker
//! capability is expressed as `Result<Option<T>, ResolutionError>` so callers
//! can collapse resolution failures to "feature absent" explicitly instead of
//! suppressing exceptions wholesale.
//! Invariants:
//! - Default capability methods resolve to absent, not to an error.
//! - Resolution errors are expected outcomes and safe to collapse.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::error::Error;

use serde_json::Map;
use serde_json::Value;

use crate::core::ReportOptions;
use crate::core::ReportScope;
use crate::core::RetryOverride;

// ============================================================================
// SECTION: Resolution Errors
// ============================================================================

/// Worker resolution errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Callers collapse these to "capability absent"; they never propagate out
///   of the gate or handler.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// Worker type could not be constructed.
    #[error("worker construction failed: {0}")]
    Construct(String),
    /// Optional accessor failed while resolving a capability.
    #[error("capability accessor failed: {0}")]
    Accessor(String),
}

// ============================================================================
// SECTION: Worker Capabilities
// ============================================================================

/// Actor identity resolved from a worker instance.
///
/// Every accessor defaults to absent so an implementation only overrides the
/// fields it can actually supply.
pub trait Identity {
    /// Resolves the actor identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] when the lookup itself fails.
    fn id(&self) -> Result<Option<String>, ResolutionError> {
        Ok(None)
    }

    /// Resolves the actor email address.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] when the lookup itself fails.
    fn email(&self) -> Result<Option<String>, ResolutionError> {
        Ok(None)
    }

    /// Resolves the actor username.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] when the lookup itself fails.
    fn username(&self) -> Result<Option<String>, ResolutionError> {
        Ok(None)
    }
}

/// Optional capabilities exposed by an instantiated worker type.
///
/// Defaults resolve to absent, mirroring a worker that implements neither
/// optional member.
pub trait WorkerCapabilities {
    /// Resolves the worker's retry override declaration.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] when the declaration accessor fails.
    fn retry_override(&self) -> Result<Option<RetryOverride>, ResolutionError> {
        Ok(None)
    }

    /// Resolves the actor identity for the given job arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] when the identity lookup fails.
    fn identity(&self, args: &[Value]) -> Result<Option<Box<dyn Identity>>, ResolutionError> {
        let _ = args;
        Ok(None)
    }
}

/// Registry mapping job class names to constructible worker types.
pub trait WorkerRegistry {
    /// Instantiates the worker type registered under the class name.
    ///
    /// Unregistered names resolve to `Ok(None)` (no capability), not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] when a registered constructor fails.
    fn instantiate(
        &self,
        class_name: &str,
    ) -> Result<Option<Box<dyn WorkerCapabilities>>, ResolutionError>;
}

// ============================================================================
// SECTION: Parameter Scrubber
// ============================================================================

/// Scrubber masking sensitive values in job parameters.
pub trait ParamScrubber {
    /// Scrubs parameter values whose keys match the configured scrub fields.
    fn scrub(
        &self,
        params: Map<String, Value>,
        scrub_fields: &BTreeSet<String>,
    ) -> Map<String, Value>;
}

// ============================================================================
// SECTION: Error Reporter
// ============================================================================

/// Report delivery errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Error-tracking client reported a delivery failure.
    #[error("report delivery failed: {0}")]
    Delivery(String),
}

/// Error-tracking client seam receiving assembled report scopes.
pub trait ErrorReporter {
    /// Submits a report scope and its causing error.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when delivery fails. The failure handler treats
    /// delivery as best effort and discards this result.
    fn report(
        &self,
        scope: &ReportScope,
        error: &(dyn Error + 'static),
        options: &ReportOptions,
    ) -> Result<(), ReportError>;
}
