// crates/report-gate-core/src/core/scope.rs
// ============================================================================
// Module: Report Scopes
// Description: Structured payloads submitted to the error-tracking client.
// Purpose: Describe a failing job without leaking deny-listed parameters.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A report scope is the structured payload handed to the error-tracking
//! client for one job failure: framework tag, job class, queue, sanitized
//! parameters, and actor identity. Every contextual field is independently
//! optional so partial data still produces a useful report.
//! Invariants:
//! - Request parameters are sanitized before a scope is constructed.
//! - Person fields are independent; one absent field never blanks another.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Report Scope
// ============================================================================

/// Structured report payload for one job failure.
///
/// # Invariants
/// - `framework` is always populated from the handler settings.
/// - `request.params` have already passed deny-list and scrub filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportScope {
    /// Framework tag, label plus runtime version.
    pub framework: String,
    /// Job class name, when the record carried one.
    pub context: Option<String>,
    /// Queue name, when the record carried one.
    pub queue: Option<String>,
    /// Request-like view of the job parameters.
    pub request: RequestScope,
    /// Actor identity resolved from the worker, field by field.
    pub person: PersonScope,
}

/// Request section of a report scope.
///
/// # Invariants
/// - `params` excludes deny-listed fields and carries scrubbed values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestScope {
    /// Sanitized job parameters.
    pub params: Map<String, Value>,
}

/// Actor identity section of a report scope.
///
/// # Invariants
/// - Fields resolve independently; any subset may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonScope {
    /// Actor identifier.
    pub id: Option<String>,
    /// Actor email address.
    pub email: Option<String>,
    /// Actor username.
    pub username: Option<String>,
}

impl PersonScope {
    /// Returns a person scope with every field absent.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            id: None,
            email: None,
            username: None,
        }
    }
}

// ============================================================================
// SECTION: Report Options
// ============================================================================

/// Submission options forwarded to the error-tracking client.
///
/// # Invariants
/// - The failure handler always requests exception-level-filter evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Requests the client's exception-level filters for this submission.
    pub use_exception_level_filters: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            use_exception_level_filters: true,
        }
    }
}
