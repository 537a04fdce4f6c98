// crates/report-gate-core/src/core/job.rs
// ============================================================================
// Module: Job Records
// Description: Loosely typed job records supplied by the queue runtime.
// Purpose: Defensive field access over untrusted failure-context payloads.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Job records arrive from the queue runtime as loosely structured maps. This
//! module wraps them with defensive accessors so absent or oddly shaped fields
//! read as "feature disabled" or "use default," never as an error.
//! Invariants:
//! - Absent optional fields never surface as errors.
//! - The effective retry count is the stored count plus one.
//!
//! Job payloads are untrusted input; accessors must not panic on any shape.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Field Names
// ============================================================================

/// Job field carrying the worker class name.
pub const CLASS_FIELD: &str = "class";

/// Job field carrying the queue name.
pub const QUEUE_FIELD: &str = "queue";

/// Job field carrying the retry flag.
pub const RETRY_FIELD: &str = "retry";

/// Job field carrying the recorded retry count.
pub const RETRY_COUNT_FIELD: &str = "retry_count";

/// Job field carrying the worker arguments.
pub const ARGS_FIELD: &str = "args";

// ============================================================================
// SECTION: Job Record
// ============================================================================

/// Loosely typed job record supplied by the queue runtime on failure.
///
/// # Invariants
/// - Fields are an arbitrary JSON object; no schema is enforced.
/// - Accessors degrade to `None` or a default on absent or mis-shaped fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobRecord {
    /// Raw job fields as received from the queue runtime.
    fields: Map<String, Value>,
}

impl JobRecord {
    /// Creates a job record from raw fields.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields,
        }
    }

    /// Creates a job record from a JSON value, returning `None` for non-objects.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::new(fields)),
            _ => None,
        }
    }

    /// Returns the raw job fields.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns the worker class name, when present as a string.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        self.fields.get(CLASS_FIELD).and_then(Value::as_str)
    }

    /// Returns the queue name, when present as a string.
    #[must_use]
    pub fn queue(&self) -> Option<&str> {
        self.fields.get(QUEUE_FIELD).and_then(Value::as_str)
    }

    /// Returns true when the job is retryable.
    ///
    /// Follows the queue runtime's truthiness rules: an absent field, `null`,
    /// and `false` are falsy; every other value (including `0` and `""`) marks
    /// the job retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self.fields.get(RETRY_FIELD) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(_) => true,
        }
    }

    /// Returns the recorded retry count, when present as an integer.
    #[must_use]
    pub fn retry_count(&self) -> Option<i64> {
        self.fields.get(RETRY_COUNT_FIELD).and_then(Value::as_i64)
    }

    /// Returns the effective retry count for gating.
    ///
    /// The queue runtime has not yet incremented the stored count when the
    /// failure hook runs, so the effective count is the stored count (default
    /// -1) plus one.
    #[must_use]
    pub fn effective_retry_count(&self) -> i64 {
        self.retry_count().unwrap_or(-1).saturating_add(1)
    }

    /// Returns the worker arguments, defaulting to an empty slice.
    #[must_use]
    pub fn args(&self) -> &[Value] {
        self.fields.get(ARGS_FIELD).and_then(Value::as_array).map_or(&[], Vec::as_slice)
    }
}

// ============================================================================
// SECTION: Failure Context
// ============================================================================

/// Failure context handed to the integration by the queue runtime.
///
/// # Invariants
/// - The job record is optional; an absent record is handled by the gate's
///   fail-open rule, not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FailureContext {
    /// Job record for the failed unit of work, when the runtime supplied one.
    pub job: Option<JobRecord>,
}

impl FailureContext {
    /// Creates a failure context around an optional job record.
    #[must_use]
    pub const fn new(job: Option<JobRecord>) -> Self {
        Self {
            job,
        }
    }

    /// Extracts a failure context from a raw JSON value.
    ///
    /// Anything other than an object with an object-valued `job` key yields a
    /// context without a job record.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let job = value
            .as_object()
            .and_then(|ctx| ctx.get("job"))
            .cloned()
            .and_then(JobRecord::from_value);
        Self::new(job)
    }
}
