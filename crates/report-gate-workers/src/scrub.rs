// crates/report-gate-workers/src/scrub.rs
// ============================================================================
// Module: Field Scrubber
// Description: Recursive value masking for configured field names.
// Purpose: Mask sensitive job parameters before report submission.
// Dependencies: report-gate-core, serde_json
// ============================================================================

//! ## Overview
//! The field scrubber replaces values whose keys match a configured scrub
//! field with a fixed redaction mask, recursing through nested objects and
//! arrays. Matching is ASCII case-insensitive. A hard depth cap bounds the
//! recursion; values past the cap are redacted wholesale (fail closed).
//! Invariants:
//! - Matched keys keep their names; only values are replaced.
//! - Non-matching scalar values pass through untouched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use report_gate_core::ParamScrubber;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default recursion depth cap for nested parameter structures.
pub const DEFAULT_MAX_SCRUB_DEPTH: usize = 32;

/// Default redaction mask written over matched values.
pub const DEFAULT_REDACTION: &str = "*****";

// ============================================================================
// SECTION: Field Scrubber
// ============================================================================

/// Recursive scrubber masking values under matching keys.
///
/// # Invariants
/// - Key matching is ASCII case-insensitive.
/// - Containers nested past `max_depth` are replaced by the mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldScrubber {
    /// Mask written over matched or over-deep values.
    redaction: String,
    /// Recursion depth cap for nested containers.
    max_depth: usize,
}

impl FieldScrubber {
    /// Creates a scrubber with a custom mask and depth cap.
    #[must_use]
    pub const fn new(redaction: String, max_depth: usize) -> Self {
        Self {
            redaction,
            max_depth,
        }
    }

    /// Returns the redaction mask as a JSON value.
    fn mask(&self) -> Value {
        Value::String(self.redaction.clone())
    }

    /// Scrubs one object level, masking matched keys and recursing containers.
    fn scrub_map(
        &self,
        params: Map<String, Value>,
        scrub_fields: &BTreeSet<String>,
        depth: usize,
    ) -> Map<String, Value> {
        params
            .into_iter()
            .map(|(name, value)| {
                if matches_field(scrub_fields, &name) {
                    (name, self.mask())
                } else {
                    (name, self.scrub_value(value, scrub_fields, depth))
                }
            })
            .collect()
    }

    /// Scrubs one value, recursing into containers under the depth cap.
    fn scrub_value(&self, value: Value, scrub_fields: &BTreeSet<String>, depth: usize) -> Value {
        match value {
            Value::Object(_) | Value::Array(_) if depth >= self.max_depth => self.mask(),
            Value::Object(nested) => {
                Value::Object(self.scrub_map(nested, scrub_fields, depth.saturating_add(1)))
            }
            Value::Array(values) => Value::Array(
                values
                    .into_iter()
                    .map(|item| self.scrub_value(item, scrub_fields, depth.saturating_add(1)))
                    .collect(),
            ),
            scalar => scalar,
        }
    }
}

impl Default for FieldScrubber {
    fn default() -> Self {
        Self::new(DEFAULT_REDACTION.to_string(), DEFAULT_MAX_SCRUB_DEPTH)
    }
}

impl ParamScrubber for FieldScrubber {
    fn scrub(
        &self,
        params: Map<String, Value>,
        scrub_fields: &BTreeSet<String>,
    ) -> Map<String, Value> {
        self.scrub_map(params, scrub_fields, 0)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true when the key matches a scrub field, ignoring ASCII case.
fn matches_field(scrub_fields: &BTreeSet<String>, name: &str) -> bool {
    scrub_fields.iter().any(|field| field.eq_ignore_ascii_case(name))
}
