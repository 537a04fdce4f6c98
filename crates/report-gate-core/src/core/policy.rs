// crates/report-gate-core/src/core/policy.rs
// ============================================================================
// Module: Retry Override Policy
// Description: Per-type overrides for which retry attempts get reported.
// Purpose: Decode worker override declarations into a typed policy.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A worker type may declare exactly which retry attempt(s) should be
//! reported, overriding the process-wide threshold. Declarations arrive in
//! loose shapes, so decoding is defensive: anything that is not an integer or
//! an array collapses to "no override" rather than an error.
//! Invariants:
//! - Unexpected declaration shapes decode to `None`, never to an error.
//! - Membership checks are pure and total.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Retry Override
// ============================================================================

/// Per-type override naming the retry attempt(s) to report on.
///
/// # Invariants
/// - Attempt numbers are effective retry counts (stored count plus one).
/// - An empty `Attempts` set reports on no attempt at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryOverride {
    /// Report exactly on this attempt.
    Attempt(i64),
    /// Report on any attempt in this set.
    Attempts(BTreeSet<i64>),
}

impl RetryOverride {
    /// Returns true when the override designates the given attempt.
    #[must_use]
    pub fn notifies_on(&self, attempt: i64) -> bool {
        match self {
            Self::Attempt(designated) => *designated == attempt,
            Self::Attempts(designated) => designated.contains(&attempt),
        }
    }

    /// Decodes a loose override declaration.
    ///
    /// An integer becomes [`RetryOverride::Attempt`]; an array becomes
    /// [`RetryOverride::Attempts`] keeping its integer elements. Any other
    /// shape decodes to `None`, a deliberate defensive default that falls back
    /// to the global threshold.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().map(Self::Attempt),
            Value::Array(values) => {
                let attempts = values.iter().filter_map(Value::as_i64).collect();
                Some(Self::Attempts(attempts))
            }
            _ => None,
        }
    }
}
