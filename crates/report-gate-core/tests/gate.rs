// crates/report-gate-core/tests/gate.rs
// ============================================================================
// Module: Report Gate Tests
// Description: Validate the suppression predicate across record shapes.
// Purpose: Ensure gating honors thresholds, overrides, and fail-open rules.
// Dependencies: report-gate-core, serde_json
// ============================================================================

//! Gate behavior tests for threshold and override suppression outcomes.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use report_gate_core::JobRecord;
use report_gate_core::ResolutionError;
use report_gate_core::RetryOverride;
use report_gate_core::WorkerCapabilities;
use report_gate_core::WorkerRegistry;
use report_gate_core::should_skip;
use serde_json::Value;
use serde_json::json;

/// Worker behaviors a test registry can hand out per class name.
#[derive(Clone)]
enum WorkerBehavior {
    Declares(Option<RetryOverride>),
    ConstructorFails,
    AccessorFails,
}

/// Worker stub with a fixed override declaration.
struct DeclaredWorker {
    declared: Option<RetryOverride>,
}

impl WorkerCapabilities for DeclaredWorker {
    fn retry_override(&self) -> Result<Option<RetryOverride>, ResolutionError> {
        Ok(self.declared.clone())
    }
}

/// Worker stub whose override accessor always fails.
struct BrokenAccessorWorker;

impl WorkerCapabilities for BrokenAccessorWorker {
    fn retry_override(&self) -> Result<Option<RetryOverride>, ResolutionError> {
        Err(ResolutionError::Accessor("declaration unavailable".to_string()))
    }
}

/// Registry stub mapping class names to scripted behaviors.
#[derive(Default)]
struct StubRegistry {
    workers: BTreeMap<String, WorkerBehavior>,
}

impl StubRegistry {
    fn with(class_name: &str, behavior: WorkerBehavior) -> Self {
        let mut workers = BTreeMap::new();
        workers.insert(class_name.to_string(), behavior);
        Self {
            workers,
        }
    }
}

impl WorkerRegistry for StubRegistry {
    fn instantiate(
        &self,
        class_name: &str,
    ) -> Result<Option<Box<dyn WorkerCapabilities>>, ResolutionError> {
        match self.workers.get(class_name) {
            None => Ok(None),
            Some(WorkerBehavior::Declares(declared)) => Ok(Some(Box::new(DeclaredWorker {
                declared: declared.clone(),
            }))),
            Some(WorkerBehavior::ConstructorFails) => {
                Err(ResolutionError::Construct("constructor raised".to_string()))
            }
            Some(WorkerBehavior::AccessorFails) => Ok(Some(Box::new(BrokenAccessorWorker))),
        }
    }
}

fn job(value: Value) -> JobRecord {
    JobRecord::from_value(value).unwrap()
}

#[test]
fn absent_record_is_never_skipped() {
    let registry = StubRegistry::default();
    assert!(!should_skip(None, &registry, 0));
    assert!(!should_skip(None, &registry, 10));
}

#[test]
fn non_retryable_jobs_are_never_skipped() {
    let registry = StubRegistry::default();
    let flagged_false = job(json!({"retry": false, "retry_count": 0}));
    let flag_absent = job(json!({"retry_count": 0}));
    let flag_null = job(json!({"retry": null, "retry_count": 0}));

    assert!(!should_skip(Some(&flagged_false), &registry, 100));
    assert!(!should_skip(Some(&flag_absent), &registry, 100));
    assert!(!should_skip(Some(&flag_null), &registry, 100));
}

#[test]
fn non_boolean_retry_flag_counts_as_retryable() {
    let registry = StubRegistry::default();
    let numeric_flag = job(json!({"retry": 0, "retry_count": 0}));
    assert!(should_skip(Some(&numeric_flag), &registry, 2));
}

#[test]
fn unset_retry_count_with_zero_threshold_reports() {
    let registry = StubRegistry::default();
    let record = job(json!({"retry": true, "retry_count": null}));
    assert!(!should_skip(Some(&record), &registry, 0));
}

#[test]
fn count_under_threshold_is_skipped() {
    let registry = StubRegistry::default();
    let record = job(json!({"retry": true, "retry_count": 0}));
    assert!(should_skip(Some(&record), &registry, 2));
}

#[test]
fn count_at_or_over_threshold_reports() {
    let registry = StubRegistry::default();
    let at_threshold = job(json!({"retry": true, "retry_count": 1}));
    let over_threshold = job(json!({"retry": true, "retry_count": 5}));
    assert!(!should_skip(Some(&at_threshold), &registry, 2));
    assert!(!should_skip(Some(&over_threshold), &registry, 2));
}

#[test]
fn integer_override_reports_only_on_designated_attempt() {
    let registry =
        StubRegistry::with("HardWorker", WorkerBehavior::Declares(Some(RetryOverride::Attempt(1))));
    let matching = job(json!({"retry": true, "retry_count": 0, "class": "HardWorker"}));
    let not_matching = job(json!({"retry": true, "retry_count": 1, "class": "HardWorker"}));

    assert!(!should_skip(Some(&matching), &registry, 0));
    assert!(should_skip(Some(&not_matching), &registry, 0));
}

#[test]
fn set_override_reports_only_on_member_attempts() {
    let attempts: BTreeSet<i64> = [1, 3].into_iter().collect();
    let registry = StubRegistry::with(
        "HardWorker",
        WorkerBehavior::Declares(Some(RetryOverride::Attempts(attempts))),
    );
    let member = job(json!({"retry": true, "retry_count": 2, "class": "HardWorker"}));
    let non_member = job(json!({"retry": true, "retry_count": 1, "class": "HardWorker"}));

    assert!(!should_skip(Some(&member), &registry, 0));
    assert!(should_skip(Some(&non_member), &registry, 0));
}

#[test]
fn empty_set_override_always_skips() {
    let registry = StubRegistry::with(
        "HardWorker",
        WorkerBehavior::Declares(Some(RetryOverride::Attempts(BTreeSet::new()))),
    );
    let record = job(json!({"retry": true, "retry_count": 4, "class": "HardWorker"}));
    assert!(should_skip(Some(&record), &registry, 0));
}

#[test]
fn override_takes_precedence_over_threshold() {
    let registry =
        StubRegistry::with("HardWorker", WorkerBehavior::Declares(Some(RetryOverride::Attempt(1))));
    // Threshold alone would suppress attempt 1, but the override designates it.
    let record = job(json!({"retry": true, "retry_count": 0, "class": "HardWorker"}));
    assert!(!should_skip(Some(&record), &registry, 5));
}

#[test]
fn unknown_class_falls_back_to_threshold() {
    let registry = StubRegistry::default();
    let record = job(json!({"retry": true, "retry_count": 0, "class": "GhostWorker"}));
    assert!(should_skip(Some(&record), &registry, 2));
    assert!(!should_skip(Some(&record), &registry, 1));
}

#[test]
fn failing_constructor_falls_back_to_threshold() {
    let registry = StubRegistry::with("HardWorker", WorkerBehavior::ConstructorFails);
    let record = job(json!({"retry": true, "retry_count": 0, "class": "HardWorker"}));
    assert!(should_skip(Some(&record), &registry, 2));
    assert!(!should_skip(Some(&record), &registry, 1));
}

#[test]
fn failing_accessor_falls_back_to_threshold() {
    let registry = StubRegistry::with("HardWorker", WorkerBehavior::AccessorFails);
    let record = job(json!({"retry": true, "retry_count": 0, "class": "HardWorker"}));
    assert!(should_skip(Some(&record), &registry, 2));
    assert!(!should_skip(Some(&record), &registry, 1));
}

#[test]
fn worker_declaring_no_override_falls_back_to_threshold() {
    let registry = StubRegistry::with("HardWorker", WorkerBehavior::Declares(None));
    let record = job(json!({"retry": true, "retry_count": 0, "class": "HardWorker"}));
    assert!(should_skip(Some(&record), &registry, 2));
}

#[test]
fn non_string_class_falls_back_to_threshold() {
    let registry =
        StubRegistry::with("HardWorker", WorkerBehavior::Declares(Some(RetryOverride::Attempt(9))));
    let record = job(json!({"retry": true, "retry_count": 0, "class": 42}));
    assert!(should_skip(Some(&record), &registry, 2));
}

#[test]
fn override_decoding_handles_loose_shapes() {
    assert_eq!(RetryOverride::from_value(&json!(3)), Some(RetryOverride::Attempt(3)));
    let attempts: BTreeSet<i64> = [1, 2].into_iter().collect();
    assert_eq!(
        RetryOverride::from_value(&json!([1, 2])),
        Some(RetryOverride::Attempts(attempts))
    );
    // Non-integer array elements are dropped, matching loose membership checks.
    let kept: BTreeSet<i64> = [4].into_iter().collect();
    assert_eq!(
        RetryOverride::from_value(&json!([4, "x"])),
        Some(RetryOverride::Attempts(kept))
    );
    // Unexpected shapes decode to no override, the defensive default.
    assert_eq!(RetryOverride::from_value(&json!("2")), None);
    assert_eq!(RetryOverride::from_value(&json!({"at": 2})), None);
    assert_eq!(RetryOverride::from_value(&json!(true)), None);
    assert_eq!(RetryOverride::from_value(&json!(2.5)), None);
}
