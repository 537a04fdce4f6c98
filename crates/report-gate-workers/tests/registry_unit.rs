// crates/report-gate-workers/tests/registry_unit.rs
// ============================================================================
// Module: Worker Registry Tests
// Description: Validate registration and resolution behavior.
// Purpose: Ensure class-name routing and failure surfacing are correct.
// Dependencies: report-gate-workers, report-gate-core
// ============================================================================

//! Worker registry resolution tests.

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

use report_gate_core::ResolutionError;
use report_gate_core::RetryOverride;
use report_gate_core::WorkerCapabilities;
use report_gate_core::WorkerRegistry;
use report_gate_workers::InMemoryWorkerRegistry;
use report_gate_workers::StaticWorker;

type TestResult = Result<(), String>;

#[test]
fn unknown_class_resolves_to_no_capability() -> TestResult {
    let registry = InMemoryWorkerRegistry::new();
    let resolved = registry.instantiate("GhostWorker").map_err(|err| err.to_string())?;
    assert!(resolved.is_none());
    Ok(())
}

#[test]
fn registered_static_worker_declares_its_override() -> TestResult {
    let mut registry = InMemoryWorkerRegistry::new();
    registry
        .register_static("HardWorker", Some(RetryOverride::Attempt(2)))
        .map_err(|err| err.to_string())?;

    let worker = registry
        .instantiate("HardWorker")
        .map_err(|err| err.to_string())?
        .ok_or("expected registered worker")?;
    let declared = worker.retry_override().map_err(|err| err.to_string())?;
    assert_eq!(declared, Some(RetryOverride::Attempt(2)));
    Ok(())
}

#[test]
fn duplicate_registration_is_rejected() -> TestResult {
    let mut registry = InMemoryWorkerRegistry::new();
    registry.register_static("HardWorker", None).map_err(|err| err.to_string())?;

    let duplicate = registry.register_static("HardWorker", Some(RetryOverride::Attempt(1)));
    match duplicate {
        Err(error) => {
            assert!(error.to_string().contains("worker already registered: HardWorker"));
            Ok(())
        }
        Ok(()) => Err("expected duplicate registration rejection".to_string()),
    }
}

#[test]
fn factory_failure_surfaces_as_resolution_error() -> TestResult {
    let mut registry = InMemoryWorkerRegistry::new();
    registry
        .register_worker("FlakyWorker", || {
            Err(ResolutionError::Construct("constructor raised".to_string()))
        })
        .map_err(|err| err.to_string())?;

    match registry.instantiate("FlakyWorker") {
        Err(error) => {
            assert!(error.to_string().contains("worker construction failed"));
            Ok(())
        }
        Ok(_) => Err("expected constructor failure".to_string()),
    }
}

#[test]
fn factory_runs_per_instantiation() -> TestResult {
    let mut registry = InMemoryWorkerRegistry::new();
    registry
        .register_worker("HardWorker", || {
            Ok(Box::new(StaticWorker::new(None)) as Box<dyn WorkerCapabilities>)
        })
        .map_err(|err| err.to_string())?;

    let first = registry.instantiate("HardWorker").map_err(|err| err.to_string())?;
    let second = registry.instantiate("HardWorker").map_err(|err| err.to_string())?;
    assert!(first.is_some());
    assert!(second.is_some());
    assert_eq!(registry.len(), 1);
    assert!(!registry.is_empty());
    Ok(())
}

#[test]
fn default_capabilities_resolve_to_absent() -> TestResult {
    let worker = StaticWorker::new(None);
    let declared = worker.retry_override().map_err(|err| err.to_string())?;
    assert_eq!(declared, None);
    let identity = worker.identity(&[]).map_err(|err| err.to_string())?;
    assert!(identity.is_none());
    Ok(())
}
