// crates/report-gate-workers/src/registry.rs
// ============================================================================
// Module: Worker Registry
// Description: In-memory registry mapping class names to worker factories.
// Purpose: Resolve job class names to constructible worker capability types.
// Dependencies: report-gate-core
// ============================================================================

//! ## Overview
//! The in-memory registry is the typed stand-in for dynamic type lookup by
//! name: integrations register a factory per job class, and the gate and
//! handler resolve class names through it. Unregistered names resolve to "no
//! capability" rather than an error; factory failures surface as resolution
//! errors for the caller to collapse.
//! Invariants:
//! - Class names are unique within the registry.
//! - Factories run per instantiation, mirroring per-failure construction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use report_gate_core::ResolutionError;
use report_gate_core::RetryOverride;
use report_gate_core::WorkerCapabilities;
use report_gate_core::WorkerRegistry;

// ============================================================================
// SECTION: Registry Errors
// ============================================================================

/// Registration errors for the in-memory worker registry.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A worker is already registered under the class name.
    #[error("worker already registered: {0}")]
    Duplicate(String),
}

// ============================================================================
// SECTION: Worker Factory
// ============================================================================

/// Factory constructing a worker capability instance per resolution.
type WorkerFactory =
    Box<dyn Fn() -> Result<Box<dyn WorkerCapabilities>, ResolutionError> + Send + Sync>;

// ============================================================================
// SECTION: Static Worker
// ============================================================================

/// Declaration-style worker carrying a fixed retry override.
///
/// # Invariants
/// - The declaration never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticWorker {
    /// Fixed override declaration, absent for threshold-gated workers.
    declared: Option<RetryOverride>,
}

impl StaticWorker {
    /// Creates a static worker with the given declaration.
    #[must_use]
    pub const fn new(declared: Option<RetryOverride>) -> Self {
        Self {
            declared,
        }
    }
}

impl WorkerCapabilities for StaticWorker {
    fn retry_override(&self) -> Result<Option<RetryOverride>, ResolutionError> {
        Ok(self.declared.clone())
    }
}

// ============================================================================
// SECTION: In-Memory Registry
// ============================================================================

/// In-memory worker registry keyed by job class name.
///
/// # Invariants
/// - Class names are unique; duplicate registration is an error.
/// - Unknown class names resolve to `Ok(None)`, never to an error.
#[derive(Default)]
pub struct InMemoryWorkerRegistry {
    /// Worker factories keyed by class name.
    factories: BTreeMap<String, WorkerFactory>,
}

impl InMemoryWorkerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a worker factory under a class name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] when the class name is taken.
    pub fn register_worker<F>(
        &mut self,
        class_name: impl Into<String>,
        factory: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn() -> Result<Box<dyn WorkerCapabilities>, ResolutionError> + Send + Sync + 'static,
    {
        let class_name = class_name.into();
        if self.factories.contains_key(&class_name) {
            return Err(RegistryError::Duplicate(class_name));
        }
        self.factories.insert(class_name, Box::new(factory));
        Ok(())
    }

    /// Registers a static worker with a fixed override declaration.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] when the class name is taken.
    pub fn register_static(
        &mut self,
        class_name: impl Into<String>,
        declared: Option<RetryOverride>,
    ) -> Result<(), RegistryError> {
        self.register_worker(class_name, move || {
            Ok(Box::new(StaticWorker::new(declared.clone())) as Box<dyn WorkerCapabilities>)
        })
    }

    /// Returns the number of registered class names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true when no workers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl WorkerRegistry for InMemoryWorkerRegistry {
    fn instantiate(
        &self,
        class_name: &str,
    ) -> Result<Option<Box<dyn WorkerCapabilities>>, ResolutionError> {
        self.factories.get(class_name).map(|factory| factory()).transpose()
    }
}
