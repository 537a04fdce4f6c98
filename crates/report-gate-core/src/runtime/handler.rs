// crates/report-gate-core/src/runtime/handler.rs
// ============================================================================
// Module: Failure Handler
// Description: Failure hook building and submitting report scopes.
// Purpose: Assemble sanitized report payloads after consulting the gate.
// Dependencies: crate::core, crate::interfaces, crate::runtime::gate
// ============================================================================

//! ## Overview
//! The failure handler is the single entry point invoked by the queue
//! runtime's failure hook. It consults the report gate, assembles the report
//! scope (framework tag, job metadata, scrubbed parameters, actor identity),
//! and hands the scope to the error reporter. The handler is a defensive
//! shim: it never errors or panics outward, because an error-reporting hook
//! must not compound the failure it is reporting.
//! Invariants:
//! - Suppressed failures produce no side effect, silently.
//! - Person fields resolve independently; one failure never blanks another.
//! - Delivery failures stay with the reporter; the handler discards them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::error::Error;

use serde_json::Map;
use serde_json::Value;

use crate::core::FailureContext;
use crate::core::JobRecord;
use crate::core::PersonScope;
use crate::core::ReportOptions;
use crate::core::ReportScope;
use crate::core::RequestScope;
use crate::interfaces::ErrorReporter;
use crate::interfaces::ParamScrubber;
use crate::interfaces::WorkerRegistry;
use crate::runtime::gate;

// ============================================================================
// SECTION: Handler Settings
// ============================================================================

/// Settings controlling gating and scope assembly.
///
/// # Invariants
/// - `threshold` is the global effective-retry-count threshold.
/// - `param_denylist` names job fields excluded from the report outright.
/// - `scrub_fields` names job fields whose values get masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSettings {
    /// Global retry threshold; suppress while the effective count is under it.
    pub threshold: i64,
    /// Field names whose values are masked by the scrubber.
    pub scrub_fields: BTreeSet<String>,
    /// Field names excluded from report parameters entirely.
    pub param_denylist: BTreeSet<String>,
    /// Fixed framework label prefixed to the runtime version.
    pub framework_label: String,
    /// Version string reported by the queue runtime.
    pub runtime_version: String,
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self {
            threshold: 0,
            scrub_fields: BTreeSet::new(),
            param_denylist: BTreeSet::new(),
            framework_label: "sidekiq".to_string(),
            runtime_version: "unknown".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Failure Handler
// ============================================================================

/// Failure hook assembling report scopes for the error-tracking client.
///
/// # Invariants
/// - `handle_failure` never errors or panics outward.
/// - Each invocation is independent; the handler holds no mutable state.
pub struct FailureHandler<W, S, R>
where
    W: WorkerRegistry,
    S: ParamScrubber,
    R: ErrorReporter,
{
    /// Gating and scope-assembly settings.
    settings: HandlerSettings,
    /// Registry resolving job class names to worker instances.
    workers: W,
    /// Scrubber masking sensitive parameter values.
    scrubber: S,
    /// Error-tracking client seam.
    reporter: R,
}

impl<W, S, R> FailureHandler<W, S, R>
where
    W: WorkerRegistry,
    S: ParamScrubber,
    R: ErrorReporter,
{
    /// Creates a failure handler over the given collaborators.
    #[must_use]
    pub const fn new(settings: HandlerSettings, workers: W, scrubber: S, reporter: R) -> Self {
        Self {
            settings,
            workers,
            scrubber,
            reporter,
        }
    }

    /// Returns the handler settings.
    #[must_use]
    pub const fn settings(&self) -> &HandlerSettings {
        &self.settings
    }

    /// Handles one job failure from the queue runtime's failure hook.
    ///
    /// Consults the gate first; suppressed failures return with no side
    /// effect. Otherwise the assembled scope and the causing error go to the
    /// reporter with exception-level-filter evaluation requested. Delivery
    /// failures are discarded here; delivery guarantees belong to the
    /// reporter.
    pub fn handle_failure(&self, ctx: &FailureContext, error: &(dyn Error + 'static)) {
        if gate::should_skip(ctx.job.as_ref(), &self.workers, self.settings.threshold) {
            return;
        }

        let scope = self.build_scope(ctx.job.as_ref());
        let options = ReportOptions::default();
        let _ = self.reporter.report(&scope, error, &options);
    }

    /// Assembles the report scope for an optional job record.
    fn build_scope(&self, job: Option<&JobRecord>) -> ReportScope {
        ReportScope {
            framework: self.framework(),
            context: job.and_then(JobRecord::class).map(str::to_string),
            queue: job.and_then(JobRecord::queue).map(str::to_string),
            request: RequestScope {
                params: self.sanitized_params(job),
            },
            person: job.map_or_else(PersonScope::empty, |job| self.person_scope(job)),
        }
    }

    /// Returns the framework tag, label plus runtime version.
    fn framework(&self) -> String {
        format!("{}: {}", self.settings.framework_label, self.settings.runtime_version)
    }

    /// Returns the job fields minus the deny-list, scrubbed.
    fn sanitized_params(&self, job: Option<&JobRecord>) -> Map<String, Value> {
        let Some(job) = job else {
            return Map::new();
        };
        let retained: Map<String, Value> = job
            .fields()
            .iter()
            .filter(|(name, _)| !self.settings.param_denylist.contains(name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        self.scrubber.scrub(retained, &self.settings.scrub_fields)
    }

    /// Resolves the actor identity, field by field, collapsing failures.
    ///
    /// A worker or identity that cannot be resolved yields an empty person
    /// scope; a single failing accessor yields an absent field without
    /// touching the others.
    fn person_scope(&self, job: &JobRecord) -> PersonScope {
        let Some(class_name) = job.class() else {
            return PersonScope::empty();
        };
        let Ok(Some(worker)) = self.workers.instantiate(class_name) else {
            return PersonScope::empty();
        };
        let Ok(Some(identity)) = worker.identity(job.args()) else {
            return PersonScope::empty();
        };
        PersonScope {
            id: identity.id().ok().flatten(),
            email: identity.email().ok().flatten(),
            username: identity.username().ok().flatten(),
        }
    }
}
