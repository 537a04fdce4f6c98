// crates/report-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Report Gate Runtime
// Description: Gate predicate and failure handler entry points.
// Purpose: Decide and format one job failure per invocation.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime holds the two entry points of this module: the pure gate
//! predicate and the failure handler that assembles and submits report
//! scopes. Invocations are synchronous, stateless, and independent.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod gate;
pub mod handler;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use gate::should_skip;
pub use handler::FailureHandler;
pub use handler::HandlerSettings;
