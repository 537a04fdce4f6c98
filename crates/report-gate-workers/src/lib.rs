// crates/report-gate-workers/src/lib.rs
// ============================================================================
// Module: Report Gate Workers
// Description: Built-in worker registry and parameter scrubber.
// Purpose: Provide ready implementations of the core trait seams.
// Dependencies: report-gate-core, serde_json
// ============================================================================

//! ## Overview
//! This crate ships the built-in implementations an integration needs out of
//! the box: an in-memory worker registry keyed by job class name and a
//! recursive field scrubber. Both implement the seams defined by
//! `report-gate-core`, so integrations can swap either for their own.
//! Invariants:
//! - Registry resolution routes by class name; unknown names are not errors.
//! - The scrubber bounds recursion depth and fails closed past the cap.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod registry;
pub mod scrub;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use registry::InMemoryWorkerRegistry;
pub use registry::RegistryError;
pub use registry::StaticWorker;
pub use scrub::DEFAULT_MAX_SCRUB_DEPTH;
pub use scrub::DEFAULT_REDACTION;
pub use scrub::FieldScrubber;
