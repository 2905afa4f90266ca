//! Hotel pool scoring and badge-rule engine.
//!
//! The [`rating`] module holds the engine itself along with the service and router that
//! persist its output. [`config`], [`telemetry`], and [`error`] carry the process-level
//! plumbing shared with the API binary.

pub mod config;
pub mod error;
pub mod rating;
pub mod telemetry;
