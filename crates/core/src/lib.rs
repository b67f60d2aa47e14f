//! wrun core library
//!
//! This is the core library for the wrun workspace process runner. It provides
//! the business logic for workspace discovery, run-set filtering, and child
//! process supervision; the `wrun_cli` crate layers presentation (plain output
//! or the terminal dashboard) on top.
//!
//! ## Architecture
//!
//! The core library is organized into several modules:
//!
//! - [`workspace`] - Workspace declaration detection and package discovery
//! - [`selection`] - Run-set filtering against the run configuration
//! - [`supervisor`] - Child process spawning, tracking, and shutdown
//! - [`configs`] - Configuration parsing for the runner, manifests, and workspace files
//! - [`types`] - Common error types and type aliases
//!
//! All state lives in values constructed at startup and owned by the caller's
//! control loop; there are no module-level globals. Per-child tasks communicate
//! with the control loop exclusively over the supervisor's event channel.

pub mod configs;
pub mod selection;
pub mod supervisor;
pub mod types;
pub mod workspace;

// Re-export the main types for easier usage
pub use types::{RunnerError, RunnerResult};
