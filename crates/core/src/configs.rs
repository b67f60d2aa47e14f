//! Configuration parsing
//!
//! Strongly-typed views of the three external files the runner reads: the
//! required `workspace-runner.json`, per-package `package.json` manifests,
//! and the optional `pnpm-workspace.yaml` workspace declaration.

pub mod manifest;
pub mod runner;
pub mod workspace;
