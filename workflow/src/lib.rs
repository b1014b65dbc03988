//! Workflow-command side channel for programs running inside a CI job.
//!
//! The job talks to its orchestrator through specially formatted stdout lines
//! (`::name k=v,k=v::message`) plus environment variables for inputs and
//! state, mimicking the GitHub Actions runner protocol. The architecture
//! enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (command encoding, escaping,
//!   attribution). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting edges (environment lookups, the stdout sink).
//!   Isolated behind traits to enable scripting in tests.
//!
//! [`workflow::Workflow`] ties the two together: it holds the CI context
//! resolved once from the environment and a sink, and exposes the full
//! command surface (masking, outputs, annotations, groups, state, command
//! gating, matchers). [`testing`] adds annotation of classified test
//! outcomes.

pub mod core;
pub mod error;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod testing;
pub mod workflow;

pub use crate::error::WorkflowError;
pub use crate::workflow::Workflow;
