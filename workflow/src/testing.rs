//! Annotation of test outcomes.
//!
//! Test harness integration works on an explicit tagged outcome rather than
//! caught panics: the harness classifies what happened, and the annotation
//! layer switches on the tag. Skips surface as warnings, failures as errors,
//! both attributed to the trace the harness captured.

use crate::core::attribution::Trace;
use crate::error::WorkflowError;
use crate::io::sink::CommandSink;
use crate::workflow::Workflow;

/// Classified result of running one test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    Passed,
    /// Test was skipped (an unmet assumption, a filtered case).
    Skipped {
        reason: Option<String>,
        trace: Trace,
    },
    /// Test failed (a violated assertion or any other fault).
    Failed {
        reason: Option<String>,
        trace: Trace,
    },
}

/// Annotate a single outcome: skips warn, failures error, passes stay quiet.
pub fn annotate_outcome<S: CommandSink>(
    workflow: &mut Workflow<S>,
    outcome: &TestOutcome,
) -> Result<(), WorkflowError> {
    match outcome {
        TestOutcome::Passed => Ok(()),
        TestOutcome::Skipped { reason, trace } => {
            workflow.warning_from(trace, reason.as_deref())
        }
        TestOutcome::Failed { reason, trace } => workflow.error_from(trace, reason.as_deref()),
    }
}

/// Run a test body that reports its own outcome, annotate it, and hand the
/// outcome back for the harness to act on.
pub fn annotate_test<S: CommandSink>(
    workflow: &mut Workflow<S>,
    run: impl FnOnce() -> TestOutcome,
) -> Result<TestOutcome, WorkflowError> {
    let outcome = run();
    annotate_outcome(workflow, &outcome)?;
    Ok(outcome)
}
