//! Error taxonomy for workflow operations.

use thiserror::Error;

/// Failures surfaced synchronously to the caller.
///
/// Command encoding itself is total and never appears here; these cover
/// missing or malformed environment inputs, unattributable annotations, and
/// the output sink.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A required named input has no corresponding environment variable.
    #[error("input '{0}' is required and not supplied")]
    MissingRequiredInput(String),

    /// An input exists but is neither `true` nor `false` (case-insensitive).
    #[error("input '{0}' is not a boolean type")]
    InvalidBooleanInput(String),

    /// The calling context cannot be mapped to a workspace-relative source
    /// file; raised instead of emitting a blank or wrong file field.
    #[error("cannot attribute '{0}' to a workspace-relative path")]
    UnresolvableAttribution(String),

    /// The output sink rejected a write.
    #[error("write workflow command")]
    Sink(#[from] std::io::Error),
}
