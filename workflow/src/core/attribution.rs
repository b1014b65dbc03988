//! Source attribution for warning/error annotations.
//!
//! Annotations are attributed to the caller that raised them. Capture is
//! explicit: the public entry points are `#[track_caller]` and record a
//! [`Frame`] via [`std::panic::Location`], so there is no runtime stack
//! introspection anywhere. Fault-style reporting passes a pre-built [`Trace`]
//! instead.

use std::fmt;
use std::panic::Location;

use crate::core::context::CiContext;
use crate::error::WorkflowError;

/// One resolved position in caller code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Function or test name, when the caller knows it.
    pub symbol: Option<String>,
    /// Source file as reported at the capture site.
    pub file: String,
    pub line: u32,
}

impl Frame {
    pub fn new(symbol: Option<&str>, file: &str, line: u32) -> Self {
        Self {
            symbol: symbol.map(str::to_string),
            file: file.to_string(),
            line,
        }
    }

    /// Capture the position of the calling code.
    #[track_caller]
    pub fn here() -> Self {
        let location = Location::caller();
        Self {
            symbol: None,
            file: location.file().to_string(),
            line: location.line(),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "{symbol} ({}:{})", self.file, self.line),
            None => write!(f, "{}:{}", self.file, self.line),
        }
    }
}

/// Ordered, non-empty list of frames; the first frame is the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    frames: Vec<Frame>,
}

impl Trace {
    pub fn new(origin: Frame) -> Self {
        Self {
            frames: vec![origin],
        }
    }

    /// Capture a single-frame trace at the calling code.
    #[track_caller]
    pub fn here() -> Self {
        Self::new(Frame::here())
    }

    /// Append a caller frame below the origin, preserving stack order.
    #[must_use]
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn origin(&self) -> &Frame {
        &self.frames[0]
    }

    /// Frames below the origin, in stack order.
    pub fn rest(&self) -> &[Frame] {
        &self.frames[1..]
    }
}

/// Attribution resolved from a trace: where the annotation points and the
/// message to carry, permalink included when running under CI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    /// Workspace-relative source file.
    pub file: String,
    pub line: u32,
    /// Formatted message: optional permalink, position anchor, caller message,
    /// continuation frames.
    pub message: String,
}

/// Rewrite a captured file path relative to the CI workspace.
///
/// Relative paths pass through untouched. Absolute paths must sit under the
/// workspace root; anything else cannot be attributed and is an error rather
/// than a silently wrong file field.
pub fn workspace_relative(file: &str, workspace: Option<&str>) -> Result<String, WorkflowError> {
    if file.is_empty() {
        return Err(WorkflowError::UnresolvableAttribution(file.to_string()));
    }
    if !file.starts_with('/') {
        return Ok(file.to_string());
    }
    let stripped = workspace
        .filter(|prefix| !prefix.is_empty())
        .and_then(|prefix| file.strip_prefix(prefix));
    match stripped {
        Some(rest) => Ok(rest.trim_start_matches('/').to_string()),
        None => Err(WorkflowError::UnresolvableAttribution(file.to_string())),
    }
}

/// Resolve a trace against the CI context.
///
/// The message opens with `https://github.com/<repo>/blob/<sha>/` when the
/// context is CI and both identifiers are known, then `<file>#L<line>`, then
/// ` : <message>` when one was supplied. Frames below the origin follow, one
/// per `\n\tat` continuation line.
pub fn resolve(
    context: &CiContext,
    trace: &Trace,
    message: Option<&str>,
) -> Result<Attribution, WorkflowError> {
    let origin = trace.origin();
    let file = workspace_relative(&origin.file, context.workspace.as_deref())?;

    let mut formatted = String::new();
    if context.ci && let Some((repository, sha)) = context.permalink_base() {
        formatted.push_str("https://github.com/");
        formatted.push_str(repository);
        formatted.push_str("/blob/");
        formatted.push_str(sha);
        formatted.push('/');
    }
    formatted.push_str(&file);
    formatted.push_str("#L");
    formatted.push_str(&origin.line.to_string());
    if let Some(message) = message {
        formatted.push_str(" : ");
        formatted.push_str(message);
    }
    for frame in trace.rest() {
        formatted.push_str("\n\tat ");
        formatted.push_str(&frame.to_string());
    }

    Ok(Attribution {
        file,
        line: origin.line,
        message: formatted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ci_context() -> CiContext {
        CiContext {
            ci: true,
            workspace: Some("/home/runner/work/repo".to_string()),
            repository: Some("owner/repo".to_string()),
            sha: Some("abc123".to_string()),
            debug: false,
        }
    }

    #[test]
    fn relative_file_passes_through() {
        let file = workspace_relative("src/lib.rs", None).expect("relative");
        assert_eq!(file, "src/lib.rs");
    }

    #[test]
    fn absolute_file_under_workspace_is_stripped() {
        let file = workspace_relative(
            "/home/runner/work/repo/src/lib.rs",
            Some("/home/runner/work/repo"),
        )
        .expect("under workspace");
        assert_eq!(file, "src/lib.rs");
    }

    #[test]
    fn absolute_file_outside_workspace_is_unresolvable() {
        let err = workspace_relative("/usr/lib/other.rs", Some("/home/runner/work/repo"))
            .expect_err("outside workspace");
        assert!(matches!(err, WorkflowError::UnresolvableAttribution(_)));
    }

    #[test]
    fn absolute_file_without_workspace_is_unresolvable() {
        let err = workspace_relative("/anywhere/lib.rs", None).expect_err("no workspace");
        assert!(matches!(err, WorkflowError::UnresolvableAttribution(_)));
    }

    #[test]
    fn empty_file_is_unresolvable() {
        let err = workspace_relative("", None).expect_err("empty");
        assert!(matches!(err, WorkflowError::UnresolvableAttribution(_)));
    }

    #[test]
    fn resolve_builds_permalink_on_ci() {
        let trace = Trace::new(Frame::new(None, "src/main.rs", 42));
        let attribution = resolve(&ci_context(), &trace, Some("boom")).expect("resolve");
        assert_eq!(attribution.file, "src/main.rs");
        assert_eq!(attribution.line, 42);
        assert_eq!(
            attribution.message,
            "https://github.com/owner/repo/blob/abc123/src/main.rs#L42 : boom"
        );
    }

    #[test]
    fn resolve_outside_ci_uses_plain_path() {
        let context = CiContext::default();
        let trace = Trace::new(Frame::new(None, "src/main.rs", 7));
        let attribution = resolve(&context, &trace, None).expect("resolve");
        assert_eq!(attribution.message, "src/main.rs#L7");
    }

    #[test]
    fn resolve_without_repository_omits_permalink_even_on_ci() {
        let context = CiContext {
            ci: true,
            ..CiContext::default()
        };
        let trace = Trace::new(Frame::new(None, "src/main.rs", 7));
        let attribution = resolve(&context, &trace, Some("m")).expect("resolve");
        assert_eq!(attribution.message, "src/main.rs#L7 : m");
    }

    #[test]
    fn remaining_frames_become_continuation_lines() {
        let trace = Trace::new(Frame::new(Some("assert_widget"), "tests/widget.rs", 10))
            .with_frame(Frame::new(Some("widget_suite"), "tests/widget.rs", 55))
            .with_frame(Frame::new(None, "src/harness.rs", 9));
        let attribution = resolve(&CiContext::default(), &trace, Some("sizes differ"))
            .expect("resolve");
        assert_eq!(
            attribution.message,
            "tests/widget.rs#L10 : sizes differ\n\tat widget_suite (tests/widget.rs:55)\n\tat src/harness.rs:9"
        );
    }
}
