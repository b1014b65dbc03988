//! Facade over the command encoder, attribution resolver, and output sink.
//!
//! A [`Workflow`] owns the resolved [`CiContext`] and a [`CommandSink`];
//! every operation is a pure computation over its inputs followed by one
//! line written to the sink.

use tracing::debug;

use crate::core::annotation::{AnnotationProperties, Severity};
use crate::core::attribution::{self, Frame, Trace};
use crate::core::command::{Command, Scalar};
use crate::core::context::CiContext;
use crate::error::WorkflowError;
use crate::io::env::{self, Env};
use crate::io::sink::{CommandSink, StdoutSink};

/// Entry point for issuing workflow commands.
#[derive(Debug)]
pub struct Workflow<S: CommandSink = StdoutSink> {
    context: CiContext,
    sink: S,
}

impl Workflow<StdoutSink> {
    /// Resolve the CI context from the given environment and write commands
    /// to stdout.
    pub fn from_env(environment: &impl Env) -> Self {
        Self::new(env::ci_context(environment), StdoutSink)
    }
}

impl<S: CommandSink> Workflow<S> {
    pub fn new(context: CiContext, sink: S) -> Self {
        Self { context, sink }
    }

    pub fn context(&self) -> &CiContext {
        &self.context
    }

    fn issue(&mut self, command: &Command) -> Result<(), WorkflowError> {
        // Payloads stay out of diagnostics; they may hold values being masked.
        debug!(command = command.name(), "issuing workflow command");
        self.sink.write_line(&command.encode())?;
        Ok(())
    }

    // ----- masking -----

    /// Hide a phrase from the job log.
    pub fn set_secret(&mut self, secret: &str) -> Result<(), WorkflowError> {
        self.issue(&Command::new("add-mask").message(secret))
    }

    /// Alias for [`Workflow::set_secret`].
    pub fn add_mask(&mut self, mask: &str) -> Result<(), WorkflowError> {
        self.set_secret(mask)
    }

    // ----- outputs & echo -----

    /// Set a step output.
    pub fn set_output(
        &mut self,
        name: &str,
        value: impl Into<Scalar>,
    ) -> Result<(), WorkflowError> {
        self.issue(&Command::new("set-output").property("name", name).message(value))
    }

    /// Toggle command echoing. This does not disable commands.
    pub fn set_command_echo(&mut self, enabled: bool) -> Result<(), WorkflowError> {
        self.issue(&Command::new("echo").message(if enabled { "on" } else { "off" }))
    }

    // ----- logging -----

    /// Print a plain message, outside the command grammar.
    pub fn info(&mut self, message: &str) -> Result<(), WorkflowError> {
        self.sink.write_line(message)?;
        Ok(())
    }

    /// Whether the runner is in debug mode (`RUNNER_DEBUG=1`).
    pub fn is_debug(&self) -> bool {
        self.context.debug
    }

    /// Print a debug message.
    pub fn debug(&mut self, message: &str) -> Result<(), WorkflowError> {
        self.issue(&Command::new("debug").message(message))
    }

    // ----- annotations -----

    /// Print a notice annotation. Notices carry no caller attribution.
    pub fn notice(&mut self, message: &str) -> Result<(), WorkflowError> {
        self.issue(&Command::new("notice").message(message))
    }

    /// Print a notice annotation with placement metadata.
    pub fn notice_with(
        &mut self,
        message: &str,
        properties: &AnnotationProperties,
    ) -> Result<(), WorkflowError> {
        self.annotate_with(Severity::Notice, message, properties)
    }

    /// Print a warning annotation attributed to the calling code.
    #[track_caller]
    pub fn warning(&mut self, message: &str) -> Result<(), WorkflowError> {
        self.annotate_trace(Severity::Warning, &Trace::here(), Some(message))
    }

    /// Print a warning annotation with placement metadata.
    pub fn warning_with(
        &mut self,
        message: &str,
        properties: &AnnotationProperties,
    ) -> Result<(), WorkflowError> {
        self.annotate_with(Severity::Warning, message, properties)
    }

    /// Print a warning annotation attributed to a captured trace.
    pub fn warning_from(
        &mut self,
        trace: &Trace,
        message: Option<&str>,
    ) -> Result<(), WorkflowError> {
        self.annotate_trace(Severity::Warning, trace, message)
    }

    /// Print an error annotation attributed to the calling code.
    #[track_caller]
    pub fn error(&mut self, message: &str) -> Result<(), WorkflowError> {
        self.annotate_trace(Severity::Error, &Trace::here(), Some(message))
    }

    /// Print an error annotation with placement metadata.
    pub fn error_with(
        &mut self,
        message: &str,
        properties: &AnnotationProperties,
    ) -> Result<(), WorkflowError> {
        self.annotate_with(Severity::Error, message, properties)
    }

    /// Print an error annotation attributed to a captured trace.
    pub fn error_from(
        &mut self,
        trace: &Trace,
        message: Option<&str>,
    ) -> Result<(), WorkflowError> {
        self.annotate_trace(Severity::Error, trace, message)
    }

    /// Print an attributed error, flush the sink, and terminate the process
    /// with exit status 1. The error line is fully written before exit.
    #[track_caller]
    pub fn set_failed(&mut self, message: &str) -> ! {
        let trace = Trace::here();
        if let Err(err) = self.annotate_trace(Severity::Error, &trace, Some(message)) {
            tracing::error!(error = %err, "emit failure annotation");
        }
        if let Err(err) = self.sink.flush() {
            tracing::error!(error = %err, "flush sink");
        }
        std::process::exit(1)
    }

    fn annotate_with(
        &mut self,
        severity: Severity,
        message: &str,
        properties: &AnnotationProperties,
    ) -> Result<(), WorkflowError> {
        let command = properties
            .apply(Command::new(severity.command_name()))
            .message(message);
        self.issue(&command)
    }

    fn annotate_trace(
        &mut self,
        severity: Severity,
        trace: &Trace,
        message: Option<&str>,
    ) -> Result<(), WorkflowError> {
        let attribution = attribution::resolve(&self.context, trace, message)?;
        let command = Command::new(severity.command_name())
            .property("file", attribution.file)
            .property("line", attribution.line)
            .property("col", 1)
            .message(attribution.message);
        self.issue(&command)
    }

    // ----- groups -----

    /// Start a collapsible log group.
    pub fn start_group(&mut self, name: &str) -> Result<(), WorkflowError> {
        self.issue(&Command::new("group").message(name))
    }

    /// End the currently open group.
    pub fn end_group(&mut self) -> Result<(), WorkflowError> {
        self.issue(&Command::new("endgroup"))
    }

    /// Run a closure inside a group.
    pub fn group<T>(
        &mut self,
        name: &str,
        run: impl FnOnce(&mut Self) -> T,
    ) -> Result<T, WorkflowError> {
        self.start_group(name)?;
        let value = run(self);
        self.end_group()?;
        Ok(value)
    }

    // ----- state -----

    /// Save a state value for a later job phase; read it back with
    /// [`crate::io::env::state`].
    pub fn save_state(
        &mut self,
        name: &str,
        value: impl Into<Scalar>,
    ) -> Result<(), WorkflowError> {
        self.issue(&Command::new("save-state").property("name", name).message(value))
    }

    // ----- command gating -----

    /// Stop command processing until `token` is issued again.
    pub fn stop_commands(&mut self, token: &str) -> Result<(), WorkflowError> {
        self.issue(&Command::new("stop-commands").message(token))
    }

    /// Resume command processing stopped with the same token.
    pub fn start_commands(&mut self, token: &str) -> Result<(), WorkflowError> {
        self.issue(&Command::new(token))
    }

    // ----- matchers -----

    /// Register a problem matcher from a JSON file path.
    pub fn add_matcher(&mut self, path: &str) -> Result<(), WorkflowError> {
        self.issue(&Command::new("add-matcher").message(path))
    }

    /// Remove a problem matcher by owner.
    pub fn remove_matcher(&mut self, owner: &str) -> Result<(), WorkflowError> {
        self.issue(&Command::new("remove-matcher").property("owner", owner))
    }
}

/// Annotation deferred to resolution time, emitted only under CI.
///
/// Captures the creation site so the eventual annotation points at the code
/// that built the message, not at where it was resolved. Intended for
/// assertion-style messages that should annotate the job only when it runs
/// on CI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredMessage {
    severity: Severity,
    message: String,
    properties: Option<AnnotationProperties>,
    frame: Frame,
}

impl DeferredMessage {
    #[track_caller]
    pub fn notice(message: &str) -> Self {
        Self::capture(Severity::Notice, message, None)
    }

    /// Deferred notice with placement metadata.
    #[track_caller]
    pub fn notice_with(message: &str, properties: &AnnotationProperties) -> Self {
        Self::capture(Severity::Notice, message, Some(properties.clone()))
    }

    #[track_caller]
    pub fn warning(message: &str) -> Self {
        Self::capture(Severity::Warning, message, None)
    }

    #[track_caller]
    pub fn error(message: &str) -> Self {
        Self::capture(Severity::Error, message, None)
    }

    #[track_caller]
    fn capture(severity: Severity, message: &str, properties: Option<AnnotationProperties>) -> Self {
        Self {
            severity,
            message: message.to_string(),
            properties,
            frame: Frame::here(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Emit the annotation when the workflow runs under CI, then hand back
    /// the message either way.
    pub fn resolve<'a, S: CommandSink>(
        &'a self,
        workflow: &mut Workflow<S>,
    ) -> Result<&'a str, WorkflowError> {
        if workflow.context.ci {
            match (self.severity, &self.properties) {
                (Severity::Notice, Some(properties)) => {
                    workflow.notice_with(&self.message, properties)?;
                }
                (Severity::Notice, None) => workflow.notice(&self.message)?,
                (severity, _) => workflow.annotate_trace(
                    severity,
                    &Trace::new(self.frame.clone()),
                    Some(&self.message),
                )?,
            }
        }
        Ok(&self.message)
    }
}
