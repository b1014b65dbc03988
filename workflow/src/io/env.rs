//! Environment-variable side of the protocol: inputs, state, CI context.
//!
//! All lookups go through the [`Env`] trait so tests can script the
//! environment without mutating process state.

use crate::core::context::CiContext;
use crate::error::WorkflowError;

/// Read access to named environment variables.
pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

/// Process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Lookup behavior for named inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputOptions {
    /// Fail with [`WorkflowError::MissingRequiredInput`] when unset.
    pub required: bool,
    /// Trim surrounding whitespace from the value.
    pub trim_whitespace: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            required: false,
            trim_whitespace: true,
        }
    }
}

/// `INPUT_` key for a human-readable input name: spaces become underscores,
/// the whole name is uppercased.
fn input_key(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Value of a named input, trimmed, or `None` when unset.
pub fn input(env: &impl Env, name: &str) -> Option<String> {
    input_with(env, name, &InputOptions::default()).unwrap_or_default()
}

/// Value of a named input under explicit options.
pub fn input_with(
    env: &impl Env,
    name: &str,
    options: &InputOptions,
) -> Result<Option<String>, WorkflowError> {
    let value = env.var(&input_key(name));
    match value {
        Some(value) => Ok(Some(if options.trim_whitespace {
            value.trim().to_string()
        } else {
            value
        })),
        None if options.required => Err(WorkflowError::MissingRequiredInput(name.to_string())),
        None => Ok(None),
    }
}

/// Named input split into lines, empty lines dropped. Unset inputs yield an
/// empty list.
pub fn multiline_input(env: &impl Env, name: &str) -> Vec<String> {
    multiline_input_with(env, name, &InputOptions::default()).unwrap_or_default()
}

/// Multiline variant of [`input_with`]; trimming applies to the whole value,
/// not per line.
pub fn multiline_input_with(
    env: &impl Env,
    name: &str,
    options: &InputOptions,
) -> Result<Vec<String>, WorkflowError> {
    let value = input_with(env, name, options)?;
    Ok(value
        .map(|value| {
            value
                .split('\n')
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default())
}

/// Named input parsed as a boolean.
///
/// Accepts case-insensitive `true`/`false`. An unset optional input reads as
/// `false`; any other value is [`WorkflowError::InvalidBooleanInput`].
pub fn boolean_input(env: &impl Env, name: &str) -> Result<bool, WorkflowError> {
    boolean_input_with(env, name, &InputOptions::default())
}

/// Boolean variant of [`input_with`].
pub fn boolean_input_with(
    env: &impl Env,
    name: &str,
    options: &InputOptions,
) -> Result<bool, WorkflowError> {
    let Some(value) = input_with(env, name, options)? else {
        return Ok(false);
    };
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(WorkflowError::InvalidBooleanInput(name.to_string()))
    }
}

/// Saved state from `STATE_<name>`; the name is used verbatim.
pub fn state(env: &impl Env, name: &str) -> Option<String> {
    env.var(&format!("STATE_{name}"))
}

/// Resolve the process-wide CI context snapshot.
pub fn ci_context(env: &impl Env) -> CiContext {
    CiContext {
        ci: env.var("CI").as_deref() == Some("true"),
        workspace: env.var("GITHUB_WORKSPACE"),
        repository: env.var("GITHUB_REPOSITORY"),
        sha: env.var("GITHUB_SHA"),
        debug: env.var("RUNNER_DEBUG").as_deref() == Some("1"),
    }
}
