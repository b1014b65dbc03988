//! Test-only scripted substitutes for the environment and the sink.

use std::collections::HashMap;
use std::io;

use crate::core::context::CiContext;
use crate::io::env::Env;
use crate::io::sink::CommandSink;

/// Map-backed [`Env`] so tests never touch process environment variables.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new<'a>(vars: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            vars: vars
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Sink that records written lines instead of printing them.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    pub lines: Vec<String>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single captured line; fails the test when zero or many were
    /// written.
    pub fn only_line(&self) -> &str {
        assert_eq!(self.lines.len(), 1, "expected exactly one line: {:?}", self.lines);
        &self.lines[0]
    }
}

impl CommandSink for CaptureSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Context for a job running on CI with full repository identity.
pub fn ci_context() -> CiContext {
    CiContext {
        ci: true,
        workspace: Some("/home/runner/work/repo".to_string()),
        repository: Some("owner/repo".to_string()),
        sha: Some("abc123".to_string()),
        debug: true,
    }
}

/// Context for a local run: no CI flag, no repository identity.
pub fn local_context() -> CiContext {
    CiContext::default()
}
