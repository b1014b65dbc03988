//! Process-wide CI context.
//!
//! The original protocol scatters environment lookups (`CI`, `GITHUB_*`,
//! `RUNNER_DEBUG`) across call sites; here they are resolved once into this
//! snapshot (see [`crate::io::env::ci_context`]) and passed explicitly to
//! whatever needs them.

/// Snapshot of the CI-identifying environment, resolved once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiContext {
    /// `CI` equals `"true"`: enables permalinks and deferred annotations.
    pub ci: bool,
    /// `GITHUB_WORKSPACE`: absolute prefix stripped from attributed files.
    pub workspace: Option<String>,
    /// `GITHUB_REPOSITORY`: `owner/repo`, used for permalink URLs.
    pub repository: Option<String>,
    /// `GITHUB_SHA`: commit pinned in permalink URLs.
    pub sha: Option<String>,
    /// `RUNNER_DEBUG` equals `"1"`.
    pub debug: bool,
}

impl CiContext {
    /// Repository and commit identifiers, when both are present.
    pub fn permalink_base(&self) -> Option<(&str, &str)> {
        match (self.repository.as_deref(), self.sha.as_deref()) {
            (Some(repository), Some(sha)) => Some((repository, sha)),
            _ => None,
        }
    }
}
