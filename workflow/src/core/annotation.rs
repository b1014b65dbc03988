//! Annotation metadata attached to notice/warning/error commands.

use crate::core::command::Command;

/// Annotation severity; maps one-to-one onto a command keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Notice,
    Warning,
    Error,
}

impl Severity {
    pub fn command_name(self) -> &'static str {
        match self {
            Self::Notice => "notice",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Optional placement metadata for an annotation.
///
/// Any subset of fields may be set; unset fields are omitted from the
/// command. Column fields are only meaningful when `start_line` equals
/// `end_line` (documented, not enforced).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationProperties {
    pub title: Option<String>,
    pub file: Option<String>,
    pub start_column: Option<u32>,
    pub end_column: Option<u32>,
    pub start_line: Option<u32>,
    pub end_line: Option<u32>,
}

impl AnnotationProperties {
    /// Attach the set fields to a command, in the protocol's fixed order:
    /// `title`, `file`, `col`, `endColumn`, `line`, `endLine`.
    #[must_use]
    pub fn apply(&self, command: Command) -> Command {
        command
            .optional_property("title", self.title.as_deref())
            .optional_property("file", self.file.as_deref())
            .optional_property("col", self.start_column)
            .optional_property("endColumn", self.end_column)
            .optional_property("line", self.start_line)
            .optional_property("endLine", self.end_line)
    }
}
