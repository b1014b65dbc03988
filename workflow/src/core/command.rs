//! Pure encoder for the workflow-command line protocol.
//!
//! A command is one line on stdout shaped as `::name k=v,k=v::message`. The
//! orchestrator splits on the `::` boundaries, so every reserved character in
//! property values and the message is percent-escaped before emission.

use std::fmt;

/// Placeholder emitted when a command is constructed without a name.
const MISSING_COMMAND: &str = "missing.command";

/// Scalar value carried by a command property or message.
///
/// Strings pass through unchanged; other variants use their canonical decimal
/// or `true`/`false` rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// A single workflow command, frozen once built.
///
/// Properties keep insertion order; that order is the emission order. A
/// property holding `None` is kept in the list but skipped entirely when
/// encoding, so callers can thread optional values through without
/// reshuffling the segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: String,
    properties: Vec<(String, Option<Scalar>)>,
    message: Option<Scalar>,
}

impl Command {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            properties: Vec::new(),
            message: None,
        }
    }

    /// Append a property; emission order follows insertion order.
    #[must_use]
    pub fn property(mut self, key: &str, value: impl Into<Scalar>) -> Self {
        self.properties.push((key.to_string(), Some(value.into())));
        self
    }

    /// Append a property that is omitted from the encoded line when `None`.
    #[must_use]
    pub fn optional_property(mut self, key: &str, value: Option<impl Into<Scalar>>) -> Self {
        self.properties.push((key.to_string(), value.map(Into::into)));
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<Scalar>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Effective command keyword, placeholder included.
    pub fn name(&self) -> &str {
        if self.name.is_empty() {
            MISSING_COMMAND
        } else {
            &self.name
        }
    }

    /// Encode to the single-line wire form.
    ///
    /// Total: absent names degrade to `missing.command`, an absent message to
    /// the empty string. Encoding the same command twice is byte-identical.
    pub fn encode(&self) -> String {
        let mut line = String::from("::");
        line.push_str(if self.name.is_empty() {
            MISSING_COMMAND
        } else {
            &self.name
        });

        let mut first = true;
        for (key, value) in &self.properties {
            let Some(value) = value else { continue };
            line.push(if first { ' ' } else { ',' });
            first = false;
            line.push_str(key);
            line.push('=');
            line.push_str(&escape_property(&value.to_string()));
        }

        line.push_str("::");
        if let Some(message) = &self.message {
            line.push_str(&escape_data(&message.to_string()));
        }
        line
    }
}

/// Escape a message payload: `%`, CR, LF.
///
/// `%` must go first so later substitutions are not re-escaped.
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a property value: message escapes plus `:` and `,`.
///
/// Property values sit inside the `k=v,k=v` table, so the segment delimiters
/// must be escaped too; the message is the final field and may keep them.
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
