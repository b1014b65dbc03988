//! Output sink for encoded command lines.
//!
//! The sink is the only side effect of the library. Each command goes out as
//! one write so a single line is never garbled; interleaving between separate
//! calls is left to the sink's own atomicity, as the line protocol expects.

use std::io::{self, Write};

/// Line-oriented destination for encoded commands.
pub trait CommandSink {
    /// Write one full line (terminator appended by the sink).
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

impl<S: CommandSink + ?Sized> CommandSink for &mut S {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Standard output, one buffered write per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl CommandSink for StdoutSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        io::stdout().lock().write_all(buf.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}
