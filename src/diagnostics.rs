//! Leveled diagnostics emitted while parsing.
//!
//! The parser does not own where diagnostics go. It writes into a
//! [`DiagnosticSink`] through a [`Diagnostics`] context that carries the
//! current block nesting depth, so indentation follows the call structure.

use std::fmt;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Debug,
    Trace,
}

/// Destination for parser diagnostics.
pub trait DiagnosticSink {
    fn emit(&mut self, level: Level, depth: usize, args: fmt::Arguments<'_>);
}

/// Forwards diagnostics to the `log` facade, indented two spaces per level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, level: Level, depth: usize, args: fmt::Arguments<'_>) {
        let indent = depth * 2;
        match level {
            Level::Error => log::error!("{:indent$}{}", "", args, indent = indent),
            Level::Debug => log::debug!("{:indent$}{}", "", args, indent = indent),
            Level::Trace => log::trace!("{:indent$}{}", "", args, indent = indent),
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _level: Level, _depth: usize, _args: fmt::Arguments<'_>) {}
}

/// A single captured diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub level: Level,
    pub depth: usize,
    pub message: String,
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub records: Vec<Record>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded at exactly `level`, in emission order.
    pub fn messages(&self, level: Level) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.as_str())
            .collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&mut self, level: Level, depth: usize, args: fmt::Arguments<'_>) {
        self.records.push(Record {
            level,
            depth,
            message: args.to_string(),
        });
    }
}

/// A sink plus the current nesting depth.
pub struct Diagnostics<'a> {
    sink: &'a mut dyn DiagnosticSink,
    depth: usize,
}

impl<'a> Diagnostics<'a> {
    pub fn new(sink: &'a mut dyn DiagnosticSink) -> Self {
        Diagnostics { sink, depth: 0 }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// A child context one level deeper, borrowing the same sink.
    pub fn nested(&mut self) -> Diagnostics<'_> {
        Diagnostics {
            sink: &mut *self.sink,
            depth: self.depth + 1,
        }
    }

    pub fn error(&mut self, args: fmt::Arguments<'_>) {
        self.sink.emit(Level::Error, self.depth, args);
    }

    pub fn debug(&mut self, args: fmt::Arguments<'_>) {
        self.sink.emit(Level::Debug, self.depth, args);
    }

    pub fn trace(&mut self, args: fmt::Arguments<'_>) {
        self.sink.emit(Level::Trace, self.depth, args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_depth() {
        let mut sink = RecordingSink::new();
        {
            let mut diag = Diagnostics::new(&mut sink);
            diag.debug(format_args!("outer"));
            {
                let mut inner = diag.nested();
                inner.debug(format_args!("inner {}", 1));
                inner.nested().trace(format_args!("innermost"));
            }
            diag.error(format_args!("back"));
        }

        let depths: Vec<usize> = sink.records.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 0]);
        assert_eq!(sink.messages(Level::Debug), vec!["outer", "inner 1"]);
        assert_eq!(sink.messages(Level::Error), vec!["back"]);
    }

    #[test]
    fn test_null_sink_discards() {
        let mut sink = NullSink;
        let mut diag = Diagnostics::new(&mut sink);
        diag.error(format_args!("ignored"));
        assert_eq!(diag.depth(), 0);
    }
}
