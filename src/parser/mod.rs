pub mod scanner;
mod dispatcher;
mod enum_block;
mod message;
mod oneof;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::diagnostics::{DiagnosticSink, Level, LogSink};
use crate::error::ParseError;
use crate::schema::SchemaFile;

pub use dispatcher::{Dispatcher, State};
pub use scanner::Scanner;

/// Parse schema text into a `SchemaFile`, logging through the `log` crate.
///
/// This is the main entry point for the parser module.
pub fn parse(schema_text: &str) -> Result<SchemaFile, ParseError> {
    parse_with(schema_text, &mut LogSink)
}

/// Parse schema text, sending diagnostics to `sink`.
pub fn parse_with(
    schema_text: &str,
    sink: &mut dyn DiagnosticSink,
) -> Result<SchemaFile, ParseError> {
    Dispatcher::new(schema_text, sink).run()
}

/// Read the whole stream, then parse it.
pub fn parse_reader<R: Read>(
    mut reader: R,
    sink: &mut dyn DiagnosticSink,
) -> Result<SchemaFile, ParseError> {
    let mut text = String::new();
    if let Err(e) = reader.read_to_string(&mut text) {
        sink.emit(Level::Error, 0, format_args!("fail to read input: {}", e));
        return Err(ParseError::Io(e));
    }
    parse_with(&text, sink)
}

/// Open `path` and parse it. The file is closed on every return path.
pub fn parse_file(
    path: impl AsRef<Path>,
    sink: &mut dyn DiagnosticSink,
) -> Result<SchemaFile, ParseError> {
    let path = path.as_ref();
    sink.emit(
        Level::Debug,
        0,
        format_args!("Compiling .proto file {}", path.display()),
    );
    let file = File::open(path).map_err(|e| {
        sink.emit(
            Level::Error,
            0,
            format_args!("fail to open {}: {}", path.display(), e),
        );
        ParseError::Io(e)
    })?;
    parse_reader(file, sink)
}
