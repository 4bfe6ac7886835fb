use crate::diagnostics::{DiagnosticSink, Diagnostics};
use crate::error::ParseError;
use crate::schema::SchemaFile;

use super::message::parse_message;
use super::scanner::Scanner;

/// Top-level parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Nothing but whitespace and comments seen so far.
    AwaitingSyntax,
    /// `syntax = "proto3";` accepted; declarations may follow.
    Ready,
    Failed,
    Done,
}

/// Reads top-level declarations one keyword at a time and routes each to
/// its block parser.
pub struct Dispatcher<'s, 'd> {
    scanner: Scanner<'s>,
    diag: Diagnostics<'d>,
    state: State,
    schema: SchemaFile,
}

impl<'s, 'd> Dispatcher<'s, 'd> {
    pub fn new(input: &'s str, sink: &'d mut dyn DiagnosticSink) -> Self {
        Dispatcher {
            scanner: Scanner::new(input),
            diag: Diagnostics::new(sink),
            state: State::AwaitingSyntax,
            schema: SchemaFile::new(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Parse one declaration. Returns the state reached.
    ///
    /// After an error the dispatcher is `Failed` and further steps return
    /// the same state without reading.
    pub fn step(&mut self) -> Result<State, ParseError> {
        if matches!(self.state, State::Failed | State::Done) {
            return Ok(self.state);
        }
        match self.dispatch() {
            Ok(state) => {
                self.state = state;
                Ok(state)
            }
            Err(e) => {
                self.state = State::Failed;
                self.diag.error(format_args!("{}", e));
                Err(e)
            }
        }
    }

    /// Run to completion and hand over the schema.
    pub fn run(mut self) -> Result<SchemaFile, ParseError> {
        loop {
            match self.step()? {
                State::Done => return Ok(self.schema),
                State::Failed => {
                    return Err(ParseError::syntax("parser already failed"));
                }
                State::AwaitingSyntax | State::Ready => {}
            }
        }
    }

    fn dispatch(&mut self) -> Result<State, ParseError> {
        if self.scanner.skip_comments()? > 0 {
            self.diag.trace(format_args!("Got comment"));
        }
        let keyword = match self.scanner.next_word()? {
            Some(word) => word,
            None if self.state == State::Ready => return Ok(State::Done),
            None => return Err(ParseError::eof("syntax declaration")),
        };

        if self.state == State::AwaitingSyntax {
            if keyword != "syntax" {
                return Err(ParseError::Ordering { keyword });
            }
            self.parse_syntax()?;
            return Ok(State::Ready);
        }

        match keyword.as_str() {
            "syntax" => self.parse_syntax()?,
            "message" => {
                let message = parse_message(&mut self.scanner, &mut self.diag)?;
                self.schema.push_message(message)?;
            }
            "import" | "option" | "package" | "enum" | "service" => {
                return Err(ParseError::UnsupportedFeature { feature: keyword });
            }
            ";" => {}
            _ => return Err(ParseError::UnknownKeyword(keyword)),
        }
        Ok(State::Ready)
    }

    fn parse_syntax(&mut self) -> Result<(), ParseError> {
        self.scanner.expect_char('=', "after \"syntax\"")?;
        let version = self.scanner.read_quoted("syntax version")?;
        self.scanner.expect_char(';', "after syntax declaration")?;
        self.schema.set_syntax(&version)?;
        self.diag.debug(format_args!("Valid syntax declaration"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Level, NullSink, RecordingSink};

    #[test]
    fn test_state_transitions() {
        let mut sink = NullSink;
        let mut d = Dispatcher::new("syntax = \"proto3\";\nmessage M {}\n", &mut sink);
        assert_eq!(d.state(), State::AwaitingSyntax);
        assert_eq!(d.step().unwrap(), State::Ready);
        assert_eq!(d.step().unwrap(), State::Ready);
        assert_eq!(d.step().unwrap(), State::Done);
        assert_eq!(d.step().unwrap(), State::Done);
    }

    #[test]
    fn test_failed_is_terminal() {
        let mut sink = NullSink;
        let mut d = Dispatcher::new("message M {}", &mut sink);
        assert!(matches!(d.step(), Err(ParseError::Ordering { .. })));
        assert_eq!(d.state(), State::Failed);
        assert_eq!(d.step().unwrap(), State::Failed);
    }

    #[test]
    fn test_empty_input_is_eof() {
        let mut sink = NullSink;
        let err = Dispatcher::new("  // nothing\n", &mut sink).run().unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_malformed_syntax_declaration() {
        for input in [
            "syntax \"proto3\";",
            "syntax = proto3;",
            "syntax = \"proto3\"",
            "syntax = \"proto3\" message",
        ] {
            let mut sink = NullSink;
            assert!(
                Dispatcher::new(input, &mut sink).run().is_err(),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn test_comments_traced_at_block_depth() {
        let mut sink = RecordingSink::new();
        Dispatcher::new(
            "// header\nsyntax = \"proto3\";\nmessage M {\n // inside\n int32 x = 1;\n}\n",
            &mut sink,
        )
        .run()
        .unwrap();
        let traces: Vec<(usize, &str)> = sink
            .records
            .iter()
            .filter(|r| r.level == Level::Trace)
            .map(|r| (r.depth, r.message.as_str()))
            .collect();
        assert_eq!(traces, vec![(0, "Got comment"), (1, "Got comment")]);
    }
}
