//! Protohdl: a parser for a restricted subset of the proto3 schema language.
//!
//! The parser turns schema text into an owned [`SchemaFile`] tree of
//! messages, fields, nested enums and oneofs, ready for a code generator.
//! It accepts `syntax = "proto3";` followed by `message` blocks; imports,
//! packages, options, services and top-level enums are rejected.
//!
//! # Quick Start
//!
//! ```rust
//! use protohdl::parser;
//! use protohdl::schema::Member;
//!
//! let schema = parser::parse(r#"
//!     syntax = "proto3";
//!
//!     message Person {
//!         string name = 1;
//!         repeated string email = 2;
//!         enum Kind { HUMAN = 0; ROBOT = 1; }
//!     }
//! "#).unwrap();
//!
//! let person = schema.get_message("Person").unwrap();
//! assert_eq!(person.fields().count(), 2);
//! assert!(matches!(&person.members[2], Member::Enum(e) if e.values.len() == 2));
//! ```

pub mod diagnostics;
pub mod error;
pub mod parser;
pub mod schema;
pub mod validate;

pub use diagnostics::{DiagnosticSink, Diagnostics, Level, LogSink, NullSink, RecordingSink};
pub use error::{Error, ErrorKind, ParseError, Result, ValidationError};
pub use schema::{Enum, EnumValue, Field, Member, Message, Oneof, SchemaFile, Syntax};

/// Parse schema text and run the validation pass over the result.
pub fn parse_and_validate(schema_text: &str) -> Result<SchemaFile> {
    let schema = parser::parse(schema_text)?;
    validate::validate(&schema)?;
    Ok(schema)
}
