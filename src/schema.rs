//! In-memory description of a parsed schema file.
//!
//! Entities own their children: a [`SchemaFile`] owns its messages, and a
//! [`Message`] owns its fields, enums and oneofs in declaration order.

use std::fmt;

use crate::error::ParseError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Schema syntax version. Only proto3 is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Syntax {
    #[cfg_attr(feature = "serde", serde(rename = "proto3"))]
    Proto3,
}

impl Syntax {
    pub fn as_str(&self) -> &'static str {
        match self {
            Syntax::Proto3 => "proto3",
        }
    }
}

/// The parse result for one input.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SchemaFile {
    /// Set by the leading `syntax` declaration.
    pub syntax: Option<Syntax>,
    /// Top-level messages in source order.
    pub messages: Vec<Message>,
}

impl SchemaFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the syntax declaration. May only happen once, and only for `proto3`.
    pub fn set_syntax(&mut self, value: &str) -> Result<(), ParseError> {
        if self.syntax.is_some() {
            return Err(ParseError::syntax("duplicate syntax declaration"));
        }
        if value != Syntax::Proto3.as_str() {
            return Err(ParseError::unsupported(format!(
                "syntax \"{}\" (expected \"proto3\")",
                value
            )));
        }
        self.syntax = Some(Syntax::Proto3);
        Ok(())
    }

    /// Append a top-level message. The syntax declaration must come first.
    pub fn push_message(&mut self, message: Message) -> Result<(), ParseError> {
        if self.syntax.is_none() {
            return Err(ParseError::Ordering {
                keyword: "message".into(),
            });
        }
        self.messages.push(message);
        Ok(())
    }

    /// Look up a top-level message by name.
    pub fn get_message(&self, name: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.name == name)
    }
}

/// A named aggregate of fields, nested enums and oneofs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Message {
    pub name: String,
    /// Members in declaration order, independent of field numbers.
    pub members: Vec<Member>,
}

/// One entry in a message body.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Member {
    Field(Field),
    Enum(Enum),
    Oneof(Oneof),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Field(f) => &f.name,
            Member::Enum(e) => &e.name,
            Member::Oneof(o) => &o.name,
        }
    }
}

impl Message {
    pub fn new(name: impl Into<String>) -> Self {
        Message {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Fields declared directly in the message body (not inside oneofs).
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.members.iter().filter_map(|m| match m {
            Member::Field(f) => Some(f),
            _ => None,
        })
    }

    pub fn enums(&self) -> impl Iterator<Item = &Enum> {
        self.members.iter().filter_map(|m| match m {
            Member::Enum(e) => Some(e),
            _ => None,
        })
    }

    pub fn oneofs(&self) -> impl Iterator<Item = &Oneof> {
        self.members.iter().filter_map(|m| match m {
            Member::Oneof(o) => Some(o),
            _ => None,
        })
    }

    /// Every field of the message, including the members of its oneofs.
    pub fn all_fields(&self) -> impl Iterator<Item = &Field> {
        self.members.iter().flat_map(|m| match m {
            Member::Field(f) => std::slice::from_ref(f).iter(),
            Member::Oneof(o) => o.fields.iter(),
            Member::Enum(_) => (&[] as &[Field]).iter(),
        })
    }

    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.all_fields().find(|f| f.name == name)
    }
}

/// A field declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Field {
    pub name: String,
    /// Type reference as written; not resolved against other declarations.
    pub type_name: String,
    /// Field number. Range and uniqueness are not checked by the parser.
    pub number: i64,
    pub repeated: bool,
}

/// A named set of integer constants.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Enum {
    pub name: String,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

/// A set of fields of which at most one is set at a time.
///
/// Members are never repeated; the parser rejects `repeated`, `enum` and
/// nested `oneof` inside a oneof body.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Oneof {
    pub name: String,
    pub fields: Vec<Field>,
}

// Canonical proto3 text rendering. The output is accepted by the parser.

const INDENT: &str = "    ";

fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

impl Field {
    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write_indent(f, depth)?;
        if self.repeated {
            f.write_str("repeated ")?;
        }
        writeln!(f, "{} {} = {};", self.type_name, self.name, self.number)
    }
}

impl Enum {
    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write_indent(f, depth)?;
        writeln!(f, "enum {} {{", self.name)?;
        for v in &self.values {
            write_indent(f, depth + 1)?;
            writeln!(f, "{} = {};", v.name, v.value)?;
        }
        write_indent(f, depth)?;
        writeln!(f, "}}")
    }
}

impl Oneof {
    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write_indent(f, depth)?;
        writeln!(f, "oneof {} {{", self.name)?;
        for field in &self.fields {
            field.render(f, depth + 1)?;
        }
        write_indent(f, depth)?;
        writeln!(f, "}}")
    }
}

impl Message {
    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write_indent(f, depth)?;
        writeln!(f, "message {} {{", self.name)?;
        for member in &self.members {
            match member {
                Member::Field(field) => field.render(f, depth + 1)?,
                Member::Enum(e) => e.render(f, depth + 1)?,
                Member::Oneof(o) => o.render(f, depth + 1)?,
            }
        }
        write_indent(f, depth)?;
        writeln!(f, "}}")
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

impl fmt::Display for Enum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

impl fmt::Display for Oneof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

impl fmt::Display for SchemaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(syntax) = self.syntax {
            writeln!(f, "syntax = \"{}\";", syntax.as_str())?;
        }
        for message in &self.messages {
            writeln!(f)?;
            message.render(f, 0)?;
        }
        Ok(())
    }
}
