use crate::diagnostics::Diagnostics;
use crate::error::ParseError;
use crate::schema::{Field, Member, Message};

use super::enum_block::parse_enum;
use super::oneof::parse_oneof;
use super::scanner::Scanner;

/// Parse a message body. The `message` keyword has already been consumed.
pub fn parse_message(
    scanner: &mut Scanner<'_>,
    diag: &mut Diagnostics<'_>,
) -> Result<Message, ParseError> {
    let name = scanner.read_ident("message name")?;
    scanner.expect_char('{', &format!("after message name \"{}\"", name))?;

    diag.debug(format_args!("Processing message \"{}\"", name));
    let mut diag = diag.nested();
    let mut message = Message::new(name);

    loop {
        if scanner.skip_comments()? > 0 {
            diag.trace(format_args!("Got comment"));
        }
        match scanner.peek_char() {
            None => {
                return Err(ParseError::eof(format!(
                    "body of message \"{}\"",
                    message.name
                )))
            }
            Some('}') => {
                scanner.eat_char('}');
                return Ok(message);
            }
            Some(';') => {
                scanner.eat_char(';');
                continue;
            }
            Some(_) => {}
        }

        let token = scanner.read_word(&format!("member of message \"{}\"", message.name))?;
        let member = match token.as_str() {
            "enum" => Member::Enum(parse_enum(scanner, &mut diag)?),
            "oneof" => Member::Oneof(parse_oneof(scanner, &mut diag)?),
            "message" => return Err(ParseError::unsupported("nested message")),
            "repeated" => {
                let type_name = scanner.read_type_name(&format!(
                    "repeated field type in message \"{}\"",
                    message.name
                ))?;
                Member::Field(parse_field(scanner, &mut diag, &message.name, type_name, true)?)
            }
            _ => {
                let type_name = checked_type_name(token, &message.name)?;
                Member::Field(parse_field(scanner, &mut diag, &message.name, type_name, false)?)
            }
        };
        message.members.push(member);
    }
}

/// Validate a word already read as a prospective field type.
pub(super) fn checked_type_name(token: String, owner: &str) -> Result<String, ParseError> {
    if super::scanner::is_type_reference(&token) {
        Ok(token)
    } else {
        Err(ParseError::syntax(format!(
            "malformed field type \"{}\" in \"{}\"",
            token, owner
        )))
    }
}

/// Parse the rest of a field after its type: `name = number ;`.
pub(super) fn parse_field(
    scanner: &mut Scanner<'_>,
    diag: &mut Diagnostics<'_>,
    owner: &str,
    type_name: String,
    repeated: bool,
) -> Result<Field, ParseError> {
    let name = scanner.read_ident(&format!(
        "field name (type={}) in \"{}\"",
        type_name, owner
    ))?;

    // '='
    scanner.expect_char(
        '=',
        &format!("after field name \"{}\" in \"{}\"", name, owner),
    )?;

    // field number
    let number = scanner.read_int(&format!(
        "field ID (type={}, name={})",
        type_name, name
    ))?;

    // ';'
    scanner.expect_char(';', &format!("after field \"{}\" in \"{}\"", name, owner))?;

    diag.debug(format_args!(
        "Field {} is of type {}{} (id = {})",
        name,
        if repeated { "repeated " } else { "" },
        type_name,
        number
    ));

    Ok(Field {
        name,
        type_name,
        number,
        repeated,
    })
}
