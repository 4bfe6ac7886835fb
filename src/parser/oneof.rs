use crate::diagnostics::Diagnostics;
use crate::error::ParseError;
use crate::schema::Oneof;

use super::message::{checked_type_name, parse_field};
use super::scanner::Scanner;

/// Parse a oneof body. The `oneof` keyword has already been consumed.
///
/// Members are plain fields only: `repeated`, `enum` and nested `oneof`
/// are structural violations.
pub fn parse_oneof(
    scanner: &mut Scanner<'_>,
    diag: &mut Diagnostics<'_>,
) -> Result<Oneof, ParseError> {
    let name = scanner.read_ident("oneof name")?;
    scanner.expect_char('{', &format!("after oneof name \"{}\"", name))?;

    diag.debug(format_args!("Processing oneof \"{}\"", name));
    let mut diag = diag.nested();
    let mut fields = Vec::new();

    loop {
        if scanner.skip_comments()? > 0 {
            diag.trace(format_args!("Got comment"));
        }
        match scanner.peek_char() {
            None => return Err(ParseError::eof(format!("body of oneof \"{}\"", name))),
            Some('}') => {
                scanner.eat_char('}');
                return Ok(Oneof { name, fields });
            }
            Some(';') => {
                scanner.eat_char(';');
                continue;
            }
            Some(_) => {}
        }

        let token = scanner.read_word(&format!("member of oneof \"{}\"", name))?;
        if matches!(token.as_str(), "repeated" | "enum" | "oneof") {
            return Err(ParseError::StructuralViolation {
                oneof: name,
                construct: token,
            });
        }
        let type_name = checked_type_name(token, &name)?;
        fields.push(parse_field(scanner, &mut diag, &name, type_name, false)?);
    }
}
