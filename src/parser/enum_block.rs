use crate::diagnostics::Diagnostics;
use crate::error::ParseError;
use crate::schema::{Enum, EnumValue};

use super::scanner::Scanner;

/// Parse an enum body. The `enum` keyword has already been consumed.
///
/// Duplicate names and values are accepted here; see `validate`.
pub fn parse_enum(
    scanner: &mut Scanner<'_>,
    diag: &mut Diagnostics<'_>,
) -> Result<Enum, ParseError> {
    let name = scanner.read_ident("enum name")?;
    scanner.expect_char('{', &format!("after enum name \"{}\"", name))?;

    diag.debug(format_args!("Processing enum \"{}\"", name));
    let mut diag = diag.nested();
    let mut values = Vec::new();

    loop {
        if scanner.skip_comments()? > 0 {
            diag.trace(format_args!("Got comment"));
        }
        match scanner.peek_char() {
            None => return Err(ParseError::eof(format!("body of enum \"{}\"", name))),
            Some('}') => {
                scanner.eat_char('}');
                return Ok(Enum { name, values });
            }
            Some(';') => {
                scanner.eat_char(';');
                continue;
            }
            Some(_) => {}
        }

        let value_name = scanner.read_ident(&format!("value name in enum \"{}\"", name))?;
        scanner.expect_char('=', &format!("after enum value \"{}\"", value_name))?;
        let value = scanner.read_int(&format!("integer value for \"{}\"", value_name))?;
        scanner.expect_char(';', &format!("after enum value \"{}\"", value_name))?;

        diag.debug(format_args!("Value {} = {}", value_name, value));
        values.push(EnumValue {
            name: value_name,
            value,
        });
    }
}
