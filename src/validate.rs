//! Optional checks over a parsed schema.
//!
//! The parser accepts duplicate names and any field number. Callers that
//! need proto3's uniqueness and range rules run [`validate`] afterwards.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::schema::{Enum, Member, Message, SchemaFile};

/// Largest field number allowed by the wire format (2^29 - 1).
pub const MAX_FIELD_NUMBER: i64 = 536_870_911;

/// Field numbers reserved for the protobuf implementation.
pub const RESERVED_FIELD_NUMBERS: std::ops::RangeInclusive<i64> = 19_000..=19_999;

/// Check a schema, returning the first problem found.
pub fn validate(schema: &SchemaFile) -> Result<(), ValidationError> {
    let mut message_names = HashSet::new();
    for message in &schema.messages {
        if !message_names.insert(message.name.as_str()) {
            return Err(ValidationError::DuplicateMessage {
                name: message.name.clone(),
            });
        }
        validate_message(message)?;
    }
    Ok(())
}

fn validate_message(message: &Message) -> Result<(), ValidationError> {
    // Oneof members share the enclosing message's namespace.
    let mut names = HashSet::new();
    let mut check_name = |name: &str| {
        if names.insert(name.to_string()) {
            Ok(())
        } else {
            Err(ValidationError::DuplicateMember {
                message: message.name.clone(),
                name: name.to_string(),
            })
        }
    };
    for member in &message.members {
        check_name(member.name())?;
        match member {
            Member::Oneof(o) => {
                for f in &o.fields {
                    check_name(&f.name)?;
                }
            }
            Member::Enum(e) => validate_enum(e)?,
            Member::Field(_) => {}
        }
    }

    let mut numbers = HashSet::new();
    for field in message.all_fields() {
        if field.number < 1
            || field.number > MAX_FIELD_NUMBER
            || RESERVED_FIELD_NUMBERS.contains(&field.number)
        {
            return Err(ValidationError::InvalidFieldNumber {
                message: message.name.clone(),
                field: field.name.clone(),
                number: field.number,
            });
        }
        if !numbers.insert(field.number) {
            return Err(ValidationError::DuplicateFieldNumber {
                message: message.name.clone(),
                number: field.number,
            });
        }
    }
    Ok(())
}

fn validate_enum(e: &Enum) -> Result<(), ValidationError> {
    if let Some(first) = e.values.first() {
        if first.value != 0 {
            return Err(ValidationError::FirstEnumValueNotZero {
                enum_name: e.name.clone(),
            });
        }
    }
    let mut names = HashSet::new();
    for v in &e.values {
        if !names.insert(v.name.as_str()) {
            return Err(ValidationError::DuplicateEnumValue {
                enum_name: e.name.clone(),
                name: v.name.clone(),
            });
        }
    }
    Ok(())
}
