/// Errors from the schema text parser.
///
/// Every variant is fatal to the parse that produced it; no partial schema is
/// returned alongside an error.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of file while reading {expected}")]
    UnexpectedEof { expected: String },

    #[error("syntax error: {message}")]
    Syntax { message: String },

    #[error("found \"{keyword}\" before syntax = \"proto3\" (proto2 syntax not supported)")]
    Ordering { keyword: String },

    #[error("{feature} not supported")]
    UnsupportedFeature { feature: String },

    #[error("unrecognized keyword \"{0}\"")]
    UnknownKeyword(String),

    #[error("{construct} not allowed inside oneof '{oneof}'")]
    StructuralViolation { oneof: String, construct: String },
}

/// Category of a [`ParseError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    UnexpectedEof,
    Syntax,
    Ordering,
    UnsupportedFeature,
    UnknownKeyword,
    StructuralViolation,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Io(_) => ErrorKind::Io,
            ParseError::UnexpectedEof { .. } => ErrorKind::UnexpectedEof,
            ParseError::Syntax { .. } => ErrorKind::Syntax,
            ParseError::Ordering { .. } => ErrorKind::Ordering,
            ParseError::UnsupportedFeature { .. } => ErrorKind::UnsupportedFeature,
            ParseError::UnknownKeyword(_) => ErrorKind::UnknownKeyword,
            ParseError::StructuralViolation { .. } => ErrorKind::StructuralViolation,
        }
    }

    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        ParseError::Syntax {
            message: message.into(),
        }
    }

    pub(crate) fn eof(expected: impl Into<String>) -> Self {
        ParseError::UnexpectedEof {
            expected: expected.into(),
        }
    }

    pub(crate) fn unsupported(feature: impl Into<String>) -> Self {
        ParseError::UnsupportedFeature {
            feature: feature.into(),
        }
    }
}

/// Errors from the optional validation pass over a parsed schema.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("redefined message '{name}'")]
    DuplicateMessage { name: String },

    #[error("duplicate member '{name}' in message '{message}'")]
    DuplicateMember { message: String, name: String },

    #[error("duplicate field number {number} in message '{message}'")]
    DuplicateFieldNumber { message: String, number: i64 },

    #[error("field '{field}' in message '{message}' has invalid number {number}")]
    InvalidFieldNumber {
        message: String,
        field: String,
        number: i64,
    },

    #[error("duplicate value '{name}' in enum '{enum_name}'")]
    DuplicateEnumValue { enum_name: String, name: String },

    #[error("first value of enum '{enum_name}' must be zero")]
    FirstEnumValueNotZero { enum_name: String },
}

/// Top-level error type that wraps all sub-errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type alias for protohdl operations.
pub type Result<T> = std::result::Result<T, Error>;
