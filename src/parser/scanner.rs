use crate::error::ParseError;

/// Characters that end a bare word. Each is also a token on its own.
const DELIMITERS: &[u8] = b"{}=;\"/";

/// Character-level reader over schema text.
///
/// Grammar code never touches the read position directly: it peeks one
/// character, or consumes words, quoted strings and integers.
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Scanner { input, pos: 0 }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.peek_byte()?;
        self.pos += 1;
        Some(b)
    }

    /// Consume zero or more whitespace characters.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek_byte() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Skip any interleaving of whitespace and `//` line comments.
    /// Returns the number of comments skipped.
    ///
    /// A `/` that does not start `//` is a malformed comment; the scanner is
    /// left on the `/`.
    pub fn skip_comments(&mut self) -> Result<usize, ParseError> {
        let mut comments = 0;
        loop {
            self.skip_whitespace();
            if self.peek_byte() != Some(b'/') {
                return Ok(comments);
            }
            if self.input.as_bytes().get(self.pos + 1) != Some(&b'/') {
                return Err(ParseError::syntax("malformed comment"));
            }
            self.pos += 2;
            comments += 1;
            // Line comment: skip through end of line
            while let Some(b) = self.advance() {
                if b == b'\n' {
                    break;
                }
            }
        }
    }

    /// The next character, without consuming it.
    pub fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Consume the next character if it is `c`.
    pub fn eat_char(&mut self, c: char) -> bool {
        if self.peek_char() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Skip comments, then require `c`.
    pub fn expect_char(&mut self, c: char, context: &str) -> Result<(), ParseError> {
        self.skip_comments()?;
        match self.peek_char() {
            None => Err(ParseError::eof(format!("'{}' {}", c, context))),
            Some(found) if found == c => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(found) => Err(ParseError::syntax(format!(
                "expected '{}' {}, found '{}'",
                c, context, found
            ))),
        }
    }

    /// Read the next bare word.
    ///
    /// Returns `Ok(None)` on a clean end of input. A delimiter character is
    /// returned as a one-character word.
    pub fn next_word(&mut self) -> Result<Option<String>, ParseError> {
        self.skip_comments()?;
        let start = self.pos;
        match self.peek_byte() {
            None => return Ok(None),
            Some(b) if DELIMITERS.contains(&b) => {
                self.advance();
            }
            Some(_) => {
                while let Some(b) = self.peek_byte() {
                    if b.is_ascii_whitespace() || DELIMITERS.contains(&b) {
                        break;
                    }
                    self.advance();
                }
            }
        }
        Ok(Some(self.input[start..self.pos].to_string()))
    }

    /// Read a bare word that must be present.
    pub fn read_word(&mut self, what: &str) -> Result<String, ParseError> {
        self.next_word()?.ok_or_else(|| ParseError::eof(what))
    }

    /// Read a plain identifier (`[A-Za-z_][A-Za-z0-9_]*`).
    pub fn read_ident(&mut self, what: &str) -> Result<String, ParseError> {
        let word = self.read_word(what)?;
        if is_identifier(&word) {
            Ok(word)
        } else {
            Err(ParseError::syntax(format!("malformed {} \"{}\"", what, word)))
        }
    }

    /// Read a type reference: dotted identifiers with an optional leading dot.
    pub fn read_type_name(&mut self, what: &str) -> Result<String, ParseError> {
        let word = self.read_word(what)?;
        if is_type_reference(&word) {
            Ok(word)
        } else {
            Err(ParseError::syntax(format!("malformed {} \"{}\"", what, word)))
        }
    }

    /// Read a double-quoted string literal. No escapes are recognized.
    pub fn read_quoted(&mut self, what: &str) -> Result<String, ParseError> {
        self.expect_char('"', &format!("to open {}", what))?;
        let start = self.pos;
        loop {
            match self.advance() {
                None => return Err(ParseError::eof(what)),
                Some(b'"') => break,
                Some(_) => {}
            }
        }
        Ok(self.input[start..self.pos - 1].to_string())
    }

    /// Read an integer literal: decimal, `0x` hex or leading-zero octal.
    pub fn read_int(&mut self, what: &str) -> Result<i64, ParseError> {
        let word = self.read_word(what)?;
        parse_int(&word).ok_or_else(|| {
            ParseError::syntax(format!("expected {}, found \"{}\"", what, word))
        })
    }
}

/// `true` for `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `true` for `foo`, `foo.Bar` and `.foo.Bar`.
pub fn is_type_reference(s: &str) -> bool {
    let s = s.strip_prefix('.').unwrap_or(s);
    s.split('.').all(is_identifier)
}

/// Parse an integer with an optional sign, accepting C-style base prefixes.
pub fn parse_int(s: &str) -> Option<i64> {
    let (negative, unsigned) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let (digits, radix) = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        (hex, 16)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (&unsigned[1..], 8)
    } else {
        (unsigned, 10)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).ok()
}
