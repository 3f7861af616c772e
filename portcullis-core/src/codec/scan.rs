//! Character-level scanner for the pair section of the wire format.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::FormatError;

/// One `name='value'` pair as scanned, value unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScannedPair<'a> {
    pub name: &'a str,
    pub value: String,
}

/// Scanner over the text after the kind header.
///
/// `base` is the byte offset of that text within the full input, so
/// reported error offsets point into the original string.
pub(crate) struct PairScanner<'a> {
    input: &'a str,
    base: usize,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> PairScanner<'a> {
    pub(crate) fn new(input: &'a str, base: usize) -> Self {
        Self {
            input,
            base,
            chars: input.char_indices().peekable(),
        }
    }

    /// Scan every pair. An empty input yields no pairs; field presence is
    /// the caller's concern.
    pub(crate) fn scan_all(mut self) -> Result<Vec<ScannedPair<'a>>, FormatError> {
        let mut pairs = Vec::new();
        if self.input.is_empty() {
            return Ok(pairs);
        }
        loop {
            pairs.push(self.scan_pair()?);
            if self.chars.peek().is_none() {
                return Ok(pairs);
            }
            self.expect_separator()?;
        }
    }

    fn scan_pair(&mut self) -> Result<ScannedPair<'a>, FormatError> {
        let name = self.scan_name()?;
        self.expect_char('=', "`=` after field name")?;
        self.expect_char('\'', "opening quote")?;
        let value = self.scan_value()?;
        Ok(ScannedPair { name, value })
    }

    fn scan_name(&mut self) -> Result<&'a str, FormatError> {
        let start = self.pos();
        while self.chars.peek().is_some_and(|(_, c)| is_name_char(*c)) {
            self.chars.next();
        }
        let end = self.pos();
        if start == end {
            return Err(FormatError::Malformed {
                offset: self.base + start,
                expected: "field name",
            });
        }
        Ok(&self.input[start..end])
    }

    /// Consume a quoted value up to the closing quote, resolving escapes.
    /// Only `\\` and `\'` are valid; anything else after a backslash is an
    /// error, which keeps encode the unique spelling of every token.
    fn scan_value(&mut self) -> Result<String, FormatError> {
        let mut value = String::new();
        loop {
            match self.chars.next() {
                None => {
                    return Err(FormatError::Malformed {
                        offset: self.base + self.input.len(),
                        expected: "closing quote",
                    })
                }
                Some((_, '\'')) => return Ok(value),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, c @ ('\\' | '\''))) => value.push(c),
                    Some((i, _)) => {
                        return Err(FormatError::Malformed {
                            offset: self.base + i,
                            expected: "escape `\\\\` or `\\'`",
                        })
                    }
                    None => {
                        return Err(FormatError::Malformed {
                            offset: self.base + self.input.len(),
                            expected: "escape `\\\\` or `\\'`",
                        })
                    }
                },
                Some((_, c)) => value.push(c),
            }
        }
    }

    /// After a complete pair anything but `", "` is trailing garbage.
    fn expect_separator(&mut self) -> Result<(), FormatError> {
        let at = self.pos();
        let comma = self.chars.next();
        let space = self.chars.next();
        match (comma, space) {
            (Some((_, ',')), Some((_, ' '))) => Ok(()),
            _ => Err(FormatError::TrailingData {
                offset: self.base + at,
            }),
        }
    }

    fn expect_char(&mut self, want: char, expected: &'static str) -> Result<(), FormatError> {
        match self.chars.next() {
            Some((_, c)) if c == want => Ok(()),
            Some((i, _)) => Err(FormatError::Malformed {
                offset: self.base + i,
                expected,
            }),
            None => Err(FormatError::Malformed {
                offset: self.base + self.input.len(),
                expected,
            }),
        }
    }

    fn pos(&mut self) -> usize {
        self.chars
            .peek()
            .map_or(self.input.len(), |(i, _)| *i)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

// ============================================================================
// TESTS
// ============================================================================
