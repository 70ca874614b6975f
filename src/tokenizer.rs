//! The internal, byte-based tokenizer.
//!
//! A single left-to-right scan over the input text, producing the
//! flat ordered token sequence the parser consumes. The scan is a
//! small state machine: an idle state that dispatches on the current
//! byte, a number accumulator, a string accumulator, and exact-match
//! handling for the `true`/`false` literals. The tokenizer is a pure
//! function of the input text and holds no external state.
//!
//! Dialect limits, stated rather than silently mis-tokenized: no
//! escape sequences, no Unicode escapes, no exponent notation, no
//! `null` literal, and no leading minus on numbers.

use crate::error::ParseError;
use crate::token::{Token, TokenKind};
use memchr::memchr;

// --- Byte classes ---
// A 256-entry table classifying the bytes the idle state dispatches
// on with a single lookup.
pub(crate) const W: u8 = 1; // whitespace
pub(crate) const S: u8 = 2; // structural
pub(crate) const D: u8 = 3; // digit

static BYTE_CLASS: [u8; 256] = {
    let mut table = [0u8; 256];
    // Whitespace is space, tab, and newline only; `\r` is not part
    // of the dialect and falls through to the discard path.
    table[b' ' as usize] = W;
    table[b'\t' as usize] = W;
    table[b'\n' as usize] = W;

    table[b'{' as usize] = S;
    table[b'}' as usize] = S;
    table[b'[' as usize] = S;
    table[b']' as usize] = S;
    table[b':' as usize] = S;
    table[b',' as usize] = S;

    table[b'0' as usize] = D;
    table[b'1' as usize] = D;
    table[b'2' as usize] = D;
    table[b'3' as usize] = D;
    table[b'4' as usize] = D;
    table[b'5' as usize] = D;
    table[b'6' as usize] = D;
    table[b'7' as usize] = D;
    table[b'8' as usize] = D;
    table[b'9' as usize] = D;

    table
};

/// Whitespace, `,`, `}` and `]` end a pending number; the terminator
/// itself is reprocessed by the idle state.
fn ends_number(byte: u8) -> bool {
    BYTE_CLASS[byte as usize] == W || matches!(byte, b',' | b'}' | b']')
}

/// Tokenizes the complete input text into an ordered token sequence.
///
/// Fails on the first malformed lexeme: a bad `true`/`false` literal,
/// a bad character inside a number, a second decimal point, or a
/// string left open at end-of-input.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    Tokenizer::new(input).run()
}

/// The scanning state: a cursor over the input bytes plus the
/// 1-indexed line/column of that cursor for error reporting.
struct Tokenizer<'a> {
    text: &'a str,
    bytes: &'a [u8],
    cursor: usize,
    line: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Tokenizer {
            text: input,
            bytes: input.as_bytes(),
            cursor: 0,
            line: 1,
            column: 1,
        }
    }

    /// Advances the cursor by one byte, updating line/column.
    /// Callers guarantee the cursor is in bounds.
    fn advance(&mut self) {
        if self.bytes[self.cursor] == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.cursor += 1;
    }

    /// The idle-state dispatch loop.
    fn run(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        while let Some(&byte) = self.bytes.get(self.cursor) {
            match BYTE_CLASS[byte as usize] {
                W => self.advance(),
                S => {
                    let (line, column) = (self.line, self.column);
                    self.advance();
                    tokens.push(Token::new(
                        (byte as char).to_string(),
                        structural_kind(byte),
                        line,
                        column,
                    ));
                }
                D => tokens.push(self.scan_number()?),
                _ => match byte {
                    b'"' => tokens.push(self.scan_string()?),
                    b't' => tokens.push(self.scan_literal("true")?),
                    b'f' => tokens.push(self.scan_literal("false")?),
                    // Any other byte begins no lexeme and is
                    // discarded; the idle state is lenient outside
                    // of lexemes.
                    _ => self.advance(),
                },
            }
        }
        Ok(tokens)
    }

    /// Scans a number starting at the current digit.
    ///
    /// The pending kind starts as `Integer` and is permanently
    /// retagged `Float` by the first `.`; a second `.` is an error.
    /// A number pending at end-of-input is flushed like any other.
    fn scan_number(&mut self) -> Result<Token, ParseError> {
        let start = self.cursor;
        let (line, column) = (self.line, self.column);
        let mut kind = TokenKind::Integer;

        while let Some(&byte) = self.bytes.get(self.cursor) {
            match byte {
                b'0'..=b'9' => self.advance(),
                b'.' => {
                    if kind == TokenKind::Float {
                        return Err(ParseError::SecondDecimalPoint {
                            line: self.line,
                            column: self.column,
                        });
                    }
                    kind = TokenKind::Float;
                    self.advance();
                }
                b if ends_number(b) => break,
                b => {
                    return Err(ParseError::MalformedNumber {
                        found: b as char,
                        line: self.line,
                        column: self.column,
                    });
                }
            }
        }

        Ok(Token::new(&self.text[start..self.cursor], kind, line, column))
    }

    /// Scans a string starting at the opening `"`.
    ///
    /// Every byte up to the next `"` is content (there are no escape
    /// sequences in the dialect, so the first `"` always terminates),
    /// which also means the content may span newlines. The empty
    /// string is valid.
    fn scan_string(&mut self) -> Result<Token, ParseError> {
        let (line, column) = (self.line, self.column);
        self.advance(); // opening quote
        let start = self.cursor;

        let len = match memchr(b'"', &self.bytes[start..]) {
            Some(len) => len,
            None => return Err(ParseError::UnterminatedString { line, column }),
        };

        // Walk the content byte-by-byte to keep the line counter
        // honest across embedded newlines.
        for _ in 0..len {
            self.advance();
        }
        let lexeme = &self.text[start..start + len];
        self.advance(); // closing quote

        Ok(Token::new(lexeme, TokenKind::String, line, column))
    }

    /// Scans a `true`/`false` literal starting at its first letter.
    /// Every character must match exactly; a mismatch or end-of-input
    /// mid-literal is fatal.
    fn scan_literal(&mut self, expected: &'static str) -> Result<Token, ParseError> {
        let (line, column) = (self.line, self.column);
        let end = self.cursor + expected.len();

        match self.bytes.get(self.cursor..end) {
            Some(slice) if slice == expected.as_bytes() => {
                for _ in 0..expected.len() {
                    self.advance();
                }
                Ok(Token::new(expected, TokenKind::Boolean, line, column))
            }
            _ => Err(ParseError::MalformedLiteral {
                expected,
                line,
                column,
            }),
        }
    }
}

fn structural_kind(byte: u8) -> TokenKind {
    match byte {
        b'{' => TokenKind::LeftBrace,
        b'}' => TokenKind::RightBrace,
        b'[' => TokenKind::LeftBracket,
        b']' => TokenKind::RightBracket,
        b':' => TokenKind::Colon,
        b',' => TokenKind::Comma,
        _ => unreachable!(), // byte class guarantees this
    }
}
