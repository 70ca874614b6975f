//! Contains the primary `ParseError` type for the library.
//!
//! Both layers share one error type under a uniform fatal-error
//! policy: any malformed lexeme or any token violating the current
//! grammar state aborts the operation immediately, and the failed
//! operation leaves no usable output behind. Each variant names the
//! violated expectation and, where a source position exists, carries
//! the 1-indexed line and column.

use thiserror::Error;

/// The primary error type for all tokenizing and parsing operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A `t`/`f` was seen but the following characters did not spell
    /// out the expected literal, or the input ended mid-literal.
    #[error("malformed literal at line {line}, column {column}: expected `{expected}`")]
    MalformedLiteral {
        expected: &'static str,
        line: usize,
        column: usize,
    },

    /// A character that is neither a digit, a decimal point, nor a
    /// valid number terminator appeared inside a number.
    #[error("malformed number at line {line}, column {column}: unexpected character `{found}`")]
    MalformedNumber {
        found: char,
        line: usize,
        column: usize,
    },

    /// A number already containing a decimal point met a second one.
    #[error("malformed number at line {line}, column {column}: second decimal point")]
    SecondDecimalPoint { line: usize, column: usize },

    /// The input ended before the closing `"` of a string.
    #[error("unterminated string literal starting at line {line}, column {column}")]
    UnterminatedString { line: usize, column: usize },

    /// A number lexeme did not fit the target payload type.
    #[error("number `{lexeme}` at line {line}, column {column} is out of range")]
    NumberOutOfRange {
        lexeme: String,
        line: usize,
        column: usize,
    },

    /// The first token of the document was not `{`. Top-level values
    /// other than an object are not accepted.
    #[error("document must start with an object, found `{found}` at line {line}, column {column}")]
    MustStartWithObject {
        found: String,
        line: usize,
        column: usize,
    },

    /// A token outside the expected set for the current grammar state.
    #[error("expected {expected} at line {line}, column {column}, found `{found}`")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        line: usize,
        column: usize,
    },

    /// The token sequence ended while a container was still open or
    /// before the document produced any value at all.
    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEndOfInput { expected: &'static str },

    /// A token followed the top-level object's closing `}` while
    /// strict trailing-token checking was enabled.
    #[error("unexpected token after top-level object at line {line}, column {column}")]
    TrailingToken { line: usize, column: usize },

    /// Container nesting exceeded the configured limit.
    #[error("nesting depth limit of {limit} exceeded at line {line}, column {column}")]
    DepthLimitExceeded {
        limit: usize,
        line: usize,
        column: usize,
    },

    /// The balance pre-pass met a closing delimiter with no matching
    /// opener on the stack.
    #[error("unmatched closing delimiter `{found}` at line {line}, column {column}")]
    UnmatchedCloseDelimiter {
        found: String,
        line: usize,
        column: usize,
    },

    /// The balance pre-pass reached the end of the token sequence
    /// with an opening delimiter still unclosed.
    #[error("unclosed delimiter `{found}` opened at line {line}, column {column}")]
    UnclosedOpenDelimiter {
        found: String,
        line: usize,
        column: usize,
    },

    /// `parse()` was called before `tokenize()` completed.
    #[error("no token sequence available: call tokenize() before parse()")]
    TokensMissing,

    /// The input text exceeds the size cap of the convenience entry
    /// point.
    #[error("input exceeds maximum size of {limit} bytes")]
    InputTooLarge { limit: usize },
}
