//! Defines the `Token` and `TokenKind` types.
//!
//! These are the intermediate representation between the `Tokenizer`
//! and the tree-building parser: a flat, ordered sequence of lexemes
//! paired with their syntactic kind.

/// The syntactic kind of a `Token`.
///
/// These are the smallest meaningful units of the supported JSON
/// dialect. Integers and floats are distinct kinds: the tokenizer
/// decides between them while scanning (a decimal point permanently
/// retags the pending number as `Float`).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// A string, e.g. `"hello"` (the lexeme holds the content without quotes)
    String,
    /// A whole number, e.g. `123`
    Integer,
    /// A number containing a decimal point, e.g. `45.6`
    Float,
    /// The literal `true` or `false`
    Boolean,
}

/// A single token produced by the `Tokenizer`.
///
/// Tokens are immutable once produced and are consumed by the parser
/// in the same left-to-right order they were emitted. The line and
/// column (both 1-indexed) point at the first character of the lexeme
/// and feed error reporting.
#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    /// The raw text of the token. For `String` tokens this is the
    /// content between the quotes; for `Boolean` tokens it is the
    /// literal text (`true` or `false`).
    pub lexeme: String,
    /// The syntactic kind of the token.
    pub kind: TokenKind,
    /// The 1-indexed line where the token starts.
    pub line: usize,
    /// The 1-indexed column where the token starts.
    pub column: usize,
}

impl Token {
    pub(crate) fn new(
        lexeme: impl Into<String>,
        kind: TokenKind,
        line: usize,
        column: usize,
    ) -> Self {
        Token {
            lexeme: lexeme.into(),
            kind,
            line,
            column,
        }
    }
}
