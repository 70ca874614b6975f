//! The tree-building parser and its state machine.
//!
//! Consumes the token sequence produced by the tokenizer and builds
//! the node arena of a `Document`. The machine is an explicit
//! state-stack automaton over this grammar:
//!
//! ```text
//! document := object
//! object   := '{' ( member (',' member)* )? '}'
//! member   := STRING ':' value
//! array    := '[' ( value (',' value)* )? ']'
//! value    := object | array | STRING | INTEGER | FLOAT | BOOLEAN
//! ```
//!
//! Two parallel state ladders track context: one for objects
//! (first-member-or-close, name, colon, value, comma-or-close) and
//! one for arrays (first-element-or-close, element, comma-or-close).
//! The state stack records ladder nesting; a parallel container
//! stack records, for each open container, the arena id being filled
//! and the insertion cursor within its sibling chain.

use crate::error::ParseError;
use crate::node::{Node, NodeId, NodeValue};
use crate::token::{Token, TokenKind};

/// Strictness and resource knobs for `parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// When set, any token after the top-level object's closing `}`
    /// is an error. Off by default: trailing input is silently
    /// ignored, the documented historical behavior of the dialect.
    pub reject_trailing: bool,
    /// When set, a stack-based delimiter balance check runs over the
    /// whole token sequence before the parse proper.
    pub balance_precheck: bool,
    /// Maximum number of simultaneously open containers, document
    /// root included. Bounds arena and stack growth on adversarial
    /// input.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            reject_trailing: false,
            balance_precheck: false,
            max_depth: crate::DEFAULT_MAX_DEPTH,
        }
    }
}

/// What the parser expects to see next. The object ladder and the
/// array ladder never mix: entering a nested container pushes that
/// container's initial state, closing it pops back to the parent's
/// ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the first token; only `{` is acceptable.
    ExpectDocumentStart,
    /// After `{`: a member name or an immediate `}`.
    ExpectFirstMemberOrClose,
    /// After `,` in an object: a member name (no `}` here).
    ExpectMemberName,
    /// After a member name: `:`.
    ExpectColon,
    /// After `:`: the member's value.
    ExpectMemberValue,
    /// After a member's value: `,` or `}`.
    ExpectMemberCommaOrClose,
    /// After `[`: an element or an immediate `]`.
    ExpectFirstElementOrClose,
    /// After `,` in an array: an element (no `]` here).
    ExpectElement,
    /// After an element: `,` or `]`.
    ExpectElementCommaOrClose,
}

/// The expectation each state stands for, used verbatim in errors.
fn expectation(state: State) -> &'static str {
    match state {
        State::ExpectDocumentStart => "`{` at document start",
        State::ExpectFirstMemberOrClose => "an object member name or `}`",
        State::ExpectMemberName => "an object member name",
        State::ExpectColon => "`:` after object member name",
        State::ExpectMemberValue => "a value for the object member",
        State::ExpectFirstElementOrClose => "an array element or `]`",
        State::ExpectElement => "an array element",
        State::ExpectMemberCommaOrClose => "`,` or `}`",
        State::ExpectElementCommaOrClose => "`,` or `]`",
    }
}

/// An open container on the node stack: the arena id being filled
/// and the last child appended to it (the insertion cursor).
struct OpenContainer {
    id: NodeId,
    last_child: Option<NodeId>,
}

/// Builds the node arena from a token sequence.
///
/// On success returns the arena and the root id (always index 0, the
/// top-level container). The first grammar violation is fatal; there
/// is no partial-tree recovery and no multi-error accumulation.
pub(crate) fn build_tree(
    tokens: &[Token],
    options: ParseOptions,
) -> Result<(Vec<Node>, NodeId), ParseError> {
    if options.balance_precheck {
        check_balance(tokens)?;
    }

    let mut builder = TreeBuilder {
        nodes: vec![Node::root()],
        state_stack: vec![State::ExpectDocumentStart],
        containers: Vec::new(),
        pending_name: None,
        options,
    };

    for token in tokens {
        let state = match builder.state_stack.last() {
            Some(&state) => state,
            // The top-level object has closed; everything after it
            // is trailing input.
            None => {
                if options.reject_trailing {
                    return Err(ParseError::TrailingToken {
                        line: token.line,
                        column: token.column,
                    });
                }
                break;
            }
        };
        builder.step(state, token)?;
    }

    if let Some(&state) = builder.state_stack.last() {
        return Err(ParseError::UnexpectedEndOfInput {
            expected: expectation(state),
        });
    }

    Ok((builder.nodes, NodeId(0)))
}

struct TreeBuilder {
    nodes: Vec<Node>,
    state_stack: Vec<State>,
    containers: Vec<OpenContainer>,
    /// Single-slot holding area for a member name between the name
    /// token and the value that claims it.
    pending_name: Option<String>,
    options: ParseOptions,
}

impl TreeBuilder {
    /// Advances the machine by one token.
    fn step(&mut self, state: State, token: &Token) -> Result<(), ParseError> {
        match state {
            State::ExpectDocumentStart => match token.kind {
                TokenKind::LeftBrace => {
                    // The root container IS the top-level object; its
                    // members hang directly off the root node.
                    self.containers.push(OpenContainer {
                        id: NodeId(0),
                        last_child: None,
                    });
                    self.replace_state(State::ExpectFirstMemberOrClose);
                }
                _ => {
                    return Err(ParseError::MustStartWithObject {
                        found: token.lexeme.clone(),
                        line: token.line,
                        column: token.column,
                    });
                }
            },

            State::ExpectFirstMemberOrClose => match token.kind {
                TokenKind::String => self.hold_name(token),
                TokenKind::RightBrace => self.close_container(),
                _ => return Err(self.unexpected(state, token)),
            },

            State::ExpectMemberName => match token.kind {
                TokenKind::String => self.hold_name(token),
                _ => return Err(self.unexpected(state, token)),
            },

            State::ExpectColon => match token.kind {
                TokenKind::Colon => self.replace_state(State::ExpectMemberValue),
                _ => return Err(self.unexpected(state, token)),
            },

            State::ExpectMemberValue => {
                self.begin_value(state, token, State::ExpectMemberCommaOrClose)?;
            }

            State::ExpectMemberCommaOrClose => match token.kind {
                TokenKind::Comma => self.replace_state(State::ExpectMemberName),
                TokenKind::RightBrace => self.close_container(),
                _ => return Err(self.unexpected(state, token)),
            },

            State::ExpectFirstElementOrClose => match token.kind {
                TokenKind::RightBracket => self.close_container(),
                _ => self.begin_value(state, token, State::ExpectElementCommaOrClose)?,
            },

            State::ExpectElement => {
                self.begin_value(state, token, State::ExpectElementCommaOrClose)?;
            }

            State::ExpectElementCommaOrClose => match token.kind {
                TokenKind::Comma => self.replace_state(State::ExpectElement),
                TokenKind::RightBracket => self.close_container(),
                _ => return Err(self.unexpected(state, token)),
            },
        }
        Ok(())
    }

    /// Handles a token in value position: opens a nested container
    /// or appends a scalar. `follow` is the state the current ladder
    /// resumes in once the value is complete.
    fn begin_value(&mut self, state: State, token: &Token, follow: State) -> Result<(), ParseError> {
        match token.kind {
            TokenKind::LeftBrace => {
                let name = self.pending_name.take();
                self.replace_state(follow);
                self.open_container(NodeValue::Object, name, token)?;
                self.state_stack.push(State::ExpectFirstMemberOrClose);
            }
            TokenKind::LeftBracket => {
                let name = self.pending_name.take();
                self.replace_state(follow);
                self.open_container(NodeValue::Array, name, token)?;
                self.state_stack.push(State::ExpectFirstElementOrClose);
            }
            TokenKind::String
            | TokenKind::Integer
            | TokenKind::Float
            | TokenKind::Boolean => {
                let name = self.pending_name.take();
                let value = scalar_value(token)?;
                self.append_node(Node::new(name, value));
                self.replace_state(follow);
            }
            _ => return Err(self.unexpected(state, token)),
        }
        Ok(())
    }

    /// Parks a member name in the single-slot holding area until its
    /// value arrives.
    fn hold_name(&mut self, token: &Token) {
        self.pending_name = Some(token.lexeme.clone());
        self.replace_state(State::ExpectColon);
    }

    fn replace_state(&mut self, state: State) {
        *self.state_stack.last_mut().unwrap() = state;
    }

    /// Appends a node to the current container's sibling chain and
    /// advances the insertion cursor past it.
    fn append_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        let open = self.containers.last_mut().unwrap();
        match open.last_child {
            None => self.nodes[open.id.0].first_child = Some(id),
            Some(prev) => self.nodes[prev.0].next_sibling = Some(id),
        }
        open.last_child = Some(id);
        id
    }

    /// Appends a container node and makes it the current insertion
    /// target. The caller pushes the matching ladder state.
    fn open_container(
        &mut self,
        value: NodeValue,
        name: Option<String>,
        token: &Token,
    ) -> Result<(), ParseError> {
        if self.containers.len() >= self.options.max_depth {
            return Err(ParseError::DepthLimitExceeded {
                limit: self.options.max_depth,
                line: token.line,
                column: token.column,
            });
        }
        let id = self.append_node(Node::new(name, value));
        self.containers.push(OpenContainer {
            id,
            last_child: None,
        });
        Ok(())
    }

    /// Closes the current container, resuming the parent's ladder
    /// and its insertion cursor. Closing the top-level object leaves
    /// both stacks empty, which ends the parse.
    fn close_container(&mut self) {
        self.state_stack.pop();
        self.containers.pop();
    }

    fn unexpected(&self, state: State, token: &Token) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expectation(state),
            found: token.lexeme.clone(),
            line: token.line,
            column: token.column,
        }
    }
}

/// Converts a scalar token into its node value, parsing the number
/// payloads out of the lexeme text.
fn scalar_value(token: &Token) -> Result<NodeValue, ParseError> {
    let out_of_range = || ParseError::NumberOutOfRange {
        lexeme: token.lexeme.clone(),
        line: token.line,
        column: token.column,
    };
    match token.kind {
        TokenKind::String => Ok(NodeValue::String(token.lexeme.clone())),
        TokenKind::Integer => token
            .lexeme
            .parse::<i64>()
            .map(NodeValue::Integer)
            .map_err(|_| out_of_range()),
        TokenKind::Float => token
            .lexeme
            .parse::<f64>()
            .map(NodeValue::Float)
            .map_err(|_| out_of_range()),
        TokenKind::Boolean => Ok(NodeValue::Boolean(token.lexeme == "true")),
        _ => unreachable!(), // begin_value only passes scalar kinds
    }
}

/// Stack-based delimiter balance check over a token sequence.
///
/// An optional sanity pass run ahead of the parse proper when
/// `ParseOptions::balance_precheck` is set. Unlike the parse, it
/// covers the whole sequence, trailing input included.
pub(crate) fn check_balance(tokens: &[Token]) -> Result<(), ParseError> {
    let mut open: Vec<&Token> = Vec::new();
    for token in tokens {
        match token.kind {
            TokenKind::LeftBrace | TokenKind::LeftBracket => open.push(token),
            TokenKind::RightBrace | TokenKind::RightBracket => {
                let wanted = if token.kind == TokenKind::RightBrace {
                    TokenKind::LeftBrace
                } else {
                    TokenKind::LeftBracket
                };
                match open.pop() {
                    Some(opener) if opener.kind == wanted => {}
                    _ => {
                        return Err(ParseError::UnmatchedCloseDelimiter {
                            found: token.lexeme.clone(),
                            line: token.line,
                            column: token.column,
                        });
                    }
                }
            }
            _ => {}
        }
    }
    if let Some(opener) = open.last() {
        return Err(ParseError::UnclosedOpenDelimiter {
            found: opener.lexeme.clone(),
            line: opener.line,
            column: opener.column,
        });
    }
    Ok(())
}

// --- Unit tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn build(input: &str) -> Result<(Vec<Node>, NodeId), ParseError> {
        build_tree(&tokenize(input).unwrap(), ParseOptions::default())
    }

    fn build_with(input: &str, options: ParseOptions) -> Result<(Vec<Node>, NodeId), ParseError> {
        build_tree(&tokenize(input).unwrap(), options)
    }

    #[test]
    fn test_empty_object() {
        let (nodes, root) = build("{}").unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[root.index()].value, NodeValue::Root);
        assert_eq!(nodes[root.index()].first_child, None);
    }

    #[test]
    fn test_top_level_array_is_rejected() {
        let err = build("[1,2]").unwrap_err();
        assert_eq!(
            err,
            ParseError::MustStartWithObject {
                found: "[".to_string(),
                line: 1,
                column: 1
            }
        );
    }

    #[test]
    fn test_missing_member_value() {
        let err = build(r#"{"a":}"#).unwrap_err();
        match err {
            ParseError::UnexpectedToken { expected, found, .. } => {
                assert!(expected.contains("value"));
                assert_eq!(found, "}");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_colon() {
        let err = build(r#"{"a" 1}"#).unwrap_err();
        match err {
            ParseError::UnexpectedToken { expected, .. } => {
                assert_eq!(expected, "`:` after object member name");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_comma_between_members() {
        let err = build(r#"{"a":1 "b":2}"#).unwrap_err();
        match err {
            ParseError::UnexpectedToken { expected, .. } => {
                assert_eq!(expected, "`,` or `}`");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_trailing_comma_in_object() {
        let err = build(r#"{"a":1,}"#).unwrap_err();
        match err {
            ParseError::UnexpectedToken { expected, .. } => {
                assert_eq!(expected, "an object member name");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_trailing_comma_in_array() {
        let err = build(r#"{"a":[1,]}"#).unwrap_err();
        match err {
            ParseError::UnexpectedToken { expected, .. } => {
                assert_eq!(expected, "an array element");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_document_is_an_error() {
        let err = build(r#"{"a":1"#).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedEndOfInput {
                expected: "`,` or `}`"
            }
        );

        let err = build("{").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedEndOfInput {
                expected: "an object member name or `}`"
            }
        );
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = build("").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedEndOfInput {
                expected: "`{` at document start"
            }
        );
    }

    #[test]
    fn test_trailing_tokens_ignored_by_default() {
        let (nodes, _) = build(r#"{"a":1} "garbage" 42"#).unwrap();
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_trailing_tokens_rejected_when_strict() {
        let options = ParseOptions {
            reject_trailing: true,
            ..ParseOptions::default()
        };
        let err = build_with(r#"{"a":1} 42"#, options).unwrap_err();
        assert_eq!(err, ParseError::TrailingToken { line: 1, column: 9 });
    }

    #[test]
    fn test_depth_limit() {
        let options = ParseOptions {
            max_depth: 3,
            ..ParseOptions::default()
        };
        // root + "a"-array + nested array = 3 open containers; the
        // fourth opener trips the limit.
        let err = build_with(r#"{"a":[[[1]]]}"#, options).unwrap_err();
        match err {
            ParseError::DepthLimitExceeded { limit, .. } => assert_eq!(limit, 3),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(build_with(r#"{"a":[[1]]}"#, options).is_ok());
    }

    #[test]
    fn test_balance_precheck_catches_mismatch() {
        let tokens = tokenize(r#"{"a":[1}]"#).unwrap();
        let err = check_balance(&tokens).unwrap_err();
        match err {
            ParseError::UnmatchedCloseDelimiter { found, .. } => assert_eq!(found, "}"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_balance_precheck_covers_trailing_input() {
        // The default parse stops at the top-level close and never
        // sees the stray bracket; the pre-pass does.
        let input = r#"{"a":1} ["#;
        assert!(build(input).is_ok());

        let options = ParseOptions {
            balance_precheck: true,
            ..ParseOptions::default()
        };
        let err = build_with(input, options).unwrap_err();
        match err {
            ParseError::UnclosedOpenDelimiter { found, .. } => assert_eq!(found, "["),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_integer_overflow_is_reported() {
        let err = build(r#"{"a":99999999999999999999999999}"#).unwrap_err();
        match err {
            ParseError::NumberOutOfRange { lexeme, .. } => {
                assert_eq!(lexeme, "99999999999999999999999999");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_sibling_chain_order() {
        let (nodes, root) = build(r#"{"a":1,"b":2,"c":3}"#).unwrap();
        let mut names = Vec::new();
        let mut next = nodes[root.index()].first_child;
        while let Some(id) = next {
            names.push(nodes[id.index()].name.clone().unwrap());
            next = nodes[id.index()].next_sibling;
        }
        assert_eq!(names, vec!["a", "b", "c"]);
        // The last sibling link is an explicit absence, not a
        // placeholder node.
        assert_eq!(nodes.len(), 4);
    }
}
