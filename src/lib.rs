//! # arbor-json
//!
//! `arbor-json` is a small, dependency-light JSON reader that turns
//! raw JSON text into an in-memory tree of typed values, built for
//! embedding in larger applications.
//!
//! Two cooperating state machines do the work, consumed in sequence:
//! a character-level tokenizer that turns the input text into a flat
//! ordered sequence of typed tokens, and a token-level parser that
//! consumes that sequence and builds an arena-backed tree of value
//! nodes honoring JSON's nested-container grammar.
//!
//! ## Key properties
//!
//! * **Tree output:** values are `Node`s in an arena owned by the
//!   `Document`, linked by `first_child`/`next_sibling` indices and
//!   dropped as one unit.
//! * **Object-rooted:** the document must start with `{`; top-level
//!   values other than an object are rejected.
//! * **Staged pipeline:** `load`, `tokenize`, and `parse` are
//!   separate, fully synchronous steps; nothing streams or
//!   interleaves.
//! * **Fatal errors:** the first malformed lexeme or grammar
//!   violation aborts with an error naming the violated expectation;
//!   a failed stage leaves no usable output.
//!
//! ## Dialect limits
//!
//! The supported dialect omits string escape sequences, Unicode
//! escapes, exponent notation, leading minus on numbers, and the
//! `null` literal. The tokenizer rejects (or never produces) them
//! rather than guessing.
//!
//! ## Quick start
//!
//! ```
//! use arbor_json::parse_str;
//!
//! let doc = parse_str(r#"{ "name": "Babbage", "id": 1815 }"#).unwrap();
//! let root = doc.root_id().unwrap();
//! assert_eq!(doc.children(root).count(), 2);
//!
//! let id = doc.member(root, "id").unwrap();
//! assert_eq!(doc.get(id).as_i64(), Some(1815));
//! ```
//!
//! Or drive the stages yourself, for example to inspect the token
//! sequence before parsing:
//!
//! ```
//! use arbor_json::{Document, ParseOptions};
//!
//! let mut doc = Document::new();
//! doc.load(r#"{"ok": true}"#);
//! doc.tokenize().unwrap();
//! assert_eq!(doc.tokens().len(), 5);
//!
//! doc.parse_with(ParseOptions {
//!     reject_trailing: true,
//!     ..ParseOptions::default()
//! })
//! .unwrap();
//! ```

/// Contains the `Document`: the staged pipeline and the tree owner.
pub mod document;
/// Contains the primary `ParseError` type for the library.
pub mod error;
/// Contains the `Node` data model for the parsed tree.
pub mod node;
/// Contains the tree-building parser, its state machine, and
/// `ParseOptions`.
pub mod parser;
/// Contains the `Token` and `TokenKind` types.
pub mod token;

/// The internal, byte-based tokenizer. Private to the crate; its
/// output is reachable through `Document::tokens`.
mod tokenizer;

pub use document::{Children, Document};
pub use error::ParseError;
pub use node::{Node, NodeId, NodeValue};
pub use parser::ParseOptions;
pub use token::{Token, TokenKind};

// --- Constants ---
/// The default maximum container nesting depth, bounding stack and
/// arena growth on adversarial input.
pub(crate) const DEFAULT_MAX_DEPTH: usize = 100;
/// The maximum input size (10 MiB) accepted by `parse_str`.
const MAX_INPUT_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Parses a JSON string into a `Document` in one call.
///
/// Convenience wrapper over the staged pipeline: load, tokenize, and
/// parse with default options. Inputs larger than 10 MiB are
/// rejected up front.
///
/// # Errors
/// Any tokenizer or parser error, or `ParseError::InputTooLarge`.
///
/// # Examples
/// ```
/// use arbor_json::{parse_str, NodeValue};
///
/// let doc = parse_str(r#"{"scores": [1, 2.5, true]}"#).unwrap();
/// let root = doc.root_id().unwrap();
/// let scores = doc.member(root, "scores").unwrap();
/// assert_eq!(doc.get(scores).value, NodeValue::Array);
/// assert_eq!(doc.children(scores).count(), 3);
/// ```
pub fn parse_str(input: &str) -> Result<Document, ParseError> {
    if input.len() > MAX_INPUT_SIZE_BYTES {
        return Err(ParseError::InputTooLarge {
            limit: MAX_INPUT_SIZE_BYTES,
        });
    }
    let mut doc = Document::new();
    doc.load(input);
    doc.tokenize()?;
    doc.parse()?;
    Ok(doc)
}

// --- Integration tests ---
#[cfg(test)]
mod tests {
    use super::{parse_str, Document, NodeValue, ParseError};
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_empty_object_has_zero_members() {
        let doc = parse_str("{}").unwrap();
        let root = doc.root_id().unwrap();
        assert_eq!(doc.children(root).count(), 0);
        assert!(doc.root().unwrap().first_child.is_none());
    }

    #[test]
    fn test_flat_members_in_input_order() {
        let doc = parse_str(r#"{"a":1,"b":2.5,"c":true,"d":"x"}"#).unwrap();
        let root = doc.root_id().unwrap();

        let members: Vec<_> = doc.children(root).collect();
        assert_eq!(members.len(), 4);

        let names: Vec<_> = members
            .iter()
            .map(|(_, node)| node.name().unwrap())
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);

        assert_eq!(members[0].1.value, NodeValue::Integer(1));
        assert_eq!(members[1].1.value, NodeValue::Float(2.5));
        assert_eq!(members[2].1.value, NodeValue::Boolean(true));
        assert_eq!(members[3].1.value, NodeValue::String("x".to_string()));
    }

    #[test]
    fn test_nested_array_and_object() {
        let doc = parse_str(r#"{"a":[1,2,{"b":3}]}"#).unwrap();
        let root = doc.root_id().unwrap();

        let a = doc.member(root, "a").unwrap();
        assert_eq!(doc.get(a).value, NodeValue::Array);

        let elements: Vec<_> = doc.children(a).collect();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0].1.value, NodeValue::Integer(1));
        assert_eq!(elements[1].1.value, NodeValue::Integer(2));
        assert_eq!(elements[2].1.value, NodeValue::Object);
        // Array elements carry no member name.
        assert_eq!(elements[0].1.name(), None);

        let inner = elements[2].0;
        let b = doc.member(inner, "b").unwrap();
        assert_eq!(doc.get(b).value, NodeValue::Integer(3));
        assert_eq!(doc.children(inner).count(), 1);
    }

    #[test]
    fn test_missing_value_references_the_value_state() {
        let err = parse_str(r#"{"a":}"#).unwrap_err();
        match err {
            ParseError::UnexpectedToken { expected, .. } => {
                assert!(expected.contains("value"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_top_level_array_fails_at_init() {
        let err = parse_str("[1,2]").unwrap_err();
        assert!(matches!(err, ParseError::MustStartWithObject { .. }));
        assert!(err.to_string().contains("must start with an object"));
    }

    #[test]
    fn test_tokenizer_error_surfaces_through_parse_str() {
        let err = parse_str(r#"{"a": truu}"#).unwrap_err();
        assert!(matches!(err, ParseError::MalformedLiteral { .. }));
    }

    #[test]
    fn test_input_size_limit() {
        let big = " ".repeat(super::MAX_INPUT_SIZE_BYTES + 1);
        let err = parse_str(&big).unwrap_err();
        assert!(matches!(err, ParseError::InputTooLarge { .. }));
    }

    #[test]
    fn test_document_is_reusable_across_loads() {
        let mut doc = Document::new();
        for input in [r#"{"a":1}"#, r#"{"b":2,"c":3}"#] {
            doc.load(input);
            doc.tokenize().unwrap();
            doc.parse().unwrap();
        }
        let root = doc.root_id().unwrap();
        assert_eq!(doc.children(root).count(), 2);
        assert!(doc.member(root, "a").is_none());
        assert!(doc.member(root, "b").is_some());
    }

    #[test]
    fn test_structure_agrees_with_serde_json() {
        // For documents inside the supported dialect, structure must
        // agree with serde_json's reading of the same text.
        let input = r#"{"name":"Ada","id":1815,"tags":["a","b"],"active":true,"score":9.5}"#;
        let doc = parse_str(input).unwrap();
        let root = doc.root_id().unwrap();

        let oracle: serde_json::Value = serde_json::from_str(input).unwrap();
        let object = oracle.as_object().unwrap();
        assert_eq!(doc.children(root).count(), object.len());

        let tags = doc.member(root, "tags").unwrap();
        assert_eq!(
            doc.children(tags).count(),
            oracle["tags"].as_array().unwrap().len()
        );
    }

    /// A value literal inside the supported dialect: non-negative
    /// integers, dotted floats, booleans, and escape-free strings.
    fn value_literal() -> impl Strategy<Value = String> {
        prop_oneof![
            any::<u32>().prop_map(|n| n.to_string()),
            (any::<u32>(), 0u32..1000).prop_map(|(a, b)| format!("{}.{}", a, b)),
            any::<bool>().prop_map(|b| b.to_string()),
            "[a-z]{0,8}".prop_map(|s| format!("\"{}\"", s)),
        ]
    }

    fn render_object(members: &BTreeMap<String, String>) -> String {
        let body: Vec<String> = members
            .iter()
            .map(|(key, value)| format!("\"{}\":{}", key, value))
            .collect();
        format!("{{{}}}", body.join(","))
    }

    proptest! {
        // Structural round trip: the number of direct children
        // reported by tree traversal equals the number of top-level
        // members in the source text.
        #[test]
        fn prop_child_count_matches_member_count(
            members in prop::collection::btree_map("[a-z]{1,8}", value_literal(), 0..8)
        ) {
            let input = render_object(&members);
            let doc = parse_str(&input).unwrap();
            let root = doc.root_id().unwrap();
            prop_assert_eq!(doc.children(root).count(), members.len());

            // The dialect subset is plain JSON, so serde_json must
            // agree on the member count too.
            let oracle: serde_json::Value = serde_json::from_str(&input).unwrap();
            prop_assert_eq!(oracle.as_object().unwrap().len(), members.len());
        }
    }
}
