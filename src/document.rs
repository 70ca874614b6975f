//! Contains the `Document`: loaded text, token sequence, and the
//! parsed node arena, consumed in that order.
//!
//! The three stages never interleave: the whole input text is
//! resident before `tokenize()` runs, and the token sequence is
//! fully materialized before `parse()` runs. A failed stage leaves
//! no usable output behind. The document owns the node arena as a
//! single unit; the whole tree goes away when the document drops.

use crate::error::ParseError;
use crate::node::{Node, NodeId};
use crate::parser::{self, ParseOptions};
use crate::token::Token;
use crate::tokenizer;

/// One JSON document moving through the load → tokenize → parse
/// pipeline, and the owner of the resulting tree.
#[derive(Debug, Default)]
pub struct Document {
    text: String,
    tokens: Vec<Token>,
    tokenized: bool,
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Document {
    /// An empty document with nothing loaded.
    pub fn new() -> Self {
        Document::default()
    }

    /// Replaces any previously loaded input and discards the token
    /// sequence and tree derived from it. Does not tokenize or parse.
    pub fn load(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.tokens.clear();
        self.tokenized = false;
        self.nodes.clear();
        self.root = None;
    }

    /// The currently loaded input text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Scans the loaded text into the token sequence.
    ///
    /// Fails on the first malformed lexeme; on failure the token
    /// sequence is empty.
    pub fn tokenize(&mut self) -> Result<(), ParseError> {
        self.tokens.clear();
        self.tokenized = false;
        self.tokens = tokenizer::tokenize(&self.text)?;
        self.tokenized = true;
        Ok(())
    }

    /// The materialized token sequence, in input order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Parses the token sequence into the tree, with default options.
    ///
    /// Requires a completed `tokenize()`; fails on the first grammar
    /// violation, leaving no tree behind.
    pub fn parse(&mut self) -> Result<(), ParseError> {
        self.parse_with(ParseOptions::default())
    }

    /// Parses the token sequence into the tree.
    pub fn parse_with(&mut self, options: ParseOptions) -> Result<(), ParseError> {
        self.nodes.clear();
        self.root = None;
        if !self.tokenized {
            return Err(ParseError::TokensMissing);
        }
        let (nodes, root) = parser::build_tree(&self.tokens, options)?;
        self.nodes = nodes;
        self.root = Some(root);
        Ok(())
    }

    /// The id of the root node, once a parse has succeeded.
    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    /// The root node itself: the top-level container whose children
    /// are the document's members.
    pub fn root(&self) -> Option<&Node> {
        self.root.map(|id| &self.nodes[id.index()])
    }

    /// Looks up a node by id.
    ///
    /// Ids are minted by this document's parse; passing an id from
    /// another document panics on out-of-range, like slice indexing.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Iterates a container's direct children in document order,
    /// following the `first_child` → `next_sibling` chain.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            next: self.nodes[id.index()].first_child,
        }
    }

    /// Finds the first member of `container` whose name is `name`.
    pub fn member(&self, container: NodeId, name: &str) -> Option<NodeId> {
        self.children(container)
            .find(|(_, node)| node.name() == Some(name))
            .map(|(id, _)| id)
    }
}

/// Iterator over a container's direct children.
pub struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.doc.get(id);
        self.next = node.next_sibling;
        Some((id, node))
    }
}
