//! A binary executable that demonstrates how to use the `arbor-json`
//! library.
//!
//! This is not part of the library itself: it owns the I/O glue the
//! core leaves out. It reads a whole JSON file into a
//! text buffer (or falls back to a built-in sample), dumps the token
//! stream, then parses and walks the tree.
//!
//! Run it with: `cargo run -- path/to/file.json`

use arbor_json::{Document, NodeId, NodeValue};
use std::env;
use std::fs;
use std::process;

const SAMPLE: &str = r#"
{
    "name": "Babbage",
    "age": 30,
    "admin": true,
    "friends": ["Ada", "Charles", "Grace"],
    "tasks": [
        { "id": 1, "title": "Parse JSON", "done": false },
        { "id": 2, "title": "Write docs", "done": true }
    ],
    "nested": { "key": [1, 2.5, "three"] }
}
"#;

fn main() {
    let args: Vec<String> = env::args().collect();

    // The stream-to-buffer contract lives here, outside the core:
    // read the entire file up front, fail loudly if that is not
    // possible.
    let text = match args.get(1) {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("cannot read {}: {}", path, e);
                process::exit(1);
            }
        },
        None => SAMPLE.to_string(),
    };

    let mut doc = Document::new();
    doc.load(text);

    if let Err(e) = doc.tokenize() {
        eprintln!("{}", e);
        process::exit(1);
    }

    println!("--- Token stream ---");
    for token in doc.tokens() {
        print!("{:?} ", token.kind);
    }
    println!();

    if let Err(e) = doc.parse() {
        eprintln!("{}", e);
        process::exit(1);
    }

    println!("--- Tree ---");
    if let Some(root) = doc.root_id() {
        print_node(&doc, root, 0);
    }
}

/// Walks the tree depth-first, one indented line per node.
fn print_node(doc: &Document, id: NodeId, depth: usize) {
    let node = doc.get(id);
    let indent = "  ".repeat(depth);
    let label = match node.name() {
        Some(name) => format!("{}: ", name),
        None => String::new(),
    };

    match &node.value {
        NodeValue::Root => println!("{}(document)", indent),
        NodeValue::Object => println!("{}{}object", indent, label),
        NodeValue::Array => println!("{}{}array", indent, label),
        NodeValue::String(s) => println!("{}{}\"{}\"", indent, label, s),
        NodeValue::Integer(n) => println!("{}{}{}", indent, label, n),
        NodeValue::Float(n) => println!("{}{}{}", indent, label, n),
        NodeValue::Boolean(b) => println!("{}{}{}", indent, label, b),
        NodeValue::Null => println!("{}{}null", indent, label),
    }

    for (child, _) in doc.children(id) {
        print_node(doc, child, depth + 1);
    }
}
