//! Graphviz DOT serialization.
//!
//! Output is a pure function of the graph: nodes and edges are emitted in
//! their stored order and nothing else (no timestamps, no hashing) goes into
//! the text, so two identical graphs serialize to identical bytes.

use std::io::Write;

use super::model::Graph;

const INDENT: &str = "\t";

/// DOT keywords that cannot appear as bare identifiers.
const KEYWORDS: &[&str] = &["node", "edge", "graph", "digraph", "subgraph", "strict"];

impl Graph {
    /// Serialize to DOT source text.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        out.push_str("digraph ");
        out.push_str(&quote_id(self.name()));
        out.push_str(" {\n");

        for (key, value) in self.attrs() {
            out.push_str(INDENT);
            out.push_str(&quote_id(key));
            out.push('=');
            out.push_str(&quote_string(value));
            out.push('\n');
        }

        for node in self.nodes() {
            out.push_str(INDENT);
            out.push_str(&quote_id(&node.id));
            out.push_str(" [label=");
            out.push_str(&quote_string(&node.label));
            out.push_str("]\n");
        }

        for edge in self.edges() {
            out.push_str(INDENT);
            out.push_str(&quote_id(&edge.source));
            out.push_str(" -> ");
            out.push_str(&quote_id(&edge.target));
            if let Some(label) = &edge.label {
                out.push_str(" [label=");
                out.push_str(&quote_string(label));
                out.push(']');
            }
            out.push('\n');
        }

        out.push_str("}\n");
        out
    }

    /// Write the DOT source to `w`.
    pub fn write_dot<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        w.write_all(self.to_dot().as_bytes())
    }
}

/// Leave plain identifiers bare, quote everything else.
fn quote_id(id: &str) -> String {
    if is_plain_id(id) {
        id.to_owned()
    } else {
        quote_string(id)
    }
}

fn is_plain_id(id: &str) -> bool {
    let mut chars = id.chars();
    let starts_ok = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    starts_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(id))
}

/// Double-quote a string, escaping quotes and backslashes.
///
/// Line breaks become DOT's `\n` (centred line) escape.
fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
