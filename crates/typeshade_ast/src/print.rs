//! Human-readable tree dumps.

use std::fmt::Write;

use crate::{NodeId, SyntaxTree};

/// Renders the subtree rooted at `id`, one node per line, indented two
/// spaces per level: `Kind [start..end) name`.
pub fn print_tree(tree: &SyntaxTree, id: NodeId) -> String {
    let mut out = String::new();
    let mut stack = vec![(id, 0usize)];

    while let Some((id, depth)) = stack.pop() {
        let node = tree.node(id);
        let _ = write!(
            out,
            "{:indent$}{} [{}..{})",
            "",
            node.kind,
            node.span.start,
            node.span.end,
            indent = depth * 2
        );
        if let Some(name) = node.name() {
            let _ = write!(out, " {name}");
        }
        if node.data.import_clause().is_some_and(|c| c.type_only) {
            out.push_str(" type-only");
        }
        out.push('\n');

        stack.extend(node.children.iter().rev().map(|&c| (c, depth + 1)));
    }

    out
}
