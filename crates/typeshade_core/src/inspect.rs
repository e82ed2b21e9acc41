//! Program inspection helpers.

use serde::Serialize;
use typeshade_ast::{NodeId, SyntaxKind, SyntaxTree};

/// A function declared at the top level of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionInfo {
    pub id: NodeId,
    /// `None` for `export default function () {}`.
    pub name: Option<String>,
}

/// Lists the function declarations directly under the root, in source order.
///
/// Declarations wrapped in a single `export` are included.
pub fn top_level_functions(tree: &SyntaxTree) -> Vec<FunctionInfo> {
    let mut functions = Vec::new();
    for &child in tree.children(tree.root()) {
        let candidates: &[NodeId] = match tree.kind(child) {
            SyntaxKind::ExportDeclaration => tree.children(child),
            _ => std::slice::from_ref(&child),
        };
        for &id in candidates {
            if tree.kind(id) == SyntaxKind::FunctionDeclaration {
                functions.push(FunctionInfo {
                    id,
                    name: tree.name_of(id).map(str::to_string),
                });
            }
        }
    }
    functions
}
