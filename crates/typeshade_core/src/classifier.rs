//! Erasure classification.
//!
//! Decides, per node, whether the node disappears when TypeScript is lowered
//! to JavaScript. Rules are checked in priority order and the first match
//! wins; a node matching no rule is kept regardless of its children.

use std::fmt;

use serde::Serialize;
use tracing::debug;
use typeshade_ast::{NodeId, SyntaxKind, SyntaxTree, walk};

/// The rule that classified a node as erased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErasureRule {
    /// The node kind only ever describes a static type.
    TypeOnlyKind,
    /// An import declaration whose clause is flagged `type`.
    TypeOnlyImport,
    /// The type annotation recorded on a variable declaration.
    VariableTypeAnnotation,
}

impl fmt::Display for ErasureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TypeOnlyKind => "type-only kind",
            Self::TypeOnlyImport => "type-only import",
            Self::VariableTypeAnnotation => "variable type annotation",
        };
        f.write_str(name)
    }
}

/// Returns the first rule that erases `id`, if any.
pub fn classify(tree: &SyntaxTree, id: NodeId) -> Option<ErasureRule> {
    let node = tree.node(id);

    match node.kind {
        SyntaxKind::TypeReference
        | SyntaxKind::InterfaceDeclaration
        | SyntaxKind::TypeAliasDeclaration => return Some(ErasureRule::TypeOnlyKind),
        _ => {}
    }

    if node.data.import_clause().is_some_and(|clause| clause.type_only) {
        return Some(ErasureRule::TypeOnlyImport);
    }

    let parent = node.parent?;
    let parent_node = tree.node(parent);
    if parent_node.kind == SyntaxKind::VariableDeclaration
        && parent_node.data.type_annotation() == Some(id)
    {
        return Some(ErasureRule::VariableTypeAnnotation);
    }

    None
}

/// Returns true if `id` has no runtime representation.
pub fn is_erased(tree: &SyntaxTree, id: NodeId) -> bool {
    classify(tree, id).is_some()
}

/// Collects every erased node in walk order.
///
/// Nested matches are all reported; a type alias and the type references
/// inside it each get their own entry.
pub fn collect_erased(tree: &SyntaxTree) -> Vec<NodeId> {
    let mut erased = Vec::new();
    walk(tree, |id, _| {
        if is_erased(tree, id) {
            erased.push(id);
        }
    });
    debug!(erased = erased.len(), nodes = tree.node_count(), "Classified tree");
    erased
}
