//! SyntaxNode definition.
//!
//! The node payload stored in a [`SyntaxTree`](crate::SyntaxTree) arena.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Span, SyntaxKind};

/// Stable index of a node inside its tree's arena.
///
/// Two ids compare equal exactly when they name the same node, which is the
/// identity used wherever "the same node" matters (for example a variable
/// declaration's recorded type annotation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the arena index of this id.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    /// The kind of this node.
    pub kind: SyntaxKind,

    /// Byte span in the source text.
    pub span: Span,

    /// Parent node; `None` only for the root.
    pub parent: Option<NodeId>,

    /// Child nodes in source order.
    pub children: Vec<NodeId>,

    /// Kind-specific payload.
    pub data: NodeData,
}

impl SyntaxNode {
    /// Returns true if this node has children.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the identifier or declaration name carried by this node.
    pub fn name(&self) -> Option<&str> {
        self.data.name()
    }
}

/// Kind-specific node data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeData {
    #[default]
    None,
    /// Textual name of an identifier.
    Identifier { name: String },
    /// Import declaration; `clause` is absent for side-effect imports.
    Import { clause: Option<ImportClause> },
    /// Variable declaration; `type_annotation` names the child node holding
    /// its declared type, when there is one.
    Variable { type_annotation: Option<NodeId> },
    /// Declaration that may carry a name (functions, classes, aliases).
    Named { name: Option<String> },
}

/// The import clause of an import declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportClause {
    /// Set by `import type ...`; a language-level flag, not inferred from use.
    pub type_only: bool,
}

impl NodeData {
    /// Creates identifier data.
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier { name: name.into() }
    }

    /// Creates data for a named declaration.
    pub fn named(name: Option<impl Into<String>>) -> Self {
        Self::Named {
            name: name.map(Into::into),
        }
    }

    /// Creates data for an import declaration with a clause.
    pub const fn import(type_only: bool) -> Self {
        Self::Import {
            clause: Some(ImportClause { type_only }),
        }
    }

    /// Creates data for an import declaration without a clause (`import "m"`).
    pub const fn side_effect_import() -> Self {
        Self::Import { clause: None }
    }

    /// Returns the name carried by identifier and named-declaration data.
    pub fn name(&self) -> Option<&str> {
        match self {
            NodeData::Identifier { name } => Some(name),
            NodeData::Named { name } => name.as_deref(),
            _ => None,
        }
    }

    /// Returns the import clause, if this is import data that has one.
    pub fn import_clause(&self) -> Option<&ImportClause> {
        match self {
            NodeData::Import { clause } => clause.as_ref(),
            _ => None,
        }
    }

    /// Returns the recorded type annotation of variable data.
    pub fn type_annotation(&self) -> Option<NodeId> {
        match self {
            NodeData::Variable { type_annotation } => *type_annotation,
            _ => None,
        }
    }
}
