//! # typeshade_ast
//!
//! Syntax tree definitions for typeshade.
//!
//! A parsed program is stored as a [`SyntaxTree`]: a flat arena of
//! [`SyntaxNode`]s addressed by [`NodeId`]. Children are ordered index lists
//! and the parent link is a plain index, so the tree has no reference cycles
//! while still answering "who is my parent" in O(1).
//!
//! ## Architecture
//!
//! - Front ends build trees through [`TreeBuilder`] (start/finish pairs)
//! - [`walk`] and [`Visitor`] traverse every node exactly once, pre-order,
//!   with an explicit stack so deeply nested programs cannot overflow
//! - [`rewrite`] produces a new tree with selected nodes substituted,
//!   leaving the input untouched
//!
//! ## Example
//!
//! ```rust
//! use typeshade_ast::{NodeData, Span, SyntaxKind, TreeBuilder, walk};
//!
//! let mut builder = TreeBuilder::new();
//! builder.start_node(SyntaxKind::SourceFile, Span::new(0, 5), NodeData::None).unwrap();
//! builder
//!     .leaf(SyntaxKind::Identifier, Span::new(0, 5), NodeData::identifier("babel"))
//!     .unwrap();
//! builder.finish_node().unwrap();
//! let tree = builder.finish().unwrap();
//!
//! let mut count = 0;
//! walk(&tree, |_, _| count += 1);
//! assert_eq!(count, 2);
//! ```

mod kind;
mod node;
mod print;
mod span;
mod tree;
pub mod visitor;

pub use kind::{SyntaxKind, UnknownKind};
pub use node::{ImportClause, NodeData, NodeId, SyntaxNode};
pub use print::print_tree;
pub use span::Span;
pub use tree::{BuildError, SyntaxTree, TreeBuilder};

// Re-export commonly used visitor items for convenience
pub use visitor::{Fragment, VisitResult, Visitor, rewrite, walk, walk_tree};
