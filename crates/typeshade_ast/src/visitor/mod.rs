//! Traversal and transformation of syntax trees.
//!
//! # Overview
//!
//! - [`walk`] - Calls a closure for every node, pre-order
//! - [`Visitor`] / [`walk_tree`] - Enter/exit hooks with early termination
//! - [`PreOrder`] - The same order as an iterator
//! - [`rewrite`] - Builds a new tree with selected nodes substituted
//!
//! All traversals use an explicit stack, so nesting depth is bounded only by
//! memory.
//!
//! # Examples
//!
//! ## Collecting identifier names
//!
//! ```rust
//! use typeshade_ast::{NodeData, Span, SyntaxKind, TreeBuilder, walk};
//!
//! let mut b = TreeBuilder::new();
//! b.start_node(SyntaxKind::SourceFile, Span::new(0, 11), NodeData::None).unwrap();
//! b.leaf(SyntaxKind::Identifier, Span::new(0, 5), NodeData::identifier("hello")).unwrap();
//! b.leaf(SyntaxKind::Identifier, Span::new(6, 11), NodeData::identifier("world")).unwrap();
//! b.finish_node().unwrap();
//! let tree = b.finish().unwrap();
//!
//! let mut names = Vec::new();
//! walk(&tree, |_, node| {
//!     if let Some(name) = node.name() {
//!         names.push(name.to_string());
//!     }
//! });
//! assert_eq!(names, vec!["hello", "world"]);
//! ```
//!
//! ## Early termination
//!
//! ```rust
//! use std::ops::ControlFlow;
//! use typeshade_ast::{NodeId, SyntaxKind, SyntaxTree};
//! use typeshade_ast::visitor::{VisitResult, Visitor};
//!
//! struct FirstTypeReference(Option<NodeId>);
//!
//! impl Visitor for FirstTypeReference {
//!     fn enter_node(&mut self, tree: &SyntaxTree, id: NodeId) -> VisitResult {
//!         if tree.kind(id) == SyntaxKind::TypeReference {
//!             self.0 = Some(id);
//!             return ControlFlow::Break(()); // Stop traversal
//!         }
//!         ControlFlow::Continue(())
//!     }
//! }
//! ```

mod rewrite;
mod walk;

pub use rewrite::{Fragment, rewrite};
pub use walk::{PreOrder, VisitResult, Visitor, walk, walk_from, walk_tree};
