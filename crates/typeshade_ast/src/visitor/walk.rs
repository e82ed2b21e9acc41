//! Pre-order traversal.

use std::ops::ControlFlow;

use crate::{NodeId, SyntaxNode, SyntaxTree};

/// Result type for visitor hooks.
///
/// - `ControlFlow::Continue(())` - keep walking
/// - `ControlFlow::Break(())` - stop the whole traversal
pub type VisitResult = ControlFlow<()>;

/// Read-only visitor with enter/exit hooks.
///
/// `enter_node` runs before a node's children, `exit_node` after all of
/// them. Both default to continuing.
pub trait Visitor {
    /// Called before visiting the children of `id`.
    #[inline]
    fn enter_node(&mut self, _tree: &SyntaxTree, _id: NodeId) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called after the children of `id` have been visited.
    #[inline]
    fn exit_node(&mut self, _tree: &SyntaxTree, _id: NodeId) -> VisitResult {
        ControlFlow::Continue(())
    }
}

/// Pre-order iterator over a subtree.
///
/// Yields the start node first, then each child's subtree in source order.
#[derive(Debug, Clone)]
pub struct PreOrder<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl<'t> PreOrder<'t> {
    /// Creates an iterator starting at `start`.
    pub fn new(tree: &'t SyntaxTree, start: NodeId) -> Self {
        Self {
            tree,
            stack: vec![start],
        }
    }
}

impl Iterator for PreOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // Reversed so the first child is popped next.
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

impl SyntaxTree {
    /// Iterates over the subtree rooted at `start` in pre-order.
    pub fn pre_order(&self, start: NodeId) -> PreOrder<'_> {
        PreOrder::new(self, start)
    }
}

/// Calls `callback` once for every node of `tree`, root first, then each
/// child subtree in source order.
pub fn walk<F>(tree: &SyntaxTree, mut callback: F)
where
    F: FnMut(NodeId, &SyntaxNode),
{
    for id in tree.pre_order(tree.root()) {
        callback(id, tree.node(id));
    }
}

enum Frame {
    Enter(NodeId),
    Exit(NodeId),
}

/// Walks the whole tree with `visitor`.
///
/// Returns `ControlFlow::Break(())` if a hook stopped the traversal.
pub fn walk_tree<V>(visitor: &mut V, tree: &SyntaxTree) -> VisitResult
where
    V: Visitor + ?Sized,
{
    walk_from(visitor, tree, tree.root())
}

/// Walks the subtree rooted at `start` with `visitor`.
pub fn walk_from<V>(visitor: &mut V, tree: &SyntaxTree, start: NodeId) -> VisitResult
where
    V: Visitor + ?Sized,
{
    let mut stack = vec![Frame::Enter(start)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(id) => {
                visitor.enter_node(tree, id)?;
                stack.push(Frame::Exit(id));
                stack.extend(tree.children(id).iter().rev().map(|&c| Frame::Enter(c)));
            }
            Frame::Exit(id) => visitor.exit_node(tree, id)?,
        }
    }

    ControlFlow::Continue(())
}
