//! Structural tree rewriting.
//!
//! Trees are immutable, so a rewrite rebuilds a fresh arena bottom-up:
//! untouched nodes are copied with remapped ids and substituted nodes are
//! replaced by freshly allocated [`Fragment`]s.

use crate::{NodeData, NodeId, Span, SyntaxKind, SyntaxNode, SyntaxTree};

/// An owned subtree that has not been allocated in any arena yet.
///
/// Returned by a rewrite's substitute function to replace a node. A fragment
/// without a span takes the span of the node it replaces (or of its parent
/// fragment), so synthetic nodes still map back to source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub kind: SyntaxKind,
    pub span: Option<Span>,
    pub data: NodeData,
    pub children: Vec<Fragment>,
}

impl Fragment {
    /// Creates a childless fragment of `kind`.
    pub fn new(kind: SyntaxKind) -> Self {
        Self {
            kind,
            span: None,
            data: NodeData::None,
            children: Vec::new(),
        }
    }

    /// Creates an identifier fragment.
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::new(SyntaxKind::Identifier).with_data(NodeData::identifier(name))
    }

    /// Sets an explicit span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Sets the payload.
    ///
    /// A `Variable` payload loses its `type_annotation`: ids from another
    /// tree are meaningless in the rebuilt arena.
    pub fn with_data(mut self, data: NodeData) -> Self {
        self.data = match data {
            NodeData::Variable { .. } => NodeData::Variable {
                type_annotation: None,
            },
            other => other,
        };
        self
    }

    /// Appends a child fragment.
    pub fn with_child(mut self, child: Fragment) -> Self {
        self.children.push(child);
        self
    }
}

enum Frame {
    Enter(NodeId),
    Exit(NodeId),
}

/// Rebuilds `tree`, letting `substitute` replace nodes.
///
/// `substitute` is called for each node in pre-order:
///
/// - `None` keeps the node, descends into its children and rebuilds it with
///   whatever its children became.
/// - `Some(fragment)` splices the fragment in place of the node; the
///   original node's children are not visited. If the replacement itself
///   needs rewriting, the substitute function must do it before returning.
///
/// The input is only borrowed, so it is never modified. Node count and shape
/// are preserved wherever nothing was substituted.
pub fn rewrite<F>(tree: &SyntaxTree, mut substitute: F) -> SyntaxTree
where
    F: FnMut(&SyntaxTree, NodeId) -> Option<Fragment>,
{
    let mut out: Vec<SyntaxNode> = Vec::with_capacity(tree.node_count());
    let mut remap: Vec<Option<NodeId>> = vec![None; tree.node_count()];
    let mut stack = vec![Frame::Enter(tree.root())];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(id) => match substitute(tree, id) {
                Some(fragment) => {
                    remap[id.index()] = Some(alloc_fragment(&mut out, fragment, tree.span(id)));
                }
                None => {
                    stack.push(Frame::Exit(id));
                    stack.extend(tree.children(id).iter().rev().map(|&c| Frame::Enter(c)));
                }
            },
            Frame::Exit(id) => {
                // Every child was entered after this frame was pushed, so all
                // of them are already rebuilt.
                let node = tree.node(id);
                let children: Vec<NodeId> = node
                    .children
                    .iter()
                    .filter_map(|c| remap[c.index()])
                    .collect();
                let data = match &node.data {
                    NodeData::Variable { type_annotation } => NodeData::Variable {
                        type_annotation: type_annotation.and_then(|t| remap[t.index()]),
                    },
                    other => other.clone(),
                };
                remap[id.index()] = Some(push_node(&mut out, node.kind, node.span, data, children));
            }
        }
    }

    // The root is always the last node finished.
    let root = NodeId(out.len() as u32 - 1);
    debug_assert_eq!(remap[tree.root().index()], Some(root));
    SyntaxTree::from_parts(out, root)
}

fn push_node(
    out: &mut Vec<SyntaxNode>,
    kind: SyntaxKind,
    span: Span,
    data: NodeData,
    children: Vec<NodeId>,
) -> NodeId {
    let id = NodeId(out.len() as u32);
    for child in &children {
        out[child.index()].parent = Some(id);
    }
    out.push(SyntaxNode {
        kind,
        span,
        parent: None,
        children,
        data,
    });
    id
}

enum FragmentStep {
    Enter(Fragment, Span),
    Exit {
        kind: SyntaxKind,
        span: Span,
        data: NodeData,
        child_count: usize,
    },
}

/// Allocates `fragment` post-order and returns the id of its top node.
fn alloc_fragment(out: &mut Vec<SyntaxNode>, fragment: Fragment, inherited: Span) -> NodeId {
    let mut stack = vec![FragmentStep::Enter(fragment, inherited)];
    let mut finished: Vec<NodeId> = Vec::new();

    while let Some(step) = stack.pop() {
        match step {
            FragmentStep::Enter(fragment, inherited) => {
                let span = fragment.span.unwrap_or(inherited);
                stack.push(FragmentStep::Exit {
                    kind: fragment.kind,
                    span,
                    data: fragment.data,
                    child_count: fragment.children.len(),
                });
                stack.extend(
                    fragment
                        .children
                        .into_iter()
                        .rev()
                        .map(|child| FragmentStep::Enter(child, span)),
                );
            }
            FragmentStep::Exit {
                kind,
                span,
                data,
                child_count,
            } => {
                let children = finished.split_off(finished.len() - child_count);
                finished.push(push_node(out, kind, span, data, children));
            }
        }
    }

    NodeId(out.len() as u32 - 1)
}
