//! Arena-backed syntax tree and its builder.

use serde::Serialize;
use serde::ser::{SerializeSeq, SerializeStruct};
use thiserror::Error;

use crate::{NodeData, NodeId, Span, SyntaxKind, SyntaxNode};

/// Errors raised while assembling or validating a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A span whose start lies after its end.
    #[error("Invalid span {start}..{end} for {kind}")]
    InvalidSpan {
        kind: SyntaxKind,
        start: u32,
        end: u32,
    },

    /// `finish_node` without a matching `start_node`.
    #[error("No open node to finish")]
    NoOpenNode,

    /// A second top-level node after the root was closed.
    #[error("Tree already has a root")]
    MultipleRoots,

    /// `finish` while nodes are still open.
    #[error("{0} node(s) left open")]
    Unclosed(usize),

    /// `finish` before any node was started.
    #[error("Tree has no root")]
    Empty,

    /// A parent/child relation that breaks the lexical-order invariant.
    #[error("Node {child} breaks the structure of its parent {parent}: {reason}")]
    Malformed {
        parent: NodeId,
        child: NodeId,
        reason: &'static str,
    },
}

/// A syntax tree stored as a flat arena.
///
/// Nodes are owned by the arena; `parent` and `children` are indices into it.
/// Trees are immutable once built: transformations go through
/// [`rewrite`](crate::rewrite) and produce a new tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    root: NodeId,
}

impl SyntaxTree {
    pub(crate) fn from_parts(nodes: Vec<SyntaxNode>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    /// Returns the root node id.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    #[inline]
    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    /// Returns the node for `id`, or `None` for a foreign id.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id.index())
    }

    /// Total number of nodes in the tree.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the kind of `id`.
    #[inline]
    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.node(id).kind
    }

    /// Returns the span of `id`.
    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.node(id).span
    }

    /// Returns the parent of `id`.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Returns the children of `id` in source order.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Returns the name carried by `id`, if any.
    #[inline]
    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.node(id).name()
    }

    /// Iterates over all node ids in arena order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Iterates over the ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Returns the source text covered by `id`.
    pub fn text<'t>(&self, id: NodeId, source: &'t str) -> Option<&'t str> {
        self.span(id).slice(source)
    }

    /// Checks the structural invariants: valid spans, consistent parent
    /// links, children enclosed by their parent and in increasing,
    /// non-overlapping source order.
    pub fn check_invariants(&self) -> Result<(), BuildError> {
        for parent in self.ids() {
            let node = self.node(parent);
            if node.span.start > node.span.end {
                return Err(BuildError::InvalidSpan {
                    kind: node.kind,
                    start: node.span.start,
                    end: node.span.end,
                });
            }

            let mut prev_end = node.span.start;
            for &child in &node.children {
                let child_node = self.get(child).ok_or(BuildError::Malformed {
                    parent,
                    child,
                    reason: "dangling child index",
                })?;
                let malformed = |reason| BuildError::Malformed {
                    parent,
                    child,
                    reason,
                };
                if child_node.parent != Some(parent) {
                    return Err(malformed("parent link does not point back"));
                }
                if !node.span.encloses(&child_node.span) {
                    return Err(malformed("child span escapes parent span"));
                }
                if child_node.span.start < prev_end {
                    return Err(malformed("child overlaps or precedes its previous sibling"));
                }
                prev_end = child_node.span.end;
            }
        }
        Ok(())
    }
}

/// Incremental builder used by front ends.
///
/// Calls to [`start_node`](Self::start_node) and
/// [`finish_node`](Self::finish_node) must nest like the source they
/// describe; each started node becomes the last child of the innermost open
/// node.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
    stack: Vec<NodeId>,
    root: Option<NodeId>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a node as the last child of the current open node.
    pub fn start_node(
        &mut self,
        kind: SyntaxKind,
        span: Span,
        data: NodeData,
    ) -> Result<NodeId, BuildError> {
        if span.start > span.end {
            return Err(BuildError::InvalidSpan {
                kind,
                start: span.start,
                end: span.end,
            });
        }

        let parent = self.stack.last().copied();
        if parent.is_none() && self.root.is_some() {
            return Err(BuildError::MultipleRoots);
        }

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SyntaxNode {
            kind,
            span,
            parent,
            children: Vec::new(),
            data,
        });

        match parent {
            Some(p) => self.nodes[p.index()].children.push(id),
            None => self.root = Some(id),
        }
        self.stack.push(id);
        Ok(id)
    }

    /// Closes the innermost open node.
    pub fn finish_node(&mut self) -> Result<NodeId, BuildError> {
        self.stack.pop().ok_or(BuildError::NoOpenNode)
    }

    /// Adds a node with no children.
    pub fn leaf(
        &mut self,
        kind: SyntaxKind,
        span: Span,
        data: NodeData,
    ) -> Result<NodeId, BuildError> {
        self.start_node(kind, span, data)?;
        self.finish_node()
    }

    /// Returns the innermost open node.
    pub fn current(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    /// Returns the kind of a node already started.
    pub fn kind_of(&self, id: NodeId) -> Option<SyntaxKind> {
        self.nodes.get(id.index()).map(|n| n.kind)
    }

    /// Returns mutable access to the payload of a node already started.
    pub fn data_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id.index()).map(|n| &mut n.data)
    }

    /// Completes the tree.
    pub fn finish(self) -> Result<SyntaxTree, BuildError> {
        if !self.stack.is_empty() {
            return Err(BuildError::Unclosed(self.stack.len()));
        }
        let root = self.root.ok_or(BuildError::Empty)?;
        Ok(SyntaxTree::from_parts(self.nodes, root))
    }
}

/// Serializes a subtree as nested `{type, range, ..., children}` objects.
///
/// serde's data model nests one serializer call per object level, so this
/// is the one traversal that recurses: its stack use grows with tree depth.
/// [`print_tree`](crate::print_tree) and the walkers have no such limit.
struct SerializeNode<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

struct SerializeChildren<'t> {
    tree: &'t SyntaxTree,
    children: &'t [NodeId],
}

impl Serialize for SerializeNode<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let node = self.tree.node(self.id);
        let name = node.name();
        let type_only = node.data.import_clause().map(|c| c.type_only);

        let mut len = 3; // type, range, children
        len += usize::from(name.is_some());
        len += usize::from(type_only.is_some());

        let mut state = serializer.serialize_struct("SyntaxNode", len)?;
        state.serialize_field("type", &node.kind)?;
        state.serialize_field("range", &[node.span.start, node.span.end])?;
        if let Some(name) = name {
            state.serialize_field("name", name)?;
        }
        if let Some(type_only) = type_only {
            state.serialize_field("typeOnly", &type_only)?;
        }
        state.serialize_field(
            "children",
            &SerializeChildren {
                tree: self.tree,
                children: &node.children,
            },
        )?;
        state.end()
    }
}

impl Serialize for SerializeChildren<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.children.len()))?;
        for &id in self.children {
            seq.serialize_element(&SerializeNode {
                tree: self.tree,
                id,
            })?;
        }
        seq.end()
    }
}

impl SyntaxTree {
    /// Returns a serializable view of the subtree rooted at `id`.
    ///
    /// Serialization recurses once per level, so very deep trees need a
    /// correspondingly large stack.
    pub fn subtree(&self, id: NodeId) -> impl Serialize + '_ {
        SerializeNode { tree: self, id }
    }
}

/// Nested JSON output; serialization recurses once per tree level.
impl Serialize for SyntaxTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        SerializeNode {
            tree: self,
            id: self.root,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// `type T = number;`
    fn alias_tree() -> SyntaxTree {
        let mut b = TreeBuilder::new();
        b.start_node(SyntaxKind::SourceFile, Span::new(0, 16), NodeData::None)
            .unwrap();
        b.start_node(
            SyntaxKind::TypeAliasDeclaration,
            Span::new(0, 16),
            NodeData::named(Some("T")),
        )
        .unwrap();
        b.leaf(SyntaxKind::Identifier, Span::new(5, 6), NodeData::identifier("T"))
            .unwrap();
        b.leaf(SyntaxKind::KeywordType, Span::new(9, 15), NodeData::None)
            .unwrap();
        b.finish_node().unwrap();
        b.finish_node().unwrap();
        b.finish().unwrap()
    }

    #[test]
    fn test_builder_links_parents_and_children() {
        let tree = alias_tree();
        let root = tree.root();
        assert_eq!(tree.kind(root), SyntaxKind::SourceFile);
        assert_eq!(tree.parent(root), None);

        let alias = tree.children(root)[0];
        assert_eq!(tree.parent(alias), Some(root));
        assert_eq!(tree.children(alias).len(), 2);
        assert_eq!(tree.node_count(), 4);
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let tree = alias_tree();
        let alias = tree.children(tree.root())[0];
        let ident = tree.children(alias)[0];
        let ancestors: Vec<_> = tree.ancestors(ident).collect();
        assert_eq!(ancestors, vec![alias, tree.root()]);
    }

    #[test]
    fn test_invalid_span_rejected() {
        let mut b = TreeBuilder::new();
        let err = b
            .start_node(SyntaxKind::SourceFile, Span::new(4, 2), NodeData::None)
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidSpan { start: 4, end: 2, .. }));
    }

    #[test]
    fn test_unbalanced_builder_calls() {
        let mut b = TreeBuilder::new();
        assert_eq!(b.finish_node(), Err(BuildError::NoOpenNode));

        b.start_node(SyntaxKind::SourceFile, Span::new(0, 1), NodeData::None)
            .unwrap();
        assert_eq!(b.finish().unwrap_err(), BuildError::Unclosed(1));

        assert_eq!(TreeBuilder::new().finish().unwrap_err(), BuildError::Empty);
    }

    #[test]
    fn test_second_root_rejected() {
        let mut b = TreeBuilder::new();
        b.leaf(SyntaxKind::SourceFile, Span::new(0, 1), NodeData::None)
            .unwrap();
        assert_eq!(
            b.leaf(SyntaxKind::SourceFile, Span::new(0, 1), NodeData::None),
            Err(BuildError::MultipleRoots)
        );
    }

    #[test]
    fn test_check_invariants_detects_overlapping_siblings() {
        let mut b = TreeBuilder::new();
        b.start_node(SyntaxKind::SourceFile, Span::new(0, 10), NodeData::None)
            .unwrap();
        b.leaf(SyntaxKind::Identifier, Span::new(0, 5), NodeData::identifier("a"))
            .unwrap();
        b.leaf(SyntaxKind::Identifier, Span::new(3, 8), NodeData::identifier("b"))
            .unwrap();
        b.finish_node().unwrap();
        let tree = b.finish().unwrap();

        assert!(matches!(
            tree.check_invariants(),
            Err(BuildError::Malformed { .. })
        ));
    }

    #[test]
    fn test_text_slices_source() {
        let tree = alias_tree();
        let alias = tree.children(tree.root())[0];
        assert_eq!(tree.text(alias, "type T = number;"), Some("type T = number;"));
    }

    #[test]
    fn test_serialize_nested() {
        let tree = alias_tree();
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "SourceFile",
                "range": [0, 16],
                "children": [{
                    "type": "TypeAliasDeclaration",
                    "range": [0, 16],
                    "name": "T",
                    "children": [
                        { "type": "Identifier", "range": [5, 6], "name": "T", "children": [] },
                        { "type": "KeywordType", "range": [9, 15], "children": [] }
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_serialize_nested_tree() {
        let depth = 200u32;
        let mut b = TreeBuilder::new();
        for level in 0..depth {
            b.start_node(SyntaxKind::Block, Span::new(level, 2 * depth - level), NodeData::None)
                .unwrap();
        }
        for _ in 0..depth {
            b.finish_node().unwrap();
        }
        let tree = b.finish().unwrap();

        let json = serde_json::to_value(&tree).unwrap();

        let mut node = &json;
        let mut levels = 1;
        while let Some(child) = node["children"].as_array().and_then(|c| c.first()) {
            node = child;
            levels += 1;
        }
        assert_eq!(levels, depth);
        assert_eq!(node["range"], serde_json::json!([depth - 1, depth + 1]));
    }
}
