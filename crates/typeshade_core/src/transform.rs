//! Identifier renaming and text emission.
//!
//! Transforms operate on the tree through [`rewrite`]; their effect on the
//! source text is expressed as [`TextEdit`]s so the output keeps the
//! original formatting everywhere nothing changed.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use typeshade_ast::{Fragment, Span, SyntaxKind, SyntaxTree, rewrite};

use crate::classifier::collect_erased;

/// Identifier literals and their replacements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenameMap {
    renames: BTreeMap<String, String>,
}

impl Default for RenameMap {
    fn default() -> Self {
        Self::from_pairs([("babel", "typescript"), ("plugins", "transforms")])
    }
}

impl RenameMap {
    /// Creates a map with no renames.
    pub fn empty() -> Self {
        Self {
            renames: BTreeMap::new(),
        }
    }

    /// Creates a map from `(from, to)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            renames: pairs
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }

    /// Adds or replaces a rename.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.renames.insert(from.into(), to.into());
    }

    /// Returns the replacement for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.renames.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }
}

/// Rewrites every leaf identifier named in `map`.
pub fn rename_identifiers(tree: &SyntaxTree, map: &RenameMap) -> SyntaxTree {
    rewrite(tree, |tree, id| {
        let node = tree.node(id);
        if node.kind != SyntaxKind::Identifier || node.has_children() {
            return None;
        }
        let replacement = map.get(node.name()?)?;
        Some(Fragment::identifier(replacement))
    })
}

/// A replacement of one source span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub span: Span,
    pub text: String,
}

impl TextEdit {
    /// Replaces `span` with `text`.
    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }

    /// Deletes `span`.
    pub fn delete(span: Span) -> Self {
        Self::replace(span, "")
    }
}

/// Edits for the identifiers `rewritten` renamed relative to `original`.
///
/// `rewritten` must keep the shape of `original` (as
/// [`rename_identifiers`] does), so both pre-orders line up node for node.
/// Names are compared rather than source text, so an identifier spelled with
/// escapes is only touched when its name actually changed.
pub fn identifier_edits(original: &SyntaxTree, rewritten: &SyntaxTree) -> Vec<TextEdit> {
    original
        .pre_order(original.root())
        .zip(rewritten.pre_order(rewritten.root()))
        .filter(|&(before, after)| {
            original.kind(before) == SyntaxKind::Identifier
                && rewritten.kind(after) == SyntaxKind::Identifier
        })
        .filter_map(|(before, after)| {
            let name = rewritten.name_of(after)?;
            (original.name_of(before) != Some(name))
                .then(|| TextEdit::replace(original.span(before), name))
        })
        .collect()
}

/// Deletions of every erased node not already inside another erased node.
pub fn erasure_edits(tree: &SyntaxTree) -> Vec<TextEdit> {
    let erased = collect_erased(tree);
    let erased_set: HashSet<_> = erased.iter().copied().collect();
    erased
        .into_iter()
        .filter(|&id| !tree.ancestors(id).any(|a| erased_set.contains(&a)))
        .map(|id| TextEdit::delete(tree.span(id)))
        .collect()
}

/// Result of applying edits to a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    /// Number of edits applied.
    pub applied: usize,
    /// Number of edits dropped as overlapping or out of bounds.
    pub skipped: usize,
    /// The edited text.
    pub text: String,
}

impl EditResult {
    /// Returns true if the text changed.
    pub fn modified(&self) -> bool {
        self.applied > 0
    }
}

/// Applies `edits` to `source`.
///
/// Edits are applied from the end of the text to the beginning so earlier
/// offsets stay valid. When edits overlap, the one starting later wins.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> EditResult {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by(|a, b| {
        b.span
            .start
            .cmp(&a.span.start)
            .then(b.span.end.cmp(&a.span.end))
    });

    let mut text = source.to_string();
    let mut applied = 0;
    let mut skipped = 0;
    // Start of the last applied edit.
    let mut limit = usize::MAX;

    for edit in sorted {
        let start = edit.span.start as usize;
        let end = edit.span.end as usize;

        if start > end
            || end > text.len()
            || !text.is_char_boundary(start)
            || !text.is_char_boundary(end)
        {
            warn!(
                "Invalid edit span: start={}, end={}, content_len={}",
                start,
                end,
                text.len()
            );
            skipped += 1;
            continue;
        }
        if end > limit {
            warn!("Skipping overlapping edit at [{}..{}]", start, end);
            skipped += 1;
            continue;
        }

        debug!("Applying edit: replace [{}..{}] with '{}'", start, end, edit.text);
        text.replace_range(start..end, &edit.text);
        limit = start;
        applied += 1;
    }

    EditResult {
        applied,
        skipped,
        text,
    }
}

/// Emits `source` with the renames of `map` and, if `strip_types` is set,
/// with every erased construct removed.
pub fn transform_text(
    source: &str,
    tree: &SyntaxTree,
    map: &RenameMap,
    strip_types: bool,
) -> EditResult {
    let rewritten = rename_identifiers(tree, map);
    let mut edits = identifier_edits(tree, &rewritten);

    if strip_types {
        let deletions = erasure_edits(tree);
        edits.retain(|edit| !deletions.iter().any(|d| d.span.encloses(&edit.span)));
        edits.extend(deletions);
    }

    apply_edits(source, &edits)
}
