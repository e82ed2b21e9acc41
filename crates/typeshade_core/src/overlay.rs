//! Annotation overlays on a display surface.
//!
//! A surface shows at most one overlay. Each overlay is identified by an
//! [`OverlayHandle`], which has to be handed back to replace or clear it, so
//! the caller never tracks individual decorations.

use std::collections::BTreeMap;
use std::mem;

use serde::Serialize;
use tracing::debug;

use crate::position::{TextPosition, TextRange};

/// A renderable region with a style tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AnnotationRange {
    pub start: TextPosition,
    pub end: TextPosition,
    pub style: String,
}

impl AnnotationRange {
    /// Creates a styled range from a translated span.
    pub fn new(range: TextRange, style: impl Into<String>) -> Self {
        Self {
            start: range.start,
            end: range.end,
            style: style.into(),
        }
    }
}

/// Identifies the decorations currently displayed by a surface.
///
/// Handles are neither `Clone` nor `Copy`: replacing an overlay consumes the
/// handle of the previous one.
#[derive(Debug, PartialEq, Eq)]
pub struct OverlayHandle {
    ids: Vec<u64>,
}

impl OverlayHandle {
    /// A handle that owns no decorations.
    pub const fn empty() -> Self {
        Self { ids: Vec::new() }
    }

    /// Creates a handle from surface-specific decoration ids.
    pub fn from_ids(ids: Vec<u64>) -> Self {
        Self { ids }
    }

    /// Returns the decoration ids owned by this handle.
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    /// Returns the number of decorations owned by this handle.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the handle owns no decorations.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A display that can swap one decoration set for another.
pub trait DisplaySurface {
    /// Removes the decorations of `prior` and shows `ranges` in a single
    /// step, returning the handle of the new set.
    fn apply_decorations(&mut self, prior: OverlayHandle, ranges: &[AnnotationRange])
    -> OverlayHandle;

    /// Removes the decorations of `handle`.
    fn clear(&mut self, handle: OverlayHandle) -> OverlayHandle {
        self.apply_decorations(handle, &[])
    }
}

/// In-memory decoration table, standing in for an editor model.
#[derive(Debug, Default)]
pub struct MemorySurface {
    next_id: u64,
    live: BTreeMap<u64, AnnotationRange>,
    applied: usize,
}

impl MemorySurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live decorations in document order.
    pub fn decorations(&self) -> Vec<AnnotationRange> {
        let mut ranges: Vec<_> = self.live.values().cloned().collect();
        ranges.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
        ranges
    }

    /// Returns how many times decorations were applied.
    pub fn apply_count(&self) -> usize {
        self.applied
    }
}

impl DisplaySurface for MemorySurface {
    fn apply_decorations(
        &mut self,
        prior: OverlayHandle,
        ranges: &[AnnotationRange],
    ) -> OverlayHandle {
        for id in prior.ids {
            self.live.remove(&id);
        }

        let mut ids = Vec::with_capacity(ranges.len());
        for range in ranges {
            let id = self.next_id;
            self.next_id += 1;
            self.live.insert(id, range.clone());
            ids.push(id);
        }

        self.applied += 1;
        OverlayHandle::from_ids(ids)
    }
}

/// Owns the single live overlay of one surface.
#[derive(Debug)]
pub struct OverlayManager<S> {
    surface: S,
    handle: OverlayHandle,
}

impl<S: DisplaySurface> OverlayManager<S> {
    /// Creates a manager for `surface`, which must not show any overlay yet.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            handle: OverlayHandle::empty(),
        }
    }

    /// Replaces the whole overlay with `ranges`.
    pub fn replace(&mut self, ranges: &[AnnotationRange]) {
        let prior = mem::replace(&mut self.handle, OverlayHandle::empty());
        let removed = prior.len();
        self.handle = self.surface.apply_decorations(prior, ranges);
        debug!(removed, added = self.handle.len(), "Replaced overlay");
    }

    /// Removes every decoration of the current overlay.
    pub fn clear(&mut self) {
        let prior = mem::replace(&mut self.handle, OverlayHandle::empty());
        self.handle = self.surface.clear(prior);
    }

    /// Returns the handle of the live overlay.
    pub fn handle(&self) -> &OverlayHandle {
        &self.handle
    }

    /// Returns the display surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn range(line: u32, start: u32, end: u32) -> AnnotationRange {
        AnnotationRange::new(
            TextRange {
                start: TextPosition::new(line, start),
                end: TextPosition::new(line, end),
            },
            "highlight-error",
        )
    }

    #[test]
    fn test_replace_swaps_whole_set() {
        let mut manager = OverlayManager::new(MemorySurface::new());

        manager.replace(&[range(0, 0, 4), range(1, 2, 3)]);
        assert_eq!(manager.surface().decorations().len(), 2);

        manager.replace(&[range(2, 0, 1)]);
        assert_eq!(manager.surface().decorations(), vec![range(2, 0, 1)]);
        assert_eq!(manager.handle().len(), 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut manager = OverlayManager::new(MemorySurface::new());
        manager.replace(&[range(0, 0, 4)]);

        manager.replace(&[]);
        assert!(manager.surface().decorations().is_empty());
        manager.replace(&[]);
        assert!(manager.surface().decorations().is_empty());

        manager.clear();
        assert!(manager.surface().decorations().is_empty());
        assert!(manager.handle().is_empty());
    }

    #[test]
    fn test_replace_with_identical_ranges_is_equivalent() {
        let mut manager = OverlayManager::new(MemorySurface::new());
        let ranges = vec![range(0, 0, 4), range(0, 6, 9)];

        manager.replace(&ranges);
        let first = manager.surface().decorations();
        let first_ids = manager.handle().ids().to_vec();

        manager.replace(&ranges);
        assert_eq!(manager.surface().decorations(), first);
        assert_ne!(manager.handle().ids(), first_ids.as_slice());
    }

    #[test]
    fn test_replace_is_single_surface_call() {
        let mut manager = OverlayManager::new(MemorySurface::new());
        manager.replace(&[range(0, 0, 1)]);
        manager.replace(&[range(0, 1, 2)]);
        manager.clear();

        assert_eq!(manager.surface().apply_count(), 3);
    }

    #[test]
    fn test_overlapping_ranges_are_not_deduplicated() {
        let mut surface = MemorySurface::new();
        let handle =
            surface.apply_decorations(OverlayHandle::empty(), &[range(0, 0, 5), range(0, 0, 5)]);

        assert_eq!(handle.len(), 2);
        assert_eq!(surface.decorations().len(), 2);
    }

    #[test]
    fn test_decorations_sorted_in_document_order() {
        let mut surface = MemorySurface::new();
        let _handle = surface.apply_decorations(
            OverlayHandle::empty(),
            &[range(3, 0, 1), range(0, 4, 5), range(0, 1, 2)],
        );

        assert_eq!(
            surface.decorations(),
            vec![range(0, 1, 2), range(0, 4, 5), range(3, 0, 1)]
        );
    }
}
