//! Highlight runs against one display surface.
//!
//! A run awaits the parse oracle once and then classifies, translates and
//! replaces the overlay without suspending again. Every run takes a ticket
//! from a [`RunSequencer`]; a run whose ticket is no longer current when it
//! reaches the overlay is dropped, so the last-issued action always wins and
//! [`HighlightSession::clear`] overrides anything still in flight.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::{debug, info};
use typeshade_ast::SyntaxTree;
use typeshade_parser::{AsyncParser, CompilerOptions, ParseError, Parser};

use crate::classifier::collect_erased;
use crate::overlay::{AnnotationRange, DisplaySurface, MemorySurface, OverlayManager};
use crate::position::{LineIndex, translate_all};

/// Hands out run tickets and tells whether a ticket is still the latest.
#[derive(Debug, Default)]
pub struct RunSequencer {
    generation: AtomicU64,
}

/// Proof that a run was started at a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTicket {
    generation: u64,
}

impl RunTicket {
    /// Returns the generation this ticket was issued for.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl RunSequencer {
    /// Creates a sequencer at generation 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a run, superseding every earlier ticket.
    pub fn begin(&self) -> RunTicket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        RunTicket { generation }
    }

    /// Returns true if no run was started or invalidated after `ticket`.
    pub fn is_current(&self, ticket: &RunTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.generation
    }

    /// Supersedes every ticket issued so far.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Returns the current generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

/// How a highlight run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The overlay now shows these ranges.
    Applied(Vec<AnnotationRange>),
    /// A later run or a clear took over; the overlay was not touched.
    Superseded,
}

impl RunOutcome {
    /// Returns true if the run replaced the overlay.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Computes the erasure overlay of `tree` against its source text.
///
/// Nodes whose spans do not fit `source` are skipped.
pub fn erasure_ranges(tree: &SyntaxTree, source: &str, style: &str) -> Vec<AnnotationRange> {
    let erased = collect_erased(tree);
    let index = LineIndex::new(source);
    translate_all(tree, &erased, |offset| index.position_at(offset))
        .into_iter()
        .map(|(_, range)| AnnotationRange::new(range, style))
        .collect()
}

/// Erasure highlighting bound to one display surface.
#[derive(Debug)]
pub struct HighlightSession<S> {
    sequencer: RunSequencer,
    overlay: Mutex<OverlayManager<S>>,
    style: String,
}

impl<S: DisplaySurface> HighlightSession<S> {
    /// Creates a session drawing ranges with `style` on `surface`.
    pub fn new(surface: S, style: impl Into<String>) -> Self {
        Self {
            sequencer: RunSequencer::new(),
            overlay: Mutex::new(OverlayManager::new(surface)),
            style: style.into(),
        }
    }

    /// Runs the highlight pipeline on `source`.
    ///
    /// A parse failure ends the run without touching the overlay.
    pub async fn highlight<P>(
        &self,
        parser: &P,
        source: Arc<str>,
        options: CompilerOptions,
    ) -> Result<RunOutcome, ParseError>
    where
        P: AsyncParser,
    {
        let ticket = self.sequencer.begin();
        debug!(generation = ticket.generation(), "Highlight run started");

        let tree = parser.parse_async(Arc::clone(&source), options).await?;
        if !self.sequencer.is_current(&ticket) {
            return Ok(self.superseded(ticket));
        }

        let ranges = erasure_ranges(&tree, &source, &self.style);
        Ok(self.commit(ticket, ranges))
    }

    /// Synchronous variant of [`highlight`](Self::highlight).
    pub fn highlight_source<P>(
        &self,
        parser: &P,
        source: &str,
        options: &CompilerOptions,
    ) -> Result<RunOutcome, ParseError>
    where
        P: Parser,
    {
        let ticket = self.sequencer.begin();
        let tree = parser.parse(source, options)?;
        let ranges = erasure_ranges(&tree, source, &self.style);
        Ok(self.commit(ticket, ranges))
    }

    /// Empties the overlay and drops the result of any run in flight.
    pub fn clear(&self) {
        self.sequencer.invalidate();
        self.overlay.lock().clear();
        info!("Overlay cleared");
    }

    /// Runs `f` with the overlay locked.
    pub fn with_overlay<R>(&self, f: impl FnOnce(&OverlayManager<S>) -> R) -> R {
        f(&self.overlay.lock())
    }

    /// Returns the run sequencer.
    pub fn sequencer(&self) -> &RunSequencer {
        &self.sequencer
    }

    /// Returns the style tag used for new ranges.
    pub fn style(&self) -> &str {
        &self.style
    }

    fn commit(&self, ticket: RunTicket, ranges: Vec<AnnotationRange>) -> RunOutcome {
        let mut overlay = self.overlay.lock();
        // Checked under the lock so a concurrent clear cannot slip in between.
        if !self.sequencer.is_current(&ticket) {
            return self.superseded(ticket);
        }
        overlay.replace(&ranges);
        debug!(
            generation = ticket.generation(),
            ranges = ranges.len(),
            "Highlight run applied"
        );
        RunOutcome::Applied(ranges)
    }

    fn superseded(&self, ticket: RunTicket) -> RunOutcome {
        debug!(
            generation = ticket.generation(),
            latest = self.sequencer.generation(),
            "Highlight run superseded"
        );
        RunOutcome::Superseded
    }
}

impl HighlightSession<MemorySurface> {
    /// Returns the decorations currently shown.
    pub fn decorations(&self) -> Vec<AnnotationRange> {
        self.overlay.lock().surface().decorations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::TextPosition;
    use pretty_assertions::assert_eq;
    use typeshade_parser::TypeScriptParser;

    #[test]
    fn test_sequencer_latest_ticket_wins() {
        let sequencer = RunSequencer::new();
        let first = sequencer.begin();
        assert!(sequencer.is_current(&first));

        let second = sequencer.begin();
        assert!(!sequencer.is_current(&first));
        assert!(sequencer.is_current(&second));

        sequencer.invalidate();
        assert!(!sequencer.is_current(&second));
        assert_eq!(sequencer.generation(), 3);
    }

    #[test]
    fn test_erasure_ranges_for_type_alias() {
        let source = "type T = number;\nconst x = 1;";
        let tree = TypeScriptParser::new()
            .parse(source, &CompilerOptions::default())
            .unwrap();

        let ranges = erasure_ranges(&tree, source, "highlight-error");

        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].start, TextPosition::new(0, 0));
        assert_eq!(ranges[0].end.line, 0);
        assert!(ranges[0].end.column >= 15);
        assert_eq!(ranges[0].style, "highlight-error");
    }

    #[test]
    fn test_highlight_source_applies_overlay() {
        let session = HighlightSession::new(MemorySurface::new(), "highlight-error");
        let outcome = session
            .highlight_source(
                &TypeScriptParser::new(),
                "interface A {}\nlet n = 1;",
                &CompilerOptions::default(),
            )
            .unwrap();

        assert!(outcome.is_applied());
        assert_eq!(session.decorations().len(), 1);
    }

    #[test]
    fn test_parse_error_leaves_overlay_untouched() {
        let session = HighlightSession::new(MemorySurface::new(), "highlight-error");
        let parser = TypeScriptParser::new();
        let options = CompilerOptions::default();
        session
            .highlight_source(&parser, "type A = string;", &options)
            .unwrap();
        let before = session.decorations();

        let result = session.highlight_source(&parser, "type = ;", &options);

        assert!(result.is_err());
        assert_eq!(session.decorations(), before);
    }

    #[test]
    fn test_clear_empties_overlay() {
        let session = HighlightSession::new(MemorySurface::new(), "highlight-error");
        session
            .highlight_source(
                &TypeScriptParser::new(),
                "type A = string;",
                &CompilerOptions::default(),
            )
            .unwrap();

        session.clear();
        session.clear();

        assert!(session.decorations().is_empty());
        assert!(session.with_overlay(|overlay| overlay.handle().is_empty()));
    }
}
