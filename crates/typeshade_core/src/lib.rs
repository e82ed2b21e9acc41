//! # typeshade_core
//!
//! Pipelines built on top of a parsed [`SyntaxTree`](typeshade_ast::SyntaxTree).
//!
//! This crate provides:
//! - Erasure classification: which nodes vanish when TypeScript is lowered
//! - Offset to line/column translation and annotation overlays
//! - Highlight sessions that keep only the latest run's overlay visible
//! - Selector queries, program inspection and identifier-rename transforms
//! - Configuration loading
//!
//! ## Example
//!
//! ```rust
//! use typeshade_core::{HighlightSession, MemorySurface};
//! use typeshade_parser::{CompilerOptions, TypeScriptParser};
//!
//! let session = HighlightSession::new(MemorySurface::new(), "highlight-error");
//! session
//!     .highlight_source(
//!         &TypeScriptParser::new(),
//!         "type T = number;\nconst x = 1;",
//!         &CompilerOptions::default(),
//!     )
//!     .unwrap();
//!
//! let ranges = session.decorations();
//! assert_eq!(ranges.len(), 1);
//! assert_eq!(ranges[0].start.line, 0);
//! ```

pub mod classifier;
mod config;
mod error;
pub mod inspect;
pub mod overlay;
pub mod position;
pub mod query;
pub mod session;
pub mod transform;

pub use classifier::{ErasureRule, classify, collect_erased, is_erased};
pub use config::{CONFIG_FILES, DEFAULT_STYLE, ShadeConfig};
pub use error::CoreError;
pub use inspect::{FunctionInfo, top_level_functions};
pub use overlay::{AnnotationRange, DisplaySurface, MemorySurface, OverlayHandle, OverlayManager};
pub use position::{LineIndex, TextPosition, TextRange, TranslationError, to_range, translate_all};
pub use query::{QueryError, QueryOutcome, QueryPanel, Selector, query};
pub use session::{HighlightSession, RunOutcome, RunSequencer, RunTicket, erasure_ranges};
pub use transform::{
    EditResult, RenameMap, TextEdit, apply_edits, erasure_edits, identifier_edits,
    rename_identifiers, transform_text,
};
