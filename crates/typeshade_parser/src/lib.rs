//! # typeshade_parser
//!
//! Parser abstraction layer for typeshade.
//!
//! This crate provides:
//! - A `Parser` trait: the parse oracle that turns source text into a
//!   [`SyntaxTree`](typeshade_ast::SyntaxTree)
//! - A built-in TypeScript/JavaScript parser backed by `oxc_parser`
//! - `AsyncParser` and `BlockingParser` for calling a parser from async code
//!
//! ## Example
//!
//! ```rust
//! use typeshade_parser::{CompilerOptions, Parser, TypeScriptParser};
//!
//! let parser = TypeScriptParser::new();
//! let tree = parser
//!     .parse("type T = number;", &CompilerOptions::default())
//!     .unwrap();
//! assert!(tree.node_count() > 1);
//! ```

mod error;
mod options;
mod traits;
mod typescript;

pub use error::ParseError;
pub use options::{CompilerOptions, Language};
pub use traits::{AsyncParser, BlockingParser, Parser};
pub use typescript::TypeScriptParser;
