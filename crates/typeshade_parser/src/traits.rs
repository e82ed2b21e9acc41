//! Parser trait definitions.

use std::future::Future;
use std::sync::Arc;

use typeshade_ast::SyntaxTree;

use crate::{CompilerOptions, ParseError};

/// Trait for parsing source text into a syntax tree.
///
/// This is the parse oracle of the pipelines: everything downstream only
/// sees the [`SyntaxTree`] it returns.
///
/// # Example
///
/// ```rust,ignore
/// use typeshade_parser::{CompilerOptions, ParseError, Parser};
/// use typeshade_ast::SyntaxTree;
///
/// struct MyParser;
///
/// impl Parser for MyParser {
///     fn name(&self) -> &str {
///         "my-parser"
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &["myext"]
///     }
///
///     fn parse(&self, source: &str, options: &CompilerOptions) -> Result<SyntaxTree, ParseError> {
///         todo!()
///     }
/// }
/// ```
pub trait Parser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles.
    ///
    /// Extensions should not include the leading dot (e.g., `["ts", "tsx"]`).
    fn extensions(&self) -> &[&str];

    /// Parses the source text into a tree.
    fn parse(&self, source: &str, options: &CompilerOptions) -> Result<SyntaxTree, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

/// A parse oracle that may suspend while producing the tree.
pub trait AsyncParser {
    /// Parses `source`, resolving once the tree is available.
    fn parse_async(
        &self,
        source: Arc<str>,
        options: CompilerOptions,
    ) -> impl Future<Output = Result<SyntaxTree, ParseError>> + Send;
}

/// Runs a synchronous [`Parser`] on tokio's blocking pool.
///
/// Parsing large files is CPU-bound, so it is kept off the async workers.
#[derive(Debug)]
pub struct BlockingParser<P> {
    inner: Arc<P>,
}

impl<P> Clone for BlockingParser<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P> BlockingParser<P>
where
    P: Parser + Send + Sync + 'static,
{
    /// Wraps `parser`.
    pub fn new(parser: P) -> Self {
        Self {
            inner: Arc::new(parser),
        }
    }

    /// Returns the wrapped parser.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P> AsyncParser for BlockingParser<P>
where
    P: Parser + Send + Sync + 'static,
{
    async fn parse_async(
        &self,
        source: Arc<str>,
        options: CompilerOptions,
    ) -> Result<SyntaxTree, ParseError> {
        let parser = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || parser.parse(&source, &options))
            .await
            .map_err(|e| ParseError::internal(format!("Parse task failed: {}", e)))?
    }
}
