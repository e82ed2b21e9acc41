//! Selector queries over a syntax tree.
//!
//! A small CSS-like language in the style of `tsquery`:
//!
//! ```text
//! selector  := compound (('>' | whitespace) compound)*
//! compound  := (Kind | '*')? attribute*     (at least one part)
//! attribute := '[' name ('=' value)? ']'
//! value     := "..." | '...' | bare-word
//! ```
//!
//! Supported attributes are `name` (declared or identifier name) and
//! `typeOnly` (the import clause flag).

use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;
use tracing::debug;
use typeshade_ast::{NodeId, SyntaxKind, SyntaxTree};

/// A malformed selector.
///
/// The `Display` text is what gets shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Unexpected end of selector")]
    UnexpectedEnd,

    #[error("Unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("Unbalanced bracket at offset {offset}")]
    UnbalancedBracket { offset: usize },

    #[error("Unknown node kind: {0}")]
    UnknownKind(String),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Invalid value '{value}' for attribute {attribute}")]
    InvalidValue { attribute: String, value: String },

    #[error("Empty selector")]
    EmptySelector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Attribute {
    Name(Option<String>),
    TypeOnly(Option<bool>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Compound {
    /// `None` matches any kind.
    kind: Option<SyntaxKind>,
    attributes: Vec<Attribute>,
}

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Compound>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`.
    combinators: Vec<Combinator>,
}

impl Selector {
    /// Parses selector text.
    pub fn parse(text: &str) -> Result<Self, QueryError> {
        SelectorParser::new(text).parse()
    }

    /// Returns every node matching the selector, in walk order.
    ///
    /// One pre-order pass: for each node and compound index it records
    /// whether the selector prefix ending at that compound matches at the
    /// node, and whether it matches at the node or one of its ancestors.
    /// Parents are visited before children, so both answers for the parent
    /// are ready when a child needs them.
    pub fn matches(&self, tree: &SyntaxTree) -> Vec<NodeId> {
        let width = self.compounds.len();
        let last = width - 1;
        let mut here = vec![false; tree.node_count() * width];
        let mut within = vec![false; tree.node_count() * width];
        let mut found = Vec::new();

        for id in tree.pre_order(tree.root()) {
            let parent = tree.parent(id).map(|p| p.index() * width);
            let base = id.index() * width;

            for index in 0..width {
                let joined = index == 0
                    || parent.is_some_and(|p| match self.combinators[index - 1] {
                        Combinator::Child => here[p + index - 1],
                        Combinator::Descendant => within[p + index - 1],
                    });
                let matched = joined && self.compounds[index].matches(tree, id);
                here[base + index] = matched;
                within[base + index] = matched || parent.is_some_and(|p| within[p + index]);
            }

            if here[base + last] {
                found.push(id);
            }
        }
        found
    }
}

impl Compound {
    fn matches(&self, tree: &SyntaxTree, id: NodeId) -> bool {
        let node = tree.node(id);
        if self.kind.is_some_and(|kind| kind != node.kind) {
            return false;
        }
        self.attributes.iter().all(|attribute| match attribute {
            Attribute::Name(None) => node.name().is_some(),
            Attribute::Name(Some(expected)) => node.name() == Some(expected.as_str()),
            Attribute::TypeOnly(expected) => {
                let flag = node.data.import_clause().map(|clause| clause.type_only);
                match expected {
                    None => flag == Some(true),
                    Some(expected) => flag == Some(*expected),
                }
            }
        })
    }
}

/// Runs `text` against `tree`.
pub fn query(tree: &SyntaxTree, text: &str) -> Result<Vec<NodeId>, QueryError> {
    let selector = Selector::parse(text)?;
    let matches = selector.matches(tree);
    debug!(selector = text, matches = matches.len(), "Query finished");
    Ok(matches)
}

struct SelectorParser<'s> {
    text: &'s str,
    chars: Peekable<CharIndices<'s>>,
}

impl<'s> SelectorParser<'s> {
    fn new(text: &'s str) -> Self {
        Self {
            text,
            chars: text.char_indices().peekable(),
        }
    }

    fn parse(mut self) -> Result<Selector, QueryError> {
        self.skip_whitespace();
        if self.chars.peek().is_none() {
            return Err(QueryError::EmptySelector);
        }

        let mut compounds = vec![self.compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.chars.peek().copied() {
                None => break,
                Some((_, '>')) => {
                    self.chars.next();
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some((offset, ']')) => return Err(QueryError::UnbalancedBracket { offset }),
                Some(_) if had_whitespace => Combinator::Descendant,
                Some((offset, ch)) => return Err(QueryError::UnexpectedChar { ch, offset }),
            };
            combinators.push(combinator);
            compounds.push(self.compound()?);
        }

        Ok(Selector {
            compounds,
            combinators,
        })
    }

    fn compound(&mut self) -> Result<Compound, QueryError> {
        let kind = match self.chars.peek().copied() {
            None => return Err(QueryError::UnexpectedEnd),
            Some((_, '*')) => {
                self.chars.next();
                None
            }
            Some((_, '[')) => None,
            Some((_, ch)) if is_word_start(ch) => {
                let word = self.word();
                Some(
                    word.parse::<SyntaxKind>()
                        .map_err(|_| QueryError::UnknownKind(word.to_string()))?,
                )
            }
            Some((offset, ']')) => return Err(QueryError::UnbalancedBracket { offset }),
            Some((offset, ch)) => return Err(QueryError::UnexpectedChar { ch, offset }),
        };

        let mut attributes = Vec::new();
        while let Some(&(open, '[')) = self.chars.peek() {
            self.chars.next();
            attributes.push(self.attribute(open)?);
        }

        Ok(Compound { kind, attributes })
    }

    fn attribute(&mut self, open: usize) -> Result<Attribute, QueryError> {
        self.skip_whitespace();
        let name = match self.chars.peek().copied() {
            None => return Err(QueryError::UnbalancedBracket { offset: open }),
            Some((_, ch)) if is_word_start(ch) => self.word(),
            Some((offset, ch)) => return Err(QueryError::UnexpectedChar { ch, offset }),
        };
        self.skip_whitespace();

        let value = if let Some(&(_, '=')) = self.chars.peek() {
            self.chars.next();
            self.skip_whitespace();
            let value = self.value(open)?;
            self.skip_whitespace();
            Some(value)
        } else {
            None
        };

        match self.chars.next() {
            Some((_, ']')) => {}
            Some((offset, ch)) => return Err(QueryError::UnexpectedChar { ch, offset }),
            None => return Err(QueryError::UnbalancedBracket { offset: open }),
        }

        match name {
            "name" => Ok(Attribute::Name(value)),
            "typeOnly" => match value.as_deref() {
                None => Ok(Attribute::TypeOnly(None)),
                Some("true") => Ok(Attribute::TypeOnly(Some(true))),
                Some("false") => Ok(Attribute::TypeOnly(Some(false))),
                Some(other) => Err(QueryError::InvalidValue {
                    attribute: name.to_string(),
                    value: other.to_string(),
                }),
            },
            other => Err(QueryError::UnknownAttribute(other.to_string())),
        }
    }

    fn value(&mut self, open: usize) -> Result<String, QueryError> {
        match self.chars.peek().copied() {
            None => Err(QueryError::UnbalancedBracket { offset: open }),
            Some((_, quote @ ('"' | '\''))) => {
                self.chars.next();
                let mut value = String::new();
                for (_, ch) in self.chars.by_ref() {
                    if ch == quote {
                        return Ok(value);
                    }
                    value.push(ch);
                }
                Err(QueryError::UnexpectedEnd)
            }
            Some((offset, ch)) if ch == ']' || ch.is_whitespace() => {
                Err(QueryError::UnexpectedChar { ch, offset })
            }
            Some((start, _)) => {
                let mut end = self.text.len();
                while let Some(&(offset, ch)) = self.chars.peek() {
                    if ch == ']' || ch.is_whitespace() {
                        end = offset;
                        break;
                    }
                    self.chars.next();
                }
                Ok(self.text[start..end].to_string())
            }
        }
    }

    fn word(&mut self) -> &'s str {
        let start = self.chars.peek().map_or(self.text.len(), |&(i, _)| i);
        let mut end = self.text.len();
        while let Some(&(offset, ch)) = self.chars.peek() {
            if !is_word_char(ch) {
                end = offset;
                break;
            }
            self.chars.next();
        }
        &self.text[start..end]
    }

    /// Returns true if any whitespace was skipped.
    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while self.chars.next_if(|&(_, ch)| ch.is_whitespace()).is_some() {
            skipped = true;
        }
        skipped
    }
}

fn is_word_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

/// Outcome of a query submitted through a [`QueryPanel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The selector ran; matches are in walk order.
    Matched(Vec<NodeId>),
    /// The selector was rejected.
    Failed { message: String },
}

impl QueryOutcome {
    /// One-line summary for display.
    pub fn summary(&self) -> String {
        match self {
            Self::Matched(ids) => format!("Got {} result(s)", ids.len()),
            Self::Failed { message } => format!("Query failed\n{}", message),
        }
    }
}

/// Boundary between user-typed selectors and the query engine.
///
/// Every submission replaces the previous outcome, and a rejected selector
/// is reported as [`QueryOutcome::Failed`] instead of an error.
#[derive(Debug, Default)]
pub struct QueryPanel {
    outcome: Option<QueryOutcome>,
}

impl QueryPanel {
    /// Creates an empty panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `text` against `tree` and records the outcome.
    pub fn submit(&mut self, tree: &SyntaxTree, text: &str) -> &QueryOutcome {
        let outcome = match query(tree, text) {
            Ok(ids) => QueryOutcome::Matched(ids),
            Err(e) => {
                debug!(selector = text, "Query rejected: {}", e);
                QueryOutcome::Failed {
                    message: e.to_string(),
                }
            }
        };
        self.outcome.insert(outcome)
    }

    /// Returns the outcome of the last submission.
    pub fn outcome(&self) -> Option<&QueryOutcome> {
        self.outcome.as_ref()
    }
}
