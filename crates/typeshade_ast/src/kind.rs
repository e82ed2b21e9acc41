//! Syntax categories of the tree.
//!
//! The set is closed: front ends map anything they do not model onto
//! [`SyntaxKind::Unknown`] instead of growing the enum ad hoc, and the enum is
//! deliberately not `#[non_exhaustive]` so matches in downstream crates stay
//! checked by the compiler.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! syntax_kinds {
    ($($(#[$doc:meta])* $variant:ident,)*) => {
        /// Kind tag of a [`SyntaxNode`](crate::SyntaxNode).
        ///
        /// Names follow the TypeScript compiler's `SyntaxKind` vocabulary so
        /// selector queries read the same as they would against `tsc` trees.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "PascalCase")]
        pub enum SyntaxKind {
            $($(#[$doc])* $variant,)*
        }

        impl SyntaxKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [SyntaxKind] = &[$(SyntaxKind::$variant,)*];

            /// Returns the PascalCase name of this kind.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(SyntaxKind::$variant => stringify!($variant),)*
                }
            }
        }

        impl FromStr for SyntaxKind {
            type Err = UnknownKind;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok(SyntaxKind::$variant),)*
                    _ => Err(UnknownKind(s.to_string())),
                }
            }
        }
    };
}

syntax_kinds! {
    // Structure
    /// Root of a parsed file.
    SourceFile,
    /// `import ... from "..."` or `import "..."`.
    ImportDeclaration,
    /// One binding inside an import clause.
    ImportSpecifier,
    /// `export ...` wrapper around a declaration or specifier list.
    ExportDeclaration,
    /// `const a = 1, b = 2;` as a whole.
    VariableStatement,
    /// A single declarator inside a variable statement (`a = 1`).
    VariableDeclaration,
    /// `function f() {}` at statement level.
    FunctionDeclaration,
    /// `function () {}` in expression position.
    FunctionExpression,
    /// `() => ...`.
    ArrowFunction,
    /// `class C {}` at statement level.
    ClassDeclaration,
    /// `class {}` in expression position.
    ClassExpression,
    /// Method inside a class body.
    MethodDeclaration,
    /// Field inside a class body.
    PropertyDeclaration,
    /// Formal parameter of a function.
    Parameter,
    /// `{ ... }` statement list or function body.
    Block,

    // Statements and expressions
    /// `return ...;`.
    ReturnStatement,
    /// `if (...) ... else ...`.
    IfStatement,
    /// Expression used as a statement.
    ExpressionStatement,
    /// `f(...)`.
    CallExpression,
    /// `new C(...)`.
    NewExpression,
    /// `{ a: 1 }`.
    ObjectLiteral,
    /// `[1, 2]`.
    ArrayLiteral,
    /// Any identifier: binding, reference or property name.
    Identifier,
    /// `"text"`.
    StringLiteral,
    /// `42`.
    NumericLiteral,
    /// `true` / `false`.
    BooleanLiteral,
    /// `` `text ${x}` ``.
    TemplateLiteral,

    // Type-level constructs
    /// `interface I {}`.
    InterfaceDeclaration,
    /// `type T = ...;`.
    TypeAliasDeclaration,
    /// `enum E {}`.
    EnumDeclaration,
    /// `namespace N {}` / `declare module "m" {}`.
    ModuleDeclaration,
    /// A named type used in type position (`Foo`, `Array<T>`).
    TypeReference,
    /// `: T` attached to a binding or signature.
    TypeAnnotation,
    /// `{ a: string }` in type position.
    TypeLiteral,
    /// `string`, `number`, `boolean`, `any`, `unknown`, `void`.
    KeywordType,
    /// `T[]`.
    ArrayType,
    /// `A | B`.
    UnionType,
    /// Member of an interface or type literal.
    PropertySignature,

    /// Anything the front end does not model more precisely.
    Unknown,
}

/// Error returned when parsing an unrecognized kind name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown syntax kind: {0}")]
pub struct UnknownKind(pub String);

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
