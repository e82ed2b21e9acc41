//! TypeScript parser using oxc (oxc-project/oxc).
//!
//! The oxc AST is lowered into a [`SyntaxTree`] by listening to the
//! `enter_node`/`leave_node` hooks of [`oxc_ast_visit::Visit`], so the arena
//! mirrors oxc's traversal order. Node kinds typeshade does not model are
//! kept as [`SyntaxKind::Unknown`] to preserve the shape of the tree.

use oxc_allocator::Allocator;
use oxc_ast::AstKind;
use oxc_ast::ast::{ClassType, FunctionType, TSModuleDeclarationName, TSTypeName};
use oxc_ast_visit::Visit;
use oxc_span::{GetSpan, SourceType};
use tracing::debug;
use typeshade_ast::{BuildError, NodeData, NodeId, Span, SyntaxKind, SyntaxTree, TreeBuilder};

use crate::{CompilerOptions, Language, ParseError, Parser};

/// TypeScript and JavaScript parser implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptParser;

impl TypeScriptParser {
    /// Creates a new TypeScript parser.
    pub fn new() -> Self {
        Self
    }

    fn source_type(language: Language) -> SourceType {
        match language {
            Language::Ts => SourceType::ts(),
            Language::Tsx => SourceType::tsx(),
            Language::Js => SourceType::mjs(),
            Language::Jsx => SourceType::jsx(),
        }
    }
}

impl Parser for TypeScriptParser {
    fn name(&self) -> &str {
        "typescript"
    }

    fn extensions(&self) -> &[&str] {
        &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"]
    }

    fn parse(&self, source: &str, options: &CompilerOptions) -> Result<SyntaxTree, ParseError> {
        let allocator = Allocator::default();
        let source_type = Self::source_type(options.language);
        let ret = oxc_parser::Parser::new(&allocator, source, source_type).parse();

        if let Some(first) = ret.errors.first() {
            debug!(errors = ret.errors.len(), "Source rejected by parser");
            let offset = first
                .labels
                .as_ref()
                .and_then(|labels| labels.first())
                .map(|label| label.offset());
            return Err(match offset {
                Some(offset) => ParseError::invalid_source_at(first.to_string(), offset),
                None => ParseError::invalid_source(first.to_string()),
            });
        }
        if ret.panicked {
            return Err(ParseError::invalid_source("parser aborted"));
        }

        let mut lowering = Lowering::default();
        lowering.visit_program(&ret.program);
        let tree = lowering.finish().map_err(|e| ParseError::internal(e.to_string()))?;

        debug!(nodes = tree.node_count(), language = ?options.language, "Parsed source");
        Ok(tree)
    }
}

/// Drives a [`TreeBuilder`] from oxc's traversal hooks.
#[derive(Default)]
struct Lowering {
    builder: TreeBuilder,
    open: Vec<NodeId>,
    error: Option<BuildError>,
}

impl Lowering {
    fn finish(self) -> Result<SyntaxTree, BuildError> {
        match self.error {
            Some(err) => Err(err),
            None => self.builder.finish(),
        }
    }

    /// Records `annotation` on the declarator that directly owns it.
    ///
    /// Annotations nested deeper, such as the return type of a function type
    /// in the initializer, belong to other nodes and are left alone.
    fn attach_annotation(&mut self, annotation: NodeId) {
        let Some(&owner) = self.open.last() else {
            return;
        };
        if self.builder.kind_of(owner) != Some(SyntaxKind::VariableDeclaration) {
            return;
        }
        if let Some(NodeData::Variable { type_annotation }) = self.builder.data_mut(owner) {
            type_annotation.get_or_insert(annotation);
        }
    }
}

impl<'a> Visit<'a> for Lowering {
    fn enter_node(&mut self, kind: AstKind<'a>) {
        if self.error.is_some() {
            return;
        }

        let (syntax_kind, data) = lower(kind);
        let span = kind.span();
        match self
            .builder
            .start_node(syntax_kind, Span::new(span.start, span.end), data)
        {
            Ok(id) => {
                if syntax_kind == SyntaxKind::TypeAnnotation {
                    self.attach_annotation(id);
                }
                self.open.push(id);
            }
            Err(err) => self.error = Some(err),
        }
    }

    fn leave_node(&mut self, _kind: AstKind<'a>) {
        if self.error.is_some() {
            return;
        }

        match self.builder.finish_node() {
            Ok(_) => {
                self.open.pop();
            }
            Err(err) => self.error = Some(err),
        }
    }
}

/// Maps one oxc node onto a typeshade kind and its payload.
fn lower(kind: AstKind<'_>) -> (SyntaxKind, NodeData) {
    match kind {
        AstKind::Program(_) => (SyntaxKind::SourceFile, NodeData::None),

        AstKind::ImportDeclaration(decl) => {
            let data = if decl.specifiers.is_none() {
                NodeData::side_effect_import()
            } else {
                NodeData::import(decl.import_kind.is_type())
            };
            (SyntaxKind::ImportDeclaration, data)
        }
        AstKind::ImportSpecifier(_)
        | AstKind::ImportDefaultSpecifier(_)
        | AstKind::ImportNamespaceSpecifier(_) => (SyntaxKind::ImportSpecifier, NodeData::None),
        AstKind::ExportNamedDeclaration(_)
        | AstKind::ExportDefaultDeclaration(_)
        | AstKind::ExportAllDeclaration(_) => (SyntaxKind::ExportDeclaration, NodeData::None),

        AstKind::VariableDeclaration(_) => (SyntaxKind::VariableStatement, NodeData::None),
        AstKind::VariableDeclarator(_) => (
            SyntaxKind::VariableDeclaration,
            NodeData::Variable {
                type_annotation: None,
            },
        ),

        AstKind::Function(func) => {
            let syntax_kind = match func.r#type {
                FunctionType::FunctionDeclaration | FunctionType::TSDeclareFunction => {
                    SyntaxKind::FunctionDeclaration
                }
                _ => SyntaxKind::FunctionExpression,
            };
            let name = func.id.as_ref().map(|id| id.name.as_str());
            (syntax_kind, NodeData::named(name))
        }
        AstKind::ArrowFunctionExpression(_) => (SyntaxKind::ArrowFunction, NodeData::None),
        AstKind::Class(class) => {
            let syntax_kind = match class.r#type {
                ClassType::ClassDeclaration => SyntaxKind::ClassDeclaration,
                ClassType::ClassExpression => SyntaxKind::ClassExpression,
            };
            let name = class.id.as_ref().map(|id| id.name.as_str());
            (syntax_kind, NodeData::named(name))
        }
        AstKind::MethodDefinition(_) => (SyntaxKind::MethodDeclaration, NodeData::None),
        AstKind::PropertyDefinition(_) => (SyntaxKind::PropertyDeclaration, NodeData::None),
        AstKind::FormalParameter(_) => (SyntaxKind::Parameter, NodeData::None),

        AstKind::BlockStatement(_) | AstKind::FunctionBody(_) => {
            (SyntaxKind::Block, NodeData::None)
        }
        AstKind::ReturnStatement(_) => (SyntaxKind::ReturnStatement, NodeData::None),
        AstKind::IfStatement(_) => (SyntaxKind::IfStatement, NodeData::None),
        AstKind::ExpressionStatement(_) => (SyntaxKind::ExpressionStatement, NodeData::None),

        AstKind::CallExpression(_) => (SyntaxKind::CallExpression, NodeData::None),
        AstKind::NewExpression(_) => (SyntaxKind::NewExpression, NodeData::None),
        AstKind::ObjectExpression(_) => (SyntaxKind::ObjectLiteral, NodeData::None),
        AstKind::ArrayExpression(_) => (SyntaxKind::ArrayLiteral, NodeData::None),

        AstKind::IdentifierReference(ident) => {
            (SyntaxKind::Identifier, NodeData::identifier(ident.name.as_str()))
        }
        AstKind::BindingIdentifier(ident) => {
            (SyntaxKind::Identifier, NodeData::identifier(ident.name.as_str()))
        }
        AstKind::IdentifierName(ident) => {
            (SyntaxKind::Identifier, NodeData::identifier(ident.name.as_str()))
        }

        AstKind::StringLiteral(_) => (SyntaxKind::StringLiteral, NodeData::None),
        AstKind::NumericLiteral(_) => (SyntaxKind::NumericLiteral, NodeData::None),
        AstKind::BooleanLiteral(_) => (SyntaxKind::BooleanLiteral, NodeData::None),
        AstKind::TemplateLiteral(_) => (SyntaxKind::TemplateLiteral, NodeData::None),

        AstKind::TSInterfaceDeclaration(decl) => (
            SyntaxKind::InterfaceDeclaration,
            NodeData::named(Some(decl.id.name.as_str())),
        ),
        AstKind::TSTypeAliasDeclaration(decl) => (
            SyntaxKind::TypeAliasDeclaration,
            NodeData::named(Some(decl.id.name.as_str())),
        ),
        AstKind::TSEnumDeclaration(decl) => (
            SyntaxKind::EnumDeclaration,
            NodeData::named(Some(decl.id.name.as_str())),
        ),
        AstKind::TSModuleDeclaration(decl) => {
            let name = match &decl.id {
                TSModuleDeclarationName::Identifier(id) => id.name.as_str(),
                TSModuleDeclarationName::StringLiteral(lit) => lit.value.as_str(),
            };
            (SyntaxKind::ModuleDeclaration, NodeData::named(Some(name)))
        }

        AstKind::TSTypeReference(reference) => {
            let name = match &reference.type_name {
                TSTypeName::IdentifierReference(id) => Some(id.name.as_str()),
                _ => None,
            };
            (SyntaxKind::TypeReference, NodeData::named(name))
        }
        AstKind::TSTypeAnnotation(_) => (SyntaxKind::TypeAnnotation, NodeData::None),
        AstKind::TSTypeLiteral(_) => (SyntaxKind::TypeLiteral, NodeData::None),
        AstKind::TSStringKeyword(_)
        | AstKind::TSNumberKeyword(_)
        | AstKind::TSBooleanKeyword(_)
        | AstKind::TSAnyKeyword(_)
        | AstKind::TSUnknownKeyword(_)
        | AstKind::TSVoidKeyword(_) => (SyntaxKind::KeywordType, NodeData::None),
        AstKind::TSArrayType(_) => (SyntaxKind::ArrayType, NodeData::None),
        AstKind::TSUnionType(_) => (SyntaxKind::UnionType, NodeData::None),
        AstKind::TSPropertySignature(_) => (SyntaxKind::PropertySignature, NodeData::None),

        _ => (SyntaxKind::Unknown, NodeData::None),
    }
}
