// type_spelling.rs
//
// Resolves written type spellings against the built-in declarations:
//
//   type := ['const'] name ['<' arg (',' arg)* '>'] ['&']
//   name := ident ['::' ident]
//   arg  := integer | type
//
// Missing trailing template arguments take the parameter defaults.
// Nesting deeper than MAX_NESTING_DEPTH is rejected.

use lumen_identity::{ScalarType, TemplateId};
use miette::SourceSpan;

use crate::builtins::BuiltinDecls;
use crate::compilation_db::CompilationDb;
use crate::decl_defs::{DeclContext, TemplateParamKind};
use crate::errors::SemanticError;
use crate::type_arena::{TemplateArg, TemplateArgVec, TypeId};

/// Deepest template-argument nesting a spelling may use.
pub const MAX_NESTING_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind<'src> {
    Ident(&'src str),
    Integer(u64),
    Less,
    Greater,
    Comma,
    Amp,
    ColonColon,
    Eof,
}

impl TokenKind<'_> {
    fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("'{name}'"),
            TokenKind::Integer(value) => format!("'{value}'"),
            TokenKind::Less => "'<'".to_string(),
            TokenKind::Greater => "'>'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Amp => "'&'".to_string(),
            TokenKind::ColonColon => "'::'".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Token<'src> {
    kind: TokenKind<'src>,
    span: SourceSpan,
}

fn tokenize(text: &str) -> Result<Vec<Token<'_>>, SemanticError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let start = pos;
        let byte = bytes[pos];
        let kind = match byte {
            b' ' | b'\t' | b'\n' | b'\r' => {
                pos += 1;
                continue;
            }
            b'<' => TokenKind::Less,
            b'>' => TokenKind::Greater,
            b',' => TokenKind::Comma,
            b'&' => TokenKind::Amp,
            b':' if bytes.get(pos + 1) == Some(&b':') => {
                pos += 1;
                TokenKind::ColonColon
            }
            b'0'..=b'9' => {
                while pos + 1 < bytes.len() && bytes[pos + 1].is_ascii_digit() {
                    pos += 1;
                }
                let digits = &text[start..=pos];
                let value = digits
                    .parse::<u64>()
                    .map_err(|_| SemanticError::InvalidInteger {
                        span: (start, digits.len()).into(),
                    })?;
                TokenKind::Integer(value)
            }
            b'_' | b'a'..=b'z' | b'A'..=b'Z' => {
                while pos + 1 < bytes.len()
                    && (bytes[pos + 1].is_ascii_alphanumeric() || bytes[pos + 1] == b'_')
                {
                    pos += 1;
                }
                TokenKind::Ident(&text[start..=pos])
            }
            _ => {
                let ch = text[start..].chars().next().unwrap_or('\0');
                return Err(SemanticError::UnexpectedCharacter {
                    ch,
                    span: (start, ch.len_utf8()).into(),
                });
            }
        };
        pos += 1;
        tokens.push(Token {
            kind,
            span: (start, pos - start).into(),
        });
    }
    tokens.push(Token {
        kind: TokenKind::Eof,
        span: (text.len(), 0).into(),
    });
    Ok(tokens)
}

/// Resolve a type spelling such as `const float3&`, `matrix<int, 2>` or
/// `std::is_same<float, float>` to a type.
pub fn resolve_type_spelling(
    db: &mut CompilationDb,
    builtins: &mut BuiltinDecls,
    text: &str,
) -> Result<TypeId, SemanticError> {
    let tokens = tokenize(text)?;
    let mut resolver = SpellingResolver {
        db,
        builtins,
        tokens,
        pos: 0,
        depth: 0,
    };
    let ty = resolver.parse_type()?;
    resolver.expect_eof()?;
    tracing::trace!(text, ty = ty.index(), "resolved type spelling");
    Ok(ty)
}

enum ResolvedName {
    Type(TypeId),
    Template(TemplateId),
}

/// A parsed template argument with its span
enum WrittenArg {
    Type(TypeId, SourceSpan),
    Value(u64, SourceSpan),
}

struct SpellingResolver<'a, 'src> {
    db: &'a mut CompilationDb,
    builtins: &'a mut BuiltinDecls,
    tokens: Vec<Token<'src>>,
    pos: usize,
    depth: usize,
}

impl<'src> SpellingResolver<'_, 'src> {
    fn peek(&self) -> Token<'src> {
        self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token<'src> {
        let token = self.tokens[self.pos];
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind<'src>) -> bool {
        if self.peek().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn unexpected(&self, expected: &str) -> SemanticError {
        let token = self.peek();
        SemanticError::UnexpectedToken {
            expected: expected.to_string(),
            found: token.kind.describe(),
            span: token.span,
        }
    }

    fn expect_eof(&self) -> Result<(), SemanticError> {
        match self.peek().kind {
            TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected("end of input")),
        }
    }

    fn expect_ident(&mut self) -> Result<(&'src str, SourceSpan), SemanticError> {
        match self.peek().kind {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok((name, span))
            }
            _ => Err(self.unexpected("a type name")),
        }
    }

    fn parse_type(&mut self) -> Result<TypeId, SemanticError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(SemanticError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                span: self.peek().span,
            });
        }
        self.depth += 1;
        let result = self.parse_type_inner();
        self.depth -= 1;
        result
    }

    fn parse_type_inner(&mut self) -> Result<TypeId, SemanticError> {
        let is_const = self.eat(TokenKind::Ident("const"));
        let (name, name_span) = self.parse_name()?;
        let resolved = self.resolve_name(&name, name_span)?;

        let mut ty = match resolved {
            ResolvedName::Type(ty) => {
                if self.peek().kind == TokenKind::Less {
                    return Err(SemanticError::NotATemplate {
                        name,
                        span: self.peek().span,
                    });
                }
                ty
            }
            ResolvedName::Template(template) => {
                let (written, end) = if self.peek().kind == TokenKind::Less {
                    self.parse_arg_list()?
                } else {
                    (Vec::new(), self.peek().span)
                };
                self.specialize(template, &name, written, end)?
            }
        };

        if is_const {
            ty = self.db.types.const_qualified(ty);
        }
        if self.eat(TokenKind::Amp) {
            ty = self.db.types.lvalue_reference(ty);
        }
        Ok(ty)
    }

    /// `ident` or `ident::ident`, joined back into one spelling
    fn parse_name(&mut self) -> Result<(String, SourceSpan), SemanticError> {
        let (first, span) = self.expect_ident()?;
        if !self.eat(TokenKind::ColonColon) {
            return Ok((first.to_string(), span));
        }
        let (second, second_span) = self.expect_ident()?;
        let start = span.offset();
        let end = second_span.offset() + second_span.len();
        Ok((format!("{first}::{second}"), (start, end - start).into()))
    }

    /// `'<' arg (',' arg)* '>'`; returns the arguments and the span of `>`
    fn parse_arg_list(&mut self) -> Result<(Vec<WrittenArg>, SourceSpan), SemanticError> {
        self.advance();
        let mut args = Vec::new();
        loop {
            let token = self.peek();
            let arg = match token.kind {
                TokenKind::Integer(value) => {
                    self.advance();
                    WrittenArg::Value(value, token.span)
                }
                _ => {
                    let ty = self.parse_type()?;
                    let end = self.tokens[self.pos - 1].span;
                    let len = end.offset() + end.len() - token.span.offset();
                    WrittenArg::Type(ty, (token.span.offset(), len).into())
                }
            };
            args.push(arg);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        let close = self.peek();
        if close.kind != TokenKind::Greater {
            return Err(self.unexpected("',' or '>'"));
        }
        self.advance();
        Ok((args, close.span))
    }

    fn resolve_name(&mut self, name: &str, span: SourceSpan) -> Result<ResolvedName, SemanticError> {
        let unknown = || SemanticError::UnknownType {
            name: name.to_string(),
            span,
        };

        if let Some((namespace, member)) = name.split_once("::") {
            let ns = self.db.ident(namespace);
            let member = self.db.ident(member);
            let ns = self
                .db
                .decls
                .lookup_namespace(DeclContext::TranslationUnit, ns)
                .ok_or_else(unknown)?;
            let scope = DeclContext::Namespace(ns);
            if let Some(template) = self.db.decls.lookup_template(scope, member) {
                return Ok(ResolvedName::Template(template));
            }
            let record = self
                .db
                .decls
                .lookup_record(scope, member)
                .ok_or_else(unknown)?;
            return Ok(ResolvedName::Type(self.db.record_type(record)));
        }

        if name == "void" {
            return Ok(ResolvedName::Type(TypeId::VOID));
        }
        if let Some(scalar) = ScalarType::valid().find(|scalar| scalar.as_str() == name) {
            return Ok(ResolvedName::Type(TypeId::scalar(scalar)));
        }
        if let Some(alias) = self.builtins.resolve_shorthand(self.db, name) {
            return Ok(ResolvedName::Type(self.db.decls.alias(alias).type_id));
        }

        let symbol = self.db.ident(name);
        let scope = DeclContext::TranslationUnit;
        if let Some(template) = self.db.decls.lookup_template(scope, symbol) {
            return Ok(ResolvedName::Template(template));
        }
        if let Some(record) = self.db.decls.lookup_record(scope, symbol) {
            return Ok(ResolvedName::Type(self.db.record_type(record)));
        }
        if let Some(alias) = self.db.decls.lookup_alias(scope, symbol) {
            return Ok(ResolvedName::Type(self.db.decls.alias(alias).type_id));
        }
        Err(unknown())
    }

    /// Match written arguments to the template's parameters, filling
    /// trailing parameters from their defaults.
    fn specialize(
        &mut self,
        template: TemplateId,
        name: &str,
        written: Vec<WrittenArg>,
        end: SourceSpan,
    ) -> Result<TypeId, SemanticError> {
        let params: Vec<_> = self
            .db
            .decls
            .template_params(template)
            .into_iter()
            .map(|param| (param.name, param.kind))
            .collect();

        if written.len() > params.len() {
            let span = match &written[params.len()] {
                WrittenArg::Type(_, span) | WrittenArg::Value(_, span) => *span,
            };
            return Err(SemanticError::TooManyTemplateArgs {
                name: name.to_string(),
                expected: params.len(),
                found: written.len(),
                span,
            });
        }

        let mut written = written.into_iter();
        let mut args = TemplateArgVec::new();
        for (param_name, kind) in params {
            let param = || self.db.name(param_name).to_string();
            let arg = match (kind, written.next()) {
                (TemplateParamKind::Type { .. }, Some(WrittenArg::Type(ty, _))) => {
                    TemplateArg::Type(ty)
                }
                (TemplateParamKind::NonType { .. }, Some(WrittenArg::Value(value, _))) => {
                    TemplateArg::Integral(value)
                }
                (TemplateParamKind::Type { .. }, Some(WrittenArg::Value(_, span))) => {
                    return Err(SemanticError::ExpectedTypeArg {
                        param: param(),
                        span,
                    });
                }
                (TemplateParamKind::NonType { .. }, Some(WrittenArg::Type(_, span))) => {
                    return Err(SemanticError::ExpectedValueArg {
                        param: param(),
                        span,
                    });
                }
                (TemplateParamKind::Type { default: Some(ty) }, None) => TemplateArg::Type(ty),
                (
                    TemplateParamKind::NonType {
                        default: Some(expr),
                        ..
                    },
                    None,
                ) => TemplateArg::Expr(expr),
                (_, None) => {
                    return Err(SemanticError::MissingTemplateArg {
                        name: name.to_string(),
                        param: param(),
                        span: end,
                    });
                }
            };
            args.push(self.db.types.canonical_arg(arg, &self.db.exprs));
        }
        Ok(self.db.types.specialization(template, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::{BuiltinOptions, install_builtins};
    use crate::type_display::display_type;

    fn setup() -> (CompilationDb, BuiltinDecls) {
        let mut db = CompilationDb::new();
        let builtins = install_builtins(&mut db, &BuiltinOptions::default());
        (db, builtins)
    }

    fn resolve(db: &mut CompilationDb, builtins: &mut BuiltinDecls, text: &str) -> String {
        let ty = resolve_type_spelling(db, builtins, text).unwrap();
        display_type(db, ty)
    }

    #[test]
    fn scalars_and_qualifiers() {
        let (mut db, mut builtins) = setup();
        assert_eq!(resolve(&mut db, &mut builtins, "float"), "float");
        assert_eq!(resolve(&mut db, &mut builtins, "const uint&"), "const uint&");
        assert_eq!(resolve(&mut db, &mut builtins, "int64_t"), "int64_t");
    }

    #[test]
    fn shorthand_resolves_to_alias() {
        let (mut db, mut builtins) = setup();
        let alias = resolve_type_spelling(&mut db, &mut builtins, "float3").unwrap();
        let explicit = resolve_type_spelling(&mut db, &mut builtins, "vector<float, 3>").unwrap();
        assert_eq!(display_type(&db, alias), "float3");
        assert!(db.same_type(alias, explicit));
        assert_eq!(builtins.shorthand_count(), 1);
    }

    #[test]
    fn template_defaults_fill_trailing_args() {
        let (mut db, mut builtins) = setup();
        assert_eq!(resolve(&mut db, &mut builtins, "vector"), "vector<float, 4>");
        assert_eq!(
            resolve(&mut db, &mut builtins, "matrix<int, 2>"),
            "matrix<int, 2, 4>"
        );
        let buffer = resolve(&mut db, &mut builtins, "Buffer");
        assert_eq!(buffer, "Buffer<vector<float, 4>>");
    }

    #[test]
    fn missing_argument_without_default() {
        let (mut db, mut builtins) = setup();
        let err = resolve_type_spelling(&mut db, &mut builtins, "StructuredBuffer").unwrap_err();
        assert!(matches!(err, SemanticError::MissingTemplateArg { .. }));
    }

    #[test]
    fn std_names() {
        let (mut db, mut builtins) = setup();
        assert_eq!(
            resolve(&mut db, &mut builtins, "std::is_same<float, const float>"),
            "is_same<float, const float>"
        );
        assert_eq!(resolve(&mut db, &mut builtins, "std::true_type"), "true_type");
    }

    #[test]
    fn argument_kind_errors() {
        let (mut db, mut builtins) = setup();
        let err = resolve_type_spelling(&mut db, &mut builtins, "vector<3>").unwrap_err();
        assert!(matches!(err, SemanticError::ExpectedTypeArg { .. }));
        let err = resolve_type_spelling(&mut db, &mut builtins, "vector<float, int>").unwrap_err();
        assert!(matches!(err, SemanticError::ExpectedValueArg { .. }));
        let err =
            resolve_type_spelling(&mut db, &mut builtins, "vector<float, 2, 2>").unwrap_err();
        assert!(matches!(
            err,
            SemanticError::TooManyTemplateArgs {
                expected: 2,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn syntax_errors_carry_spans() {
        let (mut db, mut builtins) = setup();
        let err = resolve_type_spelling(&mut db, &mut builtins, "float3<int>").unwrap_err();
        assert_eq!(
            err,
            SemanticError::NotATemplate {
                name: "float3".to_string(),
                span: (6, 1).into(),
            }
        );

        let err = resolve_type_spelling(&mut db, &mut builtins, "widget").unwrap_err();
        assert_eq!(
            err,
            SemanticError::UnknownType {
                name: "widget".to_string(),
                span: (0, 6).into(),
            }
        );

        let err = resolve_type_spelling(&mut db, &mut builtins, "float $").unwrap_err();
        assert!(matches!(err, SemanticError::UnexpectedCharacter { ch: '$', .. }));

        let err = resolve_type_spelling(&mut db, &mut builtins, "vector<float").unwrap_err();
        assert!(matches!(err, SemanticError::UnexpectedToken { .. }));

        let err = resolve_type_spelling(&mut db, &mut builtins, "float float").unwrap_err();
        assert!(matches!(err, SemanticError::UnexpectedToken { .. }));
    }

    fn nested_buffers(depth: usize) -> String {
        format!("{}float{}", "Buffer<".repeat(depth), ">".repeat(depth))
    }

    #[test]
    fn nesting_depth_is_capped() {
        let (mut db, mut builtins) = setup();
        let at_limit = nested_buffers(MAX_NESTING_DEPTH - 1);
        assert!(resolve_type_spelling(&mut db, &mut builtins, &at_limit).is_ok());

        let text = "vector<".repeat(15_000) + "float" + &">".repeat(15_000);
        let err = resolve_type_spelling(&mut db, &mut builtins, &text).unwrap_err();
        let offset = "vector<".len() * MAX_NESTING_DEPTH;
        assert_eq!(
            err,
            SemanticError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                span: (offset, "vector".len()).into(),
            }
        );
    }
}
