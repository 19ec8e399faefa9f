//! Parser for TypeScript modules.
//!
//! The parser converts a token stream into a [`Module`]. Imports and classes
//! are parsed structurally. Other statements are skipped with balanced
//! delimiter matching and recorded as opaque spans, so arbitrary code
//! between the classes of interest never needs to be understood.

use schemagen_foundation::{Error, ErrorKind, Literal, Result};

use crate::ast::{
    ClassDecl, ClassMember, Decorator, EntityName, Expr, Ident, ImportDecl, ImportSpecifier, Item,
    MethodDecl, MethodKind, Module, PropertyDecl, PropertyKey, TypeExpr, TypeKeyword,
};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Where an expression appears, which decides the tokens that end it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExprContext {
    /// A class field initializer, ended by `;`, `}`, or a line break.
    Member,
    /// A call argument, ended by `,` or `)`.
    Argument,
}

/// Parser for TypeScript source code.
pub struct Parser<'src> {
    /// Source text (for raw spellings and error messages).
    source: &'src str,
    /// Significant tokens; always ends with [`TokenKind::Eof`].
    tokens: Vec<Token>,
    /// Index of the current token.
    pos: usize,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut tokens = Vec::new();
        let mut pending_newline = false;
        for mut token in Lexer::tokenize_all(source) {
            if let TokenKind::Comment(text) = &token.kind {
                pending_newline |= token.newline_before || text.contains('\n');
                continue;
            }
            token.newline_before |= pending_newline;
            pending_newline = false;
            tokens.push(token);
        }
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    /// Parses the whole source as a module.
    ///
    /// # Errors
    /// Returns an error if the source contains a lexical error or a
    /// malformed import or class declaration.
    pub fn parse_module(&mut self) -> Result<Module> {
        self.check_lex_errors()?;

        let mut items = Vec::new();
        while !self.at(&TokenKind::Eof) {
            items.push(self.parse_item()?);
        }

        Ok(Module {
            items,
            span: Span::new(0, self.source.len(), 1, 1),
        })
    }

    /// Parses the whole source as a single type annotation.
    ///
    /// # Errors
    /// Returns an error if the source is not exactly one type.
    pub fn parse_type_annotation(&mut self) -> Result<TypeExpr> {
        self.check_lex_errors()?;
        let ty = self.parse_type()?;
        if !self.at(&TokenKind::Eof) {
            return Err(self.error(&format!(
                "expected end of input, found {}",
                self.current().kind.name()
            )));
        }
        Ok(ty)
    }

    // =========================================================================
    // Items
    // =========================================================================

    fn parse_item(&mut self) -> Result<Item> {
        let current = self.current();
        if current.is_word("import")
            && !matches!(self.peek(1).kind, TokenKind::LParen | TokenKind::Dot)
        {
            return self.parse_import();
        }
        if self.class_ahead() {
            return Ok(Item::Class(self.parse_class()?));
        }
        self.skip_statement()
    }

    /// Parses an import declaration.
    ///
    /// `import x = require(...)` is not an ES import and is skipped.
    fn parse_import(&mut self) -> Result<Item> {
        let start_pos = self.pos;
        let start = self.current().span;
        self.advance(); // consume `import`

        if let TokenKind::String(source) = &self.current().kind {
            let source = source.clone();
            self.advance();
            self.eat(&TokenKind::Semi);
            return Ok(Item::Import(ImportDecl {
                specifiers: Vec::new(),
                source,
                type_only: false,
                span: start.to(self.prev_span()),
            }));
        }

        let mut type_only = false;
        if self.current().is_word("type")
            && !matches!(self.peek(1).kind, TokenKind::Comma | TokenKind::Eq)
            && !(self.peek(1).is_word("from") && matches!(self.peek(2).kind, TokenKind::String(_)))
        {
            type_only = true;
            self.advance();
        }

        let mut specifiers = Vec::new();
        let mut expect_more = true;

        if matches!(self.current().kind, TokenKind::Ident(_)) {
            let local = self.expect_ident()?;
            if self.at(&TokenKind::Eq) {
                self.pos = start_pos;
                return self.skip_statement();
            }
            specifiers.push(ImportSpecifier::Default { local });
            expect_more = self.eat(&TokenKind::Comma);
        }

        if expect_more {
            if self.eat(&TokenKind::Star) {
                self.expect_word("as")?;
                let local = self.expect_ident()?;
                specifiers.push(ImportSpecifier::Namespace { local });
            } else if self.at(&TokenKind::LBrace) {
                self.parse_named_imports(&mut specifiers)?;
            } else {
                return Err(self.error(&format!(
                    "expected import specifiers, found {}",
                    self.current().kind.name()
                )));
            }
        }

        self.expect_word("from")?;
        let source = self.expect_string()?;

        if (self.current().is_word("with") || self.current().is_word("assert"))
            && self.peek(1).kind == TokenKind::LBrace
            && !self.current().newline_before
        {
            self.advance();
            self.skip_balanced();
        }
        self.eat(&TokenKind::Semi);

        Ok(Item::Import(ImportDecl {
            specifiers,
            source,
            type_only,
            span: start.to(self.prev_span()),
        }))
    }

    /// Parses `{ a, b as c, type d }`.
    fn parse_named_imports(&mut self, specifiers: &mut Vec<ImportSpecifier>) -> Result<()> {
        self.expect(&TokenKind::LBrace)?;
        loop {
            if self.eat(&TokenKind::RBrace) {
                return Ok(());
            }

            let mut type_only = false;
            if self.current().is_word("type")
                && matches!(self.peek(1).kind, TokenKind::Ident(_) | TokenKind::String(_))
            {
                type_only = true;
                self.advance();
            }

            let token = self.current().clone();
            let imported = match token.kind {
                TokenKind::Ident(name) | TokenKind::String(name) => name,
                other => {
                    return Err(self.error(&format!(
                        "expected imported name, found {}",
                        other.name()
                    )));
                }
            };
            self.advance();

            let local = if self.eat_word("as") {
                self.expect_ident()?
            } else {
                Ident::new(imported.clone(), token.span)
            };

            specifiers.push(ImportSpecifier::Named {
                imported,
                local,
                type_only,
            });

            if !self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::RBrace)?;
                return Ok(());
            }
        }
    }

    /// Returns true if a class declaration starts at the current token.
    ///
    /// Looks past decorators and `export`/`default`/`abstract`. Ambient
    /// `declare class` declarations are not classes for this purpose.
    fn class_ahead(&self) -> bool {
        self.class_keyword_ahead().is_some()
    }

    /// Returns true if a named class declaration starts at the current
    /// token in statement position.
    ///
    /// Used inside skipped blocks, where `class` may also be a property
    /// name (`{ class: 1 }`) or start a class expression (`return class {}`).
    fn nested_class_ahead(&self) -> bool {
        if self.pos == 0 {
            return false;
        }
        let previous = &self.tokens[self.pos - 1].kind;
        let statement_start = matches!(
            previous,
            TokenKind::LBrace | TokenKind::RBrace | TokenKind::Semi
        ) || (self.current().newline_before && !continues_after(previous));
        statement_start
            && self.class_keyword_ahead().is_some_and(|class| {
                matches!(
                    &self.token_at(class + 1).kind,
                    TokenKind::Ident(name) if name != "extends" && name != "implements"
                )
            })
    }

    /// Index of the `class` keyword if a class declaration starts here.
    fn class_keyword_ahead(&self) -> Option<usize> {
        let mut i = self.pos;
        loop {
            match &self.token_at(i).kind {
                TokenKind::At => i = self.skip_decorator_from(i + 1),
                TokenKind::Ident(word) if matches!(word.as_str(), "export" | "default" | "abstract") => {
                    i += 1;
                }
                TokenKind::Ident(word) if word == "class" => return Some(i),
                _ => return None,
            }
        }
    }

    /// Returns the index just past a decorator expression starting at `i`.
    fn skip_decorator_from(&self, mut i: usize) -> usize {
        if self.token_at(i).kind == TokenKind::LParen {
            return self.matching_close(i).map_or(self.last_index(), |j| j + 1);
        }
        if matches!(self.token_at(i).kind, TokenKind::Ident(_)) {
            i += 1;
            while self.token_at(i).kind == TokenKind::Dot
                && matches!(self.token_at(i + 1).kind, TokenKind::Ident(_))
            {
                i += 2;
            }
            if self.token_at(i).kind == TokenKind::LParen {
                return self.matching_close(i).map_or(self.last_index(), |j| j + 1);
            }
        }
        i
    }

    // =========================================================================
    // Classes
    // =========================================================================

    fn parse_class(&mut self) -> Result<ClassDecl> {
        let start = self.current().span;

        let mut decorators = Vec::new();
        loop {
            if self.at(&TokenKind::At) {
                decorators.push(self.parse_decorator()?);
            } else if self.current().is_word("export")
                || self.current().is_word("default")
                || self.current().is_word("abstract")
            {
                self.advance();
            } else {
                break;
            }
        }

        self.expect_word("class")?;

        let named = matches!(
            &self.current().kind,
            TokenKind::Ident(word) if word != "extends" && word != "implements"
        );
        let name = if named { Some(self.expect_ident()?) } else { None };

        if self.at(&TokenKind::Lt) {
            self.skip_angles();
        }

        let mut super_class = None;
        let mut super_type_args = Vec::new();
        if self.eat_word("extends") {
            super_class = Some(self.parse_callee_chain()?);
            if self.at(&TokenKind::Lt) {
                super_type_args = self.parse_type_args()?;
            }
        }

        if self.eat_word("implements") {
            self.skip_until_class_body()?;
        }

        let body_start = self.current().span;
        self.expect(&TokenKind::LBrace)?;

        let mut members = Vec::new();
        let mut nested = Vec::new();
        loop {
            while self.eat(&TokenKind::Semi) {}
            if self.at(&TokenKind::RBrace) {
                break;
            }
            if self.at(&TokenKind::Eof) {
                return Err(self.error_at(body_start, "unterminated class body"));
            }
            members.push(self.parse_member(&mut nested)?);
        }

        let body_end = self.current().span;
        self.expect(&TokenKind::RBrace)?;

        Ok(ClassDecl {
            name,
            decorators,
            super_class,
            super_type_args,
            members,
            body: body_start.to(body_end),
            span: start.to(body_end),
            nested,
        })
    }

    /// Skips an `implements` list up to the opening brace of the body.
    fn skip_until_class_body(&mut self) -> Result<()> {
        let mut angles = 0usize;
        loop {
            match self.current().kind {
                TokenKind::LBrace if angles == 0 => return Ok(()),
                TokenKind::Lt => {
                    angles += 1;
                    self.advance();
                }
                TokenKind::Gt => {
                    angles = angles.saturating_sub(1);
                    self.advance();
                }
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                    self.skip_balanced();
                }
                TokenKind::Eof => return Err(self.error("expected class body")),
                _ => self.advance(),
            }
        }
    }

    /// Parses one class member. Classes declared inside method bodies and
    /// static blocks are added to `nested`.
    fn parse_member(&mut self, nested: &mut Vec<ClassDecl>) -> Result<ClassMember> {
        let start = self.current().span;

        let mut decorators = Vec::new();
        while self.at(&TokenKind::At) {
            decorators.push(self.parse_decorator()?);
        }

        if self.current().is_word("static") && self.peek(1).kind == TokenKind::LBrace {
            self.advance();
            let block = self.skip_block(nested)?;
            return Ok(ClassMember::StaticBlock(start.to(block)));
        }

        let mut is_static = false;
        let mut is_readonly = false;
        let mut is_declare = false;
        let mut accessor = None;
        while let TokenKind::Ident(word) = &self.current().kind {
            if !is_modifier(word) || !self.modifier_applies() {
                break;
            }
            match word.as_str() {
                "static" => is_static = true,
                "readonly" => is_readonly = true,
                "declare" => is_declare = true,
                "get" => accessor = Some(MethodKind::Getter),
                "set" => accessor = Some(MethodKind::Setter),
                _ => {}
            }
            self.advance();
        }
        self.eat(&TokenKind::Star);

        let token = self.current().clone();
        let key = match token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                PropertyKey::Ident(Ident::new(name, token.span))
            }
            TokenKind::String(value) => {
                self.advance();
                PropertyKey::String {
                    value,
                    span: token.span,
                }
            }
            TokenKind::Number(_) => {
                self.advance();
                PropertyKey::Number {
                    raw: token.text(self.source).to_string(),
                    span: token.span,
                }
            }
            TokenKind::PrivateName(name) => {
                self.advance();
                PropertyKey::Private(Ident::new(name, token.span))
            }
            TokenKind::LBracket => {
                if matches!(self.peek(1).kind, TokenKind::Ident(_))
                    && self.peek(2).kind == TokenKind::Colon
                {
                    self.scan_expression(ExprContext::Member)?;
                    self.eat(&TokenKind::Semi);
                    return Ok(ClassMember::IndexSignature(start.to(self.prev_span())));
                }
                PropertyKey::Computed(self.skip_balanced())
            }
            other => {
                return Err(self.error(&format!("expected class member, found {}", other.name())));
            }
        };

        let optional = self.eat(&TokenKind::Question);
        let definite = !optional && self.eat(&TokenKind::Bang);

        if self.at(&TokenKind::LParen) || self.at(&TokenKind::Lt) {
            self.skip_method_rest(nested)?;
            let kind = if key.name() == Some("constructor") && !is_static {
                MethodKind::Constructor
            } else {
                accessor.unwrap_or(MethodKind::Method)
            };
            return Ok(ClassMember::Method(MethodDecl {
                key,
                kind,
                is_static,
                span: start.to(self.prev_span()),
            }));
        }

        let type_annotation = if self.eat(&TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let (eq_span, initializer) = if self.at(&TokenKind::Eq) {
            let eq = self.current().span;
            self.advance();
            (Some(eq), Some(self.parse_expression(ExprContext::Member)?))
        } else {
            (None, None)
        };

        if !self.eat(&TokenKind::Semi)
            && !self.at(&TokenKind::RBrace)
            && !self.at(&TokenKind::Eof)
            && !self.current().newline_before
        {
            return Err(self.error(&format!(
                "expected ';' after property declaration, found {}",
                self.current().kind.name()
            )));
        }

        Ok(ClassMember::Property(PropertyDecl {
            key,
            decorators,
            is_static,
            is_readonly,
            is_declare,
            optional,
            definite,
            type_annotation,
            initializer,
            eq_span,
            span: start.to(self.prev_span()),
        }))
    }

    /// Returns true if the modifier-like word at the current token is used
    /// as a modifier rather than as the member name.
    fn modifier_applies(&self) -> bool {
        !matches!(
            self.peek(1).kind,
            TokenKind::LParen
                | TokenKind::Eq
                | TokenKind::Semi
                | TokenKind::Colon
                | TokenKind::Question
                | TokenKind::Bang
                | TokenKind::RBrace
                | TokenKind::Lt
                | TokenKind::Comma
                | TokenKind::Eof
        )
    }

    /// Skips type parameters, parameters, return type and body of a method.
    fn skip_method_rest(&mut self, nested: &mut Vec<ClassDecl>) -> Result<()> {
        if self.at(&TokenKind::Lt) {
            self.skip_angles();
        }
        if !self.at(&TokenKind::LParen) {
            return Err(self.error("expected method parameters"));
        }
        self.skip_balanced();

        if self.eat(&TokenKind::Colon) {
            self.eat_word("asserts");
            self.parse_type()?;
            if self.eat_word("is") {
                self.parse_type()?;
            }
        }

        if self.at(&TokenKind::LBrace) {
            self.skip_block(nested)?;
        } else {
            self.eat(&TokenKind::Semi);
        }
        Ok(())
    }

    /// Parses `@expr`.
    fn parse_decorator(&mut self) -> Result<Decorator> {
        let start = self.current().span;
        self.expect(&TokenKind::At)?;
        let expr = if self.at(&TokenKind::LParen) {
            Expr::Other(self.skip_balanced())
        } else {
            self.parse_callee_chain()?
        };
        Ok(Decorator {
            expr,
            span: start.to(self.prev_span()),
        })
    }

    /// Parses `a.b.c(args)` chains used by decorators and `extends`.
    fn parse_callee_chain(&mut self) -> Result<Expr> {
        let start = self.current().span;
        let mut expr = match &self.current().kind {
            TokenKind::Ident(_) => Expr::Ident(self.expect_ident()?),
            TokenKind::LParen => Expr::Other(self.skip_balanced()),
            other => {
                return Err(self.error(&format!("expected expression, found {}", other.name())));
            }
        };

        loop {
            if self.at(&TokenKind::Dot) && matches!(self.peek(1).kind, TokenKind::Ident(_)) {
                self.advance();
                let property = self.expect_ident()?;
                expr = Expr::Member {
                    object: Box::new(expr),
                    property,
                    span: start.to(self.prev_span()),
                };
            } else if self.at(&TokenKind::LParen) {
                let args = self.parse_arguments()?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    args,
                    span: start.to(self.prev_span()),
                };
            } else {
                return Ok(expr);
            }
        }
    }

    // =========================================================================
    // Types
    // =========================================================================

    fn parse_type(&mut self) -> Result<TypeExpr> {
        let start = self.current().span;
        let ty = self.parse_union_type()?;

        // Conditional types: `T extends U ? X : Y`
        if self.current().is_word("extends") && !self.current().newline_before {
            self.advance();
            self.parse_union_type()?;
            self.expect(&TokenKind::Question)?;
            self.parse_type()?;
            self.expect(&TokenKind::Colon)?;
            self.parse_type()?;
            return Ok(TypeExpr::Other(start.to(self.prev_span())));
        }

        Ok(ty)
    }

    fn parse_union_type(&mut self) -> Result<TypeExpr> {
        let start = self.current().span;
        self.eat(&TokenKind::Pipe);
        let first = self.parse_intersection_type()?;
        if !self.at(&TokenKind::Pipe) {
            return Ok(first);
        }

        let mut arms = vec![first];
        while self.eat(&TokenKind::Pipe) {
            arms.push(self.parse_intersection_type()?);
        }
        Ok(TypeExpr::Union(arms, start.to(self.prev_span())))
    }

    fn parse_intersection_type(&mut self) -> Result<TypeExpr> {
        let start = self.current().span;
        self.eat(&TokenKind::Amp);
        let first = self.parse_postfix_type()?;
        if !self.at(&TokenKind::Amp) {
            return Ok(first);
        }
        while self.eat(&TokenKind::Amp) {
            self.parse_postfix_type()?;
        }
        Ok(TypeExpr::Other(start.to(self.prev_span())))
    }

    fn parse_postfix_type(&mut self) -> Result<TypeExpr> {
        let start = self.current().span;
        let mut ty = self.parse_primary_type()?;

        while self.at(&TokenKind::LBracket) && !self.current().newline_before {
            self.advance();
            if self.eat(&TokenKind::RBracket) {
                ty = TypeExpr::Array(Box::new(ty), start.to(self.prev_span()));
            } else {
                // Indexed access: `T["key"]`
                self.parse_type()?;
                self.expect(&TokenKind::RBracket)?;
                ty = TypeExpr::Other(start.to(self.prev_span()));
            }
        }

        Ok(ty)
    }

    fn parse_primary_type(&mut self) -> Result<TypeExpr> {
        let token = self.current().clone();
        let start = token.span;

        match token.kind {
            TokenKind::Ident(word) => match word.as_str() {
                "true" | "false" => {
                    self.advance();
                    Ok(TypeExpr::Literal(Literal::Bool(word == "true"), start))
                }
                "typeof" => {
                    self.advance();
                    self.parse_entity_name()?;
                    if self.at(&TokenKind::Lt) {
                        self.parse_type_args()?;
                    }
                    Ok(TypeExpr::Other(start.to(self.prev_span())))
                }
                "keyof" | "unique" | "readonly" | "infer" => {
                    self.advance();
                    self.parse_postfix_type()?;
                    Ok(TypeExpr::Other(start.to(self.prev_span())))
                }
                "new" | "abstract" => {
                    self.advance();
                    self.eat_word("new");
                    self.skip_function_type()?;
                    Ok(TypeExpr::Other(start.to(self.prev_span())))
                }
                _ => {
                    if let Some(keyword) = TypeKeyword::from_name(&word) {
                        self.advance();
                        return Ok(TypeExpr::Keyword(keyword, start));
                    }
                    let name = self.parse_entity_name()?;
                    let args = if self.at(&TokenKind::Lt) && !self.current().newline_before {
                        self.parse_type_args()?
                    } else {
                        Vec::new()
                    };
                    Ok(TypeExpr::Reference {
                        name,
                        args,
                        span: start.to(self.prev_span()),
                    })
                }
            },
            TokenKind::String(value) => {
                self.advance();
                let raw = token.span.text(self.source).to_string();
                Ok(TypeExpr::Literal(Literal::String { value, raw }, start))
            }
            TokenKind::Number(value) => {
                self.advance();
                let raw = token.span.text(self.source).to_string();
                Ok(TypeExpr::Literal(Literal::Number { value, raw }, start))
            }
            TokenKind::Minus => {
                if let TokenKind::Number(value) = self.peek(1).kind {
                    self.advance();
                    self.advance();
                    let span = start.to(self.prev_span());
                    let raw = span.text(self.source).to_string();
                    return Ok(TypeExpr::Literal(Literal::Number { value: -value, raw }, span));
                }
                Err(self.error("expected type, found '-'"))
            }
            TokenKind::Template { .. } => {
                self.advance();
                Ok(TypeExpr::Other(start))
            }
            TokenKind::LParen => {
                let arrow_follows = self
                    .matching_close(self.pos)
                    .is_some_and(|close| self.token_at(close + 1).kind == TokenKind::Arrow);
                if arrow_follows {
                    self.skip_function_type()?;
                    return Ok(TypeExpr::Other(start.to(self.prev_span())));
                }
                self.advance();
                let inner = self.parse_type()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Lt => {
                self.skip_function_type()?;
                Ok(TypeExpr::Other(start.to(self.prev_span())))
            }
            TokenKind::LBrace | TokenKind::LBracket => {
                let span = self.skip_balanced();
                Ok(TypeExpr::Other(span))
            }
            other => Err(self.error(&format!("expected type, found {}", other.name()))),
        }
    }

    /// Skips `<T>(params) => Result`.
    fn skip_function_type(&mut self) -> Result<()> {
        if self.at(&TokenKind::Lt) {
            self.skip_angles();
        }
        if !self.at(&TokenKind::LParen) {
            return Err(self.error("expected function type parameters"));
        }
        self.skip_balanced();
        self.expect(&TokenKind::Arrow)?;
        self.parse_type()?;
        Ok(())
    }

    fn parse_entity_name(&mut self) -> Result<EntityName> {
        let first = self.expect_ident()?;
        let start = first.span;
        let mut segments = vec![first];
        while self.at(&TokenKind::Dot) && matches!(self.peek(1).kind, TokenKind::Ident(_)) {
            self.advance();
            segments.push(self.expect_ident()?);
        }
        Ok(EntityName {
            segments,
            span: start.to(self.prev_span()),
        })
    }

    fn parse_type_args(&mut self) -> Result<Vec<TypeExpr>> {
        self.expect(&TokenKind::Lt)?;
        let mut args = Vec::new();
        loop {
            if self.eat(&TokenKind::Gt) {
                return Ok(args);
            }
            args.push(self.parse_type()?);
            if !self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::Gt)?;
                return Ok(args);
            }
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Parses an expression, structurally when it has a simple shape and as
    /// an opaque span otherwise.
    fn parse_expression(&mut self, context: ExprContext) -> Result<Expr> {
        let start_pos = self.pos;
        if let Some(expr) = self.try_simple_expression() {
            if self.at_expression_end(context) {
                return Ok(expr);
            }
        }
        self.pos = start_pos;
        Ok(Expr::Other(self.scan_expression(context)?))
    }

    /// Parses literals, names, member chains, calls, and `new` expressions.
    fn try_simple_expression(&mut self) -> Option<Expr> {
        let token = self.current().clone();
        let start = token.span;
        let raw = token.span.text(self.source).to_string();

        let mut expr = match token.kind {
            TokenKind::String(value) => {
                self.advance();
                Expr::Literal(Literal::String { value, raw }, start)
            }
            TokenKind::Number(value) => {
                self.advance();
                Expr::Literal(Literal::Number { value, raw }, start)
            }
            TokenKind::Template {
                value,
                has_substitutions: false,
            } => {
                self.advance();
                Expr::Literal(Literal::Template { value, raw }, start)
            }
            TokenKind::Minus => {
                let TokenKind::Number(value) = self.peek(1).kind else {
                    return None;
                };
                self.advance();
                self.advance();
                let span = start.to(self.prev_span());
                let raw = span.text(self.source).to_string();
                Expr::Literal(
                    Literal::Number {
                        value: -value,
                        raw,
                    },
                    span,
                )
            }
            TokenKind::Ident(word) => match word.as_str() {
                "true" | "false" => {
                    self.advance();
                    Expr::Literal(Literal::Bool(word == "true"), start)
                }
                "null" => {
                    self.advance();
                    Expr::Literal(Literal::Null, start)
                }
                "new" => {
                    self.advance();
                    let callee = self.try_name_chain()?;
                    if self.at(&TokenKind::Lt) {
                        self.skip_angles();
                    }
                    let args = if self.at(&TokenKind::LParen) {
                        self.parse_arguments().ok()?
                    } else {
                        Vec::new()
                    };
                    Expr::New {
                        callee: Box::new(callee),
                        args,
                        span: start.to(self.prev_span()),
                    }
                }
                _ if is_reserved(&word) => return None,
                _ => {
                    self.advance();
                    Expr::Ident(Ident::new(word, start))
                }
            },
            _ => return None,
        };

        loop {
            if self.at(&TokenKind::Dot) && matches!(self.peek(1).kind, TokenKind::Ident(_)) {
                self.advance();
                let property = self.expect_ident().ok()?;
                expr = Expr::Member {
                    object: Box::new(expr),
                    property,
                    span: start.to(self.prev_span()),
                };
            } else if self.at(&TokenKind::LParen) && !self.current().newline_before {
                let args = self.parse_arguments().ok()?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    args,
                    span: start.to(self.prev_span()),
                };
            } else {
                return Some(expr);
            }
        }
    }

    /// Parses `a.b.c` after `new`.
    fn try_name_chain(&mut self) -> Option<Expr> {
        let start = self.current().span;
        let TokenKind::Ident(name) = &self.current().kind else {
            return None;
        };
        let mut expr = Expr::Ident(Ident::new(name.clone(), start));
        self.advance();
        while self.at(&TokenKind::Dot) && matches!(self.peek(1).kind, TokenKind::Ident(_)) {
            self.advance();
            let property = self.expect_ident().ok()?;
            expr = Expr::Member {
                object: Box::new(expr),
                property,
                span: start.to(self.prev_span()),
            };
        }
        Some(expr)
    }

    /// Parses `(arg, ...)`.
    fn parse_arguments(&mut self) -> Result<Vec<Expr>> {
        self.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        loop {
            if self.eat(&TokenKind::RParen) {
                return Ok(args);
            }
            args.push(self.parse_expression(ExprContext::Argument)?);
            if !self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::RParen)?;
                return Ok(args);
            }
        }
    }

    fn at_expression_end(&self, context: ExprContext) -> bool {
        let token = self.current();
        match context {
            ExprContext::Argument => {
                matches!(token.kind, TokenKind::Comma | TokenKind::RParen)
            }
            ExprContext::Member => {
                matches!(
                    token.kind,
                    TokenKind::Semi | TokenKind::RBrace | TokenKind::Eof
                ) || (token.newline_before && !continues_expression(&token.kind))
            }
        }
    }

    /// Consumes an arbitrary expression with balanced delimiters.
    ///
    /// A member initializer may not contain a top-level `,` outside type
    /// arguments, so `a = 'x', b = 1` is rejected instead of being read as
    /// one expression.
    fn scan_expression(&mut self, context: ExprContext) -> Result<Span> {
        let start = self.current().span;
        let mut depth = 0usize;
        let mut angles = 0usize;
        let mut consumed = false;

        loop {
            let token = self.current();
            if token.kind == TokenKind::Eof {
                if depth > 0 || !consumed {
                    return Err(self.error("unexpected end of input in expression"));
                }
                break;
            }

            if depth == 0 {
                let ends = match context {
                    ExprContext::Member => {
                        matches!(token.kind, TokenKind::Semi | TokenKind::RBrace)
                            || (consumed
                                && token.newline_before
                                && !continues_expression(&token.kind)
                                && !self.previous_continues())
                    }
                    ExprContext::Argument => {
                        matches!(token.kind, TokenKind::Comma | TokenKind::RParen)
                    }
                };
                if ends {
                    if !consumed {
                        return Err(self.error(&format!(
                            "expected expression, found {}",
                            token.kind.name()
                        )));
                    }
                    break;
                }
                if token.is_close_delimiter() {
                    return Err(self.error(&format!("unexpected {}", token.kind.name())));
                }
                if context == ExprContext::Member {
                    match token.kind {
                        TokenKind::Lt => angles += 1,
                        TokenKind::Gt => angles = angles.saturating_sub(1),
                        TokenKind::Comma if angles == 0 => {
                            return Err(
                                self.error("expected ';' after property declaration, found ','")
                            );
                        }
                        _ => {}
                    }
                }
            }

            if token.is_open_delimiter() {
                depth += 1;
            } else if token.is_close_delimiter() {
                depth -= 1;
            }
            self.advance();
            consumed = true;
        }

        Ok(start.to(self.prev_span()))
    }

    /// Returns true if the previous token cannot end an expression.
    fn previous_continues(&self) -> bool {
        self.pos > 0 && continues_after(&self.tokens[self.pos - 1].kind)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Skips one statement, keeping the class declarations inside it.
    ///
    /// Stops after a top-level `;`, or before a line that starts another
    /// declaration.
    fn skip_statement(&mut self) -> Result<Item> {
        let start = self.current().span;
        let mut open: Vec<bool> = Vec::new();
        let mut classes = Vec::new();
        let mut consumed = false;

        loop {
            if open.last() == Some(&true) && self.nested_class_ahead() {
                classes.push(self.parse_class()?);
                continue;
            }

            let token = self.current();
            match token.kind {
                TokenKind::Eof => break,
                _ if open.is_empty()
                    && consumed
                    && token.newline_before
                    && starts_declaration(token) =>
                {
                    break;
                }
                TokenKind::Semi if open.is_empty() => {
                    self.advance();
                    break;
                }
                _ => {}
            }

            if token.is_open_delimiter() {
                open.push(token.kind == TokenKind::LBrace);
            } else if token.is_close_delimiter() {
                open.pop();
            }
            self.advance();
            consumed = true;
        }

        let span = if consumed {
            start.to(self.prev_span())
        } else {
            start
        };
        Ok(Item::Other { span, classes })
    }

    /// Skips a braced block like a function body, keeping the class
    /// declarations inside it.
    fn skip_block(&mut self, nested: &mut Vec<ClassDecl>) -> Result<Span> {
        let start = self.current().span;
        let mut open: Vec<bool> = Vec::new();
        loop {
            if open.last() == Some(&true) && self.nested_class_ahead() {
                nested.push(self.parse_class()?);
                continue;
            }
            let token = self.current();
            if token.kind == TokenKind::Eof {
                break;
            }
            if token.is_open_delimiter() {
                open.push(token.kind == TokenKind::LBrace);
            } else if token.is_close_delimiter() {
                open.pop();
            }
            self.advance();
            if open.is_empty() {
                break;
            }
        }
        Ok(start.to(self.prev_span()))
    }

    /// Skips a bracketed group starting at the current open delimiter.
    fn skip_balanced(&mut self) -> Span {
        let start = self.current().span;
        let mut depth = 0usize;
        loop {
            let token = self.current();
            if token.kind == TokenKind::Eof {
                break;
            }
            if token.is_open_delimiter() {
                depth += 1;
            } else if token.is_close_delimiter() {
                depth = depth.saturating_sub(1);
            }
            self.advance();
            if depth == 0 {
                break;
            }
        }
        start.to(self.prev_span())
    }

    /// Skips `<...>`, including nested brackets.
    fn skip_angles(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current().kind {
                TokenKind::Eof => return,
                TokenKind::Lt => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::Gt => {
                    depth = depth.saturating_sub(1);
                    self.advance();
                }
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                    self.skip_balanced();
                }
                _ => self.advance(),
            }
            if depth == 0 {
                return;
            }
        }
    }

    /// Returns the index of the delimiter closing the one at `open`.
    fn matching_close(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(open) {
            if token.is_open_delimiter() {
                depth += 1;
            } else if token.is_close_delimiter() {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
        }
        None
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn check_lex_errors(&self) -> Result<()> {
        match self.tokens.iter().find_map(|token| match &token.kind {
            TokenKind::Error(message) => Some((token.span, message)),
            _ => None,
        }) {
            Some((span, message)) => Err(self.error_at(span, message)),
            None => Ok(()),
        }
    }

    fn last_index(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }

    fn token_at(&self, index: usize) -> &Token {
        &self.tokens[index.min(self.last_index())]
    }

    fn current(&self) -> &Token {
        self.token_at(self.pos)
    }

    fn peek(&self, n: usize) -> &Token {
        self.token_at(self.pos + n)
    }

    /// Span of the most recently consumed token.
    fn prev_span(&self) -> Span {
        if self.pos == 0 {
            self.current().span
        } else {
            self.token_at(self.pos - 1).span
        }
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.pos < self.last_index() {
            self.pos += 1;
        }
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.current().kind == *kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_word(&mut self, word: &str) -> bool {
        if self.current().is_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to be of a specific kind, then advances.
    fn expect(&mut self, expected: &TokenKind) -> Result<Span> {
        let span = self.current().span;
        if self.eat(expected) {
            Ok(span)
        } else {
            Err(self.error(&format!(
                "expected {}, found {}",
                expected.name(),
                self.current().kind.name()
            )))
        }
    }

    fn expect_word(&mut self, word: &str) -> Result<()> {
        if self.eat_word(word) {
            Ok(())
        } else {
            Err(self.error(&format!(
                "expected '{word}', found {}",
                self.current().kind.name()
            )))
        }
    }

    fn expect_ident(&mut self) -> Result<Ident> {
        let token = self.current();
        if let TokenKind::Ident(name) = &token.kind {
            let ident = Ident::new(name.clone(), token.span);
            self.advance();
            Ok(ident)
        } else {
            Err(self.error(&format!(
                "expected identifier, found {}",
                token.kind.name()
            )))
        }
    }

    fn expect_string(&mut self) -> Result<String> {
        if let TokenKind::String(value) = &self.current().kind {
            let value = value.clone();
            self.advance();
            Ok(value)
        } else {
            Err(self.error(&format!(
                "expected string, found {}",
                self.current().kind.name()
            )))
        }
    }

    /// Creates a parse error at the current position.
    fn error(&self, message: &str) -> Error {
        self.error_at(self.current().span, message)
    }

    /// Creates a parse error at a specific span.
    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::new(ErrorKind::ParseError {
            message: message.to_string(),
            line: span.line,
            column: span.column,
            context: self.context_at(span),
        })
    }

    /// Gets the source line containing a span, for error messages.
    fn context_at(&self, span: Span) -> String {
        let start = span.start.min(self.source.len());
        let line_start = self.source[..start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = self.source[start..]
            .find('\n')
            .map_or(self.source.len(), |i| start + i);

        self.source[line_start..line_end].to_string()
    }
}

fn is_modifier(word: &str) -> bool {
    matches!(
        word,
        "static"
            | "readonly"
            | "declare"
            | "public"
            | "private"
            | "protected"
            | "abstract"
            | "override"
            | "accessor"
            | "async"
            | "get"
            | "set"
    )
}

fn is_reserved(word: &str) -> bool {
    matches!(
        word,
        "function" | "class" | "async" | "typeof" | "void" | "delete" | "await" | "yield" | "import"
    )
}

/// Returns true if an expression cannot end with a token of this kind.
fn continues_after(kind: &TokenKind) -> bool {
    match kind {
        TokenKind::Operator(op) => op != "++" && op != "--",
        TokenKind::Ident(word) => matches!(
            word.as_str(),
            "new"
                | "typeof"
                | "void"
                | "delete"
                | "await"
                | "in"
                | "instanceof"
                | "as"
                | "satisfies"
                | "keyof"
        ),
        TokenKind::Dot
        | TokenKind::QuestionDot
        | TokenKind::Eq
        | TokenKind::Arrow
        | TokenKind::Question
        | TokenKind::Colon
        | TokenKind::Pipe
        | TokenKind::Amp
        | TokenKind::Star
        | TokenKind::Minus
        | TokenKind::Lt
        | TokenKind::Gt
        | TokenKind::Comma
        | TokenKind::Bang
        | TokenKind::Ellipsis => true,
        _ => false,
    }
}

/// Returns true if a token at the start of a line continues the expression
/// on the previous line.
fn continues_expression(kind: &TokenKind) -> bool {
    match kind {
        TokenKind::Operator(op) => op != "++" && op != "--",
        TokenKind::Ident(word) => matches!(word.as_str(), "instanceof" | "in" | "as" | "satisfies"),
        TokenKind::Dot
        | TokenKind::QuestionDot
        | TokenKind::Question
        | TokenKind::Colon
        | TokenKind::Arrow
        | TokenKind::Eq
        | TokenKind::Pipe
        | TokenKind::Amp
        | TokenKind::Star
        | TokenKind::Minus
        | TokenKind::Lt
        | TokenKind::Gt
        | TokenKind::LParen
        | TokenKind::LBracket
        | TokenKind::Comma
        | TokenKind::Template { .. } => true,
        _ => false,
    }
}

/// Returns true if a token at the start of a line begins a new declaration.
fn starts_declaration(token: &Token) -> bool {
    match &token.kind {
        TokenKind::At => true,
        TokenKind::Ident(word) => matches!(
            word.as_str(),
            "import"
                | "export"
                | "class"
                | "abstract"
                | "declare"
                | "const"
                | "let"
                | "var"
                | "function"
                | "interface"
                | "enum"
                | "type"
                | "namespace"
        ),
        _ => false,
    }
}

/// Parses source code into a module.
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn parse_module(source: &str) -> Result<Module> {
    Parser::new(source).parse_module()
}

/// Parses a standalone type annotation like `Types.List<string>`.
///
/// # Errors
/// Returns an error if the source is not a single type.
pub fn parse_type(source: &str) -> Result<TypeExpr> {
    Parser::new(source).parse_type_annotation()
}
