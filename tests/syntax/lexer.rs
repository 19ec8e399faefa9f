//! Integration tests for the lexer

use schemagen_syntax::{Lexer, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source)
        .into_iter()
        .map(|token| token.kind)
        .filter(|kind| !kind.is_trivia())
        .collect()
}

#[test]
fn decorated_property_tokens() {
    assert_eq!(
        kinds("@mapTo(\"_n\") name?: string;"),
        vec![
            TokenKind::At,
            TokenKind::Ident("mapTo".into()),
            TokenKind::LParen,
            TokenKind::String("_n".into()),
            TokenKind::RParen,
            TokenKind::Ident("name".into()),
            TokenKind::Question,
            TokenKind::Colon,
            TokenKind::Ident("string".into()),
            TokenKind::Semi,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn nested_generic_closers_are_separate() {
    let tokens = kinds("Types.Dictionary<Types.List<Dog>>");
    let closers = tokens.iter().filter(|k| **k == TokenKind::Gt).count();
    assert_eq!(closers, 2);
}

#[test]
fn spans_slice_back_to_source() {
    let source = "class Café extends Realm.Object {\n  naïve = 'ü';\n}";
    for token in Lexer::tokenize_all(source) {
        let text = token.text(source);
        match &token.kind {
            TokenKind::Ident(name) => assert_eq!(text, name),
            TokenKind::String(value) => assert_eq!(text, format!("'{value}'")),
            _ => {}
        }
    }
}

#[test]
fn newline_flags() {
    let tokens = Lexer::tokenize_all("a = 1\nb = 2");
    let b = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Ident("b".into()))
        .unwrap();
    assert!(b.newline_before);
    assert_eq!(b.span.line, 2);
    assert_eq!(b.span.column, 1);
}

#[test]
fn comments_are_trivia() {
    let tokens = Lexer::tokenize_all("// note\n/* block */ x");
    assert!(tokens[0].kind.is_trivia());
    assert!(tokens[1].kind.is_trivia());
    assert_eq!(tokens[2].kind, TokenKind::Ident("x".into()));
}
