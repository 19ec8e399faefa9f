//! Token types for the TypeScript subset.
//!
//! Tokens are the output of the lexer and input to the parser. Keywords are
//! not distinguished from identifiers here; the parser decides contextually.

use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// Source location of this token.
    pub span: Span,
    /// Whether a line break separates this token from the previous one.
    pub newline_before: bool,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span, newline_before: bool) -> Self {
        Self {
            kind,
            span,
            newline_before,
        }
    }

    /// Returns the text this token covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }

    /// Returns true if this token is the identifier `word`.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(name) if name == word)
    }

    /// Returns true if this token opens a bracketed group.
    #[must_use]
    pub const fn is_open_delimiter(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace
        )
    }

    /// Returns true if this token closes a bracketed group.
    #[must_use]
    pub const fn is_close_delimiter(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace
        )
    }
}

/// Token types for the TypeScript subset.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Delimiters
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `<`
    Lt,
    /// `>`
    Gt,

    // Punctuation
    /// `,`
    Comma,
    /// `;`
    Semi,
    /// `:`
    Colon,
    /// `.`
    Dot,
    /// `?`
    Question,
    /// `?.`
    QuestionDot,
    /// `!`
    Bang,
    /// `=`
    Eq,
    /// `=>`
    Arrow,
    /// `@`
    At,
    /// `|`
    Pipe,
    /// `&`
    Amp,
    /// `*`
    Star,
    /// `-`
    Minus,
    /// `...`
    Ellipsis,
    /// Any other operator, like `+`, `===`, or `&&`.
    Operator(String),

    // Literals and names
    /// Identifier or keyword like `class` or `Person`.
    Ident(String),
    /// Private name like `#secret` (without the `#`).
    PrivateName(String),
    /// String literal; the value is unescaped.
    String(String),
    /// Numeric literal.
    Number(f64),
    /// Template literal; `value` is the raw text between the backticks.
    Template {
        /// Text between the backticks.
        value: String,
        /// Whether the template contains `${...}` substitutions.
        has_substitutions: bool,
    },
    /// Regular expression literal, kept as raw text.
    Regex(String),

    // Meta
    /// Comment text (including delimiters).
    Comment(String),
    /// End of input
    Eof,
    /// Lexer error
    Error(String),
}

impl TokenKind {
    /// Returns true if this token kind should be ignored during parsing.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    /// Returns true if an expression may end with this token.
    ///
    /// Used to decide whether a following `/` divides or starts a regex.
    #[must_use]
    pub fn ends_expression(&self) -> bool {
        match self {
            Self::Ident(word) => !matches!(
                word.as_str(),
                "return"
                    | "typeof"
                    | "case"
                    | "do"
                    | "else"
                    | "in"
                    | "of"
                    | "new"
                    | "delete"
                    | "void"
                    | "throw"
                    | "instanceof"
                    | "yield"
                    | "await"
            ),
            Self::RParen
            | Self::RBracket
            | Self::RBrace
            | Self::PrivateName(_)
            | Self::String(_)
            | Self::Number(_)
            | Self::Template { .. }
            | Self::Regex(_) => true,
            _ => false,
        }
    }

    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::Lt => "'<'",
            Self::Gt => "'>'",
            Self::Comma => "','",
            Self::Semi => "';'",
            Self::Colon => "':'",
            Self::Dot => "'.'",
            Self::Question => "'?'",
            Self::QuestionDot => "'?.'",
            Self::Bang => "'!'",
            Self::Eq => "'='",
            Self::Arrow => "'=>'",
            Self::At => "'@'",
            Self::Pipe => "'|'",
            Self::Amp => "'&'",
            Self::Star => "'*'",
            Self::Minus => "'-'",
            Self::Ellipsis => "'...'",
            Self::Operator(_) => "operator",
            Self::Ident(_) => "identifier",
            Self::PrivateName(_) => "private name",
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Template { .. } => "template literal",
            Self::Regex(_) => "regular expression",
            Self::Comment(_) => "comment",
            Self::Eof => "end of input",
            Self::Error(_) => "error",
        }
    }
}
