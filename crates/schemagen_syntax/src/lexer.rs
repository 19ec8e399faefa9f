//! Lexer for TypeScript source.
//!
//! The lexer converts source text into a stream of tokens. It understands
//! enough of the language to tokenize whole modules: comments, string,
//! template and regex literals, numeric literals in every radix, and the
//! multi-character operators that would otherwise confuse the parser.

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Lexer for TypeScript source code.
///
/// The lexer iterates through source text and produces tokens.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
    /// Whether a `/` at this point starts a regular expression.
    regex_allowed: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
            line: 1,
            column: 1,
            regex_allowed: true,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        let newline_before = self.skip_whitespace();

        let start = self.position;
        let start_line = self.line;
        let start_column = self.column;

        let Some(c) = self.peek_char() else {
            return Token::new(
                TokenKind::Eof,
                Span::new(start, start, start_line, start_column),
                newline_before,
            );
        };

        let kind = match c {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '<' => self.single(TokenKind::Lt),
            '>' => self.single(TokenKind::Gt),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semi),
            ':' => self.single(TokenKind::Colon),
            '@' => self.single(TokenKind::At),
            '/' => match self.peek_char_n(1) {
                Some('/') => self.scan_line_comment(),
                Some('*') => self.scan_block_comment(),
                _ if self.regex_allowed => self.scan_regex(),
                _ => self.scan_operator(&["/="], "/"),
            },
            '"' | '\'' => self.scan_string(c),
            '`' => self.scan_template(),
            '#' => self.scan_hash(),
            c if c.is_ascii_digit() => self.scan_number(),
            '.' => {
                if self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number()
                } else if self.rest.starts_with("...") {
                    self.advance_n(3);
                    TokenKind::Ellipsis
                } else {
                    self.single(TokenKind::Dot)
                }
            }
            '?' => {
                if self.rest.starts_with("?.")
                    && !self.peek_char_n(2).is_some_and(|c| c.is_ascii_digit())
                {
                    self.advance_n(2);
                    TokenKind::QuestionDot
                } else if self.rest.starts_with("??") {
                    self.scan_operator(&["??="], "??")
                } else {
                    self.single(TokenKind::Question)
                }
            }
            '=' => {
                if self.rest.starts_with("=>") {
                    self.advance_n(2);
                    TokenKind::Arrow
                } else if self.rest.starts_with("==") {
                    self.scan_operator(&["==="], "==")
                } else {
                    self.single(TokenKind::Eq)
                }
            }
            '!' => {
                if self.rest.starts_with("!=") {
                    self.scan_operator(&["!=="], "!=")
                } else {
                    self.single(TokenKind::Bang)
                }
            }
            '&' => {
                if self.rest.starts_with("&&") || self.rest.starts_with("&=") {
                    self.scan_operator(&["&&=", "&&"], "&=")
                } else {
                    self.single(TokenKind::Amp)
                }
            }
            '|' => {
                if self.rest.starts_with("||") || self.rest.starts_with("|=") {
                    self.scan_operator(&["||=", "||"], "|=")
                } else {
                    self.single(TokenKind::Pipe)
                }
            }
            '*' => {
                if self.rest.starts_with("**") || self.rest.starts_with("*=") {
                    self.scan_operator(&["**=", "**"], "*=")
                } else {
                    self.single(TokenKind::Star)
                }
            }
            '-' => {
                if self.rest.starts_with("--") || self.rest.starts_with("-=") {
                    self.scan_operator(&["--"], "-=")
                } else {
                    self.single(TokenKind::Minus)
                }
            }
            '+' => self.scan_operator(&["++", "+="], "+"),
            '%' => self.scan_operator(&["%="], "%"),
            '^' => self.scan_operator(&["^="], "^"),
            '~' => self.scan_operator(&[], "~"),
            c if is_ident_start(c) => self.scan_ident(),
            c => {
                self.advance();
                TokenKind::Error(format!("unexpected character: {c}"))
            }
        };

        if !kind.is_trivia() {
            self.regex_allowed = !kind.ends_expression();
        }

        Token::new(
            kind,
            Span::new(start, self.position, start_line, start_column),
            newline_before,
        )
    }

    /// Tokenizes all source and returns a vector of tokens.
    ///
    /// Comments are included in the output. The last token is always
    /// [`TokenKind::Eof`].
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Peeks at the character `n` positions ahead.
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Advances past the next `n` characters.
    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Consumes one character and yields `kind`.
    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// Consumes the longest of `longer` that matches, or else `fallback`.
    ///
    /// `fallback` must match at the current position.
    fn scan_operator(&mut self, longer: &[&str], fallback: &str) -> TokenKind {
        let op = longer
            .iter()
            .copied()
            .find(|op| self.rest.starts_with(op))
            .unwrap_or(fallback);
        self.advance_n(op.chars().count());
        TokenKind::Operator(op.to_string())
    }

    /// Skips whitespace characters, reporting whether a line break was seen.
    fn skip_whitespace(&mut self) -> bool {
        let mut newline = false;
        while let Some(c) = self.peek_char() {
            if is_line_terminator(c) {
                newline = true;
                self.advance();
            } else if c.is_whitespace() || c == '\u{feff}' {
                self.advance();
            } else {
                break;
            }
        }
        newline
    }

    /// Scans a `//` comment up to (not including) the line break.
    fn scan_line_comment(&mut self) -> TokenKind {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if is_line_terminator(c) {
                break;
            }
            self.advance();
        }
        TokenKind::Comment(self.source[start..self.position].to_string())
    }

    /// Scans a `/* */` comment.
    fn scan_block_comment(&mut self) -> TokenKind {
        let start = self.position;
        self.advance_n(2);
        loop {
            if self.rest.starts_with("*/") {
                self.advance_n(2);
                return TokenKind::Comment(self.source[start..self.position].to_string());
            }
            if self.peek_char().is_none() {
                return TokenKind::Error("unterminated block comment".into());
            }
            self.advance();
        }
    }

    /// Scans `#name` private names and a leading `#!` line.
    fn scan_hash(&mut self) -> TokenKind {
        if self.position == 0 && self.rest.starts_with("#!") {
            return self.scan_line_comment();
        }
        self.advance(); // consume '#'
        match self.peek_char() {
            Some(c) if is_ident_start(c) => {
                let name = self.scan_ident_text();
                TokenKind::PrivateName(name)
            }
            Some(c) => TokenKind::Error(format!("unexpected character after #: {c}")),
            None => TokenKind::Error("unexpected end of input after #".into()),
        }
    }

    /// Scans a quoted string literal.
    fn scan_string(&mut self, quote: char) -> TokenKind {
        self.advance(); // consume opening quote
        let mut text = String::new();
        loop {
            match self.peek_char() {
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.scan_escape() {
                        Ok(Some(c)) => text.push(c),
                        Ok(None) => {}
                        Err(message) => return TokenKind::Error(message),
                    }
                }
                Some('\n' | '\r') | None => {
                    return TokenKind::Error("unterminated string literal".into());
                }
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
            }
        }
        TokenKind::String(text)
    }

    /// Scans the escape sequence following a backslash.
    ///
    /// Returns `None` for a line continuation.
    fn scan_escape(&mut self) -> Result<Option<char>, String> {
        let Some(c) = self.peek_char() else {
            return Err("unexpected end of input in string escape".into());
        };
        self.advance();
        let decoded = match c {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            '0' if !self.peek_char().is_some_and(|c| c.is_ascii_digit()) => '\0',
            'x' => self.scan_hex_digits(2)?,
            'u' if self.peek_char() == Some('{') => {
                self.advance();
                let start = self.position;
                while self.peek_char().is_some_and(|c| c.is_ascii_hexdigit()) {
                    self.advance();
                }
                let digits = &self.source[start..self.position];
                if self.peek_char() != Some('}') || digits.is_empty() {
                    return Err("invalid unicode escape".into());
                }
                self.advance();
                u32::from_str_radix(digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            'u' => self.scan_hex_digits(4)?,
            '\r' => {
                if self.peek_char() == Some('\n') {
                    self.advance();
                }
                return Ok(None);
            }
            '\n' | '\u{2028}' | '\u{2029}' => return Ok(None),
            other => other,
        };
        Ok(Some(decoded))
    }

    /// Scans exactly `count` hex digits into a character.
    fn scan_hex_digits(&mut self, count: usize) -> Result<char, String> {
        let start = self.position;
        for _ in 0..count {
            if !self.peek_char().is_some_and(|c| c.is_ascii_hexdigit()) {
                return Err("invalid hexadecimal escape".into());
            }
            self.advance();
        }
        Ok(u32::from_str_radix(&self.source[start..self.position], 16)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    /// Scans a template literal, including any nested substitutions.
    fn scan_template(&mut self) -> TokenKind {
        let body_start = self.position + 1;
        match self.skip_template() {
            Ok(has_substitutions) => TokenKind::Template {
                value: self.source[body_start..self.position - 1].to_string(),
                has_substitutions,
            },
            Err(message) => TokenKind::Error(message),
        }
    }

    /// Skips a template literal starting at its opening backtick.
    fn skip_template(&mut self) -> Result<bool, String> {
        self.advance(); // consume '`'
        let mut has_substitutions = false;
        loop {
            match self.peek_char() {
                Some('`') => {
                    self.advance();
                    return Ok(has_substitutions);
                }
                Some('\\') => self.advance_n(2),
                Some('$') if self.rest.starts_with("${") => {
                    has_substitutions = true;
                    self.advance_n(2);
                    self.skip_substitution()?;
                }
                Some(_) => self.advance(),
                None => return Err("unterminated template literal".into()),
            }
        }
    }

    /// Skips the body of a `${...}` substitution, including its closing brace.
    fn skip_substitution(&mut self) -> Result<(), String> {
        let mut depth = 1usize;
        loop {
            match self.peek_char() {
                Some('{') => {
                    depth += 1;
                    self.advance();
                }
                Some('}') => {
                    self.advance();
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(quote @ ('"' | '\'')) => {
                    if let TokenKind::Error(message) = self.scan_string(quote) {
                        return Err(message);
                    }
                }
                Some('`') => {
                    self.skip_template()?;
                }
                Some(_) => self.advance(),
                None => return Err("unterminated template literal".into()),
            }
        }
    }

    /// Scans a regular expression literal with its flags.
    fn scan_regex(&mut self) -> TokenKind {
        let start = self.position;
        self.advance(); // consume opening '/'
        let mut in_class = false;
        loop {
            match self.peek_char() {
                Some('\\') => self.advance_n(2),
                Some('[') => {
                    in_class = true;
                    self.advance();
                }
                Some(']') => {
                    in_class = false;
                    self.advance();
                }
                Some('/') if !in_class => {
                    self.advance();
                    break;
                }
                Some(c) if is_line_terminator(c) => {
                    return TokenKind::Error("unterminated regular expression".into());
                }
                Some(_) => self.advance(),
                None => return TokenKind::Error("unterminated regular expression".into()),
            }
        }
        while self.peek_char().is_some_and(is_ident_part) {
            self.advance();
        }
        TokenKind::Regex(self.source[start..self.position].to_string())
    }

    /// Scans a numeric literal.
    #[allow(clippy::cast_precision_loss)]
    fn scan_number(&mut self) -> TokenKind {
        let start = self.position;

        let radix = match (self.peek_char(), self.peek_char_n(1)) {
            (Some('0'), Some('x' | 'X')) => Some(16),
            (Some('0'), Some('o' | 'O')) => Some(8),
            (Some('0'), Some('b' | 'B')) => Some(2),
            _ => None,
        };

        if let Some(radix) = radix {
            self.advance_n(2);
            let digits_start = self.position;
            while self
                .peek_char()
                .is_some_and(|c| c.is_ascii_hexdigit() || c == '_')
            {
                self.advance();
            }
            let digits: String = self.source[digits_start..self.position]
                .chars()
                .filter(|c| *c != '_')
                .collect();
            if self.peek_char() == Some('n') {
                self.advance();
            }
            return match u64::from_str_radix(&digits, radix) {
                Ok(n) => TokenKind::Number(n as f64),
                Err(e) => TokenKind::Error(format!("invalid number literal: {e}")),
            };
        }

        self.skip_digits();
        if self.peek_char() == Some('.') {
            self.advance();
            self.skip_digits();
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let signed = matches!(self.peek_char_n(1), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self
                .peek_char_n(digit_at)
                .is_some_and(|c| c.is_ascii_digit())
            {
                self.advance_n(digit_at);
                self.skip_digits();
            }
        }

        let text: String = self.source[start..self.position]
            .chars()
            .filter(|c| *c != '_')
            .collect();
        if self.peek_char() == Some('n') {
            self.advance();
        }

        match text.parse::<f64>() {
            Ok(n) => TokenKind::Number(n),
            Err(e) => TokenKind::Error(format!("invalid number literal: {e}")),
        }
    }

    /// Skips decimal digits and numeric separators.
    fn skip_digits(&mut self) {
        while self
            .peek_char()
            .is_some_and(|c| c.is_ascii_digit() || c == '_')
        {
            self.advance();
        }
    }

    /// Scans an identifier or keyword.
    fn scan_ident(&mut self) -> TokenKind {
        TokenKind::Ident(self.scan_ident_text())
    }

    /// Scans identifier text.
    fn scan_ident_text(&mut self) -> String {
        let start = self.position;
        while self.peek_char().is_some_and(is_ident_part) {
            self.advance();
        }
        self.source[start..self.position].to_string()
    }
}

/// Returns true if `c` can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

/// Returns true if `c` can continue an identifier.
fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '\u{200c}' || c == '\u{200d}'
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
