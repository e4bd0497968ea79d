//! Logos-based lexer for Java and Kotlin class headers.
//!
//! The token set is the union the header reader needs from both syntaxes.
//! Anything else lexes as [`TokenKind::Error`] and is skipped by the reader.

use logos::Logos;

/// A token with its kind, text, and byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
}

impl Token<'_> {
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    pub fn is_ident(&self, text: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == text
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = match self.inner.next()? {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Error,
        };
        Some(Token {
            kind,
            text: self.inner.slice(),
            offset: self.inner.span().start,
        })
    }
}

/// Tokenize an entire string, dropping whitespace and comments.
pub fn significant_tokens(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).filter(|t| !t.is_trivia()).collect()
}

/// Token kinds seen by the header reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Whitespace,
    LineComment,
    BlockComment,
    Ident,
    StringLit,
    CharLit,
    Number,
    At,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Lt,
    Gt,
    Comma,
    Eq,
    Dot,
    ColonColon,
    Colon,
    Semicolon,
    Star,
    /// Any character the reader has no use for.
    Error,
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    StringLit,

    /// Kotlin raw string or Java text block.
    #[regex(r#""""([^"]|"[^"]|""[^"])*"""+"#)]
    RawString,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    CharLit,

    #[regex(r"[0-9][0-9A-Za-z_]*")]
    Number,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("@")]
    At,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
    #[token(".")]
    Dot,
    #[token("::")]
    ColonColon,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("*")]
    Star,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => TokenKind::Whitespace,
            LogosToken::LineComment => TokenKind::LineComment,
            LogosToken::BlockComment => TokenKind::BlockComment,
            LogosToken::Ident => TokenKind::Ident,
            LogosToken::StringLit | LogosToken::RawString => TokenKind::StringLit,
            LogosToken::CharLit => TokenKind::CharLit,
            LogosToken::Number => TokenKind::Number,
            LogosToken::At => TokenKind::At,
            LogosToken::LParen => TokenKind::LParen,
            LogosToken::RParen => TokenKind::RParen,
            LogosToken::LBracket => TokenKind::LBracket,
            LogosToken::RBracket => TokenKind::RBracket,
            LogosToken::LBrace => TokenKind::LBrace,
            LogosToken::RBrace => TokenKind::RBrace,
            LogosToken::Lt => TokenKind::Lt,
            LogosToken::Gt => TokenKind::Gt,
            LogosToken::Comma => TokenKind::Comma,
            LogosToken::Eq => TokenKind::Eq,
            LogosToken::Dot => TokenKind::Dot,
            LogosToken::ColonColon => TokenKind::ColonColon,
            LogosToken::Colon => TokenKind::Colon,
            LogosToken::Semicolon => TokenKind::Semicolon,
            LogosToken::Star => TokenKind::Star,
        }
    }
}
