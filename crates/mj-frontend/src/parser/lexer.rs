//! Lexer for MJ source text.
//!
//! Produces span-based tokens without storing text; text is sliced from the
//! source only when needed. MJ is case-insensitive: keywords match in any
//! case here, and identifier spellings are folded when the parser interns
//! them.
//!
//! ## Error handling
//!
//! Consecutive unrecognized characters coalesce into single `Garbage` tokens
//! rather than producing one error per character, which keeps the token
//! stream manageable for malformed input.

use logos::Logos;
use std::fmt;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip(r"//[^\n]*", allow_greedy = true))]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum TokenKind {
    #[token("program", ignore(case))]
    KwProgram,
    #[token("class", ignore(case))]
    KwClass,
    #[token("method", ignore(case))]
    KwMethod,
    #[token("val", ignore(case))]
    KwVal,
    #[token("ref", ignore(case))]
    KwRef,
    #[token("int", ignore(case))]
    KwInt,
    #[token("void", ignore(case))]
    KwVoid,
    #[token("if", ignore(case))]
    KwIf,
    #[token("else", ignore(case))]
    KwElse,
    #[token("while", ignore(case))]
    KwWhile,
    #[token("return", ignore(case))]
    KwReturn,

    #[regex("[a-zA-Z][a-zA-Z0-9_]*")]
    Ident,
    #[regex("[0-9]+")]
    IntLiteral,
    #[regex(r"'[^'\n]'")]
    CharLiteral,
    #[regex(r#""[^"\n]*""#)]
    StringLiteral,

    #[token(":=")]
    Assign,
    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,

    /// A run of characters the lexer could not recognize.
    Garbage,
    /// Synthetic end-of-input marker used by the parser.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::KwProgram => "`program`",
            Self::KwClass => "`class`",
            Self::KwMethod => "`method`",
            Self::KwVal => "`val`",
            Self::KwRef => "`ref`",
            Self::KwInt => "`int`",
            Self::KwVoid => "`void`",
            Self::KwIf => "`if`",
            Self::KwElse => "`else`",
            Self::KwWhile => "`while`",
            Self::KwReturn => "`return`",
            Self::Ident => "identifier",
            Self::IntLiteral => "integer literal",
            Self::CharLiteral => "character literal",
            Self::StringLiteral => "string literal",
            Self::Assign => "`:=`",
            Self::EqEq => "`==`",
            Self::Eq => "`=`",
            Self::BangEq => "`!=`",
            Self::LtEq => "`<=`",
            Self::GtEq => "`>=`",
            Self::Lt => "`<`",
            Self::Gt => "`>`",
            Self::Plus => "`+`",
            Self::Minus => "`-`",
            Self::Star => "`*`",
            Self::Slash => "`/`",
            Self::AmpAmp => "`&&`",
            Self::PipePipe => "`||`",
            Self::Bang => "`!`",
            Self::ParenOpen => "`(`",
            Self::ParenClose => "`)`",
            Self::BraceOpen => "`{`",
            Self::BraceClose => "`}`",
            Self::BracketOpen => "`[`",
            Self::BracketClose => "`]`",
            Self::Semicolon => "`;`",
            Self::Comma => "`,`",
            Self::Dot => "`.`",
            Self::Garbage => "unrecognized input",
            Self::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// Zero-copy token: kind + span + 1-based source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: u32,
    pub end: u32,
    pub line: u32,
}

impl Token {
    fn new(kind: TokenKind, span: Range<usize>, line: u32) -> Self {
        Self {
            kind,
            start: span.start as u32,
            end: span.end as u32,
            line,
        }
    }

    /// Slice the token's text out of the source it was lexed from.
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        &source[self.start as usize..self.end as usize]
    }
}

/// Tokenizes source into a vector of line-tagged tokens.
///
/// Post-processes the Logos output to coalesce consecutive lexer errors into
/// single `Garbage` tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let lines = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        start..end,
                        lines.line_at(start),
                    ));
                }
                let span = lexer.span();
                let line = lines.line_at(span.start);
                tokens.push(Token::new(kind, span, line));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        start..source.len(),
                        lines.line_at(start),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// Maps byte offsets to 1-based line numbers.
struct LineIndex {
    starts: Vec<u32>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                starts.push(i as u32 + 1);
            }
        }
        Self { starts }
    }

    fn line_at(&self, offset: usize) -> u32 {
        self.starts.partition_point(|&s| s <= offset as u32) as u32
    }
}
