//! Parser for MJ source: token stream management and AST construction.
//!
//! The grammar rules live in `grammar.rs`; this module holds the token
//! cursor, error reporting, and recovery plumbing. The parser builds the
//! tree bottom-up through the AST constructors and assembles every list with
//! `attach_leftmost`/`attach_rightmost`, so a later pass can count list
//! elements with `left_depth`.

mod grammar;
pub mod lexer;

#[cfg(test)]
mod lexer_tests;

use mj_core::{Interner, NameId};

use crate::ast::{Ast, NodeId};
use crate::diagnostics::Diagnostics;

use lexer::{Token, TokenKind, lex};

/// Everything the parser produces: the tree, its root, and the side tables.
#[derive(Debug)]
pub struct ParseOutput {
    pub ast: Ast,
    pub root: NodeId,
    pub interner: Interner,
    pub diagnostics: Diagnostics,
}

/// Parse MJ source text into an AST.
///
/// Parsing always yields a tree; syntax errors are collected in the output
/// diagnostics and the affected positions hold `Dummy`.
pub fn parse(source: &str) -> ParseOutput {
    let tokens = lex(source);
    let eof_line = tokens.last().map_or(1, |t| t.line);
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        eof_line,
        ast: Ast::new(),
        interner: Interner::new(),
        diagnostics: Diagnostics::new(),
    };
    let root = parser.parse_program();
    ParseOutput {
        ast: parser.ast,
        root,
        interner: parser.interner,
        diagnostics: parser.diagnostics,
    }
}

pub(crate) struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    eof_line: u32,
    pub(crate) ast: Ast,
    pub(crate) interner: Interner,
    pub(crate) diagnostics: Diagnostics,
}

impl Parser<'_> {
    pub(crate) fn current(&self) -> TokenKind {
        self.tokens.get(self.pos).map_or(TokenKind::Eof, |t| t.kind)
    }

    pub(crate) fn peek(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    pub(crate) fn line(&self) -> u32 {
        self.tokens.get(self.pos).map_or(self.eof_line, |t| t.line)
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    /// Consume and return the current token.
    pub(crate) fn bump(&mut self) -> Token {
        let token = self.tokens.get(self.pos).copied().unwrap_or(Token {
            kind: TokenKind::Eof,
            start: self.source.len() as u32,
            end: self.source.len() as u32,
            line: self.eof_line,
        });
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind, or report and return `None`.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            self.error_here(format!("expected {}, found {}", kind, self.current()));
            None
        }
    }

    pub(crate) fn error_here(&mut self, message: String) {
        let line = self.line();
        self.diagnostics.syntax(line, message);
    }

    /// Consume an identifier and intern it.
    ///
    /// The interner folds case, so nothing downstream ever sees mixed-case
    /// names.
    pub(crate) fn ident(&mut self) -> Option<(NameId, u32)> {
        let token = self.expect(TokenKind::Ident)?;
        Some((self.interner.intern(token.text(self.source)), token.line))
    }

    /// Skip ahead to the next statement boundary, eating a `;` terminator.
    pub(crate) fn recover_stmt(&mut self) {
        while !matches!(
            self.current(),
            TokenKind::Semicolon | TokenKind::BraceClose | TokenKind::Eof
        ) {
            self.bump();
        }
        self.eat(TokenKind::Semicolon);
    }

    pub(crate) fn dummy(&self) -> NodeId {
        NodeId::DUMMY
    }
}
