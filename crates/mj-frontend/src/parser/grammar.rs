//! Grammar rules: recursive descent over the token stream.
//!
//! Each `parse_*` method returns the `NodeId` of the construct it built, or
//! `Dummy` after an error. The tree shapes produced here are load-bearing:
//! the analyzer walks them by position (see the handler shapes in
//! `analyze`), so every list is assembled through `attach_leftmost` /
//! `attach_rightmost` and absent children are always `Dummy`.

use mj_core::NameId;

use crate::ast::{NodeId, NodeKind, OpKind};

use super::Parser;
use super::lexer::TokenKind;

/// Base of a type reference: the primitive marker or a class name.
#[derive(Clone, Copy)]
enum TyBase {
    Int,
    Class(NameId),
}

impl Parser<'_> {
    /// program := "program" ident ";" class*
    pub(crate) fn parse_program(&mut self) -> NodeId {
        let line = self.line();
        self.expect(TokenKind::KwProgram);
        let name = match self.ident() {
            Some((name, nline)) => self.ast.make_leaf(NodeKind::IdRef(name), nline),
            None => self.dummy(),
        };
        self.expect(TokenKind::Semicolon);

        let mut classes = self.dummy();
        loop {
            match self.current() {
                TokenKind::KwClass => {
                    let cline = self.line();
                    let class = self.parse_class();
                    let wrapper = self.ast.make_op(OpKind::ClassOp, NodeId::DUMMY, class, cline);
                    classes = self.ast.attach_leftmost(classes, wrapper);
                }
                TokenKind::Eof => break,
                other => {
                    self.error_here(format!("expected `class`, found {other}"));
                    self.bump();
                }
            }
        }

        self.ast.make_op(OpKind::ProgramOp, classes, name, line)
    }

    /// class := "class" ident "{" member* "}"
    fn parse_class(&mut self) -> NodeId {
        let line = self.line();
        self.bump(); // `class`
        let name = match self.ident() {
            Some((name, nline)) => self.ast.make_leaf(NodeKind::IdRef(name), nline),
            None => self.dummy(),
        };
        self.expect(TokenKind::BraceOpen);

        let mut members = self.dummy();
        while !self.at(TokenKind::BraceClose) && !self.at(TokenKind::Eof) {
            let mline = self.line();
            let member = match self.current() {
                TokenKind::KwMethod => self.parse_method(),
                TokenKind::KwInt | TokenKind::Ident => self.parse_decl(),
                other => {
                    self.error_here(format!(
                        "expected a field or method declaration, found {other}"
                    ));
                    self.bump();
                    continue;
                }
            };
            if self.ast.is_null(member) {
                continue;
            }
            let wrapper = self.ast.make_op(OpKind::BodyOp, NodeId::DUMMY, member, mline);
            members = self.ast.attach_leftmost(members, wrapper);
        }
        self.expect(TokenKind::BraceClose);

        self.ast.make_op(OpKind::ClassDefOp, members, name, line)
    }

    /// decl := type declarator ("," declarator)* ";"
    /// declarator := ident ("[" expr "]")* ("=" expr)?
    ///
    /// Yields a left-recursive `DeclOp` spine, one node per declarator, each
    /// right child a `CommaOp(name, CommaOp(type, initializer))`. Every
    /// declarator gets its own type subtree so the analyzer can hang it off
    /// the symbol unshared.
    fn parse_decl(&mut self) -> NodeId {
        let Some(base) = self.parse_type_base() else {
            self.recover_stmt();
            return self.dummy();
        };

        let mut spine = self.dummy();
        loop {
            let Some((name, nline)) = self.ident() else {
                self.recover_stmt();
                return spine;
            };
            let name_leaf = self.ast.make_leaf(NodeKind::IdRef(name), nline);

            let mut dims = self.dummy();
            while self.eat(TokenKind::BracketOpen) {
                let bline = self.line();
                let bound = self.parse_expr();
                self.expect(TokenKind::BracketClose);
                let dim = self.ast.make_op(OpKind::IndexOp, bound, NodeId::DUMMY, bline);
                dims = self.ast.attach_rightmost(dim, dims);
            }

            let base_leaf = self.type_base_leaf(base, nline);
            let ty = self.ast.make_op(OpKind::TypeIdOp, base_leaf, dims, nline);

            let init = if self.eat(TokenKind::Eq) {
                self.parse_expr()
            } else {
                self.dummy()
            };

            let inner = self.ast.make_op(OpKind::CommaOp, ty, init, nline);
            let declarator = self.ast.make_op(OpKind::CommaOp, name_leaf, inner, nline);
            let item = self
                .ast
                .make_op(OpKind::DeclOp, NodeId::DUMMY, declarator, nline);
            spine = self.ast.attach_leftmost(spine, item);

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::Semicolon);
        spine
    }

    fn parse_type_base(&mut self) -> Option<TyBase> {
        match self.current() {
            TokenKind::KwInt => {
                self.bump();
                Some(TyBase::Int)
            }
            TokenKind::Ident => {
                let (name, _) = self.ident()?;
                Some(TyBase::Class(name))
            }
            other => {
                self.error_here(format!("expected a type, found {other}"));
                None
            }
        }
    }

    fn type_base_leaf(&mut self, base: TyBase, line: u32) -> NodeId {
        match base {
            TyBase::Int => self.ast.make_leaf(NodeKind::IntType, line),
            TyBase::Class(name) => self.ast.make_leaf(NodeKind::IdRef(name), line),
        }
    }

    /// method := "method" ("void" | type) ident "(" params? ")" block
    fn parse_method(&mut self) -> NodeId {
        let line = self.line();
        self.bump(); // `method`

        let ret = if self.eat(TokenKind::KwVoid) {
            self.dummy()
        } else {
            let rline = self.line();
            match self.parse_type_base() {
                Some(base) => {
                    let base_leaf = self.type_base_leaf(base, rline);
                    self.ast
                        .make_op(OpKind::TypeIdOp, base_leaf, NodeId::DUMMY, rline)
                }
                None => self.dummy(),
            }
        };

        let (name_leaf, nline) = match self.ident() {
            Some((name, nline)) => (self.ast.make_leaf(NodeKind::IdRef(name), nline), nline),
            None => (self.dummy(), line),
        };

        self.expect(TokenKind::ParenOpen);
        let params = if self.at(TokenKind::ParenClose) {
            self.dummy()
        } else {
            self.parse_params()
        };
        self.expect(TokenKind::ParenClose);

        let spec = self.ast.make_op(OpKind::SpecOp, params, ret, nline);
        let head = self.ast.make_op(OpKind::HeadOp, name_leaf, spec, nline);
        let body = self.parse_block();
        self.ast.make_op(OpKind::MethodOp, head, body, line)
    }

    /// params := ("val" | "ref")? type ident ("," ...)*
    ///
    /// Wrappers link on their right child; each wrapper's left child is
    /// `CommaOp(name, type)`.
    fn parse_params(&mut self) -> NodeId {
        let mut spine = self.dummy();
        loop {
            let mode = if self.eat(TokenKind::KwRef) {
                OpKind::RArgTypeOp
            } else {
                self.eat(TokenKind::KwVal);
                OpKind::VArgTypeOp
            };

            let Some(base) = self.parse_type_base() else {
                break;
            };
            let Some((name, pline)) = self.ident() else {
                break;
            };

            let base_leaf = self.type_base_leaf(base, pline);
            let ty = self
                .ast
                .make_op(OpKind::TypeIdOp, base_leaf, NodeId::DUMMY, pline);
            let name_leaf = self.ast.make_leaf(NodeKind::IdRef(name), pline);
            let inner = self.ast.make_op(OpKind::CommaOp, name_leaf, ty, pline);
            let wrapper = self.ast.make_op(mode, inner, NodeId::DUMMY, pline);
            spine = self.ast.attach_rightmost(wrapper, spine);

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        spine
    }

    /// block := "{" (decl | stmt)* "}"
    ///
    /// Yields a left-recursive `StmtOp` spine (or `Dummy` for an empty
    /// block). Blocks do not open scopes; only classes and methods do.
    fn parse_block(&mut self) -> NodeId {
        self.expect(TokenKind::BraceOpen);
        let mut spine = self.dummy();
        while !self.at(TokenKind::BraceClose) && !self.at(TokenKind::Eof) {
            let line = self.line();
            let item = match self.current() {
                TokenKind::KwInt => self.parse_decl(),
                TokenKind::Ident if self.peek() == TokenKind::Ident => self.parse_decl(),
                _ => self.parse_statement(),
            };
            if self.ast.is_null(item) {
                continue;
            }
            let wrapper = self.ast.make_op(OpKind::StmtOp, NodeId::DUMMY, item, line);
            spine = self.ast.attach_leftmost(spine, wrapper);
        }
        self.expect(TokenKind::BraceClose);
        spine
    }

    fn parse_statement(&mut self) -> NodeId {
        match self.current() {
            TokenKind::KwIf => {
                let line = self.line();
                self.bump();
                self.expect(TokenKind::ParenOpen);
                let cond = self.parse_expr();
                self.expect(TokenKind::ParenClose);
                let then_arm = self.parse_statement();
                let else_arm = if self.eat(TokenKind::KwElse) {
                    self.parse_statement()
                } else {
                    self.dummy()
                };
                let arms = self.ast.make_op(OpKind::CommaOp, then_arm, else_arm, line);
                self.ast.make_op(OpKind::IfElseOp, cond, arms, line)
            }
            TokenKind::KwWhile => {
                let line = self.line();
                self.bump();
                self.expect(TokenKind::ParenOpen);
                let cond = self.parse_expr();
                self.expect(TokenKind::ParenClose);
                let body = self.parse_statement();
                self.ast.make_op(OpKind::LoopOp, cond, body, line)
            }
            TokenKind::KwReturn => {
                let line = self.line();
                self.bump();
                let value = if self.at(TokenKind::Semicolon) {
                    self.dummy()
                } else {
                    self.parse_expr()
                };
                self.expect(TokenKind::Semicolon);
                self.ast.make_op(OpKind::ReturnOp, value, NodeId::DUMMY, line)
            }
            TokenKind::BraceOpen => self.parse_block(),
            TokenKind::Ident => {
                let line = self.line();
                let var = self.parse_var();
                match self.current() {
                    TokenKind::Assign => {
                        self.bump();
                        let value = self.parse_expr();
                        self.expect(TokenKind::Semicolon);
                        self.ast.make_op(OpKind::AssignOp, var, value, line)
                    }
                    TokenKind::ParenOpen => {
                        let args = self.parse_args();
                        self.expect(TokenKind::Semicolon);
                        self.ast.make_op(OpKind::RoutineCallOp, var, args, line)
                    }
                    other => {
                        self.error_here(format!("expected `:=` or `(`, found {other}"));
                        self.recover_stmt();
                        self.dummy()
                    }
                }
            }
            other => {
                self.error_here(format!("expected a statement, found {other}"));
                self.bump();
                self.recover_stmt();
                self.dummy()
            }
        }
    }

    /// var := ident ("." ident | "[" expr "]")*
    ///
    /// The access chain is a `SelectOp` spine linked on the right; each
    /// link's left child is a `FieldOp` or `IndexOp`.
    fn parse_var(&mut self) -> NodeId {
        let (base, line) = match self.ident() {
            Some((name, nline)) => (self.ast.make_leaf(NodeKind::IdRef(name), nline), nline),
            None => (self.dummy(), self.line()),
        };

        let mut chain = self.dummy();
        loop {
            let aline = self.line();
            let access = if self.eat(TokenKind::Dot) {
                let field = match self.ident() {
                    Some((name, fline)) => self.ast.make_leaf(NodeKind::IdRef(name), fline),
                    None => self.dummy(),
                };
                self.ast.make_op(OpKind::FieldOp, field, NodeId::DUMMY, aline)
            } else if self.eat(TokenKind::BracketOpen) {
                let index = self.parse_expr();
                self.expect(TokenKind::BracketClose);
                self.ast.make_op(OpKind::IndexOp, index, NodeId::DUMMY, aline)
            } else {
                break;
            };
            let sel = self.ast.make_op(OpKind::SelectOp, access, NodeId::DUMMY, aline);
            chain = self.ast.attach_rightmost(sel, chain);
        }

        self.ast.make_op(OpKind::VarOp, base, chain, line)
    }

    /// args := "(" (expr ("," expr)*)? ")"
    ///
    /// A left-recursive `CommaOp` spine, so `left_depth` counts arguments.
    fn parse_args(&mut self) -> NodeId {
        self.expect(TokenKind::ParenOpen);
        let mut spine = self.dummy();
        if !self.at(TokenKind::ParenClose) {
            loop {
                let line = self.line();
                let arg = self.parse_expr();
                let wrapper = self.ast.make_op(OpKind::CommaOp, NodeId::DUMMY, arg, line);
                spine = self.ast.attach_leftmost(spine, wrapper);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::ParenClose);
        spine
    }

    pub(crate) fn parse_expr(&mut self) -> NodeId {
        self.parse_or()
    }

    fn parse_or(&mut self) -> NodeId {
        let mut lhs = self.parse_and();
        while self.at(TokenKind::PipePipe) {
            let line = self.line();
            self.bump();
            let rhs = self.parse_and();
            lhs = self.ast.make_op(OpKind::OrOp, lhs, rhs, line);
        }
        lhs
    }

    fn parse_and(&mut self) -> NodeId {
        let mut lhs = self.parse_comparison();
        while self.at(TokenKind::AmpAmp) {
            let line = self.line();
            self.bump();
            let rhs = self.parse_comparison();
            lhs = self.ast.make_op(OpKind::AndOp, lhs, rhs, line);
        }
        lhs
    }

    /// Comparisons do not chain: `a < b < c` is a syntax error upstream.
    fn parse_comparison(&mut self) -> NodeId {
        let lhs = self.parse_additive();
        let op = match self.current() {
            TokenKind::EqEq => OpKind::EQOp,
            TokenKind::BangEq => OpKind::NEOp,
            TokenKind::Lt => OpKind::LTOp,
            TokenKind::LtEq => OpKind::LEOp,
            TokenKind::Gt => OpKind::GTOp,
            TokenKind::GtEq => OpKind::GEOp,
            _ => return lhs,
        };
        let line = self.line();
        self.bump();
        let rhs = self.parse_additive();
        self.ast.make_op(op, lhs, rhs, line)
    }

    fn parse_additive(&mut self) -> NodeId {
        let mut lhs = self.parse_multiplicative();
        loop {
            let op = match self.current() {
                TokenKind::Plus => OpKind::AddOp,
                TokenKind::Minus => OpKind::SubOp,
                _ => return lhs,
            };
            let line = self.line();
            self.bump();
            let rhs = self.parse_multiplicative();
            lhs = self.ast.make_op(op, lhs, rhs, line);
        }
    }

    fn parse_multiplicative(&mut self) -> NodeId {
        let mut lhs = self.parse_unary();
        loop {
            let op = match self.current() {
                TokenKind::Star => OpKind::MultOp,
                TokenKind::Slash => OpKind::DivOp,
                _ => return lhs,
            };
            let line = self.line();
            self.bump();
            let rhs = self.parse_unary();
            lhs = self.ast.make_op(op, lhs, rhs, line);
        }
    }

    fn parse_unary(&mut self) -> NodeId {
        match self.current() {
            TokenKind::Minus => {
                let line = self.line();
                self.bump();
                let operand = self.parse_unary();
                self.ast
                    .make_op(OpKind::UnaryNegOp, operand, NodeId::DUMMY, line)
            }
            TokenKind::Bang => {
                let line = self.line();
                self.bump();
                let operand = self.parse_unary();
                self.ast.make_op(OpKind::NotOp, operand, NodeId::DUMMY, line)
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> NodeId {
        match self.current() {
            TokenKind::IntLiteral => {
                let token = self.bump();
                let value = match token.text(self.source).parse::<i32>() {
                    Ok(v) => v,
                    Err(_) => {
                        self.diagnostics
                            .syntax(token.line, "integer literal out of range".to_string());
                        0
                    }
                };
                self.ast.make_leaf(NodeKind::IntLit(value), token.line)
            }
            TokenKind::CharLiteral => {
                let token = self.bump();
                let text = token.text(self.source);
                let value = text.chars().nth(1).map_or(0, |c| c as i32);
                self.ast.make_leaf(NodeKind::CharLit(value), token.line)
            }
            TokenKind::StringLiteral => {
                let token = self.bump();
                let text = token.text(self.source);
                // Strip the quotes; string contents keep their case.
                let name = self.interner.intern_exact(&text[1..text.len() - 1]);
                self.ast.make_leaf(NodeKind::StringLit(name), token.line)
            }
            TokenKind::ParenOpen => {
                self.bump();
                let inner = self.parse_expr();
                self.expect(TokenKind::ParenClose);
                inner
            }
            TokenKind::Ident => {
                let line = self.line();
                let var = self.parse_var();
                if self.at(TokenKind::ParenOpen) {
                    let args = self.parse_args();
                    self.ast.make_op(OpKind::RoutineCallOp, var, args, line)
                } else {
                    var
                }
            }
            other => {
                self.error_here(format!("expected an expression, found {other}"));
                // Keep recovery anchors in place; anything else is noise.
                if !matches!(
                    other,
                    TokenKind::Semicolon
                        | TokenKind::ParenClose
                        | TokenKind::BracketClose
                        | TokenKind::BraceClose
                        | TokenKind::Eof
                ) {
                    self.bump();
                }
                self.dummy()
            }
        }
    }
}
