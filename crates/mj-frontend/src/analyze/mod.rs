//! Semantic analysis: binds identifier uses to symbol-table entries.
//!
//! One recursive traversal over the AST. Each handler either validates its
//! construct and proceeds, or reports through [`Diagnostics`] and returns
//! early; only capacity overflows and member access on a routine unwind the
//! walk, via [`FatalError`].
//!
//! Analysis is idempotent: every binding and reference site accepts an
//! already-resolved `SymRef` and leaves it alone, so running the analyzer
//! over an analyzed tree produces no new errors and no new rewrites.

mod access;

#[cfg(test)]
mod access_tests;

use mj_core::{Interner, NameId};

use crate::FatalError;
use crate::ast::{Ast, NodeId, NodeKind, OpKind};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::symtab::{AttrKind, AttrValue, SymKind, SymbolTable};

use access::VarContext;

/// Switches that alter analysis behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzerOptions {
    /// Report bindings that are never looked up when their scope closes.
    /// Off by default.
    pub warn_unused: bool,
}

/// What analysis produced: the populated symbol table, plus the fatal error
/// if the walk was cut short. Recoverable findings are in the shared
/// [`Diagnostics`].
#[derive(Debug)]
pub struct Analysis {
    pub symbols: SymbolTable,
    pub fatal: Option<FatalError>,
}

/// Analyze a parsed program, rewriting identifier leaves in place.
pub fn analyze(
    ast: &mut Ast,
    root: NodeId,
    interner: &mut Interner,
    diag: &mut Diagnostics,
    options: AnalyzerOptions,
) -> Analysis {
    let mut symbols = SymbolTable::new();
    let fatal = run(ast, root, interner, diag, options, &mut symbols).err();
    Analysis { symbols, fatal }
}

fn run(
    ast: &mut Ast,
    root: NodeId,
    interner: &mut Interner,
    diag: &mut Diagnostics,
    options: AnalyzerOptions,
    symbols: &mut SymbolTable,
) -> Result<(), FatalError> {
    symbols.init(interner, diag)?;
    let mut analyzer = Analyzer {
        ast,
        symbols,
        diag,
        options,
        main_id: interner.find("main"),
        length_id: interner.find("length"),
    };
    analyzer.node(root)
}

pub(crate) struct Analyzer<'a> {
    pub(crate) ast: &'a mut Ast,
    pub(crate) symbols: &'a mut SymbolTable,
    pub(crate) diag: &'a mut Diagnostics,
    pub(crate) options: AnalyzerOptions,
    /// Interned id of `main`, when the program mentions it.
    pub(crate) main_id: Option<NameId>,
    /// Interned id of `length`, when the program mentions it.
    pub(crate) length_id: Option<NameId>,
}

impl Analyzer<'_> {
    /// Dispatch on the operator at `n`. No-op on leaves and `Dummy`.
    pub(crate) fn node(&mut self, n: NodeId) -> Result<(), FatalError> {
        let Some(op) = self.ast.op_of(n) else {
            return Ok(());
        };
        match op {
            OpKind::ClassDefOp => self.class_def(n),
            OpKind::MethodOp => self.method_def(n),
            OpKind::DeclOp => self.decl(n).map(|_| ()),
            OpKind::SpecOp => self.param_spec(n),
            OpKind::TypeIdOp => self.type_id(n),
            OpKind::VarOp => self.var_use(n, VarContext::General),
            OpKind::RoutineCallOp => self.routine_call(n),
            _ => {
                self.node(self.ast.left(n))?;
                self.node(self.ast.right(n))
            }
        }
    }

    /// Class definition: right child is the class name, left the body.
    ///
    /// The name is inserted before the block opens so self-referential field
    /// types (`node next;` inside `class node`) resolve to the class.
    fn class_def(&mut self, n: NodeId) -> Result<(), FatalError> {
        let name_node = self.ast.right(n);
        let body = self.ast.left(n);
        match self.ast.kind(name_node) {
            NodeKind::IdRef(name) => {
                let line = self.ast.line(name_node);
                let Some(sym) = self.symbols.insert_entry(name, line, self.diag)? else {
                    return Ok(());
                };
                self.symbols.set_attr(
                    sym,
                    AttrKind::Kind,
                    AttrValue::Kind(SymKind::Class),
                    line,
                    self.diag,
                )?;
                self.symbols.open_block(line, self.diag)?;
                self.ast.replace(name_node, NodeKind::SymRef(sym));
                self.node(body)?;
                self.symbols
                    .close_block(self.options.warn_unused, line, self.diag);
                Ok(())
            }
            NodeKind::SymRef(_) => Ok(()),
            _ => Ok(()),
        }
    }

    /// Method definition: left child is `HeadOp(name, SpecOp)`, right the
    /// body block.
    fn method_def(&mut self, n: NodeId) -> Result<(), FatalError> {
        let head = self.ast.left(n);
        let body = self.ast.right(n);
        let name_node = self.ast.left(head);
        let spec = self.ast.right(head);
        match self.ast.kind(name_node) {
            NodeKind::IdRef(name) => {
                let line = self.ast.line(name_node);
                if Some(name) == self.main_id && self.has_symbol_named(name) {
                    // The one cross-scope uniqueness rule: a single main in
                    // the entire program, whatever scope it was seen in.
                    self.diag
                        .report(DiagnosticKind::Redeclaration, line)
                        .named(name)
                        .emit();
                    return Ok(());
                }
                let Some(sym) = self.symbols.insert_entry(name, line, self.diag)? else {
                    return Ok(());
                };
                self.symbols.open_block(line, self.diag)?;

                let ret = self.ast.right(spec);
                if self.ast.is_null(ret) {
                    self.symbols.set_attr(
                        sym,
                        AttrKind::Kind,
                        AttrValue::Kind(SymKind::Proc),
                        line,
                        self.diag,
                    )?;
                } else {
                    self.symbols.set_attr(
                        sym,
                        AttrKind::Kind,
                        AttrValue::Kind(SymKind::Func),
                        line,
                        self.diag,
                    )?;
                    self.symbols.set_attr(
                        sym,
                        AttrKind::Type,
                        AttrValue::Node(ret),
                        line,
                        self.diag,
                    )?;
                }
                let params = self.count_params(spec);
                self.symbols.set_attr(
                    sym,
                    AttrKind::ArgNum,
                    AttrValue::Int(params),
                    line,
                    self.diag,
                )?;

                self.ast.replace(name_node, NodeKind::SymRef(sym));
                self.param_spec(spec)?;
                if !self.ast.is_null(ret) {
                    self.type_id(ret)?;
                }
                self.node(body)?;
                self.symbols
                    .close_block(self.options.warn_unused, line, self.diag);
                Ok(())
            }
            NodeKind::SymRef(_) => Ok(()),
            _ => Ok(()),
        }
    }

    fn has_symbol_named(&self, name: NameId) -> bool {
        self.symbols
            .ids()
            .any(|s| self.symbols.name_of(s) == Some(name))
    }

    fn count_params(&self, spec: NodeId) -> i32 {
        let mut count = 0;
        let mut cur = self.ast.left(spec);
        while !self.ast.is_null(cur) {
            count += 1;
            cur = self.ast.right(cur);
        }
        count
    }

    /// Declaration spine, walked leaves-first so declarators take effect in
    /// source order. Returns `false` when a redeclaration stopped the walk.
    fn decl(&mut self, n: NodeId) -> Result<bool, FatalError> {
        let prev = self.ast.left(n);
        if self.ast.op_of(prev) == Some(OpKind::DeclOp) && !self.decl(prev)? {
            return Ok(false);
        }

        let declarator = self.ast.right(n);
        if self.ast.is_null(declarator) {
            return Ok(true);
        }
        let name_node = self.ast.left(declarator);
        let rest = self.ast.right(declarator);
        let ty = self.ast.left(rest);
        let init = self.ast.right(rest);

        let name = match self.ast.kind(name_node) {
            NodeKind::IdRef(name) => name,
            _ => return Ok(true),
        };
        let line = self.ast.line(name_node);
        let Some(sym) = self.symbols.insert_entry(name, line, self.diag)? else {
            return Ok(false);
        };
        self.symbols
            .set_attr(sym, AttrKind::Type, AttrValue::Node(ty), line, self.diag)?;
        self.ast.replace(name_node, NodeKind::SymRef(sym));
        self.type_id(ty)?;

        // The symbol's kind follows the type shape: a dimension chain makes
        // it an array, otherwise a plain variable.
        let dims = self.ast.right(ty);
        if self.ast.is_null(dims) {
            self.symbols.set_attr(
                sym,
                AttrKind::Kind,
                AttrValue::Kind(SymKind::Var),
                line,
                self.diag,
            )?;
        } else {
            let mut count = 0;
            let mut cur = dims;
            while self.ast.op_of(cur) == Some(OpKind::IndexOp) {
                count += 1;
                cur = self.ast.right(cur);
            }
            self.symbols
                .set_attr(sym, AttrKind::Dimen, AttrValue::Int(count), line, self.diag)?;
            self.symbols.set_attr(
                sym,
                AttrKind::Kind,
                AttrValue::Kind(SymKind::Arr),
                line,
                self.diag,
            )?;
        }

        if !self.ast.is_null(init) {
            if self.ast.op_of(init) == Some(OpKind::VarOp) {
                self.var_use(init, VarContext::InDeclaration)?;
            } else {
                self.node(init)?;
            }
        }
        Ok(true)
    }

    /// Parameter spec: wrappers linked on their right child, each carrying
    /// `CommaOp(name, type)` on the left.
    fn param_spec(&mut self, n: NodeId) -> Result<(), FatalError> {
        let mut cur = self.ast.left(n);
        while !self.ast.is_null(cur) {
            let wrapper = self.ast.op_of(cur);
            let inner = self.ast.left(cur);
            let name_node = self.ast.left(inner);
            let ty = self.ast.right(inner);
            if let NodeKind::IdRef(name) = self.ast.kind(name_node) {
                let line = self.ast.line(name_node);
                let Some(sym) = self.symbols.insert_entry(name, line, self.diag)? else {
                    return Ok(());
                };
                self.symbols
                    .set_attr(sym, AttrKind::Type, AttrValue::Node(ty), line, self.diag)?;
                let kind = if wrapper == Some(OpKind::RArgTypeOp) {
                    SymKind::RefArg
                } else {
                    SymKind::ValueArg
                };
                self.symbols.set_attr(
                    sym,
                    AttrKind::Kind,
                    AttrValue::Kind(kind),
                    line,
                    self.diag,
                )?;
                self.ast.replace(name_node, NodeKind::SymRef(sym));
                self.type_id(ty)?;
            }
            cur = self.ast.right(cur);
        }
        Ok(())
    }

    /// Type reference: resolve identifier leaves down the dimension spine.
    ///
    /// Unresolved user types are reported by the lookup and the spine
    /// continues; dimension bounds that are expressions are analyzed so
    /// identifiers inside them resolve too.
    fn type_id(&mut self, n: NodeId) -> Result<(), FatalError> {
        let mut cur = n;
        while !self.ast.is_null(cur) {
            let l = self.ast.left(cur);
            match self.ast.kind(l) {
                NodeKind::IdRef(name) => {
                    let line = self.ast.line(l);
                    if let Some(sym) = self.symbols.lookup(name, line, self.diag)? {
                        self.ast.replace(l, NodeKind::SymRef(sym));
                    }
                }
                NodeKind::Op { .. } => self.node(l)?,
                _ => {}
            }
            cur = self.ast.right(cur);
        }
        Ok(())
    }
}
