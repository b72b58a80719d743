//! Variable-access resolution: the anchor walk over access chains.
//!
//! A `VarOp` carries a base identifier plus a `SelectOp` chain of field and
//! index accesses. Resolution tracks an *anchor* (the currently-focused
//! symbol) and dispatches on its kind as the chain is consumed: scalars end
//! the walk, class-typed anchors resolve fields by scanning the entries
//! declared inside the class, arrays consume index steps against their
//! declared dimension count. The one fatal semantic error lives here:
//! taking a member or index of a routine.

use mj_core::NameId;

use crate::FatalError;
use crate::ast::{NodeId, NodeKind, OpKind};
use crate::diagnostics::DiagnosticKind;
use crate::symtab::{AttrKind, AttrValue, SymId, SymKind};

use super::Analyzer;

/// Where the variable use appears; declaration context legalizes dimension
/// bounds on class-typed declarators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VarContext {
    General,
    InDeclaration,
    InRoutineCall,
}

impl Analyzer<'_> {
    /// Resolve a `VarOp`: bind the base, then walk the access chain.
    pub(crate) fn var_use(&mut self, n: NodeId, ctx: VarContext) -> Result<(), FatalError> {
        let base = self.ast.left(n);
        let sym = match self.ast.kind(base) {
            NodeKind::IdRef(name) => {
                let line = self.ast.line(base);
                let Some(sym) = self.symbols.lookup(name, line, self.diag)? else {
                    return Ok(());
                };
                self.ast.replace(base, NodeKind::SymRef(sym));
                sym
            }
            // Resolved on a previous pass, chain included.
            NodeKind::SymRef(_) => return Ok(()),
            _ => return Ok(()),
        };

        let mut anchor = sym;
        let mut nest = self.symbols.nest_of(anchor);
        let mut access = self.ast.right(n);

        loop {
            match self.symbols.kind_of(anchor) {
                Some(
                    SymKind::Var
                    | SymKind::ValueArg
                    | SymKind::RefArg
                    | SymKind::Field
                    | SymKind::Const,
                ) => {
                    let Some(ty) = self
                        .symbols
                        .attr(anchor, AttrKind::Type)
                        .and_then(AttrValue::as_node)
                    else {
                        return Ok(());
                    };
                    let base_ty = self.ast.left(ty);
                    match self.ast.kind(base_ty) {
                        NodeKind::IntType => {
                            // Scalar: nothing may follow.
                            if !self.ast.is_null(access) {
                                let line = self.ast.line(access);
                                self.diag
                                    .report(DiagnosticKind::FieldMismatch, line)
                                    .maybe_named(self.symbols.name_of(anchor))
                                    .emit();
                            }
                            return Ok(());
                        }
                        NodeKind::SymRef(class) => {
                            // Class-typed variable: continue field
                            // resolution inside the class.
                            anchor = class;
                            nest = self.symbols.nest_of(class);
                        }
                        // The type never resolved; reported at declaration.
                        _ => return Ok(()),
                    }
                }
                Some(
                    SymKind::Proc | SymKind::Func | SymKind::ProcForward | SymKind::FuncForward,
                ) => {
                    if self.ast.is_null(access) {
                        return Ok(());
                    }
                    let line = self.ast.line(access);
                    self.diag
                        .report(DiagnosticKind::VariableMisuse, line)
                        .maybe_named(self.symbols.name_of(anchor))
                        .abort()
                        .emit();
                    return Err(FatalError::RoutineAccess);
                }
                Some(SymKind::Class | SymKind::TypeDef) => {
                    if self.ast.is_null(access) {
                        return Ok(());
                    }
                    let item = self.ast.left(access);
                    match self.ast.op_of(item) {
                        Some(OpKind::FieldOp) => {
                            let field_node = self.ast.left(item);
                            match self.ast.kind(field_node) {
                                NodeKind::IdRef(field) => {
                                    let line = self.ast.line(field_node);
                                    let Some(found) = self.find_field(anchor, nest, field) else {
                                        self.diag
                                            .report(DiagnosticKind::Undeclared, line)
                                            .named(field)
                                            .emit();
                                        return Ok(());
                                    };
                                    self.ast.replace(field_node, NodeKind::SymRef(found));
                                    nest = self.symbols.nest_of(found);
                                    anchor = found;
                                    access = self.ast.right(access);
                                }
                                NodeKind::SymRef(found) => {
                                    nest = self.symbols.nest_of(found);
                                    anchor = found;
                                    access = self.ast.right(access);
                                }
                                _ => return Ok(()),
                            }
                        }
                        Some(OpKind::IndexOp) => {
                            if ctx == VarContext::InDeclaration {
                                // Declaring an array of class-typed
                                // elements; the index holds a bound.
                                let bound = self.ast.left(item);
                                self.node(bound)?;
                                access = self.ast.right(access);
                            } else {
                                let line = self.ast.line(item);
                                self.diag
                                    .report(DiagnosticKind::TypeMismatch, line)
                                    .maybe_named(self.symbols.name_of(anchor))
                                    .emit();
                                return Ok(());
                            }
                        }
                        _ => return Ok(()),
                    }
                }
                Some(SymKind::Arr) => {
                    let dim = self
                        .symbols
                        .attr(anchor, AttrKind::Dimen)
                        .and_then(AttrValue::as_int)
                        .unwrap_or(0);

                    let mut count = 0;
                    while self.ast.op_of(self.ast.left(access)) == Some(OpKind::IndexOp) {
                        let index = self.ast.left(self.ast.left(access));
                        self.node(index)?;
                        count += 1;
                        access = self.ast.right(access);
                    }

                    let line = self.ast.line(n);
                    if count > dim {
                        self.diag
                            .report(DiagnosticKind::IndexMismatch, line)
                            .maybe_named(self.symbols.name_of(anchor))
                            .emit();
                        return Ok(());
                    }
                    if self.ast.is_null(access) {
                        // Arrays must be fully indexed when used bare.
                        if count < dim {
                            self.diag
                                .report(DiagnosticKind::IndexMismatch, line)
                                .maybe_named(self.symbols.name_of(anchor))
                                .emit();
                        }
                        return Ok(());
                    }

                    let item = self.ast.left(access);
                    if self.ast.op_of(item) == Some(OpKind::FieldOp) {
                        let field_node = self.ast.left(item);
                        let field = self.ast.name_of(field_node);
                        if field.is_some()
                            && field == self.length_id
                            && self.ast.is_null(self.ast.right(access))
                        {
                            // The `.length` pseudo-property closes the
                            // chain; it has no symbol entry to point at.
                            return Ok(());
                        }
                        if count == dim
                            && let Some(elem) = self.element_class(anchor)
                        {
                            // Array of class-typed elements: the field
                            // belongs to the element class.
                            anchor = elem;
                            nest = self.symbols.nest_of(elem);
                            continue;
                        }
                    }
                    let line = self.ast.line(item);
                    self.diag
                        .report(DiagnosticKind::TypeMismatch, line)
                        .maybe_named(self.symbols.name_of(anchor))
                        .emit();
                    return Ok(());
                }
                _ => return Ok(()),
            }
        }
    }

    /// Routine call: the callee resolves as a variable use in call context,
    /// then the argument list is analyzed.
    pub(crate) fn routine_call(&mut self, n: NodeId) -> Result<(), FatalError> {
        let callee = self.ast.left(n);
        if self.ast.op_of(callee) == Some(OpKind::VarOp) {
            self.var_use(callee, VarContext::InRoutineCall)?;
        } else {
            self.node(callee)?;
        }
        self.node(self.ast.right(n))
    }

    /// Scan for a field of `class`: entries appended after it, while still
    /// nested deeper than the class, exactly one level down.
    fn find_field(&self, class: SymId, nest: i32, field: NameId) -> Option<SymId> {
        for s in self.symbols.ids_after(class) {
            let snest = self.symbols.nest_of(s);
            if snest <= nest {
                break;
            }
            if snest == nest + 1 && self.symbols.name_of(s) == Some(field) {
                return Some(s);
            }
        }
        None
    }

    /// The element class of an array symbol, when its base type resolved to
    /// a class.
    fn element_class(&self, arr: SymId) -> Option<SymId> {
        let ty = self.symbols.attr(arr, AttrKind::Type)?.as_node()?;
        self.ast.sym_of(self.ast.left(ty))
    }
}
