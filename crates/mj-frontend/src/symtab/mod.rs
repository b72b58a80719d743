//! Symbol table, scope stack, and attribute store.
//!
//! Three cooperating structures:
//! - an append-only entry list (a `SymId` is a stable 1-based index into it),
//! - a shared pool of attribute cells forming per-entry sorted lists,
//! - a scope stack of frames recording visibility within nested blocks.
//!
//! Visibility and lifetime are deliberately separate: entries are never
//! removed, while `close_block` pops every frame of the closing scope.
//! Capacity limits are enforced on all three structures; exceeding one is a
//! fatal error.

mod attrs;
mod dump;

#[cfg(test)]
mod symtab_tests;

use mj_core::{Interner, NameId};

use crate::FatalError;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

pub use attrs::{AttrKind, AttrValue, SymKind};
pub use dump::{SymbolRow, TableDump, rows};

use attrs::AttrCell;

/// Maximum number of live scope-stack frames.
pub const MAX_SCOPE_FRAMES: usize = 100;
/// Maximum number of symbol-table entries.
pub const MAX_SYMBOLS: usize = 500;
/// Maximum number of attribute cells in the shared pool.
pub const MAX_ATTR_CELLS: usize = 2000;

/// A 1-based handle to a symbol-table entry. Never reused or invalidated.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SymId(u32);

impl SymId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn from_raw(id: u32) -> Self {
        debug_assert!(id > 0, "SymId is 1-based");
        Self(id)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize - 1
    }
}

/// One frame of the scope stack.
#[derive(Debug, Clone)]
enum Frame {
    /// Opens a scope; `close_block` pops down to and including this.
    Marker,
    /// A visible binding, or a `dummy` placeholder for a name that failed to
    /// resolve (pushed so the same undeclared name is reported once per
    /// scope).
    Binding {
        name: NameId,
        sym: Option<SymId>,
        dummy: bool,
        used: bool,
    },
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    /// Head of this entry's attribute list in the shared pool.
    attrs: Option<u32>,
}

/// The symbol table with its scope stack and attribute pool.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: Vec<Entry>,
    pool: Vec<AttrCell>,
    stack: Vec<Frame>,
    nesting: u32,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the table and install the predefined names.
    ///
    /// `system` is a predefined class; `readln` and `println` are predefined
    /// procedures recorded one nesting level deeper, which is what lets them
    /// resolve as members of `system` through the class-field scan.
    pub fn init(
        &mut self,
        interner: &mut Interner,
        diag: &mut Diagnostics,
    ) -> Result<(), FatalError> {
        self.entries.clear();
        self.pool.clear();
        self.stack.clear();
        self.nesting = 0;

        let system = interner.intern("system");
        if let Some(sym) = self.insert_entry(system, 0, diag)? {
            self.set_attr(sym, AttrKind::Kind, AttrValue::Kind(SymKind::Class), 0, diag)?;
            self.set_attr(sym, AttrKind::Predefined, AttrValue::Bool(true), 0, diag)?;
        }

        for name in ["readln", "println"] {
            let name = interner.intern(name);
            if let Some(sym) = self.insert_entry(name, 0, diag)? {
                let nest = self.nesting as i32 + 1;
                self.set_attr(sym, AttrKind::Nest, AttrValue::Int(nest), 0, diag)?;
                self.set_attr(sym, AttrKind::Kind, AttrValue::Kind(SymKind::Proc), 0, diag)?;
                self.set_attr(sym, AttrKind::Predefined, AttrValue::Bool(true), 0, diag)?;
            }
        }
        Ok(())
    }

    /// Current nesting depth.
    pub fn nesting(&self) -> u32 {
        self.nesting
    }

    /// Number of entries issued so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of live scope-stack frames.
    pub fn frame_count(&self) -> usize {
        self.stack.len()
    }

    /// All issued ids, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = SymId> + '_ {
        (1..=self.entries.len() as u32).map(SymId)
    }

    /// Ids of entries appended after `sym`, in insertion order.
    ///
    /// Class members are appended directly after their class while analysis
    /// is inside the class body, so this is the scan order for field lookup.
    pub fn ids_after(&self, sym: SymId) -> impl Iterator<Item = SymId> + '_ {
        (sym.0 + 1..=self.entries.len() as u32).map(SymId)
    }

    /// Open a nested scope: push a block marker and go one level deeper.
    pub fn open_block(&mut self, line: u32, diag: &mut Diagnostics) -> Result<(), FatalError> {
        self.push_frame(Frame::Marker, line, diag)?;
        self.nesting += 1;
        Ok(())
    }

    /// Close the innermost scope: pop all frames down to and including the
    /// most recent block marker.
    ///
    /// When `warn_unused` is set, bindings that were never looked up are
    /// reported as `NotUsed`. The switch is off by default.
    pub fn close_block(&mut self, warn_unused: bool, line: u32, diag: &mut Diagnostics) {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Marker => break,
                Frame::Binding {
                    name, dummy, used, ..
                } => {
                    if warn_unused && !dummy && !used {
                        diag.report(DiagnosticKind::NotUsed, line).named(name).emit();
                    }
                }
            }
        }
        self.nesting = self.nesting.saturating_sub(1);
    }

    /// Declare `name` in the current scope.
    ///
    /// Returns `Ok(None)` after reporting `Redeclaration` when the name is
    /// already bound in this scope. A fresh entry gets its `Name` and `Nest`
    /// attributes and a visible stack frame.
    pub fn insert_entry(
        &mut self,
        name: NameId,
        line: u32,
        diag: &mut Diagnostics,
    ) -> Result<Option<SymId>, FatalError> {
        if self.lookup_here(name).is_some() {
            diag.report(DiagnosticKind::Redeclaration, line)
                .named(name)
                .emit();
            return Ok(None);
        }
        if self.entries.len() >= MAX_SYMBOLS {
            diag.report(DiagnosticKind::STOverflow, line).abort().emit();
            return Err(FatalError::SymbolTableOverflow);
        }

        self.push_frame(
            Frame::Binding {
                name,
                sym: Some(SymId(self.entries.len() as u32 + 1)),
                dummy: false,
                used: false,
            },
            line,
            diag,
        )?;

        self.entries.push(Entry { attrs: None });
        let sym = SymId(self.entries.len() as u32);
        self.set_attr(sym, AttrKind::Name, AttrValue::Name(name), line, diag)?;
        self.set_attr(
            sym,
            AttrKind::Nest,
            AttrValue::Int(self.nesting as i32),
            line,
            diag,
        )?;
        Ok(Some(sym))
    }

    /// Resolve `name` through all enclosing scopes, innermost first.
    ///
    /// A hit marks the frame used. A miss reports `Undeclared` and pushes a
    /// dummy frame so further uses of the same name in this scope stay
    /// quiet; a hit on such a dummy frame returns `None` silently.
    pub fn lookup(
        &mut self,
        name: NameId,
        line: u32,
        diag: &mut Diagnostics,
    ) -> Result<Option<SymId>, FatalError> {
        for frame in self.stack.iter_mut().rev() {
            if let Frame::Binding {
                name: bound,
                sym,
                dummy,
                used,
            } = frame
                && *bound == name
            {
                if *dummy {
                    return Ok(None);
                }
                *used = true;
                return Ok(*sym);
            }
        }

        diag.report(DiagnosticKind::Undeclared, line)
            .named(name)
            .emit();
        self.push_frame(
            Frame::Binding {
                name,
                sym: None,
                dummy: true,
                used: false,
            },
            line,
            diag,
        )?;
        Ok(None)
    }

    /// Resolve `name` in the current scope only: scan stops at the first
    /// block marker and ignores dummy frames. Reports nothing.
    pub fn lookup_here(&self, name: NameId) -> Option<SymId> {
        for frame in self.stack.iter().rev() {
            match frame {
                Frame::Marker => return None,
                Frame::Binding {
                    name: bound,
                    sym,
                    dummy: false,
                    ..
                } if *bound == name => return *sym,
                Frame::Binding { .. } => {}
            }
        }
        None
    }

    fn push_frame(
        &mut self,
        frame: Frame,
        line: u32,
        diag: &mut Diagnostics,
    ) -> Result<(), FatalError> {
        if self.stack.len() >= MAX_SCOPE_FRAMES {
            diag.report(DiagnosticKind::StackOverflow, line)
                .abort()
                .emit();
            return Err(FatalError::StackOverflow);
        }
        self.stack.push(frame);
        Ok(())
    }

    /// Whether the attribute is present on the entry.
    pub fn is_attr(&self, sym: SymId, kind: AttrKind) -> bool {
        self.attr(sym, kind).is_some()
    }

    /// The attribute's value, if present.
    pub fn attr(&self, sym: SymId, kind: AttrKind) -> Option<AttrValue> {
        let mut cur = self.entries.get(sym.index())?.attrs;
        while let Some(i) = cur {
            let cell = &self.pool[i as usize];
            if cell.kind == kind {
                return Some(cell.value);
            }
            if cell.kind > kind {
                return None;
            }
            cur = cell.next;
        }
        None
    }

    /// The attribute's value, or the zero value when absent.
    ///
    /// Callers that must distinguish absence use [`SymbolTable::attr`].
    pub fn get_attr(&self, sym: SymId, kind: AttrKind) -> AttrValue {
        self.attr(sym, kind).unwrap_or(AttrValue::Int(0))
    }

    /// Set or overwrite an attribute, keeping the list sorted by kind.
    pub fn set_attr(
        &mut self,
        sym: SymId,
        kind: AttrKind,
        value: AttrValue,
        line: u32,
        diag: &mut Diagnostics,
    ) -> Result<(), FatalError> {
        let mut prev: Option<u32> = None;
        let mut cur = self.entries[sym.index()].attrs;
        while let Some(i) = cur {
            let cell = &mut self.pool[i as usize];
            if cell.kind == kind {
                cell.value = value;
                return Ok(());
            }
            if cell.kind > kind {
                break;
            }
            prev = Some(i);
            cur = cell.next;
        }

        if self.pool.len() >= MAX_ATTR_CELLS {
            diag.report(DiagnosticKind::AttrOverflow, line)
                .abort()
                .emit();
            return Err(FatalError::AttributeOverflow);
        }
        let new = self.pool.len() as u32;
        self.pool.push(AttrCell {
            kind,
            value,
            next: cur,
        });
        match prev {
            Some(p) => self.pool[p as usize].next = Some(new),
            None => self.entries[sym.index()].attrs = Some(new),
        }
        Ok(())
    }

    /// Iterate the entry's attributes in ascending kind order.
    pub fn attrs_of(&self, sym: SymId) -> impl Iterator<Item = (AttrKind, AttrValue)> + '_ {
        let mut cur = self.entries.get(sym.index()).and_then(|e| e.attrs);
        std::iter::from_fn(move || {
            let i = cur?;
            let cell = &self.pool[i as usize];
            cur = cell.next;
            Some((cell.kind, cell.value))
        })
    }

    /// The entry's declared name.
    pub fn name_of(&self, sym: SymId) -> Option<NameId> {
        self.attr(sym, AttrKind::Name)?.as_name()
    }

    /// The entry's nesting depth at declaration; 0 when unset.
    pub fn nest_of(&self, sym: SymId) -> i32 {
        self.attr(sym, AttrKind::Nest)
            .and_then(AttrValue::as_int)
            .unwrap_or(0)
    }

    /// The entry's symbol kind, if recorded.
    pub fn kind_of(&self, sym: SymId) -> Option<SymKind> {
        self.attr(sym, AttrKind::Kind)?.as_kind()
    }

    /// Human-readable dump of every entry with all attributes.
    pub fn print_table<'a>(&'a self, interner: &'a Interner) -> TableDump<'a> {
        TableDump::new(self, interner)
    }
}
