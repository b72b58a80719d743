//! Staged pipeline facade: source text → [`Parsed`] → [`Analyzed`].
//!
//! The CLI and library consumers drive the front-end through these stages;
//! each stage owns everything the next one needs, so there is no shared
//! mutable state outside the pipeline.

use mj_core::Interner;

use crate::FatalError;
use crate::analyze::{self, AnalyzerOptions};
use crate::ast::{Ast, NodeId, TreePrinter};
use crate::diagnostics::Diagnostics;
use crate::parser;
use crate::symtab::{SymbolRow, SymbolTable, rows};

/// Entry point to the front-end.
pub struct Frontend {
    source: String,
    options: AnalyzerOptions,
}

impl Frontend {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            options: AnalyzerOptions::default(),
        }
    }

    pub fn options(mut self, options: AnalyzerOptions) -> Self {
        self.options = options;
        self
    }

    /// Lex and parse the source. Always yields a tree; syntax errors land
    /// in the stage's diagnostics.
    pub fn parse(self) -> Parsed {
        let out = parser::parse(&self.source);
        Parsed {
            ast: out.ast,
            root: out.root,
            interner: out.interner,
            diagnostics: out.diagnostics,
            options: self.options,
        }
    }
}

/// A parsed program, before name resolution.
pub struct Parsed {
    ast: Ast,
    root: NodeId,
    interner: Interner,
    diagnostics: Diagnostics,
    options: AnalyzerOptions,
}

impl Parsed {
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Sideways dump of the parse tree.
    pub fn dump_ast(&self) -> String {
        TreePrinter::new(&self.ast, &self.interner, self.root).to_string()
    }

    /// Run semantic analysis, rewriting the tree in place and populating
    /// the symbol table.
    pub fn analyze(mut self) -> Analyzed {
        let analysis = analyze::analyze(
            &mut self.ast,
            self.root,
            &mut self.interner,
            &mut self.diagnostics,
            self.options,
        );
        Analyzed {
            ast: self.ast,
            root: self.root,
            interner: self.interner,
            symbols: analysis.symbols,
            fatal: analysis.fatal,
            diagnostics: self.diagnostics,
        }
    }
}

/// A fully analyzed program: annotated AST plus populated symbol table.
pub struct Analyzed {
    ast: Ast,
    root: NodeId,
    interner: Interner,
    symbols: SymbolTable,
    diagnostics: Diagnostics,
    fatal: Option<FatalError>,
}

impl Analyzed {
    /// No findings at all: the program parsed and analyzed cleanly.
    pub fn is_valid(&self) -> bool {
        self.fatal.is_none() && !self.diagnostics.has_errors()
    }

    /// Whether analysis was cut short by a fatal error.
    pub fn aborted(&self) -> bool {
        self.fatal.is_some()
    }

    pub fn fatal(&self) -> Option<FatalError> {
        self.fatal
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// The diagnostic transcript in the fixed line format.
    pub fn render_diagnostics(&self) -> String {
        self.diagnostics.printer(&self.interner).to_string()
    }

    /// Sideways dump of the annotated tree.
    pub fn dump_ast(&self) -> String {
        TreePrinter::new(&self.ast, &self.interner, self.root).to_string()
    }

    /// The fixed-width symbol-table dump.
    pub fn dump_symbols(&self) -> String {
        self.symbols.print_table(&self.interner).to_string()
    }

    /// Symbol-table rows for structured output.
    pub fn symbol_rows(&self) -> Vec<SymbolRow> {
        rows(&self.symbols, &self.interner)
    }
}
