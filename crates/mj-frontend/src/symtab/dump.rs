//! Symbol-table dumps: the fixed-width text table and JSON rows.
//!
//! The text layout is pinned by golden tests: one row per `SymId` in
//! insertion order, unset attributes left blank, node-valued attributes
//! rendered as `#<node-id>`.

use std::fmt;

use mj_core::Interner;

use super::attrs::{AttrKind, AttrValue, SymKind};
use super::{SymId, SymbolTable};

const COLUMNS: [(&str, usize); 10] = [
    ("Name", 12),
    ("Nest", 4),
    ("Tree", 5),
    ("Predefined", 10),
    ("Kind", 9),
    ("Type", 5),
    ("Value", 5),
    ("Offset", 6),
    ("Dimension", 9),
    ("ArgNum", 6),
];

/// Renders the whole table via [`fmt::Display`].
pub struct TableDump<'a> {
    table: &'a SymbolTable,
    interner: &'a Interner,
}

impl<'a> TableDump<'a> {
    pub(crate) fn new(table: &'a SymbolTable, interner: &'a Interner) -> Self {
        Self { table, interner }
    }

    fn cells(&self, sym: SymId) -> [String; 10] {
        let mut cells: [String; 10] = Default::default();
        for (kind, value) in self.table.attrs_of(sym) {
            let slot = kind as usize - 1;
            cells[slot] = match (kind, value) {
                (AttrKind::Name, AttrValue::Name(name)) => self
                    .interner
                    .try_resolve(name)
                    .unwrap_or("?")
                    .to_string(),
                (AttrKind::Predefined, AttrValue::Bool(b)) => {
                    if b { "yes" } else { "no" }.to_string()
                }
                (AttrKind::Kind, AttrValue::Kind(k)) => k.as_str().to_string(),
                (_, AttrValue::Int(v)) => v.to_string(),
                (_, AttrValue::Node(n)) => format!("#{}", n.as_u32()),
                (_, AttrValue::Sym(s)) => format!("#{}", s.as_u32()),
                // Off-shape payloads only arise from misuse; show them raw.
                (_, other) => format!("{other:?}"),
            };
        }
        cells
    }
}

impl fmt::Display for TableDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        // Lines are built whole and right-trimmed so blank trailing cells
        // never leave stray whitespace in golden files.
        let mut line = String::new();
        for (i, &(header, width)) in COLUMNS.iter().enumerate() {
            if i > 0 {
                line.push_str(" | ");
            }
            let _ = write!(line, "{header:<width$}");
        }
        writeln!(f, "{}", line.trim_end())?;

        line.clear();
        for (i, &(_, width)) in COLUMNS.iter().enumerate() {
            if i > 0 {
                line.push_str("-+-");
            }
            let _ = write!(line, "{:-<width$}", "");
        }
        writeln!(f, "{}", line.trim_end())?;

        for sym in self.table.ids() {
            let cells = self.cells(sym);
            line.clear();
            for (i, (cell, &(_, width))) in cells.iter().zip(COLUMNS.iter()).enumerate() {
                if i > 0 {
                    line.push_str(" | ");
                }
                let _ = write!(line, "{cell:<width$}");
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

/// One symbol rendered for structured output.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SymbolRow {
    pub id: u32,
    pub name: String,
    pub nest: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predefined: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<SymKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_node: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_node: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg_num: Option<i32>,
}

/// Render every entry as a [`SymbolRow`], in insertion order.
pub fn rows(table: &SymbolTable, interner: &Interner) -> Vec<SymbolRow> {
    table
        .ids()
        .map(|sym| {
            let mut row = SymbolRow {
                id: sym.as_u32(),
                name: String::new(),
                nest: 0,
                predefined: None,
                kind: None,
                type_node: None,
                value_node: None,
                offset: None,
                dimension: None,
                arg_num: None,
            };
            for (kind, value) in table.attrs_of(sym) {
                match (kind, value) {
                    (AttrKind::Name, AttrValue::Name(name)) => {
                        row.name = interner.try_resolve(name).unwrap_or("?").to_string();
                    }
                    (AttrKind::Nest, AttrValue::Int(v)) => row.nest = v,
                    (AttrKind::Predefined, AttrValue::Bool(b)) => row.predefined = Some(b),
                    (AttrKind::Kind, AttrValue::Kind(k)) => row.kind = Some(k),
                    (AttrKind::Type, AttrValue::Node(n)) => row.type_node = Some(n.as_u32()),
                    (AttrKind::Value, AttrValue::Node(n)) => row.value_node = Some(n.as_u32()),
                    (AttrKind::Offset, AttrValue::Int(v)) => row.offset = Some(v),
                    (AttrKind::Dimen, AttrValue::Int(v)) => row.dimension = Some(v),
                    (AttrKind::ArgNum, AttrValue::Int(v)) => row.arg_num = Some(v),
                    _ => {}
                }
            }
            row
        })
        .collect()
}
