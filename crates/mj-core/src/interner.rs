//! Name interning for the case-insensitive MJ front-end.
//!
//! MJ treats `Count`, `count`, and `COUNT` as the same name, so the interner
//! folds ASCII case as it interns: every spelling of an identifier yields
//! the same [`NameId`], and diagnostics print the folded form. String
//! literal contents go through [`Interner::intern_exact`], which keeps their
//! case. Comparing two ids is O(1) integer comparison, which the symbol
//! table's scope-stack scans rely on.

use std::collections::HashMap;

/// A lightweight handle to an interned name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NameId(u32);

impl NameId {
    /// Raw index for serialization/debugging.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Create a NameId from a raw index. Use only for deserialization.
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

/// Interner for MJ names and string-literal contents.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    /// Map from stored text to id for deduplication.
    map: HashMap<String, NameId>,
    /// Stored text, indexed by NameId.
    strings: Vec<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern an identifier, folding it to lower case first.
    ///
    /// Lexemes that are already lower case (the common case in MJ source)
    /// hit the map without allocating.
    pub fn intern(&mut self, lexeme: &str) -> NameId {
        if lexeme.bytes().any(|b| b.is_ascii_uppercase()) {
            self.insert(lexeme.to_ascii_lowercase())
        } else if let Some(&id) = self.map.get(lexeme) {
            id
        } else {
            self.insert(lexeme.to_owned())
        }
    }

    /// Intern text exactly as written.
    ///
    /// String literals are the one case-sensitive corner of the language;
    /// their contents must survive verbatim.
    pub fn intern_exact(&mut self, text: &str) -> NameId {
        match self.map.get(text) {
            Some(&id) => id,
            None => self.insert(text.to_owned()),
        }
    }

    fn insert(&mut self, text: String) -> NameId {
        if let Some(&id) = self.map.get(&text) {
            return id;
        }
        let id = NameId(self.strings.len() as u32);
        self.strings.push(text.clone());
        self.map.insert(text, id);
        id
    }

    /// Look up a name without interning it, folding case the way
    /// [`Interner::intern`] does.
    ///
    /// Returns `None` when the name was never interned. The analyzer uses
    /// this to probe for `main` and `length`, which may not occur in the
    /// program at all.
    pub fn find(&self, lexeme: &str) -> Option<NameId> {
        if lexeme.bytes().any(|b| b.is_ascii_uppercase()) {
            self.map.get(&lexeme.to_ascii_lowercase()).copied()
        } else {
            self.map.get(lexeme).copied()
        }
    }

    /// Resolve a NameId back to its stored text.
    ///
    /// # Panics
    /// Panics if the id was not created by this interner.
    #[inline]
    pub fn resolve(&self, id: NameId) -> &str {
        &self.strings[id.0 as usize]
    }

    /// Resolve without panicking on a foreign id.
    #[inline]
    pub fn try_resolve(&self, id: NameId) -> Option<&str> {
        self.strings.get(id.0 as usize).map(String::as_str)
    }

    /// Number of distinct stored strings.
    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over stored text with ids, in intern order.
    pub fn iter(&self) -> impl Iterator<Item = (NameId, &str)> {
        self.strings
            .iter()
            .enumerate()
            .map(|(i, s)| (NameId(i as u32), s.as_str()))
    }
}
