// intern.rs
//
// Spelling table behind Symbol: reserved identifiers, declaration names and
// the shorthand keys resolved on demand (`float3`, `int64_t2x4`, ...).

use std::hash::BuildHasher;

use hashbrown::HashTable;
use rustc_hash::FxBuildHasher;

use crate::Symbol;

/// Maps identifier spellings to Symbols and back.
///
/// Each spelling is stored once, in `spellings`; the hash table holds only
/// Symbols and hashes them through the spelling they index. Symbols are
/// dense and never released, so a Symbol doubles as an index into
/// `spellings`.
#[derive(Clone, Default)]
pub struct Interner {
    table: HashTable<Symbol>,
    spellings: Vec<Box<str>>,
    hasher: FxBuildHasher,
}

// FxBuildHasher does not implement Debug; it is zero-sized, so skip it.
impl std::fmt::Debug for Interner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interner")
            .field("table", &self.table)
            .field("spellings", &self.spellings)
            .finish_non_exhaustive()
    }
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbol for `spelling`, adding it on first use.
    pub fn intern(&mut self, spelling: &str) -> Symbol {
        let hash = self.hasher.hash_one(spelling);
        let spellings = &self.spellings;
        if let Some(&sym) = self
            .table
            .find(hash, |sym| &*spellings[sym.index() as usize] == spelling)
        {
            return sym;
        }

        let sym = Symbol::new(self.spellings.len() as u32);
        self.spellings.push(spelling.into());
        let (spellings, hasher) = (&self.spellings, &self.hasher);
        self.table.insert_unique(hash, sym, |sym| {
            hasher.hash_one(&*spellings[sym.index() as usize])
        });
        sym
    }

    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.spellings[sym.index() as usize]
    }

    /// Symbol for `spelling` if it was interned before. Name queries probe
    /// with this so unknown names are not added.
    pub fn lookup(&self, spelling: &str) -> Option<Symbol> {
        let hash = self.hasher.hash_one(spelling);
        self.table
            .find(hash, |sym| self.resolve(*sym) == spelling)
            .copied()
    }

    pub fn len(&self) -> usize {
        self.spellings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spellings.is_empty()
    }
}
