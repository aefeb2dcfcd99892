#![forbid(unsafe_code)]

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::sync::Arc;

use crate::TermPool;
use crate::storage::SymbolIndex;

/// A function symbol, i.e., a name together with an arity, that is shared in
/// the symbol table of its [TermPool].
///
/// Every handle counts as a reference to the shared symbol, and the symbol is
/// removed from the table when the last handle and the last term using it are
/// dropped. Two symbols are equal iff they refer to the same table entry.
pub struct Symbol {
    pool: TermPool,
    index: SymbolIndex,
    name: Arc<str>,
    arity: usize,
}

impl Symbol {
    /// Takes ownership of a reference to the symbol at the given index.
    pub(crate) fn from_index(pool: &TermPool, index: SymbolIndex, name: Arc<str>, arity: usize) -> Symbol {
        Symbol {
            pool: pool.clone(),
            index,
            name,
            arity,
        }
    }

    /// Obtain the symbol's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Obtain the symbol's arity.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Returns the position of the symbol in the symbol table, which is unique
    /// among the live symbols of its pool.
    pub fn index(&self) -> usize {
        self.index.value()
    }

    /// Returns the pool that stores this symbol.
    pub fn pool(&self) -> &TermPool {
        &self.pool
    }

    pub(crate) fn shared(&self) -> SymbolIndex {
        self.index
    }
}

impl Clone for Symbol {
    fn clone(&self) -> Self {
        self.pool.lock().protect_symbol(self.index);
        Symbol {
            pool: self.pool.clone(),
            index: self.index,
            name: self.name.clone(),
            arity: self.arity,
        }
    }
}

impl Drop for Symbol {
    fn drop(&mut self) {
        self.pool.lock().release_symbol(self.index);
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.pool.ptr_eq(&other.pool)
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.pool.id(), self.index).cmp(&(other.pool.id(), other.index))
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pool.id().hash(state);
        self.index.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}
