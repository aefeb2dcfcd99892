#![forbid(unsafe_code)]

use std::fmt;
use std::hash::Hash;

use termite_utilities::TagIndex;

/// Marker type for indices into the term storage.
pub struct ATermTag;

/// Marker type for indices into the symbol pool.
pub struct SymbolTag;

/// The index of a shared term in the storage of its pool.
pub type ATermIndex = TagIndex<ATermTag>;

/// The index of a shared function symbol in the symbol pool.
pub type SymbolIndex = TagIndex<SymbolTag>;

/// The node that is actually shared in the unique table.
///
/// The children of a node are indices into the same pool, and every node
/// holds one reference on each of its children (and on its head symbol).
#[derive(Clone, PartialEq, Eq)]
pub enum SharedTerm {
    Int(i64),
    EmptyList,
    /// The head and the tail of a non-empty list, in that order.
    List([ATermIndex; 2]),
    Application {
        symbol: SymbolIndex,
        arguments: Box<[ATermIndex]>,
    },
}

impl SharedTerm {
    /// Returns the direct subterms of this node.
    pub fn children(&self) -> &[ATermIndex] {
        match self {
            SharedTerm::Int(_) | SharedTerm::EmptyList => &[],
            SharedTerm::List(pair) => pair,
            SharedTerm::Application { arguments, .. } => arguments,
        }
    }

    /// Returns the borrowed form of this node that is used for hashing and lookups.
    pub fn lookup(&self) -> SharedTermLookup<'_> {
        match self {
            SharedTerm::Int(value) => SharedTermLookup::Int(*value),
            SharedTerm::EmptyList => SharedTermLookup::EmptyList,
            SharedTerm::List([head, tail]) => SharedTermLookup::List(*head, *tail),
            SharedTerm::Application { symbol, arguments } => SharedTermLookup::Application {
                symbol: *symbol,
                arguments,
            },
        }
    }
}

impl fmt::Debug for SharedTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.lookup().fmt(f)
    }
}

/// A node description that borrows its arguments, such that looking up a term
/// in the unique table does not allocate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SharedTermLookup<'a> {
    Int(i64),
    EmptyList,
    List(ATermIndex, ATermIndex),
    Application {
        symbol: SymbolIndex,
        arguments: &'a [ATermIndex],
    },
}

impl From<SharedTermLookup<'_>> for SharedTerm {
    fn from(lookup: SharedTermLookup<'_>) -> Self {
        match lookup {
            SharedTermLookup::Int(value) => SharedTerm::Int(value),
            SharedTermLookup::EmptyList => SharedTerm::EmptyList,
            SharedTermLookup::List(head, tail) => SharedTerm::List([head, tail]),
            SharedTermLookup::Application { symbol, arguments } => SharedTerm::Application {
                symbol,
                arguments: arguments.into(),
            },
        }
    }
}
