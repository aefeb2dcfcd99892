#![forbid(unsafe_code)]

use std::hash::BuildHasher;

use hashbrown::HashTable;
use hashbrown::hash_table::Entry;
use rustc_hash::FxBuildHasher;

use crate::storage::ATermIndex;
use crate::storage::SharedTerm;
use crate::storage::SharedTermLookup;

/// A slot of the term storage.
struct TermEntry {
    term: SharedTerm,
    reference_count: usize,
}

/// The unique table of terms.
///
/// Terms live in a slab so that their [ATermIndex] stays valid until they are
/// removed, and the hash table only stores indices into that slab. Reference
/// counts are kept next to the terms, but the storage itself never changes
/// them; that is up to the [crate::storage::GlobalTermPool].
pub(crate) struct ATermStorage {
    entries: Vec<Option<TermEntry>>,
    free: Vec<ATermIndex>,
    table: HashTable<ATermIndex>,
    hasher: FxBuildHasher,
}

impl ATermStorage {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
            table: HashTable::new(),
            hasher: FxBuildHasher,
        }
    }

    /// Returns the number of stored terms.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns the index of the term equal to the given lookup, inserting it with a
    /// reference count of zero when it is not present yet. The boolean is true iff
    /// the term was inserted.
    pub fn insert(&mut self, lookup: SharedTermLookup<'_>) -> (ATermIndex, bool) {
        let hash = self.hasher.hash_one(lookup);

        let entries = &self.entries;
        let hasher = &self.hasher;
        match self.table.entry(
            hash,
            |&index| entry(entries, index).term.lookup() == lookup,
            |&index| hasher.hash_one(entry(entries, index).term.lookup()),
        ) {
            Entry::Occupied(occupied) => (*occupied.get(), false),
            Entry::Vacant(vacant) => {
                let new_entry = TermEntry {
                    term: lookup.into(),
                    reference_count: 0,
                };

                let index = match self.free.pop() {
                    Some(index) => {
                        self.entries[index] = Some(new_entry);
                        index
                    }
                    None => {
                        self.entries.push(Some(new_entry));
                        ATermIndex::new(self.entries.len() - 1)
                    }
                };

                vacant.insert(index);
                (index, true)
            }
        }
    }

    /// Returns the term stored at the given index.
    pub fn get(&self, index: ATermIndex) -> &SharedTerm {
        &entry(&self.entries, index).term
    }

    /// Returns the number of references to the term at the given index.
    pub fn reference_count(&self, index: ATermIndex) -> usize {
        entry(&self.entries, index).reference_count
    }

    pub fn reference_count_mut(&mut self, index: ATermIndex) -> &mut usize {
        match self.entries.get_mut(index.value()) {
            Some(Some(entry)) => &mut entry.reference_count,
            _ => panic!("Term {index:?} is not present in the storage"),
        }
    }

    /// Removes the term at the given index from the table and returns it, the
    /// index can be reused by later insertions.
    pub fn remove(&mut self, index: ATermIndex) -> SharedTerm {
        let hash = self.hasher.hash_one(self.get(index).lookup());
        if let Ok(occupied) = self.table.find_entry(hash, |&other| other == index) {
            occupied.remove();
        }

        let removed = self.entries[index]
            .take()
            .unwrap_or_else(|| panic!("Term {index:?} is not present in the storage"));
        debug_assert_eq!(removed.reference_count, 0, "Only unreferenced terms can be removed");

        self.free.push(index);
        removed.term
    }

    /// Returns the indices of all terms that are no longer referenced.
    pub fn unreferenced(&self) -> Vec<ATermIndex> {
        self.table
            .iter()
            .copied()
            .filter(|&index| self.reference_count(index) == 0)
            .collect()
    }
}

fn entry(entries: &[Option<TermEntry>], index: ATermIndex) -> &TermEntry {
    match entries.get(index.value()) {
        Some(Some(entry)) => entry,
        _ => panic!("Term {index:?} is not present in the storage"),
    }
}
