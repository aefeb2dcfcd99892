#![forbid(unsafe_code)]

use std::hash::BuildHasher;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use hashbrown::HashTable;
use hashbrown::hash_table::Entry;
use rustc_hash::FxBuildHasher;
use rustc_hash::FxHashMap;

use crate::storage::SymbolIndex;

/// Represents a function symbol with a name and arity, together with the number
/// of references to it.
#[derive(Debug)]
pub struct SharedSymbol {
    name: Arc<str>,
    arity: usize,
    reference_count: usize,
}

impl SharedSymbol {
    /// Returns the name of the function symbol
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    /// Returns the arity of the function symbol
    pub fn arity(&self) -> usize {
        self.arity
    }
}

/// Pool for maximal sharing of function symbols. Ensures that function symbols
/// with the same name and arity are stored once, and removes a symbol as soon
/// as nothing refers to it anymore.
pub struct SymbolPool {
    symbols: Vec<Option<SharedSymbol>>,
    free: Vec<SymbolIndex>,

    /// Unique table of all function symbols
    table: HashTable<SymbolIndex>,
    hasher: FxBuildHasher,

    /// A map from prefixes to counters that track the next available index for function symbols
    prefix_to_register_function_map: FxHashMap<String, Arc<AtomicUsize>>,
}

impl SymbolPool {
    /// Creates a new empty symbol pool.
    pub(crate) fn new() -> Self {
        Self {
            symbols: Vec::new(),
            free: Vec::new(),
            table: HashTable::new(),
            hasher: FxBuildHasher,
            prefix_to_register_function_map: FxHashMap::default(),
        }
    }

    /// Creates or retrieves a function symbol with the given name and arity,
    /// and takes one reference to it.
    pub fn create(&mut self, name: impl Into<String> + AsRef<str>, arity: usize) -> SymbolIndex {
        let hash = self.hasher.hash_one((name.as_ref(), arity));

        let symbols = &self.symbols;
        let hasher = &self.hasher;
        let index = match self.table.entry(
            hash,
            |&index| {
                let symbol = shared(symbols, index);
                *symbol.name == *name.as_ref() && symbol.arity == arity
            },
            |&index| {
                let symbol = shared(symbols, index);
                hasher.hash_one((&*symbol.name, symbol.arity))
            },
        ) {
            Entry::Occupied(occupied) => *occupied.get(),
            Entry::Vacant(vacant) => {
                let symbol = SharedSymbol {
                    name: Arc::from(name.into()),
                    arity,
                    reference_count: 0,
                };

                let index = match self.free.pop() {
                    Some(index) => {
                        self.symbols[index] = Some(symbol);
                        index
                    }
                    None => {
                        self.symbols.push(Some(symbol));
                        SymbolIndex::new(self.symbols.len() - 1)
                    }
                };
                vacant.insert(index);

                // If the symbol was newly created, update the counter of its prefix.
                let name = shared(&self.symbols, index).name.clone();
                self.update_prefix(&name);
                index
            }
        };

        self.protect(index);
        index
    }

    /// Returns the shared symbol at the given index.
    pub fn get(&self, index: SymbolIndex) -> &SharedSymbol {
        shared(&self.symbols, index)
    }

    /// Takes an additional reference to the given symbol.
    pub fn protect(&mut self, index: SymbolIndex) {
        self.shared_mut(index).reference_count += 1;
    }

    /// Drops a reference to the given symbol, and removes it from the pool
    /// when this was the last one. Returns true iff the symbol was removed.
    pub fn release(&mut self, index: SymbolIndex) -> bool {
        let symbol = self.shared_mut(index);
        debug_assert!(symbol.reference_count > 0, "Symbol {index:?} was released too often");
        symbol.reference_count -= 1;
        if symbol.reference_count > 0 {
            return false;
        }

        let symbol = shared(&self.symbols, index);
        let hash = self.hasher.hash_one((&*symbol.name, symbol.arity));
        if let Ok(occupied) = self.table.find_entry(hash, |&other| other == index) {
            occupied.remove();
        }

        self.symbols[index] = None;
        self.free.push(index);
        true
    }

    /// Returns the number of symbols in the pool.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Creates a new prefix counter for the given prefix, or returns the existing one.
    pub fn create_prefix(&mut self, prefix: &str) -> Arc<AtomicUsize> {
        let counter = self
            .prefix_to_register_function_map
            .entry(prefix.to_string())
            .or_insert_with(|| Arc::new(AtomicUsize::new(0)))
            .clone();

        // Ensure the counter starts beyond every existing symbol of the form prefix + number.
        self.get_sufficiently_large_postfix_index(prefix, &counter);
        counter
    }

    /// Removes a prefix counter from the pool.
    pub fn remove_prefix(&mut self, prefix: &str) {
        self.prefix_to_register_function_map.remove(prefix);
    }

    /// When `name` is a registered prefix followed by a number n, makes sure that the
    /// counter of that prefix is larger than n.
    fn update_prefix(&self, name: &str) {
        let start_of_index = name
            .rfind(|c: char| !c.is_ascii_digit())
            .map_or(0, |position| position + 1);

        if start_of_index < name.len() {
            let (prefix, number) = name.split_at(start_of_index);
            if let (Some(counter), Ok(number)) = (
                self.prefix_to_register_function_map.get(prefix),
                number.parse::<usize>(),
            ) {
                counter.fetch_max(number + 1, Ordering::Relaxed);
            }
        }
    }

    fn get_sufficiently_large_postfix_index(&self, prefix: &str, counter: &AtomicUsize) {
        for symbol in self.symbols.iter().flatten() {
            if let Some(Ok(number)) = symbol.name.strip_prefix(prefix).map(str::parse::<usize>) {
                counter.fetch_max(number + 1, Ordering::Relaxed);
            }
        }
    }

    fn shared_mut(&mut self, index: SymbolIndex) -> &mut SharedSymbol {
        match self.symbols.get_mut(index.value()) {
            Some(Some(symbol)) => symbol,
            _ => panic!("Symbol {index:?} is not present in the pool"),
        }
    }
}

fn shared(symbols: &[Option<SharedSymbol>], index: SymbolIndex) -> &SharedSymbol {
    match symbols.get(index.value()) {
        Some(Some(symbol)) => symbol,
        _ => panic!("Symbol {index:?} is not present in the pool"),
    }
}
