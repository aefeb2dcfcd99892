#![forbid(unsafe_code)]

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::time::Instant;

use log::debug;

use termite_utilities::LargeFormatter;
use termite_utilities::debug_trace;

use crate::storage::ATermIndex;
use crate::storage::ATermStorage;
use crate::storage::SharedSymbol;
use crate::storage::SharedTerm;
use crate::storage::SharedTermLookup;
use crate::storage::SymbolIndex;
use crate::storage::SymbolPool;

/// The shared state of a term pool, which is always accessed under the lock of
/// its [crate::TermPool].
///
/// Every stored term has a reference count that is the number of handles to it
/// plus the number of stored terms that have it as a direct subterm. Releasing
/// the last reference of a term removes it, and releases its subterms, using an
/// explicit worklist so that the depth of a term never affects the call stack.
pub(crate) struct GlobalTermPool {
    /// Unique table of all terms.
    terms: ATermStorage,
    /// The symbol pool for managing function symbols.
    symbol_pool: SymbolPool,

    /// The worklist of terms that lose one reference.
    stack: Vec<ATermIndex>,

    /// Indicates whether unreferenced terms are removed immediately.
    garbage_collection: bool,

    /// The empty list is shared by all lists and is never removed.
    empty_list: ATermIndex,
}

impl GlobalTermPool {
    pub fn new() -> GlobalTermPool {
        let mut terms = ATermStorage::new();
        let (empty_list, _) = terms.insert(SharedTermLookup::EmptyList);
        *terms.reference_count_mut(empty_list) += 1;

        GlobalTermPool {
            terms,
            symbol_pool: SymbolPool::new(),
            stack: Vec::new(),
            garbage_collection: true,
            empty_list,
        }
    }

    /// Returns the number of terms in the pool.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns the number of function symbols in the pool.
    pub fn num_of_symbols(&self) -> usize {
        self.symbol_pool.len()
    }

    /// Creates a function symbol, the caller owns one reference to it.
    pub fn create_symbol(&mut self, name: impl Into<String> + AsRef<str>, arity: usize) -> SymbolIndex {
        self.symbol_pool.create(name, arity)
    }

    pub fn symbol(&self, index: SymbolIndex) -> &SharedSymbol {
        self.symbol_pool.get(index)
    }

    pub fn protect_symbol(&mut self, index: SymbolIndex) {
        self.symbol_pool.protect(index);
    }

    pub fn release_symbol(&mut self, index: SymbolIndex) {
        if self.symbol_pool.release(index) {
            debug_trace!("Dropped symbol {index:?}");
        }
    }

    /// Creates a term storing a single integer value.
    pub fn create_int(&mut self, value: i64) -> ATermIndex {
        self.insert(SharedTermLookup::Int(value))
    }

    /// Returns the empty list.
    pub fn empty_list(&mut self) -> ATermIndex {
        self.protect(self.empty_list);
        self.empty_list
    }

    /// Creates the list with the given head in front of the list `tail`.
    pub fn create_list(&mut self, head: ATermIndex, tail: ATermIndex) -> ATermIndex {
        debug_assert!(
            matches!(self.term(tail), SharedTerm::EmptyList | SharedTerm::List(_)),
            "The tail {tail:?} of a list must be a list"
        );

        self.insert(SharedTermLookup::List(head, tail))
    }

    /// Creates a term from a head symbol and its arguments.
    pub fn create_term_array(&mut self, symbol: SymbolIndex, arguments: &[ATermIndex]) -> ATermIndex {
        assert_eq!(
            self.symbol_pool.get(symbol).arity(),
            arguments.len(),
            "The number of arguments does not match the arity of the symbol"
        );

        self.insert(SharedTermLookup::Application { symbol, arguments })
    }

    /// Returns the index of the shared term, the caller owns one reference to it.
    fn insert(&mut self, lookup: SharedTermLookup<'_>) -> ATermIndex {
        let (index, inserted) = self.terms.insert(lookup);

        if inserted {
            debug_trace!("Created term {index:?}: {lookup:?}");
            match lookup {
                SharedTermLookup::Int(_) | SharedTermLookup::EmptyList => {}
                SharedTermLookup::List(head, tail) => {
                    self.protect(head);
                    self.protect(tail);
                }
                SharedTermLookup::Application { symbol, arguments } => {
                    self.symbol_pool.protect(symbol);
                    for &argument in arguments {
                        self.protect(argument);
                    }
                }
            }
        }

        self.protect(index);
        index
    }

    /// Returns the node stored at the given index.
    pub fn term(&self, index: ATermIndex) -> &SharedTerm {
        self.terms.get(index)
    }

    pub fn reference_count(&self, index: ATermIndex) -> usize {
        self.terms.reference_count(index)
    }

    /// Takes an additional reference to the given term.
    pub fn protect(&mut self, index: ATermIndex) {
        *self.terms.reference_count_mut(index) += 1;
    }

    /// Drops one reference to the given term.
    pub fn release(&mut self, index: ATermIndex) {
        self.stack.push(index);
        self.process_releases(self.garbage_collection);
    }

    /// Decrements every term on the worklist, and removes the terms that become
    /// unreferenced when `remove` is true.
    fn process_releases(&mut self, remove: bool) {
        while let Some(index) = self.stack.pop() {
            let count = self.terms.reference_count_mut(index);
            debug_assert!(*count > 0, "Term {index:?} was released too often");
            *count -= 1;

            if *count == 0 && remove {
                self.reclaim(index);
            }
        }
    }

    /// Removes an unreferenced term and puts its subterms on the worklist.
    fn reclaim(&mut self, index: ATermIndex) {
        debug_trace!("Dropping term {index:?}");
        let term = self.terms.remove(index);
        self.stack.extend_from_slice(term.children());

        if let SharedTerm::Application { symbol, .. } = term {
            self.release_symbol(symbol);
        }
    }

    /// Enables or disables the immediate removal of unreferenced terms.
    pub fn automatic_garbage_collection(&mut self, enabled: bool) {
        self.garbage_collection = enabled;
    }

    /// Removes all unreferenced terms and returns how many terms were removed.
    pub fn collect_garbage(&mut self) -> usize {
        let collect_time = Instant::now();
        let num_of_terms = self.len();
        let num_of_symbols = self.num_of_symbols();

        for index in self.terms.unreferenced() {
            self.reclaim(index);
            self.process_releases(true);
        }

        debug!(
            "Garbage collection: collection took {}ms, {} terms and {} symbols removed",
            collect_time.elapsed().as_millis(),
            LargeFormatter(num_of_terms - self.len()),
            LargeFormatter(num_of_symbols - self.num_of_symbols())
        );
        debug!("{}", self.metrics());

        num_of_terms - self.len()
    }

    /// Returns a counter for the unique numeric suffix of the given prefix.
    pub fn register_prefix(&mut self, prefix: &str) -> Arc<AtomicUsize> {
        self.symbol_pool.create_prefix(prefix)
    }

    /// Removes the registration of a prefix from the symbol pool.
    pub fn remove_prefix(&mut self, prefix: &str) {
        self.symbol_pool.remove_prefix(prefix)
    }

    /// Returns the metrics of the term pool, can be formatted and written to output.
    pub fn metrics(&self) -> TermPoolMetrics {
        TermPoolMetrics {
            terms: self.len(),
            symbols: self.num_of_symbols(),
        }
    }
}

impl Drop for GlobalTermPool {
    fn drop(&mut self) {
        debug!("Dropping term pool. {}", self.metrics());
    }
}

/// A snapshot of the size of a term pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TermPoolMetrics {
    pub terms: usize,
    pub symbols: usize,
}

impl fmt::Display for TermPoolMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "There are {} terms, and {} symbols",
            LargeFormatter(self.terms),
            LargeFormatter(self.symbols)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_removes_subterms() {
        let _ = termite_utilities::test_logger();
        let mut pool = GlobalTermPool::new();

        let f = pool.create_symbol("f", 2);
        let one = pool.create_int(1);
        let two = pool.create_int(2);
        let term = pool.create_term_array(f, &[one, two]);
        assert_eq!(pool.reference_count(one), 2);

        pool.release(one);
        pool.release(two);
        pool.release_symbol(f);
        assert_eq!(pool.len(), 4);
        assert_eq!(pool.num_of_symbols(), 1);

        pool.release(term);
        assert_eq!(pool.len(), 1, "Only the empty list should remain");
        assert_eq!(pool.num_of_symbols(), 0);
    }

    #[test]
    fn test_deferred_collection() {
        let _ = termite_utilities::test_logger();
        let mut pool = GlobalTermPool::new();
        pool.automatic_garbage_collection(false);

        let empty = pool.empty_list();
        let one = pool.create_int(1);
        let list = pool.create_list(one, empty);
        pool.release(one);
        pool.release(empty);
        pool.release(list);
        assert_eq!(pool.len(), 3);

        // An unreferenced term can be revived before it is collected.
        let revived = pool.create_int(1);
        assert_eq!(revived, one);
        pool.release(revived);

        assert_eq!(pool.collect_garbage(), 2);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.metrics(), TermPoolMetrics { terms: 1, symbols: 0 });
    }

    #[test]
    fn test_metrics_display() {
        let metrics = TermPoolMetrics {
            terms: 1234,
            symbols: 5,
        };
        assert_eq!(metrics.to_string(), "There are 1,234 terms, and 5 symbols");
    }
}
