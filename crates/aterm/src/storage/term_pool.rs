#![forbid(unsafe_code)]

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use parking_lot::Mutex;
use parking_lot::MutexGuard;
use smallvec::SmallVec;

use termite_utilities::TermiteError;

use crate::ATerm;
use crate::Symbol;
use crate::TextATermReader;
use crate::storage::ATermIndex;
use crate::storage::GlobalTermPool;
use crate::storage::TermPoolMetrics;

/// A handle to a term pool, which stores all terms and function symbols created
/// through it maximally shared.
///
/// Cloning the handle is cheap and every clone refers to the same pool. Terms
/// and symbols keep their pool alive, and can only be combined with terms of
/// the same pool. All operations on one pool are serialised by a single lock,
/// so terms can be shared between threads.
#[derive(Clone)]
pub struct TermPool {
    shared: Arc<Mutex<GlobalTermPool>>,
}

impl TermPool {
    /// Creates a new, empty term pool.
    pub fn new() -> TermPool {
        TermPool {
            shared: Arc::new(Mutex::new(GlobalTermPool::new())),
        }
    }

    /// Create a function symbol
    pub fn create_symbol(&self, name: impl Into<String> + AsRef<str>, arity: usize) -> Symbol {
        let (index, name) = {
            let mut pool = self.lock();
            let index = pool.create_symbol(name, arity);
            (index, pool.symbol(index).name().clone())
        };

        Symbol::from_index(self, index, name, arity)
    }

    /// Creates a term storing a single integer value.
    pub fn create_int(&self, value: i64) -> ATerm {
        let index = self.lock().create_int(value);
        ATerm::from_index(self, index)
    }

    /// Returns the empty list.
    pub fn empty_list(&self) -> ATerm {
        let index = self.lock().empty_list();
        ATerm::from_index(self, index)
    }

    /// Creates the list with `head` as its first element followed by the elements of `tail`.
    pub fn create_list(&self, head: &ATerm, tail: &ATerm) -> ATerm {
        self.check_pool(head);
        self.check_pool(tail);

        let index = self.lock().create_list(head.shared(), tail.shared());
        ATerm::from_index(self, index)
    }

    /// Creates a term without arguments.
    pub fn create_constant(&self, symbol: &Symbol) -> ATerm {
        self.create_term(symbol, &[])
    }

    /// Create a term with the given arguments.
    ///
    /// # Panics
    ///
    /// When the number of arguments differs from the arity of the symbol.
    pub fn create_term(&self, symbol: &Symbol, arguments: &[ATerm]) -> ATerm {
        self.create_term_array(symbol, arguments)
    }

    /// Create a term with the given arguments given by the iterator.
    pub fn create_term_iter<I, T>(&self, symbol: &Symbol, arguments: I) -> ATerm
    where
        I: IntoIterator<Item = T>,
        T: Borrow<ATerm>,
    {
        // The arguments are kept until the term holds its own references to them.
        let arguments: SmallVec<[T; 8]> = arguments.into_iter().collect();
        self.create_term_array(symbol, &arguments)
    }

    /// Create a term with the given arguments given by the iterator that is failable.
    pub fn try_create_term_iter<I, T, E>(&self, symbol: &Symbol, arguments: I) -> Result<ATerm, E>
    where
        I: IntoIterator<Item = Result<T, E>>,
        T: Borrow<ATerm>,
    {
        let arguments = arguments.into_iter().collect::<Result<SmallVec<[T; 8]>, E>>()?;
        Ok(self.create_term_array(symbol, &arguments))
    }

    fn create_term_array<T: Borrow<ATerm>>(&self, symbol: &Symbol, arguments: &[T]) -> ATerm {
        assert!(
            symbol.pool().ptr_eq(self),
            "The symbol {symbol} belongs to a different term pool"
        );

        let indices: SmallVec<[ATermIndex; 8]> = arguments
            .iter()
            .map(|argument| {
                let argument = argument.borrow();
                self.check_pool(argument);
                argument.shared()
            })
            .collect();

        let index = self.lock().create_term_array(symbol.shared(), &indices);
        ATerm::from_index(self, index)
    }

    /// Parses a single term in the textual format, e.g. `f(a, [1, 2])`.
    pub fn from_string(&self, text: &str) -> Result<ATerm, TermiteError> {
        let mut reader = TextATermReader::new(text.as_bytes(), self);
        let term = reader
            .read_aterm()?
            .ok_or_else(|| TermiteError::from("The input does not contain a term"))?;

        if reader.read_aterm()?.is_some() {
            return Err(format!("Unexpected input after the term {term}").into());
        }

        Ok(term)
    }

    /// Returns the number of terms in the pool.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns whether the term pool is empty, which never holds since the empty list is always present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of function symbols in the pool.
    pub fn num_of_symbols(&self) -> usize {
        self.lock().num_of_symbols()
    }

    /// Returns the metrics of the term pool, can be formatted and written to output.
    pub fn metrics(&self) -> TermPoolMetrics {
        self.lock().metrics()
    }

    /// Enables or disables automatic garbage collection. When disabled, terms
    /// that are no longer referenced are only removed by [TermPool::collect_garbage].
    pub fn automatic_garbage_collection(&self, enabled: bool) {
        self.lock().automatic_garbage_collection(enabled);
    }

    /// Removes all terms that are no longer referenced and returns how many were removed.
    pub fn collect_garbage(&self) -> usize {
        self.lock().collect_garbage()
    }

    /// Returns a counter for the unique numeric suffix of the given prefix.
    pub fn register_prefix(&self, prefix: &str) -> Arc<AtomicUsize> {
        self.lock().register_prefix(prefix)
    }

    /// Removes the registration of a prefix from the symbol pool.
    pub fn remove_prefix(&self, prefix: &str) {
        self.lock().remove_prefix(prefix)
    }

    /// Returns true iff both handles refer to the same pool.
    pub fn ptr_eq(&self, other: &TermPool) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Returns a number that identifies this pool among all live pools.
    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.shared).addr()
    }

    /// Locks the shared pool. Terms and symbols must not be dropped or cloned
    /// while the guard is held, since that locks the pool again.
    pub(crate) fn lock(&self) -> MutexGuard<'_, GlobalTermPool> {
        self.shared.lock()
    }

    fn check_pool(&self, term: &ATerm) {
        assert!(
            term.pool().ptr_eq(self),
            "The term {term} belongs to a different term pool"
        );
    }
}

impl Default for TermPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TermPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TermPool({})", self.metrics())
    }
}
