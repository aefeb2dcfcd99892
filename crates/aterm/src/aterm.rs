#![forbid(unsafe_code)]

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

use smallvec::SmallVec;

use crate::Symbol;
use crate::TermPool;
use crate::identity;
use crate::storage::ATermIndex;
use crate::storage::SharedTerm;
use crate::write_text;

/// A handle to a term that is stored maximally shared in a [TermPool].
///
/// A term is an integer, a list (either empty, or a head followed by a tail
/// list) or a function symbol applied to as many arguments as its arity. Terms
/// are immutable, and since structurally equal terms are stored only once,
/// comparing two terms only compares their positions in the pool.
///
/// Every handle counts as one reference to the term. Cloning a handle
/// increments that count and dropping it decrements it, and the term is
/// removed from the pool, together with all its subterms that are no longer
/// used, when the count drops to zero.
pub struct ATerm {
    pool: TermPool,
    index: ATermIndex,
}

/// The contents of a single term node, obtained by [ATerm::data].
#[derive(Debug)]
pub enum ATermData {
    Int(i64),
    EmptyList,
    List { head: ATerm, tail: ATerm },
    Application { symbol: Symbol, arguments: Vec<ATerm> },
}

impl ATerm {
    /// Takes ownership of a reference to the term at the given index.
    pub(crate) fn from_index(pool: &TermPool, index: ATermIndex) -> ATerm {
        ATerm {
            pool: pool.clone(),
            index,
        }
    }

    /// Returns the pool that stores this term.
    pub fn pool(&self) -> &TermPool {
        &self.pool
    }

    /// Returns a unique index of the term in the term pool
    pub fn index(&self) -> usize {
        self.index.value()
    }

    pub(crate) fn shared(&self) -> ATermIndex {
        self.index
    }

    /// Returns the node of this term, with handles to its direct subterms.
    pub fn data(&self) -> ATermData {
        let mut pool = self.pool.lock();

        match pool.term(self.index) {
            SharedTerm::Int(value) => ATermData::Int(*value),
            SharedTerm::EmptyList => ATermData::EmptyList,
            &SharedTerm::List([head, tail]) => {
                pool.protect(head);
                pool.protect(tail);
                drop(pool);

                ATermData::List {
                    head: ATerm::from_index(&self.pool, head),
                    tail: ATerm::from_index(&self.pool, tail),
                }
            }
            SharedTerm::Application { symbol, arguments } => {
                let symbol = *symbol;
                let arguments: SmallVec<[ATermIndex; 8]> = arguments.iter().copied().collect();

                pool.protect_symbol(symbol);
                let shared_symbol = pool.symbol(symbol);
                let (name, arity) = (shared_symbol.name().clone(), shared_symbol.arity());
                for &argument in &arguments {
                    pool.protect(argument);
                }
                drop(pool);

                ATermData::Application {
                    symbol: Symbol::from_index(&self.pool, symbol, name, arity),
                    arguments: arguments
                        .into_iter()
                        .map(|argument| ATerm::from_index(&self.pool, argument))
                        .collect(),
                }
            }
        }
    }

    /// Returns true iff this is an integer term.
    pub fn is_int(&self) -> bool {
        self.with_shared(|term| matches!(term, SharedTerm::Int(_)))
    }

    /// Returns true iff this is a list term, which includes the empty list.
    pub fn is_list(&self) -> bool {
        self.with_shared(|term| matches!(term, SharedTerm::EmptyList | SharedTerm::List(_)))
    }

    /// Returns true iff this is the empty list.
    pub fn is_empty_list(&self) -> bool {
        self.with_shared(|term| matches!(term, SharedTerm::EmptyList))
    }

    /// Returns true iff this is a function application, including constants.
    pub fn is_application(&self) -> bool {
        self.with_shared(|term| matches!(term, SharedTerm::Application { .. }))
    }

    /// Returns the head symbol of a function application.
    ///
    /// # Panics
    ///
    /// When the term is not a function application.
    pub fn get_head_symbol(&self) -> Symbol {
        let mut pool = self.pool.lock();
        let symbol = match pool.term(self.index) {
            SharedTerm::Application { symbol, .. } => *symbol,
            term => panic!("The term {:?} ({term:?}) is not a function application", self.index),
        };

        pool.protect_symbol(symbol);
        let shared_symbol = pool.symbol(symbol);
        let (name, arity) = (shared_symbol.name().clone(), shared_symbol.arity());
        drop(pool);

        Symbol::from_index(&self.pool, symbol, name, arity)
    }

    /// Returns the number of direct subterms: the arguments of an application,
    /// or the head and tail of a non-empty list.
    pub fn arity(&self) -> usize {
        self.with_shared(|term| term.children().len())
    }

    /// Returns the indexed argument of the term, where the head and tail of a
    /// non-empty list are its arguments 0 and 1.
    ///
    /// # Panics
    ///
    /// When the index is not smaller than [ATerm::arity].
    pub fn arg(&self, index: usize) -> ATerm {
        let mut pool = self.pool.lock();
        let children = pool.term(self.index).children();
        assert!(
            index < children.len(),
            "Argument {index} is out of bounds for a term with {} arguments",
            children.len()
        );

        let child = children[index];
        pool.protect(child);
        drop(pool);

        ATerm::from_index(&self.pool, child)
    }

    /// Returns the list of arguments as a collection
    pub fn arguments(&self) -> ATermArgs {
        ATermArgs::new(self.clone())
    }

    /// Returns an iterator over all subterms of the term in pre order traversal, including the term itself.
    pub fn iter(&self) -> TermIterator {
        TermIterator::new(self.clone())
    }

    /// Returns the term where the argument at the given index is replaced by `value`.
    pub fn replace_argument(&self, index: usize, value: ATerm) -> ATerm {
        self.replace_arguments([(index, value)])
    }

    /// Returns the term where the arguments at the given indices are replaced.
    /// Replacing arguments by equal terms yields this term again.
    ///
    /// # Panics
    ///
    /// When the term is not a function application, or an index is out of bounds.
    pub fn replace_arguments<I>(&self, replacements: I) -> ATerm
    where
        I: IntoIterator<Item = (usize, ATerm)>,
    {
        let ATermData::Application { symbol, mut arguments } = self.data() else {
            panic!("Only the arguments of a function application can be replaced");
        };

        for (index, value) in replacements {
            arguments[index] = value;
        }

        self.pool.create_term(&symbol, &arguments)
    }

    /// Returns the number of references to this term, i.e., the number of
    /// handles plus the number of terms that have it as a direct subterm.
    pub fn reference_count(&self) -> usize {
        self.pool.lock().reference_count(self.index)
    }

    fn with_shared<R>(&self, f: impl FnOnce(&SharedTerm) -> R) -> R {
        f(self.pool.lock().term(self.index))
    }
}

impl Clone for ATerm {
    fn clone(&self) -> Self {
        self.pool.lock().protect(self.index);
        ATerm::from_index(&self.pool, self.index)
    }
}

impl Drop for ATerm {
    fn drop(&mut self) {
        self.pool.lock().release(self.index);
    }
}

impl PartialEq for ATerm {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.pool.ptr_eq(&other.pool)
    }
}

impl Eq for ATerm {}

impl PartialOrd for ATerm {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ATerm {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.pool.id(), self.index).cmp(&(other.pool.id(), other.index))
    }
}

impl Hash for ATerm {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pool.id().hash(state);
        self.index.hash(state);
    }
}

impl fmt::Display for ATerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_text(f, self, &identity)
    }
}

impl fmt::Debug for ATerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// An iterator over the arguments of a term.
pub struct ATermArgs {
    term: ATerm,
    front: usize,
    back: usize,
}

impl ATermArgs {
    fn new(term: ATerm) -> ATermArgs {
        let back = term.arity();
        ATermArgs { term, front: 0, back }
    }
}

impl Iterator for ATermArgs {
    type Item = ATerm;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let result = self.term.arg(self.front);
            self.front += 1;
            Some(result)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl DoubleEndedIterator for ATermArgs {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.term.arg(self.back))
        } else {
            None
        }
    }
}

impl ExactSizeIterator for ATermArgs {
    fn len(&self) -> usize {
        self.back - self.front
    }
}

/// An iterator over all subterms of the given [ATerm] in preorder traversal, i.e.,
/// for f(g(a), b) we visit f(g(a), b), g(a), a, b.
pub struct TermIterator {
    stack: Vec<ATerm>,
}

impl TermIterator {
    pub fn new(term: ATerm) -> TermIterator {
        TermIterator { stack: vec![term] }
    }
}

impl Iterator for TermIterator {
    type Item = ATerm;

    fn next(&mut self) -> Option<Self::Item> {
        let term = self.stack.pop()?;
        self.stack.extend(term.arguments().rev());
        Some(term)
    }
}
