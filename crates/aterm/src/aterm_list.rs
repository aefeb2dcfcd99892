//!
//! A list of terms, where T is the type of the elements in the list.
//!
#![forbid(unsafe_code)]

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

use delegate::delegate;

use crate::ATerm;
use crate::ATermData;
use crate::TermIterator;
use crate::TermPool;

/// Represents a list of ATerms of type T.
///
/// # Details
///
/// A list is either the empty list or a list cell with a head, which is the
/// first element, and a tail, which is again a list. Since list cells are
/// shared like any other term, lists with a common tail share that tail.
pub struct ATermList<T> {
    term: ATerm,
    _marker: PhantomData<T>,
}

impl<T: From<ATerm>> ATermList<T> {
    /// Obtain the head, i.e. the first element, of the list.
    ///
    /// # Panics
    ///
    /// When the list is empty.
    pub fn head(&self) -> T {
        match self.term.data() {
            ATermData::List { head, .. } => head.into(),
            _ => panic!("The empty list has no head"),
        }
    }

    /// Converts the list into a vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Returns an iterator over all elements in the list.
    pub fn iter(&self) -> ATermListIter<T> {
        ATermListIter { current: self.clone() }
    }
}

impl<T> ATermList<T> {
    /// Constructs a new list from an iterator that is consumed.
    pub fn from_double_iter(pool: &TermPool, iter: impl DoubleEndedIterator<Item = T>) -> Self
    where
        T: Into<ATerm>,
    {
        let mut list = Self::empty(pool);
        for item in iter.rev() {
            list = list.cons(item);
        }
        list
    }

    /// Constructs a new list from an iterator that is consumed, stopping at the first error.
    pub fn try_from_double_iter<E>(
        pool: &TermPool,
        iter: impl DoubleEndedIterator<Item = Result<T, E>>,
    ) -> Result<Self, E>
    where
        T: Into<ATerm>,
    {
        let mut list = Self::empty(pool);
        for item in iter.rev() {
            list = list.cons(item?);
        }
        Ok(list)
    }

    /// Constructs a new list with the given item as the head and the current list as the tail.
    pub fn cons(&self, item: T) -> Self
    where
        T: Into<ATerm>,
    {
        ATermList {
            term: self.term.pool().create_list(&item.into(), &self.term),
            _marker: PhantomData,
        }
    }

    /// Constructs the empty list.
    pub fn empty(pool: &TermPool) -> Self {
        ATermList {
            term: pool.empty_list(),
            _marker: PhantomData,
        }
    }

    /// Returns true iff the list is empty.
    pub fn is_empty(&self) -> bool {
        self.term.is_empty_list()
    }

    /// Obtain the tail, i.e. the remainder, of the list.
    ///
    /// # Panics
    ///
    /// When the list is empty.
    pub fn tail(&self) -> ATermList<T> {
        match self.term.data() {
            ATermData::List { tail, .. } => tail.into(),
            _ => panic!("The empty list has no tail"),
        }
    }

    /// Returns the number of elements, which takes time linear in the length of the list.
    pub fn len(&self) -> usize {
        let mut length = 0;
        let mut current = self.term.clone();
        while let ATermData::List { tail, .. } = current.data() {
            length += 1;
            current = tail;
        }
        length
    }

    delegate! {
        to self.term {
            pub fn pool(&self) -> &TermPool;
            pub fn index(&self) -> usize;
            pub fn reference_count(&self) -> usize;
        }
    }

    /// Returns an iterator over all subterms of the list, including the list cells.
    pub fn subterms(&self) -> TermIterator {
        self.term.iter()
    }
}

impl<T> Clone for ATermList<T> {
    fn clone(&self) -> Self {
        ATermList {
            term: self.term.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for ATermList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.term == other.term
    }
}

impl<T> Eq for ATermList<T> {}

impl<T> PartialOrd for ATermList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ATermList<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.term.cmp(&other.term)
    }
}

impl<T> Hash for ATermList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.term.hash(state)
    }
}

impl<T> From<ATermList<T>> for ATerm {
    fn from(value: ATermList<T>) -> Self {
        value.term
    }
}

impl<T> From<ATerm> for ATermList<T> {
    fn from(value: ATerm) -> Self {
        debug_assert!(value.is_list(), "Can only convert a list term, found {value}");
        ATermList::<T> {
            term: value,
            _marker: PhantomData,
        }
    }
}

impl<T> Borrow<ATerm> for ATermList<T> {
    fn borrow(&self) -> &ATerm {
        &self.term
    }
}

impl<T: From<ATerm>> IntoIterator for ATermList<T> {
    type IntoIter = ATermListIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        ATermListIter { current: self }
    }
}

impl<T: From<ATerm>> IntoIterator for &ATermList<T> {
    type IntoIter = ATermListIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> fmt::Display for ATermList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.term)
    }
}

impl<T> fmt::Debug for ATermList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.term)
    }
}

/// The iterator over the elements of an [ATermList].
pub struct ATermListIter<T> {
    current: ATermList<T>,
}

impl<T: From<ATerm>> Iterator for ATermListIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.current.term.data() {
            ATermData::List { head, tail } => {
                self.current = tail.into();
                Some(head.into())
            }
            _ => None,
        }
    }
}
