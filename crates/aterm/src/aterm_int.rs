#![forbid(unsafe_code)]

use std::borrow::Borrow;
use std::fmt;

use delegate::delegate;

use crate::ATerm;
use crate::ATermData;
use crate::TermIterator;
use crate::TermPool;

/// This is a wrapper around the [ATerm] type that stores a single `i64`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ATermInt {
    term: ATerm,
}

impl ATermInt {
    pub fn new(pool: &TermPool, value: i64) -> ATermInt {
        ATermInt {
            term: pool.create_int(value),
        }
    }

    /// Returns the value of the integer term.
    pub fn value(&self) -> i64 {
        match self.term.data() {
            ATermData::Int(value) => value,
            _ => panic!("The term {:?} is not an integer term", self.term.index()),
        }
    }

    delegate! {
        to self.term {
            pub fn pool(&self) -> &TermPool;
            pub fn index(&self) -> usize;
            pub fn iter(&self) -> TermIterator;
            pub fn reference_count(&self) -> usize;
        }
    }
}

impl From<ATerm> for ATermInt {
    fn from(term: ATerm) -> Self {
        debug_assert!(term.is_int(), "Can only convert an integer term, found {term}");
        ATermInt { term }
    }
}

impl From<ATermInt> for ATerm {
    fn from(value: ATermInt) -> Self {
        value.term
    }
}

impl Borrow<ATerm> for ATermInt {
    fn borrow(&self) -> &ATerm {
        &self.term
    }
}

impl fmt::Display for ATermInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl fmt::Debug for ATermInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use termite_utilities::test_logger;

    use super::*;

    #[test]
    fn test_int_term() {
        let _ = test_logger();
        let pool = TermPool::new();

        let int_term = ATermInt::new(&pool, 42);
        assert_eq!(int_term.value(), 42);
        assert!(ATerm::from(int_term.clone()).is_int());

        let extremes = [i64::MIN, -1, 0, i64::MAX];
        for value in extremes {
            assert_eq!(ATermInt::new(&pool, value).value(), value);
        }
    }

    #[test]
    #[should_panic]
    fn test_int_cast_of_application() {
        let pool = TermPool::new();
        let a = pool.create_constant(&pool.create_symbol("a", 0));
        let _ = ATermInt::from(a).value();
    }
}
