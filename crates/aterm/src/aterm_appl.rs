#![forbid(unsafe_code)]

use std::borrow::Borrow;
use std::fmt;

use delegate::delegate;

use crate::ATerm;
use crate::ATermArgs;
use crate::Symbol;
use crate::TermIterator;
use crate::TermPool;

/// A function symbol applied to as many arguments as its arity.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ATermAppl {
    term: ATerm,
}

impl ATermAppl {
    /// Creates the application of `symbol` to the given arguments.
    pub fn new(pool: &TermPool, symbol: &Symbol, arguments: &[ATerm]) -> ATermAppl {
        ATermAppl {
            term: pool.create_term(symbol, arguments),
        }
    }

    /// Returns the head symbol.
    pub fn symbol(&self) -> Symbol {
        self.term.get_head_symbol()
    }

    delegate! {
        to self.term {
            pub fn arity(&self) -> usize;
            pub fn arg(&self, index: usize) -> ATerm;
            pub fn arguments(&self) -> ATermArgs;
            pub fn replace_argument(&self, index: usize, value: ATerm) -> ATerm;
            pub fn pool(&self) -> &TermPool;
            pub fn index(&self) -> usize;
            pub fn iter(&self) -> TermIterator;
            pub fn reference_count(&self) -> usize;
        }
    }
}

impl From<ATerm> for ATermAppl {
    fn from(term: ATerm) -> Self {
        debug_assert!(term.is_application(), "Can only convert a function application, found {term}");
        ATermAppl { term }
    }
}

impl From<ATermAppl> for ATerm {
    fn from(value: ATermAppl) -> Self {
        value.term
    }
}

impl Borrow<ATerm> for ATermAppl {
    fn borrow(&self) -> &ATerm {
        &self.term
    }
}

impl fmt::Display for ATermAppl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.term)
    }
}

impl fmt::Debug for ATermAppl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.term)
    }
}
