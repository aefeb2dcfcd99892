#![forbid(unsafe_code)]

use std::borrow::Borrow;
use std::fmt;

use delegate::delegate;

use termite_utilities::TermiteError;

use crate::ATerm;
use crate::ATermRead;
use crate::ATermStreamable;
use crate::ATermWrite;
use crate::TermPool;

/// A constant whose name is used as a string value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ATermString {
    term: ATerm,
}

impl ATermString {
    pub fn new(pool: &TermPool, string: impl Into<String> + AsRef<str>) -> Self {
        ATermString {
            term: pool.create_constant(&pool.create_symbol(string, 0)),
        }
    }

    /// Get the value of the string
    pub fn value(&self) -> String {
        self.term.get_head_symbol().name().to_string()
    }

    delegate! {
        to self.term {
            pub fn pool(&self) -> &TermPool;
            pub fn index(&self) -> usize;
            pub fn reference_count(&self) -> usize;
        }
    }
}

impl From<ATerm> for ATermString {
    fn from(term: ATerm) -> Self {
        debug_assert!(
            term.is_application() && term.arity() == 0,
            "Can only convert a constant, found {term}"
        );
        ATermString { term }
    }
}

impl From<ATermString> for ATerm {
    fn from(value: ATermString) -> Self {
        value.term
    }
}

impl Borrow<ATerm> for ATermString {
    fn borrow(&self) -> &ATerm {
        &self.term
    }
}

impl PartialEq<str> for ATermString {
    fn eq(&self, other: &str) -> bool {
        self.value() == other
    }
}

impl PartialEq<&str> for ATermString {
    fn eq(&self, other: &&str) -> bool {
        self.value() == *other
    }
}

impl fmt::Display for ATermString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl fmt::Debug for ATermString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.value())
    }
}

impl ATermStreamable for String {
    fn write<W: ATermWrite>(&self, writer: &mut W) -> Result<(), TermiteError> {
        writer.write_string(self)
    }

    fn read<R: ATermRead>(reader: &mut R) -> Result<Self, TermiteError> {
        let term = reader.read_aterm()?.ok_or("Expected a string, but the stream has ended")?;
        if !term.is_application() || term.arity() != 0 {
            return Err(format!("Expected a string, but read {term}").into());
        }

        Ok(term.get_head_symbol().name().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_term() {
        let pool = TermPool::new();

        let text = ATermString::new(&pool, "hello world");
        assert_eq!(text, "hello world");
        assert_eq!(text.value(), "hello world");
        assert_eq!(ATerm::from(text.clone()).to_string(), "\"hello world\"");
        assert_eq!(text, ATermString::new(&pool, "hello world"));
    }
}
