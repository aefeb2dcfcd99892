#![forbid(unsafe_code)]

use termite_utilities::TermiteError;

use crate::ATerm;
use crate::ATermData;

/// Trait for writing ATerms to a stream.
pub trait ATermWrite {
    /// Writes an ATerm to the stream.
    fn write_aterm(&mut self, term: &ATerm) -> Result<(), TermiteError>;

    /// Writes an integer term with the given value, without creating it.
    fn write_int(&mut self, value: i64) -> Result<(), TermiteError>;

    /// Writes a constant with the given name, without creating it.
    fn write_string(&mut self, value: &str) -> Result<(), TermiteError>;

    /// Writes the number of terms followed by the terms themselves.
    fn write_aterm_iter<I>(&mut self, iter: I) -> Result<(), TermiteError>
    where
        I: ExactSizeIterator<Item = ATerm>,
    {
        self.write_int(i64::try_from(iter.len())?)?;
        for term in iter {
            self.write_aterm(&term)?;
        }
        Ok(())
    }

    /// Flushes any remaining data to the underlying stream.
    fn flush(&mut self) -> Result<(), TermiteError>;
}

/// Trait for reading ATerms from a stream.
pub trait ATermRead {
    /// Reads the next ATerm from the stream. Returns None when the end of the stream is reached.
    fn read_aterm(&mut self) -> Result<Option<ATerm>, TermiteError>;

    /// Reads the next term, which must be an integer term.
    fn read_int(&mut self) -> Result<i64, TermiteError> {
        let term = self.read_aterm()?.ok_or("Expected an integer, but the stream has ended")?;
        match term.data() {
            ATermData::Int(value) => Ok(value),
            _ => Err(format!("Expected an integer, but read {term}").into()),
        }
    }

    /// Reads a sequence of terms that was written by [ATermWrite::write_aterm_iter].
    fn read_aterm_iter(&mut self) -> Result<ATermReadIter<'_, Self>, TermiteError>
    where
        Self: Sized,
    {
        let remaining = usize::try_from(self.read_int()?)?;
        Ok(ATermReadIter { reader: self, remaining })
    }
}

/// Trait for objects that can be written to and read from an ATerm stream.
pub trait ATermStreamable {
    /// Writes the object to the given ATerm writer.
    fn write<W: ATermWrite>(&self, writer: &mut W) -> Result<(), TermiteError>;

    /// Reads the object from the given ATerm reader.
    fn read<R: ATermRead>(reader: &mut R) -> Result<Self, TermiteError>
    where
        Self: Sized;
}

/// The terms of a sequence that is read from a stream.
pub struct ATermReadIter<'a, R: ATermRead> {
    reader: &'a mut R,
    remaining: usize,
}

impl<R: ATermRead> Iterator for ATermReadIter<'_, R> {
    type Item = Result<ATerm, TermiteError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        match self.reader.read_aterm() {
            Ok(Some(term)) => Some(Ok(term)),
            Ok(None) => Some(Err("Unexpected end of stream while reading a sequence".into())),
            Err(error) => Some(Err(error)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: ATermRead> ExactSizeIterator for ATermReadIter<'_, R> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl ATermStreamable for ATerm {
    fn write<W: ATermWrite>(&self, writer: &mut W) -> Result<(), TermiteError> {
        writer.write_aterm(self)
    }

    fn read<R: ATermRead>(reader: &mut R) -> Result<Self, TermiteError> {
        Ok(reader.read_aterm()?.ok_or("Expected a term, but the stream has ended")?)
    }
}

impl ATermStreamable for i64 {
    fn write<W: ATermWrite>(&self, writer: &mut W) -> Result<(), TermiteError> {
        writer.write_int(*self)
    }

    fn read<R: ATermRead>(reader: &mut R) -> Result<Self, TermiteError> {
        reader.read_int()
    }
}

impl<T: ATermStreamable> ATermStreamable for Vec<T> {
    fn write<W: ATermWrite>(&self, writer: &mut W) -> Result<(), TermiteError> {
        writer.write_int(i64::try_from(self.len())?)?;
        for element in self {
            element.write(writer)?;
        }
        Ok(())
    }

    fn read<R: ATermRead>(reader: &mut R) -> Result<Self, TermiteError> {
        let length = usize::try_from(reader.read_int()?)?;
        (0..length).map(|_| T::read(reader)).collect()
    }
}
