use core::error::Error;
use core::fmt::Debug;
use core::fmt::Display;

/// The termite error type. This has a blanket [`From`] impl for any type that implements Rust's [`Error`],
/// meaning it can be used as a "catch all" error. Captures a backtrace that can be printed from this object.
pub struct TermiteError {
    inner: Box<InnerTermiteError>,
}

impl TermiteError {
    /// Attempts to downcast the internal error to the given type.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.inner.error.downcast_ref::<E>()
    }

    /// Returns the underlying error.
    pub fn source_error(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.inner.error.as_ref()
    }
}

/// Keeps [`TermiteError`] a thin pointer, so that `Result<T, TermiteError>`
/// is only one word larger than `T`. Errors are a cold path, the extra
/// indirection does not matter.
struct InnerTermiteError {
    /// The underlying error
    error: Box<dyn Error + Send + Sync + 'static>,
    /// A backtrace captured at creation
    backtrace: std::backtrace::Backtrace,
}

// NOTE: writing the impl this way gives us From<&str>
impl<E> From<E> for TermiteError
where
    Box<dyn Error + Send + Sync + 'static>: From<E>,
{
    #[cold]
    fn from(error: E) -> Self {
        TermiteError {
            inner: Box::new(InnerTermiteError {
                error: error.into(),
                backtrace: std::backtrace::Backtrace::capture(),
            }),
        }
    }
}

impl Display for TermiteError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.inner.error)
    }
}

impl Debug for TermiteError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self.inner.error)?;
        {
            let backtrace = &self.inner.backtrace;
            if let std::backtrace::BacktraceStatus::Captured = backtrace.status() {
                writeln!(f, "{backtrace}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_downcast_io_error() {
        let error: TermiteError = io::Error::new(io::ErrorKind::UnexpectedEof, "truncated").into();

        let io_error = error.downcast_ref::<io::Error>().expect("The error should be an io::Error");
        assert_eq!(io_error.kind(), io::ErrorKind::UnexpectedEof);
        assert_eq!(error.to_string(), "truncated");
    }

    #[test]
    fn test_from_str() {
        let error: TermiteError = "something went wrong".into();
        assert_eq!(format!("{error}"), "something went wrong");
        assert!(error.downcast_ref::<io::Error>().is_none());
    }
}
