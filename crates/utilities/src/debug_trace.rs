//! Tracing that is compiled away unless the `termite_debug-trace` feature is
//! enabled in the crate that uses the macro.

/// Logs the formatted message at trace level when the calling crate enables
/// the `termite_debug-trace` feature. Otherwise the arguments are still type
/// checked, but never evaluated.
///
/// # Examples
///
/// ```
/// # use termite_utilities::debug_trace;
/// let index = 42;
/// debug_trace!("Released term {index}");
/// ```
#[macro_export]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        if cfg!(feature = "termite_debug-trace") {
            log::trace!($($arg)*);
        }
    };
}
